use crate::models::{InfraSpec, InfraStatus};

/// Typed key over the spec/status pair of a networking resource.
///
/// `cluster_value` reads the user declaration and never mutates anything;
/// `set_value` is the only writer of the matching status field. A value that
/// came from `cluster_value` is owned by the user and is never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceField {
    VpcId,
    SubnetId,
    SubnetZoneId,
    SecurityGroupId,
    EgressGatewayId,
    EipId,
    EipAssociationId,
}

impl ResourceField {
    pub const ALL: [ResourceField; 7] = [
        ResourceField::VpcId,
        ResourceField::SubnetId,
        ResourceField::SubnetZoneId,
        ResourceField::SecurityGroupId,
        ResourceField::EgressGatewayId,
        ResourceField::EipId,
        ResourceField::EipAssociationId,
    ];

    /// User-declared value, empty when undeclared or not declarable
    pub fn cluster_value<'a>(&self, spec: &'a InfraSpec) -> &'a str {
        match self {
            ResourceField::VpcId => &spec.metadata.vpc_id,
            ResourceField::SubnetId => &spec.metadata.subnet_id,
            ResourceField::SecurityGroupId => &spec.metadata.security_group_id,
            ResourceField::SubnetZoneId
            | ResourceField::EgressGatewayId
            | ResourceField::EipId
            | ResourceField::EipAssociationId => "",
        }
    }

    /// Currently recorded value, empty when nothing was recorded
    pub fn value<'a>(&self, status: &'a InfraStatus) -> &'a str {
        let cluster = &status.cluster;
        match self {
            ResourceField::VpcId => &cluster.vpc_id,
            ResourceField::SubnetId => &cluster.subnet_id,
            ResourceField::SubnetZoneId => &cluster.subnet_zone_id,
            ResourceField::SecurityGroupId => &cluster.security_group_id,
            ResourceField::EgressGatewayId => &cluster.egress_gateway_id,
            ResourceField::EipId => &cluster.eip_id,
            ResourceField::EipAssociationId => &cluster.eip_association_id,
        }
    }

    pub fn set_value(&self, status: &mut InfraStatus, value: impl Into<String>) {
        let cluster = &mut status.cluster;
        let slot = match self {
            ResourceField::VpcId => &mut cluster.vpc_id,
            ResourceField::SubnetId => &mut cluster.subnet_id,
            ResourceField::SubnetZoneId => &mut cluster.subnet_zone_id,
            ResourceField::SecurityGroupId => &mut cluster.security_group_id,
            ResourceField::EgressGatewayId => &mut cluster.egress_gateway_id,
            ResourceField::EipId => &mut cluster.eip_id,
            ResourceField::EipAssociationId => &mut cluster.eip_association_id,
        };
        *slot = value.into();
    }

    pub fn clear(&self, status: &mut InfraStatus) {
        self.set_value(status, String::new());
    }

    /// True when the user declared the resource and it was adopted into status
    pub fn is_externally_owned(&self, spec: &InfraSpec, status: &InfraStatus) -> bool {
        !self.cluster_value(spec).is_empty() && !self.value(status).is_empty()
    }
}

impl std::fmt::Display for ResourceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceField::VpcId => "VpcID",
            ResourceField::SubnetId => "SubnetID",
            ResourceField::SubnetZoneId => "SubnetZoneID",
            ResourceField::SecurityGroupId => "SecurityGroupID",
            ResourceField::EgressGatewayId => "EgressGatewayID",
            ResourceField::EipId => "EipID",
            ResourceField::EipAssociationId => "EipAssociationID",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_then_value_for_every_field() {
        let mut status = InfraStatus::default();
        for (i, field) in ResourceField::ALL.iter().enumerate() {
            let value = format!("id-{}", i);
            field.set_value(&mut status, value.clone());
            assert_eq!(field.value(&status), value, "field {}", field);
        }
        // fields are independent slots
        for (i, field) in ResourceField::ALL.iter().enumerate() {
            assert_eq!(field.value(&status), format!("id-{}", i));
        }
    }

    #[test]
    fn test_cluster_value_reads_declared_ids_only() {
        let mut spec = InfraSpec::default();
        spec.metadata.vpc_id = "vpc-user".to_string();
        spec.metadata.security_group_id = "sg-user".to_string();

        assert_eq!(ResourceField::VpcId.cluster_value(&spec), "vpc-user");
        assert_eq!(ResourceField::SecurityGroupId.cluster_value(&spec), "sg-user");
        assert_eq!(ResourceField::SubnetId.cluster_value(&spec), "");
        assert_eq!(ResourceField::EipId.cluster_value(&spec), "");
    }

    #[test]
    fn test_externally_owned_needs_declaration_and_status() {
        let mut spec = InfraSpec::default();
        let mut status = InfraStatus::default();
        let field = ResourceField::VpcId;

        field.set_value(&mut status, "vpc-created");
        assert!(!field.is_externally_owned(&spec, &status));

        spec.metadata.vpc_id = "vpc-user".to_string();
        field.clear(&mut status);
        assert!(!field.is_externally_owned(&spec, &status));

        field.set_value(&mut status, "vpc-user");
        assert!(field.is_externally_owned(&spec, &status));
    }
}
