use crate::error::{InfraError, Result};
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::{
    AuthorizeSecurityGroupIngressInput, CreateSecurityGroupInput, DeleteSecurityGroupInput,
    IngressPermission, ResourceTag,
};
use crate::integrations::providers::aws::AwsProvider;
use crate::models::{ExportPort, ResourceField};
use crate::utils::RandomSource;

use tracing::{debug, error, info, warn};

const NAME_SUFFIX_LEN: usize = 8;

fn ingress_permissions(export_ports: &[ExportPort]) -> Result<Vec<IngressPermission>> {
    export_ports
        .iter()
        .map(|port| {
            let (from_port, to_port) = port.port_bounds().map_err(InfraError::Policy)?;
            Ok(IngressPermission {
                ip_protocol: port.protocol.to_string(),
                from_port,
                to_port,
                cidr_ip: port.cidr_ip.clone(),
            })
        })
        .collect()
}

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    /// Adopt the declared security group, or create one in the resolved VPC
    /// and open the declared export ports on it.
    ///
    /// A group whose ingress authorization fails stays behind unrecorded.
    pub async fn create_security_group(&mut self) -> Result<()> {
        let declared = ResourceField::SecurityGroupId
            .cluster_value(&self.infra.spec)
            .to_string();
        if !declared.is_empty() {
            debug!("SecurityGroupID using declared value '{}'", declared);
            ResourceField::SecurityGroupId.set_value(&mut self.infra.status, declared);
            return Ok(());
        }

        let recorded = ResourceField::SecurityGroupId.value(&self.infra.status);
        if !recorded.is_empty() {
            info!("Found Security Group '{}' in status", recorded);
            return Ok(());
        }

        let vpc_id = ResourceField::VpcId.value(&self.infra.status).to_string();
        if vpc_id.is_empty() {
            return Err(InfraError::not_found(
                "VPC",
                format!(
                    "no VpcID recorded for infra '{}', cannot create a security group",
                    self.infra.name
                ),
            ));
        }

        let export_ports = &self.infra.spec.metadata.network.export_ports;
        let permissions = ingress_permissions(export_ports)?;

        let group_name = format!(
            "{}-{}",
            self.defaults.security_group_prefix,
            self.random.suffix(NAME_SUFFIX_LEN)
        );
        info!(
            "Creating Security Group '{}' in VPC '{}'...",
            group_name, vpc_id
        );
        let mut tags = self.default_tags();
        tags.push(ResourceTag::new("Name", &group_name));
        let response = self
            .client
            .create_security_group(CreateSecurityGroupInput {
                group_name,
                description: self.defaults.security_group_description.clone(),
                vpc_id,
                tags,
            })
            .await?;
        let group_id = response.group_id;
        info!("Created new Security Group '{}'", group_id);

        if permissions.is_empty() {
            warn!(
                "No export ports declared, Security Group '{}' has no ingress rules",
                group_id
            );
        } else {
            info!(
                "Authorizing ingress {:?} on Security Group '{}'...",
                export_ports.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
                group_id
            );
            let authorized = self
                .client
                .authorize_security_group_ingress(AuthorizeSecurityGroupIngressInput {
                    group_id: group_id.clone(),
                    permissions,
                })
                .await?;
            if !authorized.accepted {
                error!(
                    "Ingress authorization refused for Security Group '{}'",
                    group_id
                );
                return Err(InfraError::Policy(format!(
                    "authorize security group '{}' ports {:?} failed",
                    group_id,
                    export_ports
                        .iter()
                        .map(|p| p.port_range.as_str())
                        .collect::<Vec<_>>()
                )));
            }
        }

        ResourceField::SecurityGroupId.set_value(&mut self.infra.status, group_id);
        Ok(())
    }

    /// Same skip rules as `delete_vpc`
    pub async fn delete_security_group(&mut self) -> Result<()> {
        if ResourceField::SecurityGroupId.is_externally_owned(&self.infra.spec, &self.infra.status)
        {
            debug!("SecurityGroupID was declared by the user, skipping deletion");
            return Ok(());
        }

        let group_id = ResourceField::SecurityGroupId
            .value(&self.infra.status)
            .to_string();
        if group_id.is_empty() {
            info!("No Security Group recorded, nothing to delete");
            return Ok(());
        }

        info!("Deleting Security Group '{}'...", group_id);
        self.client
            .delete_security_group(DeleteSecurityGroupInput {
                group_id: group_id.clone(),
            })
            .await?;
        info!("Security Group '{}' deleted successfully", group_id);
        ResourceField::SecurityGroupId.clear(&mut self.infra.status);
        Ok(())
    }
}
