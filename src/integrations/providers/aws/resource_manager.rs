use crate::config::InfraDefaults;
use crate::error::Result;
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::ResourceTag;
use crate::models::Infra;
use crate::store::InfraStore;
use crate::utils::{ProgressTracker, RandomSource, ThreadRandom};

use tracing::{info, warn};

/// Owns one infra document and reconciles its networking resources.
///
/// A pass runs its steps one after another and is the only writer of
/// `infra.status` while it runs. Multi-step creates do not roll back on
/// failure: whatever was created before the failing call stays recorded in
/// status so the delete path (or an operator) can clean it up.
pub struct AwsProvider<C: Ec2Api, R: RandomSource = ThreadRandom> {
    pub infra: Infra,
    pub client: C,
    pub defaults: InfraDefaults,
    pub random: R,
}

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    pub fn new(infra: Infra, client: C, defaults: InfraDefaults, random: R) -> Self {
        Self {
            infra,
            client,
            defaults,
            random,
        }
    }

    /// Tags applied to every resource this provider creates
    pub(crate) fn default_tags(&self) -> Vec<ResourceTag> {
        vec![ResourceTag::new(
            &self.defaults.tag_key,
            &self.defaults.tag_value,
        )]
    }

    /// Save status whether or not the step succeeded; the step's error wins
    fn persist(&self, store: &dyn InfraStore, step: Result<()>) -> Result<()> {
        let saved = store.save(&self.infra);
        if let (Err(step_err), Err(save_err)) = (&step, &saved) {
            warn!(
                "Step failed ({}) and status could not be saved: {}",
                step_err, save_err
            );
        }
        step?;
        saved
    }

    /// Zone, VPC (with subnet and egress gateway) and security group
    pub async fn apply_network(
        &mut self,
        store: &dyn InfraStore,
        tracker: &ProgressTracker,
    ) -> Result<()> {
        info!("Reconciling network for infra '{}'...", self.infra.name);

        tracker.update_message("Resolving Availability Zone...");
        let step = self.get_available_zone_id().await;
        self.persist(store, step)?;
        tracker.inc();

        tracker.update_message("Creating VPC, Subnet and Egress Gateway...");
        let step = self.create_vpc().await;
        self.persist(store, step)?;
        tracker.inc();

        tracker.update_message("Creating Security Group and Ingress Rules...");
        let step = self.create_security_group().await;
        self.persist(store, step)?;
        tracker.inc();

        info!("Network for infra '{}' is ready", self.infra.name);
        Ok(())
    }

    /// Public address for the first ready master; run after instances booted
    pub async fn bind_master_eip(
        &mut self,
        store: &dyn InfraStore,
        tracker: &ProgressTracker,
    ) -> Result<()> {
        tracker.update_message("Binding Elastic IP to master0...");
        let step = self.bind_eip_for_master0().await;
        self.persist(store, step)?;
        tracker.inc();
        Ok(())
    }

    pub async fn release_master_eip(
        &mut self,
        store: &dyn InfraStore,
        tracker: &ProgressTracker,
    ) -> Result<()> {
        tracker.update_message("Releasing Elastic IP...");
        let step = self.release_eip_address().await;
        self.persist(store, step)?;
        tracker.inc();
        Ok(())
    }

    /// Reverse of `apply_network` plus the master EIP
    pub async fn destroy_network(
        &mut self,
        store: &dyn InfraStore,
        tracker: &ProgressTracker,
    ) -> Result<()> {
        info!("Destroying network for infra '{}'...", self.infra.name);

        self.release_master_eip(store, tracker).await?;

        tracker.update_message("Deleting Security Group...");
        let step = self.delete_security_group().await;
        self.persist(store, step)?;
        tracker.inc();

        tracker.update_message("Deleting Egress Gateway, Subnet and VPC...");
        let step = self.delete_vpc().await;
        self.persist(store, step)?;
        tracker.inc();

        info!("Network for infra '{}' destroyed", self.infra.name);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::integrations::MockEc2Api;
    use crate::utils::FixedRandom;

    pub fn provider(infra: Infra, client: MockEc2Api) -> AwsProvider<MockEc2Api, FixedRandom> {
        AwsProvider::new(
            infra,
            client,
            InfraDefaults::default(),
            FixedRandom::new(0, "abc123"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::provider;
    use crate::error::InfraError;
    use crate::integrations::MockEc2Api;
    use crate::integrations::data_transfer_objects::*;
    use crate::models::{ExportPort, Infra, Protocol, ResourceField};
    use crate::store::MemoryInfraStore;
    use crate::utils::ProgressTracker;

    fn demo_infra() -> Infra {
        let mut infra = Infra::new("demo");
        infra.spec.metadata.zone_ids = vec!["use1-az1".to_string()];
        infra.spec.metadata.network.export_ports =
            vec![ExportPort::new(Protocol::Tcp, "0.0.0.0/0", "22/22")];
        infra
    }

    #[tokio::test]
    async fn test_apply_network_runs_steps_in_order_and_saves_each() {
        let mut client = MockEc2Api::new();
        client
            .expect_create_vpc()
            .times(1)
            .returning(|_| Ok(CreateVpcOutput { vpc_id: "vpc-1".to_string() }));
        client
            .expect_describe_subnets()
            .returning(|_| Ok(DescribeSubnetsOutput::default()));
        client
            .expect_create_subnet()
            .withf(|input: &CreateSubnetInput| {
                input.availability_zone_id.as_deref() == Some("use1-az1")
            })
            .returning(|_| {
                Ok(CreateSubnetOutput {
                    subnet: SubnetInfo {
                        subnet_id: "subnet-1".to_string(),
                        availability_zone_id: "use1-az1".to_string(),
                    },
                })
            });
        client.expect_create_internet_gateway().returning(|_| {
            Ok(CreateInternetGatewayOutput {
                internet_gateway_id: "igw-1".to_string(),
            })
        });
        client
            .expect_attach_internet_gateway()
            .returning(|_| Ok(()));
        client
            .expect_create_security_group()
            .withf(|input: &CreateSecurityGroupInput| input.vpc_id == "vpc-1")
            .returning(|_| Ok(CreateSecurityGroupOutput { group_id: "sg-1".to_string() }));
        client
            .expect_authorize_security_group_ingress()
            .returning(|_| Ok(AuthorizeSecurityGroupIngressOutput { accepted: true }));

        let store = MemoryInfraStore::default();
        let mut provider = provider(demo_infra(), client);
        provider
            .apply_network(&store, &ProgressTracker::hidden())
            .await
            .unwrap();

        let cluster = &provider.infra.status.cluster;
        assert_eq!(cluster.zone_id, "use1-az1");
        assert_eq!(cluster.vpc_id, "vpc-1");
        assert_eq!(cluster.subnet_id, "subnet-1");
        assert_eq!(cluster.egress_gateway_id, "igw-1");
        assert_eq!(cluster.security_group_id, "sg-1");

        let saved = store.saved();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].status.cluster.zone_id, "use1-az1");
        assert!(saved[0].status.cluster.vpc_id.is_empty());
        assert_eq!(saved[1].status.cluster.vpc_id, "vpc-1");
        assert!(saved[1].status.cluster.security_group_id.is_empty());
        assert_eq!(saved[2], provider.infra);
    }

    #[tokio::test]
    async fn test_apply_network_persists_partial_vpc_on_failure() {
        let mut client = MockEc2Api::new();
        client
            .expect_create_vpc()
            .returning(|_| Ok(CreateVpcOutput { vpc_id: "vpc-1".to_string() }));
        client
            .expect_describe_subnets()
            .returning(|_| Err(InfraError::provider("DescribeSubnets", "throttled")));

        let store = MemoryInfraStore::default();
        let mut provider = provider(demo_infra(), client);
        let err = provider
            .apply_network(&store, &ProgressTracker::hidden())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InfraError::Provider {
                operation: "DescribeSubnets",
                ..
            }
        ));
        let saved = store.saved();
        assert_eq!(saved.len(), 2);
        assert_eq!(
            ResourceField::VpcId.value(&saved[1].status),
            "vpc-1",
            "a VPC created before the failure must stay recorded"
        );
        assert!(saved[1].status.cluster.subnet_id.is_empty());
    }

    #[tokio::test]
    async fn test_destroy_network_on_empty_status_issues_no_calls() {
        let store = MemoryInfraStore::default();
        let tracker = ProgressTracker::hidden();
        let mut provider = provider(demo_infra(), MockEc2Api::new());

        provider.destroy_network(&store, &tracker).await.unwrap();

        assert_eq!(store.saved().len(), 3);
        assert_eq!(tracker.position(), 3);
    }

    #[tokio::test]
    async fn test_destroy_network_tears_down_in_reverse_order() {
        let mut infra = demo_infra();
        let cluster = &mut infra.status.cluster;
        cluster.vpc_id = "vpc-1".to_string();
        cluster.subnet_id = "subnet-1".to_string();
        cluster.egress_gateway_id = "igw-1".to_string();
        cluster.security_group_id = "sg-1".to_string();
        cluster.eip_id = "eipalloc-1".to_string();
        cluster.eip_association_id = "eipassoc-1".to_string();
        cluster.eip = "203.0.113.7".to_string();

        let mut seq = mockall::Sequence::new();
        let mut client = MockEc2Api::new();
        client
            .expect_disassociate_address()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_release_address()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_delete_security_group()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_detach_internet_gateway()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_delete_internet_gateway()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_delete_subnet()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_delete_vpc()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let store = MemoryInfraStore::default();
        let mut provider = provider(infra, client);
        provider
            .destroy_network(&store, &ProgressTracker::hidden())
            .await
            .unwrap();

        assert_eq!(
            provider.infra.status.cluster,
            crate::models::ClusterStatus::default()
        );
    }
}
