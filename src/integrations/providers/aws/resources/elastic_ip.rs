use crate::error::{InfraError, Result};
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::{
    AllocateAddressInput, AllocateAddressOutput, AssociateAddressInput,
    DisassociateAddressInput, ReleaseAddressInput,
};
use crate::integrations::providers::aws::AwsProvider;
use crate::integrations::providers::aws::resources::ec2_instance::{
    ARCH_TAG, PRODUCT_TAG, ROLE_TAG, RUNNING_STATE_CODE, tag_filters,
};
use crate::models::ResourceField;
use crate::utils::RandomSource;

use std::collections::BTreeMap;
use tracing::{error, info};

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    /// Give the first ready master a public address.
    ///
    /// Allocate, associate, then record. If association fails the allocated
    /// address is neither released nor recorded.
    pub async fn bind_eip_for_master0(&mut self) -> Result<()> {
        let recorded = ResourceField::EipId.value(&self.infra.status);
        if !recorded.is_empty() && !self.infra.status.cluster.eip.is_empty() {
            info!(
                "Elastic IP '{}' ({}) already bound to '{}'",
                recorded, self.infra.status.cluster.eip, self.infra.status.cluster.master0_id
            );
            return Ok(());
        }

        let host = self.infra.status.ready_master().ok_or_else(|| {
            InfraError::not_found(
                "master host",
                "bind eip for master error: ready master host not found",
            )
        })?;

        let tags = BTreeMap::from([
            (PRODUCT_TAG, self.infra.name.clone()),
            (ROLE_TAG, host.roles.join(",")),
            (ARCH_TAG, host.arch.to_string()),
        ]);
        let instances = self.get_instance_infos(tag_filters(&tags)).await?;

        let master0 = instances
            .into_iter()
            .find(|instance| instance.state_code == Some(RUNNING_STATE_CODE))
            .ok_or_else(|| {
                InfraError::not_found(
                    "running instance",
                    format!("no running instance matches tags {:?}", tags),
                )
            })?;

        let address = self.allocate_eip_address().await?;
        let association_id = self
            .associate_eip_address(&master0.instance_id, &address.allocation_id)
            .await?;

        let status = &mut self.infra.status;
        status.cluster.eip = address.public_ip;
        ResourceField::EipId.set_value(status, address.allocation_id);
        ResourceField::EipAssociationId.set_value(status, association_id.unwrap_or_default());
        status.cluster.master0_id = master0.instance_id;
        status.cluster.master0_internal_ip = master0.private_ip_address.unwrap_or_default();

        info!(
            "Bound Elastic IP '{}' to master0 '{}' ({})",
            status.cluster.eip, status.cluster.master0_id, status.cluster.master0_internal_ip
        );
        Ok(())
    }

    async fn allocate_eip_address(&self) -> Result<AllocateAddressOutput> {
        info!("Allocating new Elastic IP for infra '{}'...", self.infra.name);
        let response = self
            .client
            .allocate_address(AllocateAddressInput {
                tags: self.default_tags(),
            })
            .await?;
        info!(
            "Allocated Elastic IP '{}' (allocation identifier: '{}')",
            response.public_ip, response.allocation_id
        );
        Ok(response)
    }

    async fn associate_eip_address(
        &self,
        instance_id: &str,
        allocation_id: &str,
    ) -> Result<Option<String>> {
        info!(
            "Associating Elastic IP '{}' with instance '{}'...",
            allocation_id, instance_id
        );
        let response = self
            .client
            .associate_address(AssociateAddressInput {
                instance_id: instance_id.to_string(),
                allocation_id: allocation_id.to_string(),
            })
            .await
            .inspect_err(|_| {
                error!(
                    "Elastic IP '{}' stays allocated after the failed association",
                    allocation_id
                )
            })?;
        info!(
            "Successfully associated Elastic IP '{}' (association identifier: '{:?}')",
            allocation_id, response.association_id
        );
        Ok(response.association_id)
    }

    async fn disassociate_eip_address(&self) -> Result<()> {
        let association_id = ResourceField::EipAssociationId.value(&self.infra.status);
        let input = if association_id.is_empty() {
            DisassociateAddressInput {
                association_id: None,
                public_ip: Some(self.infra.status.cluster.eip.clone()),
            }
        } else {
            DisassociateAddressInput {
                association_id: Some(association_id.to_string()),
                public_ip: None,
            }
        };

        info!("Disassociating Elastic IP ({:?})...", input);
        self.client.disassociate_address(input).await?;
        info!("Successfully disassociated Elastic IP");
        Ok(())
    }

    /// Disassociate, then release the recorded address
    pub async fn release_eip_address(&mut self) -> Result<()> {
        let allocation_id = ResourceField::EipId.value(&self.infra.status).to_string();
        if allocation_id.is_empty() {
            info!("No Elastic IP recorded, nothing to release");
            return Ok(());
        }

        self.disassociate_eip_address().await?;

        info!(
            "Releasing Elastic IP (allocation identifier: '{}')...",
            allocation_id
        );
        self.client
            .release_address(ReleaseAddressInput {
                allocation_id: allocation_id.clone(),
            })
            .await?;
        info!("Successfully released Elastic IP '{}'", allocation_id);

        ResourceField::EipId.clear(&mut self.infra.status);
        ResourceField::EipAssociationId.clear(&mut self.infra.status);
        self.infra.status.cluster.eip.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::InfraError;
    use crate::integrations::MockEc2Api;
    use crate::integrations::data_transfer_objects::*;
    use crate::integrations::providers::aws::resource_manager::test_support::provider;
    use crate::models::{Arch, Infra, InfraHostStatus, MASTER, NODE, ResourceField};
    use mockall::Sequence;

    fn infra_with_hosts(ready: bool) -> Infra {
        let mut infra = Infra::new("demo");
        infra.status.hosts = vec![
            InfraHostStatus {
                roles: vec![NODE.to_string()],
                ready: true,
                ..Default::default()
            },
            InfraHostStatus {
                roles: vec![MASTER.to_string()],
                arch: Arch::Arm64,
                ready,
                ..Default::default()
            },
        ];
        infra
    }

    fn instance(id: &str, ip: &str, state_code: i32) -> InstanceInfo {
        InstanceInfo {
            instance_id: id.to_string(),
            private_ip_address: Some(ip.to_string()),
            state_code: Some(state_code),
        }
    }

    #[tokio::test]
    async fn test_bind_without_ready_master_makes_no_calls() {
        let mut provider = provider(infra_with_hosts(false), MockEc2Api::new());
        let err = provider.bind_eip_for_master0().await.unwrap_err();

        assert!(matches!(err, InfraError::NotFound { kind: "master host", .. }));
        assert!(provider.infra.status.cluster.eip.is_empty());
    }

    #[tokio::test]
    async fn test_bind_associates_with_running_master() {
        let mut client = MockEc2Api::new();
        client
            .expect_describe_instances()
            .withf(|input: &DescribeInstancesInput| {
                input.filters
                    == vec![
                        ResourceFilter {
                            name: "tag:arch".to_string(),
                            values: vec!["arm64".to_string()],
                        },
                        ResourceFilter {
                            name: "tag:product".to_string(),
                            values: vec!["demo".to_string()],
                        },
                        ResourceFilter {
                            name: "tag:role".to_string(),
                            values: vec!["master".to_string()],
                        },
                    ]
            })
            .times(1)
            .returning(|_| {
                Ok(DescribeInstancesOutput {
                    instances: vec![
                        instance("i-stopped", "10.0.1.9", 80),
                        instance("i-master", "10.0.1.10", 16),
                    ],
                })
            });
        client.expect_allocate_address().times(1).returning(|_| {
            Ok(AllocateAddressOutput {
                public_ip: "203.0.113.7".to_string(),
                allocation_id: "eipalloc-1".to_string(),
            })
        });
        client
            .expect_associate_address()
            .withf(|input: &AssociateAddressInput| {
                input.instance_id == "i-master" && input.allocation_id == "eipalloc-1"
            })
            .times(1)
            .returning(|_| {
                Ok(AssociateAddressOutput {
                    association_id: Some("eipassoc-1".to_string()),
                })
            });

        let mut provider = provider(infra_with_hosts(true), client);
        provider.bind_eip_for_master0().await.unwrap();

        let status = &provider.infra.status;
        assert_eq!(status.cluster.eip, "203.0.113.7");
        assert_eq!(ResourceField::EipId.value(status), "eipalloc-1");
        assert_eq!(ResourceField::EipAssociationId.value(status), "eipassoc-1");
        assert_eq!(status.cluster.master0_id, "i-master");
        assert_eq!(status.cluster.master0_internal_ip, "10.0.1.10");

        // already bound: no further calls
        provider.bind_eip_for_master0().await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_without_running_instance_does_not_allocate() {
        let mut client = MockEc2Api::new();
        client.expect_describe_instances().returning(|_| {
            Ok(DescribeInstancesOutput {
                instances: vec![instance("i-pending", "10.0.1.10", 0)],
            })
        });

        let mut provider = provider(infra_with_hosts(true), client);
        let err = provider.bind_eip_for_master0().await.unwrap_err();
        assert!(matches!(
            err,
            InfraError::NotFound {
                kind: "running instance",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_bind_association_failure_records_nothing() {
        let mut client = MockEc2Api::new();
        client.expect_describe_instances().returning(|_| {
            Ok(DescribeInstancesOutput {
                instances: vec![instance("i-master", "10.0.1.10", 16)],
            })
        });
        client.expect_allocate_address().times(1).returning(|_| {
            Ok(AllocateAddressOutput {
                public_ip: "203.0.113.7".to_string(),
                allocation_id: "eipalloc-1".to_string(),
            })
        });
        client
            .expect_associate_address()
            .returning(|_| Err(InfraError::provider("AssociateAddress", "InvalidInstanceID")));

        let mut provider = provider(infra_with_hosts(true), client);
        assert!(provider.bind_eip_for_master0().await.is_err());

        let status = &provider.infra.status;
        assert!(status.cluster.eip.is_empty());
        assert!(ResourceField::EipId.value(status).is_empty());
        assert!(status.cluster.master0_id.is_empty());
    }

    fn infra_with_bound_eip() -> Infra {
        let mut infra = infra_with_hosts(true);
        infra.status.cluster.eip = "203.0.113.7".to_string();
        infra.status.cluster.eip_id = "eipalloc-1".to_string();
        infra.status.cluster.eip_association_id = "eipassoc-1".to_string();
        infra
    }

    #[tokio::test]
    async fn test_release_disassociates_before_release() {
        let mut seq = Sequence::new();
        let mut client = MockEc2Api::new();
        client
            .expect_disassociate_address()
            .withf(|input: &DisassociateAddressInput| {
                input.association_id.as_deref() == Some("eipassoc-1")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        client
            .expect_release_address()
            .withf(|input: &ReleaseAddressInput| input.allocation_id == "eipalloc-1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut provider = provider(infra_with_bound_eip(), client);
        provider.release_eip_address().await.unwrap();

        let status = &provider.infra.status;
        assert!(status.cluster.eip.is_empty());
        assert!(ResourceField::EipId.value(status).is_empty());
        assert!(ResourceField::EipAssociationId.value(status).is_empty());
    }

    #[tokio::test]
    async fn test_release_is_not_attempted_when_disassociate_fails() {
        let mut client = MockEc2Api::new();
        client
            .expect_disassociate_address()
            .times(1)
            .returning(|_| Err(InfraError::provider("DisassociateAddress", "denied")));
        client.expect_release_address().never();

        let mut provider = provider(infra_with_bound_eip(), client);
        let err = provider.release_eip_address().await.unwrap_err();

        assert!(matches!(
            err,
            InfraError::Provider {
                operation: "DisassociateAddress",
                ..
            }
        ));
        assert_eq!(provider.infra.status.cluster.eip_id, "eipalloc-1");
    }

    #[tokio::test]
    async fn test_release_falls_back_to_public_ip() {
        let mut infra = infra_with_bound_eip();
        infra.status.cluster.eip_association_id.clear();

        let mut client = MockEc2Api::new();
        client
            .expect_disassociate_address()
            .withf(|input: &DisassociateAddressInput| {
                input.association_id.is_none()
                    && input.public_ip.as_deref() == Some("203.0.113.7")
            })
            .returning(|_| Ok(()));
        client.expect_release_address().returning(|_| Ok(()));

        let mut provider = provider(infra, client);
        provider.release_eip_address().await.unwrap();
    }

    #[tokio::test]
    async fn test_release_without_recorded_eip_is_noop() {
        let mut provider = provider(infra_with_hosts(true), MockEc2Api::new());
        provider.release_eip_address().await.unwrap();
    }
}
