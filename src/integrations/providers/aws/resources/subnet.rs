use crate::error::Result;
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::{
    CreateSubnetInput, DeleteSubnetInput, DescribeSubnetsInput, SubnetInfo,
};
use crate::integrations::providers::aws::AwsProvider;
use crate::models::ResourceField;
use crate::utils::RandomSource;

use tracing::info;

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    /// First subnet of the VPC, or a new one in the resolved zone
    pub(crate) async fn get_or_create_subnet(&self, vpc_id: &str) -> Result<SubnetInfo> {
        let existing = self
            .client
            .describe_subnets(DescribeSubnetsInput {
                vpc_id: vpc_id.to_string(),
            })
            .await?;

        if let Some(subnet) = existing.subnets.into_iter().next() {
            info!(
                "Found existing subnet '{}' in VPC '{}'",
                subnet.subnet_id, vpc_id
            );
            return Ok(subnet);
        }

        let zone_id = &self.infra.status.cluster.zone_id;
        info!(
            "No existing subnet found in VPC '{}', creating a new one (zone='{}')...",
            vpc_id, zone_id
        );
        let response = self
            .client
            .create_subnet(CreateSubnetInput {
                vpc_id: vpc_id.to_string(),
                cidr_block: self.defaults.subnet_cidr_block.clone(),
                availability_zone_id: (!zone_id.is_empty()).then(|| zone_id.clone()),
                tags: self.default_tags(),
            })
            .await?;

        info!("Created new subnet '{}'", response.subnet.subnet_id);
        Ok(response.subnet)
    }

    pub(crate) async fn delete_subnet(&mut self) -> Result<()> {
        let subnet_id = ResourceField::SubnetId.value(&self.infra.status).to_string();
        if subnet_id.is_empty() {
            return Ok(());
        }

        info!("Deleting subnet '{}'...", subnet_id);
        self.client
            .delete_subnet(DeleteSubnetInput {
                subnet_id: subnet_id.clone(),
            })
            .await?;
        info!("Subnet '{}' deleted successfully", subnet_id);

        ResourceField::SubnetId.clear(&mut self.infra.status);
        ResourceField::SubnetZoneId.clear(&mut self.infra.status);
        Ok(())
    }
}
