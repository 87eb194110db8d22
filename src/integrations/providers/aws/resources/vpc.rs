use crate::error::Result;
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::{CreateVpcInput, DeleteVpcInput};
use crate::integrations::providers::aws::AwsProvider;
use crate::models::ResourceField;
use crate::utils::RandomSource;

use tracing::{debug, info};

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    /// Adopt the declared VPC, or create one together with its subnet and
    /// egress gateway. A VPC already recorded in status is not created again;
    /// only its missing subnet/gateway are filled in.
    pub async fn create_vpc(&mut self) -> Result<()> {
        let declared_vpc_id = ResourceField::VpcId
            .cluster_value(&self.infra.spec)
            .to_string();
        if !declared_vpc_id.is_empty() {
            debug!("VpcID using declared value '{}'", declared_vpc_id);
            ResourceField::VpcId.set_value(&mut self.infra.status, declared_vpc_id);

            let declared_subnet_id = ResourceField::SubnetId
                .cluster_value(&self.infra.spec)
                .to_string();
            if !declared_subnet_id.is_empty() {
                debug!("SubnetID using declared value '{}'", declared_subnet_id);
                ResourceField::SubnetId.set_value(&mut self.infra.status, declared_subnet_id);
            }
            return Ok(());
        }

        let mut vpc_id = ResourceField::VpcId.value(&self.infra.status).to_string();
        if vpc_id.is_empty() {
            info!(
                "Creating VPC (cidr='{}') for infra '{}'...",
                self.defaults.vpc_cidr_block, self.infra.name
            );
            let response = self
                .client
                .create_vpc(CreateVpcInput {
                    cidr_block: self.defaults.vpc_cidr_block.clone(),
                    tags: self.default_tags(),
                })
                .await?;
            info!("Created new VPC '{}'", response.vpc_id);
            ResourceField::VpcId.set_value(&mut self.infra.status, response.vpc_id.clone());
            vpc_id = response.vpc_id;
        } else {
            info!("Found VPC '{}' in status", vpc_id);
        }

        if ResourceField::SubnetId.value(&self.infra.status).is_empty() {
            let subnet = self.get_or_create_subnet(&vpc_id).await?;
            ResourceField::SubnetId.set_value(&mut self.infra.status, subnet.subnet_id);
            ResourceField::SubnetZoneId
                .set_value(&mut self.infra.status, subnet.availability_zone_id);
        }

        if ResourceField::EgressGatewayId.value(&self.infra.status).is_empty() {
            let gateway_id = self.bind_egress_gateway(&vpc_id).await?;
            ResourceField::EgressGatewayId.set_value(&mut self.infra.status, gateway_id);
        }

        Ok(())
    }

    /// Delete the recorded VPC after its gateway and subnet.
    ///
    /// Skipped when the VPC was both declared by the user and recorded in
    /// status, or when nothing is recorded.
    pub async fn delete_vpc(&mut self) -> Result<()> {
        if ResourceField::VpcId.is_externally_owned(&self.infra.spec, &self.infra.status) {
            debug!("VpcID was declared by the user, skipping deletion");
            return Ok(());
        }

        let vpc_id = ResourceField::VpcId.value(&self.infra.status).to_string();
        if vpc_id.is_empty() {
            info!("No VPC recorded, nothing to delete");
            return Ok(());
        }

        self.unbind_egress_gateway(&vpc_id).await?;
        self.delete_subnet().await?;

        info!("Deleting VPC '{}'...", vpc_id);
        self.client
            .delete_vpc(DeleteVpcInput {
                vpc_id: vpc_id.clone(),
            })
            .await?;
        info!("VPC '{}' deleted successfully", vpc_id);
        ResourceField::VpcId.clear(&mut self.infra.status);
        Ok(())
    }
}
