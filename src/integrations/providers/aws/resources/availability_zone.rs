use crate::error::{InfraError, Result};
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::DescribeAvailabilityZonesInput;
use crate::integrations::providers::aws::AwsProvider;
use crate::utils::RandomSource;

use tracing::{debug, info};

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    /// Resolve the zone for the cluster once. Declared zone IDs are preferred;
    /// otherwise any zone of the configured region is picked at random.
    pub async fn get_available_zone_id(&mut self) -> Result<()> {
        if !self.infra.status.cluster.zone_id.is_empty() {
            debug!(
                "ZoneID using status value '{}'",
                self.infra.status.cluster.zone_id
            );
            return Ok(());
        }

        let declared = &self.infra.spec.metadata.zone_ids;
        let zone_id = if !declared.is_empty() {
            declared[self.random.pick_index(declared.len())].clone()
        } else {
            let response = self
                .client
                .describe_availability_zones(DescribeAvailabilityZonesInput {
                    region: self.defaults.region.clone(),
                })
                .await?;
            if response.zones.is_empty() {
                return Err(InfraError::not_found(
                    "availability zone",
                    format!("not available ZoneID in region '{}'", self.defaults.region),
                ));
            }
            let index = self.random.pick_index(response.zones.len());
            response.zones[index].zone_id.clone()
        };

        info!("Resolved availability zone '{}'", zone_id);
        self.infra.status.cluster.zone_id = zone_id;
        Ok(())
    }
}
