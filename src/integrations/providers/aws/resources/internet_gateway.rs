use crate::error::Result;
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::{
    CreateInternetGatewayInput, DeleteInternetGatewayInput, InternetGatewayAttachment,
};
use crate::integrations::providers::aws::AwsProvider;
use crate::models::ResourceField;
use crate::utils::RandomSource;

use tracing::info;

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    /// Create an internet gateway and attach it to the VPC. A gateway whose
    /// attachment fails is not recorded and has to be removed by hand.
    pub(crate) async fn bind_egress_gateway(&self, vpc_id: &str) -> Result<String> {
        info!("Creating egress gateway for VPC '{}'...", vpc_id);
        let response = self
            .client
            .create_internet_gateway(CreateInternetGatewayInput {
                tags: self.default_tags(),
            })
            .await?;
        let gateway_id = response.internet_gateway_id;
        info!("Created new Internet Gateway '{}'", gateway_id);

        self.client
            .attach_internet_gateway(InternetGatewayAttachment {
                internet_gateway_id: gateway_id.clone(),
                vpc_id: vpc_id.to_string(),
            })
            .await?;
        info!(
            "Successfully attached Internet Gateway '{}' to VPC '{}'",
            gateway_id, vpc_id
        );
        Ok(gateway_id)
    }

    pub(crate) async fn unbind_egress_gateway(&mut self, vpc_id: &str) -> Result<()> {
        let gateway_id = ResourceField::EgressGatewayId
            .value(&self.infra.status)
            .to_string();
        if gateway_id.is_empty() {
            return Ok(());
        }

        info!(
            "Detaching Internet Gateway '{}' from VPC '{}'...",
            gateway_id, vpc_id
        );
        self.client
            .detach_internet_gateway(InternetGatewayAttachment {
                internet_gateway_id: gateway_id.clone(),
                vpc_id: vpc_id.to_string(),
            })
            .await?;

        info!("Deleting Internet Gateway '{}'...", gateway_id);
        self.client
            .delete_internet_gateway(DeleteInternetGatewayInput {
                internet_gateway_id: gateway_id.clone(),
            })
            .await?;
        info!("Internet Gateway '{}' deleted successfully", gateway_id);

        ResourceField::EgressGatewayId.clear(&mut self.infra.status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::InfraError;
    use crate::integrations::MockEc2Api;
    use crate::integrations::data_transfer_objects::*;
    use crate::integrations::providers::aws::resource_manager::test_support::provider;
    use crate::models::Infra;

    #[tokio::test]
    async fn test_unbind_stops_when_detach_fails() {
        let mut infra = Infra::new("demo");
        infra.status.cluster.egress_gateway_id = "igw-1".to_string();

        let mut client = MockEc2Api::new();
        client
            .expect_detach_internet_gateway()
            .returning(|_| Err(InfraError::provider("DetachInternetGateway", "denied")));

        let mut provider = provider(infra, client);
        assert!(provider.unbind_egress_gateway("vpc-1").await.is_err());
        assert_eq!(provider.infra.status.cluster.egress_gateway_id, "igw-1");
    }

    #[tokio::test]
    async fn test_bind_egress_gateway_does_not_return_unattached_gateway() {
        let mut client = MockEc2Api::new();
        client.expect_create_internet_gateway().returning(|_| {
            Ok(CreateInternetGatewayOutput {
                internet_gateway_id: "igw-1".to_string(),
            })
        });
        client
            .expect_attach_internet_gateway()
            .returning(|_| Err(InfraError::provider("AttachInternetGateway", "denied")));

        let provider = provider(Infra::new("demo"), client);
        let err = provider.bind_egress_gateway("vpc-1").await.unwrap_err();
        assert!(err.to_string().starts_with("AttachInternetGateway failed"));
    }
}
