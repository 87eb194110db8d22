use crate::error::Result;
use crate::integrations::data_transfer_objects::*;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Networking operations of the cloud provider.
///
/// Every call is a single request/response exchange. Implementations report
/// failures as `InfraError::Provider` and must not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Ec2Api: Send + Sync {
    async fn create_vpc(&self, input: CreateVpcInput) -> Result<CreateVpcOutput>;

    async fn delete_vpc(&self, input: DeleteVpcInput) -> Result<()>;

    async fn describe_subnets(&self, input: DescribeSubnetsInput) -> Result<DescribeSubnetsOutput>;

    async fn create_subnet(&self, input: CreateSubnetInput) -> Result<CreateSubnetOutput>;

    async fn delete_subnet(&self, input: DeleteSubnetInput) -> Result<()>;

    async fn create_internet_gateway(
        &self,
        input: CreateInternetGatewayInput,
    ) -> Result<CreateInternetGatewayOutput>;

    async fn attach_internet_gateway(&self, input: InternetGatewayAttachment) -> Result<()>;

    async fn detach_internet_gateway(&self, input: InternetGatewayAttachment) -> Result<()>;

    async fn delete_internet_gateway(&self, input: DeleteInternetGatewayInput) -> Result<()>;

    async fn create_security_group(
        &self,
        input: CreateSecurityGroupInput,
    ) -> Result<CreateSecurityGroupOutput>;

    async fn delete_security_group(&self, input: DeleteSecurityGroupInput) -> Result<()>;

    async fn authorize_security_group_ingress(
        &self,
        input: AuthorizeSecurityGroupIngressInput,
    ) -> Result<AuthorizeSecurityGroupIngressOutput>;

    async fn describe_availability_zones(
        &self,
        input: DescribeAvailabilityZonesInput,
    ) -> Result<DescribeAvailabilityZonesOutput>;

    async fn describe_instances(
        &self,
        input: DescribeInstancesInput,
    ) -> Result<DescribeInstancesOutput>;

    async fn allocate_address(&self, input: AllocateAddressInput) -> Result<AllocateAddressOutput>;

    async fn associate_address(
        &self,
        input: AssociateAddressInput,
    ) -> Result<AssociateAddressOutput>;

    async fn disassociate_address(&self, input: DisassociateAddressInput) -> Result<()>;

    async fn release_address(&self, input: ReleaseAddressInput) -> Result<()>;

    async fn describe_images(&self, input: DescribeImagesInput) -> Result<DescribeImagesOutput>;
}
