use crate::error::{InfraError, Result};
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::*;

use async_trait::async_trait;
use aws_sdk_ec2::Client as EC2Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{
    DomainType, Filter, IpPermission, IpRange, ResourceType, Tag, TagSpecification,
};
use tracing::{debug, error};

/// `Ec2Api` backed by the AWS SDK
pub struct AwsEc2Client {
    client: EC2Client,
}

impl AwsEc2Client {
    pub fn new(client: EC2Client) -> Self {
        Self { client }
    }
}

fn provider_error<E>(operation: &'static str, e: E) -> InfraError
where
    E: std::error::Error + 'static,
{
    error!("{:?}", e);
    InfraError::provider(operation, DisplayErrorContext(&e).to_string())
}

fn missing_field(operation: &'static str, field: &str) -> InfraError {
    InfraError::provider(operation, format!("response did not include '{}'", field))
}

fn tag_specification(resource_type: ResourceType, tags: &[ResourceTag]) -> TagSpecification {
    tags.iter()
        .fold(
            TagSpecification::builder().resource_type(resource_type),
            |builder, tag| {
                builder.tags(Tag::builder().key(&tag.key).value(&tag.value).build())
            },
        )
        .build()
}

fn to_filter(filter: ResourceFilter) -> Filter {
    Filter::builder()
        .name(filter.name)
        .set_values(Some(filter.values))
        .build()
}

#[async_trait]
impl Ec2Api for AwsEc2Client {
    async fn create_vpc(&self, input: CreateVpcInput) -> Result<CreateVpcOutput> {
        let response = self
            .client
            .create_vpc()
            .cidr_block(input.cidr_block)
            .tag_specifications(tag_specification(ResourceType::Vpc, &input.tags))
            .send()
            .await
            .map_err(|e| provider_error("CreateVpc", e))?;

        let vpc_id = response
            .vpc()
            .and_then(|vpc| vpc.vpc_id())
            .ok_or_else(|| missing_field("CreateVpc", "VpcId"))?;
        Ok(CreateVpcOutput {
            vpc_id: vpc_id.to_string(),
        })
    }

    async fn delete_vpc(&self, input: DeleteVpcInput) -> Result<()> {
        self.client
            .delete_vpc()
            .vpc_id(input.vpc_id)
            .send()
            .await
            .map_err(|e| provider_error("DeleteVpc", e))?;
        Ok(())
    }

    async fn describe_subnets(&self, input: DescribeSubnetsInput) -> Result<DescribeSubnetsOutput> {
        let response = self
            .client
            .describe_subnets()
            .filters(Filter::builder().name("vpc-id").values(input.vpc_id).build())
            .send()
            .await
            .map_err(|e| provider_error("DescribeSubnets", e))?;

        let subnets = response
            .subnets()
            .iter()
            .filter_map(|subnet| {
                Some(SubnetInfo {
                    subnet_id: subnet.subnet_id()?.to_string(),
                    availability_zone_id: subnet
                        .availability_zone_id()
                        .unwrap_or_default()
                        .to_string(),
                })
            })
            .collect();
        Ok(DescribeSubnetsOutput { subnets })
    }

    async fn create_subnet(&self, input: CreateSubnetInput) -> Result<CreateSubnetOutput> {
        let response = self
            .client
            .create_subnet()
            .vpc_id(input.vpc_id)
            .cidr_block(input.cidr_block)
            .set_availability_zone_id(input.availability_zone_id)
            .tag_specifications(tag_specification(ResourceType::Subnet, &input.tags))
            .send()
            .await
            .map_err(|e| provider_error("CreateSubnet", e))?;

        let subnet = response
            .subnet()
            .ok_or_else(|| missing_field("CreateSubnet", "Subnet"))?;
        let subnet_id = subnet
            .subnet_id()
            .ok_or_else(|| missing_field("CreateSubnet", "SubnetId"))?;
        Ok(CreateSubnetOutput {
            subnet: SubnetInfo {
                subnet_id: subnet_id.to_string(),
                availability_zone_id: subnet.availability_zone_id().unwrap_or_default().to_string(),
            },
        })
    }

    async fn delete_subnet(&self, input: DeleteSubnetInput) -> Result<()> {
        self.client
            .delete_subnet()
            .subnet_id(input.subnet_id)
            .send()
            .await
            .map_err(|e| provider_error("DeleteSubnet", e))?;
        Ok(())
    }

    async fn create_internet_gateway(
        &self,
        input: CreateInternetGatewayInput,
    ) -> Result<CreateInternetGatewayOutput> {
        let response = self
            .client
            .create_internet_gateway()
            .tag_specifications(tag_specification(
                ResourceType::InternetGateway,
                &input.tags,
            ))
            .send()
            .await
            .map_err(|e| provider_error("CreateInternetGateway", e))?;

        let gateway_id = response
            .internet_gateway()
            .and_then(|gateway| gateway.internet_gateway_id())
            .ok_or_else(|| missing_field("CreateInternetGateway", "InternetGatewayId"))?;
        Ok(CreateInternetGatewayOutput {
            internet_gateway_id: gateway_id.to_string(),
        })
    }

    async fn attach_internet_gateway(&self, input: InternetGatewayAttachment) -> Result<()> {
        self.client
            .attach_internet_gateway()
            .internet_gateway_id(input.internet_gateway_id)
            .vpc_id(input.vpc_id)
            .send()
            .await
            .map_err(|e| provider_error("AttachInternetGateway", e))?;
        Ok(())
    }

    async fn detach_internet_gateway(&self, input: InternetGatewayAttachment) -> Result<()> {
        self.client
            .detach_internet_gateway()
            .internet_gateway_id(input.internet_gateway_id)
            .vpc_id(input.vpc_id)
            .send()
            .await
            .map_err(|e| provider_error("DetachInternetGateway", e))?;
        Ok(())
    }

    async fn delete_internet_gateway(&self, input: DeleteInternetGatewayInput) -> Result<()> {
        self.client
            .delete_internet_gateway()
            .internet_gateway_id(input.internet_gateway_id)
            .send()
            .await
            .map_err(|e| provider_error("DeleteInternetGateway", e))?;
        Ok(())
    }

    async fn create_security_group(
        &self,
        input: CreateSecurityGroupInput,
    ) -> Result<CreateSecurityGroupOutput> {
        let response = self
            .client
            .create_security_group()
            .group_name(input.group_name)
            .description(input.description)
            .vpc_id(input.vpc_id)
            .tag_specifications(tag_specification(
                ResourceType::SecurityGroup,
                &input.tags,
            ))
            .send()
            .await
            .map_err(|e| provider_error("CreateSecurityGroup", e))?;

        let group_id = response
            .group_id()
            .ok_or_else(|| missing_field("CreateSecurityGroup", "GroupId"))?;
        Ok(CreateSecurityGroupOutput {
            group_id: group_id.to_string(),
        })
    }

    async fn delete_security_group(&self, input: DeleteSecurityGroupInput) -> Result<()> {
        self.client
            .delete_security_group()
            .group_id(input.group_id)
            .send()
            .await
            .map_err(|e| provider_error("DeleteSecurityGroup", e))?;
        Ok(())
    }

    async fn authorize_security_group_ingress(
        &self,
        input: AuthorizeSecurityGroupIngressInput,
    ) -> Result<AuthorizeSecurityGroupIngressOutput> {
        let permissions = input
            .permissions
            .into_iter()
            .map(|permission| {
                IpPermission::builder()
                    .ip_protocol(permission.ip_protocol)
                    .from_port(permission.from_port)
                    .to_port(permission.to_port)
                    .ip_ranges(IpRange::builder().cidr_ip(permission.cidr_ip).build())
                    .build()
            })
            .collect::<Vec<_>>();

        let response = self
            .client
            .authorize_security_group_ingress()
            .group_id(input.group_id)
            .set_ip_permissions(Some(permissions))
            .send()
            .await
            .map_err(|e| provider_error("AuthorizeSecurityGroupIngress", e))?;

        debug!("{:?}", response);
        Ok(AuthorizeSecurityGroupIngressOutput {
            accepted: response.r#return().unwrap_or(false),
        })
    }

    async fn describe_availability_zones(
        &self,
        input: DescribeAvailabilityZonesInput,
    ) -> Result<DescribeAvailabilityZonesOutput> {
        let response = self
            .client
            .describe_availability_zones()
            .filters(
                Filter::builder()
                    .name("region-name")
                    .values(input.region)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| provider_error("DescribeAvailabilityZones", e))?;

        let zones = response
            .availability_zones()
            .iter()
            .filter_map(|zone| {
                Some(AvailabilityZoneInfo {
                    zone_id: zone.zone_id()?.to_string(),
                    zone_name: zone.zone_name().unwrap_or_default().to_string(),
                })
            })
            .collect();
        Ok(DescribeAvailabilityZonesOutput { zones })
    }

    async fn describe_instances(
        &self,
        input: DescribeInstancesInput,
    ) -> Result<DescribeInstancesOutput> {
        let filters: Vec<Filter> = input.filters.into_iter().map(to_filter).collect();
        let mut instances = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_instances()
                .set_filters(Some(filters.clone()))
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| provider_error("DescribeInstances", e))?;

            for reservation in response.reservations() {
                for instance in reservation.instances() {
                    if let Some(instance_id) = instance.instance_id() {
                        instances.push(InstanceInfo {
                            instance_id: instance_id.to_string(),
                            private_ip_address: instance.private_ip_address().map(String::from),
                            state_code: instance.state().and_then(|state| state.code()),
                        });
                    }
                }
            }

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(DescribeInstancesOutput { instances })
    }

    async fn allocate_address(&self, input: AllocateAddressInput) -> Result<AllocateAddressOutput> {
        let mut request = self.client.allocate_address().domain(DomainType::Vpc);
        if !input.tags.is_empty() {
            request =
                request.tag_specifications(tag_specification(ResourceType::ElasticIp, &input.tags));
        }

        let response = request
            .send()
            .await
            .map_err(|e| provider_error("AllocateAddress", e))?;

        let public_ip = response
            .public_ip()
            .ok_or_else(|| missing_field("AllocateAddress", "PublicIp"))?;
        let allocation_id = response
            .allocation_id()
            .ok_or_else(|| missing_field("AllocateAddress", "AllocationId"))?;
        Ok(AllocateAddressOutput {
            public_ip: public_ip.to_string(),
            allocation_id: allocation_id.to_string(),
        })
    }

    async fn associate_address(
        &self,
        input: AssociateAddressInput,
    ) -> Result<AssociateAddressOutput> {
        let response = self
            .client
            .associate_address()
            .instance_id(input.instance_id)
            .allocation_id(input.allocation_id)
            .send()
            .await
            .map_err(|e| provider_error("AssociateAddress", e))?;

        Ok(AssociateAddressOutput {
            association_id: response.association_id().map(String::from),
        })
    }

    async fn disassociate_address(&self, input: DisassociateAddressInput) -> Result<()> {
        self.client
            .disassociate_address()
            .set_association_id(input.association_id)
            .set_public_ip(input.public_ip)
            .send()
            .await
            .map_err(|e| provider_error("DisassociateAddress", e))?;
        Ok(())
    }

    async fn release_address(&self, input: ReleaseAddressInput) -> Result<()> {
        self.client
            .release_address()
            .allocation_id(input.allocation_id)
            .send()
            .await
            .map_err(|e| provider_error("ReleaseAddress", e))?;
        Ok(())
    }

    async fn describe_images(&self, input: DescribeImagesInput) -> Result<DescribeImagesOutput> {
        let response = self
            .client
            .describe_images()
            .set_image_ids(Some(input.image_ids))
            .send()
            .await
            .map_err(|e| provider_error("DescribeImages", e))?;

        let images = response
            .images()
            .iter()
            .filter_map(|image| {
                Some(MachineImageDetail {
                    id: image.image_id()?.to_string(),
                    name: image.name().map(String::from),
                    root_device_name: image.root_device_name().map(String::from),
                    state: image.state().map(|state| state.as_str().to_string()),
                })
            })
            .collect();
        Ok(DescribeImagesOutput { images })
    }
}
