//! Typed requests and responses exchanged with the EC2 networking API.
//!
//! Only the fields the reconciliation logic reads or writes are modelled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

impl ResourceTag {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// A `Name`/`Values` filter as accepted by the describe calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResourceFilter {
    pub name: String,
    pub values: Vec<String>,
}

// VPC

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateVpcInput {
    pub cidr_block: String,
    pub tags: Vec<ResourceTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateVpcOutput {
    pub vpc_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteVpcInput {
    pub vpc_id: String,
}

// Subnet

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubnetInfo {
    pub subnet_id: String,
    pub availability_zone_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeSubnetsInput {
    pub vpc_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeSubnetsOutput {
    pub subnets: Vec<SubnetInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSubnetInput {
    pub vpc_id: String,
    pub cidr_block: String,
    pub availability_zone_id: Option<String>,
    pub tags: Vec<ResourceTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSubnetOutput {
    pub subnet: SubnetInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteSubnetInput {
    pub subnet_id: String,
}

// Internet gateway

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateInternetGatewayInput {
    pub tags: Vec<ResourceTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateInternetGatewayOutput {
    pub internet_gateway_id: String,
}

/// Used for both attaching and detaching a gateway
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternetGatewayAttachment {
    pub internet_gateway_id: String,
    pub vpc_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteInternetGatewayInput {
    pub internet_gateway_id: String,
}

// Security group

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSecurityGroupInput {
    pub group_name: String,
    pub description: String,
    pub vpc_id: String,
    pub tags: Vec<ResourceTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSecurityGroupOutput {
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteSecurityGroupInput {
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngressPermission {
    pub ip_protocol: String,
    pub from_port: i32,
    pub to_port: i32,
    pub cidr_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizeSecurityGroupIngressInput {
    pub group_id: String,
    pub permissions: Vec<IngressPermission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizeSecurityGroupIngressOutput {
    /// `false` when the provider declined the rules without raising an error
    pub accepted: bool,
}

// Availability zones

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeAvailabilityZonesInput {
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AvailabilityZoneInfo {
    pub zone_id: String,
    pub zone_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeAvailabilityZonesOutput {
    pub zones: Vec<AvailabilityZoneInfo>,
}

// Instances

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeInstancesInput {
    pub filters: Vec<ResourceFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InstanceInfo {
    pub instance_id: String,
    pub private_ip_address: Option<String>,
    pub state_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeInstancesOutput {
    pub instances: Vec<InstanceInfo>,
}

// Elastic IPs

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocateAddressInput {
    pub tags: Vec<ResourceTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocateAddressOutput {
    pub public_ip: String,
    pub allocation_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssociateAddressInput {
    pub instance_id: String,
    pub allocation_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssociateAddressOutput {
    pub association_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisassociateAddressInput {
    pub association_id: Option<String>,
    pub public_ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseAddressInput {
    pub allocation_id: String,
}

// Images

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeImagesInput {
    pub image_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MachineImageDetail {
    pub id: String,
    pub name: Option<String>,
    pub root_device_name: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeImagesOutput {
    pub images: Vec<MachineImageDetail>,
}
