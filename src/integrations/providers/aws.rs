pub mod ec2_client;
pub mod interface;
pub mod resource_manager;
pub mod resources;

pub use ec2_client::AwsEc2Client;
pub use interface::AwsInterface;
pub use resource_manager::AwsProvider;
