mod availability_zone;
pub mod ec2_instance;
mod elastic_ip;
mod internet_gateway;
mod machine_image;
mod security_group;
mod subnet;
mod vpc;

pub use ec2_instance::*;
