mod ec2;

pub use ec2::*;
