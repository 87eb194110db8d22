pub mod cloud_interface;
pub mod data_transfer_objects;
pub mod providers;

pub use cloud_interface::*;
