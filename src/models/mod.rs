pub mod host;
pub mod infra;
pub mod resource_field;

pub use host::*;
pub use infra::*;
pub use resource_field::*;
