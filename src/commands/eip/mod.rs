mod bind;
mod release;

pub use bind::*;
pub use release::*;
