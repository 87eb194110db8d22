mod down;
mod show;
mod up;

pub use down::*;
pub use show::*;
pub use up::*;
