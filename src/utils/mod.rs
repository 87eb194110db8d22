pub mod progress_bars;
pub mod prompts;
pub mod random;

pub use progress_bars::*;
pub use prompts::*;
pub use random::*;
