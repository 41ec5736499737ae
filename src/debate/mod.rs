mod side;
mod transcript;
mod verdict;

pub mod prompts;

pub use side::*;
pub use transcript::*;
pub use verdict::*;
