pub mod generation;
pub mod quote;
pub mod signal;

pub use generation::GenerationResult;
pub use quote::Quote;
pub use signal::{Side, Signal};
