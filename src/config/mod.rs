//! Configuration module for the trade vision application.

// Can all be private now because we have a public re-export.
mod debug;
mod model;
mod persistence;

// Public
pub mod constants;

// Re-export commonly used items
pub use constants::{HISTORY, IMAGE, SUBSCRIPTION};
pub use debug::DF;
pub use model::{GEMINI, GeminiConfig};
pub use persistence::PERSISTENCE;
