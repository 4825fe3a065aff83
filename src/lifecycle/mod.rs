//! Process lifecycle: shutdown coordination and signal wiring.

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
