//! Services
//!
//! Business logic layered over the backend APIs and the LLM provider.

pub mod account;
pub mod enrichment;
pub mod prompt;
pub mod session;
pub mod stats;

pub use account::*;
pub use enrichment::*;
pub use prompt::*;
pub use session::*;
pub use stats::*;
