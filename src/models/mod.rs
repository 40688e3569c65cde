//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod billing;
pub mod enrichment;
pub mod prompt;
pub mod response;
pub mod settings;
pub mod stats;
pub mod user;

pub use billing::*;
pub use enrichment::*;
pub use prompt::*;
pub use response::*;
pub use settings::*;
pub use stats::*;
pub use user::*;
