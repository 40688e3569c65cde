//! Views
//!
//! Page-level state for the client. Each view owns its in-memory data,
//! calls services, and reports outcomes as `CommandResponse`.

pub mod account;
pub mod auth;
pub mod confirm;
pub mod dashboard;
pub mod edit;
pub mod playground;
pub mod prompt_form;
pub mod public;
pub mod routes;

pub use account::*;
pub use auth::*;
pub use confirm::*;
pub use dashboard::*;
pub use edit::*;
pub use playground::*;
pub use prompt_form::*;
pub use public::*;
pub use routes::*;
