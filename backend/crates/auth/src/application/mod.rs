//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod seed;
pub mod session_manager;
pub mod sign_in;

pub use config::AuthConfig;
pub use seed::{SeedAccount, default_accounts, seed_users};
pub use session_manager::{Identity, SessionManager};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
