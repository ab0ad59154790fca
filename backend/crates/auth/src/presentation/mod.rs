//! Presentation Layer
//!
//! Identity middleware, authorization guards, and the login surface.

pub mod dto;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use guard::{
    AdminOnly, Api, ApiAdmin, ApiUser, Authenticated, Authorized, Browser, BrowserAdmin,
    BrowserUser, GuardError, RequiredRole, Surface, require_authenticated, require_role,
};
pub use handlers::AuthAppState;
pub use middleware::{RequestIdentity, resolve_identity};
pub use router::{auth_router, with_identity};
