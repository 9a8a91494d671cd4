//! Auth module: bearer-token issue/verify and the per-request ownership rule.
//!
//! Framework independent; the HTTP middleware in the server crate only extracts the
//! header and delegates here.

pub mod domain;
pub mod errors;
pub mod service;

pub use domain::AuthContext;
pub use errors::AuthError;
pub use service::{authorize_owner, bearer_token, TokenService};
