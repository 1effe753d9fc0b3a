//! Domain services behind the HTTP routes.

pub mod identity;
pub mod session;
