//! Core types shared across the crate: link classification and routes.

mod link;
mod route;

pub use link::{LinkKind, is_external_link};
pub use route::Route;
