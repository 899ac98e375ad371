//! Inkfair — Designs bounded context.
//!
//! Owns uploaded artwork: the `Design` aggregate, its repository contract,
//! and the create/update/delete use cases.

pub mod application;
pub mod domain;
