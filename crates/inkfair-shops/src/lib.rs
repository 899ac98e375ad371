//! Inkfair — Shops bounded context.
//!
//! Owns merchant storefronts: the `Shop` aggregate, its repository
//! contract, create/update/delete use cases, and the deferred subscriber
//! that keeps a shop's showcase pointed at its newest product.

pub mod application;
pub mod domain;
