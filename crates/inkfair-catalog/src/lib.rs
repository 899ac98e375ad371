//! Inkfair — Catalog bounded context.
//!
//! Owns sellable products: the `Product` aggregate, its repository
//! contract, and the create/update/delete use cases. Products reference
//! shops and designs only by `DomainId`; other contexts react to catalog
//! events rather than reaching into this crate's types.

pub mod application;
pub mod domain;
