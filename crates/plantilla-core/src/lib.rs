//! Core types and trait definitions for the Plantilla HR/procurement backend.
//!
//! No HTTP or database dependencies. Every other crate in the workspace
//! builds on the record types and traits defined here.

pub mod catalog;
pub mod error;
pub mod hr;
pub mod lifecycle;
pub mod mirror;
pub mod purchase;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use lifecycle::{Listing, Status};
pub use schema::{Key, MirrorPolicy, Resource, Table};
