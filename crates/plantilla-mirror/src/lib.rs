//! External-store backends for the Plantilla mirror.
//!
//! [`RtdbMirror`] talks to a JSON key-path tree over HTTP (the Firebase
//! Realtime Database REST surface). [`MemoryMirror`] keeps the same tree in
//! process and is what tests and local development run against.

mod memory;
mod path;
mod rtdb;

pub mod error;

pub use error::{Error, Result};
pub use memory::MemoryMirror;
pub use rtdb::{RtdbConfig, RtdbMirror};
