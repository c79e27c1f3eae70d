//! Enum-backed audio clip registry used by cliplist.
//!
//! The authoritative set of clip names lives in an enumeration-style
//! source file. This crate parses that file, patches it (add/remove one
//! identifier), persists it atomically and notifies a reload hook.

mod clip;
mod ident;
mod patch;
mod service;
mod snapshot;

pub use clip::*;
pub use ident::*;
pub use patch::*;
pub use service::*;
pub use snapshot::*;
