//! Pure domain logic for the Herald notification subsystem.
//!
//! No I/O lives here: the reference codec, shared type aliases, the core
//! error taxonomy, and the well-known medium names.

pub mod codec;
pub mod error;
pub mod medium;
pub mod types;
