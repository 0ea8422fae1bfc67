//! Public library API for building C-ABI memory images from Rust values.

extern crate self as cbridge;

/// Kind model, host reflection, layout resolution, and the encode/decode engines.
pub mod bridge;

/// Derive host reflection (`CType`) for a struct.
pub use cbridge_derive::CType;
