//! MCFOST parameter files
//!
//! Typed configuration model with template defaults, and the serializer that
//! renders it in the simulator's `.para` format.

pub mod params;
pub mod writer;

pub use params::*;
pub use writer::fmt_real;
