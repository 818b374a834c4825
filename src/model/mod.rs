//! Disk model parameterisation
//!
//! Maps the sampler's sparse parameter vector onto complete MCFOST
//! configurations, one per observing instrument.

pub mod builder;
pub mod instrument;
pub mod params;
pub mod system;

pub use builder::{mass_fractions, ModelBuilder};
pub use instrument::{specialize_for_instrument, Instrument, InstrumentModel};
pub use params::{round3, ModelError, ParamName, ParameterSet};
pub use system::SystemConfig;
