#![no_std]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod config;
pub mod distribution;
pub mod fcs;
pub mod input;
pub mod telemetry;
pub mod types;

pub use config::Config;
pub use distribution::PowerDistribution;
pub use fcs::FlightModeController;
pub use types::{mode::FlightMode, power::PowerOutput};
