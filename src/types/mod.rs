pub mod mode;
pub mod power;

pub use mode::FlightMode;
pub use power::{Power, PowerOutput};
