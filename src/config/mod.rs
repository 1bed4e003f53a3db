pub mod bounds;
pub mod pathset;

use core::fmt::{self, Display, Formatter};

use crate::types::{power::POWER_CONVERSION_FACTOR, FlightMode, Power};
pub use bounds::{ModeTable, PowerBounds};
use pathset::{Path, PathSet, Value};

pub const DEFAULT_INITIAL_POWER: Power = 50;
pub const DEFAULT_STEP: Power = 10;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    Path(pathset::Error),
    InvalidBounds(FlightMode),
    ConversionFactor,
}

impl From<pathset::Error> for Error {
    fn from(error: pathset::Error) -> Self {
        Self::Path(error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Path(error) => write!(f, "{}", error),
            Self::InvalidBounds(mode) => write!(f, "Power bounds of {} not valid", mode),
            Self::ConversionFactor => write!(f, "Conversion factor must be positive"),
        }
    }
}

/// Built once at startup, then handed to the controller and the distribution engine
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub modes: ModeTable,
    pub initial_mode: FlightMode,
    pub initial_power: Power,
    pub step: Power,
    pub conversion_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modes: ModeTable::default(),
            initial_mode: FlightMode::Takeoff,
            initial_power: DEFAULT_INITIAL_POWER,
            step: DEFAULT_STEP,
            conversion_factor: POWER_CONVERSION_FACTOR,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(mode) = self.modes.invalid_mode() {
            return Err(Error::InvalidBounds(mode));
        }
        if !(self.conversion_factor > 0.0) {
            return Err(Error::ConversionFactor);
        }
        Ok(())
    }

    /// Applies a `path=value` override, e.g. `modes.takeoff.max=3000`
    pub fn apply_override(&mut self, line: &str) -> Result<(), Error> {
        let (path, value) = pathset::split_assignment(line);
        self.set(path, value)?;
        debug!("Config override {} applied", line);
        Ok(())
    }
}

impl PathSet for Config {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), pathset::Error> {
        match path.str()? {
            "modes" => return self.modes.set(path, value),
            "initial-mode" => self.initial_mode = value.parse_or(FlightMode::Takeoff)?,
            "initial-power" => self.initial_power = value.parse_or(DEFAULT_INITIAL_POWER)?,
            "step" => self.step = value.parse_or(DEFAULT_STEP)?,
            "conversion-factor" => {
                self.conversion_factor = value.parse_or(POWER_CONVERSION_FACTOR)?
            }
            _ => return Err(pathset::Error::UnknownPath),
        }
        Ok(())
    }
}

mod test {
    #[test]
    fn test_default_config() {
        use super::Config;
        use crate::types::FlightMode;

        let config = Config::default();
        assert_eq!(config.initial_mode, FlightMode::Takeoff);
        assert_eq!(config.initial_power, 50);
        assert_eq!(config.step, 10);
        assert_eq!(config.conversion_factor, 2200.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_apply_override() {
        use super::{pathset, Config, Error};
        use crate::types::FlightMode;

        let mut config = Config::default();
        config.apply_override("modes.takeoff.max=3000").unwrap();
        config.apply_override("initial-mode=emergency").unwrap();
        config.apply_override("step=5").unwrap();
        assert_eq!(config.modes.takeoff.max, 3000);
        assert_eq!(config.initial_mode, FlightMode::Emergency);
        assert_eq!(config.step, 5);

        config.apply_override("step").unwrap();
        assert_eq!(config.step, 10);

        let result = config.apply_override("baudrate=115200");
        assert_eq!(result, Err(Error::Path(pathset::Error::UnknownPath)));
        let result = config.apply_override("initial-mode=cruise");
        assert_eq!(result, Err(Error::Path(pathset::Error::InvalidValue)));
    }

    #[test]
    fn test_validate() {
        use super::{Config, Error};
        use crate::types::FlightMode;

        let mut config = Config::default();
        config.apply_override("modes.takeoff.min=4000").unwrap();
        assert_eq!(config.validate(), Err(Error::InvalidBounds(FlightMode::Takeoff)));

        let mut config = Config::default();
        config.conversion_factor = 0.0;
        assert_eq!(config.validate(), Err(Error::ConversionFactor));
    }

    #[test]
    fn test_serde_config() {
        use serde_json::json;

        use super::Config;

        let json = serde_json::to_value(&Config::default()).unwrap();
        let expected = json!({
            "modes": {
                "takeoff": {"min": 0, "max": 3250, "electric-cap": 1000, "thermal-cap": 2250},
                "normal": {"min": 0, "max": 2750, "electric-cap": 0, "thermal-cap": 2750},
                "emergency": {"min": 0, "max": 3750, "electric-cap": 1000, "thermal-cap": 2750}
            },
            "initial-mode": "takeoff",
            "initial-power": 50,
            "step": 10,
            "conversion-factor": 2200.0
        });
        assert_eq!(expected, json);

        let config: Config = serde_json::from_value(json!({"step": 25})).unwrap();
        assert_eq!(config.step, 25);
        assert_eq!(config.modes, Config::default().modes);
    }
}
