pub mod debounce;

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use crate::fcs::FlightModeController;
use crate::types::{FlightMode, Power};
pub use debounce::Debouncer;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    UnknownCommand,
    InvalidPower,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let err_string = match self {
            Self::UnknownCommand => "Unknown command",
            Self::InvalidPower => "Power value not valid",
        };
        write!(f, "{}", err_string)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EncoderTick {
    Clockwise,
    CounterClockwise,
}

/// A single user action, applied once per detected input
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    NextMode,
    SetMode(FlightMode),
    Increase,
    Decrease,
    SetPower(Power),
}

impl From<EncoderTick> for Command {
    fn from(tick: EncoderTick) -> Self {
        match tick {
            EncoderTick::Clockwise => Self::Increase,
            EncoderTick::CounterClockwise => Self::Decrease,
        }
    }
}

impl Command {
    pub fn apply(self, fcs: &mut FlightModeController, step: Power) {
        trace!("Apply command {:?}", self);
        match self {
            Self::NextMode => fcs.next_mode(),
            Self::SetMode(mode) => fcs.set_mode(mode),
            Self::Increase => fcs.increase_power(step),
            Self::Decrease => fcs.decrease_power(step),
            Self::SetPower(power) => fcs.set_total_power(power),
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Error> {
        let mut words = line.split_whitespace();
        let command = match words.next().ok_or(Error::UnknownCommand)? {
            "n" | "next" => Self::NextMode,
            "t" | "takeoff" => Self::SetMode(FlightMode::Takeoff),
            "o" | "normal" => Self::SetMode(FlightMode::Normal),
            "e" | "emergency" => Self::SetMode(FlightMode::Emergency),
            "+" => Self::Increase,
            "-" => Self::Decrease,
            "p" | "power" => {
                let value = words.next().ok_or(Error::InvalidPower)?;
                Self::SetPower(value.parse().map_err(|_| Error::InvalidPower)?)
            }
            _ => return Err(Error::UnknownCommand),
        };
        match words.next() {
            Some(_) => Err(Error::UnknownCommand),
            None => Ok(command),
        }
    }
}

mod test {
    #[test]
    fn test_parse_command() {
        use super::{Command, Error};
        use crate::types::FlightMode;

        assert_eq!("n".parse::<Command>(), Ok(Command::NextMode));
        assert_eq!(" next ".parse::<Command>(), Ok(Command::NextMode));
        assert_eq!("o".parse::<Command>(), Ok(Command::SetMode(FlightMode::Normal)));
        assert_eq!("emergency".parse::<Command>(), Ok(Command::SetMode(FlightMode::Emergency)));
        assert_eq!("+".parse::<Command>(), Ok(Command::Increase));
        assert_eq!("-".parse::<Command>(), Ok(Command::Decrease));
        assert_eq!("p 1500".parse::<Command>(), Ok(Command::SetPower(1500)));
        assert_eq!("power   20".parse::<Command>(), Ok(Command::SetPower(20)));

        assert_eq!("".parse::<Command>(), Err(Error::UnknownCommand));
        assert_eq!("climb".parse::<Command>(), Err(Error::UnknownCommand));
        assert_eq!("+ +".parse::<Command>(), Err(Error::UnknownCommand));
        assert_eq!("p".parse::<Command>(), Err(Error::InvalidPower));
        assert_eq!("p -5".parse::<Command>(), Err(Error::InvalidPower));
        assert_eq!("p 70000".parse::<Command>(), Err(Error::InvalidPower));
    }

    #[test]
    fn test_apply_command() {
        use super::{Command, EncoderTick};
        use crate::{fcs::FlightModeController, types::FlightMode, Config};

        let config = Config::default();
        let mut fcs = FlightModeController::new(&config);
        Command::from(EncoderTick::Clockwise).apply(&mut fcs, config.step);
        assert_eq!(fcs.total_power(), 60);
        Command::from(EncoderTick::CounterClockwise).apply(&mut fcs, config.step);
        Command::Decrease.apply(&mut fcs, config.step);
        assert_eq!(fcs.total_power(), 40);

        Command::SetPower(9000).apply(&mut fcs, config.step);
        assert_eq!(fcs.total_power(), 3250);
        Command::NextMode.apply(&mut fcs, config.step);
        assert_eq!(fcs.mode(), FlightMode::Normal);
        assert_eq!(fcs.total_power(), 2750);
        Command::SetMode(FlightMode::Takeoff).apply(&mut fcs, config.step);
        assert_eq!(fcs.mode(), FlightMode::Takeoff);
        assert_eq!(fcs.total_power(), 2750);
    }

    #[test]
    fn test_serde_command() {
        use serde_json::json;

        use super::Command;
        use crate::types::FlightMode;

        assert_eq!(json!("next-mode"), serde_json::to_value(Command::NextMode).unwrap());
        let expected = json!({"set-mode": "emergency"});
        let command = Command::SetMode(FlightMode::Emergency);
        assert_eq!(expected, serde_json::to_value(command).unwrap());
        let command: Command = serde_json::from_value(json!({"set-power": 100})).unwrap();
        assert_eq!(command, Command::SetPower(100));
    }
}
