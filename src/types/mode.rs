use core::convert::TryFrom;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

/// Operating mode of the propulsion system.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum FlightMode {
    Takeoff = 0,
    Normal,
    Emergency,
}

impl FlightMode {
    pub const ALL: [FlightMode; 3] = [Self::Takeoff, Self::Normal, Self::Emergency];

    /// Cyclic successor, Takeoff -> Normal -> Emergency -> Takeoff
    pub fn next(self) -> Self {
        match self {
            Self::Takeoff => Self::Normal,
            Self::Normal => Self::Emergency,
            Self::Emergency => Self::Takeoff,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Takeoff => "TAKEOFF",
            Self::Normal => "NORMAL",
            Self::Emergency => "EMERGENCY",
        }
    }
}

impl Default for FlightMode {
    fn default() -> Self {
        Self::Takeoff
    }
}

impl TryFrom<u8> for FlightMode {
    type Error = ();

    fn try_from(raw: u8) -> Result<Self, ()> {
        match raw {
            0 => Ok(Self::Takeoff),
            1 => Ok(Self::Normal),
            2 => Ok(Self::Emergency),
            _ => Err(()),
        }
    }
}

impl FromStr for FlightMode {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, ()> {
        match string {
            "takeoff" => Ok(Self::Takeoff),
            "normal" => Ok(Self::Normal),
            "emergency" => Ok(Self::Emergency),
            _ => Err(()),
        }
    }
}

impl Display for FlightMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod test {
    #[test]
    fn test_next_mode_cycles() {
        use super::FlightMode;

        assert_eq!(FlightMode::Takeoff.next(), FlightMode::Normal);
        assert_eq!(FlightMode::Normal.next(), FlightMode::Emergency);
        assert_eq!(FlightMode::Emergency.next(), FlightMode::Takeoff);
        for mode in FlightMode::ALL.iter().copied() {
            assert_eq!(mode.next().next().next(), mode);
        }
    }

    #[test]
    fn test_raw_mode() {
        use core::convert::TryFrom;

        use super::FlightMode;

        assert_eq!(FlightMode::try_from(0), Ok(FlightMode::Takeoff));
        assert_eq!(FlightMode::try_from(1), Ok(FlightMode::Normal));
        assert_eq!(FlightMode::try_from(2), Ok(FlightMode::Emergency));
        assert_eq!(FlightMode::try_from(3), Err(()));
        assert_eq!(FlightMode::try_from(u8::MAX), Err(()));
    }

    #[test]
    fn test_parse_mode() {
        use super::FlightMode;

        assert_eq!("takeoff".parse::<FlightMode>(), Ok(FlightMode::Takeoff));
        assert_eq!("emergency".parse::<FlightMode>(), Ok(FlightMode::Emergency));
        assert_eq!("cruise".parse::<FlightMode>(), Err(()));
    }

    #[test]
    fn test_serialize_mode() {
        use serde_json::json;

        use super::FlightMode;

        assert_eq!(json!("takeoff"), serde_json::to_value(FlightMode::Takeoff).unwrap());
        assert_eq!(json!("emergency"), serde_json::to_value(FlightMode::Emergency).unwrap());
        let mode: FlightMode = serde_json::from_value(json!("normal")).unwrap();
        assert_eq!(mode, FlightMode::Normal);
    }
}
