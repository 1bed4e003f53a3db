use core::fmt::{self, Display, Formatter};

use crate::types::{FlightMode, Power};

/// ARINC 429 style labels, used as plain text tags only
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u16)]
pub enum Label {
    TotalPower = 0x270,
    ElectricPower = 0x271,
    ThermalPower = 0x272,
    FlightMode = 0x273,
}

impl Label {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TotalPower => "TOTAL_POWER",
            Self::ElectricPower => "ELEC_POWER",
            Self::ThermalPower => "THRM_POWER",
            Self::FlightMode => "FLIGHT_MODE",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Power(Power),
    Mode(FlightMode),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    pub label: Label,
    pub value: Value,
}

impl Frame {
    pub fn power(label: Label, power: Power) -> Self {
        Self { label, value: Value::Power(power) }
    }

    pub fn mode(mode: FlightMode) -> Self {
        Self { label: Label::FlightMode, value: Value::Mode(mode) }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:03X} | {}: ", self.label.code(), self.label.name())?;
        match self.value {
            Value::Power(power) => write!(f, "{} Cv", power),
            Value::Mode(mode) => write!(f, "{}", mode),
        }
    }
}

mod test {
    #[test]
    fn test_frame_display() {
        use super::{Frame, Label};
        use crate::types::FlightMode;

        let frame = Frame::power(Label::ThermalPower, 2250);
        assert_eq!(format!("{}", frame), "272 | THRM_POWER: 2250 Cv");
        let frame = Frame::mode(FlightMode::Normal);
        assert_eq!(format!("{}", frame), "273 | FLIGHT_MODE: NORMAL");
    }
}
