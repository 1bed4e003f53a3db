use core::ops::Index;

use super::pathset::{Error, Path, PathSet, Value};
use crate::types::{FlightMode, Power};

/// Power envelope and per-source caps of a single mode
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PowerBounds {
    pub min: Power,
    pub max: Power,
    pub electric_cap: Power,
    pub thermal_cap: Power,
}

impl PowerBounds {
    pub const fn new(min: Power, max: Power, electric_cap: Power, thermal_cap: Power) -> Self {
        Self { min, max, electric_cap, thermal_cap }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max && self.electric_cap.checked_add(self.thermal_cap).is_some()
    }
}

impl PathSet for PowerBounds {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        match path.str()? {
            "min" => self.min = value.parse()?,
            "max" => self.max = value.parse()?,
            "electric-cap" => self.electric_cap = value.parse()?,
            "thermal-cap" => self.thermal_cap = value.parse()?,
            _ => return Err(Error::UnknownPath),
        }
        Ok(())
    }
}

/// One `PowerBounds` row per flight mode
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModeTable {
    pub takeoff: PowerBounds,
    pub normal: PowerBounds,
    pub emergency: PowerBounds,
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            takeoff: PowerBounds::new(0, 3250, 1000, 2250),
            normal: PowerBounds::new(0, 2750, 0, 2750),
            emergency: PowerBounds::new(0, 3750, 1000, 2750),
        }
    }
}

impl ModeTable {
    pub fn get(&self, mode: FlightMode) -> &PowerBounds {
        match mode {
            FlightMode::Takeoff => &self.takeoff,
            FlightMode::Normal => &self.normal,
            FlightMode::Emergency => &self.emergency,
        }
    }

    fn get_mut(&mut self, mode: FlightMode) -> &mut PowerBounds {
        match mode {
            FlightMode::Takeoff => &mut self.takeoff,
            FlightMode::Normal => &mut self.normal,
            FlightMode::Emergency => &mut self.emergency,
        }
    }

    /// First mode whose row is inconsistent
    pub fn invalid_mode(&self) -> Option<FlightMode> {
        FlightMode::ALL.iter().copied().find(|&mode| !self.get(mode).is_valid())
    }
}

impl Index<FlightMode> for ModeTable {
    type Output = PowerBounds;

    fn index(&self, mode: FlightMode) -> &PowerBounds {
        self.get(mode)
    }
}

impl PathSet for ModeTable {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        let mode: FlightMode = path.parse()?;
        self.get_mut(mode).set(path, value)
    }
}

mod test {
    #[test]
    fn test_default_table() {
        use super::{ModeTable, PowerBounds};
        use crate::types::FlightMode;

        let table = ModeTable::default();
        assert_eq!(table[FlightMode::Takeoff], PowerBounds::new(0, 3250, 1000, 2250));
        assert_eq!(table[FlightMode::Normal], PowerBounds::new(0, 2750, 0, 2750));
        assert_eq!(table[FlightMode::Emergency], PowerBounds::new(0, 3750, 1000, 2750));
        assert_eq!(table.invalid_mode(), None);
    }

    #[test]
    fn test_set_bounds() {
        use super::ModeTable;
        use crate::config::pathset::{Error, Path, PathSet, Value};
        use crate::types::FlightMode;

        let mut table = ModeTable::default();
        table.set(Path::new("emergency.max"), Value::of("3500")).unwrap();
        assert_eq!(table[FlightMode::Emergency].max, 3500);
        table.set(Path::new("normal.thermal-cap"), Value::of("2000")).unwrap();
        assert_eq!(table[FlightMode::Normal].thermal_cap, 2000);

        let result = table.set(Path::new("cruise.max"), Value::of("1"));
        assert_eq!(result, Err(Error::UnknownPath));
        let result = table.set(Path::new("takeoff.ratio"), Value::of("1"));
        assert_eq!(result, Err(Error::UnknownPath));
        let result = table.set(Path::new("takeoff.max"), Value::of("lots"));
        assert_eq!(result, Err(Error::InvalidValue));
    }

    #[test]
    fn test_invalid_mode() {
        use super::ModeTable;
        use crate::types::FlightMode;

        let mut table = ModeTable::default();
        table.normal.min = 3000;
        assert_eq!(table.invalid_mode(), Some(FlightMode::Normal));

        let mut table = ModeTable::default();
        table.emergency.electric_cap = u16::MAX;
        assert_eq!(table.invalid_mode(), Some(FlightMode::Emergency));
    }
}
