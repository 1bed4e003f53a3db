use core::cmp::min;
use core::convert::TryFrom;

use crate::config::{Config, ModeTable, PowerBounds};
use crate::types::power::POWER_CONVERSION_FACTOR;
use crate::types::{FlightMode, Power, PowerOutput};

/// Splits a requested total power between the electric and thermal sources.
///
/// Only the per-source caps of the mode are applied here; keeping the request
/// inside the mode's min/max envelope is left to `FlightModeController`.
#[derive(Copy, Clone, Debug)]
pub struct PowerDistribution {
    modes: ModeTable,
    factor: f32,
}

impl Default for PowerDistribution {
    fn default() -> Self {
        Self::new(ModeTable::default(), POWER_CONVERSION_FACTOR)
    }
}

impl From<&Config> for PowerDistribution {
    fn from(config: &Config) -> Self {
        Self::new(config.modes, config.conversion_factor)
    }
}

/// Electric source first, thermal source takes the remainder
fn hybrid(bounds: &PowerBounds, requested: Power) -> PowerOutput {
    let electric = min(requested, bounds.electric_cap);
    let remaining = requested.saturating_sub(electric);
    PowerOutput::new(electric, min(remaining, bounds.thermal_cap))
}

fn thermal_only(bounds: &PowerBounds, requested: Power) -> PowerOutput {
    PowerOutput::new(0, min(requested, bounds.thermal_cap))
}

impl PowerDistribution {
    /// Expects a table accepted by `Config::validate`
    pub fn new(modes: ModeTable, factor: f32) -> Self {
        debug_assert!(modes.invalid_mode().is_none());
        debug_assert!(factor > 0.0);
        Self { modes, factor }
    }

    pub fn modes(&self) -> &ModeTable {
        &self.modes
    }

    /// Watts per 100 Cv
    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn cv_to_watts(&self, power: Power) -> f32 {
        cv_to_watts_with(power, self.factor)
    }

    pub fn watts_to_cv(&self, watts: f32) -> Power {
        watts_to_cv_with(watts, self.factor)
    }

    pub fn calculate(&self, mode: FlightMode, requested: Power) -> PowerOutput {
        let bounds = &self.modes[mode];
        match mode {
            FlightMode::Takeoff => hybrid(bounds, requested),
            FlightMode::Normal => thermal_only(bounds, requested),
            FlightMode::Emergency => hybrid(bounds, requested),
        }
    }

    /// Unrecognized mode values fall back to `Normal`
    pub fn calculate_raw(&self, raw_mode: u8, requested: Power) -> PowerOutput {
        let mode = FlightMode::try_from(raw_mode).unwrap_or_else(|_| {
            warn!("Unknown flight mode {}, fallback to {}", raw_mode, FlightMode::Normal);
            FlightMode::Normal
        });
        self.calculate(mode, requested)
    }
}

pub fn cv_to_watts(power: Power) -> f32 {
    cv_to_watts_with(power, POWER_CONVERSION_FACTOR)
}

/// Truncates toward zero, negative or NaN watts yield 0
pub fn watts_to_cv(watts: f32) -> Power {
    watts_to_cv_with(watts, POWER_CONVERSION_FACTOR)
}

pub fn cv_to_watts_with(power: Power, factor: f32) -> f32 {
    (power as f32 / 100.0) * factor
}

pub fn watts_to_cv_with(watts: f32, factor: f32) -> Power {
    ((watts * 100.0) / factor) as Power
}

mod test {
    #[test]
    fn test_takeoff() {
        use super::PowerDistribution;
        use crate::types::{FlightMode, PowerOutput};

        let pdu = PowerDistribution::default();
        let expected = PowerOutput { electric: 500, thermal: 0, total: 500 };
        assert_eq!(pdu.calculate(FlightMode::Takeoff, 500), expected);
        let expected = PowerOutput { electric: 1000, thermal: 2250, total: 3250 };
        assert_eq!(pdu.calculate(FlightMode::Takeoff, 3250), expected);
        let expected = PowerOutput { electric: 1000, thermal: 0, total: 1000 };
        assert_eq!(pdu.calculate(FlightMode::Takeoff, 1000), expected);
        let expected = PowerOutput { electric: 0, thermal: 0, total: 0 };
        assert_eq!(pdu.calculate(FlightMode::Takeoff, 0), expected);
    }

    #[test]
    fn test_normal() {
        use super::PowerDistribution;
        use crate::types::{FlightMode, PowerOutput};

        let pdu = PowerDistribution::default();
        let expected = PowerOutput { electric: 0, thermal: 2750, total: 2750 };
        assert_eq!(pdu.calculate(FlightMode::Normal, 2750), expected);
        let expected = PowerOutput { electric: 0, thermal: 800, total: 800 };
        assert_eq!(pdu.calculate(FlightMode::Normal, 800), expected);
    }

    #[test]
    fn test_emergency() {
        use super::PowerDistribution;
        use crate::types::{FlightMode, PowerOutput};

        let pdu = PowerDistribution::default();
        let expected = PowerOutput { electric: 1000, thermal: 500, total: 1500 };
        assert_eq!(pdu.calculate(FlightMode::Emergency, 1500), expected);
        let expected = PowerOutput { electric: 1000, thermal: 2750, total: 3750 };
        assert_eq!(pdu.calculate(FlightMode::Emergency, 3750), expected);
    }

    #[test]
    fn test_request_above_envelope() {
        use super::PowerDistribution;
        use crate::types::{FlightMode, PowerOutput};

        // Only source caps apply, the envelope belongs to the controller
        let pdu = PowerDistribution::default();
        let expected = PowerOutput { electric: 1000, thermal: 2250, total: 3250 };
        assert_eq!(pdu.calculate(FlightMode::Takeoff, u16::MAX), expected);
        let expected = PowerOutput { electric: 0, thermal: 2750, total: 2750 };
        assert_eq!(pdu.calculate(FlightMode::Normal, 3000), expected);
    }

    #[test]
    fn test_split_within_caps() {
        use super::PowerDistribution;
        use crate::types::FlightMode;

        let pdu = PowerDistribution::default();
        for mode in FlightMode::ALL.iter().copied() {
            let bounds = pdu.modes()[mode];
            for requested in 0..=bounds.max {
                let output = pdu.calculate(mode, requested);
                assert_eq!(output.total, output.electric + output.thermal);
                assert!(output.electric <= bounds.electric_cap);
                assert!(output.thermal <= bounds.thermal_cap);
            }
        }
    }

    #[test]
    fn test_calculate_raw() {
        use super::PowerDistribution;
        use crate::types::{FlightMode, PowerOutput};

        let pdu = PowerDistribution::default();
        assert_eq!(pdu.calculate_raw(2, 1500), pdu.calculate(FlightMode::Emergency, 1500));
        let expected = PowerOutput { electric: 0, thermal: 1500, total: 1500 };
        assert_eq!(pdu.calculate_raw(7, 1500), expected);
        assert_eq!(pdu.calculate_raw(u8::MAX, 1500), expected);
    }

    #[test]
    fn test_custom_table() {
        use super::PowerDistribution;
        use crate::config::ModeTable;
        use crate::types::{FlightMode, PowerOutput};

        let mut modes = ModeTable::default();
        modes.takeoff.electric_cap = 400;
        let pdu = PowerDistribution::new(modes, 2200.0);
        let expected = PowerOutput { electric: 400, thermal: 600, total: 1000 };
        assert_eq!(pdu.calculate(FlightMode::Takeoff, 1000), expected);
    }

    #[test]
    fn test_conversion() {
        use super::{cv_to_watts, cv_to_watts_with, watts_to_cv};

        assert_eq!(cv_to_watts(100), 2200.0);
        assert_eq!(watts_to_cv(2200.0), 100);
        assert_eq!(cv_to_watts(0), 0.0);
        assert_eq!(cv_to_watts(50), 1100.0);
        assert_eq!(cv_to_watts_with(100, 1000.0), 1000.0);

        // Truncated toward zero, never rounded
        assert_eq!(watts_to_cv(2221.0), 100);
        assert_eq!(watts_to_cv(2243.9), 101);
        assert_eq!(watts_to_cv(21.9), 0);
        assert_eq!(watts_to_cv(-500.0), 0);
        assert_eq!(watts_to_cv(f32::NAN), 0);
        assert_eq!(watts_to_cv(1.0e9), u16::MAX);
    }

    #[test]
    fn test_configured_factor() {
        use super::PowerDistribution;
        use crate::Config;

        let pdu = PowerDistribution::default();
        assert_eq!(pdu.cv_to_watts(100), 2200.0);
        assert_eq!(pdu.watts_to_cv(2200.0), 100);

        let mut config = Config::default();
        config.apply_override("conversion-factor=1000").unwrap();
        let pdu = PowerDistribution::from(&config);
        assert_eq!(pdu.factor(), 1000.0);
        assert_eq!(pdu.cv_to_watts(100), 1000.0);
        assert_eq!(pdu.cv_to_watts(250), 2500.0);
        assert_eq!(pdu.watts_to_cv(1999.0), 199);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_reject_invalid_table() {
        use super::PowerDistribution;
        use crate::config::ModeTable;

        let mut modes = ModeTable::default();
        modes.normal.min = 3000;
        PowerDistribution::new(modes, 2200.0);
    }
}
