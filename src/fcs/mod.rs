pub mod envelop;
pub mod out;

use crate::config::{Config, ModeTable, PowerBounds};
use crate::distribution::PowerDistribution;
use crate::types::{FlightMode, Power};
use envelop::Envelop;
pub use out::Snapshot;

/// Tracks the active flight mode and the requested total power.
///
/// The requested power always lies within the active mode's envelope, every
/// mutation restricts it again.
#[derive(Clone, Debug)]
pub struct FlightModeController {
    modes: ModeTable,
    mode: FlightMode,
    total_power: Power,
}

impl FlightModeController {
    /// Expects a config accepted by `Config::validate`
    pub fn new(config: &Config) -> Self {
        debug_assert!(config.modes.invalid_mode().is_none());
        let mut fcs = Self { modes: config.modes, mode: config.initial_mode, total_power: 0 };
        fcs.total_power = fcs.envelop().restrict(config.initial_power);
        fcs
    }

    fn envelop(&self) -> Envelop {
        Envelop::from(&self.modes[self.mode])
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    pub fn bounds(&self) -> &PowerBounds {
        &self.modes[self.mode]
    }

    pub fn set_mode(&mut self, mode: FlightMode) {
        if mode != self.mode {
            info!("Flight mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        self.set_total_power(self.total_power);
    }

    pub fn next_mode(&mut self) {
        self.set_mode(self.mode.next())
    }

    pub fn total_power(&self) -> Power {
        self.total_power
    }

    pub fn set_total_power(&mut self, power: Power) {
        let envelop = self.envelop();
        self.total_power = envelop.restrict(power);
        if !envelop.contains(power) {
            debug!("Power {} restricted to {} in {}", power, self.total_power, self.mode);
        }
    }

    pub fn increase_power(&mut self, delta: Power) {
        self.set_total_power(self.total_power.saturating_add(delta))
    }

    pub fn decrease_power(&mut self, delta: Power) {
        self.set_total_power(self.total_power.saturating_sub(delta))
    }

    pub fn min_power(&self) -> Power {
        self.envelop().min()
    }

    pub fn max_power(&self) -> Power {
        self.envelop().max()
    }

    pub fn snapshot(&self, pdu: &PowerDistribution) -> Snapshot {
        Snapshot {
            mode: self.mode,
            total_power: self.total_power,
            min_power: self.min_power(),
            max_power: self.max_power(),
            output: pdu.calculate(self.mode, self.total_power),
        }
    }
}

mod test {
    #[cfg(test)]
    use super::FlightModeController;
    #[cfg(test)]
    use crate::{types::FlightMode, Config};

    #[cfg(test)]
    fn controller() -> FlightModeController {
        FlightModeController::new(&Config::default())
    }

    #[test]
    fn test_initial_state() {
        let fcs = controller();
        assert_eq!(fcs.mode(), FlightMode::Takeoff);
        assert_eq!(fcs.mode_name(), "TAKEOFF");
        assert_eq!(fcs.total_power(), 50);
        assert_eq!((fcs.min_power(), fcs.max_power()), (0, 3250));
    }

    #[test]
    fn test_initial_power_restricted() {
        let mut config = Config::default();
        config.initial_mode = FlightMode::Normal;
        config.initial_power = 3000;
        let fcs = FlightModeController::new(&config);
        assert_eq!(fcs.total_power(), 2750);
    }

    #[test]
    fn test_set_total_power() {
        let mut fcs = controller();
        fcs.set_total_power(1200);
        assert_eq!(fcs.total_power(), 1200);
        fcs.set_total_power(1200);
        assert_eq!(fcs.total_power(), 1200);
        fcs.set_total_power(5000);
        assert_eq!(fcs.total_power(), 3250);
        fcs.set_total_power(0);
        assert_eq!(fcs.total_power(), 0);
    }

    #[test]
    fn test_set_mode_restricts_power() {
        let mut fcs = controller();
        fcs.set_total_power(2000);
        fcs.set_mode(FlightMode::Normal);
        assert_eq!(fcs.total_power(), 2000);

        fcs.set_mode(FlightMode::Emergency);
        fcs.set_total_power(3700);
        fcs.set_mode(FlightMode::Normal);
        assert_eq!(fcs.total_power(), 2750);
        fcs.set_mode(FlightMode::Emergency);
        assert_eq!(fcs.total_power(), 2750);
    }

    #[test]
    fn test_set_mode_raises_to_min() {
        let mut config = Config::default();
        config.modes.emergency.min = 500;
        let mut fcs = FlightModeController::new(&config);
        fcs.set_mode(FlightMode::Emergency);
        assert_eq!(fcs.total_power(), 500);
        fcs.decrease_power(u16::MAX);
        assert_eq!(fcs.total_power(), 500);
    }

    #[test]
    fn test_next_mode() {
        let mut fcs = controller();
        fcs.next_mode();
        assert_eq!(fcs.mode(), FlightMode::Normal);
        fcs.next_mode();
        assert_eq!(fcs.mode(), FlightMode::Emergency);
        fcs.next_mode();
        assert_eq!(fcs.mode(), FlightMode::Takeoff);

        for mode in FlightMode::ALL.iter().copied() {
            fcs.set_mode(mode);
            fcs.next_mode();
            fcs.next_mode();
            fcs.next_mode();
            assert_eq!(fcs.mode(), mode);
        }
    }

    #[test]
    fn test_increase_power() {
        let mut fcs = controller();
        fcs.increase_power(10);
        assert_eq!(fcs.total_power(), 60);
        fcs.set_total_power(3245);
        fcs.increase_power(10);
        assert_eq!(fcs.total_power(), 3250);
        fcs.increase_power(u16::MAX);
        assert_eq!(fcs.total_power(), 3250);
    }

    #[test]
    fn test_increase_power_saturates() {
        let mut config = Config::default();
        config.modes.takeoff.max = u16::MAX;
        let mut fcs = FlightModeController::new(&config);
        fcs.set_total_power(u16::MAX);
        fcs.increase_power(10);
        assert_eq!(fcs.total_power(), u16::MAX);
        fcs.set_total_power(u16::MAX - 3);
        fcs.increase_power(10);
        assert_eq!(fcs.total_power(), u16::MAX);
    }

    #[test]
    fn test_decrease_power() {
        let mut fcs = controller();
        fcs.decrease_power(10);
        assert_eq!(fcs.total_power(), 40);
        fcs.decrease_power(100);
        assert_eq!(fcs.total_power(), 0);
        fcs.decrease_power(10);
        assert_eq!(fcs.total_power(), 0);
    }

    #[test]
    fn test_scenarios() {
        use crate::distribution::PowerDistribution;
        use crate::types::PowerOutput;

        let pdu = PowerDistribution::default();
        let mut fcs = controller();

        fcs.set_total_power(500);
        let expected = PowerOutput { electric: 500, thermal: 0, total: 500 };
        assert_eq!(fcs.snapshot(&pdu).output, expected);

        fcs.set_total_power(3250);
        let expected = PowerOutput { electric: 1000, thermal: 2250, total: 3250 };
        assert_eq!(fcs.snapshot(&pdu).output, expected);

        fcs.set_mode(FlightMode::Normal);
        let expected = PowerOutput { electric: 0, thermal: 2750, total: 2750 };
        assert_eq!(fcs.snapshot(&pdu).output, expected);

        fcs.set_mode(FlightMode::Emergency);
        fcs.set_total_power(1500);
        let expected = PowerOutput { electric: 1000, thermal: 500, total: 1500 };
        assert_eq!(fcs.snapshot(&pdu).output, expected);

        fcs.next_mode();
        assert_eq!(fcs.mode(), FlightMode::Takeoff);
    }
}
