use crate::types::{FlightMode, Power, PowerOutput};

/// Consistent view of the controller, as read by output collaborators
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Snapshot {
    pub mode: FlightMode,
    pub total_power: Power,
    pub min_power: Power,
    pub max_power: Power,
    pub output: PowerOutput,
}

impl core::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        serde_json_core_fmt::to_fmt(f, self)
    }
}

mod test {
    #[test]
    fn test_snapshot() {
        use serde_json::json;

        use super::Snapshot;
        use crate::{distribution::PowerDistribution, fcs::FlightModeController, Config};

        let mut fcs = FlightModeController::new(&Config::default());
        fcs.set_mode(crate::types::FlightMode::Emergency);
        fcs.set_total_power(1500);
        let snapshot: Snapshot = fcs.snapshot(&PowerDistribution::default());
        let expected = json!({
            "mode": "emergency",
            "total-power": 1500,
            "min-power": 0,
            "max-power": 3750,
            "output": {"electric": 1000, "thermal": 500, "total": 1500}
        });
        assert_eq!(expected, serde_json::to_value(&snapshot).unwrap());
        let string = format!("{}", snapshot);
        assert_eq!(expected, serde_json::from_str::<serde_json::Value>(&string).unwrap());
    }
}
