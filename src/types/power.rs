/// Power in system units (Cv)
pub type Power = u16;

/// Watts carried by 100 power units.
pub const POWER_CONVERSION_FACTOR: f32 = 2200.0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PowerOutput {
    pub electric: Power,
    pub thermal: Power,
    pub total: Power,
}

impl PowerOutput {
    pub fn new(electric: Power, thermal: Power) -> Self {
        Self { electric, thermal, total: electric.saturating_add(thermal) }
    }
}

impl core::fmt::Display for PowerOutput {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "E{} T{} = {} Cv", self.electric, self.thermal, self.total)
    }
}

mod test {
    #[test]
    fn test_power_output() {
        use serde_json::json;

        use super::PowerOutput;

        let output = PowerOutput::new(1000, 500);
        assert_eq!(output.total, 1500);
        let expected = json!({"electric": 1000, "thermal": 500, "total": 1500});
        assert_eq!(expected, serde_json::to_value(&output).unwrap());
        assert_eq!(format!("{}", output), "E1000 T500 = 1500 Cv");
    }
}
