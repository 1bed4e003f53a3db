use crate::config::PowerBounds;
use crate::types::Power;

/// Min/max power envelope of the active mode
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Envelop {
    min: Power,
    max: Power,
}

impl From<&PowerBounds> for Envelop {
    fn from(bounds: &PowerBounds) -> Self {
        Self { min: bounds.min, max: bounds.max }
    }
}

impl Envelop {
    pub fn min(&self) -> Power {
        self.min
    }

    pub fn max(&self) -> Power {
        self.max
    }

    pub fn contains(&self, power: Power) -> bool {
        self.min <= power && power <= self.max
    }

    pub fn restrict(&self, power: Power) -> Power {
        match () {
            _ if power < self.min => self.min,
            _ if power > self.max => self.max,
            _ => power,
        }
    }
}

mod test {
    #[test]
    fn test_restrict() {
        use super::Envelop;
        use crate::config::PowerBounds;

        let envelop = Envelop::from(&PowerBounds::new(100, 2750, 0, 2750));
        assert_eq!(envelop.restrict(0), 100);
        assert_eq!(envelop.restrict(100), 100);
        assert_eq!(envelop.restrict(1500), 1500);
        assert_eq!(envelop.restrict(2750), 2750);
        assert_eq!(envelop.restrict(2751), 2750);
        assert!(envelop.contains(1500));
        assert!(!envelop.contains(99));
    }
}
