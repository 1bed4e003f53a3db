pub const DEFAULT_DEBOUNCE_TICKS: u32 = 50;

/// Filters contact bounce of a push button sampled once per tick
#[derive(Copy, Clone, Debug)]
pub struct Debouncer {
    delay: u32,
    state: bool,
    last_change: u32,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_TICKS)
    }
}

impl Debouncer {
    pub fn new(delay: u32) -> Self {
        Self { delay, state: false, last_change: 0 }
    }

    pub fn is_pressed(&self) -> bool {
        self.state
    }

    /// Returns true only on an accepted release-to-press transition
    pub fn update(&mut self, now: u32, pressed: bool) -> bool {
        if pressed == self.state {
            return false;
        }
        if now.wrapping_sub(self.last_change) < self.delay {
            return false;
        }
        self.state = pressed;
        self.last_change = now;
        pressed
    }
}

mod test {
    #[test]
    fn test_debounce() {
        use super::Debouncer;

        let mut button = Debouncer::new(50);
        assert!(button.update(100, true));
        assert!(button.is_pressed());
        // bounce
        assert!(!button.update(110, false));
        assert!(!button.update(120, true));
        assert!(button.is_pressed());

        assert!(!button.update(160, false));
        assert!(!button.is_pressed());
        assert!(!button.update(170, true));
        assert!(button.update(210, true));
    }

    #[test]
    fn test_debounce_wrapping() {
        use super::Debouncer;

        let mut button = Debouncer::new(50);
        assert!(button.update(u32::MAX - 10, true));
        assert!(!button.update(20, false));
        assert!(!button.update(50, false));
        assert!(!button.is_pressed());
    }
}
