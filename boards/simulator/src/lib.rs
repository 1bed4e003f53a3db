#[macro_use]
extern crate log;
extern crate hybrid_power;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

use std::fmt::Write;

use hybrid_power::config::Config;
use hybrid_power::distribution::PowerDistribution;
use hybrid_power::fcs::FlightModeController;
use hybrid_power::input::debounce::DEFAULT_DEBOUNCE_TICKS;
use hybrid_power::input::{Command, Debouncer, EncoderTick};
use hybrid_power::telemetry::Telemetry;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Style {
    Frames,
    Status,
    Dashboard,
}

impl std::str::FromStr for Style {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, ()> {
        match string {
            "frames" => Ok(Self::Frames),
            "status" => Ok(Self::Status),
            "dashboard" => Ok(Self::Dashboard),
            _ => Err(()),
        }
    }
}

/// `--dashboard` and `--status` take precedence over `--style`
pub fn select_style(style: Option<&str>, dashboard: bool, status: bool) -> Result<Style, String> {
    match (dashboard, status) {
        (true, true) => Err("--dashboard conflicts with --status".to_owned()),
        (true, false) => Ok(Style::Dashboard),
        (false, true) => Ok(Style::Status),
        (false, false) => match style {
            Some(style) => style.parse().map_err(|_| format!("Unknown style {}", style)),
            None => Ok(Style::Frames),
        },
    }
}

// Ticks a simulated button is held down, and released afterwards
const BUTTON_HOLD_TICKS: u32 = 2 * DEFAULT_DEBOUNCE_TICKS;
const BUTTON_BOUNCE_TICKS: u32 = 5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub fn load_config(json: Option<&str>, overrides: &[&str]) -> Result<Config, String> {
    let mut config = match json {
        Some(json) => {
            serde_json::from_str(json).map_err(|e| format!("Parse config failed: {}", e))?
        }
        None => Config::default(),
    };
    for line in overrides {
        config.apply_override(line).map_err(|e| format!("Override {} failed: {}", line, e))?;
    }
    config.validate().map_err(|e| format!("Invalid config: {}", e))?;
    Ok(config)
}

/// Console stand-in for the encoder, the mode buttons and the serial telemetry link
pub struct Simulator {
    config: Config,
    fcs: FlightModeController,
    pdu: PowerDistribution,
    telemetry: Telemetry,
    style: Style,
    button: Debouncer,
    clock: u32,
}

impl Simulator {
    pub fn new(config: Config, style: Style) -> Self {
        Self {
            config,
            fcs: FlightModeController::new(&config),
            pdu: PowerDistribution::from(&config),
            telemetry: Telemetry::new(),
            style,
            button: Debouncer::default(),
            clock: 0,
        }
    }

    pub fn controller(&self) -> &FlightModeController {
        &self.fcs
    }

    pub fn distribution(&self) -> &PowerDistribution {
        &self.pdu
    }

    /// Samples one press of the mode button including contact bounce
    fn press_button(&mut self) -> Option<Command> {
        self.clock = self.clock.wrapping_add(BUTTON_HOLD_TICKS);
        let accepted = self.button.update(self.clock, true);
        self.button.update(self.clock.wrapping_add(BUTTON_BOUNCE_TICKS), false);
        self.clock = self.clock.wrapping_add(BUTTON_HOLD_TICKS);
        self.button.update(self.clock, false);
        if !accepted {
            debug!("Button press at tick {} rejected", self.clock);
        }
        accepted.then(|| Command::NextMode)
    }

    pub fn banner<W: Write>(&self, w: &mut W) -> std::fmt::Result {
        self.telemetry.write_banner(w, &self.config)
    }

    pub fn render<W: Write>(&mut self, w: &mut W) -> std::fmt::Result {
        let snapshot = self.fcs.snapshot(&self.pdu);
        debug!("Snapshot {}", snapshot);
        match self.style {
            Style::Frames => self.telemetry.write_frames(w, &snapshot),
            Style::Status => self.telemetry.write_status(w, &snapshot),
            Style::Dashboard => self.telemetry.write_dashboard(w, &snapshot),
        }
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, w: &mut W) -> Result<Outcome, std::fmt::Error> {
        let line = line.trim();
        let command = match line {
            "" => return Ok(Outcome::Continue),
            "q" | "quit" => return Ok(Outcome::Quit),
            "s" | "show" => None,
            "b" | "button" => self.press_button(),
            "cw" => Some(Command::from(EncoderTick::Clockwise)),
            "ccw" => Some(Command::from(EncoderTick::CounterClockwise)),
            _ => match line.parse::<Command>() {
                Ok(command) => Some(command),
                Err(e) => {
                    warn!("Reject input {:?}: {}", line, e);
                    self.telemetry.write_error(w, &format!("{}: {}", e, line))?;
                    return Ok(Outcome::Continue);
                }
            },
        };
        if let Some(command) = command {
            command.apply(&mut self.fcs, self.config.step);
        }
        self.render(w)?;
        Ok(Outcome::Continue)
    }
}

mod test {
    #[test]
    fn test_handle_line() {
        use indoc::indoc;

        use super::{Outcome, Simulator, Style};
        use hybrid_power::{Config, FlightMode};

        let mut simulator = Simulator::new(Config::default(), Style::Frames);
        let mut buf = String::new();
        assert_eq!(simulator.handle_line("+\n", &mut buf), Ok(Outcome::Continue));
        assert_eq!(simulator.controller().total_power(), 60);
        assert_eq!(simulator.handle_line("e", &mut buf), Ok(Outcome::Continue));
        assert_eq!(simulator.handle_line("p 1500", &mut buf), Ok(Outcome::Continue));
        assert_eq!(simulator.controller().mode(), FlightMode::Emergency);

        buf.clear();
        simulator.handle_line("show", &mut buf).unwrap();
        let expected = indoc! {"
            [ARINC] 270 | TOTAL_POWER: 1500 Cv | SEQ: 12
            [ARINC] 271 | ELEC_POWER: 1000 Cv | SEQ: 13
            [ARINC] 272 | THRM_POWER: 500 Cv | SEQ: 14
            [ARINC] 273 | FLIGHT_MODE: EMERGENCY | SEQ: 15
        "};
        assert_eq!(expected, buf);

        buf.clear();
        simulator.handle_line("climb", &mut buf).unwrap();
        assert_eq!(buf, "[ERROR] Unknown command: climb | SEQ: 16\n");
        assert_eq!(simulator.handle_line("q", &mut buf), Ok(Outcome::Quit));
    }

    #[test]
    fn test_button_and_encoder() {
        use super::{Simulator, Style};
        use hybrid_power::{Config, FlightMode};

        let mut simulator = Simulator::new(Config::default(), Style::Status);
        let mut buf = String::new();
        simulator.handle_line("cw", &mut buf).unwrap();
        simulator.handle_line("cw", &mut buf).unwrap();
        assert_eq!(simulator.controller().total_power(), 70);
        simulator.handle_line("ccw", &mut buf).unwrap();
        assert_eq!(simulator.controller().total_power(), 60);

        simulator.handle_line("b", &mut buf).unwrap();
        assert_eq!(simulator.controller().mode(), FlightMode::Normal);
        simulator.handle_line("button", &mut buf).unwrap();
        assert_eq!(simulator.controller().mode(), FlightMode::Emergency);
        simulator.handle_line("b", &mut buf).unwrap();
        assert_eq!(simulator.controller().mode(), FlightMode::Takeoff);
    }

    #[test]
    fn test_select_style() {
        use super::{select_style, Style};

        assert_eq!(select_style(None, false, false), Ok(Style::Frames));
        assert_eq!(select_style(Some("status"), false, false), Ok(Style::Status));
        assert_eq!(select_style(None, true, false), Ok(Style::Dashboard));
        assert_eq!(select_style(Some("frames"), false, true), Ok(Style::Status));
        assert!(select_style(None, true, true).is_err());
        assert!(select_style(Some("hud"), false, false).is_err());
    }

    #[test]
    fn test_conversion_factor_override() {
        use super::{load_config, Simulator, Style};

        let config = load_config(None, &["conversion-factor=1000"]).unwrap();
        let simulator = Simulator::new(config, Style::Frames);
        assert_eq!(simulator.distribution().cv_to_watts(100), 1000.0);
        assert_eq!(simulator.distribution().watts_to_cv(500.0), 50);

        let mut buf = String::new();
        simulator.banner(&mut buf).unwrap();
        assert!(buf.contains("100 Cv = 1000 W"));
    }

    #[test]
    fn test_load_config() {
        use super::load_config;

        let config = load_config(None, &[]).unwrap();
        assert_eq!(config.step, 10);

        let config = load_config(Some(r#"{"step": 20}"#), &["modes.normal.max=2000"]).unwrap();
        assert_eq!(config.step, 20);
        assert_eq!(config.modes.normal.max, 2000);

        assert!(load_config(Some("{"), &[]).is_err());
        assert!(load_config(None, &["modes.normal.min=3000"]).is_err());
        assert!(load_config(None, &["baudrate=9600"]).is_err());
    }
}
