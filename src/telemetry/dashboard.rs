use core::cmp;
use core::fmt::{self, Write};

use heapless::String;

use crate::config::Config;
use crate::fcs::Snapshot;
use crate::types::Power;

const STATUS_WIDTH: usize = 60;
const DASHBOARD_WIDTH: usize = 64;
const BAR_CELLS: u32 = 40;

const TOTAL_SCALE: Power = 4000;
const ELECTRIC_SCALE: Power = 1000;
const THERMAL_SCALE: Power = 2750;

type Row = String<256>;

struct Boxed<'a, W: Write> {
    w: &'a mut W,
    width: usize,
    border: char,
}

impl<'a, W: Write> Boxed<'a, W> {
    fn rule(&mut self, left: char, fill: char, right: char) -> fmt::Result {
        self.w.write_char(left)?;
        for _ in 0..self.width {
            self.w.write_char(fill)?;
        }
        self.w.write_char(right)?;
        self.w.write_char('\n')
    }

    fn row(&mut self, args: fmt::Arguments) -> fmt::Result {
        let mut content = Row::new();
        content.write_fmt(args).ok();
        let (border, width) = (self.border, self.width);
        writeln!(self.w, "{}{:<width$}{}", border, content.as_str(), border, width = width)
    }
}

fn bar(power: Power, scale: Power) -> Row {
    let cells = cmp::min(power as u32 * BAR_CELLS / scale as u32, BAR_CELLS);
    let mut row = Row::new();
    for i in 0..BAR_CELLS {
        row.push(if i < cells { '█' } else { '░' }).ok();
    }
    row
}

pub fn write_status<W: Write>(w: &mut W, snapshot: &Snapshot) -> fmt::Result {
    let mut frame = Boxed { w, width: STATUS_WIDTH, border: '│' };
    let output = &snapshot.output;
    frame.rule('┌', '─', '┐')?;
    frame.row(format_args!(" MODE: {}", snapshot.mode))?;
    frame.rule('├', '─', '┤')?;
    frame.row(format_args!(" Total power:     {} Cv", output.total))?;
    frame.row(format_args!(" Electric power:  {} Cv", output.electric))?;
    frame.row(format_args!(" Thermal power:   {} Cv", output.thermal))?;
    frame.rule('└', '─', '┘')
}

pub fn write_dashboard<W: Write>(w: &mut W, snapshot: &Snapshot) -> fmt::Result {
    let mut frame = Boxed { w, width: DASHBOARD_WIDTH, border: '║' };
    let output = &snapshot.output;
    frame.rule('╔', '═', '╗')?;
    frame.row(format_args!("  MODE: {}", snapshot.mode))?;
    frame.row(format_args!("  LIMIT {}..{} Cv", snapshot.min_power, snapshot.max_power))?;
    frame.rule('╠', '═', '╣')?;
    let total = bar(output.total, TOTAL_SCALE);
    frame.row(format_args!("  TOTAL  [{}] {} Cv", total, output.total))?;
    let electric = bar(output.electric, ELECTRIC_SCALE);
    frame.row(format_args!("  ELEC   [{}] {} Cv", electric, output.electric))?;
    let thermal = bar(output.thermal, THERMAL_SCALE);
    frame.row(format_args!("  THRM   [{}] {} Cv", thermal, output.thermal))?;
    frame.rule('╚', '═', '╝')
}

pub fn write_banner<W: Write>(w: &mut W, config: &Config) -> fmt::Result {
    let mut frame = Boxed { w, width: DASHBOARD_WIDTH, border: '║' };
    frame.rule('╔', '═', '╗')?;
    frame.row(format_args!("  HYBRID POWER MANAGER v{}", env!("CARGO_PKG_VERSION")))?;
    frame.rule('╠', '═', '╣')?;
    frame.row(format_args!("  Protocol: ARINC 429 (simulated)"))?;
    frame.row(format_args!("  Step: {} Cv", config.step))?;
    frame.row(format_args!("  100 Cv = {} W", config.conversion_factor))?;
    frame.rule('╚', '═', '╝')?;
    writeln!(frame.w, "[SYSTEM] Ready, initial mode {}", config.initial_mode)
}

mod test {
    #[cfg(test)]
    use crate::fcs::Snapshot;

    #[cfg(test)]
    fn snapshot() -> Snapshot {
        use crate::{distribution::PowerDistribution, fcs::FlightModeController};
        use crate::{types::FlightMode, Config};

        let mut fcs = FlightModeController::new(&Config::default());
        fcs.set_mode(FlightMode::Emergency);
        fcs.set_total_power(1500);
        fcs.snapshot(&PowerDistribution::default())
    }

    #[test]
    fn test_bar() {
        use super::bar;

        assert_eq!(bar(0, 1000).chars().filter(|&c| c == '░').count(), 40);
        assert_eq!(bar(500, 1000).chars().filter(|&c| c == '█').count(), 20);
        assert_eq!(bar(1000, 1000).chars().filter(|&c| c == '█').count(), 40);
        assert_eq!(bar(5000, 1000).chars().filter(|&c| c == '█').count(), 40);
        assert_eq!(bar(5000, 1000).chars().count(), 40);
    }

    #[test]
    fn test_status() {
        use std::string::String;
        use std::vec::Vec;

        use super::write_status;

        let mut buf = String::new();
        write_status(&mut buf, &snapshot()).unwrap();
        let lines: Vec<&str> = buf.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|line| line.chars().count() == 62));
        assert_eq!(lines[1].trim_end_matches('│').trim_end(), "│ MODE: EMERGENCY");
        assert_eq!(lines[3].trim_end_matches('│').trim_end(), "│ Total power:     1500 Cv");
        assert_eq!(lines[4].trim_end_matches('│').trim_end(), "│ Electric power:  1000 Cv");
        assert_eq!(lines[5].trim_end_matches('│').trim_end(), "│ Thermal power:   500 Cv");
    }

    #[test]
    fn test_dashboard() {
        use std::string::String;
        use std::vec::Vec;

        use super::write_dashboard;

        let mut buf = String::new();
        write_dashboard(&mut buf, &snapshot()).unwrap();
        let lines: Vec<&str> = buf.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|line| line.chars().count() == 66));
        assert_eq!(lines[1].trim_end_matches('║').trim_end(), "║  MODE: EMERGENCY");
        assert_eq!(lines[2].trim_end_matches('║').trim_end(), "║  LIMIT 0..3750 Cv");

        let filled = |line: &str| line.chars().filter(|&c| c == '█').count();
        assert!(lines[4].starts_with("║  TOTAL  ["));
        assert!(lines[4].trim_end_matches('║').trim_end().ends_with("] 1500 Cv"));
        assert_eq!(filled(lines[4]), 15);
        assert_eq!(filled(lines[5]), 40);
        assert_eq!(filled(lines[6]), 7);
    }

    #[test]
    fn test_banner() {
        use std::string::String;

        use super::write_banner;
        use crate::Config;

        let mut buf = String::new();
        write_banner(&mut buf, &Config::default()).unwrap();
        assert!(buf.contains(concat!("HYBRID POWER MANAGER v", env!("CARGO_PKG_VERSION"))));
        assert!(buf.contains("║  Step: 10 Cv "));
        assert!(buf.contains("║  100 Cv = 2200 W "));
        assert!(buf.ends_with("[SYSTEM] Ready, initial mode TAKEOFF\n"));
    }
}
