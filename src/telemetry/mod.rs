//! Human readable telemetry. Frames mimic ARINC 429 labels as text only,
//! no bus level encoding is done here.

pub mod dashboard;
pub mod label;

use core::fmt::{self, Write};

use heapless::Vec;

use crate::config::Config;
use crate::fcs::Snapshot;
pub use label::{Frame, Label};

pub fn frames(snapshot: &Snapshot) -> Vec<Frame, 4> {
    let output = &snapshot.output;
    let mut frames = Vec::new();
    frames.push(Frame::power(Label::TotalPower, output.total)).ok();
    frames.push(Frame::power(Label::ElectricPower, output.electric)).ok();
    frames.push(Frame::power(Label::ThermalPower, output.thermal)).ok();
    frames.push(Frame::mode(snapshot.mode)).ok();
    frames
}

#[derive(Default)]
pub struct Telemetry {
    sequence: u32,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    fn next_sequence(&mut self) -> u32 {
        let sequence = self.sequence;
        self.sequence = sequence.wrapping_add(1);
        sequence
    }

    pub fn write_frames<W: Write>(&mut self, w: &mut W, snapshot: &Snapshot) -> fmt::Result {
        for frame in frames(snapshot).iter() {
            writeln!(w, "[ARINC] {} | SEQ: {}", frame, self.next_sequence())?;
        }
        Ok(())
    }

    pub fn write_error<W: Write>(&mut self, w: &mut W, message: &str) -> fmt::Result {
        writeln!(w, "[ERROR] {} | SEQ: {}", message, self.next_sequence())
    }

    pub fn write_status<W: Write>(&self, w: &mut W, snapshot: &Snapshot) -> fmt::Result {
        dashboard::write_status(w, snapshot)
    }

    pub fn write_dashboard<W: Write>(&self, w: &mut W, snapshot: &Snapshot) -> fmt::Result {
        dashboard::write_dashboard(w, snapshot)
    }

    pub fn write_banner<W: Write>(&self, w: &mut W, config: &Config) -> fmt::Result {
        dashboard::write_banner(w, config)
    }
}

mod test {
    #[test]
    fn test_write_frames() {
        use std::string::String;

        use indoc::indoc;

        use super::Telemetry;
        use crate::{distribution::PowerDistribution, fcs::FlightModeController, Config};

        let pdu = PowerDistribution::default();
        let mut fcs = FlightModeController::new(&Config::default());
        fcs.set_total_power(500);

        let mut telemetry = Telemetry::new();
        let mut buf = String::new();
        telemetry.write_frames(&mut buf, &fcs.snapshot(&pdu)).unwrap();
        let expected = indoc! {"
            [ARINC] 270 | TOTAL_POWER: 500 Cv | SEQ: 0
            [ARINC] 271 | ELEC_POWER: 500 Cv | SEQ: 1
            [ARINC] 272 | THRM_POWER: 0 Cv | SEQ: 2
            [ARINC] 273 | FLIGHT_MODE: TAKEOFF | SEQ: 3
        "};
        assert_eq!(expected, buf);
        assert_eq!(telemetry.sequence(), 4);

        fcs.next_mode();
        buf.clear();
        telemetry.write_frames(&mut buf, &fcs.snapshot(&pdu)).unwrap();
        telemetry.write_error(&mut buf, "Unknown command").unwrap();
        let expected = indoc! {"
            [ARINC] 270 | TOTAL_POWER: 500 Cv | SEQ: 4
            [ARINC] 271 | ELEC_POWER: 0 Cv | SEQ: 5
            [ARINC] 272 | THRM_POWER: 500 Cv | SEQ: 6
            [ARINC] 273 | FLIGHT_MODE: NORMAL | SEQ: 7
            [ERROR] Unknown command | SEQ: 8
        "};
        assert_eq!(expected, buf);
    }

    #[test]
    fn test_sequence_wraps() {
        use std::string::String;

        use super::Telemetry;

        let mut telemetry = Telemetry { sequence: u32::MAX };
        let mut buf = String::new();
        telemetry.write_error(&mut buf, "overflow").unwrap();
        assert_eq!(buf, "[ERROR] overflow | SEQ: 4294967295\n");
        assert_eq!(telemetry.sequence(), 0);
    }
}
