#[macro_use]
extern crate log;

use std::io::{BufRead, Write};

use env_logger::Env;
use simulator::{load_config, select_style, Outcome, Simulator};

fn init(matches: &clap::ArgMatches) -> Result<Simulator, String> {
    let json = match matches.value_of("config") {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .map_err(|e| format!("Read config file {} failed: {}", path, e))?,
        ),
        None => None,
    };
    let overrides: Vec<&str> = matches.values_of("set").map(|v| v.collect()).unwrap_or_default();
    let config = load_config(json.as_deref(), &overrides)?;
    let dashboard = matches.is_present("dashboard");
    let style = select_style(matches.value_of("style"), dashboard, matches.is_present("status"))?;
    info!("Initial mode {} with {} Cv", config.initial_mode, config.initial_power);
    Ok(Simulator::new(config, style))
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = clap::App::new("simulator")
        .version("0.1")
        .author("qiuchengxuan")
        .about("Hybrid power manager console simulator")
        .arg(clap::Arg::with_name("config").long("config").help("Config file").takes_value(true))
        .arg(
            clap::Arg::with_name("set")
                .long("set")
                .help("Config override, e.g. modes.takeoff.max=3000")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("style")
                .long("style")
                .help("Telemetry style")
                .possible_values(&["frames", "status", "dashboard"])
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("dashboard")
                .long("dashboard")
                .help("Render bar graph dashboard")
                .conflicts_with("status"),
        )
        .arg(clap::Arg::with_name("status").long("status").help("Render boxed status frame"))
        .get_matches();
    let mut simulator = match init(&matches) {
        Ok(simulator) => simulator,
        Err(error) => {
            error!("{}", error);
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let mut buf = String::new();
    simulator.banner(&mut buf).ok();
    simulator.render(&mut buf).ok();
    print!("{}", buf);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Read stdin failed: {}", e);
                break;
            }
        };
        buf.clear();
        let outcome = simulator.handle_line(&line, &mut buf).unwrap_or(Outcome::Continue);
        let mut out = stdout.lock();
        out.write_all(buf.as_bytes()).ok();
        out.flush().ok();
        if outcome == Outcome::Quit {
            break;
        }
    }
    info!("Simulation finished");
}
