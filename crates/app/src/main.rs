//! Command-line runner: collects parameters, solves, reports, and animates.

mod args;
mod error;
mod report;

use std::{fs, process::ExitCode};

use swing_pendulum::{SimulationConfig, Trajectory, randomize_seeded};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::FmtSubscriber;

use args::{Options, Source, USAGE};
use error::CliError;
use report::Report;

fn main() -> ExitCode {
    let options = match args::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(CliError::from(err).exit_code());
        }
    };

    if options.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    init_logging(options.verbose);

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn run(options: &Options) -> Result<(), CliError> {
    let config = load_config(options)?;
    info!(?config, "starting simulation");

    let trajectory = config.run()?;
    println!("{}", Report::new(&trajectory));

    show(trajectory, options)
}

fn load_config(options: &Options) -> Result<SimulationConfig, CliError> {
    let mut config = match &options.source {
        Source::Defaults => SimulationConfig::default(),
        Source::File(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&text).map_err(|source| CliError::ParseConfig {
                path: path.clone(),
                source,
            })?
        }
        Source::Random(seed) => {
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, "randomized parameters");
            randomize_seeded(seed)
        }
    };

    options.overrides.apply(&mut config);
    Ok(config)
}

#[cfg(feature = "animate")]
fn show(trajectory: Trajectory, options: &Options) -> Result<(), CliError> {
    if options.no_window {
        return Ok(());
    }
    swing_viewer::show(trajectory, swing_viewer::ShowConfig::new())
        .map_err(|err| CliError::Window(err.to_string()))
}

#[cfg(not(feature = "animate"))]
fn show(_trajectory: Trajectory, options: &Options) -> Result<(), CliError> {
    if !options.no_window {
        info!("built without the `animate` feature, skipping the window");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use args::Overrides;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("swing-{}-{name}.toml", std::process::id()));
        fs::write(&path, contents).expect("writable temp dir");
        path
    }

    #[test]
    fn defaults_with_overrides() {
        let options = Options {
            overrides: Overrides {
                total_time: Some(2.0),
                ..Overrides::default()
            },
            ..Options::default()
        };

        let config = load_config(&options).expect("valid");
        assert_eq!(config.total_time, 2.0);
        assert_eq!(config.initial_angle_deg, 30.0);
    }

    #[test]
    fn reads_toml_files() {
        let path = temp_config("valid", "initial_angle_deg = 60\ngravity = 3.7\n");
        let options = Options {
            source: Source::File(path.clone()),
            ..Options::default()
        };

        let config = load_config(&options).expect("valid");
        fs::remove_file(path).ok();

        assert_eq!(config.initial_angle_deg, 60.0);
        assert_eq!(config.gravity, 3.7);
        assert_eq!(config.length, 1.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let path = temp_config("malformed", "length = \"long\"\n");
        let options = Options {
            source: Source::File(path.clone()),
            ..Options::default()
        };

        let result = load_config(&options);
        fs::remove_file(path).ok();

        assert!(matches!(result, Err(CliError::ParseConfig { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let options = Options {
            source: Source::File("/nonexistent/swing.toml".into()),
            ..Options::default()
        };

        assert!(matches!(
            load_config(&options),
            Err(CliError::ReadConfig { .. })
        ));
    }

    #[test]
    fn seeded_runs_repeat() {
        let options = Options {
            source: Source::Random(Some(9)),
            ..Options::default()
        };

        let first = load_config(&options).expect("valid");
        let second = load_config(&options).expect("valid");
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_parameters_abandon_the_run() {
        let options = Options {
            overrides: Overrides {
                length: Some(-1.0),
                ..Overrides::default()
            },
            no_window: true,
            ..Options::default()
        };

        let err = run(&options).expect_err("should fail");
        assert_eq!(err.exit_code(), 4);
    }
}
