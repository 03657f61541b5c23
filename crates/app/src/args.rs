use std::path::PathBuf;

use swing_pendulum::SimulationConfig;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: swing [OPTIONS]

Simulates a simple gravity pendulum and animates the result.

Parameter source (defaults if neither is given):
  -c, --config <FILE>     Read parameters from a TOML file
  -r, --random [SEED]     Draw random parameters, optionally from a seed

Parameter overrides (applied after the source):
      --angle <DEG>       Initial angle in degrees
      --velocity <RAD/S>  Initial angular velocity
      --time <S>          Total simulated time
      --gravity <M/S2>    Gravitational acceleration
      --length <M>        Pendulum length

Output:
  -v, --verbose           Log solver details
      --no-window         Print the summary without opening the animation
  -h, --help              Print this help
";

/// Where the base parameters come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Defaults,
    File(PathBuf),
    Random(Option<u64>),
}

/// Individual values given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overrides {
    pub angle_deg: Option<f64>,
    pub angular_velocity: Option<f64>,
    pub total_time: Option<f64>,
    pub gravity: Option<f64>,
    pub length: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options {
    pub source: Source,
    pub overrides: Overrides,
    pub verbose: bool,
    pub no_window: bool,
    pub help: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown argument `{0}`")]
    Unknown(String),

    #[error("`{0}` needs a value")]
    MissingValue(&'static str),

    #[error("`{flag}` expects a number, got `{value}`")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("seed must be a non-negative integer, got `{0}`")]
    InvalidSeed(String),

    #[error("`--config` and `--random` cannot be combined")]
    ConflictingSources,
}

impl Overrides {
    pub fn apply(&self, config: &mut SimulationConfig) {
        let fields = [
            (self.angle_deg, &mut config.initial_angle_deg),
            (self.angular_velocity, &mut config.initial_angular_velocity),
            (self.total_time, &mut config.total_time),
            (self.gravity, &mut config.gravity),
            (self.length, &mut config.length),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// Parses arguments, excluding the program name.
pub fn parse<I>(args: I) -> Result<Options, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        let source = match arg.as_str() {
            "-c" | "--config" => {
                let path = args.next().ok_or(ArgsError::MissingValue("--config"))?;
                Some(Source::File(path.into()))
            }
            "-r" | "--random" => {
                let seed = args
                    .next_if(|next| !next.starts_with('-'))
                    .map(|seed| seed.parse().map_err(|_| ArgsError::InvalidSeed(seed)))
                    .transpose()?;
                Some(Source::Random(seed))
            }
            "--angle" => {
                options.overrides.angle_deg = Some(number("--angle", args.next())?);
                None
            }
            "--velocity" => {
                options.overrides.angular_velocity = Some(number("--velocity", args.next())?);
                None
            }
            "--time" => {
                options.overrides.total_time = Some(number("--time", args.next())?);
                None
            }
            "--gravity" => {
                options.overrides.gravity = Some(number("--gravity", args.next())?);
                None
            }
            "--length" => {
                options.overrides.length = Some(number("--length", args.next())?);
                None
            }
            "-v" | "--verbose" => {
                options.verbose = true;
                None
            }
            "--no-window" => {
                options.no_window = true;
                None
            }
            "-h" | "--help" => {
                options.help = true;
                None
            }
            _ => return Err(ArgsError::Unknown(arg)),
        };

        if let Some(source) = source {
            if options.source != Source::Defaults
                && std::mem::discriminant(&options.source) != std::mem::discriminant(&source)
            {
                return Err(ArgsError::ConflictingSources);
            }
            options.source = source;
        }
    }

    Ok(options)
}

fn number(flag: &'static str, value: Option<String>) -> Result<f64, ArgsError> {
    let value = value.ok_or(ArgsError::MissingValue(flag))?;
    value
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(args: &str) -> Result<Options, ArgsError> {
        parse(args.split_whitespace().map(String::from))
    }

    #[test]
    fn no_arguments_means_defaults() {
        assert_eq!(parse_str(""), Ok(Options::default()));
    }

    #[test]
    fn reads_source_and_flags() {
        let options = parse_str("--config run.toml -v --no-window").expect("valid");

        assert_eq!(options.source, Source::File("run.toml".into()));
        assert!(options.verbose);
        assert!(options.no_window);
        assert!(!options.help);
    }

    #[test]
    fn random_seed_is_optional() {
        assert_eq!(
            parse_str("--random").map(|o| o.source),
            Ok(Source::Random(None))
        );
        assert_eq!(
            parse_str("-r 42 --verbose").map(|o| o.source),
            Ok(Source::Random(Some(42)))
        );
        assert_eq!(
            parse_str("--random --no-window").map(|o| o.no_window),
            Ok(true)
        );
    }

    #[test]
    fn rejects_bad_seeds() {
        assert_eq!(
            parse_str("--random abc"),
            Err(ArgsError::InvalidSeed("abc".into()))
        );
    }

    #[test]
    fn reads_numeric_overrides() {
        let options = parse_str("--angle 45 --velocity -1.5 --time 12 --gravity 9.7 --length 0.8")
            .expect("valid");

        assert_eq!(
            options.overrides,
            Overrides {
                angle_deg: Some(45.0),
                angular_velocity: Some(-1.5),
                total_time: Some(12.0),
                gravity: Some(9.7),
                length: Some(0.8),
            }
        );
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert_eq!(
            parse_str("--length one"),
            Err(ArgsError::InvalidNumber {
                flag: "--length",
                value: "one".into()
            })
        );
        assert_eq!(parse_str("--time"), Err(ArgsError::MissingValue("--time")));
    }

    #[test]
    fn rejects_unknown_and_conflicting_arguments() {
        assert_eq!(
            parse_str("--fast"),
            Err(ArgsError::Unknown("--fast".into()))
        );
        assert_eq!(
            parse_str("--config a.toml --random"),
            Err(ArgsError::ConflictingSources)
        );
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut config = SimulationConfig::default();
        let overrides = Overrides {
            total_time: Some(3.0),
            length: Some(2.0),
            ..Overrides::default()
        };

        overrides.apply(&mut config);

        assert_eq!(config.total_time, 3.0);
        assert_eq!(config.length, 2.0);
        assert_eq!(config.initial_angle_deg, 30.0);
        assert_eq!(config.gravity, 9.81);
    }
}
