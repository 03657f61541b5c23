use std::path::PathBuf;

use thiserror::Error;

use crate::args::ArgsError;

/// Reasons a run is abandoned, each with its own message and exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Args(#[from] ArgsError),

    #[error("could not read config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is malformed: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Simulation(#[from] swing_pendulum::Error),

    #[cfg(feature = "animate")]
    #[error("could not open the animation window: {0}")]
    Window(String),
}

impl CliError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Args(_) => 2,
            Self::ReadConfig { .. } | Self::ParseConfig { .. } => 3,
            Self::Simulation(swing_pendulum::Error::InvalidParameter(_)) => 4,
            Self::Simulation(swing_pendulum::Error::IntegrationFailure(_)) => 5,
            #[cfg(feature = "animate")]
            Self::Window(_) => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use swing_pendulum::ParameterError;

    #[test]
    fn each_failure_kind_has_its_own_code() {
        let errors = [
            CliError::Args(ArgsError::ConflictingSources),
            CliError::ReadConfig {
                path: "missing.toml".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
            CliError::Simulation(ParameterError::Length(0.0).into()),
        ];

        let codes: Vec<_> = errors.iter().map(CliError::exit_code).collect();
        assert_eq!(codes, [2, 3, 4]);
    }

    #[test]
    fn messages_name_the_problem() {
        let err = CliError::Simulation(ParameterError::Gravity(-1.0).into());
        assert_eq!(
            err.to_string(),
            "invalid parameter: gravitational acceleration must be finite and positive, got -1"
        );

        let err = CliError::ReadConfig {
            path: "run.toml".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("could not read config file run.toml"));
    }
}
