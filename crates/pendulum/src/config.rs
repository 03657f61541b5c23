use swing_solvers::transient::dopri5;

use crate::{
    Error, ParameterError, PendulumParameters, PendulumState, TimeSpan, Trajectory,
    TrajectorySolver,
};

/// Raw run parameters as collected from a user.
///
/// Every field has a default, so a partial TOML table fills in the rest.
/// Values are checked only when converted with [`SimulationConfig::scenario`]
/// or [`SimulationConfig::solver`].
///
/// ```toml
/// initial_angle_deg = 45.0
/// total_time = 12.0
/// length = 0.8
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimulationConfig {
    /// Initial angle from the downward vertical, in degrees.
    pub initial_angle_deg: f64,

    /// Initial angular velocity, in rad/s.
    pub initial_angular_velocity: f64,

    /// Simulated time, in s.
    pub total_time: f64,

    /// Gravitational acceleration, in m/s².
    pub gravity: f64,

    /// Rod length, in m.
    pub length: f64,

    /// Relative tolerance of the integrator.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub rel_tol: Option<f64>,

    /// Absolute tolerance of the integrator.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub abs_tol: Option<f64>,
}

/// Validated inputs of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub initial: PendulumState,
    pub span: TimeSpan,
    pub params: PendulumParameters,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_angle_deg: 30.0,
            initial_angular_velocity: 0.0,
            total_time: 10.0,
            gravity: 9.81,
            length: 1.0,
            rel_tol: None,
            abs_tol: None,
        }
    }
}

impl SimulationConfig {
    /// Validates the physical parameters and converts the angle to radians.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn scenario(&self) -> Result<Scenario, ParameterError> {
        let initial =
            PendulumState::from_degrees(self.initial_angle_deg, self.initial_angular_velocity)
                .validate()?;
        let span = TimeSpan::new(self.total_time)?;
        let params = PendulumParameters::new(self.gravity, self.length)?;

        Ok(Scenario {
            initial,
            span,
            params,
        })
    }

    /// Builds a solver, using the default tolerance for any left unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is invalid.
    pub fn solver(&self) -> Result<TrajectorySolver, ParameterError> {
        let defaults = dopri5::Config::default();
        let config = dopri5::Config::new(
            self.rel_tol.unwrap_or(defaults.rel_tol()),
            self.abs_tol.unwrap_or(defaults.abs_tol()),
            defaults.max_steps(),
        )?;
        Ok(TrajectorySolver::new(config))
    }

    /// Validates the config and runs the simulation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] before integrating if any value is
    /// invalid, or [`Error::IntegrationFailure`] if the solver fails.
    pub fn run(&self) -> Result<Trajectory, Error> {
        let scenario = self.scenario()?;
        let solver = self.solver()?;
        scenario.simulate(&solver)
    }
}

impl Scenario {
    /// Runs this scenario with `solver`.
    ///
    /// # Errors
    ///
    /// Returns an error if integration fails.
    pub fn simulate(&self, solver: &TrajectorySolver) -> Result<Trajectory, Error> {
        solver.solve(self.initial, self.span, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn defaults_make_a_valid_scenario() {
        let scenario = SimulationConfig::default()
            .scenario()
            .expect("defaults are valid");

        assert_relative_eq!(scenario.initial.angle, 30.0_f64.to_radians());
        assert_eq!(scenario.initial.angular_velocity, 0.0);
        assert_eq!(scenario.span.total_time(), 10.0);
        assert_eq!(scenario.params.gravity(), 9.81);
        assert_eq!(scenario.params.length(), 1.0);
    }

    #[test]
    fn each_invalid_field_is_reported() {
        let cases = [
            SimulationConfig {
                total_time: -1.0,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                gravity: 0.0,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                length: -0.5,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                initial_angle_deg: f64::INFINITY,
                ..SimulationConfig::default()
            },
        ];

        for config in cases {
            assert!(config.scenario().is_err(), "{config:?} should be rejected");
            assert!(matches!(config.run(), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn unset_tolerances_use_solver_defaults() {
        let solver = SimulationConfig::default().solver().expect("valid");
        assert_eq!(solver, TrajectorySolver::default());
    }

    #[test]
    fn custom_tolerances_are_validated() {
        let tight = SimulationConfig {
            rel_tol: Some(1e-9),
            abs_tol: Some(1e-12),
            ..SimulationConfig::default()
        };
        let solver = tight.solver().expect("valid");
        assert_eq!(solver.config().rel_tol(), 1e-9);
        assert_eq!(solver.config().abs_tol(), 1e-12);

        let negative = SimulationConfig {
            rel_tol: Some(-1.0),
            ..SimulationConfig::default()
        };
        assert_eq!(
            negative.solver(),
            Err(ParameterError::Tolerance(dopri5::ConfigError::RelTol))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: SimulationConfig = toml::from_str(
            r"
            initial_angle_deg = 45.0
            length = 0.8
            rel_tol = 1e-8
            ",
        )
        .expect("valid toml");

        assert_eq!(
            config,
            SimulationConfig {
                initial_angle_deg: 45.0,
                length: 0.8,
                rel_tol: Some(1e-8),
                ..SimulationConfig::default()
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_and_malformed_fields_are_rejected() {
        assert!(toml::from_str::<SimulationConfig>("angle = 10.0").is_err());
        assert!(toml::from_str::<SimulationConfig>("total_time = \"ten\"").is_err());
    }
}
