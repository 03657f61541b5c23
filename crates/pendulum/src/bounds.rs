use crate::Trajectory;

/// Half-width of the square pendulum view, leaving room around the unit rod.
const PENDULUM_EXTENT: f64 = 1.5;

/// Padding added above and below the largest recorded angle.
const ANGLE_PADDING: f64 = 0.1;

/// A closed interval on one plot axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Fixed axis ranges for rendering a whole trajectory.
///
/// Computed once per run so the axes do not jump between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    /// Horizontal and vertical range of the pendulum view.
    pub pendulum: AxisRange,

    /// Time axis of the angle plot.
    pub time: AxisRange,

    /// Angle axis of the angle plot, symmetric about zero.
    pub angle: AxisRange,
}

impl AxisRange {
    #[must_use]
    pub fn symmetric(half_width: f64) -> Self {
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl PlotBounds {
    #[must_use]
    pub fn for_trajectory(trajectory: &Trajectory) -> Self {
        let peak = trajectory
            .angles()
            .iter()
            .fold(0.0_f64, |peak, angle| peak.max(angle.abs()));

        Self {
            pendulum: AxisRange::symmetric(PENDULUM_EXTENT),
            time: AxisRange {
                min: 0.0,
                max: trajectory.span().total_time(),
            },
            angle: AxisRange::symmetric(peak + ANGLE_PADDING),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{PendulumParameters, PendulumState, TimeSpan, TrajectorySolver};

    fn bounds(angle: f64, total_time: f64) -> PlotBounds {
        let trajectory = TrajectorySolver::default()
            .solve(
                PendulumState::new(angle, 0.0),
                TimeSpan::new(total_time).expect("valid span"),
                PendulumParameters::new(9.81, 1.0).expect("valid parameters"),
            )
            .expect("should solve");
        PlotBounds::for_trajectory(&trajectory)
    }

    #[test]
    fn angle_axis_is_symmetric_around_the_peak() {
        let bounds = bounds(-0.5, 5.0);

        assert_relative_eq!(bounds.angle.max, 0.6, epsilon = 1e-6);
        assert_relative_eq!(bounds.angle.min, -bounds.angle.max);
    }

    #[test]
    fn time_axis_covers_the_span() {
        let bounds = bounds(0.2, 7.5);
        assert_eq!(bounds.time, AxisRange { min: 0.0, max: 7.5 });
    }

    #[test]
    fn pendulum_view_is_fixed() {
        let bounds = bounds(1.0, 2.0);
        assert_eq!(bounds.pendulum, AxisRange::symmetric(1.5));
        assert_relative_eq!(bounds.pendulum.width(), 3.0);
    }

    #[test]
    fn resting_pendulum_keeps_padding() {
        let bounds = bounds(0.0, 1.0);
        assert_eq!(bounds.angle, AxisRange::symmetric(0.1));
    }
}
