use std::fmt;

use swing_pendulum::{Trajectory, analysis};

/// Plain-text summary of a finished run.
pub struct Report<'a> {
    trajectory: &'a Trajectory,
}

impl<'a> Report<'a> {
    pub fn new(trajectory: &'a Trajectory) -> Self {
        Self { trajectory }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trajectory = self.trajectory;
        let params = trajectory.parameters();
        let initial = trajectory.states()[0];
        let stats = trajectory.stats();

        writeln!(f, "Simple pendulum")?;
        writeln!(
            f,
            "  initial angle      {:.2}° ({:.4} rad)",
            initial.angle.to_degrees(),
            initial.angle
        )?;
        writeln!(f, "  initial velocity   {:.4} rad/s", initial.angular_velocity)?;
        writeln!(f, "  total time         {:.2} s", trajectory.span().total_time())?;
        writeln!(f, "  gravity            {:.3} m/s²", params.gravity())?;
        writeln!(f, "  length             {:.3} m", params.length())?;

        writeln!(f, "Trajectory")?;
        writeln!(f, "  samples            {}", trajectory.len())?;
        writeln!(
            f,
            "  amplitude          {:.4} rad",
            analysis::max_abs_angle(trajectory)
        )?;
        match analysis::estimate_period(trajectory) {
            Some(period) => writeln!(
                f,
                "  period             {period:.4} s (small-angle {:.4} s)",
                params.small_angle_period()
            )?,
            None => writeln!(f, "  period             n/a")?,
        }
        writeln!(
            f,
            "  energy drift       {:.2e}",
            analysis::energy_drift(trajectory)
        )?;

        writeln!(f, "Solver")?;
        writeln!(f, "  accepted steps     {}", stats.accepted_steps)?;
        writeln!(f, "  rejected steps     {}", stats.rejected_steps)?;
        write!(f, "  evaluations        {}", stats.evaluations)
    }
}
