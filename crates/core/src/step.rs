/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait enables generic ODE solvers to work with the type by
/// stepping it via `derivative * delta`, where the derivative is with respect
/// to `Delta`. While typically used for time integration, `Delta` can represent
/// any independent variable.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// This is a convenience for accessing the [`StepIntegrable::Derivative`]
/// associated type without writing out the fully qualified syntax.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

/// A fixed-length view of a value as scalar components.
///
/// Adaptive solvers need more than [`StepIntegrable`]: they combine several
/// stage derivatives into one and measure the local error component by
/// component. Both the state and its derivative implement this trait, with the
/// same component order.
pub trait Components: Sized {
    /// Number of scalar components.
    const COUNT: usize;

    /// Writes the components into `out`, which has exactly [`Self::COUNT`] slots.
    fn write_components(&self, out: &mut [f64]);

    /// Rebuilds a value from exactly [`Self::COUNT`] components.
    fn from_components(components: &[f64]) -> Self;

    /// Returns the components as a freshly allocated vector.
    fn to_components(&self) -> Vec<f64> {
        let mut out = vec![0.0; Self::COUNT];
        self.write_components(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scalar state and derivative
    #[derive(Debug, PartialEq)]
    struct Position(f64);
    struct Velocity(f64);

    impl StepIntegrable<f64> for Position {
        type Derivative = Velocity;

        fn step(&self, derivative: Velocity, delta: f64) -> Self {
            Position(self.0 + derivative.0 * delta)
        }
    }

    // Two-component state and derivative
    #[derive(Debug, PartialEq)]
    struct Planar {
        x: f64,
        y: f64,
    }

    impl Components for Planar {
        const COUNT: usize = 2;

        fn write_components(&self, out: &mut [f64]) {
            out[0] = self.x;
            out[1] = self.y;
        }

        fn from_components(components: &[f64]) -> Self {
            Planar {
                x: components[0],
                y: components[1],
            }
        }
    }

    #[test]
    fn step_scalar_state() {
        let pos = Position(0.0);
        let vel = Velocity(2.0);
        let dt = 0.5;

        let next = pos.step(vel, dt);

        assert_eq!(next, Position(1.0));
    }

    #[test]
    fn components_round_trip_in_order() {
        let p = Planar { x: 1.0, y: -2.0 };

        let components = p.to_components();

        assert_eq!(components, vec![1.0, -2.0]);
        assert_eq!(Planar::from_components(&components), p);
    }
}
