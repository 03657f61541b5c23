use crate::PendulumState;

/// One renderable moment of a [`Trajectory`](crate::Trajectory).
///
/// Frames are derived on demand by slicing the trajectory. Asking for the same
/// index twice yields equal frames, and the trace of frame `k` is a prefix of
/// the trace of frame `k + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub index: usize,
    pub time: f64,
    pub state: PendulumState,
    pub bob: BobPosition,
    pub trace: AngleTrace<'a>,
    pub marker: TimeMarker,
}

/// Bob position for a unit rod hanging from a pivot at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BobPosition {
    pub x: f64,
    pub y: f64,
}

/// The angle-vs-time samples up to and including a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleTrace<'a> {
    times: &'a [f64],
    angles: &'a [f64],
}

/// Current time and angle, drawn as a vertical line from the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMarker {
    pub time: f64,
    pub angle: f64,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(
        times: &'a [f64],
        angles: &'a [f64],
        states: &'a [PendulumState],
        index: usize,
    ) -> Self {
        let time = times[index];
        let state = states[index];
        Self {
            index,
            time,
            state,
            bob: BobPosition::from_angle(state.angle),
            trace: AngleTrace {
                times: &times[..=index],
                angles: &angles[..=index],
            },
            marker: TimeMarker {
                time,
                angle: state.angle,
            },
        }
    }
}

impl BobPosition {
    /// Places the bob at `(sin θ, -cos θ)`.
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.sin(),
            y: -angle.cos(),
        }
    }

    /// Returns the rod as a segment from the pivot to the bob.
    #[must_use]
    pub fn rod(&self) -> [[f64; 2]; 2] {
        [[0.0, 0.0], [self.x, self.y]]
    }
}

impl<'a> AngleTrace<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &'a [f64] {
        self.times
    }

    #[must_use]
    pub fn angles(&self) -> &'a [f64] {
        self.angles
    }

    /// Iterates over `(time, angle)` pairs.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + 'a {
        self.times.iter().copied().zip(self.angles.iter().copied())
    }

    /// Returns whether `self` is an index prefix of `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &AngleTrace<'_>) -> bool {
        other.times.starts_with(self.times) && other.angles.starts_with(self.angles)
    }
}

impl TimeMarker {
    /// Returns the marker as a segment from `(t, 0)` to `(t, θ)`.
    #[must_use]
    pub fn segment(&self) -> [[f64; 2]; 2] {
        [[self.time, 0.0], [self.time, self.angle]]
    }
}
