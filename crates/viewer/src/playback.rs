use std::time::Duration;

use swing_pendulum::{Frame, Trajectory};

/// A frame cursor that advances at a fixed interval.
///
/// Frame timing is advisory: [`Playback::advance`] converts elapsed time into
/// whole frames and carries the remainder, so slow redraws skip frames rather
/// than slowing the animation down.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    frame_count: usize,
    index: usize,
    interval: Duration,
    looping: bool,
    playing: bool,
    carry: Duration,
}

impl Playback {
    /// Time between frames unless configured otherwise.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Creates a looping, playing cursor at frame zero.
    #[must_use]
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            index: 0,
            interval: Self::DEFAULT_INTERVAL,
            looping: true,
            playing: true,
            carry: Duration::ZERO,
        }
    }

    /// Creates a cursor over every frame of `trajectory`.
    #[must_use]
    pub fn for_trajectory(trajectory: &Trajectory) -> Self {
        Self::new(trajectory.len())
    }

    /// Sets the time between frames, clamped to at least one millisecond.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Self::MIN_INTERVAL);
        self
    }

    /// Sets whether playback wraps to the first frame after the last.
    ///
    /// Without looping, playback pauses on the last frame.
    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Returns the frame under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if `trajectory` has fewer frames than this cursor was built for.
    #[must_use]
    pub fn frame<'a>(&self, trajectory: &'a Trajectory) -> Frame<'a> {
        trajectory.frame(self.index)
    }

    /// Moves forward by the number of whole intervals in `elapsed`.
    ///
    /// Does nothing while paused. Returns the new index.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.playing || self.frame_count == 0 {
            return self.index;
        }

        let carry = self.carry.saturating_add(elapsed).as_nanos();
        let interval = self.interval.as_nanos();
        let steps = carry / interval;
        self.carry = Duration::from_nanos(u64::try_from(carry % interval).unwrap_or(0));

        if self.looping {
            let count = self.frame_count as u128;
            let offset = (self.index as u128 + steps % count) % count;
            self.index = usize::try_from(offset).unwrap_or(0);
        } else {
            let steps = usize::try_from(steps).unwrap_or(usize::MAX);
            self.index = self.index.saturating_add(steps).min(self.last());
            if self.index == self.last() {
                self.playing = false;
            }
        }

        self.index
    }

    /// Jumps to `index`, clamped to the last frame.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.last());
        self.carry = Duration::ZERO;
    }

    /// Moves one frame forward, wrapping only when looping.
    pub fn step_forward(&mut self) {
        let next = if self.index == self.last() && self.looping {
            0
        } else {
            self.index + 1
        };
        self.seek(next);
    }

    /// Moves one frame back, wrapping only when looping.
    pub fn step_back(&mut self) {
        let previous = match self.index {
            0 if self.looping => self.last(),
            0 => 0,
            index => index - 1,
        };
        self.seek(previous);
    }

    /// Resumes playback, restarting from the first frame if stopped at the end.
    pub fn play(&mut self) {
        if !self.looping && self.index == self.last() {
            self.index = 0;
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.carry = Duration::ZERO;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn last(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }
}
