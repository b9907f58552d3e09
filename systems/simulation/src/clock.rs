//! Fixed-cadence frame clock converting elapsed time into frame indices.

use std::time::Duration;

use lifetime_traffic_core::FrameIndex;

/// Accumulates elapsed time and releases one frame per elapsed interval.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    accumulator: Duration,
    next_frame: FrameIndex,
}

impl FrameClock {
    /// Creates a clock whose first released frame is [`FrameIndex::ZERO`].
    ///
    /// A zero interval releases exactly one frame per [`FrameClock::advance`] call.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
            next_frame: FrameIndex::ZERO,
        }
    }

    /// Frame that will be released next.
    #[must_use]
    pub const fn next_frame(&self) -> FrameIndex {
        self.next_frame
    }

    /// Adds `dt` of elapsed time and appends every frame that became due.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<FrameIndex>) {
        if self.interval.is_zero() {
            out.push(self.release());
            return;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            out.push(self.release());
        }
    }

    fn release(&mut self) -> FrameIndex {
        let frame = self.next_frame;
        self.next_frame = frame.next();
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_one_frame_per_elapsed_interval() {
        let mut clock = FrameClock::new(Duration::from_millis(100));
        let mut frames = Vec::new();

        clock.advance(Duration::from_millis(60), &mut frames);
        assert!(frames.is_empty());

        clock.advance(Duration::from_millis(60), &mut frames);
        assert_eq!(frames, vec![FrameIndex::new(0)]);

        frames.clear();
        clock.advance(Duration::from_millis(250), &mut frames);
        assert_eq!(frames, vec![FrameIndex::new(1), FrameIndex::new(2)]);
        assert_eq!(clock.next_frame(), FrameIndex::new(3));
    }

    #[test]
    fn zero_interval_releases_a_frame_per_call() {
        let mut clock = FrameClock::new(Duration::ZERO);
        let mut frames = Vec::new();
        clock.advance(Duration::ZERO, &mut frames);
        clock.advance(Duration::from_secs(5), &mut frames);
        assert_eq!(frames, vec![FrameIndex::new(0), FrameIndex::new(1)]);
    }
}
