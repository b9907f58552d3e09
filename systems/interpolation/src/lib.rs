#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path interpolation expanding itinerary key-frames into per-tick positions.
//!
//! Each consecutive key-frame pair contributes `steps_per_segment` evenly
//! spaced samples starting at the pair's first key-frame, so segment
//! boundaries never repeat a position. The final segment is stretched so that
//! its last sample lands exactly on the itinerary's final key-frame, letting
//! occupants visibly arrive back where they started. With a single step per
//! segment there is no room to stretch, so every sample is a segment start and
//! the final key-frame is never shown.

use std::iter::FusedIterator;

use lifetime_traffic_core::{Itinerary, Path, Position, TrafficError};

/// Expands an itinerary into a dense path of `steps_per_segment × (len − 1)` positions.
///
/// Fails with [`TrafficError::InvalidItinerary`] when the itinerary has fewer
/// than two key-frames or `steps_per_segment` is zero.
pub fn interpolate(itinerary: &Itinerary, steps_per_segment: u32) -> Result<Path, TrafficError> {
    Ok(samples(itinerary, steps_per_segment)?.collect())
}

/// Lazily yields the positions [`interpolate`] would produce.
pub fn samples(itinerary: &Itinerary, steps_per_segment: u32) -> Result<Samples<'_>, TrafficError> {
    if itinerary.len() < 2 || steps_per_segment == 0 {
        return Err(TrafficError::InvalidItinerary {
            key_frames: itinerary.len(),
            steps_per_segment,
        });
    }

    Ok(Samples {
        key_frames: itinerary.key_frames(),
        steps_per_segment,
        segment: 0,
        step: 0,
    })
}

/// Finite, single-pass iterator over interpolated path positions.
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    key_frames: &'a [Position],
    steps_per_segment: u32,
    segment: usize,
    step: u32,
}

impl Samples<'_> {
    fn is_final_segment(&self) -> bool {
        self.segment + 2 == self.key_frames.len()
    }

    fn remaining(&self) -> usize {
        let segments = self.key_frames.len().saturating_sub(1);
        let steps = self.steps_per_segment as usize;
        segments
            .saturating_sub(self.segment)
            .saturating_mul(steps)
            .saturating_sub(self.step as usize)
    }
}

impl Iterator for Samples<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let from = *self.key_frames.get(self.segment)?;
        let to = *self.key_frames.get(self.segment + 1)?;

        let position = if self.is_final_segment() {
            arrival_sample(from, to, self.step, self.steps_per_segment)
        } else {
            from.lerp(to, f64::from(self.step) / f64::from(self.steps_per_segment))
        };

        self.step += 1;
        if self.step == self.steps_per_segment {
            self.step = 0;
            self.segment += 1;
        }

        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

impl FusedIterator for Samples<'_> {}

/// Sample of the final segment, spread over `steps - 1` intervals so the last one is `to`.
fn arrival_sample(from: Position, to: Position, step: u32, steps: u32) -> Position {
    if steps <= 1 {
        return from;
    }
    if step + 1 >= steps {
        return to;
    }
    from.lerp(to, f64::from(step) / f64::from(steps - 1))
}
