#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Waypoint planner producing the key-frames an occupant visits.
//!
//! Every itinerary starts in one of two parking areas, walks to the atrium
//! door nearest its car, checks in at the front desk, wanders the gym floor,
//! checks out, and walks back to exactly where it parked.

use lifetime_traffic_core::{Itinerary, OccupantColor, Position};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of random stops an occupant makes inside the facility.
pub const WANDER_STOPS: usize = 10;

/// Number of key-frames in every planned itinerary.
pub const ITINERARY_LEN: usize = 1 + 1 + 1 + WANDER_STOPS + 1 + 1 + 1;

/// Outside door used by occupants parked east of the entrance.
pub const APPROACH_RIGHT: Position = Position::on_ground(3.5, -4.0);

/// Outside door used by occupants parked at or west of the entrance.
pub const APPROACH_LEFT: Position = Position::on_ground(-3.5, -4.0);

/// Front desk every occupant passes when entering and leaving.
pub const CHECKPOINT: Position = Position::ORIGIN;

/// Interior floor occupants wander across.
pub const WANDER_BOUNDS: GroundRect = GroundRect::new(-64.0, 36.0, 0.0, 56.5);

/// Source of uniform randomness consumed by the planner.
pub trait RandomSource {
    /// Draws a real uniformly from `[min, max)`; an empty range yields `min`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Draws a uniform boolean.
    fn flip(&mut self) -> bool;
}

/// Deterministic, re-seedable random source backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a random source whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Restarts the sequence from the provided seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if !(min < max) {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Axis-aligned rectangle on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundRect {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl GroundRect {
    /// Creates a rectangle spanning `[x_min, x_max] × [y_min, y_max]`.
    #[must_use]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Corner with the smallest coordinates.
    #[must_use]
    pub const fn min_corner(&self) -> Position {
        Position::on_ground(self.x_min, self.y_min)
    }

    /// Corner with the largest coordinates.
    #[must_use]
    pub const fn max_corner(&self) -> Position {
        Position::on_ground(self.x_max, self.y_max)
    }

    /// Reports whether the position's ground projection lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        (self.x_min..=self.x_max).contains(&position.x())
            && (self.y_min..=self.y_max).contains(&position.y())
    }

    /// Draws a ground-level position uniformly from the rectangle.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Position {
        let x = rng.uniform(self.x_min, self.x_max);
        let y = rng.uniform(self.y_min, self.y_max);
        Position::on_ground(x, y)
    }
}

/// Parking areas where occupants appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParkingRegion {
    /// Lot east of the entrance (region A).
    East,
    /// Lot west of the entrance (region B).
    West,
}

impl ParkingRegion {
    /// Picks one of the two lots with equal probability.
    pub fn choose<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        if rng.flip() {
            Self::West
        } else {
            Self::East
        }
    }

    /// Ground rectangle occupants spawn within.
    #[must_use]
    pub const fn bounds(self) -> GroundRect {
        match self {
            Self::East => GroundRect::new(5.0, 106.0, -100.0, -14.0),
            Self::West => GroundRect::new(-115.0, -28.0, -103.0, -15.0),
        }
    }
}

/// Named stages that compose an itinerary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Parking spot where the occupant appears.
    Spawn,
    /// Atrium door on the way in.
    Approach,
    /// Front desk on the way in.
    CheckIn,
    /// Random stop on the gym floor.
    Wander,
    /// Front desk on the way out.
    CheckOut,
    /// Atrium door on the way out.
    ExitApproach,
    /// Original parking spot where the occupant disappears.
    Exit,
}

impl Stage {
    /// Stage served by the key-frame at `index` of a planned itinerary.
    #[must_use]
    pub const fn for_key_frame(index: usize) -> Option<Self> {
        let stage = match index {
            0 => Self::Spawn,
            1 => Self::Approach,
            2 => Self::CheckIn,
            i if i < 3 + WANDER_STOPS => Self::Wander,
            i if i == 3 + WANDER_STOPS => Self::CheckOut,
            i if i == 4 + WANDER_STOPS => Self::ExitApproach,
            i if i == 5 + WANDER_STOPS => Self::Exit,
            _ => return None,
        };
        Some(stage)
    }
}

/// Door an occupant uses given where it parked.
#[must_use]
pub fn approach_point(spawn: Position) -> Position {
    if spawn.x() > 0.0 {
        APPROACH_RIGHT
    } else {
        APPROACH_LEFT
    }
}

/// Plans a complete round-trip itinerary.
pub fn plan<R: RandomSource + ?Sized>(rng: &mut R) -> Itinerary {
    let spawn = ParkingRegion::choose(rng).bounds().sample(rng);
    let door = approach_point(spawn);

    let mut key_frames = Vec::with_capacity(ITINERARY_LEN);
    key_frames.push(spawn);
    key_frames.push(door);
    key_frames.push(CHECKPOINT);
    for _ in 0..WANDER_STOPS {
        key_frames.push(WANDER_BOUNDS.sample(rng));
    }
    key_frames.push(CHECKPOINT);
    key_frames.push(door);
    key_frames.push(spawn);

    debug_assert_eq!(key_frames.len(), ITINERARY_LEN);
    Itinerary::new(key_frames)
}

/// Draws the display colour assigned to a new occupant.
pub fn random_color<R: RandomSource + ?Sized>(rng: &mut R) -> OccupantColor {
    let mut channel = || (rng.uniform(0.0, 1.0) * 255.0).round().clamp(0.0, 255.0) as u8;
    let red = channel();
    let green = channel();
    let blue = channel();
    OccupantColor::from_rgb(red, green, blue)
}
