#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the LifeTime traffic engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative occupant registry, and pure systems. The simulation driver
//! submits [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values that adapters translate into [`SceneAdapter`] calls. Systems only
//! read immutable snapshots and produce values for the driver to submit.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Name of the facility whose foot traffic is simulated.
pub const FACILITY_NAME: &str = "LifeTime Savage";

/// Prefix of the live population counter shown by the scene.
pub const POPULATION_LABEL_PREFIX: &str = "Person count: ";

/// Formats the population counter text for the provided active occupant count.
#[must_use]
pub fn population_label(active: usize) -> String {
    format!("{POPULATION_LABEL_PREFIX}{active}")
}

/// Point in facility space measured in meters.
///
/// `x` and `y` span the ground plane and `z` is the vertical axis. The facility
/// entrance sits at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// Facility interior origin, directly behind the entrance.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new position from its three components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a position resting on the ground plane.
    #[must_use]
    pub const fn on_ground(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Horizontal component along the facility's length.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Horizontal component along the facility's width.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Vertical component.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Linearly blends toward `other`; a `fraction` of zero yields `self`.
    #[must_use]
    pub fn lerp(self, other: Self, fraction: f64) -> Self {
        self + (other - self) * fraction
    }

    /// Reports whether every component lies within `tolerance` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Position {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Ordered key-frames an occupant visits between arriving and leaving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    key_frames: Vec<Position>,
}

impl Itinerary {
    /// Creates an itinerary visiting the provided key-frames in order.
    #[must_use]
    pub fn new(key_frames: Vec<Position>) -> Self {
        Self { key_frames }
    }

    /// Key-frames in visiting order.
    #[must_use]
    pub fn key_frames(&self) -> &[Position] {
        &self.key_frames
    }

    /// Number of key-frames in the itinerary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.key_frames.len()
    }

    /// Reports whether the itinerary contains no key-frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_frames.is_empty()
    }

    /// Key-frame where the occupant appears.
    #[must_use]
    pub fn first(&self) -> Option<Position> {
        self.key_frames.first().copied()
    }

    /// Key-frame where the occupant disappears.
    #[must_use]
    pub fn last(&self) -> Option<Position> {
        self.key_frames.last().copied()
    }

    /// Reports whether the occupant leaves from exactly where it appeared.
    #[must_use]
    pub fn is_round_trip(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => self.len() >= 2 && first == last,
            _ => false,
        }
    }

    /// Iterator over consecutive key-frame pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.key_frames
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
    }
}

/// Dense, evenly spaced positions derived from an [`Itinerary`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    positions: Vec<Position>,
}

impl Path {
    /// Wraps already interpolated positions.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Number of positions, which equals the number of ticks an occupant lives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Reports whether the path holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at the provided cursor, if it lies within the path.
    #[must_use]
    pub fn get(&self, cursor: usize) -> Option<Position> {
        self.positions.get(cursor).copied()
    }

    /// Every position in traversal order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

impl FromIterator<Position> for Path {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self::from_positions(iter.into_iter().collect())
    }
}

/// Unique identifier assigned to an occupant by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupantId(u32);

impl OccupantId {
    /// Creates a new occupant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Display colour fixed for an occupant's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupantColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl OccupantColor {
    /// Creates a new occupant color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Index of an animation frame supplied by the driving clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameIndex(u64);

impl FrameIndex {
    /// First frame delivered by the clock.
    pub const ZERO: Self = Self(0);

    /// Creates a new frame index wrapper.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the underlying frame number.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Frame that immediately follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Commands that express all permissible registry mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Inserts a freshly planned occupant at the start of its path.
    AdmitOccupant {
        /// Key-frames the occupant was planned to visit.
        itinerary: Itinerary,
        /// Dense path interpolated from the itinerary.
        path: Path,
        /// Display colour for the occupant's lifetime.
        color: OccupantColor,
    },
    /// Advances every active occupant by one path position.
    Tick {
        /// Frame delivered by the driving clock.
        frame: FrameIndex,
    },
}

/// Events broadcast by the registry after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a new occupant joined the active set.
    OccupantAdmitted {
        /// Identifier assigned to the occupant.
        occupant: OccupantId,
        /// Spawn position, the first position of the occupant's path.
        origin: Position,
        /// Display colour assigned to the occupant.
        color: OccupantColor,
    },
    /// Indicates that the registry began processing a frame.
    TimeAdvanced {
        /// Frame being processed.
        frame: FrameIndex,
    },
    /// Reports the footprint an occupant shows during the current frame.
    OccupantAdvanced {
        /// Identifier of the occupant that advanced.
        occupant: OccupantId,
        /// Position read at the occupant's cursor before it advanced.
        position: Position,
        /// Display colour of the occupant.
        color: OccupantColor,
    },
    /// Announces that an occupant exhausted its path and left the active set.
    OccupantRetired {
        /// Identifier of the retired occupant.
        occupant: OccupantId,
    },
    /// Reports the population after the frame finished processing.
    PopulationChanged {
        /// Number of occupants still active.
        active: usize,
        /// Number of occupants admitted since the simulation started.
        admitted: u32,
    },
}

/// Immutable representation of a single occupant used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupantSnapshot {
    /// Unique identifier assigned to the occupant.
    pub id: OccupantId,
    /// Index of the next path position the occupant will show.
    pub cursor: usize,
    /// Total number of positions in the occupant's path.
    pub path_len: usize,
    /// Position at the cursor, absent once the path is exhausted.
    pub position: Option<Position>,
    /// Appearance assigned to the occupant.
    pub color: OccupantColor,
}

/// Read-only snapshot describing every active occupant.
#[derive(Clone, Debug, Default)]
pub struct OccupantView {
    snapshots: Vec<OccupantSnapshot>,
}

impl OccupantView {
    /// Creates a new occupant view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<OccupantSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &OccupantSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<OccupantSnapshot> {
        self.snapshots
    }
}

/// Population counters maintained by the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PopulationSnapshot {
    /// Occupants currently in the active set.
    pub active: usize,
    /// Occupants admitted since the simulation started.
    pub admitted: u32,
}

/// Drawable surface that receives occupant footprints and the live counter.
///
/// The engine only writes to the adapter; it never reads state back.
pub trait SceneAdapter {
    /// Shows or moves the footprint of an occupant.
    fn set_footprint(&mut self, occupant: OccupantId, position: Position, color: OccupantColor);

    /// Removes the footprint of an occupant from the scene.
    fn remove_footprint(&mut self, occupant: OccupantId);

    /// Replaces the population counter text.
    fn set_population_label(&mut self, text: &str);
}

/// Contract violations surfaced by the traffic engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrafficError {
    /// Interpolation was requested for a degenerate itinerary or step count.
    #[error(
        "cannot interpolate an itinerary of {key_frames} key-frames with {steps_per_segment} steps per segment"
    )]
    InvalidItinerary {
        /// Number of key-frames in the rejected itinerary.
        key_frames: usize,
        /// Step count supplied with the rejected itinerary.
        steps_per_segment: u32,
    },
}
