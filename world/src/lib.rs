#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative occupant registry for the LifeTime traffic engine.
//!
//! The world owns every active occupant together with the admission counter.
//! It is mutated exclusively through [`apply`] by a single driver and exposes
//! read-only access through the [`query`] module.

use lifetime_traffic_core::{
    Command, Event, FrameIndex, Itinerary, OccupantColor, OccupantId, Path, Position,
};

/// Lifecycle state of an occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OccupantState {
    /// The cursor still points inside the occupant's path.
    Active,
    /// The cursor reached the end of the path; the state is terminal.
    Retired,
}

#[derive(Debug)]
struct Occupant {
    id: OccupantId,
    itinerary: Itinerary,
    path: Path,
    cursor: usize,
    color: OccupantColor,
}

impl Occupant {
    fn new(id: OccupantId, itinerary: Itinerary, path: Path, color: OccupantColor) -> Self {
        Self {
            id,
            itinerary,
            path,
            cursor: 0,
            color,
        }
    }

    fn state(&self) -> OccupantState {
        if self.cursor < self.path.len() {
            OccupantState::Active
        } else {
            OccupantState::Retired
        }
    }

    /// Yields the position at the cursor and moves the cursor forward by one.
    fn advance(&mut self) -> Option<Position> {
        let position = self.path.get(self.cursor)?;
        self.cursor += 1;
        Some(position)
    }
}

/// Represents the authoritative registry of simulated occupants.
#[derive(Debug, Default)]
pub struct World {
    occupants: Vec<Occupant>,
    next_occupant_id: u32,
    admitted: u32,
    last_frame: Option<FrameIndex>,
}

impl World {
    /// Creates an empty registry ready for simulation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> OccupantId {
        let id = OccupantId::new(self.next_occupant_id);
        self.next_occupant_id = self.next_occupant_id.saturating_add(1);
        id
    }

    fn advance_occupants(&mut self, out_events: &mut Vec<Event>) {
        for occupant in &mut self.occupants {
            if let Some(position) = occupant.advance() {
                out_events.push(Event::OccupantAdvanced {
                    occupant: occupant.id,
                    position,
                    color: occupant.color,
                });
            }
        }
    }

    fn retire_exhausted(&mut self, out_events: &mut Vec<Event>) {
        let mut retired = Vec::new();
        self.occupants.retain(|occupant| match occupant.state() {
            OccupantState::Active => true,
            OccupantState::Retired => {
                retired.push(occupant.id);
                false
            }
        });

        out_events.extend(
            retired
                .into_iter()
                .map(|occupant| Event::OccupantRetired { occupant }),
        );
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AdmitOccupant {
            itinerary,
            path,
            color,
        } => {
            let occupant = world.allocate_id();
            world.admitted = world.admitted.saturating_add(1);
            let origin = path
                .get(0)
                .or_else(|| itinerary.first())
                .unwrap_or_default();
            world
                .occupants
                .push(Occupant::new(occupant, itinerary, path, color));
            out_events.push(Event::OccupantAdmitted {
                occupant,
                origin,
                color,
            });
        }
        Command::Tick { frame } => {
            world.last_frame = Some(frame);
            out_events.push(Event::TimeAdvanced { frame });
            world.advance_occupants(out_events);
            world.retire_exhausted(out_events);
            out_events.push(Event::PopulationChanged {
                active: world.occupants.len(),
                admitted: world.admitted,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lifetime_traffic_core::{
        FrameIndex, Itinerary, OccupantId, OccupantSnapshot, OccupantView, PopulationSnapshot,
    };

    use super::{OccupantState, World};

    /// Reports the active and admitted population counters.
    #[must_use]
    pub fn population(world: &World) -> PopulationSnapshot {
        PopulationSnapshot {
            active: world.occupants.len(),
            admitted: world.admitted,
        }
    }

    /// Captures a read-only view of every active occupant.
    #[must_use]
    pub fn occupant_view(world: &World) -> OccupantView {
        let snapshots = world
            .occupants
            .iter()
            .map(|occupant| OccupantSnapshot {
                id: occupant.id,
                cursor: occupant.cursor,
                path_len: occupant.path.len(),
                position: occupant.path.get(occupant.cursor),
                color: occupant.color,
            })
            .collect();
        OccupantView::from_snapshots(snapshots)
    }

    /// Lifecycle state of the occupant, or `None` once it left the registry.
    #[must_use]
    pub fn occupant_state(world: &World, occupant: OccupantId) -> Option<OccupantState> {
        world
            .occupants
            .iter()
            .find(|candidate| candidate.id == occupant)
            .map(super::Occupant::state)
    }

    /// Itinerary the occupant was admitted with, while it remains active.
    #[must_use]
    pub fn itinerary(world: &World, occupant: OccupantId) -> Option<&Itinerary> {
        world
            .occupants
            .iter()
            .find(|candidate| candidate.id == occupant)
            .map(|candidate| &candidate.itinerary)
    }

    /// Most recent frame processed by the world.
    #[must_use]
    pub fn last_frame(world: &World) -> Option<FrameIndex> {
        world.last_frame
    }
}
