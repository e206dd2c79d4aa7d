#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Rampart.
//!
//! The board owns the working copy of one challenge. Adapters submit
//! [`Command`] values through [`apply`]; the board validates them against the
//! derived occupancy grid, commits the ones that hold, and answers every
//! request with [`Event`] values. Placement refusal is an ordinary event
//! carrying a [`PlacementError`] reason, never a Rust error.

mod occupancy;

pub use occupancy::Occupant;

use occupancy::OccupancyGrid;
use rampart_core::{
    Challenge, Command, Event, GridPos, PlacementError, RemovalError, WallId, WELCOME_BANNER,
};

/// Represents the authoritative play-state for one challenge.
#[derive(Debug)]
pub struct Board {
    challenge: Challenge,
    occupancy: OccupancyGrid,
    banner: &'static str,
}

impl Board {
    /// Creates a board playing the provided working challenge.
    #[must_use]
    pub fn new(challenge: Challenge) -> Self {
        let size = challenge.size();
        let mut occupancy = OccupancyGrid::new(size.columns(), size.rows());
        occupancy.rebuild_from(&challenge);
        Self {
            challenge,
            occupancy,
            banner: WELCOME_BANNER,
        }
    }

    fn rebuild_occupancy(&mut self) {
        self.occupancy.rebuild_from(&self.challenge);
    }

    fn adopt(&mut self, challenge: Challenge) {
        let size = challenge.size();
        self.occupancy = OccupancyGrid::new(size.columns(), size.rows());
        self.challenge = challenge;
        self.rebuild_occupancy();
    }

    /// Validates a placement without touching any state.
    ///
    /// Cells already held by the moving wall itself are treated as free so
    /// that re-placing a piece over its current footprint always succeeds.
    fn validate_placement(&self, wall: WallId, target: GridPos) -> Result<(), PlacementError> {
        let piece = self
            .challenge
            .wall(wall)
            .ok_or(PlacementError::MissingWall)?;
        let cells = piece
            .shape()
            .anchored_cells(target, self.challenge.size())
            .ok_or(PlacementError::OutOfBounds)?;

        for cell in cells {
            match self.occupancy.occupant(cell) {
                Some(Occupant::Wall(id)) if id == wall => {}
                Some(_) => return Err(PlacementError::Occupied),
                None => {}
            }
        }

        Ok(())
    }
}

/// Applies the provided command to the board, mutating state deterministically.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadChallenge { challenge } => {
            let name = challenge.name().to_owned();
            board.adopt(challenge);
            out_events.push(Event::ChallengeLoaded { name });
        }
        Command::PlaceWall { wall, target } => match board.validate_placement(wall, target) {
            Ok(()) => {
                let _ = board.challenge.set_wall_anchor(wall, Some(target));
                board.rebuild_occupancy();
                out_events.push(Event::WallPlaced {
                    wall,
                    anchor: target,
                });
            }
            Err(reason) => {
                out_events.push(Event::WallPlacementRejected {
                    wall,
                    target,
                    reason,
                });
            }
        },
        Command::ReturnWall { wall } => {
            if board.challenge.set_wall_anchor(wall, None) {
                board.rebuild_occupancy();
                out_events.push(Event::WallReturned { wall });
            } else {
                out_events.push(Event::WallReturnRejected {
                    wall,
                    reason: RemovalError::MissingWall,
                });
            }
        }
        Command::ResetWalls => {
            board.challenge.reset_walls();
            board.rebuild_occupancy();
            out_events.push(Event::WallsReset);
        }
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use super::{Board, Occupant};
    use rampart_core::{Challenge, GridPos, PlacementError, WallId};

    /// Provides read-only access to the working challenge.
    #[must_use]
    pub fn challenge(board: &Board) -> &Challenge {
        &board.challenge
    }

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(board: &Board) -> &'static str {
        board.banner
    }

    /// Reports whether the wall's shape may be anchored at `target`.
    ///
    /// Pure query over the current occupancy; the board is not mutated.
    #[must_use]
    pub fn is_wall_placeable(board: &Board, wall: WallId, target: GridPos) -> bool {
        board.validate_placement(wall, target).is_ok()
    }

    /// Detailed placement verdict mirroring [`is_wall_placeable`].
    pub fn placement(board: &Board, wall: WallId, target: GridPos) -> Result<(), PlacementError> {
        board.validate_placement(wall, target)
    }

    /// Returns the wall sealing the provided cell, if any.
    #[must_use]
    pub fn wall_at(board: &Board, cell: GridPos) -> Option<WallId> {
        match board.occupancy.occupant(cell) {
            Some(Occupant::Wall(id)) => Some(id),
            _ => None,
        }
    }

    /// Exposes a read-only view of the dense occupancy grid.
    #[must_use]
    pub fn occupancy_view(board: &Board) -> OccupancyView<'_> {
        OccupancyView { board }
    }

    /// Read-only view into the dense occupancy grid.
    #[derive(Clone, Copy, Debug)]
    pub struct OccupancyView<'a> {
        board: &'a Board,
    }

    impl<'a> OccupancyView<'a> {
        /// Returns the piece occupying the provided cell, if any.
        #[must_use]
        pub fn occupant(&self, cell: GridPos) -> Option<Occupant> {
            self.board.occupancy.occupant(cell)
        }

        /// Reports whether the cell is currently free.
        #[must_use]
        pub fn is_free(&self, cell: GridPos) -> bool {
            self.board.occupancy.occupant(cell).is_none()
        }

        /// Returns an iterator over all cells in row-major order.
        pub fn iter(&self) -> impl Iterator<Item = Option<Occupant>> + 'a {
            self.board.occupancy.cells().iter().copied()
        }

        /// Provides the dimensions of the underlying occupancy grid.
        #[must_use]
        pub fn dimensions(&self) -> (u32, u32) {
            self.board.occupancy.dimensions()
        }
    }
}
