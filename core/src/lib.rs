#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rampart engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative board, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the board executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! adapters to react to deterministically. The wall-shape catalog, including
//! the cells each shape seals and the ports where its barrier line ends, also
//! lives here so every crate reasons about connectivity from the same tables.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Rampart.";

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    column: u32,
    row: u32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the neighbouring position across the provided side.
    ///
    /// `None` indicates the neighbour would fall off the coordinate space
    /// entirely; callers still bound-check against a [`GridSize`].
    #[must_use]
    pub fn step(self, side: Side) -> Option<GridPos> {
        match side {
            Side::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Side::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Side::South => self
                .row
                .checked_add(1)
                .map(|row| Self::new(self.column, row)),
            Side::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }

    /// Translates the position by the provided cell offset.
    #[must_use]
    pub fn offset_by(self, offset: CellOffset) -> Option<GridPos> {
        let column = self.column.checked_add(offset.dx())?;
        let row = self.row.checked_add(offset.dy())?;
        Some(Self::new(column, row))
    }
}

/// Dimensions of the puzzle grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new grid size descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the provided position lies within the grid.
    #[must_use]
    pub const fn contains(&self, position: GridPos) -> bool {
        position.column() < self.columns && position.row() < self.rows
    }
}

/// Cardinal sides of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Side toward decreasing row indices.
    North,
    /// Side toward increasing column indices.
    East,
    /// Side toward increasing row indices.
    South,
    /// Side toward decreasing column indices.
    West,
}

impl Side {
    /// Returns the side facing back toward this one from a neighbouring cell.
    #[must_use]
    pub const fn opposite(self) -> Side {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Offset of a shape cell relative to the shape's top-left anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellOffset {
    dx: u32,
    dy: u32,
}

impl CellOffset {
    /// Creates a new cell offset.
    #[must_use]
    pub const fn new(dx: u32, dy: u32) -> Self {
        Self { dx, dy }
    }

    /// Column delta from the anchor.
    #[must_use]
    pub const fn dx(&self) -> u32 {
        self.dx
    }

    /// Row delta from the anchor.
    #[must_use]
    pub const fn dy(&self) -> u32 {
        self.dy
    }
}

/// Point where a shape's barrier line terminates at the piece boundary.
///
/// Closure requires every port to meet either the grid edge or a reciprocal
/// port exposed by the neighbouring barrier cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Port {
    cell: CellOffset,
    side: Side,
}

impl Port {
    /// Creates a new port descriptor.
    #[must_use]
    pub const fn new(cell: CellOffset, side: Side) -> Self {
        Self { cell, side }
    }

    /// Offset of the cell carrying the port, relative to the shape anchor.
    #[must_use]
    pub const fn cell(&self) -> CellOffset {
        self.cell
    }

    /// Side of the cell on which the barrier line terminates.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }
}

/// Unique identifier assigned to a wall piece within a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(u32);

impl WallId {
    /// Creates a new wall identifier with the provided numeric value.
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

/// Unique identifier assigned to a knight within a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KnightId(u32);

impl KnightId {
    /// Creates a new knight identifier with the provided numeric value.
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

/// Unique identifier assigned to a high tower within a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
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

/// Allegiance of a knight token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnightKind {
    /// Friendly knight that walls must shelter.
    Ally,
    /// Hostile knight that must not share a region with an ally.
    Red,
}

impl KnightKind {
    /// Reports whether the knight is a hostile red knight.
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }
}

const STRAIGHT2_H_CELLS: [CellOffset; 2] = [CellOffset::new(0, 0), CellOffset::new(1, 0)];
const STRAIGHT2_H_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(0, 0), Side::West),
    Port::new(CellOffset::new(1, 0), Side::East),
];

const STRAIGHT2_V_CELLS: [CellOffset; 2] = [CellOffset::new(0, 0), CellOffset::new(0, 1)];
const STRAIGHT2_V_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(0, 0), Side::North),
    Port::new(CellOffset::new(0, 1), Side::South),
];

const STRAIGHT3_H_CELLS: [CellOffset; 3] = [
    CellOffset::new(0, 0),
    CellOffset::new(1, 0),
    CellOffset::new(2, 0),
];
const STRAIGHT3_H_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(0, 0), Side::West),
    Port::new(CellOffset::new(2, 0), Side::East),
];

const STRAIGHT3_V_CELLS: [CellOffset; 3] = [
    CellOffset::new(0, 0),
    CellOffset::new(0, 1),
    CellOffset::new(0, 2),
];
const STRAIGHT3_V_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(0, 0), Side::North),
    Port::new(CellOffset::new(0, 2), Side::South),
];

const CORNER_NE_CELLS: [CellOffset; 3] = [
    CellOffset::new(0, 0),
    CellOffset::new(0, 1),
    CellOffset::new(1, 1),
];
const CORNER_NE_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(0, 0), Side::North),
    Port::new(CellOffset::new(1, 1), Side::East),
];

const CORNER_NW_CELLS: [CellOffset; 3] = [
    CellOffset::new(1, 0),
    CellOffset::new(0, 1),
    CellOffset::new(1, 1),
];
const CORNER_NW_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(1, 0), Side::North),
    Port::new(CellOffset::new(0, 1), Side::West),
];

const CORNER_SE_CELLS: [CellOffset; 3] = [
    CellOffset::new(0, 0),
    CellOffset::new(1, 0),
    CellOffset::new(0, 1),
];
const CORNER_SE_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(1, 0), Side::East),
    Port::new(CellOffset::new(0, 1), Side::South),
];

const CORNER_SW_CELLS: [CellOffset; 3] = [
    CellOffset::new(0, 0),
    CellOffset::new(1, 0),
    CellOffset::new(1, 1),
];
const CORNER_SW_PORTS: [Port; 2] = [
    Port::new(CellOffset::new(0, 0), Side::West),
    Port::new(CellOffset::new(1, 1), Side::South),
];

const CROSS_CELLS: [CellOffset; 5] = [
    CellOffset::new(1, 0),
    CellOffset::new(0, 1),
    CellOffset::new(1, 1),
    CellOffset::new(2, 1),
    CellOffset::new(1, 2),
];
const CROSS_PORTS: [Port; 4] = [
    Port::new(CellOffset::new(1, 0), Side::North),
    Port::new(CellOffset::new(0, 1), Side::West),
    Port::new(CellOffset::new(2, 1), Side::East),
    Port::new(CellOffset::new(1, 2), Side::South),
];

/// Catalog of wall-piece shapes with fixed orientations.
///
/// Corner variants are named after the two sides on which their barrier line
/// terminates; `CornerNE` runs from a northern port down and out through an
/// eastern port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallShape {
    /// Two-cell horizontal run.
    Straight2H,
    /// Two-cell vertical run.
    Straight2V,
    /// Three-cell horizontal run.
    Straight3H,
    /// Three-cell vertical run.
    Straight3V,
    /// Three-cell bend with north and east ports.
    CornerNE,
    /// Three-cell bend with north and west ports.
    CornerNW,
    /// Three-cell bend with south and east ports.
    CornerSE,
    /// Three-cell bend with south and west ports.
    CornerSW,
    /// Five-cell plus shape with ports on all four sides.
    Cross,
}

impl WallShape {
    /// Every shape in the catalog, in declaration order.
    pub const ALL: [WallShape; 9] = [
        Self::Straight2H,
        Self::Straight2V,
        Self::Straight3H,
        Self::Straight3V,
        Self::CornerNE,
        Self::CornerNW,
        Self::CornerSE,
        Self::CornerSW,
        Self::Cross,
    ];

    /// Cell offsets the shape seals when anchored at its top-left corner.
    #[must_use]
    pub const fn cells(self) -> &'static [CellOffset] {
        match self {
            Self::Straight2H => &STRAIGHT2_H_CELLS,
            Self::Straight2V => &STRAIGHT2_V_CELLS,
            Self::Straight3H => &STRAIGHT3_H_CELLS,
            Self::Straight3V => &STRAIGHT3_V_CELLS,
            Self::CornerNE => &CORNER_NE_CELLS,
            Self::CornerNW => &CORNER_NW_CELLS,
            Self::CornerSE => &CORNER_SE_CELLS,
            Self::CornerSW => &CORNER_SW_CELLS,
            Self::Cross => &CROSS_CELLS,
        }
    }

    /// Ports where the shape's barrier line terminates at the piece boundary.
    #[must_use]
    pub const fn ports(self) -> &'static [Port] {
        match self {
            Self::Straight2H => &STRAIGHT2_H_PORTS,
            Self::Straight2V => &STRAIGHT2_V_PORTS,
            Self::Straight3H => &STRAIGHT3_H_PORTS,
            Self::Straight3V => &STRAIGHT3_V_PORTS,
            Self::CornerNE => &CORNER_NE_PORTS,
            Self::CornerNW => &CORNER_NW_PORTS,
            Self::CornerSE => &CORNER_SE_PORTS,
            Self::CornerSW => &CORNER_SW_PORTS,
            Self::Cross => &CROSS_PORTS,
        }
    }

    /// Stable textual token used by the session codec.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Straight2H => "straight2h",
            Self::Straight2V => "straight2v",
            Self::Straight3H => "straight3h",
            Self::Straight3V => "straight3v",
            Self::CornerNE => "corner_ne",
            Self::CornerNW => "corner_nw",
            Self::CornerSE => "corner_se",
            Self::CornerSW => "corner_sw",
            Self::Cross => "cross",
        }
    }

    /// Resolves a codec token back into a shape, if it names one.
    #[must_use]
    pub fn from_token(token: &str) -> Option<WallShape> {
        Self::ALL.into_iter().find(|shape| shape.token() == token)
    }

    /// Absolute cells the shape occupies when anchored at `anchor`.
    ///
    /// `None` indicates that at least one cell falls outside `bounds` (or
    /// overflows the coordinate space), so the anchoring is invalid.
    #[must_use]
    pub fn anchored_cells(self, anchor: GridPos, bounds: GridSize) -> Option<Vec<GridPos>> {
        self.cells()
            .iter()
            .map(|offset| {
                anchor
                    .offset_by(*offset)
                    .filter(|cell| bounds.contains(*cell))
            })
            .collect()
    }

    /// Absolute port positions for the shape anchored at `anchor`.
    #[must_use]
    pub fn anchored_ports(self, anchor: GridPos, bounds: GridSize) -> Option<Vec<(GridPos, Side)>> {
        self.ports()
            .iter()
            .map(|port| {
                anchor
                    .offset_by(port.cell())
                    .filter(|cell| bounds.contains(*cell))
                    .map(|cell| (cell, port.side()))
            })
            .collect()
    }
}

/// Placeable wall piece belonging to a challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    id: WallId,
    shape: WallShape,
    anchor: Option<GridPos>,
}

impl Wall {
    /// Creates an unplaced wall resting on the palette.
    #[must_use]
    pub const fn new(id: WallId, shape: WallShape) -> Self {
        Self {
            id,
            shape,
            anchor: None,
        }
    }

    /// Creates a wall already anchored at the provided position.
    #[must_use]
    pub const fn anchored(id: WallId, shape: WallShape, anchor: GridPos) -> Self {
        Self {
            id,
            shape,
            anchor: Some(anchor),
        }
    }

    /// Identifier of the wall within its challenge.
    #[must_use]
    pub const fn id(&self) -> WallId {
        self.id
    }

    /// Shape definition of the wall piece.
    #[must_use]
    pub const fn shape(&self) -> WallShape {
        self.shape
    }

    /// Anchor cell of the wall, or `None` while it rests on the palette.
    #[must_use]
    pub const fn anchor(&self) -> Option<GridPos> {
        self.anchor
    }

    /// Reports whether the wall currently occupies the grid.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Moves the wall to a new anchor, or back to the palette with `None`.
    pub fn set_anchor(&mut self, anchor: Option<GridPos>) {
        self.anchor = anchor;
    }
}

/// Knight token with a fixed position for the duration of play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knight {
    id: KnightId,
    kind: KnightKind,
    position: GridPos,
}

impl Knight {
    /// Creates a new knight token.
    #[must_use]
    pub const fn new(id: KnightId, kind: KnightKind, position: GridPos) -> Self {
        Self { id, kind, position }
    }

    /// Identifier of the knight within its challenge.
    #[must_use]
    pub const fn id(&self) -> KnightId {
        self.id
    }

    /// Allegiance of the knight.
    #[must_use]
    pub const fn kind(&self) -> KnightKind {
        self.kind
    }

    /// Cell occupied by the knight.
    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.position
    }
}

/// Fixed two-endpoint boundary segment.
///
/// The second endpoint is derived from the anchor and orientation, so a
/// tower either has both endpoints or neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighTower {
    id: TowerId,
    vertical: bool,
    anchor: Option<GridPos>,
}

impl HighTower {
    /// Creates an unplaced high tower resting on the palette.
    #[must_use]
    pub const fn new(id: TowerId, vertical: bool) -> Self {
        Self {
            id,
            vertical,
            anchor: None,
        }
    }

    /// Creates a high tower spanning from the provided anchor.
    #[must_use]
    pub const fn spanning(id: TowerId, vertical: bool, anchor: GridPos) -> Self {
        Self {
            id,
            vertical,
            anchor: Some(anchor),
        }
    }

    /// Identifier of the tower within its challenge.
    #[must_use]
    pub const fn id(&self) -> TowerId {
        self.id
    }

    /// Reports whether the tower spans vertically rather than horizontally.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// First endpoint of the tower, or `None` while unplaced.
    #[must_use]
    pub const fn first_position(&self) -> Option<GridPos> {
        self.anchor
    }

    /// Second endpoint of the tower, one cell along its axis from the first.
    #[must_use]
    pub fn second_position(&self) -> Option<GridPos> {
        let side = if self.vertical {
            Side::South
        } else {
            Side::East
        };
        self.anchor.and_then(|anchor| anchor.step(side))
    }

    /// Reports whether both endpoints currently occupy the grid.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Both endpoints of the tower when placed inside `bounds`.
    #[must_use]
    pub fn endpoints(&self, bounds: GridSize) -> Option<(GridPos, GridPos)> {
        let first = self.anchor?;
        let second = self.second_position()?;
        if bounds.contains(first) && bounds.contains(second) {
            Some((first, second))
        } else {
            None
        }
    }
}

/// One puzzle instance: grid dimensions plus wall, knight and tower entities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    name: String,
    size: GridSize,
    walls: Vec<Wall>,
    knights: Vec<Knight>,
    towers: Vec<HighTower>,
}

impl Challenge {
    /// Creates a new challenge from its constituent entities.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        size: GridSize,
        walls: Vec<Wall>,
        knights: Vec<Knight>,
        towers: Vec<HighTower>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            walls,
            knights,
            towers,
        }
    }

    /// Name identifying the challenge within its campaign.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimensions of the challenge grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Wall pieces belonging to the challenge, in template order.
    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Knight tokens belonging to the challenge, in template order.
    #[must_use]
    pub fn knights(&self) -> &[Knight] {
        &self.knights
    }

    /// High towers belonging to the challenge, in template order.
    #[must_use]
    pub fn towers(&self) -> &[HighTower] {
        &self.towers
    }

    /// Looks up a wall by identifier.
    #[must_use]
    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.iter().find(|wall| wall.id() == id)
    }

    /// Moves the identified wall to a new anchor (or the palette with `None`).
    ///
    /// Returns `false` when no wall carries the identifier.
    pub fn set_wall_anchor(&mut self, id: WallId, anchor: Option<GridPos>) -> bool {
        match self.walls.iter_mut().find(|wall| wall.id() == id) {
            Some(wall) => {
                wall.set_anchor(anchor);
                true
            }
            None => false,
        }
    }

    /// Returns every wall to the palette.
    pub fn reset_walls(&mut self) {
        for wall in &mut self.walls {
            wall.set_anchor(None);
        }
    }

    /// Deep copy for a play session, with every wall back on the palette.
    #[must_use]
    pub fn play_copy(&self) -> Challenge {
        let mut copy = self.clone();
        copy.reset_walls();
        copy
    }

    /// Deep copy preserving the authored wall placements.
    #[must_use]
    pub fn solution_copy(&self) -> Challenge {
        self.clone()
    }
}

/// Commands that express all permissible board mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active challenge with the provided working copy.
    LoadChallenge {
        /// Working copy the board should adopt.
        challenge: Challenge,
    },
    /// Requests placement of a wall anchored at the provided cell.
    PlaceWall {
        /// Identifier of the wall attempting to occupy the grid.
        wall: WallId,
        /// Anchor cell for the wall's shape.
        target: GridPos,
    },
    /// Requests that a wall return to the palette.
    ReturnWall {
        /// Identifier of the wall leaving the grid.
        wall: WallId,
    },
    /// Requests that every wall return to the palette.
    ResetWalls,
}

/// Events broadcast by the board after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a new working challenge became active.
    ChallengeLoaded {
        /// Name of the challenge that was loaded.
        name: String,
    },
    /// Confirms that a wall was anchored on the grid.
    WallPlaced {
        /// Identifier of the wall that was placed.
        wall: WallId,
        /// Anchor cell the wall now occupies.
        anchor: GridPos,
    },
    /// Reports that a wall placement request was rejected.
    WallPlacementRejected {
        /// Identifier of the wall that attempted placement.
        wall: WallId,
        /// Anchor cell provided in the placement request.
        target: GridPos,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a wall returned to the palette.
    WallReturned {
        /// Identifier of the wall that left the grid.
        wall: WallId,
    },
    /// Reports that a wall return request was rejected.
    WallReturnRejected {
        /// Identifier of the wall targeted by the request.
        wall: WallId,
        /// Specific reason the return failed.
        reason: RemovalError,
    },
    /// Confirms that every wall returned to the palette.
    WallsReset,
}

/// Reasons a wall placement request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// No wall with the provided identifier exists in the challenge.
    MissingWall,
    /// The shape's footprint extends beyond the grid bounds.
    OutOfBounds,
    /// The shape's footprint overlaps a cell held by another placed piece.
    Occupied,
}

/// Reasons a wall return request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalError {
    /// No wall with the provided identifier exists in the challenge.
    MissingWall,
}
