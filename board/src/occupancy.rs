//! Derived occupancy state rebuilt from the active challenge.

use rampart_core::{Challenge, GridPos, KnightId, TowerId, WallId};

/// Identity of the piece holding a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// Cell sealed by a placed wall piece.
    Wall(WallId),
    /// Cell held by a knight token.
    Knight(KnightId),
    /// Cell held by a high-tower endpoint.
    Tower(TowerId),
}

/// Dense cell-to-occupant map derived from the challenge entities.
///
/// The grid is never mutated incrementally; it is rebuilt from the placed
/// walls, knights and towers after every committed command so there is no
/// second copy of the placement state to drift.
#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<Occupant>>,
}

impl OccupancyGrid {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    pub(crate) fn rebuild_from(&mut self, challenge: &Challenge) {
        self.cells.fill(None);
        let bounds = challenge.size();

        for knight in challenge.knights() {
            self.occupy(knight.position(), Occupant::Knight(knight.id()));
        }

        for tower in challenge.towers() {
            if let Some((first, second)) = tower.endpoints(bounds) {
                self.occupy(first, Occupant::Tower(tower.id()));
                self.occupy(second, Occupant::Tower(tower.id()));
            }
        }

        for wall in challenge.walls() {
            let Some(anchor) = wall.anchor() else {
                continue;
            };
            let Some(cells) = wall.shape().anchored_cells(anchor, bounds) else {
                continue;
            };
            for cell in cells {
                self.occupy(cell, Occupant::Wall(wall.id()));
            }
        }
    }

    pub(crate) fn occupant(&self, cell: GridPos) -> Option<Occupant> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    fn occupy(&mut self, cell: GridPos, occupant: Occupant) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(occupant);
            }
        }
    }

    pub(crate) fn index(&self, cell: GridPos) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    pub(crate) fn cells(&self) -> &[Option<Occupant>] {
        &self.cells
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::{
        Challenge, GridSize, HighTower, Knight, KnightKind, Wall, WallShape,
    };

    #[test]
    fn rebuild_reflects_every_placed_entity() {
        let challenge = Challenge::new(
            "occupancy",
            GridSize::new(4, 4),
            vec![
                Wall::anchored(WallId::new(0), WallShape::Straight2H, GridPos::new(0, 3)),
                Wall::new(WallId::new(1), WallShape::Cross),
            ],
            vec![Knight::new(
                KnightId::new(0),
                KnightKind::Red,
                GridPos::new(3, 0),
            )],
            vec![HighTower::spanning(TowerId::new(0), true, GridPos::new(2, 1))],
        );

        let mut grid = OccupancyGrid::new(4, 4);
        grid.rebuild_from(&challenge);

        assert_eq!(
            grid.occupant(GridPos::new(0, 3)),
            Some(Occupant::Wall(WallId::new(0))),
        );
        assert_eq!(
            grid.occupant(GridPos::new(1, 3)),
            Some(Occupant::Wall(WallId::new(0))),
        );
        assert_eq!(
            grid.occupant(GridPos::new(3, 0)),
            Some(Occupant::Knight(KnightId::new(0))),
        );
        assert_eq!(
            grid.occupant(GridPos::new(2, 1)),
            Some(Occupant::Tower(TowerId::new(0))),
        );
        assert_eq!(
            grid.occupant(GridPos::new(2, 2)),
            Some(Occupant::Tower(TowerId::new(0))),
        );
        assert_eq!(grid.occupant(GridPos::new(0, 0)), None);
        assert_eq!(grid.occupant(GridPos::new(9, 9)), None);
    }

    #[test]
    fn palette_walls_leave_no_footprint() {
        let challenge = Challenge::new(
            "palette",
            GridSize::new(3, 3),
            vec![Wall::new(WallId::new(0), WallShape::Straight3V)],
            Vec::new(),
            Vec::new(),
        );

        let mut grid = OccupancyGrid::new(3, 3);
        grid.rebuild_from(&challenge);

        assert!(grid.cells().iter().all(Option::is_none));
    }
}
