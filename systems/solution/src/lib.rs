#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure solution validator for Rampart challenges.
//!
//! Validation runs in two phases. The closure phase checks that the placed
//! barriers partition the grid without gaps: every piece must be on the grid
//! and every port must meet the grid edge or a reciprocal port on the
//! neighbouring barrier cell. Only once closure holds does the enclosure
//! phase flood-fill the open cells into regions and test each red knight
//! against the allies sharing its region. The verdict depends solely on the
//! current positions, never on placement history.

use std::collections::VecDeque;

use rampart_core::{Challenge, GridPos, KnightId, Side};

/// Three-way outcome of checking a challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The barriers leave at least one gap, or a piece is still unplaced.
    Unclosed,
    /// The barriers close, but the listed red knights share a region with an
    /// ally. The list is non-empty and sorted by knight identifier.
    Mistakes(Vec<KnightId>),
    /// The barriers close and every red knight is correctly isolated.
    Solved,
}

impl Verdict {
    /// Reports whether the verdict represents a solved challenge.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved)
    }
}

const SIDES: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

const fn side_bit(side: Side) -> u8 {
    match side {
        Side::North => 0b0001,
        Side::East => 0b0010,
        Side::South => 0b0100,
        Side::West => 0b1000,
    }
}

/// Dense barrier map derived from the placed walls and towers.
struct BarrierMap {
    columns: u32,
    rows: u32,
    barrier: Vec<bool>,
    port_masks: Vec<u8>,
}

impl BarrierMap {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            barrier: vec![false; capacity],
            port_masks: vec![0; capacity],
        }
    }

    fn index(&self, cell: GridPos) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn seal(&mut self, cell: GridPos) {
        if let Some(index) = self.index(cell) {
            self.barrier[index] = true;
        }
    }

    fn open_port(&mut self, cell: GridPos, side: Side) {
        if let Some(index) = self.index(cell) {
            self.port_masks[index] |= side_bit(side);
        }
    }

    fn is_barrier(&self, cell: GridPos) -> bool {
        self.index(cell).is_some_and(|index| self.barrier[index])
    }

    fn has_port(&self, cell: GridPos, side: Side) -> bool {
        self.index(cell)
            .is_some_and(|index| self.port_masks[index] & side_bit(side) != 0)
    }

    /// Reports whether the port at `(cell, side)` meets a sealing partner.
    fn port_is_matched(&self, cell: GridPos, side: Side) -> bool {
        let Some(neighbour) = cell.step(side) else {
            return true;
        };
        if neighbour.column() >= self.columns || neighbour.row() >= self.rows {
            return true;
        }
        self.is_barrier(neighbour) && self.has_port(neighbour, side.opposite())
    }
}

/// Builds the barrier map, or reports `None` when a piece is unplaced or
/// resolves outside the grid.
fn build_barriers(challenge: &Challenge) -> Option<BarrierMap> {
    let size = challenge.size();
    let mut map = BarrierMap::new(size.columns(), size.rows());

    for wall in challenge.walls() {
        let anchor = wall.anchor()?;
        let cells = wall.shape().anchored_cells(anchor, size)?;
        for cell in cells {
            map.seal(cell);
        }
        for (cell, side) in wall.shape().anchored_ports(anchor, size)? {
            map.open_port(cell, side);
        }
    }

    for tower in challenge.towers() {
        let (first, second) = tower.endpoints(size)?;
        map.seal(first);
        map.seal(second);
        if tower.is_vertical() {
            map.open_port(first, Side::North);
            map.open_port(second, Side::South);
        } else {
            map.open_port(first, Side::West);
            map.open_port(second, Side::East);
        }
    }

    Some(map)
}

/// Labels the open cells with region identifiers via breadth-first search.
fn label_regions(map: &BarrierMap) -> Vec<Option<u32>> {
    let cell_count = map.barrier.len();
    let mut regions: Vec<Option<u32>> = vec![None; cell_count];
    let mut next_region = 0;
    let mut frontier = VecDeque::new();

    for row in 0..map.rows {
        for column in 0..map.columns {
            let seed = GridPos::new(column, row);
            let Some(seed_index) = map.index(seed) else {
                continue;
            };
            if map.barrier[seed_index] || regions[seed_index].is_some() {
                continue;
            }

            regions[seed_index] = Some(next_region);
            frontier.push_back(seed);

            while let Some(cell) = frontier.pop_front() {
                for side in SIDES {
                    let Some(neighbour) = cell.step(side) else {
                        continue;
                    };
                    let Some(index) = map.index(neighbour) else {
                        continue;
                    };
                    if map.barrier[index] || regions[index].is_some() {
                        continue;
                    }
                    regions[index] = Some(next_region);
                    frontier.push_back(neighbour);
                }
            }

            next_region += 1;
        }
    }

    regions
}

/// Checks the challenge against its win rule.
///
/// Returns [`Verdict::Unclosed`] when any wall or tower is still on the
/// palette or any port is unmatched; otherwise reports the red knights that
/// share a region with an ally, sorted by identifier, or
/// [`Verdict::Solved`] when there are none.
#[must_use]
pub fn check_solution(challenge: &Challenge) -> Verdict {
    // A challenge with no barrier pieces at all can never close.
    if challenge.walls().is_empty() && challenge.towers().is_empty() {
        return Verdict::Unclosed;
    }

    let Some(map) = build_barriers(challenge) else {
        return Verdict::Unclosed;
    };

    for wall in challenge.walls() {
        let Some(anchor) = wall.anchor() else {
            return Verdict::Unclosed;
        };
        let Some(ports) = wall.shape().anchored_ports(anchor, challenge.size()) else {
            return Verdict::Unclosed;
        };
        for (cell, side) in ports {
            if !map.port_is_matched(cell, side) {
                return Verdict::Unclosed;
            }
        }
    }

    for tower in challenge.towers() {
        let Some((first, second)) = tower.endpoints(challenge.size()) else {
            return Verdict::Unclosed;
        };
        let (first_side, second_side) = if tower.is_vertical() {
            (Side::North, Side::South)
        } else {
            (Side::West, Side::East)
        };
        if !map.port_is_matched(first, first_side) || !map.port_is_matched(second, second_side) {
            return Verdict::Unclosed;
        }
    }

    let regions = label_regions(&map);
    let region_of = |position: GridPos| -> Option<u32> {
        map.index(position).and_then(|index| regions[index])
    };

    let mut ally_regions: Vec<u32> = Vec::new();
    for knight in challenge.knights() {
        if knight.kind().is_red() {
            continue;
        }
        match region_of(knight.position()) {
            // A knight buried under a barrier only occurs in hand-edited
            // session data; the arrangement cannot be judged.
            None => return Verdict::Unclosed,
            Some(region) => ally_regions.push(region),
        }
    }

    let mut incorrect: Vec<KnightId> = Vec::new();
    for knight in challenge.knights() {
        if !knight.kind().is_red() {
            continue;
        }
        match region_of(knight.position()) {
            None => return Verdict::Unclosed,
            Some(region) => {
                if ally_regions.contains(&region) {
                    incorrect.push(knight.id());
                }
            }
        }
    }

    if incorrect.is_empty() {
        Verdict::Solved
    } else {
        incorrect.sort_unstable();
        Verdict::Mistakes(incorrect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::{CellOffset, WallShape};

    #[test]
    fn side_bits_are_distinct() {
        let mut seen = 0u8;
        for side in SIDES {
            assert_eq!(seen & side_bit(side), 0);
            seen |= side_bit(side);
        }
    }

    #[test]
    fn ports_at_the_grid_edge_are_matched() {
        let mut map = BarrierMap::new(2, 2);
        map.seal(GridPos::new(0, 0));
        map.open_port(GridPos::new(0, 0), Side::North);
        map.open_port(GridPos::new(0, 0), Side::East);

        assert!(map.port_is_matched(GridPos::new(0, 0), Side::North));
        assert!(
            !map.port_is_matched(GridPos::new(0, 0), Side::East),
            "open cell to the east leaves the port dangling",
        );
    }

    #[test]
    fn reciprocal_ports_match_and_flanks_do_not() {
        let mut map = BarrierMap::new(3, 1);
        map.seal(GridPos::new(0, 0));
        map.open_port(GridPos::new(0, 0), Side::East);
        map.seal(GridPos::new(1, 0));

        assert!(
            !map.port_is_matched(GridPos::new(0, 0), Side::East),
            "a barrier flank without a port is not a connection",
        );

        map.open_port(GridPos::new(1, 0), Side::West);
        assert!(map.port_is_matched(GridPos::new(0, 0), Side::East));
    }

    #[test]
    fn cross_ports_cover_all_four_sides() {
        let sides: Vec<_> = WallShape::Cross.ports().iter().map(|p| p.side()).collect();
        assert_eq!(sides, vec![Side::North, Side::West, Side::East, Side::South]);
        assert_eq!(
            WallShape::Cross.ports()[0].cell(),
            CellOffset::new(1, 0),
        );
    }
}
