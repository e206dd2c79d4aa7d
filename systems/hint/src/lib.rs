#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure hint system responsible for emitting wall placement commands.
//!
//! The system compares the working challenge against the solution copy kept
//! alongside it and proposes the single command batch that moves one wall to
//! its authored anchor. It never mutates state itself; the board decides by
//! executing the emitted commands.

use rampart_core::{Challenge, Command, GridPos, WallId};

/// Consumes the working and solution challenges to emit hint commands.
///
/// The `is_placeable` closure should mirror the semantics of the board's
/// `query::is_wall_placeable` helper. When the chosen wall's authored anchor
/// is currently blocked, a [`Command::ResetWalls`] precedes the placement so
/// the hint always lands.
pub fn suggest_wall<F>(
    challenge: &Challenge,
    solution: &Challenge,
    mut is_placeable: F,
    out: &mut Vec<Command>,
) where
    F: FnMut(WallId, GridPos) -> bool,
{
    let Some((wall, target)) = next_divergent_wall(challenge, solution) else {
        return;
    };

    if !is_placeable(wall, target) {
        out.push(Command::ResetWalls);
    }
    out.push(Command::PlaceWall { wall, target });
}

/// First wall, in template order, whose anchor differs from the solution.
fn next_divergent_wall(challenge: &Challenge, solution: &Challenge) -> Option<(WallId, GridPos)> {
    for authored in solution.walls() {
        let Some(target) = authored.anchor() else {
            continue;
        };
        let current = challenge.wall(authored.id())?;
        if current.anchor() != Some(target) {
            return Some((authored.id(), target));
        }
    }
    None
}
