use rampart_board::{apply, query, Board};
use rampart_core::{
    Challenge, Command, GridPos, GridSize, Wall, WallId, WallShape,
};
use rampart_system_hint::suggest_wall;

fn solution() -> Challenge {
    Challenge::new(
        "hinted",
        GridSize::new(3, 4),
        vec![
            Wall::anchored(WallId::new(0), WallShape::Straight2V, GridPos::new(1, 0)),
            Wall::anchored(WallId::new(1), WallShape::Straight2V, GridPos::new(1, 2)),
        ],
        Vec::new(),
        Vec::new(),
    )
}

#[test]
fn hint_places_the_first_unsolved_wall() {
    let solution = solution();
    let board = Board::new(solution.play_copy());
    let mut commands = Vec::new();

    suggest_wall(
        query::challenge(&board),
        &solution,
        |wall, target| query::is_wall_placeable(&board, wall, target),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceWall {
            wall: WallId::new(0),
            target: GridPos::new(1, 0),
        }],
    );
}

#[test]
fn hint_resets_first_when_the_authored_anchor_is_blocked() {
    let solution = solution();
    let mut board = Board::new(solution.play_copy());
    let mut events = Vec::new();

    // Park the second wall over the first wall's authored anchor.
    apply(
        &mut board,
        Command::PlaceWall {
            wall: WallId::new(1),
            target: GridPos::new(1, 0),
        },
        &mut events,
    );

    let mut commands = Vec::new();
    suggest_wall(
        query::challenge(&board),
        &solution,
        |wall, target| query::is_wall_placeable(&board, wall, target),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::ResetWalls,
            Command::PlaceWall {
                wall: WallId::new(0),
                target: GridPos::new(1, 0),
            },
        ],
    );

    // Executing the batch leaves the hinted wall on its authored anchor.
    for command in commands {
        apply(&mut board, command, &mut events);
    }
    assert_eq!(
        query::challenge(&board).wall(WallId::new(0)).unwrap().anchor(),
        Some(GridPos::new(1, 0)),
    );
}

#[test]
fn hint_is_silent_once_the_board_matches_the_solution() {
    let solution = solution();
    let board = Board::new(solution.solution_copy());
    let mut commands = Vec::new();

    suggest_wall(
        query::challenge(&board),
        &solution,
        |wall, target| query::is_wall_placeable(&board, wall, target),
        &mut commands,
    );

    assert!(commands.is_empty(), "nothing to hint on a solved board");
}

#[test]
fn hint_advances_to_the_next_wall_after_one_is_solved() {
    let solution = solution();
    let mut board = Board::new(solution.play_copy());
    let mut events = Vec::new();

    apply(
        &mut board,
        Command::PlaceWall {
            wall: WallId::new(0),
            target: GridPos::new(1, 0),
        },
        &mut events,
    );

    let mut commands = Vec::new();
    suggest_wall(
        query::challenge(&board),
        &solution,
        |wall, target| query::is_wall_placeable(&board, wall, target),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceWall {
            wall: WallId::new(1),
            target: GridPos::new(1, 2),
        }],
    );
}
