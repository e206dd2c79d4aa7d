//! Line-based wall-layout codec used for session crash recovery.

use std::collections::HashSet;

use rampart_core::{Challenge, GridPos, WallShape};
use thiserror::Error;

const LAYOUT_DOMAIN: &str = "rampart";
const LAYOUT_VERSION: &str = "v1";

/// Identifier prefix emitted before every encoded layout line.
pub(crate) const LAYOUT_HEADER: &str = "rampart:v1";
/// Delimiter separating the prefix, version, dimensions and wall list.
const FIELD_DELIMITER: char = ':';
/// Delimiter separating a wall token's shape from its anchor.
const ANCHOR_DELIMITER: char = '@';
/// Token marking a wall that rests on the palette.
const PALETTE_TOKEN: &str = "-";

/// Errors that can occur while decoding persisted session text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The provided text was empty or contained only whitespace.
    #[error("session payload was empty")]
    Empty,
    /// The layout line was missing the domain prefix.
    #[error("layout line is missing the domain prefix")]
    MissingPrefix,
    /// The layout line used an unexpected domain prefix.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The layout line did not contain a version segment.
    #[error("layout line is missing the version")]
    MissingVersion,
    /// The layout line used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The layout line did not include grid dimensions.
    #[error("layout line is missing the grid dimensions")]
    MissingDimensions,
    /// The grid dimensions could not be parsed.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The layout line did not include the wall list segment.
    #[error("layout line is missing the wall list")]
    MissingWalls,
    /// A wall token did not split into shape and anchor fields.
    #[error("wall token '{0}' does not have shape and anchor fields")]
    MalformedWall(String),
    /// A wall token carried a non-numeric anchor position.
    #[error("wall token '{0}' has a non-numeric anchor")]
    InvalidAnchor(String),
    /// A wall token named a shape outside the catalog.
    #[error("unknown wall shape token '{0}'")]
    UnknownShape(String),
    /// The layout's grid dimensions disagree with the challenge.
    #[error("layout grid is {found_columns}x{found_rows} but the challenge is {expected_columns}x{expected_rows}")]
    GridMismatch {
        /// Columns of the challenge grid.
        expected_columns: u32,
        /// Rows of the challenge grid.
        expected_rows: u32,
        /// Columns recorded in the layout.
        found_columns: u32,
        /// Rows recorded in the layout.
        found_rows: u32,
    },
    /// The layout holds a different number of walls than the challenge.
    #[error("layout holds {found} walls but the challenge has {expected}")]
    WallCountMismatch {
        /// Walls present in the challenge template.
        expected: usize,
        /// Walls present in the decoded layout.
        found: usize,
    },
    /// A layout wall's shape disagrees with the challenge template.
    #[error("layout wall {index} is a {found:?} but the challenge expects {expected:?}")]
    ShapeMismatch {
        /// Zero-based wall index in template order.
        index: usize,
        /// Shape recorded in the challenge template.
        expected: WallShape,
        /// Shape recorded in the decoded layout.
        found: WallShape,
    },
    /// A layout anchor does not fit the wall's shape on the grid.
    #[error("layout wall {index} does not fit on the grid at its anchor")]
    AnchorOutOfBounds {
        /// Zero-based wall index in template order.
        index: usize,
    },
    /// Two layout anchors seal the same grid cell.
    #[error("layout wall {index} overlaps an earlier wall")]
    OverlappingWalls {
        /// Zero-based wall index in template order.
        index: usize,
    },
    /// The session text lacked one of its two layout lines.
    #[error("session text is missing the {0} line")]
    MissingLine(&'static str),
    /// A progress flag was neither `'0'` nor `'1'`.
    #[error("progress flag '{0}' is not '0' or '1'")]
    InvalidFlag(char),
}

/// Shape and anchor captured for a single wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallLayoutEntry {
    /// Shape definition of the wall piece.
    pub shape: WallShape,
    /// Anchor cell, or `None` while the wall rests on the palette.
    pub anchor: Option<GridPos>,
}

/// Snapshot of a challenge's mutable wall state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallLayout {
    /// Number of grid columns recorded alongside the walls.
    pub columns: u32,
    /// Number of grid rows recorded alongside the walls.
    pub rows: u32,
    /// Wall entries in challenge template order.
    pub walls: Vec<WallLayoutEntry>,
}

impl WallLayout {
    /// Captures the wall state of the provided challenge.
    #[must_use]
    pub fn capture(challenge: &Challenge) -> Self {
        Self {
            columns: challenge.size().columns(),
            rows: challenge.size().rows(),
            walls: challenge
                .walls()
                .iter()
                .map(|wall| WallLayoutEntry {
                    shape: wall.shape(),
                    anchor: wall.anchor(),
                })
                .collect(),
        }
    }

    /// Encodes the layout into a single stable line.
    #[must_use]
    pub fn encode(&self) -> String {
        let tokens: Vec<String> = self
            .walls
            .iter()
            .map(|entry| match entry.anchor {
                Some(anchor) => format!(
                    "{}{ANCHOR_DELIMITER}{},{}",
                    entry.shape.token(),
                    anchor.column(),
                    anchor.row(),
                ),
                None => format!("{}{ANCHOR_DELIMITER}{PALETTE_TOKEN}", entry.shape.token()),
            })
            .collect();
        format!(
            "{LAYOUT_HEADER}{FIELD_DELIMITER}{}x{}{FIELD_DELIMITER}{}",
            self.columns,
            self.rows,
            tokens.join(" "),
        )
    }

    /// Decodes a layout from one persisted line.
    pub fn decode(value: &str) -> Result<Self, ParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut parts = trimmed.splitn(4, FIELD_DELIMITER);
        let domain = parts.next().ok_or(ParseError::MissingPrefix)?;
        let version = parts.next().ok_or(ParseError::MissingVersion)?;
        let dimensions = parts.next().ok_or(ParseError::MissingDimensions)?;
        let wall_list = parts.next().ok_or(ParseError::MissingWalls)?;

        if domain != LAYOUT_DOMAIN {
            return Err(ParseError::InvalidPrefix(domain.to_owned()));
        }
        if version != LAYOUT_VERSION {
            return Err(ParseError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let walls = wall_list
            .split_whitespace()
            .map(parse_wall_token)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            columns,
            rows,
            walls,
        })
    }

    /// Reapplies the captured anchors onto a working copy of the challenge.
    ///
    /// The layout is validated in full before any anchor is applied: its
    /// grid, wall count, and per-wall shapes must match the template, and
    /// every recorded anchor must keep its wall on the grid without
    /// overlapping another layout wall. Knights and towers are untouched;
    /// they re-attach from the template.
    pub fn restore(&self, challenge: &mut Challenge) -> Result<(), ParseError> {
        let size = challenge.size();
        if self.columns != size.columns() || self.rows != size.rows() {
            return Err(ParseError::GridMismatch {
                expected_columns: size.columns(),
                expected_rows: size.rows(),
                found_columns: self.columns,
                found_rows: self.rows,
            });
        }
        if self.walls.len() != challenge.walls().len() {
            return Err(ParseError::WallCountMismatch {
                expected: challenge.walls().len(),
                found: self.walls.len(),
            });
        }

        let mut claimed: HashSet<GridPos> = HashSet::new();
        for (index, entry) in self.walls.iter().enumerate() {
            let expected = challenge
                .walls()
                .get(index)
                .map(|wall| wall.shape())
                .unwrap_or(entry.shape);
            if expected != entry.shape {
                return Err(ParseError::ShapeMismatch {
                    index,
                    expected,
                    found: entry.shape,
                });
            }

            let Some(anchor) = entry.anchor else {
                continue;
            };
            let cells = entry
                .shape
                .anchored_cells(anchor, size)
                .ok_or(ParseError::AnchorOutOfBounds { index })?;
            for cell in cells {
                if !claimed.insert(cell) {
                    return Err(ParseError::OverlappingWalls { index });
                }
            }
        }

        let ids: Vec<_> = challenge.walls().iter().map(|wall| wall.id()).collect();
        for (entry, id) in self.walls.iter().zip(ids) {
            let _ = challenge.set_wall_anchor(id, entry.anchor);
        }

        Ok(())
    }
}

/// Two-line session snapshot: the working challenge and its hint copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    /// Wall layout of the challenge the player is solving.
    pub current: WallLayout,
    /// Wall layout of the hint (solution) copy.
    pub hint: WallLayout,
}

impl SessionRecord {
    /// Encodes the record as two layout lines.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}\n{}\n", self.current.encode(), self.hint.encode())
    }

    /// Decodes a record from persisted session text.
    pub fn decode(value: &str) -> Result<Self, ParseError> {
        if value.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let mut lines = value.lines();
        let current = lines.next().ok_or(ParseError::MissingLine("current"))?;
        let hint = lines.next().ok_or(ParseError::MissingLine("hint"))?;
        Ok(Self {
            current: WallLayout::decode(current)?,
            hint: WallLayout::decode(hint)?,
        })
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ParseError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| ParseError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(ParseError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((columns, rows))
}

fn parse_wall_token(token: &str) -> Result<WallLayoutEntry, ParseError> {
    let (shape_token, anchor_token) = token
        .split_once(ANCHOR_DELIMITER)
        .ok_or_else(|| ParseError::MalformedWall(token.to_owned()))?;

    let shape = WallShape::from_token(shape_token)
        .ok_or_else(|| ParseError::UnknownShape(shape_token.to_owned()))?;

    if anchor_token == PALETTE_TOKEN {
        return Ok(WallLayoutEntry {
            shape,
            anchor: None,
        });
    }

    let (column, row) = anchor_token
        .split_once(',')
        .ok_or_else(|| ParseError::MalformedWall(token.to_owned()))?;
    let column = column
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidAnchor(token.to_owned()))?;
    let row = row
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidAnchor(token.to_owned()))?;

    Ok(WallLayoutEntry {
        shape,
        anchor: Some(GridPos::new(column, row)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::{GridSize, Wall, WallId};

    fn mixed_challenge() -> Challenge {
        Challenge::new(
            "codec",
            GridSize::new(5, 4),
            vec![
                Wall::anchored(WallId::new(0), WallShape::Straight3V, GridPos::new(1, 0)),
                Wall::new(WallId::new(1), WallShape::CornerSW),
                Wall::anchored(WallId::new(2), WallShape::Cross, GridPos::new(2, 1)),
            ],
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn encode_is_stable_and_prefixed() {
        let layout = WallLayout::capture(&mixed_challenge());
        let encoded = layout.encode();

        assert_eq!(
            encoded,
            "rampart:v1:5x4:straight3v@1,0 corner_sw@- cross@2,1",
        );
        assert_eq!(encoded, layout.encode());
    }

    #[test]
    fn round_trip_preserves_shapes_and_anchors() {
        let layout = WallLayout::capture(&mixed_challenge());
        let decoded = WallLayout::decode(&layout.encode()).expect("layout decodes");
        assert_eq!(decoded, layout);
    }

    #[test]
    fn round_trip_of_an_empty_wall_list() {
        let challenge = Challenge::new(
            "empty",
            GridSize::new(5, 2),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let layout = WallLayout::capture(&challenge);

        assert_eq!(layout.encode(), "rampart:v1:5x2:");
        assert_eq!(
            WallLayout::decode(&layout.encode()).expect("layout decodes"),
            layout,
        );
    }

    #[test]
    fn restore_reapplies_anchors_onto_a_play_copy() {
        let template = mixed_challenge();
        let layout = WallLayout::capture(&template);

        let mut working = template.play_copy();
        layout.restore(&mut working).expect("layout restores");

        assert_eq!(working, template);
    }

    #[test]
    fn decode_rejects_each_malformed_segment() {
        assert!(matches!(WallLayout::decode("  "), Err(ParseError::Empty)));
        assert!(matches!(
            WallLayout::decode("bastion:v1:3x3:"),
            Err(ParseError::InvalidPrefix(_)),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v9:3x3:"),
            Err(ParseError::UnsupportedVersion(_)),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v1"),
            Err(ParseError::MissingDimensions),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v1:3x3"),
            Err(ParseError::MissingWalls),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v1:3by3:"),
            Err(ParseError::InvalidDimensions(_)),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v1:0x3:"),
            Err(ParseError::InvalidDimensions(_)),
        ));
    }

    #[test]
    fn decode_rejects_each_malformed_wall_token() {
        assert!(matches!(
            WallLayout::decode("rampart:v1:3x3:straight3v"),
            Err(ParseError::MalformedWall(_)),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v1:3x3:straight3v@1"),
            Err(ParseError::MalformedWall(_)),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v1:3x3:straight3v@one,0"),
            Err(ParseError::InvalidAnchor(_)),
        ));
        assert!(matches!(
            WallLayout::decode("rampart:v1:3x3:ziggurat@1,0"),
            Err(ParseError::UnknownShape(_)),
        ));
    }

    #[test]
    fn restore_rejects_mismatched_layouts() {
        let template = mixed_challenge();
        let layout = WallLayout::capture(&template);

        let mut shrunk = template.clone();
        let mut fewer = layout.clone();
        let _ = fewer.walls.pop();
        assert!(matches!(
            fewer.restore(&mut shrunk),
            Err(ParseError::WallCountMismatch {
                expected: 3,
                found: 2,
            }),
        ));

        let mut reshaped = layout.clone();
        reshaped.walls[1].shape = WallShape::Straight2H;
        assert!(matches!(
            reshaped.restore(&mut shrunk),
            Err(ParseError::ShapeMismatch { index: 1, .. }),
        ));

        let mut resized = layout;
        resized.columns = 9;
        assert!(matches!(
            resized.restore(&mut shrunk),
            Err(ParseError::GridMismatch { .. }),
        ));
    }

    #[test]
    fn restore_rejects_anchors_that_leave_the_grid_or_collide() {
        let template = mixed_challenge();
        let mut working = template.play_copy();

        let mut escaped = WallLayout::capture(&template);
        escaped.walls[0].anchor = Some(GridPos::new(1, 2));
        assert!(matches!(
            escaped.restore(&mut working),
            Err(ParseError::AnchorOutOfBounds { index: 0 }),
        ));

        let mut colliding = WallLayout::capture(&template);
        colliding.walls[1].anchor = Some(GridPos::new(1, 1));
        assert!(matches!(
            colliding.restore(&mut working),
            Err(ParseError::OverlappingWalls { index: 1 }),
        ));

        // Validation runs before any anchor is applied.
        assert!(working.walls().iter().all(|wall| !wall.is_placed()));
    }

    #[test]
    fn session_record_round_trips_as_two_lines() {
        let template = mixed_challenge();
        let record = SessionRecord {
            current: WallLayout::capture(&template.play_copy()),
            hint: WallLayout::capture(&template),
        };

        let encoded = record.encode();
        assert_eq!(encoded.lines().count(), 2);

        let decoded = SessionRecord::decode(&encoded).expect("record decodes");
        assert_eq!(decoded, record);
    }

    #[test]
    fn session_record_requires_both_lines() {
        assert!(matches!(SessionRecord::decode(""), Err(ParseError::Empty)));
        assert!(matches!(
            SessionRecord::decode("rampart:v1:3x3:\n"),
            Err(ParseError::MissingLine("hint")),
        ));
    }
}
