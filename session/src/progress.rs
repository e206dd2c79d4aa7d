//! Campaign progress ledger persisted as a line of solved flags.

use crate::codec::ParseError;

/// One solved flag per challenge, in campaign order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressLedger {
    solved: Vec<bool>,
}

impl ProgressLedger {
    /// Creates a ledger with every challenge unsolved.
    #[must_use]
    pub fn new(challenge_count: usize) -> Self {
        Self {
            solved: vec![false; challenge_count],
        }
    }

    /// Whether the challenge at `index` is solved. Out of range reads false.
    #[must_use]
    pub fn is_solved(&self, index: usize) -> bool {
        self.solved.get(index).copied().unwrap_or(false)
    }

    /// Records the solved state of the challenge at `index`.
    ///
    /// Returns `false` when the index lies outside the ledger.
    pub fn set_solved(&mut self, index: usize, solved: bool) -> bool {
        match self.solved.get_mut(index) {
            Some(flag) => {
                *flag = solved;
                true
            }
            None => false,
        }
    }

    /// Number of solved challenges.
    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.solved.iter().filter(|flag| **flag).count()
    }

    /// Number of challenges the ledger tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solved.len()
    }

    /// Whether the ledger tracks no challenges at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solved.is_empty()
    }

    /// Encodes the ledger as one `'1'`/`'0'` character per challenge.
    #[must_use]
    pub fn encode(&self) -> String {
        self.solved
            .iter()
            .map(|flag| if *flag { '1' } else { '0' })
            .collect()
    }

    /// Decodes a ledger from its persisted flag line.
    pub fn decode(value: &str) -> Result<Self, ParseError> {
        let solved = value
            .trim()
            .chars()
            .map(|flag| match flag {
                '1' => Ok(true),
                '0' => Ok(false),
                other => Err(ParseError::InvalidFlag(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { solved })
    }
}
