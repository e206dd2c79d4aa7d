//! Ordered challenge campaign and the JSON manifest it is loaded from.

use rampart_core::Challenge;
use thiserror::Error;

use crate::progress::ProgressLedger;

/// Errors raised while reading or writing a campaign manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest text was not valid challenge JSON.
    #[error("campaign manifest is not valid challenge JSON")]
    Json(#[from] serde_json::Error),
}

/// Encodes authored challenge templates as a JSON manifest.
pub fn encode_manifest(challenges: &[Challenge]) -> Result<String, ManifestError> {
    Ok(serde_json::to_string_pretty(challenges)?)
}

/// Decodes authored challenge templates from a JSON manifest.
pub fn decode_manifest(manifest: &str) -> Result<Vec<Challenge>, ManifestError> {
    Ok(serde_json::from_str(manifest)?)
}

/// Ordered set of authored challenges paired with the player's progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Campaign {
    challenges: Vec<Challenge>,
    progress: ProgressLedger,
}

impl Campaign {
    /// Creates a campaign with a fresh, fully-unsolved ledger.
    #[must_use]
    pub fn new(challenges: Vec<Challenge>) -> Self {
        let progress = ProgressLedger::new(challenges.len());
        Self {
            challenges,
            progress,
        }
    }

    /// Creates a campaign resuming from a previously persisted ledger.
    ///
    /// A ledger of the wrong length (the campaign grew or shrank between
    /// runs) is discarded in favour of a fresh one.
    #[must_use]
    pub fn with_progress(challenges: Vec<Challenge>, progress: ProgressLedger) -> Self {
        if progress.len() == challenges.len() {
            Self {
                challenges,
                progress,
            }
        } else {
            Self::new(challenges)
        }
    }

    /// Challenge templates in campaign order.
    #[must_use]
    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// Template at `index`, if the campaign holds one.
    #[must_use]
    pub fn challenge(&self, index: usize) -> Option<&Challenge> {
        self.challenges.get(index)
    }

    /// Campaign position of the named challenge.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.challenges
            .iter()
            .position(|challenge| challenge.name() == name)
    }

    /// Template following the named challenge in campaign order.
    ///
    /// Returns `None` for an unknown name or when the named challenge is
    /// the last one, ending the run.
    #[must_use]
    pub fn next_after(&self, name: &str) -> Option<&Challenge> {
        let index = self.index_of(name)?;
        self.challenges.get(index + 1)
    }

    /// Marks the named challenge solved.
    ///
    /// Returns `false` when the campaign holds no challenge by that name.
    pub fn mark_solved(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => self.progress.set_solved(index, true),
            None => false,
        }
    }

    /// Whether the challenge at `index` has been solved.
    #[must_use]
    pub fn is_solved(&self, index: usize) -> bool {
        self.progress.is_solved(index)
    }

    /// The underlying ledger, for persistence.
    #[must_use]
    pub fn progress(&self) -> &ProgressLedger {
        &self.progress
    }
}
