#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence data operations for Rampart.
//!
//! Everything here works on strings: the surrounding system owns the files
//! and is responsible for durable writes (write-to-temp-then-rename). The
//! crate covers the session wall-layout codec used for crash recovery, the
//! campaign progress ledger, and the JSON campaign manifest for challenge
//! templates.

mod campaign;
mod codec;
mod progress;

pub use campaign::{decode_manifest, encode_manifest, Campaign, ManifestError};
pub use codec::{ParseError, SessionRecord, WallLayout, WallLayoutEntry};
pub use progress::ProgressLedger;
