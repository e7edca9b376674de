//! Short identifier generation
//!
//! The same generator produces short link ids, folder ids and metadata record
//! ids. Uniqueness is not checked here; collision handling belongs to the
//! store layer, which inserts inside a write transaction and retries.

use rand::{distr::Alphanumeric, Rng};

/// Length of every generated identifier
pub const ID_LENGTH: usize = 12;

/// Generates a random identifier of [`ID_LENGTH`] characters drawn uniformly
/// from the 62-character alphanumeric alphabet `[0-9A-Za-z]`.
///
/// `rand::rng()` is a CSPRNG, so generated ids are not predictable from
/// previously observed ones.
pub fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}
