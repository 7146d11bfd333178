//! Deterministic token generation.
//!
//! Every untouched cell derives its spawn decision from an XXH64 hash of its
//! canonical key. The hash replaces any randomized source (`DefaultHasher`,
//! thread RNGs) so that the same cell yields the same decision across calls,
//! runs, and machines, with no correlation between neighboring cells. The
//! hash function, its zero seed, and the u64-to-unit-interval mapping are
//! part of the save compatibility contract: changing any of them silently
//! reshuffles every never-overridden cell in existing worlds.

use xxhash_rust::xxh64::xxh64;

use crate::cell::CellId;

const SPAWN_HASH_SEED: u64 = 0;

/// Token value freshly spawned cells hold.
pub const INITIAL_TOKEN_VALUE: u32 = 1;

/// Hash a cell into the unit interval `[0, 1)`.
///
/// Uses the top 53 bits of the hash so the quotient is exactly representable
/// as an `f64`.
pub fn spawn_roll(cell: CellId) -> f64 {
    let hash = xxh64(cell.key().as_bytes(), SPAWN_HASH_SEED);
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

/// Spawn decision for an untouched cell: `Some(1)` iff the cell's roll falls
/// under the spawn rate. Pure in the cell key; no call-order dependence.
pub fn generate(cell: CellId, spawn_rate: f64) -> Option<u32> {
    (spawn_roll(cell) < spawn_rate).then_some(INITIAL_TOKEN_VALUE)
}
