//! Seeded coordinate hash - the only source of variation in the engine.
//!
//! Every decision the engine makes is addressed by a `(seed, fingerprint, coordinate)`
//! triple and resolved through xxHash32. Inputs are serialized as fixed-width
//! little-endian words before mixing, so the digest is identical on every platform.

use xxhash_rust::xxh32::xxh32;

/// Base of the anti-pair fallback layer.
const FALLBACK_BASE: u32 = 1000;

/// Base of the gap-ranking layer.
const GAP_RANK_BASE: u32 = 2000;

/// Address of a single decision in the hash input space.
///
/// Layers never overlap: template selection lives at 0, primary picks at `1..N`,
/// anti-pair fallbacks at `1000 + offset`, and gap ranking at `2000 + index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate(u32);

impl Coordinate
{
    /// Template selection.
    pub const TEMPLATE: Coordinate = Coordinate(0);

    /// Primary pick for the `ordinal`-th gap (1-based).
    pub const fn pick(ordinal: u32) -> Self
    {
        Coordinate(ordinal)
    }

    /// Fallback search for the `ordinal`-th gap at the given attempt.
    pub const fn fallback(
        ordinal: u32,
        attempt: u32,
    ) -> Self
    {
        Coordinate(FALLBACK_BASE + ordinal + attempt)
    }

    /// Inclusion score for the gap at `index` in sorted order.
    pub const fn gap_rank(index: u32) -> Self
    {
        Coordinate(GAP_RANK_BASE + index)
    }

    pub const fn value(self) -> u32
    {
        self.0
    }
}

/// 32-bit fingerprint of the raw prompt bytes.
pub fn fingerprint(prompt: &str) -> u32
{
    xxh32(prompt.as_bytes(), 0)
}

/// Mix seed, fingerprint and coordinate into one digest.
pub fn coordinate_hash(
    seed: u32,
    fingerprint: u32,
    coord: Coordinate,
) -> u32
{
    let mut buf = [0u8; 8];
    buf[..4].copy_from_slice(&fingerprint.to_le_bytes());
    buf[4..].copy_from_slice(&coord.value().to_le_bytes());
    xxh32(&buf, seed)
}

/// Map a digest onto `0..len`. Callers guarantee `len > 0`.
pub fn index(
    hash: u32,
    len: usize,
) -> usize
{
    (hash as usize) % len
}

/// Per-call key bundling the seed with the prompt fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionKey
{
    pub seed: u32,
    pub fingerprint: u32,
}

impl SelectionKey
{
    pub fn new(
        seed: u32,
        prompt: &str,
    ) -> Self
    {
        Self { seed, fingerprint: fingerprint(prompt) }
    }

    pub fn hash(
        &self,
        coord: Coordinate,
    ) -> u32
    {
        coordinate_hash(self.seed, self.fingerprint, coord)
    }

    /// Deterministic index into a non-empty slice of length `len`.
    pub fn pick(
        &self,
        coord: Coordinate,
        len: usize,
    ) -> usize
    {
        index(self.hash(coord), len)
    }
}
