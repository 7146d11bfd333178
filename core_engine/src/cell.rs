use std::fmt;

use serde::{Deserialize, Serialize};

/// Address of one lattice cell: an ordered integer pair on an unbounded grid.
///
/// Cells are obtained from geographic coordinates by floor-dividing each axis
/// by the configured tile size. Integer storage means there is a single
/// canonical representation per cell (no `-0`/`0` ambiguity in keys).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct CellId {
    pub i: i64,
    pub j: i64,
}

impl CellId {
    pub const fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }

    /// Map a geographic coordinate onto the lattice.
    ///
    /// `tile_size_deg` is the edge length of one cell in degrees; both axes
    /// use the same size. Non-finite inputs saturate through the float-to-int
    /// cast rather than panicking; callers validate positions upstream.
    pub fn from_geo(lat: f64, lng: f64, tile_size_deg: f64) -> Self {
        Self {
            i: (lat / tile_size_deg).floor() as i64,
            j: (lng / tile_size_deg).floor() as i64,
        }
    }

    /// The cell `(di, dj)` steps away from this one.
    pub const fn offset(self, di: i64, dj: i64) -> Self {
        Self {
            i: self.i.wrapping_add(di),
            j: self.j.wrapping_add(dj),
        }
    }

    /// Chebyshev (chessboard) distance between two cells.
    pub fn chebyshev(self, other: Self) -> u64 {
        self.i.abs_diff(other.i).max(self.j.abs_diff(other.j))
    }

    /// Canonical string key, `"i,j"`. Equal cells always render equal keys;
    /// this is the form the deterministic generator hashes, so it is part of
    /// the save compatibility contract.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i, self.j)
    }
}
