//! Maps pattern-tile placements to dense table indices.
//!
//! [`Pattern`] validates and holds one pattern's six tiles in table order, and backs
//! [`Pattern::dpdb_index`]/[`Pattern::visited_index`], used while building a database.
//! The free functions `hash0`..`hash3`/`hashref0`..`hashref3` reproduce the eight
//! lookups the IDA* driver performs against the two stored database files, each
//! folding a fixed, pattern-specific selection of inverse-state entries (optionally
//! permuted through one of [`crate::board`]'s symmetries) into a single index.

use crate::board::{self, BOARD_SIZE};
use crate::error::ConfigError;

pub use crate::board::PATTERN_SIZE;

/// Number of entries in a single disjoint pattern database file, `25^6`.
pub const TABLE_SIZE: usize = 25 * 25 * 25 * 25 * 25 * 25;

/// Number of entries in the visited bitmap, `25^7`.
pub const VISITED_SIZE: usize = TABLE_SIZE * BOARD_SIZE;

const fn fold6(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8) -> usize {
    let base = BOARD_SIZE;
    let mut hash = a as usize;
    hash = hash * base + b as usize;
    hash = hash * base + c as usize;
    hash = hash * base + d as usize;
    hash = hash * base + e as usize;
    hash * base + f as usize
}

/// A validated set of six pattern tiles, in the order used to build and query its
/// database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    tiles: [u8; PATTERN_SIZE],
}

impl Pattern {
    /// Validates six tile numbers as a pattern, in table order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TileOutOfRange`] if any tile is not in `1..=24`, or
    /// [`ConfigError::DuplicateTile`] if a tile appears more than once.
    pub fn new(tiles: [u8; PATTERN_SIZE]) -> Result<Self, ConfigError> {
        for &tile in &tiles {
            if tile == 0 || tile as usize >= BOARD_SIZE {
                return Err(ConfigError::TileOutOfRange(tile));
            }
        }
        for i in 0..PATTERN_SIZE {
            for &later in &tiles[(i + 1)..] {
                if tiles[i] == later {
                    return Err(ConfigError::DuplicateTile(tiles[i]));
                }
            }
        }
        Ok(Self { tiles })
    }

    /// Validates a pattern from a slice, as accepted from CLI positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongTileCount`] if `tiles` does not have exactly
    /// [`PATTERN_SIZE`] entries, or the errors documented on [`Pattern::new`].
    pub fn from_slice(tiles: &[u8]) -> Result<Self, ConfigError> {
        let array: [u8; PATTERN_SIZE] = tiles
            .try_into()
            .map_err(|_err| ConfigError::WrongTileCount(tiles.len(), PATTERN_SIZE))?;
        Self::new(array)
    }

    /// The pattern's tiles, in table order.
    #[must_use]
    pub fn tiles(&self) -> [u8; PATTERN_SIZE] {
        self.tiles
    }

    /// The dense database index for this pattern's tiles sitting at `positions`
    /// (`positions[i]` is the square occupied by `self.tiles()[i]`), in `0..`
    /// [`TABLE_SIZE`].
    #[must_use]
    pub fn dpdb_index(&self, positions: [u8; PATTERN_SIZE]) -> usize {
        let [a, b, c, d, e, f] = positions;
        fold6(a, b, c, d, e, f)
    }

    /// The dense visited-bitmap index for this pattern's tiles at `positions` with
    /// the blank at `blank`, in `0..`[`VISITED_SIZE`].
    #[must_use]
    pub fn visited_index(&self, positions: [u8; PATTERN_SIZE], blank: u8) -> usize {
        self.dpdb_index(positions) * BOARD_SIZE + blank as usize
    }
}

/// Index into the `h0` database for the regular pattern `{1,2,5,6,7,12}`, given the
/// tile-to-square inverse state.
#[must_use]
pub fn hash0(inv: &[u8; BOARD_SIZE]) -> usize {
    fold6(inv[1], inv[2], inv[5], inv[6], inv[7], inv[12])
}

/// Index into the `h0` database for the reflection of the regular pattern
/// `{1,2,5,6,7,12}`, i.e. the diagonally-reflected tile set `{5,10,1,6,11,12}`.
#[must_use]
pub fn hashref0(inv: &[u8; BOARD_SIZE]) -> usize {
    let r = board::REFLECT;
    fold6(
        r[inv[5] as usize],
        r[inv[10] as usize],
        r[inv[1] as usize],
        r[inv[6] as usize],
        r[inv[11] as usize],
        r[inv[12] as usize],
    )
}

/// Index into the `h1` database for the regular pattern `{3,4,8,9,13,14}`.
#[must_use]
pub fn hash1(inv: &[u8; BOARD_SIZE]) -> usize {
    fold6(inv[3], inv[4], inv[8], inv[9], inv[13], inv[14])
}

/// Index into the `h1` database for the reflection of `{3,4,8,9,13,14}`, i.e. the
/// tile set `{15,20,16,21,17,22}`.
#[must_use]
pub fn hashref1(inv: &[u8; BOARD_SIZE]) -> usize {
    let r = board::REFLECT;
    fold6(
        r[inv[15] as usize],
        r[inv[20] as usize],
        r[inv[16] as usize],
        r[inv[21] as usize],
        r[inv[17] as usize],
        r[inv[22] as usize],
    )
}

/// Index into the `h1` database for the regular pattern `{10,11,15,16,20,21}`,
/// recovered via a 180 degree rotation of the board.
#[must_use]
pub fn hash2(inv: &[u8; BOARD_SIZE]) -> usize {
    let r = board::ROTATE_180;
    fold6(
        r[inv[21] as usize],
        r[inv[20] as usize],
        r[inv[16] as usize],
        r[inv[15] as usize],
        r[inv[11] as usize],
        r[inv[10] as usize],
    )
}

/// Index into the `h1` database for the reflection of `{10,11,15,16,20,21}`, i.e. the
/// tile set `{2,7,3,8,4,9}`, recovered via a reflected 180 degree rotation.
#[must_use]
pub fn hashref2(inv: &[u8; BOARD_SIZE]) -> usize {
    let r = board::ROTATE_180_REFLECT;
    fold6(
        r[inv[9] as usize],
        r[inv[4] as usize],
        r[inv[8] as usize],
        r[inv[3] as usize],
        r[inv[7] as usize],
        r[inv[2] as usize],
    )
}

/// Index into the `h1` database for the regular pattern `{17,18,19,22,23,24}`,
/// recovered via a 90 degree rotation of the board.
#[must_use]
pub fn hash3(inv: &[u8; BOARD_SIZE]) -> usize {
    let r = board::ROTATE_90;
    fold6(
        r[inv[19] as usize],
        r[inv[24] as usize],
        r[inv[18] as usize],
        r[inv[23] as usize],
        r[inv[17] as usize],
        r[inv[22] as usize],
    )
}

/// Index into the `h1` database for the reflection of `{17,18,19,22,23,24}`, i.e. the
/// tile set `{13,18,23,14,19,24}`, recovered via a reflected 90 degree rotation.
#[must_use]
pub fn hashref3(inv: &[u8; BOARD_SIZE]) -> usize {
    let r = board::ROTATE_90_REFLECT;
    fold6(
        r[inv[23] as usize],
        r[inv[24] as usize],
        r[inv[18] as usize],
        r[inv[19] as usize],
        r[inv[13] as usize],
        r[inv[14] as usize],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_rejects_wrong_count() {
        assert_eq!(
            Pattern::from_slice(&[1, 2, 3]),
            Err(ConfigError::WrongTileCount(3, PATTERN_SIZE))
        );
    }

    #[test]
    fn pattern_rejects_out_of_range_tile() {
        assert_eq!(
            Pattern::new([1, 2, 5, 6, 7, 25]),
            Err(ConfigError::TileOutOfRange(25))
        );
        assert_eq!(
            Pattern::new([0, 2, 5, 6, 7, 12]),
            Err(ConfigError::TileOutOfRange(0))
        );
    }

    #[test]
    fn pattern_rejects_duplicate_tile() {
        assert_eq!(
            Pattern::new([1, 2, 5, 6, 7, 1]),
            Err(ConfigError::DuplicateTile(1))
        );
    }

    #[test]
    fn dpdb_index_is_injective_on_distinct_positions() {
        let pattern = Pattern::new(board::P0).unwrap();
        let mut seen = std::collections::HashSet::new();
        let samples = [
            [1, 2, 5, 6, 7, 12],
            [12, 7, 6, 5, 2, 1],
            [0, 3, 4, 8, 9, 13],
            [24, 23, 22, 21, 20, 19],
        ];
        for sample in samples {
            let index = pattern.dpdb_index(sample);
            assert!(index < TABLE_SIZE);
            assert!(seen.insert(index), "collision for {sample:?}");
        }
    }

    #[test]
    fn visited_index_distinguishes_blank_position() {
        let pattern = Pattern::new(board::P0).unwrap();
        let positions = [1, 2, 5, 6, 7, 12];
        let a = pattern.visited_index(positions, 0);
        let b = pattern.visited_index(positions, 3);
        assert_ne!(a, b);
        assert!(a < VISITED_SIZE);
        assert!(b < VISITED_SIZE);
    }

    fn goal_inverse() -> [u8; BOARD_SIZE] {
        let mut inv = [0u8; BOARD_SIZE];
        for square in 0..BOARD_SIZE {
            inv[square] = square as u8;
        }
        inv
    }

    #[test]
    fn goal_state_hash_matches_home_square_dpdb_index() {
        let inv = goal_inverse();
        let p0 = Pattern::new(board::P0).unwrap();
        let p1 = Pattern::new(board::P1).unwrap();
        assert_eq!(hash0(&inv), p0.dpdb_index([1, 2, 5, 6, 7, 12]));
        assert_eq!(hash1(&inv), p1.dpdb_index([3, 4, 8, 9, 13, 14]));
        // P2's home squares rotate 180 degrees onto P1's home squares, so hash2
        // agrees with hash1 at the goal state.
        assert_eq!(hash2(&inv), hash1(&inv));
        // P3's home squares rotate 90 degrees onto P1's home squares likewise.
        assert_eq!(hash3(&inv), hash1(&inv));
    }

    /// A fixed non-identity inverse-state array (cyclic shift by 7 is a bijection on
    /// `0..25` since both are coprime), used to exercise the `hashref*`/`hash2`/`hash3`
    /// formulas away from the goal state.
    fn shifted_inverse() -> [u8; BOARD_SIZE] {
        let mut inv = [0u8; BOARD_SIZE];
        for (tile, square) in inv.iter_mut().enumerate() {
            *square = ((tile + 7) % BOARD_SIZE) as u8;
        }
        inv
    }

    #[test]
    fn hashref0_matches_hash0_folded_over_the_fully_reflected_board() {
        let inv = shifted_inverse();
        let mut reflected = [0u8; BOARD_SIZE];
        for (tile, square) in reflected.iter_mut().enumerate() {
            *square = board::REFLECT[inv[tile] as usize];
        }
        // Reflecting every tile's square maps P0's home squares {1,2,5,6,7,12} onto
        // {5,10,1,6,11,12}, exactly the tile selection `hashref0` folds.
        let expected = fold6(
            reflected[5],
            reflected[10],
            reflected[1],
            reflected[6],
            reflected[11],
            reflected[12],
        );
        assert_eq!(hashref0(&inv), expected);
    }

    #[test]
    fn hash2_matches_fold_over_the_fully_rotated_board() {
        let inv = shifted_inverse();
        let mut rotated = [0u8; BOARD_SIZE];
        for (tile, square) in rotated.iter_mut().enumerate() {
            *square = board::ROTATE_180[inv[tile] as usize];
        }
        let expected = fold6(
            rotated[21],
            rotated[20],
            rotated[16],
            rotated[15],
            rotated[11],
            rotated[10],
        );
        assert_eq!(hash2(&inv), expected);
    }
}
