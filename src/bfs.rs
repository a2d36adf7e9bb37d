//! External-memory retrograde breadth-first search that builds one disjoint pattern
//! database.
//!
//! The search frontier is kept on disk in two [`crate::queue::Queue`]s rather than in
//! memory: edge weights are 0 (blank moves without displacing a pattern tile) or 1
//! (it does), so a two-queue 0-1 BFS suffices — same-layer successors go back into the
//! queue being drained, next-layer successors go into the other one, and the two
//! swap roles by layer parity.

use std::path::Path;

use crate::board::{self, PATTERN_SIZE};
use crate::error::{Error, Result};
use crate::pattern::{Pattern, TABLE_SIZE, VISITED_SIZE};
use crate::queue::Queue;

/// Maximum number of layers the search can take before something is wrong; the
/// diameter of any 6-tile pattern's move graph on a 25-square board is well under
/// this (Korf & Felner report at most in the low 30s for published patterns).
pub const MAX_DEPTH: u8 = 125;

/// One pattern-BFS frontier element: the six pattern-tile square indices (in pattern
/// order), the blank's square, and the number of pattern-tile moves used to reach it.
///
/// Eight bytes total, chosen so that a 512-node block is exactly 4 KiB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    positions: [u8; PATTERN_SIZE],
    blank: u8,
    g: u8,
}

impl Node {
    /// Size of a node's on-disk representation.
    pub const BYTES: usize = PATTERN_SIZE + 2;

    /// Builds a node from its pattern-tile positions, blank square, and g-value.
    #[must_use]
    pub fn new(positions: [u8; PATTERN_SIZE], blank: u8, g: u8) -> Self {
        Self { positions, blank, g }
    }

    /// The six pattern-tile square indices, in pattern order.
    #[must_use]
    pub fn positions(&self) -> [u8; PATTERN_SIZE] {
        self.positions
    }

    /// The blank's square.
    #[must_use]
    pub fn blank(&self) -> u8 {
        self.blank
    }

    /// The number of pattern-tile moves used to reach this node from the goal.
    #[must_use]
    pub fn g(&self) -> u8 {
        self.g
    }

    #[must_use]
    pub(crate) fn to_bytes(self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        bytes[..PATTERN_SIZE].copy_from_slice(&self.positions);
        bytes[PATTERN_SIZE] = self.blank;
        bytes[PATTERN_SIZE + 1] = self.g;
        bytes
    }

    #[must_use]
    pub(crate) fn from_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut positions = [0u8; PATTERN_SIZE];
        positions.copy_from_slice(&bytes[..PATTERN_SIZE]);
        Self {
            positions,
            blank: bytes[PATTERN_SIZE],
            g: bytes[PATTERN_SIZE + 1],
        }
    }
}

/// A packed bit-per-entry visited set, sized for the 25^7 visited hash space (about
/// 763 MiB, versus the 6 GiB a byte-per-entry vector would need).
struct VisitedBits {
    words: Box<[u64]>,
}

impl VisitedBits {
    fn new(len_bits: usize) -> Self {
        let words = len_bits.div_ceil(u64::BITS as usize);
        Self {
            words: vec![0u64; words].into_boxed_slice(),
        }
    }

    fn is_set(&self, index: usize) -> bool {
        let word = self.words[index / u64::BITS as usize];
        (word >> (index % u64::BITS as usize)) & 1 != 0
    }

    /// Sets the bit at `index`, returning whether it was already set.
    fn set(&mut self, index: usize) -> bool {
        let word = &mut self.words[index / u64::BITS as usize];
        let mask = 1u64 << (index % u64::BITS as usize);
        let was_set = *word & mask != 0;
        *word |= mask;
        was_set
    }
}

/// Statistics reported after each completed BFS layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerStats {
    /// The g-value (depth) of the layer that just finished.
    pub depth: u8,
    /// Number of newly visited placements found at this depth.
    pub new_count: u64,
    /// Running total of visited placements across all layers so far.
    pub total: u64,
}

/// Builds the disjoint pattern database for `pattern`, using `q1`/`q2` as the two
/// on-disk frontier files, and reporting progress through `on_layer` after each
/// completed layer.
///
/// Returns the dense `25^6`-byte table: entry `i` is the minimum number of
/// pattern-tile moves needed to reach the placement whose database hash is `i`, or
/// 255 if unreached (which should not happen for any placement reachable from the
/// goal once the search completes).
///
/// # Errors
///
/// Returns [`Error::Io`] if the queue files cannot be created or accessed, or
/// [`Error::Invariant`] if the search exceeds [`MAX_DEPTH`] layers without
/// terminating.
pub fn build(
    pattern: &Pattern,
    q1: &Path,
    q2: &Path,
    mut on_layer: impl FnMut(LayerStats),
) -> Result<Box<[u8]>> {
    let mut table = vec![255u8; TABLE_SIZE].into_boxed_slice();
    let mut visited = VisitedBits::new(VISITED_SIZE);
    let mut queues = [Queue::create(q1)?, Queue::create(q2)?];

    let root = Node::new(pattern.tiles(), 0, 0);
    visited.set(pattern.visited_index(root.positions(), root.blank()));
    table[pattern.dpdb_index(root.positions())] = 0;
    queues[0].push(root)?;

    let mut depth: u8 = 0;
    let mut cur = 0usize;
    let mut total: u64 = 1;

    loop {
        let mut new_count = 0u64;

        while let Some(node) = queues[cur].pop()? {
            for &next_blank in board::neighbors(node.blank()) {
                let mut positions = node.positions();
                let mut g = node.g();
                if let Some(moved) = positions.iter().position(|&square| square == next_blank) {
                    positions[moved] = node.blank();
                    g += 1;
                }

                let visited_index = pattern.visited_index(positions, next_blank);
                if visited.set(visited_index) {
                    continue;
                }

                let dpdb_index = pattern.dpdb_index(positions);
                table[dpdb_index] = table[dpdb_index].min(g);
                new_count += 1;
                total += 1;

                let child = Node::new(positions, next_blank, g);
                let target = if g == depth { cur } else { 1 - cur };
                queues[target].push(child)?;
            }
        }

        on_layer(LayerStats {
            depth,
            new_count,
            total,
        });

        // `cur` is provably drained (the `while let` loop above only exits once
        // `pop` returns `None`), so its file is safe to truncate for reuse; the
        // other queue may still hold unflushed next-layer pushes in its buffer,
        // which must be flushed to disk (not discarded) before it becomes the
        // queue being drained next.
        queues[cur].finish_drained()?;
        queues[1 - cur].finish_accumulating()?;
        if new_count == 0 {
            break;
        }

        depth = depth
            .checked_add(1)
            .ok_or(Error::Invariant("BFS depth exceeded u8 range"))?;
        if depth > MAX_DEPTH {
            return Err(Error::Invariant(
                "BFS exceeded the 125-layer diameter bound",
            ));
        }
        cur = 1 - cur;
    }

    Ok(table)
}
