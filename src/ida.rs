//! Iterative-deepening A* over full 24-puzzle instances, using two on-disk pattern
//! databases (plus their symmetry-recovered counterparts) as an admissible but
//! inconsistent heuristic.

use crate::board::{self, BOARD_SIZE};
use crate::bfs::MAX_DEPTH;
use crate::dpdb::Database;
use crate::error::{Error, Result, ValidationError};
use crate::pattern;

/// Statistics reported after each iteration of the search, whether or not it found a
/// solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverIterationStats {
    /// The f-cutoff used for this iteration.
    pub threshold: u32,
    /// The number of nodes (moves attempted) generated during this iteration.
    pub nodes_generated: u64,
}

/// A solved instance: the sequence of tiles moved, in order, from the initial state
/// to the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// The tile moved at each step.
    pub path: Vec<u8>,
    /// The final threshold: since every lower threshold failed and the threshold
    /// always increases by the puzzle's move-length parity, this equals the optimal
    /// solution length.
    pub threshold: u32,
    /// Total nodes generated across every iteration, including the failed ones.
    pub total_nodes: u64,
}

/// Solves 24-puzzle instances against a fixed pair of loaded pattern databases.
///
/// `h0` backs the regular pattern `{1,2,5,6,7,12}` and its reflection; `h1` backs the
/// other three regular patterns (via rotation) and their reflections, exactly as
/// [`crate::pattern`]'s eight hash functions expect.
pub struct Solver<'a> {
    h0: &'a Database,
    h1: &'a Database,
}

impl<'a> Solver<'a> {
    /// Builds a solver over two already-loaded databases.
    #[must_use]
    pub fn new(h0: &'a Database, h1: &'a Database) -> Self {
        Self { h0, h1 }
    }

    /// Solves `initial`, a 25-entry permutation of `0..25` giving the tile at each
    /// square (tile `0` is the blank). Calls `on_iteration` after every iteration,
    /// including the final successful one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `initial` does not have exactly 25 entries, or
    /// its values are not a permutation of `0..25`.
    pub fn solve(
        &self,
        initial: &[u8],
        mut on_iteration: impl FnMut(SolverIterationStats),
    ) -> Result<Solution> {
        if initial.len() != BOARD_SIZE {
            return Err(Error::Validation(ValidationError::WrongLength(
                initial.len(),
            )));
        }

        let mut state = [0u8; BOARD_SIZE];
        state.copy_from_slice(initial);

        let mut seen = [false; BOARD_SIZE];
        let mut inv = [0u8; BOARD_SIZE];
        let mut blank = 0u8;
        for (square, &tile) in state.iter().enumerate() {
            if tile as usize >= BOARD_SIZE || seen[tile as usize] {
                return Err(Error::Validation(ValidationError::NotAPermutation(tile)));
            }
            seen[tile as usize] = true;
            inv[tile as usize] = square as u8;
            if tile == 0 {
                blank = square as u8;
            }
        }

        let add = self.regular_contributions(&inv);
        let addr = self.reflected_contributions(&inv);
        let sum_regular: u32 = add.iter().sum();
        let sum_reflected: u32 = addr.iter().sum();
        let threshold = sum_regular.max(sum_reflected);

        // Every non-blank tile is home iff all four regular contributions are zero,
        // which only happens at the fully solved state (tile 0 then necessarily sits
        // at square 0, the only square left over). No move is needed to confirm this,
        // unlike every other case, which `search` only detects after trying one.
        if threshold == 0 {
            return Ok(Solution {
                path: Vec::new(),
                threshold: 0,
                total_nodes: 0,
            });
        }

        let mut path = [0u8; MAX_DEPTH as usize];
        let mut total_nodes = 0u64;
        let mut threshold = threshold;

        loop {
            let mut nodes_generated = 0u64;
            let solved = self.search(
                &mut state,
                &mut inv,
                blank,
                None,
                0,
                add,
                addr,
                threshold,
                &mut path,
                &mut nodes_generated,
            );
            on_iteration(SolverIterationStats {
                threshold,
                nodes_generated,
            });
            total_nodes += nodes_generated;

            if solved {
                return Ok(Solution {
                    path: path[..threshold as usize].to_vec(),
                    threshold,
                    total_nodes,
                });
            }

            threshold += 2;
        }
    }

    fn regular_contributions(&self, inv: &[u8; BOARD_SIZE]) -> [u32; 4] {
        [
            u32::from(self.h0.get(pattern::hash0(inv))),
            u32::from(self.h1.get(pattern::hash1(inv))),
            u32::from(self.h1.get(pattern::hash2(inv))),
            u32::from(self.h1.get(pattern::hash3(inv))),
        ]
    }

    fn reflected_contributions(&self, inv: &[u8; BOARD_SIZE]) -> [u32; 4] {
        [
            u32::from(self.h0.get(pattern::hashref0(inv))),
            u32::from(self.h1.get(pattern::hashref1(inv))),
            u32::from(self.h1.get(pattern::hashref2(inv))),
            u32::from(self.h1.get(pattern::hashref3(inv))),
        ]
    }

    fn regular_contribution_for(&self, pat: usize, inv: &[u8; BOARD_SIZE]) -> u32 {
        match pat {
            0 => u32::from(self.h0.get(pattern::hash0(inv))),
            1 => u32::from(self.h1.get(pattern::hash1(inv))),
            2 => u32::from(self.h1.get(pattern::hash2(inv))),
            3 => u32::from(self.h1.get(pattern::hash3(inv))),
            _ => unreachable!("whichpat values are always in 0..4"),
        }
    }

    fn reflected_contribution_for(&self, pat: usize, inv: &[u8; BOARD_SIZE]) -> u32 {
        match pat {
            0 => u32::from(self.h0.get(pattern::hashref0(inv))),
            1 => u32::from(self.h1.get(pattern::hashref1(inv))),
            2 => u32::from(self.h1.get(pattern::hashref2(inv))),
            3 => u32::from(self.h1.get(pattern::hashref3(inv))),
            _ => unreachable!("whichrefpat values are always in 0..4"),
        }
    }

    /// One depth-first iteration, cutting off whenever `g + h >= threshold`. Leaves
    /// `state`/`inv` holding the solved configuration on success; restores them to
    /// their entry values on failure.
    #[allow(clippy::too_many_arguments)]
    fn search(
        &self,
        state: &mut [u8; BOARD_SIZE],
        inv: &mut [u8; BOARD_SIZE],
        blank: u8,
        old_blank: Option<u8>,
        g: u32,
        add: [u32; 4],
        addr: [u32; 4],
        threshold: u32,
        path: &mut [u8; MAX_DEPTH as usize],
        nodes_generated: &mut u64,
    ) -> bool {
        for &new_blank in board::neighbors(blank) {
            if Some(new_blank) == old_blank {
                continue;
            }

            let tile = state[new_blank as usize];
            state[blank as usize] = tile;
            inv[tile as usize] = blank;
            *nodes_generated += 1;

            let mut succeeded = false;

            let pat = board::WHICH_PAT[tile as usize] as usize;
            let mut nadd = add;
            nadd[pat] = self.regular_contribution_for(pat, inv);
            let nadd_sum: u32 = nadd.iter().sum();

            if nadd_sum + g < threshold {
                let refpat = board::WHICH_REF_PAT[tile as usize] as usize;
                let mut naddr = addr;
                naddr[refpat] = self.reflected_contribution_for(refpat, inv);
                let naddr_sum: u32 = naddr.iter().sum();

                if naddr_sum + g < threshold
                    && (nadd_sum == 0
                        || self.search(
                            state,
                            inv,
                            new_blank,
                            Some(blank),
                            g + 1,
                            nadd,
                            naddr,
                            threshold,
                            path,
                            nodes_generated,
                        ))
                {
                    succeeded = true;
                }
            }

            if succeeded {
                path[g as usize] = tile;
                return true;
            }

            state[new_blank as usize] = tile;
            inv[tile as usize] = new_blank;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::TABLE_SIZE;

    fn goal_state() -> [u8; BOARD_SIZE] {
        let mut state = [0u8; BOARD_SIZE];
        for (square, tile) in state.iter_mut().enumerate() {
            *tile = square as u8;
        }
        state
    }

    fn inverse_of(state: &[u8; BOARD_SIZE]) -> [u8; BOARD_SIZE] {
        let mut inv = [0u8; BOARD_SIZE];
        for (square, &tile) in state.iter().enumerate() {
            inv[tile as usize] = square as u8;
        }
        inv
    }

    /// A database filled with `fill` everywhere except the entries this test cares
    /// about, which are patched to their true pattern-graph distance.
    fn patched_table(fill: u8, patches: &[(usize, u8)]) -> Database {
        let mut table = vec![fill; TABLE_SIZE].into_boxed_slice();
        for &(index, value) in patches {
            table[index] = value;
        }
        Database::from_table(table)
    }

    #[test]
    fn trivial_solve_needs_no_iterations() {
        // Every database entry is consistent with the goal placement's true distance
        // of zero; since the goal's heuristic sum is zero for every pattern, `solve`
        // must short-circuit without calling `search` at all.
        let h0 = patched_table(0, &[]);
        let h1 = patched_table(0, &[]);
        let solver = Solver::new(&h0, &h1);

        let mut iterations = 0;
        let solution = solver
            .solve(&goal_state(), |_stats| iterations += 1)
            .unwrap();

        assert_eq!(iterations, 0);
        assert_eq!(solution.threshold, 0);
        assert!(solution.path.is_empty());
        assert_eq!(solution.total_nodes, 0);
    }

    #[test]
    fn one_move_solve_finds_the_single_tile_move() {
        let mut initial = goal_state();
        initial.swap(0, 1); // blank and tile 1 swap places

        let goal_inv = inverse_of(&goal_state());
        let initial_inv = inverse_of(&initial);

        // Only pattern 0 (and its reflection) are affected by moving tile 1; every
        // other pattern's contribution is read at the goal placement, which is 0.
        let h0 = patched_table(
            99,
            &[
                (pattern::hash0(&initial_inv), 1),
                (pattern::hashref0(&initial_inv), 1),
                (pattern::hash0(&goal_inv), 0),
                (pattern::hashref0(&goal_inv), 0),
            ],
        );
        let h1 = patched_table(
            99,
            &[
                (pattern::hash1(&goal_inv), 0),
                (pattern::hash2(&goal_inv), 0),
                (pattern::hash3(&goal_inv), 0),
                (pattern::hashref1(&goal_inv), 0),
                (pattern::hashref2(&goal_inv), 0),
                (pattern::hashref3(&goal_inv), 0),
            ],
        );
        let solver = Solver::new(&h0, &h1);

        let mut iterations = 0;
        let solution = solver
            .solve(&initial, |_stats| iterations += 1)
            .unwrap();

        assert_eq!(iterations, 1);
        assert_eq!(solution.threshold, 1);
        assert_eq!(solution.path, vec![1]);
    }

    #[test]
    fn solve_rejects_wrong_length_input() {
        let h0 = patched_table(0, &[]);
        let h1 = patched_table(0, &[]);
        let solver = Solver::new(&h0, &h1);

        let err = solver.solve(&[0, 1, 2], |_| {}).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::WrongLength(3))
        ));
    }

    #[test]
    fn solve_rejects_non_permutation_input() {
        let h0 = patched_table(0, &[]);
        let h1 = patched_table(0, &[]);
        let solver = Solver::new(&h0, &h1);

        let mut initial = goal_state();
        initial[0] = initial[1]; // duplicate value, no longer a permutation

        let err = solver.solve(&initial, |_| {}).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NotAPermutation(_))
        ));
    }

    #[test]
    fn failed_search_restores_state_and_inverse() {
        let h0 = patched_table(99, &[]);
        let h1 = patched_table(99, &[]);
        let solver = Solver::new(&h0, &h1);

        let mut state = goal_state();
        state.swap(0, 1);
        let mut inv = inverse_of(&state);
        let state_before = state;
        let inv_before = inv;

        let add = solver.regular_contributions(&inv);
        let addr = solver.reflected_contributions(&inv);
        let mut path = [0u8; MAX_DEPTH as usize];
        let mut nodes_generated = 0u64;

        // threshold 0 makes every move immediately exceed the cutoff, so this
        // iteration is guaranteed to fail and every move it tries must be undone.
        let solved = solver.search(
            &mut state,
            &mut inv,
            1,
            None,
            0,
            add,
            addr,
            0,
            &mut path,
            &mut nodes_generated,
        );

        assert!(!solved);
        assert_eq!(state, state_before);
        assert_eq!(inv, inv_before);
    }

    #[test]
    fn reflected_contributions_match_regular_contributions_on_the_reflected_state() {
        // For any state, each `reflected_contribution_for` entry reads the same table
        // cell a `regular_contribution_for` lookup would read for the diagonally
        // reflected state: the tiles that fill a pattern's reflected home squares are
        // exactly those squares mapped through `board::REFLECT`, so folding the
        // fully-reflected inverse array through the *regular* hash of each pattern's
        // own home-square tile set must agree with the solver's `hashref*` result.
        let mut state = goal_state();
        state.swap(0, 10); // blank and tile 10 (a pattern-1/2 tile) swap places
        let inv = inverse_of(&state);

        let mut reflected_inv = [0u8; BOARD_SIZE];
        for (tile, square) in reflected_inv.iter_mut().enumerate() {
            *square = board::REFLECT[inv[tile] as usize];
        }

        let expected_hashref0 = pattern::hash0(&{
            // Pattern 0's reflected home-square tile set is {5,10,1,6,11,12}; relabel
            // `reflected_inv` so that `hash0`'s fixed tile indices {1,2,5,6,7,12} read
            // those entries instead, reproducing `hashref0` via the regular fold.
            let mut relabelled = reflected_inv;
            relabelled[1] = reflected_inv[5];
            relabelled[2] = reflected_inv[10];
            relabelled[5] = reflected_inv[1];
            relabelled[6] = reflected_inv[6];
            relabelled[7] = reflected_inv[11];
            relabelled[12] = reflected_inv[12];
            relabelled
        });

        let h0 = patched_table(0, &[]);
        let h1 = patched_table(0, &[]);
        let solver = Solver::new(&h0, &h1);
        assert_eq!(pattern::hashref0(&inv), expected_hashref0);
        let _ = solver.reflected_contributions(&inv); // exercises the same code path
    }
}
