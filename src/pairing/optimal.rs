//! Budgeted branch-and-bound partner matching.
//!
//! # Algorithm
//!
//! 1. Seed the incumbent with the deterministic greedy matching.
//! 2. Depth-first search over perfect matchings: the first unpaired player
//!    tries each unpaired candidate, cheapest first.
//! 3. Prune a branch as soon as its partial cost reaches the incumbent;
//!    candidates are sorted, so the rest of the level is pruned with it.
//! 4. Stop when the tree is exhausted, a zero-cost matching is found, or
//!    the node budget runs out.
//!
//! The search keeps its own explicit stack instead of recursing, so the
//! budget is checked at every expansion and depth is never a concern.

use rand::Rng;

use super::greedy::greedy_indices;
use super::{assert_even, cost_matrix};
use crate::history::MatchHistory;
use crate::models::{PlayerId, Team};
use crate::random::shuffle;

/// Result of [`form_partner_pairs_optimal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalPairing {
    /// Best pairs found.
    pub pairs: Vec<Team>,
    /// Partner-repeat cost of `pairs`.
    pub cost: u32,
    /// Search nodes expanded.
    pub iterations: usize,
    /// Whether the budget ran out before the search space was exhausted.
    ///
    /// When `true`, `pairs` is the best found so far, not a proven optimum.
    pub exhausted: bool,
}

/// One level of the search: `first` trying each of `candidates`.
struct Frame {
    first: usize,
    candidates: Vec<usize>,
    next: usize,
    base_cost: u32,
    applied: Option<usize>,
}

/// Finds a minimum-repeat partner matching, exploring at most `budget`
/// search nodes.
///
/// With `randomize`, candidates with equal cost are tried in random order,
/// so different runs can return different optimal matchings.
///
/// # Panics
/// Panics if `active` has an odd number of players.
///
/// # Examples
///
/// ```
/// use u_americano::history::MatchHistory;
/// use u_americano::models::MatchAssignment;
/// use u_americano::pairing::form_partner_pairs_optimal;
/// use u_americano::random::create_rng;
///
/// let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
/// let history = MatchHistory::new(&ids)
///     .update(&[MatchAssignment::new(0, ["A".into(), "B".into()], ["C".into(), "D".into()])]);
///
/// let result = form_partner_pairs_optimal(&ids, &history, false, 1_000, &mut create_rng(0));
/// assert_eq!(result.cost, 0);
/// assert!(!result.exhausted);
/// ```
pub fn form_partner_pairs_optimal<R: Rng + ?Sized>(
    active: &[PlayerId],
    history: &MatchHistory,
    randomize: bool,
    budget: usize,
    rng: &mut R,
) -> OptimalPairing {
    assert_even(active.len());

    let order: Vec<&PlayerId> = active.iter().collect();
    let cost = cost_matrix(&order, history);
    let n = order.len();

    // never drawn from: the incumbent is the deterministic greedy matching
    let mut best = greedy_indices(&cost, false, rng);
    let mut best_cost: u32 = best.iter().map(|&(a, b)| cost[a][b]).sum();
    let mut iterations = 0usize;
    let mut exhausted = false;

    if n > 2 && best_cost > 0 {
        let mut paired = vec![false; n];
        let mut current: Vec<(usize, usize)> = Vec::with_capacity(n / 2);
        paired[0] = true;
        let mut stack = vec![Frame {
            first: 0,
            candidates: candidates_for(0, &paired, &cost, randomize, rng),
            next: 0,
            base_cost: 0,
            applied: None,
        }];

        while let Some(top) = stack.last_mut() {
            if let Some(c) = top.applied.take() {
                paired[c] = false;
                current.pop();
            }
            if top.next >= top.candidates.len() {
                paired[top.first] = false;
                stack.pop();
                continue;
            }

            let first = top.first;
            let partner = top.candidates[top.next];
            top.next += 1;
            let partial = top.base_cost + cost[first][partner];
            if partial >= best_cost {
                top.next = top.candidates.len();
                continue;
            }
            if iterations >= budget {
                exhausted = true;
                break;
            }
            iterations += 1;

            paired[partner] = true;
            current.push((first, partner));
            top.applied = Some(partner);

            match paired.iter().position(|p| !p) {
                None => {
                    best_cost = partial;
                    best.clone_from(&current);
                    if best_cost == 0 {
                        break;
                    }
                }
                Some(next_first) => {
                    paired[next_first] = true;
                    let candidates = candidates_for(next_first, &paired, &cost, randomize, rng);
                    stack.push(Frame {
                        first: next_first,
                        candidates,
                        next: 0,
                        base_cost: partial,
                        applied: None,
                    });
                }
            }
        }
    }

    if exhausted {
        log::debug!(
            "backtracking budget of {budget} nodes exhausted for {n} players, best cost {best_cost}"
        );
    }

    OptimalPairing {
        pairs: best
            .into_iter()
            .map(|(a, b)| [order[a].clone(), order[b].clone()])
            .collect(),
        cost: best_cost,
        iterations,
        exhausted,
    }
}

/// Unpaired partners for `first`, cheapest first.
fn candidates_for<R: Rng + ?Sized>(
    first: usize,
    paired: &[bool],
    cost: &[Vec<u32>],
    randomize: bool,
    rng: &mut R,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..paired.len())
        .filter(|&j| j != first && !paired[j])
        .collect();
    if randomize {
        shuffle(&mut candidates, rng);
    }
    candidates.sort_by_key(|&j| cost[first][j]);
    candidates
}
