//! Greedy partner matching.

use rand::Rng;

use super::{assert_even, cost_matrix};
use crate::history::MatchHistory;
use crate::models::{PlayerId, Team};
use crate::random::{break_tie, shuffle};

/// Pairs `active` players greedily.
///
/// Players are processed in the given order (shuffled first when
/// `randomize` is set). The next unpaired player is paired with the
/// unpaired candidate they have partnered least; ties go to the earliest
/// candidate, or a random one when `randomize` is set.
///
/// # Panics
/// Panics if `active` has an odd number of players.
///
/// # Examples
///
/// ```
/// use u_americano::history::MatchHistory;
/// use u_americano::pairing::form_partner_pairs;
/// use u_americano::random::create_rng;
///
/// let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
/// let history = MatchHistory::new(&ids);
/// let pairs = form_partner_pairs(&ids, &history, false, &mut create_rng(0));
/// assert_eq!(pairs, vec![["A".to_string(), "B".to_string()], ["C".to_string(), "D".to_string()]]);
/// ```
pub fn form_partner_pairs<R: Rng + ?Sized>(
    active: &[PlayerId],
    history: &MatchHistory,
    randomize: bool,
    rng: &mut R,
) -> Vec<Team> {
    assert_even(active.len());

    let mut order: Vec<&PlayerId> = active.iter().collect();
    if randomize {
        shuffle(&mut order, rng);
    }
    let cost = cost_matrix(&order, history);

    greedy_indices(&cost, randomize, rng)
        .into_iter()
        .map(|(a, b)| [order[a].clone(), order[b].clone()])
        .collect()
}

/// Greedy matching over positions `0..cost.len()`.
pub(super) fn greedy_indices<R: Rng + ?Sized>(
    cost: &[Vec<u32>],
    randomize: bool,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let n = cost.len();
    let mut paired = vec![false; n];
    let mut pairs = Vec::with_capacity(n / 2);
    let mut tied = Vec::with_capacity(n);

    for i in 0..n {
        if paired[i] {
            continue;
        }
        paired[i] = true;

        // everything before i is already paired
        let mut best = u32::MAX;
        tied.clear();
        for j in (i + 1)..n {
            if paired[j] {
                continue;
            }
            let c = cost[i][j];
            if c < best {
                best = c;
                tied.clear();
                tied.push(j);
            } else if c == best {
                tied.push(j);
            }
        }

        let j = break_tie(&tied, randomize, rng);
        paired[j] = true;
        pairs.push((i, j));
    }

    pairs
}
