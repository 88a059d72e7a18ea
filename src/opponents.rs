//! Opponent assignment.
//!
//! Groups partner pairs into matches, two pairs per court, preferring
//! pairs whose players have faced each other least. Greedy only: each
//! unassigned pair, in processing order, takes the unassigned opposing pair
//! with the smallest summed opponent count over the four cross pairs.

use rand::Rng;

use crate::history::MatchHistory;
use crate::models::{MatchAssignment, Team};
use crate::random::break_tie;

/// Builds matches from `pairs`, numbering courts 0, 1, 2, ... in order.
///
/// Ties go to the earliest pair, or a random one when `randomize` is set.
///
/// # Panics
/// Panics if `pairs` has an odd length.
///
/// # Examples
///
/// ```
/// use u_americano::history::MatchHistory;
/// use u_americano::opponents::assign_opponents;
/// use u_americano::random::create_rng;
///
/// let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
/// let pairs = vec![["A".to_string(), "B".to_string()], ["C".to_string(), "D".to_string()]];
/// let matches = assign_opponents(&pairs, &MatchHistory::new(&ids), false, &mut create_rng(0));
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].court_index, 0);
/// ```
pub fn assign_opponents<R: Rng + ?Sized>(
    pairs: &[Team],
    history: &MatchHistory,
    randomize: bool,
    rng: &mut R,
) -> Vec<MatchAssignment> {
    assert!(
        pairs.len() % 2 == 0,
        "opponent assignment needs an even number of pairs, got {}",
        pairs.len()
    );

    let n = pairs.len();
    let mut assigned = vec![false; n];
    let mut matches = Vec::with_capacity(n / 2);
    let mut tied = Vec::with_capacity(n);

    for i in 0..n {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;

        let mut best = u32::MAX;
        tied.clear();
        for j in (i + 1)..n {
            if assigned[j] {
                continue;
            }
            let encounters = history.cross_opponent_count(&pairs[i], &pairs[j]);
            if encounters < best {
                best = encounters;
                tied.clear();
                tied.push(j);
            } else if encounters == best {
                tied.push(j);
            }
        }

        let j = break_tie(&tied, randomize, rng);
        assigned[j] = true;
        matches.push(MatchAssignment::new(
            matches.len(),
            pairs[i].clone(),
            pairs[j].clone(),
        ));
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;
    use crate::random::create_rng;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn team(a: &str, b: &str) -> Team {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn test_courts_numbered_sequentially() {
        let roster = ids(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"]);
        let pairs = vec![
            team("A", "B"),
            team("C", "D"),
            team("E", "F"),
            team("G", "H"),
            team("I", "J"),
            team("K", "L"),
        ];
        let matches = assign_opponents(&pairs, &MatchHistory::new(&roster), false, &mut create_rng(0));
        let courts: Vec<usize> = matches.iter().map(|m| m.court_index).collect();
        assert_eq!(courts, vec![0, 1, 2]);
        assert_eq!(matches[0].team1, team("A", "B"));
        assert_eq!(matches[0].team2, team("C", "D"));
    }

    #[test]
    fn test_avoids_repeat_opponents() {
        let roster = ids(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let history = MatchHistory::new(&roster).update(&[
            MatchAssignment::new(0, team("A", "B"), team("C", "D")),
            MatchAssignment::new(1, team("E", "F"), team("G", "H")),
        ]);
        let pairs = vec![team("A", "E"), team("C", "D"), team("B", "F"), team("G", "H")];
        let matches = assign_opponents(&pairs, &history, false, &mut create_rng(0));
        // A-E vs C-D: A met C and D -> 2; vs B-F: 0; vs G-H: E met G and H -> 2
        assert_eq!(matches[0].team1, team("A", "E"));
        assert_eq!(matches[0].team2, team("B", "F"));
        assert_eq!(matches[1].team1, team("C", "D"));
        assert_eq!(matches[1].team2, team("G", "H"));
    }

    #[test]
    fn test_every_pair_used_once() {
        let roster = ids(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let pairs = vec![team("A", "B"), team("C", "D"), team("E", "F"), team("G", "H")];
        let mut rng = create_rng(4);
        for _ in 0..20 {
            let matches = assign_opponents(&pairs, &MatchHistory::new(&roster), true, &mut rng);
            assert_eq!(matches.len(), 2);
            let mut used: Vec<&Team> = matches.iter().flat_map(|m| [&m.team1, &m.team2]).collect();
            used.sort();
            used.dedup();
            assert_eq!(used.len(), 4);
        }
    }

    #[test]
    fn test_no_pairs_no_matches() {
        let matches = assign_opponents(&[], &MatchHistory::new(&[]), false, &mut create_rng(0));
        assert!(matches.is_empty());
    }
}
