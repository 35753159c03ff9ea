//! Round-robin pairing by the circle method.
//!
//! # Algorithm
//!
//! 1. Keep the first member fixed.
//! 2. Pair position `i` with position `n - 1 - i` for `i < n / 2`.
//! 3. Move the last member to position 1 (rotating everyone but the
//!    fixed member by one place).
//! 4. After `n - 1` rounds the order is back to the start: one cycle is
//!    complete and every member has met every other member exactly once.
//!
//! With shuffling enabled, member order is reshuffled at the start of each
//! cycle. Pairs are emitted front-first in even cycles and back-first in
//! odd cycles, so repeated cycles alternate the a/b sides.
//!
//! # Complexity
//! O(n² · cycles) for a flight of `n` padded members.
//!
//! # Reference
//! Kirkman (1847); see also Lucas (1883), "Récréations mathématiques", vol. 2.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::{Flight, Matchup, Round, TeamKey};

/// Generates all rounds of `flight` over `cycles` cycles.
///
/// Rounds are numbered `1..=(size - 1) * cycles`. Rounds containing the
/// bye are kept; use [`Round::games`] to skip the bye pairing.
///
/// # Example
/// ```
/// use u_roundrobin::models::Flight;
/// use u_roundrobin::scheduler::generate_rounds;
///
/// let flight = Flight::new(0, vec!["a", "b", "c", "d"]).unwrap();
/// let rounds = generate_rounds(&flight, 2, false, &mut rand::rng());
/// assert_eq!(rounds.len(), 6);
/// assert!(rounds.iter().all(|r| r.game_count() == 2));
/// ```
pub fn generate_rounds<T: TeamKey, R: Rng>(
    flight: &Flight<T>,
    cycles: usize,
    shuffle: bool,
    rng: &mut R,
) -> Vec<Round<T>> {
    let n = flight.size();
    let mut order = flight.members().to_vec();
    let mut rounds = Vec::with_capacity(n.saturating_sub(1) * cycles);

    for cycle in 0..cycles {
        if shuffle {
            order.shuffle(rng);
        }

        for _ in 1..n {
            let matchups = (0..n / 2)
                .map(|i| {
                    let front = order[i].clone();
                    let back = order[n - 1 - i].clone();
                    if cycle % 2 == 0 {
                        Matchup::new(front, back)
                    } else {
                        Matchup::new(back, front)
                    }
                })
                .collect();

            rounds.push(Round {
                flight_id: flight.id,
                round: rounds.len() + 1,
                cycle,
                matchups,
            });

            rotate(&mut order);
        }
    }

    debug!(
        flight = flight.id,
        teams = flight.team_count(),
        cycles,
        rounds = rounds.len(),
        "generated round-robin rounds"
    );

    rounds
}

/// Moves the last member to position 1, keeping position 0 fixed.
fn rotate<C>(order: &mut [C]) {
    if order.len() > 2 {
        order[1..].rotate_right(1);
    }
}
