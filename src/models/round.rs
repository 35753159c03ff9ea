//! Round and matchup models.
//!
//! A round is one step of the circle-method rotation for a flight: every
//! member is paired with exactly one other member. In padded flights one
//! pairing involves the bye; that competitor sits out the round.

use serde::{Deserialize, Serialize};

use super::Competitor;

/// A pairing of two flight members.
///
/// The a/b order is a presentation detail (e.g. home/away) and carries no
/// scheduling meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup<T> {
    pub team_a: Competitor<T>,
    pub team_b: Competitor<T>,
}

impl<T> Matchup<T> {
    /// Creates a matchup.
    pub fn new(team_a: Competitor<T>, team_b: Competitor<T>) -> Self {
        Self { team_a, team_b }
    }

    /// Whether one side is the bye.
    #[inline]
    pub fn is_bye(&self) -> bool {
        self.team_a.is_bye() || self.team_b.is_bye()
    }

    /// Both real teams, or `None` for a bye pairing.
    pub fn teams(&self) -> Option<(&T, &T)> {
        Some((self.team_a.team()?, self.team_b.team()?))
    }

    /// Whether `team` takes part in this matchup.
    pub fn involves(&self, team: &T) -> bool
    where
        T: PartialEq,
    {
        self.team_a.team() == Some(team) || self.team_b.team() == Some(team)
    }
}

/// One round of a flight's round-robin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round<T> {
    /// Flight this round belongs to.
    pub flight_id: usize,
    /// Round number within the flight, starting at 1 and continuing
    /// across cycles.
    pub round: usize,
    /// Cycle index, starting at 0.
    pub cycle: usize,
    /// All pairings, including the bye pairing if any.
    pub matchups: Vec<Matchup<T>>,
}

impl<T> Round<T> {
    /// Pairings between two real teams.
    pub fn games(&self) -> impl Iterator<Item = &Matchup<T>> {
        self.matchups.iter().filter(|m| !m.is_bye())
    }

    /// Number of real games in the round.
    pub fn game_count(&self) -> usize {
        self.games().count()
    }

    /// The team sitting out this round, if the flight has a bye.
    pub fn bye_team(&self) -> Option<&T> {
        self.matchups
            .iter()
            .find(|m| m.is_bye())
            .and_then(|m| m.team_a.team().or_else(|| m.team_b.team()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Round<&'static str> {
        Round {
            flight_id: 0,
            round: 1,
            cycle: 0,
            matchups: vec![
                Matchup::new(Competitor::Team("a"), Competitor::Bye),
                Matchup::new(Competitor::Team("b"), Competitor::Team("e")),
                Matchup::new(Competitor::Team("c"), Competitor::Team("d")),
            ],
        }
    }

    #[test]
    fn test_games_skip_bye() {
        let r = round();
        assert_eq!(r.matchups.len(), 3);
        assert_eq!(r.game_count(), 2);
        assert!(r.games().all(|m| m.teams().is_some()));
    }

    #[test]
    fn test_bye_team() {
        assert_eq!(round().bye_team(), Some(&"a"));

        let mut r = round();
        r.matchups.remove(0);
        assert_eq!(r.bye_team(), None);
    }

    #[test]
    fn test_matchup_involves() {
        let m = Matchup::new(Competitor::Team(1), Competitor::Team(2));
        assert!(m.involves(&1));
        assert!(m.involves(&2));
        assert!(!m.involves(&3));
        assert_eq!(m.teams(), Some((&1, &2)));
    }
}
