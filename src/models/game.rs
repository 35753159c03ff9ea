//! Slot, game, and gameday models.
//!
//! A [`Slot`] is one concrete placement opportunity. A [`Game`] is a real
//! matchup bound to a slot; a [`Gameday`] groups all games of one date.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A (date, time, surface) placement opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub surface: String,
}

impl Slot {
    /// Creates a slot.
    pub fn new(date: NaiveDate, time: NaiveTime, surface: impl Into<String>) -> Self {
        Self {
            date,
            time,
            surface: surface.into(),
        }
    }
}

/// A matchup placed on a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game<T> {
    pub team_a: T,
    pub team_b: T,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub surface: String,
    /// Flight the matchup comes from.
    pub flight_id: usize,
    /// Round number within the flight.
    pub round: usize,
}

impl<T> Game<T> {
    /// Whether `team` plays in this game.
    pub fn involves(&self, team: &T) -> bool
    where
        T: PartialEq,
    {
        self.team_a == *team || self.team_b == *team
    }

    /// The opponent of `team`, or `None` if `team` does not play.
    pub fn opponent_of(&self, team: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        if self.team_a == *team {
            Some(&self.team_b)
        } else if self.team_b == *team {
            Some(&self.team_a)
        } else {
            None
        }
    }

    /// The slot occupied by this game.
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.time, self.surface.clone())
    }
}

/// All games sharing one date, ordered by (time, surface).
///
/// Surface labels compare as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gameday<T> {
    pub date: NaiveDate,
    pub games: Vec<Game<T>>,
}

impl<T> Gameday<T> {
    /// Creates a gameday, sorting its games by (time, surface).
    pub fn new(date: NaiveDate, mut games: Vec<Game<T>>) -> Self {
        games.sort_by(|a, b| (a.time, &a.surface).cmp(&(b.time, &b.surface)));
        Self { date, games }
    }

    /// Number of games on this date.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the gameday has no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
