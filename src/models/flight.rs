//! Flight (division) model.
//!
//! A flight is a group of competitors that play a round-robin only among
//! themselves. Leagues may be configured as a single flat team list or as
//! several divisions; [`Teams`] normalizes both shapes into flights.

use serde::{Deserialize, Serialize};

use super::{Competitor, TeamKey};
use crate::validation::{validate_teams, ValidationError};

/// A validated, bye-padded group of competitors.
///
/// # Invariants
/// - At least two real competitors, all distinct.
/// - An odd team count is padded with exactly one [`Competitor::Bye`]
///   at the end, so [`Flight::size`] is always even.
///
/// Deserialized flights are rebuilt through [`Flight::new`], so these
/// hold for data read from outside as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawFlight<T>",
    bound(deserialize = "T: TeamKey + Deserialize<'de>")
)]
pub struct Flight<T> {
    /// Flight index (position in the league's flight list).
    pub id: usize,
    members: Vec<Competitor<T>>,
}

impl<T: TeamKey> Flight<T> {
    /// Creates a flight, validating the team list.
    ///
    /// # Errors
    /// `TooFewTeams` for fewer than two teams, `DuplicateTeam` if a team
    /// is listed twice.
    pub fn new(id: usize, teams: Vec<T>) -> Result<Self, ValidationError> {
        validate_teams(&teams)?;

        let odd = teams.len() % 2 == 1;
        let mut members: Vec<Competitor<T>> = teams.into_iter().map(Competitor::Team).collect();
        if odd {
            members.push(Competitor::Bye);
        }

        Ok(Self { id, members })
    }

    /// Members in rotation order, including the bye if present.
    pub fn members(&self) -> &[Competitor<T>] {
        &self.members
    }

    /// Real competitors (bye excluded).
    pub fn teams(&self) -> impl Iterator<Item = &T> {
        self.members.iter().filter_map(Competitor::team)
    }

    /// Number of real competitors.
    pub fn team_count(&self) -> usize {
        self.members.iter().filter(|m| !m.is_bye()).count()
    }

    /// Padded size (always even).
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Whether a bye was inserted.
    pub fn has_bye(&self) -> bool {
        self.members.iter().any(Competitor::is_bye)
    }

    /// Whether `team` belongs to this flight.
    pub fn contains(&self, team: &T) -> bool {
        self.teams().any(|t| t == team)
    }

    /// Rounds per cycle produced by the circle method.
    #[inline]
    pub fn rounds_per_cycle(&self) -> usize {
        self.size() - 1
    }
}

/// Serialized shape of a [`Flight`], before validation.
#[derive(Deserialize)]
struct RawFlight<T> {
    id: usize,
    members: Vec<Competitor<T>>,
}

impl<T: TeamKey> TryFrom<RawFlight<T>> for Flight<T> {
    type Error = ValidationError;

    fn try_from(raw: RawFlight<T>) -> Result<Self, Self::Error> {
        let teams = raw
            .members
            .into_iter()
            .filter_map(|m| match m {
                Competitor::Team(t) => Some(t),
                Competitor::Bye => None,
            })
            .collect();
        Flight::new(raw.id, teams)
    }
}

/// A league's teams: one flat list or several divisions.
///
/// Deserializes untagged, so both `["a", "b"]` and `[["a", "b"], ["c", "d"]]`
/// are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Teams<T> {
    /// Several independent flights.
    Divisions(Vec<Vec<T>>),
    /// A single flight.
    Flat(Vec<T>),
}

impl<T: TeamKey> Teams<T> {
    /// Normalizes into validated flights, numbered from 0.
    ///
    /// An empty team list yields no flights; the missing-teams error
    /// is raised later, at generation time.
    pub fn into_flights(self) -> Result<Vec<Flight<T>>, ValidationError> {
        let lists = match self {
            Teams::Flat(teams) if teams.is_empty() => Vec::new(),
            Teams::Flat(teams) => vec![teams],
            Teams::Divisions(divisions) => divisions,
        };

        lists
            .into_iter()
            .enumerate()
            .map(|(id, teams)| Flight::new(id, teams))
            .collect()
    }
}

impl<T> Default for Teams<T> {
    fn default() -> Self {
        Teams::Flat(Vec::new())
    }
}

impl<T> From<Vec<T>> for Teams<T> {
    fn from(teams: Vec<T>) -> Self {
        Teams::Flat(teams)
    }
}

impl<T> From<Vec<Vec<T>>> for Teams<T> {
    fn from(divisions: Vec<Vec<T>>) -> Self {
        Teams::Divisions(divisions)
    }
}
