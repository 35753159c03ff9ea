//! Competitor model.
//!
//! Competitors are user-supplied values of any hashable, comparable type
//! (team names, numeric ids, structs). Odd-sized flights are padded with
//! a [`Competitor::Bye`] marker, a separate variant that can never
//! collide with user data.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Bounds required of a user-supplied competitor value.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Debug` type.
pub trait TeamKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> TeamKey for T {}

/// A flight member: either a real team or the bye placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competitor<T> {
    /// A real, user-supplied competitor.
    Team(T),
    /// Placeholder opponent for odd-sized flights.
    Bye,
}

impl<T> Competitor<T> {
    /// The real team, or `None` for the bye.
    #[inline]
    pub fn team(&self) -> Option<&T> {
        match self {
            Competitor::Team(t) => Some(t),
            Competitor::Bye => None,
        }
    }

    /// Whether this is the bye placeholder.
    #[inline]
    pub fn is_bye(&self) -> bool {
        matches!(self, Competitor::Bye)
    }
}

impl<T> From<T> for Competitor<T> {
    fn from(team: T) -> Self {
        Competitor::Team(team)
    }
}
