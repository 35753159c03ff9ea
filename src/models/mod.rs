//! League scheduling domain models.
//!
//! Provides the data types for describing a league (teams, flights,
//! weekly rules, season calendar) and the schedule generated from it
//! (rounds, games, gamedays).
//!
//! # Domain Mappings
//!
//! | u-roundrobin | Soccer | Hockey | Esports |
//! |--------------|--------|--------|---------|
//! | Flight | Division | Conference | Group |
//! | Rule | Match night | Ice time | Broadcast window |
//! | Surface | Pitch | Rink | Server |
//! | Gameday | Matchday | Game night | Match day |

mod calendar;
mod competitor;
mod flight;
mod game;
mod round;
mod rule;
mod schedule;

pub use calendar::SeasonCalendar;
pub use competitor::{Competitor, TeamKey};
pub use flight::{Flight, Teams};
pub use game::{Game, Gameday, Slot};
pub use round::{Matchup, Round};
pub use rule::{parse_game_time, weekday_from_sunday, Rule, DEFAULT_GAME_TIME, DEFAULT_SURFACE};
pub use schedule::Schedule;
