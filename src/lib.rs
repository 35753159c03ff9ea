//! Round-robin league scheduling.
//!
//! Builds season schedules in which every team of a flight meets every
//! other team a fixed number of times, then places those games on
//! concrete dates, times, and playing surfaces taken from weekly rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Flight`, `Rule`, `Round`, `Game`,
//!   `Gameday`, `SeasonCalendar`, `Schedule`
//! - **`scheduler`**: Circle-method round generation, serde configuration,
//!   balance KPIs
//! - **`dispatching`**: Greedy slot placement with pluggable slot rules
//! - **`validation`**: Input integrity checks (duplicate teams, weekdays,
//!   game times, missing inputs)
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_roundrobin::models::{Rule, Schedule};
//!
//! let mut schedule = Schedule::new()
//!     .with_teams(vec!["Lions", "Tigers", "Bears", "Wolves", "Hawks", "Moose"])
//!     .unwrap()
//!     .with_rule(Rule::parse(3, &["7:00 PM", "9:00 PM"], ["A", "B"]).unwrap())
//!     .with_start_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
//!     .with_seed(1);
//!
//! let gamedays = schedule.generate().unwrap();
//! assert_eq!(gamedays.len(), 5);
//! assert_eq!(schedule.by_team(&"Lions").len(), 5);
//! ```
//!
//! # References
//!
//! - Lamontagne (2010), "RRSchedule"
//! - Rasmussen & Trick (2008), "Round robin scheduling – a survey"

pub mod dispatching;
pub mod models;
pub mod scheduler;
pub mod validation;
