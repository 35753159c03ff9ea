//! Round generation, configuration, and KPI evaluation.
//!
//! # Algorithm
//!
//! `generate_rounds` builds a flight's rounds with the circle method: the
//! first team stays fixed while the others rotate one position per round.
//! A flight of `n` teams (byes included) yields `n - 1` rounds per cycle
//! in which every pair meets once.
//!
//! # KPI
//!
//! `ScheduleKpi` measures how evenly game times and surfaces were spread
//! over the teams of a generated schedule.
//!
//! # References
//!
//! - Kirkman (1847), "On a problem in combinations"
//! - Rasmussen & Trick (2008), "Round robin scheduling – a survey"

mod config;
mod kpi;
mod rotation;

pub use config::{RuleConfig, ScheduleConfig};
pub use kpi::ScheduleKpi;
pub use rotation::generate_rounds;
