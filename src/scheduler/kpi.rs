//! Schedule quality metrics (KPIs).
//!
//! Computes fairness indicators from a generated schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Games | Games placed across all gamedays |
//! | Season Span | First and last gameday |
//! | Games per Team | Games each team plays |
//! | Time Spread | max - min games of a team across the offered game times |
//! | Surface Spread | max - min games of a team across the offered surfaces |
//!
//! A spread of 0 means a team played equally often at every time (or on
//! every surface) the rules offer.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveTime};

use crate::models::{Schedule, TeamKey};

/// Schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi<T: TeamKey> {
    /// Number of games.
    pub total_games: usize,
    /// Number of gamedays.
    pub gameday_count: usize,
    /// Date of the first gameday.
    pub first_date: Option<NaiveDate>,
    /// Date of the last gameday.
    pub last_date: Option<NaiveDate>,
    /// Games per team.
    pub games_per_team: HashMap<T, usize>,
    /// Per-team game-time spread.
    pub time_spread: HashMap<T, u32>,
    /// Per-team surface spread.
    pub surface_spread: HashMap<T, u32>,
}

impl<T: TeamKey> ScheduleKpi<T> {
    /// Computes KPIs from a schedule.
    ///
    /// Every team of every flight is reported, with zero counts if the
    /// schedule has not been generated yet.
    pub fn calculate(schedule: &Schedule<T>) -> Self {
        let offered_times: BTreeSet<NaiveTime> = schedule
            .rules()
            .iter()
            .flat_map(|r| r.game_times().iter().copied())
            .collect();
        let offered_surfaces: BTreeSet<&str> = schedule
            .rules()
            .iter()
            .flat_map(|r| r.surfaces().iter().map(String::as_str))
            .collect();

        let mut games_per_team = HashMap::new();
        let mut time_spread = HashMap::new();
        let mut surface_spread = HashMap::new();

        for team in schedule.flights().iter().flat_map(|f| f.teams()) {
            let games = schedule.by_team(team);

            let mut times: HashMap<NaiveTime, u32> = HashMap::new();
            let mut surfaces: HashMap<&str, u32> = HashMap::new();
            for g in &games {
                *times.entry(g.time).or_insert(0) += 1;
                *surfaces.entry(g.surface.as_str()).or_insert(0) += 1;
            }

            games_per_team.insert(team.clone(), games.len());
            time_spread.insert(team.clone(), spread(&offered_times, &times));
            surface_spread.insert(team.clone(), spread(&offered_surfaces, &surfaces));
        }

        let gamedays = schedule.gamedays();
        Self {
            total_games: schedule.game_count(),
            gameday_count: gamedays.len(),
            first_date: gamedays.first().map(|gd| gd.date),
            last_date: gamedays.last().map(|gd| gd.date),
            games_per_team,
            time_spread,
            surface_spread,
        }
    }

    /// Largest game-time spread of any team.
    pub fn max_time_spread(&self) -> u32 {
        self.time_spread.values().copied().max().unwrap_or(0)
    }

    /// Largest surface spread of any team.
    pub fn max_surface_spread(&self) -> u32 {
        self.surface_spread.values().copied().max().unwrap_or(0)
    }

    /// Whether the schedule meets the given fairness thresholds.
    pub fn meets_thresholds(&self, max_time_spread: u32, max_surface_spread: u32) -> bool {
        self.max_time_spread() <= max_time_spread && self.max_surface_spread() <= max_surface_spread
    }
}

fn spread<K: Ord + std::hash::Hash>(offered: &BTreeSet<K>, counts: &HashMap<K, u32>) -> u32 {
    let per_value = offered.iter().map(|k| counts.get(k).copied().unwrap_or(0));
    let max = per_value.clone().max().unwrap_or(0);
    let min = per_value.min().unwrap_or(0);
    max - min
}
