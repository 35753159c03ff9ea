//! Serializable league configuration.
//!
//! A [`ScheduleConfig`] is the plain-data form of a [`Schedule`]'s inputs,
//! suitable for loading from JSON or any other serde format.
//!
//! ```
//! use u_roundrobin::scheduler::ScheduleConfig;
//!
//! let json = r#"{
//!     "teams": [["Lions", "Tigers"], ["Bears", "Wolves", "Hawks"]],
//!     "rules": [{ "wday": 3, "game_times": ["7:00 PM"], "surfaces": ["A", "B"] }],
//!     "start_date": "2024-01-03",
//!     "seed": 9
//! }"#;
//!
//! let config: ScheduleConfig<String> = serde_json::from_str(json).unwrap();
//! let mut schedule = config.build().unwrap();
//! schedule.generate().unwrap();
//! assert_eq!(schedule.game_count(), 1 + 3);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Rule, Schedule, TeamKey, Teams};
use crate::validation::ValidationError;

/// A rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Weekday, 0 = Sunday … 6 = Saturday.
    pub wday: u32,
    /// Game times such as "7:00 PM" or "19:00". Empty means "7:00 PM".
    #[serde(default)]
    pub game_times: Vec<String>,
    /// Surface names. Empty means "Field #1".
    #[serde(default)]
    pub surfaces: Vec<String>,
}

impl RuleConfig {
    /// Parses into a [`Rule`].
    ///
    /// # Errors
    /// `InvalidWeekday` or `InvalidGameTime`.
    pub fn to_rule(&self) -> Result<Rule, ValidationError> {
        Rule::parse(self.wday, &self.game_times, self.surfaces.iter().cloned())
    }
}

/// League configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig<T> {
    /// Teams, as a flat list or as divisions.
    #[serde(default)]
    pub teams: Teams<T>,
    /// Rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// Number of cycles.
    #[serde(default = "default_cycles")]
    pub cycles: usize,
    /// Whether team order is reshuffled every cycle.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// First date on which games may be played; today if absent.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Dates without games.
    #[serde(default)]
    pub exclude_dates: Vec<NaiveDate>,
    /// Random seed; fresh entropy if absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_cycles() -> usize {
    1
}

fn default_shuffle() -> bool {
    true
}

impl<T> ScheduleConfig<T> {
    /// Creates a configuration with default settings and no rules.
    pub fn new(teams: impl Into<Teams<T>>) -> Self {
        Self {
            teams: teams.into(),
            rules: Vec::new(),
            cycles: default_cycles(),
            shuffle: default_shuffle(),
            start_date: None,
            exclude_dates: Vec::new(),
            seed: None,
        }
    }

    /// Adds a rule.
    pub fn with_rule(mut self, rule: RuleConfig) -> Self {
        self.rules.push(rule);
        self
    }
}

impl<T: TeamKey> ScheduleConfig<T> {
    /// Builds the schedule described by this configuration.
    ///
    /// # Errors
    /// Any team or rule validation error. Missing teams or rules are
    /// reported later, by [`Schedule::generate`].
    pub fn build(self) -> Result<Schedule<T>, ValidationError> {
        let rules = self
            .rules
            .iter()
            .map(RuleConfig::to_rule)
            .collect::<Result<Vec<_>, _>>()?;

        let mut schedule = Schedule::new()
            .with_teams(self.teams)?
            .with_rules(rules)
            .with_cycles(self.cycles)
            .with_shuffle(self.shuffle)
            .with_excluded_dates(self.exclude_dates);
        if let Some(date) = self.start_date {
            schedule = schedule.with_start_date(date);
        }
        if let Some(seed) = self.seed {
            schedule = schedule.with_seed(seed);
        }
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;
    use chrono::{NaiveTime, Weekday};

    #[test]
    fn test_defaults_from_json() {
        let config: ScheduleConfig<u32> = serde_json::from_str(r#"{"teams": [1, 2, 3]}"#).unwrap();
        assert_eq!(config.cycles, 1);
        assert!(config.shuffle);
        assert!(config.rules.is_empty());
        assert_eq!(config.teams, Teams::Flat(vec![1, 2, 3]));
    }

    #[test]
    fn test_rule_config_defaults() {
        let rule: RuleConfig = serde_json::from_str(r#"{"wday": 6}"#).unwrap();
        let rule = rule.to_rule().unwrap();
        assert_eq!(rule.weekday, Weekday::Sat);
        assert_eq!(rule.game_times(), &[NaiveTime::from_hms_opt(19, 0, 0).unwrap()]);
        assert_eq!(rule.surfaces(), &["Field #1".to_string()]);
    }

    #[test]
    fn test_build_full() {
        let json = r#"{
            "teams": ["a", "b", "c", "d"],
            "rules": [
                { "wday": 2, "game_times": ["6:00 PM", "8:00 PM"] },
                { "wday": 4, "surfaces": ["North", "South"] }
            ],
            "cycles": 2,
            "shuffle": false,
            "start_date": "2024-01-01",
            "exclude_dates": ["2024-01-04"],
            "seed": 3
        }"#;
        let config: ScheduleConfig<String> = serde_json::from_str(json).unwrap();
        let mut schedule = config.build().unwrap();

        assert_eq!(schedule.rules().len(), 2);
        assert_eq!(schedule.cycles(), 2);
        assert!(!schedule.shuffle());
        assert_eq!(schedule.calendar().start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        schedule.generate().unwrap();
        assert_eq!(schedule.game_count(), 12);
        assert!(schedule.is_round_robin(0));
        let excluded = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert!(schedule.gamedays().iter().all(|gd| gd.date != excluded));
    }

    #[test]
    fn test_build_rejects_bad_rule() {
        let config = ScheduleConfig::new(vec![1, 2]).with_rule(RuleConfig {
            wday: 7,
            game_times: Vec::new(),
            surfaces: Vec::new(),
        });
        assert_eq!(config.build().unwrap_err().kind, ValidationErrorKind::InvalidWeekday);

        let config = ScheduleConfig::new(vec![1, 2]).with_rule(RuleConfig {
            wday: 1,
            game_times: vec!["25:00".into()],
            surfaces: Vec::new(),
        });
        assert_eq!(config.build().unwrap_err().kind, ValidationErrorKind::InvalidGameTime);
    }

    #[test]
    fn test_build_rejects_duplicate_team() {
        let config = ScheduleConfig::new(Teams::Divisions(vec![vec![1, 2], vec![3, 3]]));
        assert_eq!(config.build().unwrap_err().kind, ValidationErrorKind::DuplicateTeam);
    }

    #[test]
    fn test_round_trip_json() {
        let config = ScheduleConfig::new(vec!["x".to_string(), "y".to_string()]).with_rule(RuleConfig {
            wday: 0,
            game_times: vec!["10:00 AM".into()],
            surfaces: vec!["Rink".into()],
        });
        let json = serde_json::to_string(&config).unwrap();
        let back: ScheduleConfig<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
