//! Recurrence rule model.
//!
//! A rule describes when and where games can be played every week: a
//! weekday, a set of game times, and a set of playing surfaces (fields,
//! courts, sheets). Every occurrence of the weekday offers
//! `game_times × surfaces` slots.
//!
//! # Weekday numbering
//! Numeric weekdays follow the `0 = Sunday … 6 = Saturday` convention.
//!
//! # Ordering
//! Rules are ordered by weekday, then by earliest game time. The
//! dispatcher walks rules in this order, cyclically.
//!
//! # Surfaces
//! Surfaces are text labels, kept in the order given. Within a gameday,
//! games at the same time are listed by label in lexical order, so
//! numeric labels sort as text (`"10"` before `"2"`); zero-pad them
//! (`"02"`, `"10"`) when numeric order matters.

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::Slot;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Game time used when a rule is given no times.
pub const DEFAULT_GAME_TIME: &str = "7:00 PM";

/// Surface used when a rule is given no surfaces.
pub const DEFAULT_SURFACE: &str = "Field #1";

/// A weekly (weekday, times, surfaces) template.
///
/// Deserialization goes through the builders, so sets read from data
/// are sorted, deduplicated, and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRule")]
pub struct Rule {
    /// Day of the week this rule applies to.
    pub weekday: Weekday,
    /// Game times, sorted and deduplicated. Never empty.
    game_times: Vec<NaiveTime>,
    /// Playing surfaces in insertion order, deduplicated. Never empty.
    surfaces: Vec<String>,
}

impl Rule {
    /// Creates a rule with the default time and surface.
    pub fn new(weekday: Weekday) -> Self {
        Self {
            weekday,
            game_times: vec![default_game_time()],
            surfaces: vec![DEFAULT_SURFACE.to_string()],
        }
    }

    /// Parses a rule from a numeric weekday and textual game times.
    ///
    /// Empty `game_times` or `surfaces` fall back to the defaults.
    ///
    /// # Errors
    /// `InvalidWeekday` if `wday > 6`, `InvalidGameTime` if a time cannot
    /// be parsed.
    ///
    /// # Example
    /// ```
    /// use u_roundrobin::models::Rule;
    /// use chrono::Weekday;
    ///
    /// let rule = Rule::parse(3, &["7:00 PM", "9:00PM"], ["A", "B"]).unwrap();
    /// assert_eq!(rule.weekday, Weekday::Wed);
    /// assert_eq!(rule.capacity(), 4);
    /// ```
    pub fn parse<S, I, P>(wday: u32, game_times: &[S], surfaces: I) -> Result<Self, ValidationError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let weekday = weekday_from_sunday(wday)?;
        let times = game_times
            .iter()
            .map(|t| parse_game_time(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(weekday)
            .with_game_times(times)
            .with_surfaces(surfaces))
    }

    /// Replaces the game times. An empty list restores the default.
    pub fn with_game_times(mut self, mut times: Vec<NaiveTime>) -> Self {
        times.sort();
        times.dedup();
        if times.is_empty() {
            times.push(default_game_time());
        }
        self.game_times = times;
        self
    }

    /// Replaces the playing surfaces. An empty list restores the default.
    pub fn with_surfaces<I, P>(mut self, surfaces: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for s in surfaces {
            let s = s.into();
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        if unique.is_empty() {
            unique.push(DEFAULT_SURFACE.to_string());
        }
        self.surfaces = unique;
        self
    }

    /// Game times, earliest first.
    pub fn game_times(&self) -> &[NaiveTime] {
        &self.game_times
    }

    /// Playing surfaces.
    pub fn surfaces(&self) -> &[String] {
        &self.surfaces
    }

    /// Earliest game time of the rule.
    #[inline]
    pub fn earliest_time(&self) -> NaiveTime {
        self.game_times
            .first()
            .copied()
            .unwrap_or_else(default_game_time)
    }

    /// Slots offered by one occurrence: `game_times × surfaces`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.game_times.len() * self.surfaces.len()
    }

    /// All slots of the occurrence on `date`, time-major then surface.
    pub fn slots_on(&self, date: NaiveDate) -> Vec<Slot> {
        self.game_times
            .iter()
            .flat_map(|&time| {
                self.surfaces
                    .iter()
                    .map(move |surface| Slot::new(date, time, surface.clone()))
            })
            .collect()
    }

    /// Ordering key: (days from Sunday, earliest time).
    pub fn sort_key(&self) -> (u32, NaiveTime) {
        (self.weekday.num_days_from_sunday(), self.earliest_time())
    }
}

/// Serialized shape of a [`Rule`], before normalization.
#[derive(Deserialize)]
struct RawRule {
    weekday: Weekday,
    #[serde(default)]
    game_times: Vec<NaiveTime>,
    #[serde(default)]
    surfaces: Vec<String>,
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        Rule::new(raw.weekday)
            .with_game_times(raw.game_times)
            .with_surfaces(raw.surfaces)
    }
}

impl Default for Rule {
    /// Mondays at 7:00 PM on `Field #1`.
    fn default() -> Self {
        Self::new(Weekday::Mon)
    }
}

/// Converts a `0 = Sunday … 6 = Saturday` number to a [`Weekday`].
pub fn weekday_from_sunday(wday: u32) -> Result<Weekday, ValidationError> {
    match wday {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidWeekday,
            format!("Weekday must be between 0 and 6, got {wday}"),
        )),
    }
}

/// Parses a textual time of day.
///
/// Accepts `H:MM`, `HH:MM` and `HH:MM:SS`, optionally followed by
/// `AM`/`PM` with or without a space. With a `PM` suffix, hours above 12
/// are taken as 24-hour time (`"13:00 PM"` is 13:00).
///
/// # Errors
/// `InvalidGameTime` if the text is not a time of day.
pub fn parse_game_time(text: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || {
        ValidationError::new(
            ValidationErrorKind::InvalidGameTime,
            format!("Cannot parse game time {text:?}"),
        )
    };

    let upper = text.trim().to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let time = NaiveTime::parse_from_str(clock, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .map_err(|_| invalid())?;

    let hour = match meridiem {
        None => time.hour(),
        Some(_) if time.hour() == 0 => return Err(invalid()),
        Some(false) if time.hour() == 12 => 0,
        Some(false) if time.hour() > 12 => return Err(invalid()),
        Some(false) => time.hour(),
        Some(true) if time.hour() < 12 => time.hour() + 12,
        Some(true) => time.hour(),
    };

    time.with_hour(hour).ok_or_else(invalid)
}

fn default_game_time() -> NaiveTime {
    parse_game_time(DEFAULT_GAME_TIME).unwrap_or_default()
}
