//! Dispatch state threaded through one placement run.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::models::{Rule, SeasonCalendar, Slot};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Per-team usage of game times and surfaces.
///
/// Teams are addressed by the dense index assigned at the start of a
/// dispatch run.
#[derive(Debug, Clone, Default)]
pub struct UsageStats {
    times: Vec<HashMap<NaiveTime, u32>>,
    surfaces: Vec<HashMap<String, u32>>,
}

impl UsageStats {
    /// Creates empty stats for `team_count` teams.
    pub fn new(team_count: usize) -> Self {
        Self {
            times: vec![HashMap::new(); team_count],
            surfaces: vec![HashMap::new(); team_count],
        }
    }

    /// Games `team` has played at `time`.
    pub fn time_count(&self, team: usize, time: NaiveTime) -> u32 {
        self.times
            .get(team)
            .and_then(|m| m.get(&time))
            .copied()
            .unwrap_or(0)
    }

    /// Games `team` has played on `surface`.
    pub fn surface_count(&self, team: usize, surface: &str) -> u32 {
        self.surfaces
            .get(team)
            .and_then(|m| m.get(surface))
            .copied()
            .unwrap_or(0)
    }

    /// Records a game of `team` in `slot`.
    pub fn record(&mut self, team: usize, slot: &Slot) {
        if let Some(m) = self.times.get_mut(team) {
            *m.entry(slot.time).or_insert(0) += 1;
        }
        if let Some(m) = self.surfaces.get_mut(team) {
            *m.entry(slot.surface.clone()).or_insert(0) += 1;
        }
    }
}

/// Cursor over rules and dates, plus what is already used on the
/// current date.
///
/// Created fresh for every dispatch run; nothing survives between runs.
#[derive(Debug, Clone)]
pub struct DispatchContext<'a> {
    rules: &'a [Rule],
    calendar: &'a SeasonCalendar,
    /// Index into `rules` of the active rule.
    pub rule_idx: usize,
    /// Date being filled.
    pub date: NaiveDate,
    /// Slots of the active rule still free on `date`.
    pub remaining: Vec<Slot>,
    /// Slots already taken on `date` (across rules of the same weekday).
    pub booked: HashSet<Slot>,
    /// Teams with a game on `date`.
    pub playing: HashSet<usize>,
    /// Games placed on `date`.
    pub games_today: usize,
    max_games_per_day: usize,
}

impl<'a> DispatchContext<'a> {
    /// Positions the cursor on the first rule and date of the season.
    ///
    /// `rules` must be sorted by [`Rule::sort_key`] and non-empty. The
    /// first rule is the earliest one whose weekday is on or after the
    /// start date's weekday, wrapping to the first rule otherwise.
    pub fn start(
        rules: &'a [Rule],
        calendar: &'a SeasonCalendar,
        max_games_per_day: usize,
    ) -> Result<Self, ValidationError> {
        let start = calendar.start_date;
        let start_wday = start.weekday().num_days_from_sunday();
        let rule_idx = rules
            .iter()
            .position(|r| r.weekday.num_days_from_sunday() >= start_wday)
            .unwrap_or(0);

        let Some(rule) = rules.get(rule_idx) else {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingRules,
                "No rules configured",
            ));
        };
        let date = calendar
            .next_playable(start, rule.weekday)
            .ok_or_else(overflow)?;

        Ok(Self {
            rules,
            calendar,
            rule_idx,
            date,
            remaining: rule.slots_on(date),
            booked: HashSet::new(),
            playing: HashSet::new(),
            games_today: 0,
            max_games_per_day,
        })
    }

    /// The active rule.
    pub fn rule(&self) -> &Rule {
        &self.rules[self.rule_idx]
    }

    /// Whether a game between `a` and `b` can still go on the current
    /// date under the current rule.
    pub fn can_place(&self, a: usize, b: usize) -> bool {
        !self.remaining.is_empty()
            && self.games_today < self.day_limit()
            && !self.playing.contains(&a)
            && !self.playing.contains(&b)
    }

    /// Games allowed on the current date: the capacity of all rules on
    /// this weekday, capped by how many games the flights can field at
    /// once.
    pub fn day_limit(&self) -> usize {
        let weekday = self.rule().weekday;
        let capacity: usize = self
            .rules
            .iter()
            .filter(|r| r.weekday == weekday)
            .map(Rule::capacity)
            .sum();
        capacity.min(self.max_games_per_day)
    }

    /// Moves to the next rule, and to a new date when the weekday
    /// changes or the rule list wraps around.
    pub fn advance(&mut self) -> Result<(), ValidationError> {
        let previous = self.rule().weekday;
        let next = (self.rule_idx + 1) % self.rules.len();
        let next_weekday = self.rules[next].weekday;

        if next == 0 || next_weekday != previous {
            self.date = self
                .calendar
                .next_playable_after(self.date, next_weekday)
                .ok_or_else(overflow)?;
            self.booked.clear();
            self.playing.clear();
            self.games_today = 0;
        }

        self.rule_idx = next;
        let booked = &self.booked;
        self.remaining = self.rules[next]
            .slots_on(self.date)
            .into_iter()
            .filter(|s| !booked.contains(s))
            .collect();
        Ok(())
    }

    /// Takes the remaining slot at `index` for a game between `a` and `b`.
    pub fn book(&mut self, index: usize, a: usize, b: usize) -> Slot {
        let slot = self.remaining.remove(index);
        self.booked.insert(slot.clone());
        self.playing.insert(a);
        self.playing.insert(b);
        self.games_today += 1;
        slot
    }
}

fn overflow() -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::CalendarOverflow,
        "Season runs past the last representable date",
    )
}
