//! Schedule (league season) model.
//!
//! A schedule owns its inputs (flights, rules, cycles, calendar) and, once
//! generated, the rounds of every flight and the resulting gamedays.
//! `generate` recomputes everything from scratch; there is no incremental
//! update.
//!
//! # Reference
//! Lamontagne (2010), "RRSchedule": slicing round-robin rounds into
//! gamedays under field and time constraints.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::{Flight, Game, Gameday, Round, Rule, SeasonCalendar, TeamKey, Teams};
use crate::dispatching::{Dispatcher, SlotRule};
use crate::scheduler::generate_rounds;
use crate::validation::{validate_input, ValidationError};

/// A round-robin league season.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roundrobin::models::{Rule, Schedule};
///
/// let mut schedule = Schedule::new()
///     .with_teams(vec!["Rockets", "Jetpacks", "Snakes", "Cobras", "Wolves"])
///     .unwrap()
///     .with_rule(Rule::parse(3, &["10:00 AM", "1:00 PM"], ["A", "B"]).unwrap())
///     .with_start_date(NaiveDate::from_ymd_opt(2010, 10, 13).unwrap())
///     .with_seed(42);
///
/// schedule.generate().unwrap();
/// assert_eq!(schedule.game_count(), 10);
/// assert!(schedule.is_round_robin(0));
/// ```
#[derive(Debug, Clone)]
pub struct Schedule<T> {
    flights: Vec<Flight<T>>,
    rules: Vec<Rule>,
    cycles: usize,
    shuffle: bool,
    calendar: SeasonCalendar,
    seed: Option<u64>,
    dispatcher: Dispatcher,
    rounds: Vec<Vec<Round<T>>>,
    gamedays: Vec<Gameday<T>>,
}

impl<T: TeamKey> Schedule<T> {
    /// Creates an empty schedule: no teams, no rules, one cycle,
    /// shuffling on, starting today.
    pub fn new() -> Self {
        Self {
            flights: Vec::new(),
            rules: Vec::new(),
            cycles: 1,
            shuffle: true,
            calendar: SeasonCalendar::new(Local::now().date_naive()),
            seed: None,
            dispatcher: Dispatcher::new(),
            rounds: Vec::new(),
            gamedays: Vec::new(),
        }
    }

    /// Sets the teams, as a flat list or as divisions.
    ///
    /// # Errors
    /// `TooFewTeams` or `DuplicateTeam` if any flight is malformed.
    pub fn with_teams(mut self, teams: impl Into<Teams<T>>) -> Result<Self, ValidationError> {
        self.flights = teams.into().into_flights()?;
        Ok(self)
    }

    /// Adds a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several rules.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the number of cycles (1 = single round-robin, 2 = double, …).
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles = cycles;
        self
    }

    /// Enables or disables reshuffling team order at every cycle.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the first date on which games may be played.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.calendar.start_date = date;
        self
    }

    /// Adds a date without games.
    pub fn with_excluded_date(mut self, date: NaiveDate) -> Self {
        self.calendar.excluded_dates.insert(date);
        self
    }

    /// Adds several dates without games.
    pub fn with_excluded_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.calendar.excluded_dates.extend(dates);
        self
    }

    /// Seeds the random source used for shuffles and tie-breaks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the slot-selection rule (default: [`Balanced`](crate::dispatching::rules::Balanced)).
    pub fn with_slot_rule<R: SlotRule + 'static>(mut self, rule: R) -> Self {
        self.dispatcher = self.dispatcher.with_rule(rule);
        self
    }

    /// Generates rounds and gamedays, replacing any previous result.
    ///
    /// # Errors
    /// `MissingTeams`, `MissingRules`, or `InvalidCycles` before any work
    /// is done; `CalendarOverflow` if the season cannot fit in the
    /// representable date range. On error the previous result is kept.
    pub fn generate(&mut self) -> Result<&[Gameday<T>], ValidationError> {
        if let Err(errors) = validate_input(&self.flights, &self.rules, self.cycles) {
            if let Some(first) = errors.into_iter().next() {
                return Err(first);
            }
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let rounds: Vec<Vec<Round<T>>> = self
            .flights
            .iter()
            .map(|flight| generate_rounds(flight, self.cycles, self.shuffle, &mut rng))
            .collect();

        let games = self
            .dispatcher
            .dispatch(&rounds, &self.rules, &self.calendar, &mut rng)?;

        self.rounds = rounds;
        self.gamedays = assemble(games);

        info!(
            flights = self.flights.len(),
            rounds = self.rounds.iter().map(Vec::len).sum::<usize>(),
            games = self.game_count(),
            gamedays = self.gamedays.len(),
            "schedule generated"
        );

        Ok(&self.gamedays)
    }

    /// Flights, in configuration order.
    pub fn flights(&self) -> &[Flight<T>] {
        &self.flights
    }

    /// Rules, in configuration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of cycles.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Whether team order is reshuffled every cycle.
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Season start and excluded dates.
    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    /// Rounds of every flight, indexed by flight id.
    pub fn rounds(&self) -> &[Vec<Round<T>>] {
        &self.rounds
    }

    /// Rounds of one flight.
    pub fn rounds_for(&self, flight_id: usize) -> Option<&[Round<T>]> {
        self.rounds.get(flight_id).map(Vec::as_slice)
    }

    /// Gamedays in chronological order.
    pub fn gamedays(&self) -> &[Gameday<T>] {
        &self.gamedays
    }

    /// All games, in gameday order.
    pub fn games(&self) -> impl Iterator<Item = &Game<T>> {
        self.gamedays.iter().flat_map(|gd| gd.games.iter())
    }

    /// Total number of games.
    pub fn game_count(&self) -> usize {
        self.gamedays.iter().map(Gameday::len).sum()
    }

    /// All games of `team`, in chronological order.
    pub fn by_team(&self, team: &T) -> Vec<&Game<T>> {
        self.games().filter(|g| g.involves(team)).collect()
    }

    /// All games between `team_a` and `team_b`, in chronological order.
    pub fn face_to_face(&self, team_a: &T, team_b: &T) -> Vec<&Game<T>> {
        self.games()
            .filter(|g| g.involves(team_a) && g.opponent_of(team_a) == Some(team_b))
            .collect()
    }

    /// Whether a flight's generated schedule is a complete round-robin.
    ///
    /// Checks that the flight has `(size - 1) * cycles` rounds and that
    /// every pair of its teams meets exactly `cycles` times in the
    /// gamedays. Returns `false` before the first `generate`.
    pub fn is_round_robin(&self, flight_id: usize) -> bool {
        let (Some(flight), Some(rounds)) = (self.flights.get(flight_id), self.rounds.get(flight_id))
        else {
            return false;
        };
        if rounds.len() != flight.rounds_per_cycle() * self.cycles {
            return false;
        }

        let position: HashMap<&T, usize> = flight.teams().enumerate().map(|(i, t)| (t, i)).collect();
        let mut meetings: HashMap<(usize, usize), usize> = HashMap::new();
        for game in self.games().filter(|g| g.flight_id == flight_id) {
            let (Some(&a), Some(&b)) = (position.get(&game.team_a), position.get(&game.team_b)) else {
                return false;
            };
            *meetings.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }

        let n = flight.team_count();
        meetings.len() == n * (n - 1) / 2 && meetings.values().all(|&c| c == self.cycles)
    }
}

impl<T: TeamKey> Default for Schedule<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups games by date into chronologically ordered gamedays.
fn assemble<T>(games: Vec<Game<T>>) -> Vec<Gameday<T>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Game<T>>> = BTreeMap::new();
    for game in games {
        by_date.entry(game.date).or_default().push(game);
    }
    by_date
        .into_iter()
        .map(|(date, games)| Gameday::new(date, games))
        .collect()
}

impl<T: TeamKey + fmt::Display> fmt::Display for Schedule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} gamedays", self.gamedays.len())?;
        for gd in &self.gamedays {
            let heading = gd.date.format("%Y-%m-%d").to_string();
            writeln!(f, "{heading}")?;
            writeln!(f, "{}", "=".repeat(heading.len()))?;
            for g in &gd.games {
                writeln!(
                    f,
                    "{} VS {} on playing surface {} at {}",
                    g.team_a,
                    g.team_b,
                    g.surface,
                    g.time.format("%I:%M %p")
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules::InOrder;
    use crate::validation::ValidationErrorKind;
    use chrono::{Datelike, Weekday};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn wednesday_rule() -> Rule {
        Rule::parse(3, &["7:00 PM", "9:00 PM"], ["A", "B"]).unwrap()
    }

    fn assert_no_same_day_repeats<T: TeamKey>(schedule: &Schedule<T>) {
        for gd in schedule.gamedays() {
            let mut seen = HashSet::new();
            for g in &gd.games {
                assert!(seen.insert(&g.team_a), "{:?} twice on {}", g.team_a, gd.date);
                assert!(seen.insert(&g.team_b), "{:?} twice on {}", g.team_b, gd.date);
            }
        }
    }

    #[test]
    fn test_six_teams_one_rule() {
        let mut s = Schedule::new()
            .with_teams((1..=6).collect::<Vec<u32>>())
            .unwrap()
            .with_rule(wednesday_rule())
            .with_start_date(ymd(2024, 1, 3))
            .with_seed(1);
        s.generate().unwrap();

        assert_eq!(s.rounds_for(0).unwrap().len(), 5);
        assert_eq!(s.game_count(), 15);
        for team in 1..=6 {
            assert_eq!(s.by_team(&team).len(), 5);
        }
        assert_eq!(s.gamedays().len(), 5);
        assert!(s.gamedays().iter().all(|gd| gd.date.weekday() == Weekday::Wed));
        assert_eq!(s.gamedays()[0].date, ymd(2024, 1, 3));
        assert_no_same_day_repeats(&s);
        assert!(s.is_round_robin(0));
    }

    #[test]
    fn test_odd_flight_gets_bye() {
        let mut s = Schedule::new()
            .with_teams(vec!["a", "b", "c", "d", "e"])
            .unwrap()
            .with_rule(wednesday_rule())
            .with_start_date(ymd(2024, 1, 3))
            .with_seed(2);
        assert_eq!(s.flights()[0].size(), 6);
        s.generate().unwrap();

        let rounds = s.rounds_for(0).unwrap();
        assert_eq!(rounds.len(), 5);
        assert!(rounds.iter().all(|r| r.game_count() == 2 && r.bye_team().is_some()));
        assert_eq!(s.game_count(), 10);
        for team in ["a", "b", "c", "d", "e"] {
            assert_eq!(s.by_team(&team).len(), 4);
        }
        assert!(s.is_round_robin(0));
    }

    #[test]
    fn test_two_flights_share_one_rule() {
        let a: Vec<String> = (1..=8).map(|i| format!("A{i}")).collect();
        let b: Vec<String> = (1..=8).map(|i| format!("B{i}")).collect();
        let mut s = Schedule::new()
            .with_teams(Teams::Divisions(vec![a, b]))
            .unwrap()
            .with_rule(wednesday_rule())
            .with_start_date(ymd(2024, 1, 3))
            .with_seed(3);
        s.generate().unwrap();

        assert!(s.is_round_robin(0));
        assert!(s.is_round_robin(1));
        assert!(s.gamedays().iter().all(|gd| gd.len() <= 4));
        assert_eq!(s.game_count(), 56);
        assert_no_same_day_repeats(&s);
    }

    #[test]
    fn test_excluded_date_skipped() {
        let mut s = Schedule::new()
            .with_teams(vec![1, 2, 3, 4])
            .unwrap()
            .with_rule(Rule::new(Weekday::Wed).with_surfaces(["A", "B"]))
            .with_start_date(ymd(2024, 1, 3))
            .with_excluded_date(ymd(2024, 1, 10))
            .with_seed(4);
        s.generate().unwrap();

        let dates: Vec<NaiveDate> = s.gamedays().iter().map(|gd| gd.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 3), ymd(2024, 1, 17), ymd(2024, 1, 24)]);
        assert!(dates.iter().all(|d| !s.calendar().excluded_dates.contains(d)));
    }

    #[test]
    fn test_duplicate_always_rejected() {
        for cycles in 1..4 {
            let err = Schedule::new()
                .with_cycles(cycles)
                .with_rule(wednesday_rule())
                .with_teams(vec!["a", "a", "b", "c", "d", "e", "f", "g", "h", "i"])
                .unwrap_err();
            assert_eq!(err.kind, ValidationErrorKind::DuplicateTeam);
        }
    }

    #[test]
    fn test_too_few_teams_rejected() {
        let err = Schedule::new().with_teams(vec![1]).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::TooFewTeams);
    }

    #[test]
    fn test_generate_requires_teams_and_rules() {
        let mut no_teams: Schedule<u32> = Schedule::new().with_rule(Rule::default());
        assert_eq!(no_teams.generate().unwrap_err().kind, ValidationErrorKind::MissingTeams);

        let mut no_rules = Schedule::new().with_teams(vec![1, 2]).unwrap();
        assert_eq!(no_rules.generate().unwrap_err().kind, ValidationErrorKind::MissingRules);

        let mut no_cycles = Schedule::new()
            .with_teams(vec![1, 2])
            .unwrap()
            .with_rule(Rule::default())
            .with_cycles(0);
        assert_eq!(no_cycles.generate().unwrap_err().kind, ValidationErrorKind::InvalidCycles);
        assert!(no_cycles.gamedays().is_empty());
    }

    #[test]
    fn test_deterministic_with_seed() {
        let build = |shuffle| {
            Schedule::new()
                .with_teams((1..=9).collect::<Vec<u32>>())
                .unwrap()
                .with_rule(wednesday_rule())
                .with_rule(Rule::new(Weekday::Sat).with_surfaces(["A", "B", "C"]))
                .with_cycles(2)
                .with_shuffle(shuffle)
                .with_start_date(ymd(2024, 3, 1))
                .with_seed(77)
        };

        for shuffle in [false, true] {
            let mut a = build(shuffle);
            let mut b = build(shuffle);
            assert_eq!(a.generate().unwrap(), b.generate().unwrap());
        }
    }

    #[test]
    fn test_regenerate_replaces_results() {
        let mut s = Schedule::new()
            .with_teams(vec![1, 2, 3, 4])
            .unwrap()
            .with_rule(Rule::default())
            .with_start_date(ymd(2024, 1, 1))
            .with_seed(5);
        let first = s.generate().unwrap().to_vec();
        let second = s.generate().unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(s.game_count(), 6);
        assert_eq!(s.rounds_for(0).unwrap().len(), 3);
    }

    #[test]
    fn test_double_round_robin() {
        let mut s = Schedule::new()
            .with_teams(vec!["a", "b", "c", "d"])
            .unwrap()
            .with_rule(Rule::new(Weekday::Tue).with_surfaces(["1", "2"]))
            .with_rule(Rule::new(Weekday::Thu).with_surfaces(["1", "2"]))
            .with_cycles(2)
            .with_start_date(ymd(2024, 1, 1))
            .with_seed(6);
        s.generate().unwrap();

        assert_eq!(s.rounds_for(0).unwrap().len(), 6);
        assert_eq!(s.face_to_face(&"a", &"b").len(), 2);
        assert_eq!(s.face_to_face(&"b", &"a").len(), 2);
        assert!(s.is_round_robin(0));
    }

    #[test]
    fn test_is_round_robin_before_generate() {
        let s = Schedule::new().with_teams(vec![1, 2, 3]).unwrap();
        assert!(!s.is_round_robin(0));
        assert!(!s.is_round_robin(5));
    }

    #[test]
    fn test_by_team_is_chronological() {
        let mut s = Schedule::new()
            .with_teams(vec![1, 2, 3, 4, 5, 6])
            .unwrap()
            .with_rule(Rule::new(Weekday::Mon))
            .with_start_date(ymd(2024, 1, 1))
            .with_seed(8);
        s.generate().unwrap();

        let dates: Vec<NaiveDate> = s.by_team(&3).iter().map(|g| g.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(dates.len(), 5);
    }

    #[test]
    fn test_rule_read_from_json_with_empty_sets() {
        let rule: Rule =
            serde_json::from_str(r#"{"weekday":"Wed","game_times":[],"surfaces":[]}"#).unwrap();
        let mut s = Schedule::new()
            .with_teams(vec![1, 2, 3, 4])
            .unwrap()
            .with_rule(rule)
            .with_start_date(ymd(2024, 1, 3))
            .with_seed(9);
        s.generate().unwrap();

        assert_eq!(s.game_count(), 6);
        assert_eq!(s.gamedays().len(), 6);
        assert!(s.is_round_robin(0));
    }

    #[test]
    fn test_display() {
        let mut s = Schedule::new()
            .with_teams(vec!["Lions", "Moose"])
            .unwrap()
            .with_rule(Rule::new(Weekday::Wed))
            .with_shuffle(false)
            .with_start_date(ymd(2024, 1, 3))
            .with_slot_rule(InOrder);
        s.generate().unwrap();

        assert_eq!(
            s.to_string(),
            "1 gamedays\n2024-01-03\n==========\nLions VS Moose on playing surface Field #1 at 07:00 PM\n\n"
        );
    }

    proptest! {
        #[test]
        fn prop_every_pair_meets_cycles_times(
            n in 2u32..11,
            cycles in 1usize..3,
            shuffle in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut s = Schedule::new()
                .with_teams((0..n).collect::<Vec<u32>>())
                .unwrap()
                .with_rule(wednesday_rule())
                .with_cycles(cycles)
                .with_shuffle(shuffle)
                .with_start_date(ymd(2024, 1, 1))
                .with_seed(seed);
            s.generate().unwrap();

            let padded = (n + n % 2) as usize;
            prop_assert_eq!(s.rounds_for(0).unwrap().len(), (padded - 1) * cycles);
            prop_assert!(s.is_round_robin(0));
            for a in 0..n {
                for b in (a + 1)..n {
                    prop_assert_eq!(s.face_to_face(&a, &b).len(), cycles);
                }
            }
        }

        #[test]
        fn prop_hard_constraints_hold(
            sizes in prop::collection::vec(2u32..9, 1..4),
            seed in any::<u64>(),
            excluded_weeks in prop::collection::btree_set(0u64..20, 0..5),
        ) {
            let mut offset = 0;
            let divisions: Vec<Vec<u32>> = sizes
                .iter()
                .map(|&n| {
                    let d: Vec<u32> = (offset..offset + n).collect();
                    offset += n;
                    d
                })
                .collect();
            let start = ymd(2024, 1, 3);
            let excluded: Vec<NaiveDate> = excluded_weeks
                .iter()
                .map(|w| start + chrono::Days::new(w * 7))
                .collect();

            let mut s = Schedule::new()
                .with_teams(Teams::Divisions(divisions))
                .unwrap()
                .with_rule(wednesday_rule())
                .with_rule(Rule::new(Weekday::Sat).with_surfaces(["A", "C"]))
                .with_start_date(start)
                .with_excluded_dates(excluded.clone())
                .with_seed(seed);
            s.generate().unwrap();

            let mut slots = HashSet::new();
            for gd in s.gamedays() {
                prop_assert!(!excluded.contains(&gd.date));
                let mut playing = HashSet::new();
                for g in &gd.games {
                    prop_assert!(playing.insert(g.team_a));
                    prop_assert!(playing.insert(g.team_b));
                    prop_assert!(slots.insert(g.slot()));
                }
            }
            for id in 0..sizes.len() {
                prop_assert!(s.is_round_robin(id));
            }
        }
    }
}
