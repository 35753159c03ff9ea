//! Greedy slot dispatcher.
//!
//! # Algorithm
//!
//! 1. Interleave rounds across flights: round 1 of every flight, then
//!    round 2 of every flight, and so on. Bye pairings are dropped.
//! 2. Walk rules sorted by (weekday, earliest time), starting at the first
//!    rule on or after the season's start weekday.
//! 3. For each matchup, advance the rule/date cursor until the current
//!    rule has a free slot, the date is under its daily limit, and neither
//!    team already plays that date.
//! 4. Score the free slots with the [`SlotRule`]; book the lowest score,
//!    breaking ties at random.
//!
//! # Complexity
//! O(g · s) slot evaluations for `g` games and `s` slots per rule, plus
//! one cursor step per skipped rule occurrence.

use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, trace};

use super::rules::Balanced;
use super::{Candidate, DispatchContext, RuleScore, SlotRule, UsageStats};
use crate::models::{Game, Round, Rule, SeasonCalendar, TeamKey};
use crate::validation::ValidationError;

/// Places round-robin matchups on calendar slots.
///
/// # Example
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use rand::SeedableRng;
/// use u_roundrobin::dispatching::Dispatcher;
/// use u_roundrobin::models::{Flight, Rule, SeasonCalendar};
/// use u_roundrobin::scheduler::generate_rounds;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let flight = Flight::new(0, vec!["a", "b", "c", "d"]).unwrap();
/// let rounds = vec![generate_rounds(&flight, 1, false, &mut rng)];
/// let rules = vec![Rule::new(Weekday::Wed).with_surfaces(["A", "B"])];
/// let calendar = SeasonCalendar::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
///
/// let games = Dispatcher::new()
///     .dispatch(&rounds, &rules, &calendar, &mut rng)
///     .unwrap();
/// assert_eq!(games.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    rule: Arc<dyn SlotRule>,
    epsilon: f64,
}

impl Dispatcher {
    /// Creates a dispatcher using the [`Balanced`] rule.
    pub fn new() -> Self {
        Self {
            rule: Arc::new(Balanced),
            epsilon: 1e-9,
        }
    }

    /// Sets the slot rule.
    pub fn with_rule<R: SlotRule + 'static>(mut self, rule: R) -> Self {
        self.rule = Arc::new(rule);
        self
    }

    /// Sets a shared slot rule.
    pub fn with_shared_rule(mut self, rule: Arc<dyn SlotRule>) -> Self {
        self.rule = rule;
        self
    }

    /// Name of the active slot rule.
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Places every real matchup of `rounds` (indexed by flight) on a slot.
    ///
    /// `rules` may be in any order. Games are returned in placement order.
    ///
    /// # Errors
    /// `MissingRules` if there are matchups but no rules;
    /// `CalendarOverflow` if the season runs past the last representable
    /// date.
    pub fn dispatch<T: TeamKey, R: Rng>(
        &self,
        rounds: &[Vec<Round<T>>],
        rules: &[Rule],
        calendar: &SeasonCalendar,
        rng: &mut R,
    ) -> Result<Vec<Game<T>>, ValidationError> {
        let pending = interleave(rounds);
        if pending.iter().all(|r| r.game_count() == 0) {
            return Ok(Vec::new());
        }

        // Dense team indices for this run.
        let mut index: HashMap<&T, usize> = HashMap::new();
        for round in &pending {
            for m in round.games() {
                if let Some((a, b)) = m.teams() {
                    let next = index.len();
                    index.entry(a).or_insert(next);
                    let next = index.len();
                    index.entry(b).or_insert(next);
                }
            }
        }

        // Most games the flights can field on one date.
        let max_games_per_day: usize = rounds
            .iter()
            .filter_map(|flight_rounds| flight_rounds.first())
            .map(Round::game_count)
            .sum();

        let mut sorted = rules.to_vec();
        sorted.sort_by_key(Rule::sort_key);

        let mut ctx = DispatchContext::start(&sorted, calendar, max_games_per_day)?;
        let mut usage = UsageStats::new(index.len());
        let mut games = Vec::new();

        for round in pending {
            for m in round.games() {
                let Some((a, b)) = m.teams() else {
                    continue;
                };
                let (ia, ib) = (index[a], index[b]);

                while !ctx.can_place(ia, ib) {
                    let before = ctx.date;
                    ctx.advance()?;
                    if ctx.date != before {
                        debug!(from = %before, to = %ctx.date, "advanced to next gameday");
                    }
                }

                let pick = self.select(&ctx, ia, ib, &usage, rng);
                let slot = ctx.book(pick, ia, ib);
                usage.record(ia, &slot);
                usage.record(ib, &slot);

                trace!(
                    flight = round.flight_id,
                    round = round.round,
                    team_a = ?a,
                    team_b = ?b,
                    date = %slot.date,
                    time = %slot.time,
                    surface = %slot.surface,
                    "placed game"
                );

                games.push(Game {
                    team_a: a.clone(),
                    team_b: b.clone(),
                    date: slot.date,
                    time: slot.time,
                    surface: slot.surface,
                    flight_id: round.flight_id,
                    round: round.round,
                });
            }
        }

        debug!(
            games = games.len(),
            rule = self.rule.name(),
            "dispatched all matchups"
        );

        Ok(games)
    }

    /// Index of the best remaining slot; ties broken at random.
    fn select<R: Rng>(
        &self,
        ctx: &DispatchContext<'_>,
        team_a: usize,
        team_b: usize,
        usage: &UsageStats,
        rng: &mut R,
    ) -> usize {
        let scores: Vec<RuleScore> = ctx
            .remaining
            .iter()
            .enumerate()
            .map(|(position, slot)| {
                let candidate = Candidate {
                    slot,
                    position,
                    team_a,
                    team_b,
                };
                self.rule.evaluate(&candidate, usage)
            })
            .collect();

        let best = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let ties: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| (s - best).abs() <= self.epsilon)
            .map(|(i, _)| i)
            .collect();

        ties.choose(rng).copied().unwrap_or(0)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// One round per flight in turn, so divisions progress in lockstep.
fn interleave<T>(rounds: &[Vec<Round<T>>]) -> Vec<&Round<T>> {
    let depth = rounds.iter().map(Vec::len).max().unwrap_or(0);
    (0..depth)
        .flat_map(|i| rounds.iter().filter_map(move |flight| flight.get(i)))
        .collect()
}
