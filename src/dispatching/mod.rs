//! Slot dispatching: mapping rounds onto concrete calendar slots.
//!
//! Provides the greedy [`Dispatcher`], the per-run [`DispatchContext`], and
//! pluggable slot-selection rules that balance how often each team plays
//! at each game time and on each surface.
//!
//! # Usage
//!
//! ```
//! use u_roundrobin::dispatching::{rules, Dispatcher};
//!
//! let dispatcher = Dispatcher::new().with_rule(rules::BalanceSurfaces);
//! assert_eq!(dispatcher.rule_name(), "BALANCE_SURFACES");
//! ```
//!
//! # Hard constraints
//! - No team plays twice on the same date.
//! - No (date, time, surface) slot is used twice.
//! - No date holds more games than its rules offer.

mod context;
mod engine;
pub mod rules;

pub use context::{DispatchContext, UsageStats};
pub use engine::Dispatcher;

use crate::models::Slot;
use std::fmt::Debug;

/// Score returned by a slot rule.
///
/// Lower scores = preferred slot.
pub type RuleScore = f64;

/// A free slot being considered for a game.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The slot.
    pub slot: &'a Slot,
    /// Position among the slots still free under the active rule.
    pub position: usize,
    /// Dense index of the first team.
    pub team_a: usize,
    /// Dense index of the second team.
    pub team_b: usize,
}

/// A rule that scores free slots for a game.
///
/// # Score Convention
/// **Lower score = better slot.** The dispatcher takes the minimum and
/// breaks ties at random.
pub trait SlotRule: Send + Sync + Debug {
    /// Rule name (e.g., "BALANCED").
    fn name(&self) -> &'static str;

    /// Scores a candidate slot given the season's usage so far.
    fn evaluate(&self, candidate: &Candidate<'_>, usage: &UsageStats) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
