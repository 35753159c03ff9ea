//! Built-in slot rules.
//!
//! # Rules
//!
//! - **BALANCED**: least combined time + surface usage (default)
//! - **BALANCE_TIMES**: least game-time usage
//! - **BALANCE_SURFACES**: least surface usage
//! - **IN_ORDER**: first free slot, time-major
//!
//! # Score Convention
//! All rules return lower scores for preferred slots.

use super::{Candidate, RuleScore, SlotRule, UsageStats};

fn time_usage(c: &Candidate<'_>, usage: &UsageStats) -> u32 {
    usage.time_count(c.team_a, c.slot.time) + usage.time_count(c.team_b, c.slot.time)
}

fn surface_usage(c: &Candidate<'_>, usage: &UsageStats) -> u32 {
    usage.surface_count(c.team_a, &c.slot.surface) + usage.surface_count(c.team_b, &c.slot.surface)
}

/// Least combined usage.
///
/// Sums how often both teams already played at the slot's time and on
/// its surface. Keeps any one team from always drawing the late game or
/// the worst field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Balanced;

impl SlotRule for Balanced {
    fn name(&self) -> &'static str {
        "BALANCED"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, usage: &UsageStats) -> RuleScore {
        f64::from(time_usage(candidate, usage) + surface_usage(candidate, usage))
    }

    fn description(&self) -> &'static str {
        "Least Combined Time and Surface Usage"
    }
}

/// Least game-time usage; surfaces are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceTimes;

impl SlotRule for BalanceTimes {
    fn name(&self) -> &'static str {
        "BALANCE_TIMES"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, usage: &UsageStats) -> RuleScore {
        f64::from(time_usage(candidate, usage))
    }

    fn description(&self) -> &'static str {
        "Least Game Time Usage"
    }
}

/// Least surface usage; game times are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceSurfaces;

impl SlotRule for BalanceSurfaces {
    fn name(&self) -> &'static str {
        "BALANCE_SURFACES"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, usage: &UsageStats) -> RuleScore {
        f64::from(surface_usage(candidate, usage))
    }

    fn description(&self) -> &'static str {
        "Least Surface Usage"
    }
}

/// First free slot: earliest time, then surface order.
///
/// Fully deterministic; never produces ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrder;

impl SlotRule for InOrder {
    fn name(&self) -> &'static str {
        "IN_ORDER"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _usage: &UsageStats) -> RuleScore {
        candidate.position as f64
    }

    fn description(&self) -> &'static str {
        "First Free Slot"
    }
}
