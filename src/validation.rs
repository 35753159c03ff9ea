//! Input validation for league schedules.
//!
//! Checks structural integrity of flights, rules, and the cycle count
//! before any pairing or dispatching work happens. Detects:
//! - Duplicate competitors within a flight
//! - Flights with fewer than two competitors
//! - Weekdays outside `0..=6` and unparsable game times
//! - Missing teams or rules at generation time
//!
//! Team and rule shape errors are raised eagerly at construction time;
//! missing-input errors are raised when `generate` is invoked.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Flight, Rule, TeamKey};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A competitor appears twice in the same flight.
    DuplicateTeam,
    /// A flight has fewer than two competitors.
    TooFewTeams,
    /// A rule weekday is outside `0..=6`.
    InvalidWeekday,
    /// A game time cannot be read as a time of day.
    InvalidGameTime,
    /// `generate` was invoked without any teams.
    MissingTeams,
    /// `generate` was invoked without any rules.
    MissingRules,
    /// The cycle count is below one.
    InvalidCycles,
    /// The season ran past the last representable date.
    CalendarOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a single flight's competitor list.
///
/// Returns the first problem found: fewer than two competitors, or a
/// competitor listed twice.
pub fn validate_teams<T: TeamKey>(teams: &[T]) -> Result<(), ValidationError> {
    if teams.len() < 2 {
        return Err(ValidationError::new(
            ValidationErrorKind::TooFewTeams,
            format!("A flight needs at least 2 teams, got {}", teams.len()),
        ));
    }

    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if !seen.insert(team) {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateTeam,
                format!("Team {team:?} is listed more than once in the same flight"),
            ));
        }
    }

    Ok(())
}

/// Validates the inputs of a generation run.
///
/// Checks:
/// 1. At least one flight
/// 2. At least one rule
/// 3. `cycles >= 1`
/// 4. Every flight still satisfies [`validate_teams`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input<T: TeamKey>(
    flights: &[Flight<T>],
    rules: &[Rule],
    cycles: usize,
) -> ValidationResult {
    let mut errors = Vec::new();

    if flights.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingTeams,
            "No teams configured",
        ));
    }

    if rules.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingRules,
            "No rules configured",
        ));
    }

    if cycles < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidCycles,
            format!("Cycles must be at least 1, got {cycles}"),
        ));
    }

    for flight in flights {
        let teams: Vec<T> = flight.teams().cloned().collect();
        if let Err(e) = validate_teams(&teams) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
