use std::fmt;

use serde::Serialize;

use crate::dynamics::state::VehicleState;

// ---------------------------------------------------------------------------
// Run termination
// ---------------------------------------------------------------------------

/// Runs stop once mass falls to this fraction of ignition mass.
pub const TERMINAL_MASS_FRACTION: f64 = 0.1;

/// Why a run reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Configured duration elapsed.
    DurationElapsed,
    /// Mass at or below the terminal fraction of ignition mass.
    MassDepleted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::DurationElapsed => f.write_str("duration elapsed"),
            Termination::MassDepleted => f.write_str("mass depleted"),
        }
    }
}

/// The two termination predicates, mass checked first.
#[derive(Debug, Clone, Copy)]
pub struct TerminationCheck {
    pub mass_limit: f64,
    pub duration: f64,
    /// Remaining time below this counts as elapsed.
    pub time_tolerance: f64,
}

impl TerminationCheck {
    pub fn new(initial_mass: f64, duration: f64, dt: f64) -> Self {
        Self {
            mass_limit: TERMINAL_MASS_FRACTION * initial_mass,
            duration,
            time_tolerance: dt * 1e-9,
        }
    }

    pub fn check(&self, t: f64, state: &VehicleState) -> Option<Termination> {
        if state.mass <= self.mass_limit {
            Some(Termination::MassDepleted)
        } else if self.duration - t <= self.time_tolerance {
            Some(Termination::DurationElapsed)
        } else {
            None
        }
    }
}
