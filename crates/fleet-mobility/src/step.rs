//! Per-driver and per-tick movement results.

use std::ops::Add;

/// What happened to one driver during one movement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Not in a moving status; untouched.
    Stationary,
    /// Moved by the given degree deltas.
    Moved { d_lat: f64, d_lon: f64 },
    /// The step would have left the service area; position kept, heading
    /// re-randomised.
    Bounced,
}

/// Counts over one movement pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementSummary {
    pub moved:   usize,
    pub bounced: usize,
}

impl MovementSummary {
    pub(crate) fn from_outcome(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::Stationary     => Self::default(),
            StepOutcome::Moved { .. }   => Self { moved: 1, bounced: 0 },
            StepOutcome::Bounced        => Self { moved: 0, bounced: 1 },
        }
    }
}

impl Add for MovementSummary {
    type Output = MovementSummary;
    fn add(self, rhs: MovementSummary) -> MovementSummary {
        MovementSummary {
            moved:   self.moved + rhs.moved,
            bounced: self.bounced + rhs.bounced,
        }
    }
}
