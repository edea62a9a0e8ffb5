//! Ground-velocity observations and their input validation.

use tas_core::compass;
use tas_core::vector::Vector2;
use thiserror::Error;

/// Number of legs the closed-form solution needs.
pub const LEG_COUNT: usize = 3;

/// One straight-and-level leg as reported by a GPS receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Groundspeed, any consistent unit.
    pub groundspeed: f64,
    /// Ground track in compass degrees.
    pub track_deg: f64,
}

impl Observation {
    pub fn new(groundspeed: f64, track_deg: f64) -> Self {
        Self {
            groundspeed,
            track_deg,
        }
    }

    /// Ground velocity as a planar vector.
    pub fn ground_vector(&self) -> Vector2 {
        compass::to_vector(self.groundspeed, self.track_deg)
    }

    /// Reject non-finite or negative values; `leg` is the 1-based number used in errors.
    pub fn check(&self, leg: usize) -> Result<(), InvalidInput> {
        if !self.groundspeed.is_finite() {
            return Err(InvalidInput::NonFiniteSpeed { leg });
        }
        if self.groundspeed < 0.0 {
            return Err(InvalidInput::NegativeSpeed {
                leg,
                speed: self.groundspeed,
            });
        }
        if !self.track_deg.is_finite() {
            return Err(InvalidInput::NonFiniteTrack { leg });
        }
        Ok(())
    }
}

/// Caller-supplied data that cannot be solved at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("expected exactly {LEG_COUNT} observations, got {0}")]
    LegCount(usize),
    #[error("leg {leg}: groundspeed must not be negative (got {speed})")]
    NegativeSpeed { leg: usize, speed: f64 },
    #[error("leg {leg}: groundspeed is not finite")]
    NonFiniteSpeed { leg: usize },
    #[error("leg {leg}: track is not finite")]
    NonFiniteTrack { leg: usize },
}

/// Check leg count and per-leg values. Legs are reported 1-based.
pub fn validate(observations: &[Observation]) -> Result<[Observation; LEG_COUNT], InvalidInput> {
    let legs: [Observation; LEG_COUNT] = observations
        .try_into()
        .map_err(|_| InvalidInput::LegCount(observations.len()))?;

    check_legs(&legs)?;
    Ok(legs)
}

/// Per-leg checks for an array whose length is already right.
pub(crate) fn check_legs(legs: &[Observation; LEG_COUNT]) -> Result<(), InvalidInput> {
    legs.iter()
        .enumerate()
        .try_for_each(|(idx, obs)| obs.check(idx + 1))
}
