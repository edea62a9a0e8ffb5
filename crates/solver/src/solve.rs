//! Closed-form solution of the three-leg wind triangle.

use tas_core::compass;
use tas_core::vector::{self, Vector2};
use thiserror::Error;
use tracing::{debug, warn};

use crate::geometry::{self, DegenerateGeometry};
use crate::observation::{self, InvalidInput, LEG_COUNT, Observation};

/// Relative spread of the three air-vector magnitudes above which a warning is logged.
const SPREAD_WARN_RATIO: f64 = 1e-6;

/// Errors surfaced by the solver. Nothing is returned on failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] DegenerateGeometry),
}

/// Air-mass motion over the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    /// Velocity of the air mass (points where the wind blows to).
    pub vector: Vector2,
    pub speed: f64,
    /// Compass bearing the wind blows from, in `[0, 360)`. 0 when calm.
    pub from_deg: f64,
}

impl Wind {
    fn from_vector(vector: Vector2) -> Self {
        let (speed, from_deg) = compass::to_compass(&vector::neg(&vector));
        Self {
            vector,
            speed,
            from_deg,
        }
    }
}

/// Output of [`solve`]; arrays are indexed like the input legs.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionResult {
    pub true_airspeed: f64,
    pub wind: Wind,
    /// True heading per leg, compass degrees in `[0, 360)`.
    pub headings: [f64; LEG_COUNT],
    pub ground_vectors: [Vector2; LEG_COUNT],
    pub air_vectors: [Vector2; LEG_COUNT],
    /// max − min of the three air-vector magnitudes; ideally zero.
    pub airspeed_spread: f64,
}

/// Solve for true airspeed, headings, and wind from exactly three observations.
pub fn solve(observations: &[Observation]) -> Result<SolutionResult, SolverError> {
    let legs = observation::validate(observations)?;
    solve_validated(legs)
}

/// Same as [`solve`] for callers that already hold a fixed-size leg array.
pub fn solve_legs(legs: [Observation; LEG_COUNT]) -> Result<SolutionResult, SolverError> {
    observation::check_legs(&legs)?;
    solve_validated(legs)
}

fn solve_validated(legs: [Observation; LEG_COUNT]) -> Result<SolutionResult, SolverError> {
    let ground = legs.map(|leg| leg.ground_vector());
    let scale = legs
        .iter()
        .map(|leg| leg.groundspeed)
        .fold(0.0_f64, f64::max);

    let a1 = geometry::circle_center(&ground, scale)?;
    let wind_vector = vector::sub(&ground[0], &a1);
    let air_vectors = ground.map(|g| vector::sub(&g, &wind_vector));
    debug!(?ground, center = ?a1, ?wind_vector, "circle center located");

    let magnitudes = air_vectors.map(|a| compass::magnitude(&a));
    let true_airspeed = magnitudes[0];
    let max = magnitudes.iter().copied().fold(f64::MIN, f64::max);
    let min = magnitudes.iter().copied().fold(f64::MAX, f64::min);
    let airspeed_spread = max - min;
    if airspeed_spread > SPREAD_WARN_RATIO * true_airspeed {
        warn!(
            true_airspeed,
            airspeed_spread, "air vector magnitudes disagree; geometry is poorly conditioned"
        );
    }

    let headings = air_vectors.map(|a| compass::to_compass(&a).1);
    let wind = Wind::from_vector(wind_vector);

    let finite = true_airspeed.is_finite()
        && airspeed_spread.is_finite()
        && wind.speed.is_finite()
        && air_vectors.iter().all(vector::is_finite);
    if !finite {
        return Err(DegenerateGeometry::NonFinite.into());
    }

    debug!(
        true_airspeed,
        wind_speed = wind.speed,
        wind_from = wind.from_deg,
        ?headings,
        "wind triangle solved"
    );

    Ok(SolutionResult {
        true_airspeed,
        wind,
        headings,
        ground_vectors: ground,
        air_vectors,
        airspeed_spread,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_legs() -> [Observation; 3] {
        [
            Observation::new(140.0, 192.0),
            Observation::new(112.0, 283.0),
            Observation::new(120.0, 20.0),
        ]
    }

    #[test]
    fn air_vectors_share_one_magnitude() {
        let result = solve(&reference_legs()).expect("solution");
        for a in &result.air_vectors {
            let m = compass::magnitude(a);
            assert!((m - result.true_airspeed).abs() < 1e-9, "magnitude = {m}");
        }
        assert!(result.airspeed_spread < 1e-9);
    }

    #[test]
    fn wind_closes_every_triangle() {
        let result = solve(&reference_legs()).expect("solution");
        for i in 0..LEG_COUNT {
            let rebuilt = vector::add(&result.air_vectors[i], &result.wind.vector);
            assert!((rebuilt[0] - result.ground_vectors[i][0]).abs() < 1e-9);
            assert!((rebuilt[1] - result.ground_vectors[i][1]).abs() < 1e-9);
        }
    }

    #[test]
    fn errors_wrap_their_kind() {
        let err = solve(&reference_legs()[..2]).unwrap_err();
        assert_eq!(err, SolverError::InvalidInput(InvalidInput::LegCount(2)));
        assert!(err.to_string().starts_with("invalid input"));

        let legs = [
            Observation::new(140.0, 192.0),
            Observation::new(140.0, 192.0),
            Observation::new(120.0, 20.0),
        ];
        let err = solve_legs(legs).unwrap_err();
        assert!(matches!(
            err,
            SolverError::DegenerateGeometry(DegenerateGeometry::CoincidentLegs { .. })
        ));
        assert!(err.to_string().starts_with("degenerate geometry"));
    }

    #[test]
    fn fixed_array_legs_are_still_checked() {
        let mut legs = reference_legs();
        legs[2].track_deg = f64::NAN;
        assert_eq!(
            solve_legs(legs),
            Err(SolverError::InvalidInput(InvalidInput::NonFiniteTrack { leg: 3 }))
        );

        legs = reference_legs();
        legs[0].groundspeed = -5.0;
        assert_eq!(
            solve_legs(legs),
            Err(SolverError::InvalidInput(InvalidInput::NegativeSpeed {
                leg: 1,
                speed: -5.0
            }))
        );

        assert_eq!(solve_legs(reference_legs()), solve(&reference_legs()));
    }
}
