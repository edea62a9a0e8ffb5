//! Chord, perpendicular bisector, and circumcenter construction.
//!
//! With the pivot ground vector `g1` anchored at the origin, the points
//! `0`, `g1 - g2` and `g1 - g3` lie on a circle whose center is the first air
//! vector `a1`. Each chord from the origin has a perpendicular bisector through
//! its midpoint; two bisectors meet at that center.

use tas_core::vector::{self, Vector2};
use thiserror::Error;

/// Sine of the smallest angle between chords still treated as non-parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Chord length, relative to the largest groundspeed, below which two legs coincide.
pub const COINCIDENT_TOLERANCE: f64 = 1e-9;

/// |chord.y| relative to chord length below which the bisector is taken as vertical.
pub const VERTICAL_TOLERANCE: f64 = 1e-12;

/// Observation sets whose construction has no unique circle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DegenerateGeometry {
    #[error("legs {first} and {second} have identical ground velocities")]
    CoincidentLegs { first: usize, second: usize },
    #[error("perpendicular bisectors are parallel: headings insufficiently distinct")]
    ParallelBisectors,
    #[error("solution is not finite: headings insufficiently distinct")]
    NonFinite,
}

/// A perpendicular bisector line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bisector {
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`, the bisector of a chord with no y extent.
    Vertical { x: f64 },
}

impl Bisector {
    /// Bisector of the chord running from the origin to `chord`.
    ///
    /// `chord` must be non-zero; callers reject coincident legs first.
    pub fn of_chord(chord: &Vector2) -> Self {
        let [cx, cy] = *chord;
        let [mx, my] = vector::midpoint(&vector::ZERO, chord);
        if cy.abs() <= VERTICAL_TOLERANCE * vector::norm(chord) {
            return Bisector::Vertical { x: mx };
        }
        let slope = -cx / cy;
        // y-intercept of the line through the midpoint: (cy - slope * cx) / 2
        let intercept = my - slope * mx;
        Bisector::Sloped { slope, intercept }
    }

    /// Intersection point of two bisectors.
    pub fn intersect(&self, other: &Bisector) -> Result<Vector2, DegenerateGeometry> {
        let point = match (*self, *other) {
            (
                Bisector::Sloped {
                    slope: m1,
                    intercept: b1,
                },
                Bisector::Sloped {
                    slope: m2,
                    intercept: b2,
                },
            ) => {
                if m1 == m2 {
                    return Err(DegenerateGeometry::ParallelBisectors);
                }
                let x = (b2 - b1) / (m1 - m2);
                [x, m1 * x + b1]
            }
            (Bisector::Vertical { x }, Bisector::Sloped { slope, intercept })
            | (Bisector::Sloped { slope, intercept }, Bisector::Vertical { x }) => {
                [x, slope * x + intercept]
            }
            (Bisector::Vertical { .. }, Bisector::Vertical { .. }) => {
                return Err(DegenerateGeometry::ParallelBisectors);
            }
        };

        if vector::is_finite(&point) {
            Ok(point)
        } else {
            Err(DegenerateGeometry::NonFinite)
        }
    }
}

/// The two chords `g1 - g2` and `g1 - g3`.
pub fn chords(ground: &[Vector2; 3]) -> [Vector2; 2] {
    [
        vector::sub(&ground[0], &ground[1]),
        vector::sub(&ground[0], &ground[2]),
    ]
}

/// Center of the circle through the origin and both chord endpoints.
///
/// `scale` is the largest groundspeed and sets the coincident-leg tolerance.
pub fn circle_center(ground: &[Vector2; 3], scale: f64) -> Result<Vector2, DegenerateGeometry> {
    let [p1, p2] = chords(ground);
    let (len1, len2) = (vector::norm(&p1), vector::norm(&p2));
    let min_len = COINCIDENT_TOLERANCE * scale;

    if len1 <= min_len {
        return Err(DegenerateGeometry::CoincidentLegs {
            first: 1,
            second: 2,
        });
    }
    if len2 <= min_len {
        return Err(DegenerateGeometry::CoincidentLegs {
            first: 1,
            second: 3,
        });
    }
    if vector::norm(&vector::sub(&p1, &p2)) <= min_len {
        return Err(DegenerateGeometry::CoincidentLegs {
            first: 2,
            second: 3,
        });
    }
    if vector::cross(&p1, &p2).abs() <= PARALLEL_TOLERANCE * len1 * len2 {
        return Err(DegenerateGeometry::ParallelBisectors);
    }

    Bisector::of_chord(&p1).intersect(&Bisector::of_chord(&p2))
}
