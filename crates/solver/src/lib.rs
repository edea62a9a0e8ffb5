//! Three-leg GPS wind triangle: true airspeed, headings, and wind from three
//! groundspeed/track observations flown at constant airspeed and altitude.

pub mod geometry;
pub mod observation;
pub mod solve;

pub use geometry::{Bisector, DegenerateGeometry, chords, circle_center};
pub use observation::{InvalidInput, LEG_COUNT, Observation, validate};
pub use solve::{SolutionResult, SolverError, Wind, solve, solve_legs};
