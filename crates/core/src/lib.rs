//! Core units, constants, and shared primitives for the TAS calculator workspace.

/// Numeric constants shared by the conversion and solver layers.
pub mod constants {
    /// Degrees in a full compass rotation.
    pub const FULL_CIRCLE_DEG: f64 = 360.0;
    /// Compass bearing of the mathematical +x axis (east).
    pub const EAST_DEG: f64 = 90.0;
    /// Metres per international nautical mile.
    pub const METRES_PER_NM: f64 = 1_852.0;
    /// Metres per statute mile.
    pub const METRES_PER_MILE: f64 = 1_609.344;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Speed unit conversion helpers. Knots are the pivot unit.
pub mod units {
    use super::constants::{METRES_PER_MILE, METRES_PER_NM, SECONDS_PER_HOUR};

    /// Convert knots to metres per second.
    #[inline]
    pub fn kt_to_mps(v: f64) -> f64 {
        v * METRES_PER_NM / SECONDS_PER_HOUR
    }

    /// Convert metres per second to knots.
    #[inline]
    pub fn mps_to_kt(v: f64) -> f64 {
        v * SECONDS_PER_HOUR / METRES_PER_NM
    }

    /// Convert knots to kilometres per hour.
    #[inline]
    pub fn kt_to_kmh(v: f64) -> f64 {
        v * METRES_PER_NM / 1_000.0
    }

    /// Convert kilometres per hour to knots.
    #[inline]
    pub fn kmh_to_kt(v: f64) -> f64 {
        v * 1_000.0 / METRES_PER_NM
    }

    /// Convert knots to statute miles per hour.
    #[inline]
    pub fn kt_to_mph(v: f64) -> f64 {
        v * METRES_PER_NM / METRES_PER_MILE
    }

    /// Convert statute miles per hour to knots.
    #[inline]
    pub fn mph_to_kt(v: f64) -> f64 {
        v * METRES_PER_MILE / METRES_PER_NM
    }
}

/// Minimal 2-D vector helpers to avoid ad-hoc `[f64; 2]` math everywhere.
///
/// Vectors live in the standard mathematical plane: x east, y north, angle 0
/// along +x and increasing counter-clockwise.
pub mod vector {
    /// Alias for a planar velocity vector (speed units depend on context).
    pub type Vector2 = [f64; 2];

    /// The zero vector.
    pub const ZERO: Vector2 = [0.0, 0.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector2) -> f64 {
        v[0].hypot(v[1])
    }

    /// Z component of the 3-D cross product of two planar vectors.
    #[inline]
    pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
        a[0] * b[1] - a[1] * b[0]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] - b[0], a[1] - b[1]]
    }

    /// Reverse a vector.
    #[inline]
    pub fn neg(v: &Vector2) -> Vector2 {
        [-v[0], -v[1]]
    }

    /// Midpoint of the segment between two points.
    #[inline]
    pub fn midpoint(a: &Vector2, b: &Vector2) -> Vector2 {
        [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])]
    }

    /// Rotate a vector clockwise (compass sense) by `deg` degrees.
    pub fn rotate_clockwise(v: &Vector2, deg: f64) -> Vector2 {
        let (sin, cos) = (-deg.to_radians()).sin_cos();
        [v[0] * cos - v[1] * sin, v[0] * sin + v[1] * cos]
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(v: &Vector2) -> bool {
        v[0].is_finite() && v[1].is_finite()
    }

}

/// Conversion between compass bearings and the mathematical plane.
///
/// Compass bearings are measured clockwise from north in degrees; the plane
/// measures angles counter-clockwise from east. The two are related by
/// `math = 90° - bearing`.
pub mod compass {
    use super::constants::{EAST_DEG, FULL_CIRCLE_DEG};
    use super::vector::{self, Vector2};

    /// Polar form of a planar vector. `angle` is in radians, counter-clockwise from +x.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Polar {
        pub magnitude: f64,
        pub angle: f64,
    }

    /// Normalize a bearing into `[0, 360)`.
    pub fn normalize_bearing(deg: f64) -> f64 {
        let wrapped = deg.rem_euclid(FULL_CIRCLE_DEG);
        // rem_euclid can round up to exactly 360 for tiny negative inputs, and
        // may hand back -0.0.
        if wrapped >= FULL_CIRCLE_DEG || wrapped == 0.0 {
            0.0
        } else {
            wrapped
        }
    }

    /// Signed shortest rotation from `from` to `to`, in `(-180, 180]` degrees.
    pub fn bearing_difference(from: f64, to: f64) -> f64 {
        let diff = normalize_bearing(to - from);
        if diff > 180.0 { diff - FULL_CIRCLE_DEG } else { diff }
    }

    /// Opposite bearing, e.g. the "from" direction of a vector pointing "to" `deg`.
    pub fn reciprocal(deg: f64) -> f64 {
        normalize_bearing(deg + 180.0)
    }

    /// Lift a (speed, compass bearing) pair into a planar vector.
    pub fn to_vector(speed: f64, bearing_deg: f64) -> Vector2 {
        let (sin, cos) = (EAST_DEG - bearing_deg).to_radians().sin_cos();
        [speed * cos, speed * sin]
    }

    /// Lower a planar vector to (speed, compass bearing in `[0, 360)`).
    ///
    /// The zero vector has no direction; it maps to bearing 0° so callers never
    /// see a NaN.
    pub fn to_compass(v: &Vector2) -> (f64, f64) {
        let speed = vector::norm(v);
        if speed == 0.0 {
            return (0.0, 0.0);
        }
        let math_deg = v[1].atan2(v[0]).to_degrees();
        (speed, normalize_bearing(EAST_DEG - math_deg))
    }

    /// Euclidean magnitude of a vector (true airspeed extraction).
    #[inline]
    pub fn magnitude(v: &Vector2) -> f64 {
        vector::norm(v)
    }

    /// Convert a planar vector to polar form.
    pub fn to_polar(v: &Vector2) -> Polar {
        Polar {
            magnitude: vector::norm(v),
            angle: v[1].atan2(v[0]),
        }
    }

    /// Convert polar form back to a planar vector.
    pub fn from_polar(p: Polar) -> Vector2 {
        let (sin, cos) = p.angle.sin_cos();
        [p.magnitude * cos, p.magnitude * sin]
    }

}
