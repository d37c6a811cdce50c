use std::f64::consts::PI;

/// Thickness polynomial coefficients of the NACA four-digit family
/// (open trailing edge).
const THICKNESS_COEFFS: [f64; 5] = [0.2969, -0.1260, -0.3516, 0.2843, -0.1015];

/// A point on an airfoil boundary, in chord-aligned coordinates.
///
/// `x` runs from the leading edge toward the trailing edge and `z` is normal
/// to the chord line, positive on the suction side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub x: f64,
    pub z: f64,
}

/// A closed airfoil boundary loop.
///
/// Points run along the upper surface from trailing edge to leading edge,
/// then along the lower surface back to the trailing edge.
/// The leading edge appears once; the trailing edge appears at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct AirfoilProfile {
    points: Vec<ProfilePoint>,
}

impl AirfoilProfile {
    /// Samples a NACA four-digit section.
    ///
    /// `camber`, `camber_position`, and `thickness` are fractions of chord
    /// (a `2412` section is `0.02, 0.4, 0.12`).
    /// Stations are cosine-spaced so they cluster at both edges.
    /// The result has `2 * n_points - 1` points, scaled by `chord`.
    #[must_use]
    pub fn naca4(
        camber: f64,
        camber_position: f64,
        thickness: f64,
        chord: f64,
        n_points: usize,
    ) -> Self {
        let stations = cosine_stations(n_points);

        let mut upper = Vec::with_capacity(stations.len());
        let mut lower = Vec::with_capacity(stations.len());

        for &x in &stations {
            let y_t = half_thickness(thickness, x);
            let (y_c, slope) = camber_line(camber, camber_position, x);
            let (sin_t, cos_t) = slope.atan().sin_cos();

            upper.push(ProfilePoint {
                x: (x - y_t * sin_t) * chord,
                z: (y_c + y_t * cos_t) * chord,
            });
            lower.push(ProfilePoint {
                x: (x + y_t * sin_t) * chord,
                z: (y_c - y_t * cos_t) * chord,
            });
        }

        let points = upper
            .into_iter()
            .rev()
            .chain(lower.into_iter().skip(1))
            .collect();

        Self { points }
    }

    /// The boundary loop, in order.
    #[must_use]
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// Number of points in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the loop has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Chordwise stations `x = (1 - cos β) / 2` for `β` evenly spaced on `[0, π]`.
fn cosine_stations(n_points: usize) -> Vec<f64> {
    match n_points {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = PI / (n - 1) as f64;
            (0..n)
                .map(|i| 0.5 * (1.0 - (i as f64 * step).cos()))
                .collect()
        }
    }
}

fn half_thickness(thickness: f64, x: f64) -> f64 {
    let [a0, a1, a2, a3, a4] = THICKNESS_COEFFS;
    5.0 * thickness * (a0 * x.sqrt() + a1 * x + a2 * x.powi(2) + a3 * x.powi(3) + a4 * x.powi(4))
}

/// Mean camber line height and slope at `x`.
fn camber_line(m: f64, p: f64, x: f64) -> (f64, f64) {
    if m <= 0.0 || p <= 0.0 {
        return (0.0, 0.0);
    }

    if x < p {
        let k = m / p.powi(2);
        (k * (2.0 * p * x - x.powi(2)), 2.0 * k * (p - x))
    } else {
        let k = m / (1.0 - p).powi(2);
        (
            k * ((1.0 - 2.0 * p) + 2.0 * p * x - x.powi(2)),
            2.0 * k * (p - x),
        )
    }
}
