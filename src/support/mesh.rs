//! Triangulated wing surface.
//!
//! The wing is lofted through airfoil sections placed at evenly spaced span
//! stations. Adjacent sections are stitched with two triangles per quad.
//! A winglet, when present, is a single band extruded from the tip section.
//!
//! Coordinates are right-handed: `x` aft, `y` outboard along the span, `z` up.
//! The root section sits at `y = 0` with its leading edge at the origin.

use nalgebra::Vector3;
use thiserror::Error;
use uom::si::{angle::radian, length::meter};

use crate::geometry::GeometryParameters;

use super::airfoil::AirfoilCode;

/// Winglets shorter than this are omitted.
const WINGLET_MIN_HEIGHT: f64 = 1e-6;

/// Sections are rotated about this fraction of local chord.
const TWIST_AXIS: f64 = 0.25;

/// Mesh resolution and section shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshConfig {
    pub airfoil: AirfoilCode,

    /// Number of sections from root to tip, including both ends.
    pub span_stations: usize,

    /// Chordwise stations per airfoil surface; each section loop has
    /// `2 * airfoil_points - 1` vertices.
    pub airfoil_points: usize,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            airfoil: AirfoilCode::NACA_2412,
            span_stations: 16,
            airfoil_points: 81,
        }
    }
}

/// Errors that can occur while building a [`Mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("at least 2 span stations are required, got {found}")]
    TooFewStations { found: usize },

    #[error("at least 2 airfoil points are required, got {found}")]
    TooFewPoints { found: usize },

    /// `count` saturates at `usize::MAX`.
    #[error("{count} vertices do not fit 32-bit indices")]
    TooManyVertices { count: usize },
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    /// Vertex indices, wound consistently across every band.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Builds the surface mesh of `geometry`.
///
/// The result is a pure function of its inputs.
///
/// # Errors
///
/// Returns [`MeshError`] if `config` asks for fewer than two span stations or
/// airfoil points, or for more vertices than `u32` indices can address. All
/// checks run before anything is allocated.
pub fn build_mesh(geometry: &GeometryParameters, config: &MeshConfig) -> Result<Mesh, MeshError> {
    if config.span_stations < 2 {
        return Err(MeshError::TooFewStations {
            found: config.span_stations,
        });
    }
    if config.airfoil_points < 2 {
        return Err(MeshError::TooFewPoints {
            found: config.airfoil_points,
        });
    }

    let height = geometry.winglet_height.as_ref().get::<meter>();
    let has_winglet = height > WINGLET_MIN_HEIGHT;

    let stations = config.span_stations;
    let loops = stations.saturating_add(usize::from(has_winglet));
    let count = config
        .airfoil_points
        .saturating_mul(2)
        .saturating_sub(1)
        .saturating_mul(loops);
    if u32::try_from(count).is_err() {
        return Err(MeshError::TooManyVertices { count });
    }

    let section = config.airfoil.profile(1.0, config.airfoil_points);
    let loop_len = section.len();

    let span = geometry.span_m();
    let tan_sweep = geometry.sweep_le.get::<radian>().tan();
    let tan_dihedral = geometry.dihedral.get::<radian>().tan();
    let twist_root = geometry.twist_root.get::<radian>();
    let twist_tip = geometry.twist_tip.get::<radian>();

    let mut points: Vec<Vector3<f64>> = Vec::with_capacity(count);
    let mut triangles: Vec<[usize; 3]> = Vec::new();

    for i in 0..stations {
        let eta = i as f64 / (stations - 1) as f64;
        let y = eta * span;
        let chord = lerp(geometry.root_chord_m(), geometry.tip_chord_m(), eta);
        let (sin_t, cos_t) = lerp(twist_root, twist_tip, eta).sin_cos();

        let leading_edge = Vector3::new(y * tan_sweep, y, y * tan_dihedral);
        let axis = leading_edge + Vector3::new(TWIST_AXIS * chord, 0.0, 0.0);

        // Positive twist raises the leading edge.
        points.extend(section.points().iter().map(|p| {
            let dx = (p.x - TWIST_AXIS) * chord;
            let dz = p.z * chord;
            axis + Vector3::new(cos_t * dx + sin_t * dz, 0.0, -sin_t * dx + cos_t * dz)
        }));
    }

    for i in 1..stations {
        stitch(&mut triangles, (i - 1) * loop_len, i * loop_len, loop_len);
    }

    if has_winglet {
        let offset = winglet_direction(geometry) * height;
        let tip_start = (stations - 1) * loop_len;
        let top_start = points.len();

        for j in 0..loop_len {
            points.push(points[tip_start + j] + offset);
        }
        stitch(&mut triangles, tip_start, top_start, loop_len);
    }

    Ok(Mesh {
        vertices: points
            .iter()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect(),
        triangles: triangles
            .into_iter()
            .map(|[a, b, c]| [a as u32, b as u32, c as u32])
            .collect(),
    })
}

/// Unit extrusion direction of the winglet.
///
/// Toe-out swings the horizontal component from pure outboard (`+y`) toward
/// `+x`; cant tilts it up toward `+z`.
fn winglet_direction(geometry: &GeometryParameters) -> Vector3<f64> {
    let (sin_toe, cos_toe) = geometry.winglet_toe_out.get::<radian>().sin_cos();
    let (sin_cant, cos_cant) = geometry.winglet_cant.get::<radian>().sin_cos();

    (Vector3::new(sin_toe, cos_toe, 0.0) * cos_cant + Vector3::z() * sin_cant).normalize()
}

/// Two triangles per quad between loops starting at `from` and `to`.
fn stitch(triangles: &mut Vec<[usize; 3]>, from: usize, to: usize, loop_len: usize) {
    for j in 0..loop_len - 1 {
        let (a, b) = (from + j, from + j + 1);
        let (c, d) = (to + j, to + j + 1);
        triangles.push([a, b, d]);
        triangles.push([a, d, c]);
    }
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    (1.0 - t) * start + t * end
}
