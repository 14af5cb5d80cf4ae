//! Strain multiplier grids.
//!
//! The physical strain samples are `x * ε0`, where `x` comes from a fixed,
//! non-uniform grid: fine near the peak (`x = 1`) and coarse far out on the
//! softening branch. Each grid is a concatenation of half-open arithmetic
//! progressions `[start, stop)`; a segment with step `h` holds
//! `ceil((stop - start) / h)` points and its i-th point is `start + i * h`.

use once_cell::sync::Lazy;

/// One half-open arithmetic progression of a strain grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSegment {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl GridSegment {
    const fn new(start: f64, stop: f64, step: f64) -> Self {
        GridSegment { start, stop, step }
    }

    /// Number of points this segment contributes.
    pub fn len(&self) -> usize {
        ((self.stop - self.start) / self.step).ceil().max(0.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.start + i as f64 * self.step)
    }
}

/// Compression grid definition, `x ∈ [0.3, 50)`.
///
/// Starts at 0.3 rather than 0 to stay clear of the `0/0` damage ratio at the origin.
pub const COMPRESSION_SEGMENTS: [GridSegment; 4] = [
    GridSegment::new(0.3, 1.0, 0.1),
    GridSegment::new(1.0, 4.0, 0.2),
    GridSegment::new(4.0, 14.0, 0.5),
    GridSegment::new(14.0, 50.0, 5.0),
];

/// Tension grid definition, `x ∈ [1.0, 50)`. Only the peak and softening branch.
pub const TENSION_SEGMENTS: [GridSegment; 3] = [
    GridSegment::new(1.0, 4.0, 0.2),
    GridSegment::new(4.0, 14.0, 0.5),
    GridSegment::new(14.0, 50.0, 5.0),
];

/// Ordered strain multipliers `x` shared by every material.
#[derive(Debug, Clone, PartialEq)]
pub struct StrainGrid {
    points: Vec<f64>,
}

impl StrainGrid {
    /// Concatenate segments in order. Boundaries are not deduplicated; the
    /// half-open segments never repeat an endpoint.
    pub fn from_segments(segments: &[GridSegment]) -> Self {
        let points = segments.iter().flat_map(|s| s.points()).collect();
        StrainGrid { points }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of leading points on the ascending branch (`x <= 1`).
    pub fn ascending_len(&self) -> usize {
        self.points.iter().take_while(|&&x| x <= 1.0).count()
    }
}

/// Precomputed compression grid (50 points).
pub static COMPRESSION_GRID: Lazy<StrainGrid> =
    Lazy::new(|| StrainGrid::from_segments(&COMPRESSION_SEGMENTS));

/// Precomputed tension grid (43 points).
pub static TENSION_GRID: Lazy<StrainGrid> =
    Lazy::new(|| StrainGrid::from_segments(&TENSION_SEGMENTS));
