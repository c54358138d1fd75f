// src/core/grid.rs

use super::error::{ModelError, ModelResult};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `count` evenly spaced values on `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // Pin the last sample so rounding never moves the upper bound.
            values[count - 1] = end;
            values
        }
    }
}

/// The 1-D domain every wavefunction is evaluated on.
///
/// Built once from a `(min, max, count)` triple with both end points
/// included, and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    points: Vec<f64>,
}

impl SpatialGrid {
    /// Creates `count` evenly spaced points on `[min, max]`.
    ///
    /// A single point yields `[min]`. Zero points, non-finite bounds, and
    /// bounds with `min >= max` for more than one point are rejected.
    pub fn linspace(min: f64, max: f64, count: usize) -> ModelResult<Self> {
        if count == 0 {
            return Err(ModelError::invalid("count", "a grid needs at least one point"));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(ModelError::invalid(
                "bounds",
                format!("grid bounds must be finite, got [{}, {}]", min, max),
            ));
        }
        if count > 1 && !(min < max) {
            return Err(ModelError::invalid(
                "bounds",
                format!("grid needs min < max for {} points, got [{}, {}]", count, min, max),
            ));
        }

        Ok(Self { points: linspace(min, max, count) })
    }

    /// Read-only view of the sample positions.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Spacing between neighbouring samples (0 for a single-point grid).
    pub fn step(&self) -> f64 {
        if self.points.len() < 2 {
            0.0
        } else {
            self.points[1] - self.points[0]
        }
    }

    /// Index of the sample closest to `x`.
    pub fn nearest_index(&self, x: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, p) in self.points.iter().enumerate() {
            let dist = (p - x).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Evaluates `f` at every grid point.
    pub fn map<T>(&self, f: impl Fn(f64) -> T) -> Vec<T> {
        self.points.iter().map(|&x| f(x)).collect()
    }
}

/// Serialised as its defining `(min, max, points)` triple, the same shape
/// job files use.
impl Serialize for SpatialGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("SpatialGrid", 3)?;
        s.serialize_field("min", &self.min())?;
        s.serialize_field("max", &self.max())?;
        s.serialize_field("points", &self.len())?;
        s.end()
    }
}

impl<'de> Deserialize<'de> for SpatialGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Bounds {
            min: f64,
            max: f64,
            points: usize,
        }
        let bounds = Bounds::deserialize(deserializer)?;
        SpatialGrid::linspace(bounds.min, bounds.max, bounds.points).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for SpatialGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid[{:.3}..{:.3}, {} points]", self.min(), self.max(), self.len())
    }
}
