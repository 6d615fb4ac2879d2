use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::error::JuliaError;

/// Upper bound on the number of grid points, so that an oversized width is
/// reported as an error instead of aborting on allocation. Accumulated axes
/// may hold one extra sample each, which the bound accounts for.
pub const MAX_POINT_COUNT: u64 = 100_000_000;

/**
 * Rectangular sampling area in the complex plane. The real axis spans
 * `[x_min, x_max]` and the imaginary axis spans `[y_min, y_max]`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Region {
    fn default() -> Region {
        Region {
            x_min: -1.8,
            x_max: 1.8,
            y_min: -1.8,
            y_max: 1.8,
        }
    }
}

impl Region {
    /// Positive: the x axis is scanned left to right.
    pub fn x_step(&self, desired_width: u32) -> f64 {
        (self.x_max - self.x_min) / (desired_width as f64)
    }

    /// Negative: the y axis is scanned top to bottom, starting from `y_max`.
    pub fn y_step(&self, desired_width: u32) -> f64 {
        (self.y_min - self.y_max) / (desired_width as f64)
    }

    /// Checks that accumulating samples over this region at `desired_width`
    /// terminates and yields a non-empty grid.
    pub fn validate(&self, desired_width: u32) -> Result<(), JuliaError> {
        if desired_width == 0 {
            return Err(JuliaError::InvalidWidth);
        }
        let largest_axis = desired_width as u64 + 1;
        if largest_axis * largest_axis > MAX_POINT_COUNT {
            return Err(JuliaError::GridTooLarge {
                desired_width,
                max_point_count: MAX_POINT_COUNT,
            });
        }
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(JuliaError::InvalidRegion(format!(
                "bounds must be finite: {:?}",
                self
            )));
        }
        if self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(JuliaError::InvalidRegion(format!(
                "lower bounds must be strictly below upper bounds: {:?}",
                self
            )));
        }

        let x_step = self.x_step(desired_width);
        let y_step = self.y_step(desired_width);
        let makes_progress = |from: f64, step: f64| from + step != from;
        if !(makes_progress(self.x_min, x_step)
            && makes_progress(self.x_max, x_step)
            && makes_progress(self.y_min, y_step)
            && makes_progress(self.y_max, y_step))
        {
            return Err(JuliaError::InvalidRegion(format!(
                "width {} is too fine to step across {:?}",
                desired_width, self
            )));
        }
        Ok(())
    }
}

/// How axis samples are placed between the region bounds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GridSampling {
    /// Repeated floating-point addition of a fixed step until the end bound is
    /// reached. The sample count may differ from the width by one.
    Accumulate,
    /// `start + (end - start) * i / width` for `i` in `0..width`. Exactly
    /// `width` samples, but different values than `Accumulate`.
    Interpolate,
}

impl Default for GridSampling {
    fn default() -> Self {
        GridSampling::Accumulate
    }
}

/// Samples `start, start + step, ...` while strictly below `end`.
fn ascending_samples(start: f64, end: f64, step: f64) -> Vec<f64> {
    assert!(step > 0.0);
    let mut samples = Vec::new();
    let mut value = start;
    while value < end {
        samples.push(value);
        value += step;
    }
    samples
}

/// Samples `start, start + step, ...` while strictly above `end`. `step` is negative.
fn descending_samples(start: f64, end: f64, step: f64) -> Vec<f64> {
    assert!(step < 0.0);
    let mut samples = Vec::new();
    let mut value = start;
    while value > end {
        samples.push(value);
        value += step;
    }
    samples
}

/// `count` samples on the half-open interval from `start` toward `end`.
fn interpolated_samples(start: f64, end: f64, count: u32) -> Vec<f64> {
    let scale = (end - start) / (count as f64);
    (0..count).map(|i| start + scale * (i as f64)).collect()
}

/// The x (ascending) and y (descending) samples that span the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSamples {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl AxisSamples {
    pub fn new(
        region: &Region,
        desired_width: u32,
        sampling: GridSampling,
    ) -> Result<AxisSamples, JuliaError> {
        region.validate(desired_width)?;
        let axes = match sampling {
            GridSampling::Accumulate => AxisSamples {
                x: ascending_samples(region.x_min, region.x_max, region.x_step(desired_width)),
                y: descending_samples(region.y_max, region.y_min, region.y_step(desired_width)),
            },
            GridSampling::Interpolate => AxisSamples {
                x: interpolated_samples(region.x_min, region.x_max, desired_width),
                y: interpolated_samples(region.y_max, region.y_min, desired_width),
            },
        };
        Ok(axes)
    }

    pub fn point_count(&self) -> usize {
        self.x.len() * self.y.len()
    }
}

/**
 * Index-aligned starting points and parameters: entry `i` of both sequences
 * describes the same grid cell. The lengths always match.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct PointBatch {
    starts: Vec<Complex64>,
    params: Vec<Complex64>,
}

impl PointBatch {
    pub fn new(starts: Vec<Complex64>, params: Vec<Complex64>) -> Result<PointBatch, JuliaError> {
        if starts.len() != params.len() {
            return Err(JuliaError::MisalignedBatch {
                starts: starts.len(),
                params: params.len(),
            });
        }
        Ok(PointBatch { starts, params })
    }

    /// Pairs every starting point with the same parameter.
    pub fn with_constant_parameter(starts: Vec<Complex64>, parameter: Complex64) -> PointBatch {
        let params = vec![parameter; starts.len()];
        PointBatch { starts, params }
    }

    pub fn starts(&self) -> &[Complex64] {
        &self.starts
    }

    pub fn params(&self) -> &[Complex64] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Complex64, &Complex64)> + '_ {
        self.starts.iter().zip(self.params.iter())
    }
}

/// Axis samples plus the row-major point batch built from them.
#[derive(Debug, Clone)]
pub struct Grid {
    pub axes: AxisSamples,
    pub batch: PointBatch,
}

/// Row-major cross product: rows follow `axes.y`, columns follow `axes.x`.
pub fn cross_product(axes: &AxisSamples, parameter: Complex64) -> PointBatch {
    let mut starts = Vec::with_capacity(axes.point_count());
    for &y in axes.y.iter() {
        for &x in axes.x.iter() {
            starts.push(Complex64::new(x, y));
        }
    }
    PointBatch::with_constant_parameter(starts, parameter)
}

pub fn build_grid(
    region: &Region,
    desired_width: u32,
    sampling: GridSampling,
    parameter: Complex64,
) -> Result<Grid, JuliaError> {
    let axes = AxisSamples::new(region, desired_width, sampling)?;
    let batch = cross_product(&axes, parameter);
    Ok(Grid { axes, batch })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulation_stops_before_the_end_bound() {
        assert_eq!(ascending_samples(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(descending_samples(1.0, 0.0, -0.5), vec![1.0, 0.5]);
    }

    #[test]
    fn interpolation_is_half_open() {
        assert_eq!(interpolated_samples(2.0, -2.0, 4), vec![2.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn region_steps_have_opposite_signs() {
        let region = Region::default();
        assert!(region.x_step(1000) > 0.0);
        assert!(region.y_step(1000) < 0.0);
    }
}
