use std::io::Write;
use std::time::Duration;

use crate::core::{
    error::JuliaError,
    profile::{profile_fn, time_fn, Profiled},
    stopwatch::Stopwatch,
};
use crate::fractals::{
    grid::build_grid,
    julia::{calculate_escape_counts, EscapeSummary, JuliaParams},
};

pub struct BenchmarkReport {
    pub x_sample_count: usize,
    pub y_sample_count: usize,
    pub counts: Profiled<Vec<u32>>,
    pub summary: EscapeSummary,
    pub stopwatch: Stopwatch,
}

impl BenchmarkReport {
    pub fn display<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "Length of x: {}", self.x_sample_count)?;
        writeln!(writer, "Length of y: {}", self.y_sample_count)?;
        self.counts.display(writer)?;
        self.summary.display(writer)?;
        self.stopwatch.display(writer)?;
        Ok(())
    }
}

/**
 * Build the grid once, evaluate every point once, and summarize the result.
 * The expected-output check is left to the caller.
 */
pub fn run_benchmark(params: &JuliaParams) -> Result<BenchmarkReport, JuliaError> {
    params.validate()?;
    let mut stopwatch = Stopwatch::new("Julia Benchmark Stopwatch".to_owned());

    let grid = build_grid(
        &params.region,
        params.desired_width,
        params.grid_sampling,
        params.constant_term(),
    )?;
    tracing::info!("Length of x: {}", grid.axes.x.len());
    tracing::info!("Total elements: {}", grid.batch.len());
    stopwatch.record_split("build grid".to_owned());

    if params.pause_before_compute_seconds > 0.0 {
        std::thread::sleep(Duration::from_secs_f64(params.pause_before_compute_seconds));
        stopwatch.record_split("pause before compute".to_owned());
    }

    let max_iter_count = params.max_iter_count;
    let evaluate = || calculate_escape_counts(&grid.batch, max_iter_count);
    let counts = if params.track_memory {
        profile_fn("calculate_escape_counts", evaluate)
    } else {
        time_fn("calculate_escape_counts", evaluate)
    };
    stopwatch.record_split("compute escape counts".to_owned());

    let summary = EscapeSummary::new(&counts.result, max_iter_count);
    stopwatch.record_split("summarize".to_owned());

    Ok(BenchmarkReport {
        x_sample_count: grid.axes.x.len(),
        y_sample_count: grid.axes.y.len(),
        counts,
        summary,
        stopwatch,
    })
}
