//! Heap usage tracking. The crate installs `peak_alloc::PeakAlloc` as the
//! global allocator, so every binary and test linking it is measured.
//! The counters are process-wide: a measurement taken while other threads
//! allocate includes their allocations too.

use peak_alloc::PeakAlloc;

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

const BYTES_PER_MEBIBYTE: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub current_bytes: usize,
    pub peak_bytes: usize,
}

pub fn snapshot() -> MemorySnapshot {
    MemorySnapshot {
        current_bytes: PEAK_ALLOC.current_usage(),
        peak_bytes: PEAK_ALLOC.peak_usage(),
    }
}

/// Restart peak tracking, so that the next snapshot reports the peak reached
/// after this call. Returns the state at the restart point.
pub fn reset_peak() -> MemorySnapshot {
    PEAK_ALLOC.reset_peak_usage();
    let current_bytes = PEAK_ALLOC.current_usage();
    MemorySnapshot {
        current_bytes,
        peak_bytes: current_bytes,
    }
}

/// Heap usage around a single measured computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub baseline_bytes: usize,
    pub peak_bytes: usize,
    pub final_bytes: usize,
}

impl MemoryUsage {
    pub fn new(baseline: MemorySnapshot, after: MemorySnapshot) -> MemoryUsage {
        MemoryUsage {
            baseline_bytes: baseline.current_bytes,
            peak_bytes: after.peak_bytes.max(baseline.current_bytes),
            final_bytes: after.current_bytes,
        }
    }

    /// Largest amount of extra heap held at any point during the computation.
    pub fn peak_increment_bytes(&self) -> usize {
        self.peak_bytes.saturating_sub(self.baseline_bytes)
    }

    /// Heap still held after the computation, relative to the baseline.
    pub fn retained_bytes(&self) -> i64 {
        self.final_bytes as i64 - self.baseline_bytes as i64
    }

    pub fn display<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "Memory: baseline {:.3} MiB, peak {:.3} MiB (+{:.3} MiB), final {:.3} MiB",
            mebibytes(self.baseline_bytes),
            mebibytes(self.peak_bytes),
            mebibytes(self.peak_increment_bytes()),
            mebibytes(self.final_bytes),
        )
    }
}

pub fn mebibytes(bytes: usize) -> f64 {
    bytes as f64 / BYTES_PER_MEBIBYTE
}

pub fn signed_mebibytes(bytes: i64) -> f64 {
    bytes as f64 / BYTES_PER_MEBIBYTE
}
