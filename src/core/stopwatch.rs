use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use super::memory::{self, MemorySnapshot, MemoryUsage};

/// One benchmark phase: how long it took and the heap it used.
pub struct Split {
    pub name: String,
    pub duration: Duration,
    pub memory: MemoryUsage,
}

impl Split {
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "{}: {:?}, peak +{:.3} MiB, retained {:+.3} MiB",
            self.name,
            self.duration,
            memory::mebibytes(self.memory.peak_increment_bytes()),
            memory::signed_mebibytes(self.memory.retained_bytes()),
        )
    }
}

/**
 * Splits a run into consecutive named phases. Each split covers the time and
 * heap usage since the previous split (or construction), giving a per-phase
 * line-by-line view similar to a memory profiler's report.
 */
pub struct Stopwatch {
    pub splits: Vec<Split>,
    pub name: String,
    start_total: Instant,
    start_split: Instant,
    memory_at_split: MemorySnapshot,
}

impl Stopwatch {
    pub fn new(name: String) -> Stopwatch {
        let now = Instant::now();
        Stopwatch {
            splits: Vec::default(),
            name,
            start_total: now,
            start_split: now,
            memory_at_split: memory::reset_peak(),
        }
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_total.elapsed()
    }

    /// Close the current phase under `name` and start the next one.
    pub fn record_split(&mut self, name: String) -> &Split {
        let duration = self.start_split.elapsed();
        let usage = MemoryUsage::new(self.memory_at_split, memory::snapshot());
        tracing::debug!(
            stopwatch = %self.name,
            split = %name,
            ?duration,
            peak_increment_bytes = usage.peak_increment_bytes(),
            "recorded split"
        );

        self.splits.push(Split {
            name,
            duration,
            memory: usage,
        });
        self.memory_at_split = memory::reset_peak();
        self.start_split = Instant::now();
        &self.splits[self.splits.len() - 1]
    }

    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "Stopwatch: {};  Total elapsed duration: {:?}",
            self.name,
            self.total_elapsed()
        )?;
        for split in self.splits.iter() {
            write!(writer, "  ")?;
            split.display(writer)?;
        }
        Ok(())
    }
}
