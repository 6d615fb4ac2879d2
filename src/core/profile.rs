use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use super::memory::{self, MemoryUsage};

/// The result of a computation together with what it cost to produce it.
#[derive(Debug, Clone)]
pub struct Profiled<T> {
    pub result: T,
    pub name: String,
    pub elapsed: Duration,
    /// Only set by `profile_fn`.
    pub memory: Option<MemoryUsage>,
}

impl<T> Profiled<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Profiled<U> {
        Profiled {
            result: f(self.result),
            name: self.name,
            elapsed: self.elapsed,
            memory: self.memory,
        }
    }

    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "@timefn: {} took {} seconds.",
            self.name,
            self.elapsed.as_secs_f64()
        )?;
        if let Some(memory) = &self.memory {
            write!(writer, "  ")?;
            memory.display(writer)?;
        }
        Ok(())
    }
}

/**
 * Run `f`, measuring its wall-clock duration. The measurement is logged at
 * `info` level and returned alongside the result.
 */
pub fn time_fn<T, F: FnOnce() -> T>(name: &str, f: F) -> Profiled<T> {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    tracing::info!(
        component = name,
        elapsed_seconds = elapsed.as_secs_f64(),
        "@timefn: {} took {} seconds.",
        name,
        elapsed.as_secs_f64()
    );
    Profiled {
        result,
        name: name.to_owned(),
        elapsed,
        memory: None,
    }
}

/**
 * Like `time_fn`, but also samples heap usage around the call.
 */
pub fn profile_fn<T, F: FnOnce() -> T>(name: &str, f: F) -> Profiled<T> {
    let baseline = memory::reset_peak();
    let mut profiled = time_fn(name, f);

    let usage = MemoryUsage::new(baseline, memory::snapshot());
    tracing::info!(
        component = name,
        peak_increment_bytes = usage.peak_increment_bytes(),
        retained_bytes = usage.retained_bytes(),
        "memory usage for {}: peak +{:.3} MiB",
        name,
        memory::mebibytes(usage.peak_increment_bytes())
    );
    profiled.memory = Some(usage);
    profiled
}
