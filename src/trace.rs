//! Step trace of the algorithms
//!
//! Algorithms report each state transition to a [`Tracer`]. The trace never
//! affects results, it only exists so that intermediate steps can be displayed.
use std::fmt;

/// Observer of algorithm steps
pub trait Tracer {
    /// Whether entries are recorded at all, used to skip formatting
    fn enabled(&self) -> bool {
        true
    }

    /// Record single step
    fn step(&mut self, entry: fmt::Arguments<'_>);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn step(&mut self, entry: fmt::Arguments<'_>) {
        (**self).step(entry)
    }
}

/// Tracer that drops all entries
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl Tracer for NoTrace {
    fn enabled(&self) -> bool {
        false
    }

    fn step(&mut self, _entry: fmt::Arguments<'_>) {}
}

/// Collects entries as strings
impl Tracer for Vec<String> {
    fn step(&mut self, entry: fmt::Arguments<'_>) {
        self.push(entry.to_string());
    }
}

/// Forwards entries to `tracing` as trace level events
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::TRACE)
    }

    fn step(&mut self, entry: fmt::Arguments<'_>) {
        tracing::trace!("{}", entry);
    }
}

/// Record a formatted step if tracer is enabled
#[macro_export]
macro_rules! trace_step {
    ($tracer:expr, $($arg:tt)+) => {{
        let tracer: &mut dyn $crate::Tracer = $tracer;
        if tracer.enabled() {
            tracer.step(format_args!($($arg)+));
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracers() {
        let mut entries = Vec::new();
        trace_step!(&mut entries, "x={} y={}", 1, 2);
        trace_step!(&mut NoTrace, "dropped {}", 3);
        trace_step!(&mut LogTracer, "logged {}", 4);
        assert_eq!(entries, vec!["x=1 y=2".to_string()]);

        let mut by_ref = &mut entries;
        trace_step!(&mut by_ref, "second");
        assert_eq!(entries.len(), 2);
    }
}
