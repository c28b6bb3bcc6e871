//! Spans and timing helpers for compiler operations.

use std::path::Path;

use tracing::{info_span, Span};

/// Span covering one document compilation.
pub fn compile_span(source: &Path, bytes: usize) -> Span {
    info_span!(
        "compile",
        source = %source.display(),
        bytes,
        error = tracing::field::Empty
    )
}

/// Span for a file operation.
pub fn file_span(operation: &str, path: &Path) -> Span {
    info_span!(
        "file",
        op = %operation,
        path = %path.display(),
        error = tracing::field::Empty
    )
}

/// Record an error on the current span.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_us = %duration.as_micros(),
            "operation completed"
        );
    }
}

/// Time an expression, logging its duration at debug level.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn with_subscriber<F>(f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_nested_spans() {
        with_subscriber(|| {
            let compile = compile_span(Path::new("specs/a.spec.md"), 128);
            let _guard1 = compile.enter();

            let file = file_span("write", Path::new("/tmp/out.prompt.json"));
            let _guard2 = file.enter();

            tracing::info!("nested operation");
        });
    }

    #[test]
    fn test_record_error() {
        with_subscriber(|| {
            let span = file_span("read", Path::new("/missing"));
            let _guard = span.enter();

            let error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
            record_error(&error);
        });
    }

    #[test]
    fn test_timed_macro_returns_value() {
        with_subscriber(|| {
            let result = timed!("macro_test", {
                std::thread::sleep(std::time::Duration::from_millis(1));
                "success"
            });

            assert_eq!(result, "success");
        });
    }
}
