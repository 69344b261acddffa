//! Request outcome reporting.
//!
//! [`MatrixService`](crate::service::MatrixService) reports every request to an optional
//! [`MatrixObserver`]. Failures carry a [`Severity`], and those at or above the configured
//! threshold are also raised through [`MatrixObserver::on_alert`]. The bundled observers write
//! one `key=value` line per event.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{MatrixError, MatrixViolation};
use crate::service::Operation;
use crate::types::Grid;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Client-side input problem.
    Warning,
    /// Request failed on well-formed input.
    Error,
    /// Infrastructure failure, typically I/O.
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

/// Context about one service request.
#[derive(Debug, Clone)]
pub struct ObservationContext {
    /// Operation requested.
    pub operation: Operation,
    /// Content type as declared by the caller.
    pub content_type: Option<String>,
    /// Size of the submitted body (0 when absent).
    pub input_bytes: usize,
}

/// Shape of the grid a successful request operated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    pub rows: usize,
    pub cols: usize,
}

impl GridStats {
    pub fn of(grid: &Grid) -> Self {
        Self {
            rows: grid.row_count(),
            cols: grid.col_count(),
        }
    }
}

/// Observer interface for request outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait MatrixObserver: Send + Sync {
    /// Called when a request succeeds.
    fn on_success(&self, _ctx: &ObservationContext, _stats: GridStats) {}

    /// Called when a request fails.
    fn on_failure(&self, _ctx: &ObservationContext, _severity: Severity, _error: &MatrixError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ObservationContext, severity: Severity, error: &MatrixError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn MatrixObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn MatrixObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl MatrixObserver for CompositeObserver {
    fn on_success(&self, ctx: &ObservationContext, stats: GridStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ObservationContext, severity: Severity, error: &MatrixError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ObservationContext, severity: Severity, error: &MatrixError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs request events to stderr, one line each.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl MatrixObserver for StdErrObserver {
    fn on_success(&self, ctx: &ObservationContext, stats: GridStats) {
        eprintln!("[csv-matrix] {}", event_line(ctx, Event::Ok(stats)));
    }

    fn on_failure(&self, ctx: &ObservationContext, severity: Severity, error: &MatrixError) {
        eprintln!("[csv-matrix] {}", event_line(ctx, Event::Failed(severity, error)));
    }

    fn on_alert(&self, ctx: &ObservationContext, severity: Severity, error: &MatrixError) {
        eprintln!("[csv-matrix] {}", event_line(ctx, Event::Alert(severity, error)));
    }
}

/// Appends request events to a local log file, prefixed with a unix timestamp.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Writes are best-effort; failures to open or write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, ctx: &ObservationContext, event: Event<'_>) {
        let line = format!("ts={} {}", unix_ts(), event_line(ctx, event));
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl MatrixObserver for FileObserver {
    fn on_success(&self, ctx: &ObservationContext, stats: GridStats) {
        self.append(ctx, Event::Ok(stats));
    }

    fn on_failure(&self, ctx: &ObservationContext, severity: Severity, error: &MatrixError) {
        self.append(ctx, Event::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &ObservationContext, severity: Severity, error: &MatrixError) {
        self.append(ctx, Event::Alert(severity, error));
    }
}

#[derive(Debug, Clone, Copy)]
enum Event<'a> {
    Ok(GridStats),
    Failed(Severity, &'a MatrixError),
    Alert(Severity, &'a MatrixError),
}

/// `op=.. status=.. content_type=.. bytes=..` followed by the outcome fields.
fn event_line(ctx: &ObservationContext, event: Event<'_>) -> String {
    let status = match event {
        Event::Ok(_) => "ok",
        Event::Failed(..) => "failed",
        Event::Alert(..) => "alert",
    };
    let mut line = format!(
        "op={} status={status} content_type={} bytes={}",
        ctx.operation,
        ctx.content_type.as_deref().unwrap_or("-"),
        ctx.input_bytes
    );
    match event {
        Event::Ok(stats) => line.push_str(&format!(" rows={} cols={}", stats.rows, stats.cols)),
        Event::Failed(severity, error) | Event::Alert(severity, error) => {
            line.push_str(&format!(
                " severity={} class={:?} kind={:?}",
                severity.as_str(),
                error.class(),
                error.kind()
            ));
            let violation = error.violation();
            if let Some(row) = violation.and_then(MatrixViolation::row) {
                line.push_str(&format!(" row={row}"));
            }
            if let Some(column) = violation.and_then(MatrixViolation::column) {
                line.push_str(&format!(" column={column}"));
            }
            line.push_str(&format!(" err={:?}", error.to_string()));
        }
    }
    line
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ObservationContext {
        ObservationContext {
            operation: Operation::Flatten,
            content_type: Some("text/csv".to_string()),
            input_bytes: 3,
        }
    }

    #[test]
    fn event_line_names_outcome_and_location() {
        let ok = event_line(&ctx(), Event::Ok(GridStats { rows: 1, cols: 2 }));
        assert_eq!(ok, "op=flatten status=ok content_type=text/csv bytes=3 rows=1 cols=2");

        let err = MatrixError::from(MatrixViolation::InvalidInteger { row: 2, column: 1 });
        let failed = event_line(&ctx(), Event::Failed(Severity::Warning, &err));
        assert_eq!(
            failed,
            "op=flatten status=failed content_type=text/csv bytes=3 severity=warning \
             class=Client kind=InvalidMatrix row=2 column=1 \
             err=\"Invalid integer value at row 2, column 1\""
        );

        let mut bare = ctx();
        bare.content_type = None;
        let err = MatrixError::from(std::io::Error::other("gone"));
        let alert = event_line(&bare, Event::Alert(Severity::Critical, &err));
        assert!(alert.starts_with("op=flatten status=alert content_type=- bytes=3"));
        assert!(alert.contains("severity=critical class=Server kind=Io err="));
        assert!(!alert.contains("row="));
    }

    #[test]
    fn file_observer_appends_lines() {
        let name = format!("csv-matrix-observer-{}.log", std::process::id());
        let path = std::env::temp_dir().join(name);
        let _ = std::fs::remove_file(&path);

        let obs = FileObserver::new(&path);
        obs.on_success(&ctx(), GridStats { rows: 1, cols: 2 });
        let err = MatrixError::from(MatrixViolation::Empty);
        obs.on_failure(&ctx(), Severity::Warning, &err);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("ts=")));
        assert!(lines[0].ends_with("status=ok content_type=text/csv bytes=3 rows=1 cols=2"));
        assert!(lines[1].contains("status=failed"));
        assert!(lines[1].ends_with("err=\"File is null or empty\""));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn stderr_observer_accepts_every_event() {
        let err = MatrixError::from(MatrixViolation::Empty);
        StdErrObserver.on_success(&ctx(), GridStats { rows: 1, cols: 1 });
        StdErrObserver.on_failure(&ctx(), Severity::Warning, &err);
        StdErrObserver.on_alert(&ctx(), Severity::Warning, &err);
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }
}
