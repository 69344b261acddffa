//! Transport-agnostic request handling.
//!
//! A transport (HTTP, CLI, queue consumer) hands an upload body and its declared content type to
//! [`MatrixService`], naming one of the [`Operation`]s. The service validates the body, runs the
//! transform, reports the outcome to the configured observer, and returns either a typed result
//! ([`MatrixService::execute`]) or a serializable [`Response`] ([`MatrixService::handle`]).
//! Streaming transports use [`MatrixService::execute_reader`] and [`MatrixService::handle_reader`],
//! where a failed read surfaces as [`MatrixError::Io`].

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{ErrorKind, FailureClass, MatrixError, MatrixResult};
use crate::ingestion::parse_csv;
use crate::observability::{GridStats, MatrixObserver, ObservationContext, Severity};
use crate::processing::{flatten, multiply, render, sum, transpose};
use crate::types::Grid;

/// Body value numeric operations return on any failure.
///
/// Only ever appears in [`Response::body`]; check [`Response::failure`] to tell it apart from a
/// real result of `-1`.
pub const NUMERIC_FAILURE_SENTINEL: i32 = -1;

/// Named request operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Canonical re-rendering of the submitted grid.
    Echo,
    /// Transpose, then render.
    Invert,
    /// Row-major, comma-joined cells.
    Flatten,
    /// Sum of all cells.
    Sum,
    /// Product of all cells.
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Invert,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
    ];

    /// Parse an operation from its endpoint name (case-insensitive, optional leading `/`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix('/').unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Invert => "invert",
            Operation::Flatten => "flatten",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
        }
    }

    /// Whether the operation produces a number rather than text.
    pub fn is_numeric(self) -> bool {
        matches!(self, Operation::Sum | Operation::Multiply)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful operation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Number(i32),
}

/// Outcome class of a [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    ClientError,
    ServerError,
}

/// Structured description of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl From<&MatrixError> for Failure {
    fn from(err: &MatrixError) -> Self {
        let violation = err.violation();
        Self {
            kind: err.kind(),
            message: err.to_string(),
            row: violation.and_then(|v| v.row()),
            column: violation.and_then(|v| v.column()),
        }
    }
}

/// Boundary representation of one request's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status: Status,
    pub body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl Response {
    /// Build the response for `operation` from its typed result.
    ///
    /// Text operations put the failure message in the body. Numeric operations put
    /// [`NUMERIC_FAILURE_SENTINEL`] there.
    pub fn from_result(operation: Operation, result: &MatrixResult<Body>) -> Self {
        match result {
            Ok(body) => Self {
                status: Status::Ok,
                body: body.clone(),
                failure: None,
            },
            Err(err) => {
                let status = match err.class() {
                    FailureClass::Client => Status::ClientError,
                    FailureClass::Server => Status::ServerError,
                };
                let body = if operation.is_numeric() {
                    Body::Number(NUMERIC_FAILURE_SENTINEL)
                } else {
                    Body::Text(err.to_string())
                };
                Self {
                    status,
                    body,
                    failure: Some(Failure::from(err)),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Options controlling [`MatrixService`] behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ServiceOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn MatrixObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for ServiceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Stateless request handler. Holds only configuration; share one instance freely.
#[derive(Debug, Clone, Default)]
pub struct MatrixService {
    options: ServiceOptions,
}

impl MatrixService {
    pub fn new(options: ServiceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Validate and render the grid back in canonical form.
    pub fn echo(&self, input: Option<&[u8]>, content_type: Option<&str>) -> MatrixResult<String> {
        self.run(Operation::Echo, input, content_type, |g| Ok(render(g)))
    }

    /// Validate, transpose, and render.
    pub fn invert(&self, input: Option<&[u8]>, content_type: Option<&str>) -> MatrixResult<String> {
        self.run(Operation::Invert, input, content_type, |g| Ok(render(&transpose(g))))
    }

    pub fn flatten(
        &self,
        input: Option<&[u8]>,
        content_type: Option<&str>,
    ) -> MatrixResult<String> {
        self.run(Operation::Flatten, input, content_type, |g| Ok(flatten(g)))
    }

    pub fn sum(&self, input: Option<&[u8]>, content_type: Option<&str>) -> MatrixResult<i32> {
        self.run(Operation::Sum, input, content_type, |g| Ok(sum(g)?))
    }

    pub fn multiply(&self, input: Option<&[u8]>, content_type: Option<&str>) -> MatrixResult<i32> {
        self.run(Operation::Multiply, input, content_type, |g| Ok(multiply(g)?))
    }

    /// Run `operation` on the upload and return its typed result.
    pub fn execute(
        &self,
        operation: Operation,
        input: Option<&[u8]>,
        content_type: Option<&str>,
    ) -> MatrixResult<Body> {
        self.run(operation, input, content_type, |g| apply(operation, g))
    }

    /// Run `operation` and collapse the outcome into a [`Response`].
    pub fn handle(
        &self,
        operation: Operation,
        input: Option<&[u8]>,
        content_type: Option<&str>,
    ) -> Response {
        Response::from_result(operation, &self.execute(operation, input, content_type))
    }

    /// Like [`Self::execute`], but reads the upload from a stream first.
    ///
    /// A read failure is reported to the observer as `Critical` and returned as
    /// [`MatrixError::Io`].
    pub fn execute_reader<R: Read>(
        &self,
        operation: Operation,
        mut reader: R,
        content_type: Option<&str>,
    ) -> MatrixResult<Body> {
        let mut buf = Vec::new();
        match reader.read_to_end(&mut buf) {
            Ok(_) => self.execute(operation, Some(buf.as_slice()), content_type),
            Err(e) => {
                let err = MatrixError::from(e);
                let ctx = ObservationContext {
                    operation,
                    content_type: content_type.map(str::to_owned),
                    input_bytes: buf.len(),
                };
                self.report_failure(&ctx, &err);
                Err(err)
            }
        }
    }

    /// Like [`Self::handle`], but reads the upload from a stream first.
    pub fn handle_reader<R: Read>(
        &self,
        operation: Operation,
        reader: R,
        content_type: Option<&str>,
    ) -> Response {
        Response::from_result(
            operation,
            &self.execute_reader(operation, reader, content_type),
        )
    }

    /// Parse the upload, apply `transform`, and report the outcome.
    ///
    /// When an observer is configured, this reports:
    ///
    /// - `on_success` with the grid shape
    /// - `on_failure` with a computed severity
    /// - `on_alert` when that severity is >= `options.alert_at_or_above`
    fn run<T, F>(
        &self,
        operation: Operation,
        input: Option<&[u8]>,
        content_type: Option<&str>,
        transform: F,
    ) -> MatrixResult<T>
    where
        F: FnOnce(&Grid) -> MatrixResult<T>,
    {
        let result = parse_csv(input, content_type).and_then(|grid| {
            let out = transform(&grid)?;
            Ok((out, GridStats::of(&grid)))
        });

        if let Some(obs) = self.options.observer.as_ref() {
            let ctx = ObservationContext {
                operation,
                content_type: content_type.map(str::to_owned),
                input_bytes: input.map_or(0, <[u8]>::len),
            };
            match &result {
                Ok((_, stats)) => obs.on_success(&ctx, *stats),
                Err(e) => self.report_failure(&ctx, e),
            }
        }

        result.map(|(out, _)| out)
    }

    fn report_failure(&self, ctx: &ObservationContext, error: &MatrixError) {
        if let Some(obs) = self.options.observer.as_ref() {
            let sev = severity_for_error(error);
            obs.on_failure(ctx, sev, error);
            if sev >= self.options.alert_at_or_above {
                obs.on_alert(ctx, sev, error);
            }
        }
    }
}

fn apply(operation: Operation, grid: &Grid) -> MatrixResult<Body> {
    Ok(match operation {
        Operation::Echo => Body::Text(render(grid)),
        Operation::Invert => Body::Text(render(&transpose(grid))),
        Operation::Flatten => Body::Text(flatten(grid)),
        Operation::Sum => Body::Number(sum(grid)?),
        Operation::Multiply => Body::Number(multiply(grid)?),
    })
}

fn severity_for_error(e: &MatrixError) -> Severity {
    match e {
        MatrixError::InvalidFile { .. } | MatrixError::InvalidMatrix(_) => Severity::Warning,
        MatrixError::Overflow(_) => Severity::Error,
        MatrixError::Io(_) => Severity::Critical,
    }
}
