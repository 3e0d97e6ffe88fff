use crate::{ApiError, ApiResult};
use opentelemetry::trace::Status;
use std::{future::Future, time::Instant};
use tracing::{field::Empty, info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct RequestSpan {
    span: Span,
    start_time: Instant,
}

impl RequestSpan {
    pub fn new(service: &str, operation: &'static str, method: &'static str, path: &str) -> Self {
        let span = info_span!(
            "trip_planner.request",
            otel.name = %format!("trip_planner.{operation}"),
            operation,
            http.response.status_code = Empty
        );
        span.set_attribute("trip_planner.service", service.to_string());
        span.set_attribute("trip_planner.operation", operation);
        span.set_attribute("http.request.method", method);
        span.set_attribute("url.path", path.to_string());

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_error(&self, error: &ApiError) {
        if let Some(status) = error.status() {
            self.span
                .record("http.response.status_code", status.as_u16());
        }
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&self) {
        self.span
            .set_attribute("trip_planner.duration_ms", self.elapsed_millis());
    }

    #[allow(clippy::cast_possible_truncation)]
    fn elapsed_millis(&self) -> i64 {
        self.start_time.elapsed().as_millis() as i64
    }
}

/// Run one outbound request inside a span carrying the operation, method and
/// path, recording failures on the span.
pub async fn trace_request<Fut, T>(
    service: &str,
    operation: &'static str,
    method: &'static str,
    path: &str,
    future: Fut,
) -> ApiResult<T>
where
    Fut: Future<Output = ApiResult<T>>,
{
    let span = RequestSpan::new(service, operation, method, path);
    let result = span.instrument_future(future).await;

    if let Err(error) = &result {
        span.on_error(error);
    }
    span.on_end();

    result
}
