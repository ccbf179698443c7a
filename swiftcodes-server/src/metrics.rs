//! Request metrics exported on `/metrics`.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{Method, StatusCode};
use actix_web::{HttpResponse, web};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use crate::ServerResult;
use crate::error::{RegistryError, ServerError};

type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

const LABELS: [&str; 3] = ["method", "path", "status"];

/// Lookups are answered from SQLite in well under a millisecond.
const LATENCY_BUCKETS: [f64; 9] = [0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0];

pub struct RequestMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    in_flight: IntGauge,
}

impl RequestMetrics {
    pub fn new() -> Result<Self, RegistryError> {
        Self::register().map_err(|e| {
            ServerError::Startup {
                reason: format!("Failed to create prometheus metrics: {e}"),
            }
            .into()
        })
    }

    fn register() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new(
                "swiftcodes_http_requests_total",
                "Total number of HTTP requests",
            ),
            &LABELS,
        )?;
        let latency = HistogramVec::new(
            HistogramOpts::new(
                "swiftcodes_http_request_duration_seconds",
                "HTTP request latencies in seconds",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &LABELS,
        )?;
        let in_flight = IntGauge::new(
            "swiftcodes_http_requests_in_flight",
            "HTTP requests currently being served",
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        registry.register(Box::new(in_flight.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
            in_flight,
        })
    }

    fn observe(&self, method: &Method, route: &str, status: StatusCode, elapsed: Duration) {
        let labels = [method.as_str(), route, status.as_str()];
        self.requests.with_label_values(&labels).inc();
        self.latency
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> Result<String, RegistryError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| ServerError::Metrics {
                reason: e.to_string(),
            })?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Decrements the in-flight gauge when the request finishes or is dropped.
struct InFlight(IntGauge);

impl InFlight {
    fn enter(gauge: &IntGauge) -> Self {
        gauge.inc();
        Self(gauge.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.dec();
    }
}

/// Middleware recording every routed request into [`RequestMetrics`].
pub struct MetricsMiddleware {
    metrics: Arc<RequestMetrics>,
}

impl MetricsMiddleware {
    pub fn new(metrics: Arc<RequestMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = MetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsService {
            service,
            metrics: Arc::clone(&self.metrics),
        }))
    }
}

pub struct MetricsService<S> {
    service: S,
    metrics: Arc<RequestMetrics>,
}

impl<S, B> Service<ServiceRequest> for MetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().clone();
        // Route pattern, not the raw path: codes must not become label values.
        let route = req.match_pattern();
        let metrics = Arc::clone(&self.metrics);
        let in_flight = InFlight::enter(&metrics.in_flight);

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            drop(in_flight);

            if let Some(route) = route {
                metrics.observe(&method, &route, res.status(), started.elapsed());
            }
            Ok(res)
        })
    }
}

pub(crate) async fn get(metrics: web::Data<Arc<RequestMetrics>>) -> ServerResult {
    let body = metrics.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}
