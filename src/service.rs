//! The remote computation service.
//!
//! [`ComputeService`] is the seam the rest of the crate talks to;
//! [`HttpService`] is the JSON-over-HTTP implementation used in production.

use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::calc::{CalcRequest, CalcResult};
use crate::config::Config;
use crate::error::ServiceError;
use crate::materials::Topic;
use crate::plot::PlotRequest;
use crate::sample::SampleSet;

/// Operations offered by the computation service.
pub trait ComputeService {
    /// Samples the request's expression over its x-domain.
    fn sample(&self, request: &PlotRequest) -> Result<SampleSet, ServiceError>;

    /// Symbolic derivative or integral.
    fn calculate(&self, request: &CalcRequest) -> Result<CalcResult, ServiceError>;

    /// Reading material, grouped by topic.
    fn materials(&self) -> Result<Vec<Topic>, ServiceError>;
}

impl<T: ComputeService + ?Sized> ComputeService for &T {
    fn sample(&self, request: &PlotRequest) -> Result<SampleSet, ServiceError> {
        (**self).sample(request)
    }

    fn calculate(&self, request: &CalcRequest) -> Result<CalcResult, ServiceError> {
        (**self).calculate(request)
    }

    fn materials(&self) -> Result<Vec<Topic>, ServiceError> {
        (**self).materials()
    }
}

#[derive(Serialize)]
struct SampleBody<'a> {
    expression: &'a str,
    x_min: f64,
    x_max: f64,
    points: usize,
}

/// Body of a successful `/api/plot` answer.
///
/// `y` stays loosely typed: anything that is not a JSON number marks an
/// invalid sample instead of rejecting the whole payload.
#[derive(Debug, serde::Deserialize)]
pub struct SampleResponse {
    pub x: Vec<f64>,
    pub y: Vec<Value>,
}

impl SampleResponse {
    pub fn into_sample_set(self) -> Result<SampleSet, ServiceError> {
        if self.x.len() != self.y.len() {
            return Err(ServiceError::Malformed(format!(
                "x has {} values but y has {}",
                self.x.len(),
                self.y.len()
            )));
        }
        let ys: Vec<Option<f64>> = self.y.iter().map(Value::as_f64).collect();
        Ok(SampleSet::from_columns(&self.x, &ys))
    }
}

/// Pulls the human readable `detail` out of an error body.
///
/// A non-string detail (validation error lists, for instance) is passed on
/// as compact JSON. Returns `None` when the body carries no detail.
pub fn error_detail(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    match payload.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

/// Blocking JSON client for the computation service.
pub struct HttpService {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.backend_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post<B, R>(&self, path: &str, body: &B, what: &str) -> Result<R, ServiceError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let payload =
            serde_json::to_string(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        debug!("POST {url} {payload}");
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&payload);
        Self::read(result, what)
    }

    fn get<R: DeserializeOwned>(&self, path: &str, what: &str) -> Result<R, ServiceError> {
        let url = self.endpoint(path);
        debug!("GET {url}");
        Self::read(self.agent.get(&url).call(), what)
    }

    fn read<R: DeserializeOwned>(
        result: Result<ureq::Response, ureq::Error>,
        what: &str,
    ) -> Result<R, ServiceError> {
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                let message = error_detail(&body)
                    .unwrap_or_else(|| format!("{what} failed (HTTP {status})"));
                warn!("{what} rejected with HTTP {status}: {message}");
                return Err(ServiceError::Status { status, message });
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!("{what} could not reach the service: {transport}");
                return Err(ServiceError::Transport(format!("{what} failed: {transport}")));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}

impl ComputeService for HttpService {
    fn sample(&self, request: &PlotRequest) -> Result<SampleSet, ServiceError> {
        let body = SampleBody {
            expression: request.expression(),
            x_min: request.x_min(),
            x_max: request.x_max(),
            points: request.sample_count(),
        };
        let response: SampleResponse = self.post("api/plot", &body, "Plot")?;
        response.into_sample_set()
    }

    fn calculate(&self, request: &CalcRequest) -> Result<CalcResult, ServiceError> {
        self.post("api/calc", request, "Calculation")
    }

    fn materials(&self) -> Result<Vec<Topic>, ServiceError> {
        self.get("api/materials", "Fetching materials")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_string_is_returned_verbatim() {
        assert_eq!(
            error_detail(r#"{"detail":"parse error"}"#).as_deref(),
            Some("parse error")
        );
    }

    #[test]
    fn structured_detail_is_passed_as_json() {
        let body = json!({"detail": [{"loc": ["body", "points"], "msg": "too large"}]});
        let detail = error_detail(&body.to_string()).unwrap();
        assert!(detail.contains("too large"));
    }

    #[test]
    fn missing_or_unparsable_detail_is_none() {
        assert_eq!(error_detail(r#"{"error":"nope"}"#), None);
        assert_eq!(error_detail(r#"{"detail":null}"#), None);
        assert_eq!(error_detail("<html>502 Bad Gateway</html>"), None);
    }

    #[test]
    fn non_numeric_y_becomes_invalid() {
        let response: SampleResponse = serde_json::from_value(json!({
            "x": [0.0, 1.0, 2.0, 3.0],
            "y": [1.0, null, "nan", 4]
        }))
        .unwrap();
        let samples = response.into_sample_set().unwrap();

        let ys: Vec<Option<f64>> = samples.iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![Some(1.0), None, None, Some(4.0)]);
    }

    #[test]
    fn mismatched_columns_are_malformed() {
        let response = SampleResponse {
            x: vec![0.0, 1.0],
            y: vec![json!(1.0)],
        };
        assert!(matches!(
            response.into_sample_set(),
            Err(ServiceError::Malformed(_))
        ));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let service = HttpService::new("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(service.endpoint("api/plot"), "http://localhost:8000/api/plot");
    }
}
