//! # JSON Endpoint Contract
//!
//! Transport-free handlers for the three calculation endpoints. A server (or
//! the CLI's `request` command) passes in the method, path and raw body and
//! gets back a status code and the response envelope.
//!
//! | Route | Body | Success data |
//! |---|---|---|
//! | `POST /calculations/concrete` | [`ConcreteInput`] | [`ConcreteResult`](crate::calculations::ConcreteResult) |
//! | `POST /calculations/steel` | [`SteelInput`] | [`SteelResult`](crate::calculations::SteelResult) |
//! | `POST /calculations/cost-estimation` | [`CostInput`] | [`CostResult`](crate::calculations::CostResult) |
//!
//! Every failure uses `{ "success": false, "message": "..." }`. The message is
//! meant for people, not for parsing.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::api::{handle, Route};
//! use takeoff_core::calculations::FormulaVariant;
//!
//! let route = Route::resolve("POST", "/calculations/steel").unwrap();
//! let response = handle(route, r#"{"concreteVolume": 100}"#, FormulaVariant::B);
//! assert_eq!(response.status, 200);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::calculations::{concrete, cost, steel, ConcreteInput, CostInput, FormulaVariant, SteelInput};
use crate::errors::CalcError;

/// HTTP-style status codes used by the handlers
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// A calculation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Concrete,
    Steel,
    CostEstimation,
}

impl Route {
    /// Every route, in documentation order.
    pub const ALL: [Route; 3] = [Route::Concrete, Route::Steel, Route::CostEstimation];

    /// Path the route is served under.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Concrete => "/calculations/concrete",
            Route::Steel => "/calculations/steel",
            Route::CostEstimation => "/calculations/cost-estimation",
        }
    }

    /// Match a method and path to a route.
    ///
    /// Trailing slashes are ignored. An unknown path is a 404 and a known
    /// path with a method other than POST is a 405.
    pub fn resolve(method: &str, path: &str) -> Result<Route, ApiResponse> {
        let trimmed = path.trim_end_matches('/');
        let route = Route::ALL
            .into_iter()
            .find(|r| r.path() == trimmed)
            .ok_or_else(|| ApiResponse::failure(status::NOT_FOUND, format!("No endpoint at {path}")))?;

        if !method.eq_ignore_ascii_case("POST") {
            return Err(ApiResponse::failure(
                status::METHOD_NOT_ALLOWED,
                format!("{} only accepts POST", route.path()),
            ));
        }
        Ok(route)
    }
}

/// Response body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success { success: bool, data: Value },
    Failure { success: bool, message: String },
}

/// Status code plus envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Envelope,
}

impl ApiResponse {
    pub fn success(data: Value) -> Self {
        ApiResponse {
            status: status::OK,
            body: Envelope::Success { success: true, data },
        }
    }

    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: Envelope::Failure {
                success: false,
                message: message.into(),
            },
        }
    }

    /// True for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn from_error(err: &CalcError) -> Self {
        if err.is_validation() {
            ApiResponse::failure(status::BAD_REQUEST, err.to_string())
        } else {
            ApiResponse::failure(
                status::INTERNAL_SERVER_ERROR,
                format!("The calculation could not be completed: {err}"),
            )
        }
    }
}

/// Handle one request body for `route`.
///
/// Each call is independent; nothing is shared between requests.
pub fn handle(route: Route, body: &str, variant: FormulaVariant) -> ApiResponse {
    debug!(path = route.path(), variant = variant.code(), "Handling calculation request");

    let outcome = match route {
        Route::Concrete => run(body, |input: ConcreteInput| concrete::estimate(&input, variant)),
        Route::Steel => run(body, |input: SteelInput| steel::estimate(&input, variant)),
        Route::CostEstimation => run(body, |input: CostInput| cost::estimate(&input, variant)),
    };

    match outcome {
        Ok(data) => ApiResponse::success(data),
        Err(RequestError::Body(reason)) => {
            warn!(path = route.path(), %reason, "Rejected malformed request body");
            ApiResponse::failure(status::BAD_REQUEST, format!("Invalid request body: {reason}"))
        }
        Err(RequestError::Calc(err)) if err.is_validation() => {
            warn!(path = route.path(), code = err.error_code(), "Rejected invalid input: {err}");
            ApiResponse::from_error(&err)
        }
        Err(RequestError::Calc(err)) => {
            error!(path = route.path(), code = err.error_code(), "Calculation failed: {err}");
            ApiResponse::from_error(&err)
        }
    }
}

/// Resolve and handle in one step.
pub fn dispatch(method: &str, path: &str, body: &str, variant: FormulaVariant) -> ApiResponse {
    match Route::resolve(method, path) {
        Ok(route) => handle(route, body, variant),
        Err(response) => {
            warn!(method, path, status = response.status, "Unroutable request");
            response
        }
    }
}

enum RequestError {
    Body(String),
    Calc(CalcError),
}

fn run<I, R, F>(body: &str, estimate: F) -> Result<Value, RequestError>
where
    I: for<'de> Deserialize<'de>,
    R: Serialize,
    F: FnOnce(I) -> Result<R, CalcError>,
{
    let input: I = serde_json::from_str(body).map_err(|e| RequestError::Body(e.to_string()))?;
    let result = estimate(input).map_err(RequestError::Calc)?;
    serde_json::to_value(result)
        .map_err(|e| RequestError::Calc(CalcError::internal(format!("could not encode result: {e}"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_json(response: &ApiResponse) -> Value {
        serde_json::to_value(&response.body).unwrap()
    }

    #[test]
    fn test_concrete_success_envelope() {
        let body = json!({
            "projectArea": 100, "floors": 2, "foundationDepth": 0.5,
            "wallThickness": 0.2, "slabThickness": 0.15
        })
        .to_string();
        let response = handle(Route::Concrete, &body, FormulaVariant::B);
        assert_eq!(response.status, 200);
        let v = body_json(&response);
        assert_eq!(v["success"], true);
        assert_eq!(v["data"]["totalVolume"], 142.16);
    }

    #[test]
    fn test_missing_field_is_400() {
        let response = handle(Route::Concrete, r#"{"projectArea": 100, "floors": 2}"#, FormulaVariant::B);
        assert_eq!(response.status, 400);
        let v = body_json(&response);
        assert_eq!(v["success"], false);
        assert!(v["message"].as_str().unwrap().contains("foundationDepth"));
    }

    #[test]
    fn test_zero_floors_is_400() {
        let response = handle(
            Route::Concrete,
            r#"{"projectArea": 100, "floors": 0, "foundationDepth": 0.5}"#,
            FormulaVariant::B,
        );
        assert_eq!(response.status, 400);
    }

    #[test]
    fn test_steel_endpoint() {
        let ok = handle(Route::Steel, r#"{"concreteVolume": 100, "steelRatio": 0.08}"#, FormulaVariant::B);
        assert_eq!(body_json(&ok)["data"]["totalWeight"], 62800.0);

        let missing = handle(Route::Steel, r#"{"steelRatio": 80}"#, FormulaVariant::B);
        assert_eq!(missing.status, 400);
    }

    #[test]
    fn test_cost_endpoint() {
        let body = r#"{"concreteVolume": 10, "steelWeight": 1000, "concretePricePerCubicMeter": 350, "steelPricePerKg": 3}"#;
        let response = handle(Route::CostEstimation, body, FormulaVariant::A);
        assert!(response.is_success());
        let v = body_json(&response);
        assert_eq!(v["data"]["concreteCost"], 3500.0);
        assert_eq!(v["data"]["totalCost"], 10075.0);

        let compounded = handle(Route::CostEstimation, body, FormulaVariant::B);
        let v = body_json(&compounded);
        assert_eq!(v["data"]["costBreakdown"]["overhead"], 910.0);
        assert_eq!(v["data"]["totalCost"], 10010.0);

        let missing = handle(Route::CostEstimation, r#"{"concreteVolume": 10}"#, FormulaVariant::A);
        assert_eq!(missing.status, 400);
    }

    #[test]
    fn test_malformed_body_is_400() {
        assert_eq!(handle(Route::Steel, "{not json", FormulaVariant::B).status, 400);
        assert_eq!(handle(Route::Concrete, r#"{"floors": "two"}"#, FormulaVariant::B).status, 400);
        assert_eq!(handle(Route::Concrete, r#"{"floors": -1}"#, FormulaVariant::B).status, 400);
    }

    #[test]
    fn test_overflow_is_500() {
        let body = json!({
            "projectArea": f64::MAX, "floors": 2, "foundationDepth": f64::MAX
        })
        .to_string();
        let response = handle(Route::Concrete, &body, FormulaVariant::B);
        assert_eq!(response.status, 500);
        assert_eq!(body_json(&response)["success"], false);
    }

    #[test]
    fn test_unencodable_result_is_internal_error() {
        use std::collections::HashMap;

        // JSON object keys must be strings
        let outcome = run(r#"{"concreteVolume": 1}"#, |_: SteelInput| {
            Ok(HashMap::from([((1u8, 2u8), 3u8)]))
        });
        let err = match outcome {
            Err(RequestError::Calc(err)) => err,
            _ => panic!("expected an encoding failure"),
        };
        assert_eq!(err.error_code(), "INTERNAL_ERROR");

        let response = ApiResponse::from_error(&err);
        assert_eq!(response.status, 500);
        assert!(body_json(&response)["message"].as_str().unwrap().contains("could not encode result"));
    }

    #[test]
    fn test_routing() {
        assert_eq!(Route::resolve("POST", "/calculations/concrete").unwrap(), Route::Concrete);
        assert_eq!(Route::resolve("post", "/calculations/cost-estimation/").unwrap(), Route::CostEstimation);
        assert_eq!(Route::resolve("GET", "/calculations/steel").unwrap_err().status, 405);
        assert_eq!(Route::resolve("POST", "/calculations/bricks").unwrap_err().status, 404);
    }

    #[test]
    fn test_dispatch() {
        let response = dispatch("POST", "/calculations/steel", r#"{"concreteVolume": 100}"#, FormulaVariant::B);
        assert_eq!(body_json(&response)["data"]["kgPerCubicMeter"], 80.0);
        assert_eq!(dispatch("DELETE", "/calculations/steel", "{}", FormulaVariant::B).status, 405);
    }

    #[test]
    fn test_identical_requests_identical_responses() {
        let body = r#"{"concreteVolume": 37.5, "steelRatio": 0.05}"#;
        assert_eq!(
            handle(Route::Steel, body, FormulaVariant::A),
            handle(Route::Steel, body, FormulaVariant::A)
        );
    }
}
