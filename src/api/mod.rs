use axum::{
    Router,
    extract::{
        Json, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::registry::{CALCULATORS, CalculatorInfo};
use crate::error::FincalcError;

mod payload;

pub use payload::{
    ApiCompounding, ApiNpsMode, ApiSipMode, ApiTargetType, CalculatorPayload, EmiPayload,
    EpfPayload, FdPayload, LumpsumPayload, MfPayload, NpsPayload, NpsResponse, PpfPayload,
    RdPayload, SipPayload, SipResponse, SsyPayload, SwpPayload, evaluate_json,
};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct CatalogResponse {
    calculators: &'static [CalculatorInfo],
}

impl FincalcError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FincalcError::InvalidInput { .. } | FincalcError::Payload(_) => {
                StatusCode::BAD_REQUEST
            }
            FincalcError::UnknownCalculator(_) => StatusCode::NOT_FOUND,
        }
    }
}

fn with_calculator<P: CalculatorPayload>(router: Router) -> Router {
    router.route(
        &format!("/api/{}", P::SLUG),
        get(calculate_get_handler::<P>).post(calculate_post_handler::<P>),
    )
}

pub fn router() -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/calculators", get(catalog_handler))
        .route("/api/:slug", get(unknown_calculator_handler).post(unknown_calculator_handler));
    let router = with_calculator::<EmiPayload>(router);
    let router = with_calculator::<FdPayload>(router);
    let router = with_calculator::<RdPayload>(router);
    let router = with_calculator::<SsyPayload>(router);
    let router = with_calculator::<PpfPayload>(router);
    let router = with_calculator::<EpfPayload>(router);
    let router = with_calculator::<SipPayload>(router);
    let router = with_calculator::<LumpsumPayload>(router);
    let router = with_calculator::<MfPayload>(router);
    let router = with_calculator::<SwpPayload>(router);
    with_calculator::<NpsPayload>(router).fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!(
        "fincalc HTTP API listening on http://{addr} ({} calculators)",
        CALCULATORS.len()
    );
    log::info!("Local access: http://127.0.0.1:{}/api/calculators", addr.port());

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn catalog_handler() -> Response {
    json_response(
        StatusCode::OK,
        CatalogResponse {
            calculators: CALCULATORS,
        },
    )
}

async fn unknown_calculator_handler(Path(slug): Path<String>) -> Response {
    fincalc_error_response(&FincalcError::UnknownCalculator(slug))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_get_handler<P: CalculatorPayload>(
    payload: std::result::Result<Query<P>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => calculate_handler_impl(payload),
        Err(rejection) => payload_rejected::<P>(&rejection.body_text()),
    }
}

async fn calculate_post_handler<P: CalculatorPayload>(
    payload: std::result::Result<Json<P>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => calculate_handler_impl(payload),
        Err(rejection) => payload_rejected::<P>(&rejection.body_text()),
    }
}

fn payload_rejected<P: CalculatorPayload>(msg: &str) -> Response {
    log::warn!("rejected {} payload: {msg}", P::SLUG);
    error_response(StatusCode::BAD_REQUEST, &format!("invalid payload: {msg}"))
}

fn calculate_handler_impl<P: CalculatorPayload>(payload: P) -> Response {
    log::debug!("evaluating {} with {payload:?}", P::SLUG);
    match payload.evaluate() {
        Ok(output) => json_response(StatusCode::OK, output),
        Err(err) => {
            log::warn!("rejected {} request: {err}", P::SLUG);
            fincalc_error_response(&err)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn fincalc_error_response(err: &FincalcError) -> Response {
    error_response(err.status_code(), &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Option<HeaderValue>, serde_json::Value) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let cache = response.headers().get(header::CACHE_CONTROL).cloned();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json = serde_json::from_slice(&bytes).expect("response should be json");
        (status, cache, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, cache, json) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, Some(HeaderValue::from_static("no-store")));
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn catalog_lists_every_calculator() {
        let (status, _, json) = send(get("/api/calculators")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = json["calculators"].as_array().expect("array");
        assert_eq!(listed.len(), CALCULATORS.len());
        assert!(listed.iter().any(|c| c["slug"] == "nps"));
    }

    #[tokio::test]
    async fn get_query_parameters_override_defaults() {
        let (status, _, json) = send(get("/api/fd?principal=200000&rate=7&years=5&compounding=quarterly")).await;
        assert_eq!(status, StatusCode::OK);
        let maturity = json["maturityValue"].as_f64().expect("number");
        assert!((maturity - 282_955.64).abs() < 0.01, "got {maturity}");
        assert_eq!(json["series"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn post_json_evaluates_emi() {
        let (status, cache, json) = send(post_json(
            "/api/emi",
            r#"{"principal": 2000000, "rate": 9, "years": 20}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, Some(HeaderValue::from_static("no-store")));
        let emi = json["summary"]["emi"].as_f64().expect("number");
        assert!((emi - 17_545.26).abs() < 0.01, "got {emi}");
        assert_eq!(json["summary"]["months"], 240);
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request() {
        let (status, _, json) = send(post_json("/api/rd", r#"{"rate": 40}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["error"].as_str().expect("string");
        assert!(message.contains("rate"), "got {message}");
    }

    #[tokio::test]
    async fn malformed_payloads_get_json_bad_request() {
        for request in [
            post_json("/api/emi", r#"{"principal": "x"}"#),
            post_json("/api/emi", "{bad"),
            get("/api/emi?rate=abc"),
        ] {
            let (status, cache, json) = send(request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(cache, Some(HeaderValue::from_static("no-store")));
            let message = json["error"].as_str().expect("string");
            assert!(message.starts_with("invalid payload"), "got {message}");
        }
    }

    #[tokio::test]
    async fn unknown_calculator_is_not_found() {
        let (status, _, json) = send(get("/api/crypto")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].as_str().unwrap_or_default().contains("crypto"));

        let (status, _, json) = send(get("/nowhere")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Not found");
    }

    #[test]
    fn error_kinds_map_to_status_codes() {
        assert_eq!(
            FincalcError::invalid("years", "must be positive").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FincalcError::UnknownCalculator("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
