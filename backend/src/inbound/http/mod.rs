//! Local development HTTP host.
//!
//! Emulates the API Gateway proxy integration: every request, whatever its
//! path, becomes a [`GatewayEvent`] and goes through the same [`Pipeline`]
//! the Lambda runtime uses.
//!
//! ```text
//! curl -X POST localhost:3000/login -d '{"username":"alice","password":"pw1"}'
//! ```

use std::collections::HashMap;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::inbound::gateway::{GatewayEvent, GatewayResponse, Pipeline};

/// Build the proxy application around a shared pipeline.
///
/// # Examples
/// ```no_run
/// use actix_web::{HttpServer, web};
/// use contracts_manager::inbound::http::build_app;
/// # fn pipeline() -> contracts_manager::inbound::gateway::Pipeline { unimplemented!() }
///
/// # async fn run() -> std::io::Result<()> {
/// let data = web::Data::new(pipeline());
/// HttpServer::new(move || build_app(data.clone()))
///     .bind(("127.0.0.1", 3000))?
///     .run()
///     .await
/// # }
/// ```
pub fn build_app(
    pipeline: web::Data<Pipeline>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(pipeline)
        .default_service(web::to(proxy))
}

/// Forward one HTTP request through the pipeline.
pub async fn proxy(
    req: HttpRequest,
    body: web::Bytes,
    pipeline: web::Data<Pipeline>,
) -> HttpResponse {
    let event = event_from_request(&req, &body);
    into_http_response(pipeline.handle(&event).await)
}

/// Shape an HTTP request like an API Gateway v1 proxy event.
pub fn event_from_request(req: &HttpRequest, body: &[u8]) -> GatewayEvent {
    let mut event = GatewayEvent::new(req.method().as_str(), req.path())
        .with_request_id(Uuid::new_v4().to_string());

    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            event = event.with_header(name.as_str(), value);
        }
    }

    let query: HashMap<String, String> = url::form_urlencoded::parse(req.query_string().as_bytes())
        .into_owned()
        .collect();
    if !query.is_empty() {
        event.query_string_parameters = Some(query);
    }

    if !body.is_empty() {
        event = match std::str::from_utf8(body) {
            Ok(text) => event.with_body(text),
            Err(_) => event.with_base64_body(STANDARD.encode(body)),
        };
    }
    event
}

fn into_http_response(response: GatewayResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    for (name, value) in &response.headers {
        builder.insert_header((name.as_str(), value.as_str()));
    }
    builder.body(response.body)
}

#[cfg(test)]
mod tests {
    //! Proxy behaviour through the actix test harness.
    use super::*;
    use crate::test_support::TestHarness;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn query_and_headers_reach_the_event() {
        let req = test::TestRequest::get()
            .uri("/dev/getContract?id=abc&flag")
            .insert_header(("Authorization", "Bearer t"))
            .to_http_request();
        let event = event_from_request(&req, b"");

        assert_eq!(event.method(), Some("GET"));
        assert_eq!(event.request_path(), Some("/dev/getContract"));
        assert!(event.body.is_none());
        assert!(event.request_id().is_some());
        let query = event.query_string_parameters.as_ref().expect("query present");
        assert_eq!(query.get("id").map(String::as_str), Some("abc"));
        assert_eq!(query.get("flag").map(String::as_str), Some(""));
        let headers = event.headers.as_ref().expect("headers present");
        assert_eq!(
            headers.get("authorization").map(String::as_str),
            Some("Bearer t")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn binary_body_is_base64_encoded() {
        let req = test::TestRequest::post().uri("/login").to_http_request();
        let event = event_from_request(&req, &[0xff, 0xfe]);
        assert!(event.is_base64_encoded);
        assert_eq!(event.body.as_deref(), Some("//4="));
    }

    #[rstest]
    #[actix_web::test]
    async fn register_then_login_over_http() {
        let harness = TestHarness::new();
        let app = test::init_service(build_app(web::Data::new(harness.pipeline.clone()))).await;
        let credentials = json!({ "username": "alice", "password": "pw1" });

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(&credentials)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": true, "data": {} }));

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(&credentials)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));
        assert!(body["data"]["accessToken"].is_string());
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_path_is_404_json() {
        let harness = TestHarness::new();
        let app = test::init_service(build_app(web::Data::new(harness.pipeline.clone()))).await;

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], json!("NotFoundError"));
    }
}
