// Tours
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic code for REST handlers.
//!
//! All services should implement an `app` function in this module that returns the `Router` for the
//! application.
//!
//! Every API should be put in its own `.rs` file, using a name like `<entity>_<method>.rs`.  This
//! may seem overkill, but putting every API in its own file makes it easy to ensure all the
//! integration tests for the given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API should define a `route` method that
//! returns the HTTP method and the API path under test.  All integration tests within the module
//! then rely on `route` to obtain this information, ensuring that they all test the desired API.
//!
//! It is also useful for the tests in this layer to define a `TestContext` in a `testutils` module
//! that allows interacting with the database layer directly, using simplified types.

use crate::driver::DriverError;
use crate::model::ModelError;
use async_trait::async_trait;
use axum::Json;
use axum::body::HttpBody;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::response::IntoResponse;
use log::error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RestError {
    /// Catch-all error type for all unexpected errors.
    #[error("{0}")]
    InternalError(String),

    /// Indicates an error in the contents of the request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Indicates that a request that should have empty content did not.
    #[error("Content should be empty")]
    PayloadNotEmpty,

    /// Indicates that the service cannot handle the request right now.
    #[error("Service temporarily unavailable")]
    Unavailable,
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::BackendError(_) => RestError::InternalError(e.to_string()),
            DriverError::InvalidInput(_) => RestError::InvalidRequest(e.to_string()),
            DriverError::Unavailable => RestError::Unavailable,
        }
    }
}

impl From<ModelError> for RestError {
    fn from(e: ModelError) -> Self {
        RestError::InvalidRequest(e.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            RestError::InternalError(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
            RestError::InvalidRequest(_) => http::StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => http::StatusCode::NOT_FOUND,
            RestError::PayloadNotEmpty => http::StatusCode::PAYLOAD_TOO_LARGE,
            RestError::Unavailable => http::StatusCode::SERVICE_UNAVAILABLE,
        };

        if status.is_server_error() {
            error!("Request failed with status {}: {}", status.as_u16(), self);
        }

        let response = ErrorResponse { error: self.to_string() };

        (status, Json(response)).into_response()
    }
}

/// Result type for this module.
pub type RestResult<T> = Result<T, RestError>;

/// Representation of the details of an error response.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Textual representation of the error message.
    pub error: String,
}

/// A request body extractor that forbids any content.
///
/// Any API that doesn't expect a body should use this to ensure we don't get garbage data that we
/// don't care about.  This future-proofs the service.
pub struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if req.into_body().is_end_stream() {
            Ok(EmptyBody {})
        } else {
            Err(RestError::PayloadNotEmpty)
        }
    }
}

/// A request body extractor for JSON payloads of type `T`.
///
/// This behaves like `axum::Json` but funnels all rejections through `RestError` so that clients
/// get the same error body for malformed payloads as for any other invalid request.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(e) => Err(RestError::InvalidRequest(e.body_text())),
        }
    }
}

/// Types that identify a resource and are parsed out of the request path.
pub trait PathResource: DeserializeOwned + Send {
    /// Message returned to clients when the path does not name a valid resource of this type.
    const NOT_FOUND: &'static str;
}

/// A path extractor for resource identifiers of type `T`.
///
/// A path component that cannot be parsed as `T` is reported as `RestError::NotFound` with the
/// resource's message.
pub struct ResourcePath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ResourcePath<T>
where
    T: PathResource,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ResourcePath(value)),
            Err(PathRejection::FailedToDeserializePathParams(_)) => {
                Err(RestError::NotFound(T::NOT_FOUND.to_owned()))
            }
            Err(e) => Err(RestError::InternalError(e.body_text())),
        }
    }
}

/// Common test code for the REST server.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use axum::Router;
    use axum::http::{self, HeaderName, HeaderValue};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    /// Maximum body size for testing purposes.
    const MAX_BODY_SIZE: usize = 64 * 1024;

    /// Builder for a single request to the API server.
    #[must_use]
    pub struct OneShotBuilder {
        /// The router for the app being tested.
        app: Router,

        /// Builder for the request that will be sent to the app.
        builder: axum::http::request::Builder,
    }

    impl OneShotBuilder {
        /// Creates a new request against a given `method`/`uri` pair served by an `app` router.
        pub fn new<U: AsRef<str>>(app: Router, (method, uri): (http::Method, U)) -> Self {
            let builder = Request::builder().method(method).uri(uri.as_ref());
            Self { app, builder }
        }

        /// Sets the header `name` to `value` in the outgoing request.
        pub fn with_header<K, V>(mut self, name: K, value: V) -> Self
        where
            HeaderName: TryFrom<K>,
            <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
            HeaderValue: TryFrom<V>,
            <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
        {
            self.builder = self.builder.header(name, value);
            self
        }

        /// Finishes building the request and sends it with an empty payload.
        pub async fn send_empty(self) -> ResponseChecker {
            let request = self.builder.body(axum::body::Body::empty()).unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a text payload.
        pub async fn send_text<T: Into<String>>(self, text: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
                .body(axum::body::Body::from(text.into()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a JSON payload.
        pub async fn send_json<T: Serialize>(self, request: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(axum::body::Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }
    }

    /// Type alias for the complex type returned by the `oneshot` function.
    type HttpResponse = axum::response::Response;

    /// Validator for the outcome of a request sent by a `OneShotBuilder`.
    #[must_use]
    pub struct ResponseChecker {
        /// Actual response that we received from the app.
        response: HttpResponse,

        /// Expected HTTP status code in the response above.
        exp_status: http::StatusCode,
    }

    impl From<HttpResponse> for ResponseChecker {
        fn from(response: HttpResponse) -> Self {
            Self { response, exp_status: http::StatusCode::OK }
        }
    }

    impl ResponseChecker {
        /// Sets the expected exit HTTP status to `status`.
        pub fn expect_status(mut self, status: http::StatusCode) -> Self {
            self.exp_status = status;
            self
        }

        /// Performs common validation operations on the response.
        pub fn verify(&self) {
            assert_eq!(self.exp_status, self.response.status());
        }

        /// Finishes checking the response and expects its body to be an `ErrorResponse` that
        /// matches `exp_re`.
        pub async fn expect_error(self, exp_re: &str) {
            self.verify();

            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            let response: ErrorResponse = match serde_json::from_slice(&body) {
                Ok(response) => response,
                Err(e) => {
                    let body = String::from_utf8(body.to_vec()).unwrap();
                    panic!("Invalid error response due to {}; content was {}", e, body);
                }
            };
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(
                re.is_match(&response.error),
                "Response content '{:?}' does not match re '{}'",
                response,
                exp_re
            );
        }

        /// Finishes checking the response and expects it to contain a valid JSON object of
        /// type `T`.
        pub async fn expect_json<T: DeserializeOwned>(self) -> T {
            self.verify();

            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            serde_json::from_slice::<T>(&body).unwrap()
        }

        /// Finishes checking the response and expects its body to be valid UTF-8 and to match
        /// `exp_re`.
        pub async fn expect_text(self, exp_re: &str) {
            self.verify();

            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            let body = String::from_utf8(body.to_vec()).unwrap();
            assert!(
                !body.contains("\"error\":"),
                "Use expect_error to validate errors wrapped in an ErrorResponse"
            );
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(re.is_match(&body), "Body content '{}' does not match re '{}'", body, exp_re);
        }
    }

    /// Generates a test to verify that an API that expects JSON fails when it gets something else.
    #[macro_export]
    macro_rules! test_payload_must_be_json {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_json() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_error("Content-Type")
                    .await;

                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .with_header(axum::http::header::CONTENT_TYPE, "application/json")
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_error("expected ident")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_json;

    /// Generates a test to verify that an API that does not expect a payload fails as necessary.
    #[macro_export]
    macro_rules! test_payload_must_be_empty {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_empty() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("should not be here")
                    .await
                    .expect_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE)
                    .expect_error("should be empty")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_empty;
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use axum::Router;
    use axum::http;
    use axum::routing::{get, post};

    /// Payload of the test JSON API.
    #[derive(Deserialize, Serialize)]
    struct Greeting {
        /// Who to greet.
        name: String,
    }

    async fn fail_handler(_: EmptyBody) -> RestResult<&'static str> {
        Err(RestError::from(DriverError::BackendError("Database error: boom".to_owned())))
    }

    async fn unavailable_handler(_: EmptyBody) -> RestResult<&'static str> {
        Err(RestError::from(DriverError::Unavailable))
    }

    async fn empty_handler(_: EmptyBody) -> &'static str {
        "nothing"
    }

    /// Identifier of a test resource.
    #[derive(Deserialize)]
    struct WidgetId(u16);

    impl PathResource for WidgetId {
        const NOT_FOUND: &'static str = "Widget not found";
    }

    async fn widget_handler(ResourcePath(id): ResourcePath<WidgetId>, _: EmptyBody) -> String {
        format!("widget {}", id.0)
    }

    async fn json_handler(JsonBody(greeting): JsonBody<Greeting>) -> RestResult<Json<Greeting>> {
        if greeting.name.is_empty() {
            return Err(ModelError("Name cannot be empty".to_owned()).into());
        }
        Ok(Json(Greeting { name: format!("Hello, {}", greeting.name) }))
    }

    fn app() -> Router {
        Router::new()
            .route("/fail", get(fail_handler))
            .route("/unavailable", get(unavailable_handler))
            .route("/empty", get(empty_handler))
            .route("/json", post(json_handler))
            .route("/widgets/:id", get(widget_handler))
    }

    #[tokio::test]
    async fn test_internal_error() {
        OneShotBuilder::new(app(), (http::Method::GET, "/fail"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("boom")
            .await;
    }

    #[tokio::test]
    async fn test_unavailable() {
        OneShotBuilder::new(app(), (http::Method::GET, "/unavailable"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::SERVICE_UNAVAILABLE)
            .expect_error("temporarily unavailable")
            .await;
    }

    #[tokio::test]
    async fn test_empty_body_ok() {
        OneShotBuilder::new(app(), (http::Method::GET, "/empty"))
            .send_empty()
            .await
            .expect_text("^nothing$")
            .await;
    }

    test_payload_must_be_empty!(app(), (http::Method::GET, "/empty"));

    #[tokio::test]
    async fn test_json_body_ok() {
        let response = OneShotBuilder::new(app(), (http::Method::POST, "/json"))
            .send_json(Greeting { name: "tours".to_owned() })
            .await
            .expect_json::<Greeting>()
            .await;
        assert_eq!("Hello, tours", response.name);
    }

    #[tokio::test]
    async fn test_json_body_missing_field() {
        OneShotBuilder::new(app(), (http::Method::POST, "/json"))
            .send_json(serde_json::json!({"other": 3}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("missing field `name`")
            .await;
    }

    #[tokio::test]
    async fn test_model_error_is_bad_request() {
        OneShotBuilder::new(app(), (http::Method::POST, "/json"))
            .send_json(Greeting { name: "".to_owned() })
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Name cannot be empty$")
            .await;
    }

    test_payload_must_be_json!(app(), (http::Method::POST, "/json"));

    #[tokio::test]
    async fn test_resource_path_ok() {
        OneShotBuilder::new(app(), (http::Method::GET, "/widgets/42"))
            .send_empty()
            .await
            .expect_text("^widget 42$")
            .await;
    }

    #[tokio::test]
    async fn test_resource_path_unparseable_is_not_found() {
        for path in ["/widgets/abc", "/widgets/-1", "/widgets/99999999"] {
            OneShotBuilder::new(app(), (http::Method::GET, path))
                .send_empty()
                .await
                .expect_status(http::StatusCode::NOT_FOUND)
                .expect_error("^Widget not found$")
                .await;
        }
    }

    #[test]
    fn test_from_driver_error() {
        assert_eq!(
            RestError::InvalidRequest("bad".to_owned()),
            RestError::from(DriverError::InvalidInput("bad".to_owned()))
        );
        assert_eq!(RestError::Unavailable, RestError::from(DriverError::Unavailable));
    }
}
