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

//! API to delete a route.

use crate::driver::RoutesDriver;
use crate::model::RouteId;
use crate::rest::{StatusResponse, route_not_found};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use tours_core::rest::{EmptyBody, ResourcePath, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<RoutesDriver>,
    ResourcePath(id): ResourcePath<RouteId>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    if driver.delete_route(id).await? {
        Ok(Json(StatusResponse::new("deleted")))
    } else {
        Err(route_not_found())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::StatusResponse;
    use crate::rest::testutils::*;
    use axum::http;
    use time::macros::date;
    use tours_core::rest::testutils::*;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::DELETE, format!("/routes/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("doomed").await;
        let kept = context.put_simple_route("kept").await;

        let response = OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_empty()
            .await
            .expect_json::<StatusResponse>()
            .await;
        assert_eq!(StatusResponse::new("deleted"), response);

        let routes = context.get_routes().await;
        assert_eq!(vec![kept], routes.iter().map(|r| *r.id()).collect::<Vec<RouteId>>());
    }

    #[tokio::test]
    async fn test_twice() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("doomed").await;

        OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_empty()
            .await
            .expect_json::<StatusResponse>()
            .await;

        OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Route not found$")
            .await;
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(999))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Route not found$")
            .await;
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("kept").await;

        OneShotBuilder::new(context.app(), (http::Method::DELETE, "/routes/first"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Route not found$")
            .await;

        assert!(context.get_route(id).await.is_some());
    }

    #[tokio::test]
    async fn test_referenced_by_departures() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("busy").await;
        context.put_departure(id, date!(2024 - 08 - 01), "open", 10.0).await;

        OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("FOREIGN KEY")
            .await;

        assert!(context.get_route(id).await.is_some());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
