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

//! API to replace an existing route.

use crate::driver::RoutesDriver;
use crate::model::{RouteId, RouteRequest};
use crate::rest::{StatusResponse, route_not_found};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use tours_core::rest::{JsonBody, ResourcePath, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<RoutesDriver>,
    ResourcePath(id): ResourcePath<RouteId>,
    JsonBody(request): JsonBody<RouteRequest>,
) -> Result<impl IntoResponse, RestError> {
    if driver.update_route(id, request).await? {
        Ok(Json(StatusResponse::new("updated")))
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
    use serde_json::json;
    use tours_core::rest::testutils::*;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::PUT, format!("/routes/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("before").await;
        let other = context.put_simple_route("untouched").await;

        let response = OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_json(json!({
                "name": "after",
                "description": "new description",
                "duration": 6,
                "price_per_person": 300.25,
                "route_type_id": 2,
                "hotel_id": 5,
            }))
            .await
            .expect_json::<StatusResponse>()
            .await;
        assert_eq!(StatusResponse::new("updated"), response);

        let exp_data =
            RouteData::new("after".to_owned(), "new description".to_owned(), 6, 300.25, 2, Some(5));
        assert_eq!(Some(Route::new(id, exp_data)), context.get_route(id).await);
        assert_eq!("untouched", context.get_route(other).await.unwrap().data().name());
    }

    #[tokio::test]
    async fn test_replaces_hotel_with_null() {
        let context = TestContext::setup().await;

        let data = RouteData::new("n".to_owned(), "d".to_owned(), 1, 1.0, 1, Some(9));
        let id = context.put_route(&data).await;

        OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_json(json!({
                "name": "n",
                "description": "d",
                "duration": 1,
                "price_per_person": 1.0,
                "route_type_id": 1,
            }))
            .await
            .expect_json::<StatusResponse>()
            .await;

        assert_eq!(&None, context.get_route(id).await.unwrap().data().hotel_id());
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(999))
            .send_json(json!({
                "name": "n",
                "description": "d",
                "duration": 1,
                "price_per_person": 1,
                "route_type_id": 1,
            }))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Route not found$")
            .await;

        assert!(context.get_routes().await.is_empty());
    }

    #[tokio::test]
    async fn test_not_coercible() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("kept").await;

        OneShotBuilder::new(context.app(), route(id.as_i64()))
            .send_json(json!({
                "name": "n",
                "description": "d",
                "duration": "forever",
                "price_per_person": 1,
                "route_type_id": 1,
            }))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Invalid duration")
            .await;

        assert_eq!("kept", context.get_route(id).await.unwrap().data().name());
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route(1));
}
