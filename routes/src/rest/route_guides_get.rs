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

//! API to get the guides assigned to a route.

use crate::driver::RoutesDriver;
use crate::model::RouteId;
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
    let guides = driver.get_route_guides(id).await?;
    Ok(Json(guides))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use time::macros::date;
    use tours_core::rest::testutils::*;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/routes/{}/guides", id))
    }

    #[tokio::test]
    async fn test_sorted_by_name() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("r").await;
        let other = context.put_simple_route("o").await;
        let young = context
            .put_guide(id, "Zoe", "Young", date!(2024 - 01 - 01), date!(2024 - 01 - 10))
            .await;
        let adams = context
            .put_guide(id, "Carl", "Adams", date!(2024 - 02 - 01), date!(2024 - 02 - 10))
            .await;
        context
            .put_guide(other, "Ignored", "Guide", date!(2024 - 03 - 01), date!(2024 - 03 - 10))
            .await;

        let response = OneShotBuilder::new(context.into_app(), route(id.as_i64()))
            .send_empty()
            .await
            .expect_json::<Vec<GuideAssignment>>()
            .await;
        assert_eq!(
            vec![
                GuideAssignment::new(
                    adams,
                    "Carl".to_owned(),
                    "Adams".to_owned(),
                    date!(2024 - 02 - 01),
                    date!(2024 - 02 - 10)
                ),
                GuideAssignment::new(
                    young,
                    "Zoe".to_owned(),
                    "Young".to_owned(),
                    date!(2024 - 01 - 01),
                    date!(2024 - 01 - 10)
                ),
            ],
            response
        );
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let id = context.put_simple_route("r").await;

        let response = OneShotBuilder::new(context.into_app(), route(id.as_i64()))
            .send_empty()
            .await
            .expect_json::<Vec<GuideAssignment>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_missing_route_is_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route(999))
            .send_empty()
            .await
            .expect_json::<Vec<GuideAssignment>>()
            .await;
        assert!(response.is_empty());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
