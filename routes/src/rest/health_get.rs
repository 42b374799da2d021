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

//! API to check that the service is up.

use crate::rest::StatusResponse;
use axum::Json;
use axum::response::IntoResponse;
use tours_core::rest::EmptyBody;

/// API handler.
pub(crate) async fn handler(_: EmptyBody) -> impl IntoResponse {
    Json(StatusResponse::new("ok"))
}

#[cfg(test)]
mod tests {
    use crate::rest::StatusResponse;
    use crate::rest::testutils::*;
    use axum::http;
    use tours_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/health".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<StatusResponse>()
            .await;
        assert_eq!(StatusResponse::new("ok"), response);
    }

    #[tokio::test]
    async fn test_does_not_touch_database() {
        let context = TestContext::setup().await;
        context.close().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<StatusResponse>()
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
