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

//! API to create a new route.

use crate::driver::RoutesDriver;
use crate::model::{RouteId, RouteRequest};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use serde::{Deserialize, Serialize};
use tours_core::rest::{JsonBody, RestError};

/// Message returned by the server after creating a route.
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct CreatedResponse {
    /// Identifier assigned to the new route.
    pub(crate) id: RouteId,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<RoutesDriver>,
    JsonBody(request): JsonBody<RouteRequest>,
) -> Result<impl IntoResponse, RestError> {
    let id = driver.create_route(request).await?;
    Ok((http::StatusCode::CREATED, Json(CreatedResponse { id })))
}
