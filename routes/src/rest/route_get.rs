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

//! API to get a single route.

use crate::driver::RoutesDriver;
use crate::model::RouteId;
use crate::rest::route_not_found;
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
    match driver.get_route(id).await? {
        Some(route) => Ok(Json(route)),
        None => Err(route_not_found()),
    }
}
