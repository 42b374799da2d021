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

//! Entry point to the REST server.

use crate::driver::RoutesDriver;
use crate::model::RouteId;
use axum::Router;
use serde::{Deserialize, Serialize};
use tours_core::rest::{PathResource, RestError};

mod health_get;
mod route_delete;
mod route_departures_get;
mod route_details_get;
mod route_get;
mod route_guides_get;
mod route_put;
mod routes_get;
mod routes_post;
#[cfg(test)]
mod testutils;

/// Response body for operations that only report their outcome.
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct StatusResponse {
    /// Short word describing the outcome of the operation.
    pub(crate) status: String,
}

impl StatusResponse {
    /// Creates a new response with the given `status` word.
    pub(crate) fn new(status: &str) -> Self {
        Self { status: status.to_owned() }
    }
}

/// Constructs the error returned by every API that targets a route that does not exist.
pub(crate) fn route_not_found() -> RestError {
    RestError::NotFound(RouteId::NOT_FOUND.to_owned())
}

/// Creates the router for the application.
pub(crate) fn app(driver: RoutesDriver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/health", get(health_get::handler))
        .route("/routes", get(routes_get::handler).post(routes_post::handler))
        .route("/routes/", get(routes_get::handler).post(routes_post::handler))
        .route(
            "/routes/:id",
            get(route_get::handler).put(route_put::handler).delete(route_delete::handler),
        )
        .route("/routes/:id/details", get(route_details_get::handler))
        .route("/routes/:id/guides", get(route_guides_get::handler))
        .route("/routes/:id/departures", get(route_departures_get::handler))
        .with_state(driver)
}
