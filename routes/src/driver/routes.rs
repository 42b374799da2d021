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

//! Operations on the routes themselves.

use crate::db;
use crate::driver::RoutesDriver;
use crate::model::{Route, RouteId, RouteRequest};
use tours_core::driver::DriverResult;

impl RoutesDriver {
    /// Gets all routes sorted by their identifier.
    pub(crate) async fn list_routes(self) -> DriverResult<Vec<Route>> {
        let routes = db::get_routes(&mut self.db.ex().await?).await?;
        Ok(routes)
    }

    /// Gets the route identified by `id`, if it exists.
    pub(crate) async fn get_route(self, id: RouteId) -> DriverResult<Option<Route>> {
        let route = db::get_route(&mut self.db.ex().await?, id).await?;
        Ok(route)
    }

    /// Creates a new route from the client-provided `request` and returns its identifier.
    pub(crate) async fn create_route(self, request: RouteRequest) -> DriverResult<RouteId> {
        let data = request.into_data()?;
        let id = db::create_route(&mut self.db.ex().await?, &data).await?;
        Ok(id)
    }

    /// Replaces the route identified by `id` with the contents of the client-provided `request`.
    ///
    /// Returns false if the route does not exist.
    pub(crate) async fn update_route(
        self,
        id: RouteId,
        request: RouteRequest,
    ) -> DriverResult<bool> {
        let data = request.into_data()?;
        let updated = db::update_route(&mut self.db.ex().await?, id, &data).await?;
        Ok(updated)
    }

    /// Deletes the route identified by `id`.
    ///
    /// Returns false if the route does not exist.
    pub(crate) async fn delete_route(self, id: RouteId) -> DriverResult<bool> {
        let deleted = db::delete_route(&mut self.db.ex().await?, id).await?;
        Ok(deleted)
    }
}
