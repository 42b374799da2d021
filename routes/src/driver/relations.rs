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

//! Operations on the entities related to a route.

use crate::db;
use crate::driver::RoutesDriver;
use crate::model::{Departure, GuideAssignment, RouteDetails, RouteId};
use tours_core::driver::DriverResult;

impl RoutesDriver {
    /// Gets the route identified by `id` along with its guides and departures.
    ///
    /// Returns `None` if the route does not exist.  The three reads run on separate connections
    /// and thus do not observe a consistent snapshot of the database.
    pub(crate) async fn get_route_details(
        self,
        id: RouteId,
    ) -> DriverResult<Option<RouteDetails>> {
        let route = match db::get_route(&mut self.db.ex().await?, id).await? {
            Some(route) => route,
            None => return Ok(None),
        };

        let guides = async {
            let mut ex = self.db.ex().await?;
            db::get_route_guides(&mut ex, id).await
        };
        let departures = async {
            let mut ex = self.db.ex().await?;
            db::get_route_departures(&mut ex, id).await
        };
        let (guides, departures) = futures::try_join!(guides, departures)?;

        Ok(Some(RouteDetails::new(route, guides, departures)))
    }

    /// Gets the guides assigned to the route identified by `id`.
    pub(crate) async fn get_route_guides(self, id: RouteId) -> DriverResult<Vec<GuideAssignment>> {
        let guides = db::get_route_guides(&mut self.db.ex().await?, id).await?;
        Ok(guides)
    }

    /// Gets the departures of the route identified by `id`.
    pub(crate) async fn get_route_departures(self, id: RouteId) -> DriverResult<Vec<Departure>> {
        let departures = db::get_route_departures(&mut self.db.ex().await?, id).await?;
        Ok(departures)
    }
}
