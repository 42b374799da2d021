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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::RoutesDriver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use std::sync::Arc;
use time::Date;
use tours_core::db::{Db, Executor};

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct access from tests.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(tours_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = RoutesDriver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Gets a copy of the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Obtains a new executor to manipulate the database directly.
    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Drops `table` to simulate a failure in the queries that read from it.
    pub(crate) async fn drop_table(&self, table: &str) {
        match self.ex().await {
            Executor::Sqlite(mut conn) => {
                sqlx::query(&format!("DROP TABLE {}", table)).execute(&mut *conn).await.unwrap();
            }

            #[allow(unused)]
            _ => unreachable!(),
        }
    }

    /// Inserts a route with the given properties.
    pub(crate) async fn put_route(&self, data: &RouteData) -> RouteId {
        db::create_route(&mut self.ex().await, data).await.unwrap()
    }

    /// Inserts a route named `name` with default values for all other fields.
    pub(crate) async fn put_simple_route(&self, name: &str) -> RouteId {
        let data = RouteData::new(name.to_owned(), format!("About {}", name), 1, 10.0, 1, None);
        self.put_route(&data).await
    }

    /// Creates a guide and assigns it to `route_id` between `start` and `end`.
    pub(crate) async fn put_guide(
        &self,
        route_id: RouteId,
        first_name: &str,
        last_name: &str,
        start: Date,
        end: Date,
    ) -> i64 {
        let id = db::put_guide(&mut self.ex().await, first_name, last_name).await.unwrap();
        db::put_route_guide(&mut self.ex().await, route_id, id, start, end).await.unwrap();
        id
    }

    /// Schedules a departure of `route_id` on `start`.
    pub(crate) async fn put_departure(
        &self,
        route_id: RouteId,
        start: Date,
        status: &str,
        price_per_person: f64,
    ) -> i64 {
        db::put_departure(&mut self.ex().await, route_id, start, status, price_per_person)
            .await
            .unwrap()
    }

    /// Gets the route identified by `id` directly from the database.
    pub(crate) async fn get_route(&self, id: RouteId) -> Option<Route> {
        db::get_route(&mut self.ex().await, id).await.unwrap()
    }

    /// Gets all routes directly from the database.
    pub(crate) async fn get_routes(&self) -> Vec<Route> {
        db::get_routes(&mut self.ex().await).await.unwrap()
    }

    /// Closes the database so that the app fails to serve requests.
    pub(crate) async fn close(&self) {
        self.db.close().await;
    }
}
