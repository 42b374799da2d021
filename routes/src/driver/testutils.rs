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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::RoutesDriver;
use crate::model::*;
use std::sync::Arc;
use time::Date;
use tours_core::db::{Db, Executor};

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct access from tests.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: RoutesDriver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(tours_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = RoutesDriver::new(db.clone());
        Self { db, driver }
    }

    /// Obtains a new executor to manipulate the database directly.
    pub(crate) async fn ex(&self) -> Executor {
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

    /// Gets a copy of the driver under test.
    pub(crate) fn driver(&self) -> RoutesDriver {
        self.driver.clone()
    }

    /// Inserts a route named `name` with default values for all other fields.
    pub(crate) async fn put_route(&self, name: &str) -> RouteId {
        let data = RouteData::new(name.to_owned(), "Some description".to_owned(), 2, 50.0, 1, None);
        db::create_route(&mut self.ex().await, &data).await.unwrap()
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
    pub(crate) async fn put_departure(&self, route_id: RouteId, start: Date, status: &str) -> i64 {
        db::put_departure(&mut self.ex().await, route_id, start, status, 75.0).await.unwrap()
    }

    /// Closes the database so that the driver stops being able to serve requests.
    pub(crate) async fn close(&self) {
        self.db.close().await;
    }
}
