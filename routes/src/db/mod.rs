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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Every function in this module issues exactly one statement against the given executor.  Callers
//! are expected to pass a freshly-acquired executor to each call so that every statement runs on
//! its own auto-committed connection.

use crate::model::{Departure, GuideAssignment, Route, RouteData, RouteId};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::Date;
#[cfg(feature = "postgres")]
use tours_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use tours_core::db::sqlite;
use tours_core::db::{DbError, DbResult, Executor, at_most_one_row, exactly_one_row};


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Route {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let duration: i32 = row.try_get("duration").map_err(postgres::map_sqlx_error)?;
        let price_per_person: f64 =
            row.try_get("price_per_person").map_err(postgres::map_sqlx_error)?;
        let route_type_id: i64 = row.try_get("route_type_id").map_err(postgres::map_sqlx_error)?;
        let hotel_id: Option<i64> = row.try_get("hotel_id").map_err(postgres::map_sqlx_error)?;

        Ok(Route::new(
            RouteId::new(id),
            RouteData::new(name, description, duration, price_per_person, route_type_id, hotel_id),
        ))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for GuideAssignment {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(postgres::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(postgres::map_sqlx_error)?;
        let start_date: Date = row.try_get("start_date").map_err(postgres::map_sqlx_error)?;
        let end_date: Date = row.try_get("end_date").map_err(postgres::map_sqlx_error)?;

        Ok(GuideAssignment::new(id, first_name, last_name, start_date, end_date))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Departure {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let start_date: Date = row.try_get("start_date").map_err(postgres::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(postgres::map_sqlx_error)?;
        let price_per_person: f64 =
            row.try_get("price_per_person").map_err(postgres::map_sqlx_error)?;

        Ok(Departure::new(id, start_date, status, price_per_person))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Route {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let duration: i64 = row.try_get("duration").map_err(sqlite::map_sqlx_error)?;
        let price_per_person: f64 =
            row.try_get("price_per_person").map_err(sqlite::map_sqlx_error)?;
        let route_type_id: i64 = row.try_get("route_type_id").map_err(sqlite::map_sqlx_error)?;
        let hotel_id: Option<i64> = row.try_get("hotel_id").map_err(sqlite::map_sqlx_error)?;

        let duration = i32::try_from(duration).map_err(|e| {
            DbError::DataIntegrityError(format!("Invalid duration {}: {}", duration, e))
        })?;

        Ok(Route::new(
            RouteId::new(id),
            RouteData::new(name, description, duration, price_per_person, route_type_id, hotel_id),
        ))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for GuideAssignment {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(sqlite::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(sqlite::map_sqlx_error)?;
        let start_date: Date = row.try_get("start_date").map_err(sqlite::map_sqlx_error)?;
        let end_date: Date = row.try_get("end_date").map_err(sqlite::map_sqlx_error)?;

        Ok(GuideAssignment::new(id, first_name, last_name, start_date, end_date))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Departure {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let start_date: Date = row.try_get("start_date").map_err(sqlite::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(sqlite::map_sqlx_error)?;
        let price_per_person: f64 =
            row.try_get("price_per_person").map_err(sqlite::map_sqlx_error)?;

        Ok(Departure::new(id, start_date, status, price_per_person))
    }
}

/// Gets all routes sorted by their identifier.
pub async fn get_routes(ex: &mut Executor) -> DbResult<Vec<Route>> {
    let query_str = "
        SELECT id, name, description, duration, price_per_person, route_type_id, hotel_id
        FROM routes
        ORDER BY id
    ";
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let rows = sqlx::query(query_str)
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Route::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let rows =
                sqlx::query(query_str).fetch_all(&mut **ex).await.map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Route::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the route identified by `id`, or `None` if it does not exist.
pub async fn get_route(ex: &mut Executor, id: RouteId) -> DbResult<Option<Route>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, name, description, duration, price_per_person, route_type_id, hotel_id
                FROM routes
                WHERE id = $1
            ";
            let maybe_row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            maybe_row.map(Route::try_from).transpose()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, name, description, duration, price_per_person, route_type_id, hotel_id
                FROM routes
                WHERE id = ?
            ";
            let maybe_row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            maybe_row.map(Route::try_from).transpose()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Inserts a new route with the properties in `data` and returns its assigned identifier.
pub async fn create_route(ex: &mut Executor, data: &RouteData) -> DbResult<RouteId> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO routes
                    (name, description, duration, price_per_person, route_type_id, hotel_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(data.name())
                .bind(data.description())
                .bind(*data.duration())
                .bind(*data.price_per_person())
                .bind(*data.route_type_id())
                .bind(*data.hotel_id())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
            Ok(RouteId::new(id))
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO routes
                    (name, description, duration, price_per_person, route_type_id, hotel_id)
                VALUES (?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(data.name())
                .bind(data.description())
                .bind(*data.duration())
                .bind(*data.price_per_person())
                .bind(*data.route_type_id())
                .bind(*data.hotel_id())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            exactly_one_row(done.rows_affected())?;
            Ok(RouteId::new(done.last_insert_rowid()))
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces all properties of the route identified by `id` with `data`.
///
/// Returns false if the route does not exist.
pub async fn update_route(ex: &mut Executor, id: RouteId, data: &RouteData) -> DbResult<bool> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE routes
                SET name = $1, description = $2, duration = $3, price_per_person = $4,
                    route_type_id = $5, hotel_id = $6
                WHERE id = $7
            ";
            let done = sqlx::query(query_str)
                .bind(data.name())
                .bind(data.description())
                .bind(*data.duration())
                .bind(*data.price_per_person())
                .bind(*data.route_type_id())
                .bind(*data.hotel_id())
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE routes
                SET name = ?, description = ?, duration = ?, price_per_person = ?,
                    route_type_id = ?, hotel_id = ?
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(data.name())
                .bind(data.description())
                .bind(*data.duration())
                .bind(*data.price_per_person())
                .bind(*data.route_type_id())
                .bind(*data.hotel_id())
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    at_most_one_row(rows_affected)
}

/// Deletes the route identified by `id`.
///
/// Returns false if the route does not exist.
pub async fn delete_route(ex: &mut Executor, id: RouteId) -> DbResult<bool> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM routes WHERE id = $1")
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM routes WHERE id = ?")
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    at_most_one_row(rows_affected)
}

/// Gets the guides assigned to the route identified by `id`, sorted by their names.
///
/// Returns an empty list if the route has no guides or if it does not exist.
pub async fn get_route_guides(ex: &mut Executor, id: RouteId) -> DbResult<Vec<GuideAssignment>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT g.id, g.first_name, g.last_name, rg.start_date, rg.end_date
                FROM route_guides rg
                JOIN guides g ON g.id = rg.guide_id
                WHERE rg.route_id = $1
                ORDER BY g.last_name, g.first_name
            ";
            let rows = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(GuideAssignment::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT g.id, g.first_name, g.last_name, rg.start_date, rg.end_date
                FROM route_guides rg
                JOIN guides g ON g.id = rg.guide_id
                WHERE rg.route_id = ?
                ORDER BY g.last_name, g.first_name
            ";
            let rows = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_all(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(GuideAssignment::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the departures of the route identified by `id`, sorted by their start date.
///
/// Returns an empty list if the route has no departures or if it does not exist.
pub async fn get_route_departures(ex: &mut Executor, id: RouteId) -> DbResult<Vec<Departure>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, start_date, status, price_per_person
                FROM tour_departures
                WHERE route_id = $1
                ORDER BY start_date
            ";
            let rows = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_all(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Departure::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, start_date, status, price_per_person
                FROM tour_departures
                WHERE route_id = ?
                ORDER BY start_date
            ";
            let rows = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_all(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Departure::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Inserts a new guide named `first_name` `last_name` and returns its identifier.
#[cfg(test)]
pub(crate) async fn put_guide(
    ex: &mut Executor,
    first_name: &str,
    last_name: &str,
) -> DbResult<i64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO guides (first_name, last_name) VALUES ($1, $2) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(first_name)
                .bind(last_name)
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO guides (first_name, last_name) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(first_name)
                .bind(last_name)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.last_insert_rowid())
        }
    }
}

/// Assigns the guide `guide_id` to the route `route_id` between `start_date` and `end_date`.
#[cfg(test)]
pub(crate) async fn put_route_guide(
    ex: &mut Executor,
    route_id: RouteId,
    guide_id: i64,
    start_date: Date,
    end_date: Date,
) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO route_guides (route_id, guide_id, start_date, end_date)
                VALUES ($1, $2, $3, $4)
            ";
            sqlx::query(query_str)
                .bind(route_id.as_i64())
                .bind(guide_id)
                .bind(start_date)
                .bind(end_date)
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO route_guides (route_id, guide_id, start_date, end_date)
                VALUES (?, ?, ?, ?)
            ";
            sqlx::query(query_str)
                .bind(route_id.as_i64())
                .bind(guide_id)
                .bind(start_date)
                .bind(end_date)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
        }
    }
    Ok(())
}

/// Schedules a new departure of the route `route_id` and returns its identifier.
#[cfg(test)]
pub(crate) async fn put_departure(
    ex: &mut Executor,
    route_id: RouteId,
    start_date: Date,
    status: &str,
    price_per_person: f64,
) -> DbResult<i64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO tour_departures (route_id, start_date, status, price_per_person)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            ";
            let row = sqlx::query(query_str)
                .bind(route_id.as_i64())
                .bind(start_date)
                .bind(status)
                .bind(price_per_person)
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO tour_departures (route_id, start_date, status, price_per_person)
                VALUES (?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(route_id.as_i64())
                .bind(start_date)
                .bind(status)
                .bind(price_per_person)
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.last_insert_rowid())
        }
    }
}
