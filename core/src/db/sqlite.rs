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

//! Common utilities to interact with an SQLite database.

use crate::db::{Db, DbError, DbResult, Executor};
use async_trait::async_trait;
use log::warn;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool};

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::PoolTimedOut => DbError::Unavailable,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Creates a new connection pool against the database given in `conn_str`.
///
/// Passing `:memory:` yields a private in-memory database shared by all connections in the pool.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let pool = SqlitePool::connect(conn_str).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// operations can use concurrently.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Returns a connection of the specific type used by this database.
    pub async fn typed_ex(&self) -> DbResult<PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(map_sqlx_error)
    }
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.typed_ex().await?;
        Ok(Executor::Sqlite(conn))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
pub async fn run_schema(conn: &mut PoolConnection<Sqlite>, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(&mut **conn).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes the test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use crate::db::Db;
    use crate::db::tests::{generate_db_ro_tests, generate_db_rw_tests};
    use std::sync::Arc;

    generate_db_ro_tests!(Arc::new(setup().await));

    generate_db_rw_tests!(Arc::new(setup().await));

    #[tokio::test]
    async fn test_run_schema_multiple_statements() {
        let db = setup().await;
        let mut conn = db.typed_ex().await.unwrap();
        super::run_schema(
            &mut conn,
            "CREATE TABLE a (i INTEGER); CREATE TABLE b (j INTEGER); INSERT INTO b VALUES (1);",
        )
        .await
        .unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM b")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(1, count);
        drop(conn);
        db.close().await;
    }
}
