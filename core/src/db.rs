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

//! Generic abstraction to access different database systems.
//!
//! The facilities in this module provide an abstraction over different database systems such as
//! PostgreSQL and SQLite.  The PostgreSQL backend is for production use and the SQLite backend is
//! primarily intended to support unit tests.
//!
//! Every database operation works on an `Executor`, which holds exactly one connection checked out
//! of the pool.  The connection goes back to the pool when the `Executor` is dropped, which
//! happens on every exit path of the operation that owns it, including early returns via `?`.
//! Statements issued through an `Executor` are committed individually: this module deliberately
//! offers no multi-statement transactions.

use async_trait::async_trait;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that the database is not available (maybe because of too many active concurrent
    /// connections).
    #[error("Unavailable")]
    Unavailable,
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Interprets the number of rows touched by a statement that targets a row by its primary key.
///
/// Returns true if the row was found and false if it was not.  Any other count indicates a broken
/// schema and is reported as an error.
pub fn at_most_one_row(rows_affected: u64) -> DbResult<bool> {
    match rows_affected {
        0 => Ok(false),
        1 => Ok(true),
        n => Err(DbError::BackendError(format!("Statement affected {} rows instead of one", n))),
    }
}

/// Checks that a statement that must touch a single row, such as an insertion, did so.
pub fn exactly_one_row(rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        1 => Ok(()),
        n => Err(DbError::BackendError(format!("Statement affected {} rows instead of one", n))),
    }
}

/// A database executor that can talk to multiple database implementations.
///
/// This type provides a generic mechanism to access a typed connection, which is needed by sqlx
/// to offer type safety guarantees during query compilation.  Users of this type are forced to
/// destructure it and issue different calls for each database.
#[derive(Debug)]
pub enum Executor {
    /// A PostgreSQL connection that can be used in `sqlx` operations.
    #[cfg(feature = "postgres")]
    Postgres(sqlx::pool::PoolConnection<sqlx::Postgres>),

    /// A SQLite connection that can be used in `sqlx` operations.
    #[cfg(feature = "sqlite")]
    Sqlite(sqlx::pool::PoolConnection<sqlx::Sqlite>),
}

/// Abstraction over the database connection pool.
#[async_trait]
pub trait Db {
    /// Checks a connection out of the pool and wraps it in an executor.
    ///
    /// The call waits for a free connection if the pool is exhausted, up to a backend-specific
    /// timeout.  The connection is returned to the pool once the executor is dropped.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<Executor>;

    /// Closes all connections in the pool and waits for checked out ones to be returned.
    async fn close(&self);
}

/// Macros to help instantiate tests for multiple database systems.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Instantiates the `module::name` test for the database configured by `setup`.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path $(, #[$extra:meta] )? ) => {
            #[tokio::test]
            $(#[$extra])?
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Instantiates a collection of tests for a specific database system.
    ///
    /// The database implementation to run the tests against is determined by the `setup`
    /// expression, which needs to return a database object.  The returned database should also
    /// have been initialized with the desired schema.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_tests [
        ( #[$extra:meta], $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module, #[$extra]);
            )+
        };

        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}
