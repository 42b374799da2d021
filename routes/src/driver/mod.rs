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

//! Business logic for the service.

use std::sync::Arc;
use tours_core::db::Db;

mod relations;
mod routes;
#[cfg(test)]
mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": each of them acquires the
/// connections it needs and releases them before returning, so it's incorrect for the caller to
/// rely on two separate calls observing the same state.  For this reason, these operations
/// consume the driver in an attempt to minimize the possibility of executing two operations.
#[derive(Clone)]
pub struct RoutesDriver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl RoutesDriver {
    /// Creates a new driver backed by the given injected components.
    pub fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}
