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

//! Entry point to the tour routes service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use std::net::Ipv4Addr;
use std::process;
use std::sync::Arc;
use tours_core::db::postgres::{PostgresDb, PostgresOptions};
use tours_routes::{port_from_env, serve};

/// Prefix of the environment variables that configure the database connection.
const DB_ENV_PREFIX: &str = "TOURS_DB";

/// Prints an error `message` and terminates the process.
fn die(message: String) -> ! {
    log::error!("{}", message);
    eprintln!("tours-routes: {}", message);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = port_from_env().unwrap_or_else(|e| die(e));
    let addr = (Ipv4Addr::UNSPECIFIED, port);

    let db_opts = PostgresOptions::from_env(DB_ENV_PREFIX).unwrap_or_else(|e| die(e));
    let db = PostgresDb::connect(db_opts).unwrap_or_else(|e| die(e.to_string()));

    if let Err(e) = serve(addr, Arc::new(db)).await {
        die(e.to_string());
    }
}
