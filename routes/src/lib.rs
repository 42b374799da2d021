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

//! REST service to manage tour routes along with their guides and departures.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::info;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tours_core::db::Db;
use tours_core::env::get_optional_var;

pub mod db;
pub mod driver;
use driver::RoutesDriver;
pub mod model;
mod rest;
use rest::app;

/// Default port to listen on when `TOURS_PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Gets the port to listen on from the `TOURS_PORT` environment variable.
pub fn port_from_env() -> Result<u16, String> {
    Ok(get_optional_var::<u16>("TOURS", "PORT")?.unwrap_or(DEFAULT_PORT))
}

/// Waits until the process receives a request to terminate.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install the Ctrl-C handler: {}", e);
    }
    info!("Shutting down");
}

/// Instantiates all resources to serve the application on `bind_addr` with data stored in `db`.
///
/// The server runs until the process is interrupted.  In-flight requests are allowed to complete
/// and then `db` is closed.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = RoutesDriver::new(db.clone());
    let app = app(driver);

    let bind_addr = bind_addr.into();
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    let result = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;

    db.close().await;
    result?;
    Ok(())
}
