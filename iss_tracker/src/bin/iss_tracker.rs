/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use anyhow::Result;

use iss_tracker::{load_config_or_default, geolocation::NominatimGeocoder, server::spawn_server_task, tracker::IssTracker};

/// serve NASA ISS ephemeris data via http
#[derive(Parser,Debug)]
#[command(version, about)]
struct Args {
    /// pathname of RON config file (uses built-in defaults if not set)
    #[arg(long,short)]
    config: Option<PathBuf>,

    /// socket address to serve on (overrides config)
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let args = Args::parse();
    let mut config = load_config_or_default( args.config.as_ref())?;
    if let Some(addr) = args.addr {
        config.server.sock_addr = addr;
    }

    let loader = config.feed.create_loader( &config.user_agent)?;
    let geocoder = NominatimGeocoder::new( &config.geocoder, &config.user_agent)?;
    let tracker = Arc::new( IssTracker::new( loader, Box::new(geocoder)));

    // we still serve if the initial load fails - data can be reloaded via POST /post-data
    if let Err(e) = tracker.reload().await {
        warn!("no ephemeris data available: {e}");
    }

    let server_task = spawn_server_task( &config.server, tracker).await?;
    Ok( server_task.await? )
}
