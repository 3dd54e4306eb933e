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

use std::path::PathBuf;
use clap::Parser;
use anyhow::Result;

use iss_common::datetime::{utc_now,short_utc_datetime_string};
use iss_tracker::{load_config_or_default, dataset::EpochRange, feed::FileFeedLoader, geolocation::ground_point};
use iss_tracker::feed::FeedLoader;

/// retrieve and summarize the ISS ephemeris feed
#[derive(Parser,Debug)]
#[command(about)]
struct Args {
    /// pathname of RON config file
    #[arg(long,short)]
    config: Option<PathBuf>,

    /// read the OEM document from this file instead of the configured feed
    #[arg(long,short)]
    file: Option<PathBuf>,

    /// number of epochs to list
    #[arg(long,short, default_value_t=5)]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config_or_default( args.config.as_ref())?;

    let loader: Box<dyn FeedLoader> = match args.file {
        Some(path) => Box::new( FileFeedLoader::new(path)),
        None => config.feed.create_loader( &config.user_agent)?
    };
    let data = loader.load().await?;

    println!("-- source: {}", loader.source());
    println!("-- header:");
    for (k,v) in data.header() { println!("  {k}: {v}"); }
    println!("-- metadata:");
    for (k,v) in data.metadata() { println!("  {k}: {v}"); }
    println!("-- {} comments, {} state vectors", data.comments().len(), data.len());

    println!("-- first epochs:");
    for epoch in data.epochs( &EpochRange::new( 0, Some(args.limit))) {
        if let Some(sv) = data.find(epoch) {
            let gp = ground_point(sv);
            println!("  {epoch}: lat={:8.3}, lon={:8.3}, alt={:7.2}km, speed={:.3}km/s",
                     gp.latitude, gp.longitude, gp.altitude.value, sv.speed().value);
        }
    }

    let now = utc_now();
    let (sv, dt) = data.nearest_to( &now);
    println!("-- closest to {}: {} ({:.1} sec)", short_utc_datetime_string(&now), sv.epoch, dt);

    Ok(())
}
