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
#![allow(unused)]

//! a service to query NASA's ISS ephemeris (OEM) data: list epochs, get state vectors, speed and
//! ground location for epochs, and find the epoch closest to the current time

use std::path::Path;
use serde::{Serialize,Deserialize};

pub mod errors;
use errors::{IssTrackerError,Result};

pub mod state_vector;
pub mod dataset;
pub mod epoch_store;
pub mod oem;
pub mod feed;
pub mod geolocation;
pub mod tracker;
pub mod server;

use feed::FeedConfig;
use geolocation::GeocoderConfig;
use server::ServerConfig;

pub const DEFAULT_USER_AGENT: &str = "iss_tracker";

/// the top level configuration, usually loaded from a RON file such as `configs/iss_tracker.ron`
#[derive(Serialize,Deserialize,Debug,Clone)]
#[serde(default)]
pub struct IssTrackerConfig {
    pub user_agent: String, // for all outgoing http requests
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub geocoder: GeocoderConfig,
}

impl Default for IssTrackerConfig {
    fn default()->Self {
        IssTrackerConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            server: ServerConfig::default(),
            feed: FeedConfig::default(),
            geocoder: GeocoderConfig::default(),
        }
    }
}

/// load a RON config file
pub fn load_config<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = std::fs::read_to_string( path.as_ref())?;
    Ok( ron::de::from_str( &data)? )
}

/// load the config from the given path, or use the default config if there is none
pub fn load_config_or_default<P: AsRef<Path>> (path: Option<P>) -> Result<IssTrackerConfig> {
    match path {
        Some(path) => load_config( path),
        None => Ok( IssTrackerConfig::default())
    }
}
