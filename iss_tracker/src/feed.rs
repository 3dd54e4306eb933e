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

use std::{path::PathBuf, time::Duration};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::info;
use iss_common::{datetime::{deserialize_duration,serialize_duration}, net};
use crate::dataset::Dataset;
use crate::oem::parse_oem;
use crate::errors::{IssTrackerError, Result};

pub const NASA_ISS_OEM_URL: &str = "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";

/// a trait to obtain a complete ephemeris `Dataset` from an external source.
/// Implementors have to either return a fully validated dataset or an error, never partial data
#[async_trait]
pub trait FeedLoader: Send + Sync {
    async fn load (&self) -> Result<Dataset>;

    /// where we get the data from (for logging and diagnostics)
    fn source (&self) -> String;
}

/// configuration data for the ephemeris feed
#[derive(Serialize,Deserialize,Debug,Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,

    /// if set we read the OEM document from this file instead of the url
    pub file: Option<PathBuf>,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default()->Self {
        FeedConfig {
            url: NASA_ISS_OEM_URL.to_string(),
            file: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl FeedConfig {
    /// create the configured `FeedLoader`
    pub fn create_loader (&self, user_agent: &str) -> Result<Box<dyn FeedLoader>> {
        if let Some(path) = &self.file {
            Ok( Box::new( FileFeedLoader::new( path.clone())))
        } else {
            Ok( Box::new( HttpFeedLoader::new( self, user_agent)?))
        }
    }
}

/// retrieves the OEM XML document from a http(s) URL
pub struct HttpFeedLoader {
    client: Client,
    url: String,
}

impl HttpFeedLoader {
    pub fn new (config: &FeedConfig, user_agent: &str) -> Result<Self> {
        let client = net::build_client( user_agent, config.timeout)?;
        Ok( HttpFeedLoader { client, url: config.url.clone() } )
    }
}

#[async_trait]
impl FeedLoader for HttpFeedLoader {
    async fn load (&self) -> Result<Dataset> {
        info!("retrieving ephemeris from {}", self.url);
        let text = net::get_text( &self.client, &self.url).await
            .map_err( |e| IssTrackerError::UpstreamFetchFailed( e.to_string()))?;
        parse_oem( &text)
    }

    fn source (&self) -> String { self.url.clone() }
}

/// reads the OEM XML document from a local file, e.g. for offline use
pub struct FileFeedLoader {
    path: PathBuf
}

impl FileFeedLoader {
    pub fn new (path: PathBuf)->Self { FileFeedLoader { path } }
}

#[async_trait]
impl FeedLoader for FileFeedLoader {
    async fn load (&self) -> Result<Dataset> {
        info!("reading ephemeris from {:?}", self.path);
        let text = tokio::fs::read_to_string( &self.path).await
            .map_err( |e| IssTrackerError::UpstreamFetchFailed( format!("{:?}: {e}", self.path)))?;
        parse_oem( &text)
    }

    fn source (&self) -> String { self.path.display().to_string() }
}
