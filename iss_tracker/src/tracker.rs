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

use std::sync::Arc;
use chrono::{DateTime,Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info,error};
use iss_common::datetime::utc_now;
use crate::dataset::{Dataset,EpochRange,Record};
use crate::epoch_store::EpochStore;
use crate::feed::FeedLoader;
use crate::geolocation::{locate,Geocoder,Location};
use crate::state_vector::{StateVector,UnitValue};
use crate::errors::{IssTrackerError, Result};

/// the composite result for the epoch closest to a given time
#[derive(Debug,Clone,Serialize)]
pub struct CurrentStatus {
    pub closest_epoch: String,
    pub time_difference_sec: f64, // positive if the epoch is in the past
    pub location: Location,
    pub speed: UnitValue,
}

/// the query and update operations on the shared ephemeris store.
/// This is shared between concurrent request handlers (as `Arc<IssTracker>`). Queries work on `Arc<Dataset>`
/// snapshots, `reload` and `clear` are serialized through an async mutex that is held during the feed
/// retrieval, i.e. a clear requested during a reload is executed after the reload completes
pub struct IssTracker {
    store: EpochStore,
    loader: Box<dyn FeedLoader>,
    geocoder: Box<dyn Geocoder>,
    update_lock: Mutex<()>,
}

impl IssTracker {
    pub fn new (loader: Box<dyn FeedLoader>, geocoder: Box<dyn Geocoder>)->Self {
        IssTracker { store: EpochStore::new(), loader, geocoder, update_lock: Mutex::new(()) }
    }

    pub fn store (&self)->&EpochStore { &self.store }

    //--- updates

    /// replace the store contents with a fresh dataset from the feed. If this fails the store
    /// keeps its previous contents
    pub async fn reload (&self) -> Result<usize> {
        let _guard = self.update_lock.lock().await;

        match self.loader.load().await {
            Ok(dataset) => {
                let n = self.store.load( dataset);
                info!("loaded {} state vectors from {}", n, self.loader.source());
                Ok(n)
            }
            Err(e) => {
                error!("failed to load ephemeris from {}: {}", self.loader.source(), e);
                match e {
                    IssTrackerError::UpstreamFetchFailed(_) => Err(e),
                    other => Err( IssTrackerError::UpstreamFetchFailed( other.to_string()))
                }
            }
        }
    }

    pub async fn clear (&self) {
        let _guard = self.update_lock.lock().await;
        self.store.clear();
        info!("ephemeris data cleared");
    }

    //--- queries

    pub fn dataset (&self) -> Result<Arc<Dataset>> {
        self.store.snapshot()
    }

    pub fn epochs (&self, range: &EpochRange) -> Result<Vec<String>> {
        let data = self.store.snapshot()?;
        Ok( data.epochs(range).into_iter().map( |e| e.to_string()).collect() )
    }

    pub fn state_vector (&self, epoch: &str) -> Result<StateVector> {
        let data = self.store.snapshot()?;
        find( &data, epoch).cloned()
    }

    pub fn speed (&self, epoch: &str) -> Result<UnitValue> {
        let data = self.store.snapshot()?;
        find( &data, epoch).map( |sv| sv.speed())
    }

    /// note this does not hold any lock while waiting for the geocoder
    pub async fn location (&self, epoch: &str) -> Result<Location> {
        let sv = self.state_vector( epoch)?;
        Ok( locate( &sv, self.geocoder.as_ref()).await )
    }

    pub async fn now (&self) -> Result<CurrentStatus> {
        self.nearest_to( &utc_now()).await
    }

    pub async fn nearest_to (&self, t: &DateTime<Utc>) -> Result<CurrentStatus> {
        let (sv, dt) = {
            let data = self.store.snapshot()?;
            let (sv, dt) = data.nearest_to(t);
            (sv.clone(), dt)
        };

        let location = locate( &sv, self.geocoder.as_ref()).await;
        let speed = sv.speed();

        Ok( CurrentStatus { closest_epoch: sv.epoch, time_difference_sec: dt, location, speed } )
    }

    pub fn header (&self) -> Result<Record> {
        Ok( self.store.snapshot()?.header().clone() )
    }

    pub fn metadata (&self) -> Result<Record> {
        Ok( self.store.snapshot()?.metadata().clone() )
    }

    pub fn comments (&self) -> Result<Vec<String>> {
        Ok( self.store.snapshot()?.comments().to_vec() )
    }
}

fn find<'a> (data: &'a Dataset, epoch: &str) -> Result<&'a StateVector> {
    data.find(epoch).ok_or_else( || IssTrackerError::NotFound( epoch.to_string()))
}
