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

//! the HTTP interface of the tracker

use std::{net::SocketAddr, sync::Arc};
use axum::{
    Json, Router,
    extract::{Path,Query,State},
    http::StatusCode,
    response::{IntoResponse,Response},
    routing::{get,post,delete},
};
use serde::{Serialize,Deserialize};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{info,error};

use crate::dataset::EpochRange;
use crate::tracker::IssTracker;
use crate::errors::{IssTrackerError, Result};

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct ServerConfig {
    pub sock_addr: SocketAddr,
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("http://{}", self.sock_addr)
    }
}

impl Default for ServerConfig {
    fn default()->Self {
        ServerConfig { sock_addr: SocketAddr::from( ([0,0,0,0], 5000)) }
    }
}

type SharedTracker = Arc<IssTracker>;

pub fn router (tracker: SharedTracker) -> Router {
    Router::new()
        .route("/", get(dataset_handler))
        .route("/epochs", get(epochs_handler))
        .route("/epochs/{epoch}", get(state_vector_handler))
        .route("/epochs/{epoch}/speed", get(speed_handler))
        .route("/epochs/{epoch}/location", get(location_handler))
        .route("/now", get(now_handler))
        .route("/comment", get(comment_handler))
        .route("/header", get(header_handler))
        .route("/metadata", get(metadata_handler))
        .route("/help", get(help_handler))
        .route("/delete-data", delete(delete_data_handler))
        .route("/post-data", post(post_data_handler))
        .layer( TraceLayer::new_for_http())
        .with_state(tracker)
}

pub async fn spawn_server_task (config: &ServerConfig, tracker: SharedTracker) -> Result<JoinHandle<()>> {
    let listener = tokio::net::TcpListener::bind( config.sock_addr).await?;
    let router = router(tracker);
    info!("serving ISS ephemeris on {}", config.url());

    Ok( tokio::spawn( async move {
        if let Err(e) = axum::serve( listener, router).await {
            error!("server terminated: {e}");
        }
    }))
}

//--- error responses

impl IntoResponse for IssTrackerError {
    fn into_response (self) -> Response {
        let status = match &self {
            IssTrackerError::EmptyStore => StatusCode::SERVICE_UNAVAILABLE,
            IssTrackerError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            IssTrackerError::NotFound(_) => StatusCode::NOT_FOUND,
            IssTrackerError::UpstreamFetchFailed(_) | IssTrackerError::OemError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, self.to_string()).into_response()
    }
}

//--- handlers

#[derive(Deserialize,Debug,Default)]
pub struct EpochsQuery {
    offset: Option<String>,
    limit: Option<String>,
}

async fn dataset_handler (State(tracker): State<SharedTracker>) -> Result<Response> {
    let data = tracker.dataset()?;
    Ok( Json( &*data).into_response() )
}

async fn epochs_handler (State(tracker): State<SharedTracker>, Query(q): Query<EpochsQuery>) -> Result<Response> {
    let range = EpochRange::parse( q.offset.as_deref(), q.limit.as_deref())?;
    Ok( Json( tracker.epochs(&range)?).into_response() )
}

async fn state_vector_handler (State(tracker): State<SharedTracker>, Path(epoch): Path<String>) -> Result<Response> {
    Ok( Json( tracker.state_vector(&epoch)?).into_response() )
}

async fn speed_handler (State(tracker): State<SharedTracker>, Path(epoch): Path<String>) -> Result<Response> {
    Ok( Json( tracker.speed(&epoch)?).into_response() )
}

async fn location_handler (State(tracker): State<SharedTracker>, Path(epoch): Path<String>) -> Result<Response> {
    Ok( Json( tracker.location(&epoch).await?).into_response() )
}

async fn now_handler (State(tracker): State<SharedTracker>) -> Result<Response> {
    Ok( Json( tracker.now().await?).into_response() )
}

async fn comment_handler (State(tracker): State<SharedTracker>) -> Result<Response> {
    Ok( Json( tracker.comments()?).into_response() )
}

async fn header_handler (State(tracker): State<SharedTracker>) -> Result<Response> {
    Ok( Json( tracker.header()?).into_response() )
}

async fn metadata_handler (State(tracker): State<SharedTracker>) -> Result<Response> {
    Ok( Json( tracker.metadata()?).into_response() )
}

async fn delete_data_handler (State(tracker): State<SharedTracker>) -> &'static str {
    tracker.clear().await;
    "ISS ephemeris data has been deleted.\n"
}

async fn post_data_handler (State(tracker): State<SharedTracker>) -> Result<String> {
    let n = tracker.reload().await?;
    Ok( format!("ISS ephemeris data has been reloaded ({n} state vectors).\n") )
}

async fn help_handler () -> &'static str {
    HELP_TEXT
}

pub const HELP_TEXT: &str = "\
Query the NASA ISS trajectory (OEM) data set with the following routes:
  GET    /                              entire data set
  GET    /epochs                        list of all epochs
  GET    /epochs?limit=int&offset=int   list of epochs in the given range
  GET    /epochs/<epoch>                state vector of the given epoch
  GET    /epochs/<epoch>/speed          instantaneous speed at the given epoch
  GET    /epochs/<epoch>/location       latitude, longitude, altitude and geoposition at the given epoch
  GET    /now                           location and speed of the epoch closest to now
  GET    /comment                       comments of the data set
  GET    /header                        header of the data set
  GET    /metadata                      metadata of the data set
  GET    /help                          this text
  DELETE /delete-data                   delete all data
  POST   /post-data                     reload data from the feed
";
