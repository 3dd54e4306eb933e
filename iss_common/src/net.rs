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

//! common utility functions for network operations

use std::time::Duration;
use reqwest::{Client, StatusCode, Response};
use serde::{de::DeserializeOwned,Serialize};

use crate::define_error;

define_error!{ pub IssNetError =
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, IssNetError>;

/// create a reqwest client with an overall request timeout. Note that some public services
/// (such as Nominatim) reject requests without an identifying user agent
pub fn build_client (user_agent: &str, timeout: Duration) -> Result<Client> {
    Ok( Client::builder()
        .user_agent( user_agent)
        .timeout( timeout)
        .build()?
    )
}

/// fetch the response body of a GET request as text
pub async fn get_text (client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    match response.status() {
        StatusCode::OK => {
            Ok( response.text().await? )
        }
        StatusCode::NOT_FOUND => {
            Err( IssNetError::NotFoundError(format!("{url}")))
        }
        other => {
            Err( IssNetError::OpFailed(format!("response status {other:?}")))
        }
    }
}

/// GET request with query parameters that returns a JSON response
pub async fn get_json_query<Q,U> (client: &Client, url: &str, query: &Q) -> Result<U> where Q: Serialize + ?Sized, U: DeserializeOwned {
    let response = client.get(url).query(query).send().await?;

    match response.status() {
        StatusCode::OK => {
            from_json(response).await
        }
        StatusCode::NOT_FOUND => {
            Err( IssNetError::NotFoundError(format!("{url}")))
        }
        other => {
            Err( IssNetError::OpFailed(format!("response status {other:?}")))
        }
    }
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| IssNetError::ParseError(e.to_string()))
}
