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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IssTrackerError>;

#[derive(Error,Debug)]
pub enum IssTrackerError {

    #[error("no ephemeris data loaded")]
    EmptyStore,

    #[error("invalid parameter {0}")]
    InvalidParameter(String),

    #[error("epoch not found {0}")]
    NotFound(String),

    #[error("upstream fetch failed {0}")]
    UpstreamFetchFailed(String),

    #[error("OEM error {0}")]
    OemError(String),

    #[error("geocode error {0}")]
    GeocodeError(String),

    #[error("XML error {0}")]
    XmlError( #[from] quick_xml::Error),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("net error {0}")]
    NetError( #[from] iss_common::net::IssNetError),

    #[error("config error {0}")]
    ConfigError( #[from] ron::error::SpannedError),
}

macro_rules! oem_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        IssTrackerError::OemError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use oem_error;

macro_rules! invalid_parameter {
    ($fmt:literal $(, $arg:expr )* ) => {
        IssTrackerError::InvalidParameter( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_parameter;
