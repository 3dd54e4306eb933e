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

//! ground position of state vectors and reverse geocoding of these positions

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize,Deserialize};
use serde_json::{Map,Value};
use tracing::{debug,warn};
use iss_common::{
    atan2, deg, normalize_longitude_deg,
    datetime::{deserialize_duration,hour_minute,serialize_duration},
    geo_constants::{DEG_PER_HOUR,MEAN_EARTH_RADIUS_KM},
    net
};
use crate::state_vector::{StateVector,UnitValue};
use crate::errors::{IssTrackerError, Result};

/// empirical longitude offset of the feed's inertial frame at the time of observation.
/// This is a fixed calibration constant, not derived from the epoch (hence it does not
/// account for precession or the sidereal/solar day difference)
pub const LONGITUDE_CALIBRATION_DEG: f64 = 32.0;

/// what we report if the geocoder does not have an address for a position
pub const NO_ADDRESS_MSG: &str = "geolocation data is not available, the ISS is probably over the ocean";

/// structured address as returned by the geocoding provider
pub type Address = Map<String,Value>;

/// latitude/longitude in degrees and altitude above the mean earth radius
#[derive(Debug,Clone,Copy,Serialize,PartialEq)]
pub struct GroundPoint {
    pub latitude: f64,
    pub longitude: f64, // normalized to [-180,180]
    pub altitude: UnitValue,
}

/// compute the ground point of a state vector. We approximate the earth rotation by the time of day of
/// the epoch, which only uses hour and minute
pub fn ground_point (sv: &StateVector) -> GroundPoint {
    let p = &sv.position;
    let (hour, minute) = hour_minute( &sv.date);

    let latitude = deg( atan2( p.z, p.xy_length()));

    let day_angle = ((hour as f64 - 12.0) + (minute as f64 / 60.0)) * DEG_PER_HOUR;
    let longitude = normalize_longitude_deg( deg( atan2( p.y, p.x)) - day_angle + LONGITUDE_CALIBRATION_DEG);

    let altitude = UnitValue::km( p.length() - MEAN_EARTH_RADIUS_KM);

    GroundPoint { latitude, longitude, altitude }
}

/// the result of reverse geocoding a ground point. Neither a missing address nor a provider failure
/// invalidates the rest of the location
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="snake_case")]
pub enum Geoposition {
    Address(Address),
    Unavailable(String),
    ProviderError(String),
}

#[derive(Debug,Clone,Serialize)]
pub struct Location {
    #[serde(flatten)]
    pub point: GroundPoint,
    pub geoposition: Geoposition,
}

/// compute the ground point of `sv` and try to reverse geocode it
pub async fn locate (sv: &StateVector, geocoder: &dyn Geocoder) -> Location {
    let point = ground_point(sv);

    let geoposition = match geocoder.reverse( point.latitude, point.longitude).await {
        Ok(Some(address)) => Geoposition::Address(address),
        Ok(None) => {
            debug!("no address for {}: {},{}", sv.epoch, point.latitude, point.longitude);
            Geoposition::Unavailable( NO_ADDRESS_MSG.to_string())
        }
        Err(e) => {
            warn!("reverse geocoding failed for {}: {}", sv.epoch, e);
            Geoposition::ProviderError( e.to_string())
        }
    };

    Location { point, geoposition }
}

/* #region geocoder ****************************************************************************/

/// a trait for reverse geocoding providers. `Ok(None)` means the provider has no address for the
/// given point, errors are reserved for provider failures (network, rate limits etc.)
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse (&self, latitude: f64, longitude: f64) -> Result<Option<Address>>;
}

/// configuration data for the reverse geocoder
#[derive(Serialize,Deserialize,Debug,Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub url: String, // base URL of the Nominatim server
    pub zoom: u8,    // address detail level (3: country .. 18: building)
    pub language: String,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default()->Self {
        GeocoderConfig {
            url: "https://nominatim.openstreetmap.org".to_string(),
            zoom: 10,
            language: "en".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// reverse geocoder using the [Nominatim](https://nominatim.org/release-docs/latest/api/Reverse/) API
pub struct NominatimGeocoder {
    client: Client,
    url: String,
    zoom: u8,
    language: String,
}

impl NominatimGeocoder {
    pub fn new (config: &GeocoderConfig, user_agent: &str) -> Result<Self> {
        let client = net::build_client( user_agent, config.timeout)?;
        let url = format!("{}/reverse", config.url.trim_end_matches('/'));
        Ok( NominatimGeocoder { client, url, zoom: config.zoom, language: config.language.clone() } )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse (&self, latitude: f64, longitude: f64) -> Result<Option<Address>> {
        let query = [
            ("format", "jsonv2".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("zoom", self.zoom.to_string()),
            ("accept-language", self.language.clone()),
        ];

        let response: Value = net::get_json_query( &self.client, &self.url, &query).await
            .map_err( |e| IssTrackerError::GeocodeError( e.to_string()))?;

        Ok( address_of( response) )
    }
}

/// extract the address object from a Nominatim response. Points without address (e.g. over the ocean) produce
/// a `{"error": "Unable to geocode"}` response
pub fn address_of (response: Value) -> Option<Address> {
    if response.get("error").is_some() {
        return None
    }

    match response {
        Value::Object(mut map) => match map.remove("address") {
            Some(Value::Object(address)) if !address.is_empty() => Some(address),
            _ => None
        }
        _ => None
    }
}

/* #endregion geocoder */
