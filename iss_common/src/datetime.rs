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

//! date/time support for CCSDS style day-of-year timestamps such as `2024-045T12:08:00.000Z`

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize,Deserializer,Serializer};
use std::time::Duration;
use parse_duration::parse;

/// chrono format of day-of-year epochs as they appear in OEM documents
pub const DOY_FORMAT: &str = "%Y-%jT%H:%M:%S%.fZ";

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// parse a day-of-year timestamp (e.g. "2024-045T12:08:00.000Z"), which is always UTC
pub fn parse_doy_datetime (s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str( s.trim(), DOY_FORMAT).ok().map(|ndt| ndt.and_utc())
}

/// format as day-of-year timestamp with millisecond resolution
pub fn format_doy_datetime (dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%jT%H:%M:%S%.3fZ").to_string()
}

/// (hour,minute) of the time of day
pub fn hour_minute (dt: &DateTime<Utc>) -> (u32,u32) {
    (dt.hour(), dt.minute())
}

/// fractional seconds from `dt` to `now` (negative if `dt` is in the future of `now`)
pub fn secs_since (now: &DateTime<Utc>, dt: &DateTime<Utc>) -> f64 {
    let d = *now - *dt;
    match d.num_nanoseconds() {
        Some(ns) => ns as f64 / 1e9,
        None => d.num_milliseconds() as f64 / 1000.0 // more than ~292 years apart
    }
}

pub fn short_utc_datetime_string (dt: &DateTime<Utc>) -> String {
    format!("{}", dt.format("%Y-%m-%dT%H:%M:%S%Z"))
}

//--- support for serde

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{:?}", dur);
    s.serialize_str(&dfm)
}
