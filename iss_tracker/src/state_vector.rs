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

use chrono::{DateTime,Utc};
use serde::Serialize;
use iss_common::{cartesian3::Cartesian3, datetime::parse_doy_datetime};
use crate::errors::{oem_error, IssTrackerError, Result};

/// a scalar value with a unit tag, serialized as `{ "value": .., "units": ".." }`
#[derive(Debug,Clone,Copy,Serialize,PartialEq)]
pub struct UnitValue {
    pub value: f64,
    pub units: &'static str,
}

impl UnitValue {
    pub fn km (value: f64)->Self { UnitValue { value, units: "km" } }
    pub fn km_per_sec (value: f64)->Self { UnitValue { value, units: "km/s" } }
}

/// position and velocity of the ISS at a given epoch.
/// positions are in km and velocities in km/s, both in an earth-centered inertial frame (J2000)
#[derive(Debug,Clone,Serialize)]
pub struct StateVector {
    /// the day-of-year timestamp as given by the feed, e.g. "2024-045T12:08:00.000Z"
    pub epoch: String,

    /// the parsed `epoch`
    #[serde(skip)]
    pub date: DateTime<Utc>,

    pub position: Cartesian3,
    pub velocity: Cartesian3,
}

impl StateVector {
    pub fn new (epoch: impl ToString, position: Cartesian3, velocity: Cartesian3) -> Result<Self> {
        let epoch = epoch.to_string();
        let date = parse_doy_datetime(&epoch).ok_or( oem_error!("invalid epoch '{}'", epoch))?;
        Ok( StateVector { epoch, date, position, velocity } )
    }

    /// instantaneous speed, which is the norm of the velocity vector
    pub fn speed (&self) -> UnitValue {
        UnitValue::km_per_sec( self.velocity.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed() {
        let sv = StateVector::new( "2024-045T12:00:00.000Z", Cartesian3::zero(), Cartesian3::new( 3.0, 4.0, 0.0)).unwrap();
        let speed = sv.speed();
        assert_eq!( speed.value, 5.0);
        assert_eq!( speed.units, "km/s");
    }

    #[test]
    fn test_invalid_epoch() {
        let res = StateVector::new( "2024-02-14T12:00:00Z", Cartesian3::zero(), Cartesian3::zero());
        assert!( matches!( res, Err(IssTrackerError::OemError(_))));
    }
}
