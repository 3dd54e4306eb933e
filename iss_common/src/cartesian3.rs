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

use serde::{Serialize,Deserialize};

/// note that we do not use uom here to allow for abstract coordinate systems and units
/// (state vectors use km for positions and km/s for velocities)

#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    pub fn new (x: f64, y: f64, z: f64)->Cartesian3 {
        Cartesian3{x,y,z}
    }

    pub fn zero ()->Cartesian3 {
        Cartesian3{x: 0.0, y: 0.0, z: 0.0}
    }

    /// euclidean norm
    pub fn length(&self) -> f64 {
        ((self.x * self.x) + (self.y * self.y) + (self.z * self.z)).sqrt()
    }

    /// length of the projection onto the xy (equatorial) plane
    pub fn xy_length(&self) -> f64 {
        ((self.x * self.x) + (self.y * self.y)).sqrt()
    }
}

impl std::fmt::Display for Cartesian3 {
    fn fmt (&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ x: {}, y: {}, z: {} }}", self.x, self.y, self.z)
    }
}
