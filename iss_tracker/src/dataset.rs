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

use std::collections::HashMap;
use chrono::{DateTime,Utc};
use indexmap::IndexMap;
use serde::Serialize;
use iss_common::datetime::secs_since;
use crate::state_vector::StateVector;
use crate::errors::{invalid_parameter, oem_error, IssTrackerError, Result};

/// free-form OEM key-value section (header or segment metadata), keyed by element name in document order
pub type Record = IndexMap<String,String>;

/// an immutable, validated set of ephemeris data. This is the unit of replacement for the
/// epoch store - header, metadata, comments and state vectors always come from the same feed document
#[derive(Debug,Clone,Serialize)]
pub struct Dataset {
    header: Record,
    metadata: Record,
    comments: Vec<String>,
    state_vectors: Vec<StateVector>, // in feed order, not re-sorted

    #[serde(skip)]
    index: HashMap<String,usize>, // epoch -> state_vectors index
}

impl Dataset {
    /// this fails if there are no state vectors or if epochs are not unique
    pub fn new (header: Record, metadata: Record, comments: Vec<String>, state_vectors: Vec<StateVector>) -> Result<Self> {
        if state_vectors.is_empty() {
            return Err( oem_error!("no state vectors"))
        }

        let mut index: HashMap<String,usize> = HashMap::with_capacity( state_vectors.len());
        for (i,sv) in state_vectors.iter().enumerate() {
            if index.insert( sv.epoch.clone(), i).is_some() {
                return Err( oem_error!("duplicated epoch {}", sv.epoch))
            }
        }

        Ok( Dataset { header, metadata, comments, state_vectors, index } )
    }

    pub fn header (&self)->&Record { &self.header }
    pub fn metadata (&self)->&Record { &self.metadata }
    pub fn comments (&self)->&[String] { &self.comments }
    pub fn state_vectors (&self)->&[StateVector] { &self.state_vectors }

    pub fn len (&self)->usize { self.state_vectors.len() }

    /// the epoch ids of the given range in feed order
    pub fn epochs (&self, range: &EpochRange) -> Vec<&str> {
        let limit = range.limit.unwrap_or( self.state_vectors.len());
        self.state_vectors.iter()
            .skip( range.offset)
            .take( limit)
            .map( |sv| sv.epoch.as_str())
            .collect()
    }

    /// exact match lookup
    pub fn find (&self, epoch: &str) -> Option<&StateVector> {
        self.index.get(epoch).map( |i| &self.state_vectors[*i])
    }

    /// the state vector with the smallest absolute time difference to `t`, together with the
    /// signed difference `t - epoch` in seconds (negative if the epoch is after `t`).
    /// Ties are resolved in favor of the first state vector in feed order
    pub fn nearest_to (&self, t: &DateTime<Utc>) -> (&StateVector, f64) {
        let mut best = &self.state_vectors[0]; // a Dataset is never empty
        let mut best_dt = secs_since( t, &best.date);

        for sv in &self.state_vectors[1..] {
            let dt = secs_since( t, &sv.date);
            if dt.abs() < best_dt.abs() {
                best = sv;
                best_dt = dt;
            }
        }

        (best, best_dt)
    }
}

/// offset/limit selection of epochs
#[derive(Debug,Clone,Copy,Default,PartialEq)]
pub struct EpochRange {
    pub offset: usize,
    pub limit: Option<usize>, // None means all remaining
}

impl EpochRange {
    pub fn new (offset: usize, limit: Option<usize>)->Self {
        EpochRange { offset, limit }
    }

    /// parse optional query parameter values. Values that are given have to be non-negative integers
    pub fn parse (offset: Option<&str>, limit: Option<&str>) -> Result<Self> {
        let offset = parse_count( "offset", offset)?.unwrap_or(0);
        let limit = parse_count( "limit", limit)?;
        Ok( EpochRange { offset, limit } )
    }
}

/// values that are too large for usize are clamped, which still means "past the end" or "all"
fn parse_count (name: &str, value: Option<&str>) -> Result<Option<usize>> {
    match value {
        Some(s) => {
            let digits = s.trim();
            let digits = digits.strip_prefix('+').unwrap_or(digits);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err( invalid_parameter!("{} has to be a non-negative integer, got '{}'", name, s))
            }
            Ok( Some( digits.parse::<usize>().unwrap_or(usize::MAX)))
        }
        None => Ok(None)
    }
}
