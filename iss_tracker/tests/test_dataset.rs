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

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use iss_common::{cartesian3::Cartesian3, datetime::format_doy_datetime};
use iss_tracker::{
    dataset::{Dataset, EpochRange, Record},
    errors::IssTrackerError,
    oem::parse_oem,
    state_vector::StateVector
};

const SAMPLE: &str = include_str!("data/iss_oem_sample.xml");

fn sv_at (t: DateTime<Utc>) -> StateVector {
    StateVector::new( format_doy_datetime(&t), Cartesian3::new(6771.0, 0.0, 0.0), Cartesian3::new(0.0, 7.66, 0.0)).unwrap()
}

fn dataset (svs: Vec<StateVector>) -> Dataset {
    Dataset::new( Record::new(), Record::new(), Vec::new(), svs).unwrap()
}

fn ten_minute_dataset (n: usize) -> Dataset {
    let t0 = Utc.with_ymd_and_hms(2024, 2, 14, 0, 0, 0).unwrap();
    dataset( (0..n).map(|i| sv_at( t0 + TimeDelta::minutes(10 * i as i64))).collect())
}

#[test]
fn test_paginate() {
    let data = ten_minute_dataset(7);
    let all: Vec<&str> = data.state_vectors().iter().map(|sv| sv.epoch.as_str()).collect();

    assert_eq!( data.epochs( &EpochRange::default()), all);

    for offset in 0..10 {
        for limit in 0..10 {
            let epochs = data.epochs( &EpochRange::new(offset, Some(limit)));
            let expected_len = limit.min( all.len().saturating_sub(offset));
            assert_eq!( epochs.len(), expected_len, "offset={offset}, limit={limit}");
            if expected_len > 0 {
                assert_eq!( epochs.as_slice(), &all[offset..offset+expected_len]);
            }
        }
        // default limit is everything that is left
        let epochs = data.epochs( &EpochRange::new(offset, None));
        assert_eq!( epochs.len(), all.len().saturating_sub(offset));
    }
}

#[test]
fn test_parse_range() {
    assert_eq!( EpochRange::parse( None, None).unwrap(), EpochRange::new(0, None));
    assert_eq!( EpochRange::parse( Some("3"), None).unwrap(), EpochRange::new(3, None));
    assert_eq!( EpochRange::parse( None, Some("0")).unwrap(), EpochRange::new(0, Some(0)));
    assert_eq!( EpochRange::parse( Some("2"), Some("5")).unwrap(), EpochRange::new(2, Some(5)));

    for invalid in ["abc", "-1", "1.5", ""] {
        assert!( matches!( EpochRange::parse( Some(invalid), None), Err(IssTrackerError::InvalidParameter(_))), "offset '{invalid}'");
        assert!( matches!( EpochRange::parse( None, Some(invalid)), Err(IssTrackerError::InvalidParameter(_))), "limit '{invalid}'");
    }

    // integers beyond usize are still valid counts
    let huge = "100000000000000000000";
    assert_eq!( EpochRange::parse( Some(huge), None).unwrap(), EpochRange::new(usize::MAX, None));
    assert_eq!( EpochRange::parse( None, Some(huge)).unwrap(), EpochRange::new(0, Some(usize::MAX)));
    assert_eq!( EpochRange::parse( Some("+4"), Some(" 2 ")).unwrap(), EpochRange::new(4, Some(2)));
    assert!( EpochRange::parse( Some("+"), None).is_err());

    let data = ten_minute_dataset(3);
    assert!( data.epochs( &EpochRange::parse( Some(huge), None).unwrap()).is_empty());
    assert_eq!( data.epochs( &EpochRange::parse( Some("1"), Some(huge)).unwrap()).len(), 2);
}

#[test]
fn test_find() {
    let data = parse_oem(SAMPLE).unwrap();

    // every listed epoch can be resolved
    for epoch in data.epochs( &EpochRange::default()) {
        let sv = data.find(epoch).expect("listed epoch not found");
        assert_eq!( sv.epoch, epoch);
    }

    assert!( data.find("2024-045T12:04:00.000Z").is_some());
    assert!( data.find("2024-045T12:04:00").is_none()); // no prefix matching
    assert!( data.find("2024-045T12:05:00.000Z").is_none());
    assert!( data.find("").is_none());
}

#[test]
fn test_empty_dataset() {
    let res = Dataset::new( Record::new(), Record::new(), vec!["just a comment".to_string()], Vec::new());
    assert!( matches!( res, Err(IssTrackerError::OemError(_))));
}

#[test]
fn test_nearest() {
    let t = Utc.with_ymd_and_hms(2024, 2, 14, 12, 0, 0).unwrap();
    let data = dataset( vec![
        sv_at( t - TimeDelta::seconds(50)),  // 50 sec in the past
        sv_at( t + TimeDelta::seconds(5)),   // 5 sec in the future
        sv_at( t - TimeDelta::seconds(200)),
    ]);

    let (sv, dt) = data.nearest_to(&t);
    assert_eq!( sv.epoch, format_doy_datetime( &(t + TimeDelta::seconds(5))));
    assert_eq!( dt, -5.0);
}

#[test]
fn test_nearest_tie() {
    let t = Utc.with_ymd_and_hms(2024, 2, 14, 12, 0, 0).unwrap();
    let data = dataset( vec![
        sv_at( t + TimeDelta::seconds(30)),
        sv_at( t - TimeDelta::seconds(30)),
    ]);

    let (sv, dt) = data.nearest_to(&t);
    assert_eq!( sv.epoch, data.state_vectors()[0].epoch); // first one wins
    assert_eq!( dt, -30.0);
}

#[test]
fn test_nearest_single() {
    let t = Utc.with_ymd_and_hms(2024, 2, 14, 12, 0, 0).unwrap();
    let data = dataset( vec![ sv_at( t - TimeDelta::days(3)) ]);

    let (sv, dt) = data.nearest_to(&t);
    assert_eq!( sv.epoch, data.state_vectors()[0].epoch);
    assert_eq!( dt, 3.0 * 86400.0);
}

#[test]
fn test_nearest_outside_of_range() {
    let data = parse_oem(SAMPLE).unwrap();

    let before = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!( data.nearest_to(&before).0.epoch, "2024-045T12:00:00.000Z");

    let after = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let (sv, dt) = data.nearest_to(&after);
    assert_eq!( sv.epoch, "2024-045T12:12:00.000Z");
    assert!( dt > 0.0);
}
