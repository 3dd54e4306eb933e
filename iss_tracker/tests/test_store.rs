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

use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;
use iss_common::cartesian3::Cartesian3;
use iss_tracker::{
    dataset::{Dataset, Record},
    epoch_store::EpochStore,
    errors::IssTrackerError,
    state_vector::StateVector
};

/// a dataset whose header, comments and state vectors all identify the same generation
fn generation (id: usize, n: usize) -> Dataset {
    let mut header = Record::new();
    header.insert( "GENERATION".to_string(), id.to_string());

    let svs = (0..n).map( |i| {
        let epoch = format!("2024-{:03}T12:{:02}:00.000Z", 40 + id, i);
        StateVector::new( epoch, Cartesian3::new( id as f64, 0.0, 0.0), Cartesian3::zero()).unwrap()
    }).collect();

    Dataset::new( header, Record::new(), vec![ format!("generation {id}") ], svs).unwrap()
}

fn check_consistent (data: &Dataset) -> usize {
    let id: usize = data.header()["GENERATION"].parse().unwrap();
    assert_eq!( data.comments(), &[ format!("generation {id}") ]);
    assert_eq!( data.len(), id * 10);
    for sv in data.state_vectors() {
        assert_eq!( sv.position.x, id as f64);
        assert!( sv.epoch.starts_with( &format!("2024-{:03}", 40 + id)));
    }
    id
}

#[test]
fn test_load_clear() {
    let store = EpochStore::new();
    assert!( store.is_empty());
    assert!( matches!( store.snapshot(), Err(IssTrackerError::EmptyStore)));

    assert_eq!( store.load( generation(1, 10)), 10);
    assert!( !store.is_empty());
    let snap1 = store.snapshot().unwrap();
    assert_eq!( check_consistent(&snap1), 1);

    // replacement is complete, nothing is merged
    assert_eq!( store.load( generation(2, 20)), 20);
    let snap2 = store.snapshot().unwrap();
    assert_eq!( check_consistent(&snap2), 2);
    assert!( snap2.find("2024-041T12:00:00.000Z").is_none());

    // old snapshots stay valid
    assert_eq!( check_consistent(&snap1), 1);

    store.clear();
    assert!( store.is_empty());
    assert!( matches!( store.snapshot(), Err(IssTrackerError::EmptyStore)));
    assert_eq!( check_consistent(&snap2), 2);

    // clearing an empty store is fine
    store.clear();
    assert!( store.is_empty());
}

#[test]
fn test_concurrent_snapshots() {
    let store = Arc::new( EpochStore::with_dataset( generation(1, 10)));
    let done = Arc::new( AtomicBool::new(false));

    let readers: Vec<_> = (0..4).map( |_| {
        let store = store.clone();
        let done = done.clone();
        thread::spawn( move || {
            let mut n_reads = 0;
            while !done.load( Ordering::Relaxed) {
                match store.snapshot() {
                    Ok(data) => { check_consistent(&data); }
                    Err(IssTrackerError::EmptyStore) => {}
                    Err(e) => panic!("unexpected error {e}")
                }
                n_reads += 1;
            }
            n_reads
        })
    }).collect();

    for i in 0..500 {
        match i % 3 {
            0 => { store.load( generation(2, 20)); }
            1 => { store.load( generation(1, 10)); }
            _ => store.clear()
        }
    }
    done.store( true, Ordering::Relaxed);

    for r in readers {
        let n_reads = r.join().expect("reader panicked");
        println!("reader performed {n_reads} snapshots");
    }
}
