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

use std::sync::{Arc,RwLock,RwLockReadGuard,RwLockWriteGuard,PoisonError};
use crate::dataset::Dataset;
use crate::errors::{IssTrackerError, Result};

/// RwLock-synchronized holder of the current `Dataset`.
/// Readers obtain an `Arc` snapshot and do not hold the lock while processing it, which means a
/// reader always sees either the complete old or the complete new dataset. Writers can only
/// swap or drop the whole dataset, there is no partial mutation.
///
/// use like so:
/// ```rust
/// let store = EpochStore::new();
/// store.load( dataset);
/// ...
/// let data = store.snapshot()?; // Err(EmptyStore) if nothing loaded
/// for sv in data.state_vectors() { ... }
/// ```
pub struct EpochStore {
    current: RwLock<Option<Arc<Dataset>>>
}

impl EpochStore {
    pub fn new ()->Self {
        EpochStore { current: RwLock::new(None) }
    }

    pub fn with_dataset (dataset: Dataset)->Self {
        EpochStore { current: RwLock::new( Some( Arc::new(dataset))) }
    }

    /// replace the entire store, returning the number of state vectors now stored
    pub fn load (&self, dataset: Dataset) -> usize {
        let len = dataset.len();
        *self.write() = Some( Arc::new(dataset));
        len
    }

    pub fn clear (&self) {
        *self.write() = None;
    }

    pub fn is_empty (&self)->bool {
        self.read().is_none()
    }

    /// the current dataset, or `EmptyStore` if there is none
    pub fn snapshot (&self) -> Result<Arc<Dataset>> {
        self.read().clone().ok_or( IssTrackerError::EmptyStore)
    }

    // nothing can panic while we hold the lock so poisoning does not leave inconsistent data
    fn read (&self) -> RwLockReadGuard<'_, Option<Arc<Dataset>>> {
        self.current.read().unwrap_or_else( PoisonError::into_inner)
    }

    fn write (&self) -> RwLockWriteGuard<'_, Option<Arc<Dataset>>> {
        self.current.write().unwrap_or_else( PoisonError::into_inner)
    }
}

impl Default for EpochStore {
    fn default()->Self { EpochStore::new() }
}
