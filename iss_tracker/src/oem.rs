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

//! translation of CCSDS Orbit Ephemeris Message (OEM) XML documents into `Dataset`s.
//! This is the only place that knows about the feed document structure, which looks like
//! ```xml
//! <ndm> <oem id="CCSDS_OEM_VERS" version="2.0">
//!   <header> <CREATION_DATE>..</CREATION_DATE> <ORIGINATOR>..</ORIGINATOR> </header>
//!   <body> <segment>
//!     <metadata> <OBJECT_NAME>ISS</OBJECT_NAME> .. </metadata>
//!     <data>
//!       <COMMENT>..</COMMENT> ..
//!       <stateVector>
//!         <EPOCH>2024-045T12:00:00.000Z</EPOCH>
//!         <X units="km">..</X> <Y units="km">..</Y> <Z units="km">..</Z>
//!         <X_DOT units="km/s">..</X_DOT> <Y_DOT units="km/s">..</Y_DOT> <Z_DOT units="km/s">..</Z_DOT>
//!       </stateVector> ..
//! ```

use quick_xml::{Reader, events::Event};
use iss_common::cartesian3::Cartesian3;
use crate::dataset::{Dataset,Record};
use crate::state_vector::StateVector;
use crate::errors::{oem_error, IssTrackerError, Result};

/// parse a complete OEM document. This fails if the document is not well formed, if it is truncated, if
/// any state vector is incomplete or if there are no state vectors at all
pub fn parse_oem (input: &str) -> Result<Dataset> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();

    let mut header = Record::new();
    let mut metadata = Record::new();
    let mut comments: Vec<String> = Vec::new();
    let mut state_vectors: Vec<StateVector> = Vec::new();
    let mut fields: Option<StateVectorFields> = None;
    let mut is_leaf = false; // no child elements since last Start

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name( e.local_name().as_ref())?;
                if name == "stateVector" {
                    fields = Some( StateVectorFields::default());
                }
                path.push(name);
                text.clear();
                is_leaf = true;
            }
            Event::Empty(e) => { // <COMMENT/> and the like
                let name = element_name( e.local_name().as_ref())?;
                if name == "stateVector" {
                    return Err( oem_error!("empty stateVector element"))
                }
                path.push(name);
                add_leaf( &path, "", &mut header, &mut metadata, &mut comments, &mut fields)?;
                path.pop();
                is_leaf = false;
            }
            Event::Text(t) => {
                text.push_str( t.unescape()?.as_ref());
            }
            Event::CData(c) => {
                text.push_str( &String::from_utf8_lossy( &c.into_inner()));
            }
            Event::End(_) => {
                if is_leaf {
                    add_leaf( &path, text.trim(), &mut header, &mut metadata, &mut comments, &mut fields)?;
                    text.clear();
                    is_leaf = false;
                }
                if let Some(name) = path.pop() {
                    if name == "stateVector" {
                        match fields.take() {
                            Some(f) => state_vectors.push( f.into_state_vector()?),
                            None => return Err( oem_error!("unbalanced stateVector element"))
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {} // declarations, processing instructions, xml comments
        }
    }

    if !path.is_empty() {
        return Err( oem_error!("truncated document, unclosed element {}", path.join("/")))
    }

    Dataset::new( header, metadata, comments, state_vectors)
}

fn element_name (bs: &[u8]) -> Result<String> {
    std::str::from_utf8(bs)
        .map( |s| s.to_string())
        .map_err( |_| oem_error!("non utf-8 element name"))
}

fn add_leaf (path: &[String], text: &str,
             header: &mut Record, metadata: &mut Record, comments: &mut Vec<String>,
             fields: &mut Option<StateVectorFields>) -> Result<()>
{
    let p: Vec<&str> = path.iter().map(|s| s.as_str()).collect();

    match p.as_slice() {
        [.., "oem", "header", key] => add_entry( header, key, text),
        [.., "segment", "metadata", key] => add_entry( metadata, key, text),
        [.., "segment", "data", "COMMENT"] => { comments.push( text.to_string()); }
        [.., "stateVector", key] => {
            if let Some(f) = fields {
                f.set( key, text)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// repeated elements (e.g. several COMMENTs in a metadata block) are joined by newlines
fn add_entry (record: &mut Record, key: &str, text: &str) {
    match record.get_mut(key) {
        Some(v) => {
            v.push('\n');
            v.push_str(text);
        }
        None => { record.insert( key.to_string(), text.to_string()); }
    }
}

/// the (optional) components of a state vector while we are parsing its element
#[derive(Default)]
struct StateVectorFields {
    epoch: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    x_dot: Option<f64>,
    y_dot: Option<f64>,
    z_dot: Option<f64>,
}

impl StateVectorFields {
    fn set (&mut self, key: &str, text: &str) -> Result<()> {
        match key {
            "EPOCH" => self.epoch = Some( text.to_string()),
            "X" => self.x = Some( parse_component( key, text)?),
            "Y" => self.y = Some( parse_component( key, text)?),
            "Z" => self.z = Some( parse_component( key, text)?),
            "X_DOT" => self.x_dot = Some( parse_component( key, text)?),
            "Y_DOT" => self.y_dot = Some( parse_component( key, text)?),
            "Z_DOT" => self.z_dot = Some( parse_component( key, text)?),
            _ => {} // we don't use accelerations or covariances
        }
        Ok(())
    }

    fn into_state_vector (self) -> Result<StateVector> {
        let epoch = self.epoch.ok_or( oem_error!("stateVector without EPOCH"))?;
        let missing = |c: &str| oem_error!("stateVector {} without {}", epoch, c);

        let position = Cartesian3::new(
            self.x.ok_or_else(|| missing("X"))?,
            self.y.ok_or_else(|| missing("Y"))?,
            self.z.ok_or_else(|| missing("Z"))?
        );
        let velocity = Cartesian3::new(
            self.x_dot.ok_or_else(|| missing("X_DOT"))?,
            self.y_dot.ok_or_else(|| missing("Y_DOT"))?,
            self.z_dot.ok_or_else(|| missing("Z_DOT"))?
        );

        StateVector::new( epoch, position, velocity)
    }
}

fn parse_component (key: &str, text: &str) -> Result<f64> {
    text.parse::<f64>().map_err( |_| oem_error!("invalid {} value '{}'", key, text))
}
