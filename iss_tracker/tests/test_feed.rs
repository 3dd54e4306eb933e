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

use std::path::PathBuf;
use iss_tracker::{
    IssTrackerConfig, load_config,
    errors::IssTrackerError,
    feed::{FeedConfig, FeedLoader, FileFeedLoader, NASA_ISS_OEM_URL},
};

fn data_path (filename: &str) -> PathBuf {
    PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(filename)
}

#[tokio::test]
async fn test_file_loader() {
    let loader = FileFeedLoader::new( data_path("iss_oem_sample.xml"));
    println!("loading from {}", loader.source());

    let data = loader.load().await.unwrap();
    assert_eq!( data.len(), 4);
    assert_eq!( data.metadata()["OBJECT_NAME"], "ISS");
}

#[tokio::test]
async fn test_missing_file() {
    let loader = FileFeedLoader::new( data_path("no_such_file.xml"));
    let res = loader.load().await;
    assert!( matches!( res, Err(IssTrackerError::UpstreamFetchFailed(_))));
}

#[tokio::test]
async fn test_configured_file_loader() {
    let config = FeedConfig { file: Some( data_path("iss_oem_sample.xml")), ..FeedConfig::default() };
    let loader = config.create_loader("test").unwrap();
    assert!( loader.source().ends_with("iss_oem_sample.xml"));
    assert_eq!( loader.load().await.unwrap().len(), 4);
}

#[test]
fn test_config() {
    let path = PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("configs").join("iss_tracker.ron");
    let config: IssTrackerConfig = load_config( &path).unwrap();
    println!("{config:?}");

    assert_eq!( config.server.sock_addr.port(), 5000);
    assert_eq!( config.feed.url, NASA_ISS_OEM_URL);
    assert!( config.feed.file.is_none());
    assert_eq!( config.feed.timeout.as_secs(), 30);
    assert_eq!( config.geocoder.zoom, 10);
}

#[test]
fn test_partial_config() {
    // everything not specified uses defaults
    let config: IssTrackerConfig = ron::de::from_str(r#"( user_agent: "my_tracker", feed: ( timeout: "5s" ) )"#).unwrap();
    assert_eq!( config.user_agent, "my_tracker");
    assert_eq!( config.feed.timeout.as_secs(), 5);
    assert_eq!( config.feed.url, NASA_ISS_OEM_URL);
    assert_eq!( config.server.sock_addr.port(), 5000);
}
