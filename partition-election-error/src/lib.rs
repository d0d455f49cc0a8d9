//  Licensed to the Apache Software Foundation (ASF) under one
//  or more contributor license agreements.  See the NOTICE file
//  distributed with this work for additional information
//  regarding copyright ownership.  The ASF licenses this file
//  to you under the Apache License, Version 2.0 (the
//  "License"); you may not use this file except in compliance
//  with the License.  You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing,
//  software distributed under the License is distributed on an
//  "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
//  KIND, either express or implied.  See the License for the
//  specific language governing permissions and limitations
//  under the License.

//! # Partition Election Errors
//!
//! Error types shared by the partition election crates.
//!
//! ```rust
//! use partition_election_error::ElectionError;
//! use partition_election_error::ElectionResult;
//!
//! fn parse_replica(token: &str) -> ElectionResult<i32> {
//!     token
//!         .parse::<i32>()
//!         .map_err(|_| ElectionError::config_parse(token, token))
//! }
//! # assert!(parse_replica("x").is_err());
//! ```

pub mod election_error;

pub use election_error::ElectionError;
pub use election_error::ElectionResult;
