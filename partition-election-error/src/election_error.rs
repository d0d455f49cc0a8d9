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

//! Election error types
//!
//! Errors surfaced by the partition leader election core. Only configuration
//! problems are errors here: a partition for which no leader can be chosen is
//! reported through the election outcome, never through this type.

use thiserror::Error;

/// Partition election error types
#[derive(Debug, Error)]
pub enum ElectionError {
    /// A non-empty token of the deprioritized replica list is not a replica id
    #[error("Config parse error: invalid replica id '{token}' in deprioritized replica list '{list}'")]
    ConfigParse { token: String, list: String },

    /// Configuration source could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ElectionError {
    pub fn config_parse(token: impl Into<String>, list: impl Into<String>) -> Self {
        ElectionError::ConfigParse {
            token: token.into(),
            list: list.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ElectionError::Config(msg.into())
    }

    /// Returns true when the error comes from a malformed deprioritized replica list.
    pub fn is_config_parse(&self) -> bool {
        matches!(self, ElectionError::ConfigParse { .. })
    }
}

/// Result type alias for election operations
pub type ElectionResult<T> = std::result::Result<T, ElectionError>;
