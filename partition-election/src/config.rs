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

use std::path::Path;
use std::sync::Arc;

use config::Config;
use parking_lot::RwLock;
use partition_election_error::ElectionError;
use partition_election_error::ElectionResult;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;

use crate::prioritizer::DeprioritizedSet;

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "PARTITION_ELECTION";

/// Election configuration
///
/// Settings the controller consults on every election batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElectionConfig {
    /// Replicas that should only lead when no other replica qualifies,
    /// as a `:`-separated list of replica ids
    ///
    /// Default: empty (nothing deprioritized)
    #[serde(alias = "deprioritizedreplicas", alias = "deprioritized_replicas")]
    pub deprioritized_replicas: String,

    /// Whether offline election may pick a live replica outside the ISR
    ///
    /// Default: false
    #[serde(alias = "uncleanleaderelectionenable", alias = "unclean_leader_election_enable")]
    pub unclean_leader_election_enable: bool,
}

impl ElectionConfig {
    /// Loads the configuration from `path` (format picked from the extension),
    /// overlaid with `PARTITION_ELECTION_*` environment variables.
    pub fn load(path: impl AsRef<Path>) -> ElectionResult<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| ElectionError::config(format!("failed to load {}: {}", path.display(), e)))?;
        let election_config = settings
            .try_deserialize::<ElectionConfig>()
            .map_err(|e| ElectionError::config(e.to_string()))?;
        info!("election config loaded from {}: {:?}", path.display(), election_config);
        Ok(election_config)
    }

    /// Validates and parses the deprioritized replica list.
    pub fn parsed_deprioritized_replicas(&self) -> ElectionResult<DeprioritizedSet> {
        DeprioritizedSet::parse(&self.deprioritized_replicas)
    }
}

/// Election configuration that may change while the controller runs.
///
/// Readers take a [`snapshot`](Self::snapshot) per batch, so an update never
/// lands in the middle of a batch.
#[derive(Debug, Clone, Default)]
pub struct DynamicElectionConfig {
    inner: Arc<RwLock<ElectionConfig>>,
}

impl DynamicElectionConfig {
    pub fn new(config: ElectionConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn snapshot(&self) -> ElectionConfig {
        self.inner.read().clone()
    }

    /// Replaces the whole configuration after validating it.
    pub fn update(&self, config: ElectionConfig) -> ElectionResult<()> {
        config.parsed_deprioritized_replicas()?;
        info!("election config updated: {:?}", config);
        *self.inner.write() = config;
        Ok(())
    }

    /// Replaces the deprioritized replica list; an invalid list leaves the
    /// current one in place.
    pub fn set_deprioritized_replicas(&self, deprioritized_replicas: impl Into<String>) -> ElectionResult<()> {
        let deprioritized_replicas = deprioritized_replicas.into();
        DeprioritizedSet::parse(&deprioritized_replicas)?;
        info!("deprioritized replicas set to '{}'", deprioritized_replicas);
        self.inner.write().deprioritized_replicas = deprioritized_replicas;
        Ok(())
    }

    pub fn set_unclean_leader_election_enable(&self, enable: bool) {
        self.inner.write().unclean_leader_election_enable = enable;
    }
}
