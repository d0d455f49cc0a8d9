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

//! Assignment prioritizer.
//!
//! Operators may list replicas that should only lead a partition when no
//! other replica can. The list is a `:`-separated string of replica ids,
//! e.g. `"1:3"`. Reordering moves the listed replicas to the back of a
//! priority list while keeping the relative order inside both groups.

use std::collections::HashSet;
use std::str::FromStr;

use partition_election_error::ElectionError;
use partition_election_error::ElectionResult;

use crate::typ::ReplicaId;

/// Separator between replica ids in the deprioritized replica list.
pub const DEPRIORITIZED_REPLICAS_DELIMITER: char = ':';

/// Parsed set of replicas to avoid as leaders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprioritizedSet {
    replicas: HashSet<ReplicaId>,
}

impl DeprioritizedSet {
    /// Parses a `:`-separated replica id list.
    ///
    /// Empty tokens are skipped, so `""`, `":"` and `"1::2"` are accepted.
    /// Any other token that is not an integer fails the whole list. Tokens are
    /// not trimmed, so `"1: :2"` and `" 1"` are rejected.
    pub fn parse(list: &str) -> ElectionResult<Self> {
        let mut replicas = HashSet::new();
        for token in list.split(DEPRIORITIZED_REPLICAS_DELIMITER) {
            if token.is_empty() {
                continue;
            }
            let replica = token
                .parse::<ReplicaId>()
                .map_err(|_| ElectionError::config_parse(token, list))?;
            replicas.insert(replica);
        }
        Ok(Self { replicas })
    }

    /// Parses an optional list; `None` means nothing is deprioritized.
    pub fn parse_optional(list: Option<&str>) -> ElectionResult<Self> {
        list.map_or_else(|| Ok(Self::default()), Self::parse)
    }

    pub fn contains(&self, replica: ReplicaId) -> bool {
        self.replicas.contains(&replica)
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    /// Stable partition of `assignment`: replicas outside the set first, then
    /// the deprioritized ones, each group in its original order.
    pub fn prioritize(&self, assignment: &[ReplicaId]) -> Vec<ReplicaId> {
        let (preferred, deprioritized): (Vec<ReplicaId>, Vec<ReplicaId>) =
            assignment.iter().copied().partition(|&replica| !self.contains(replica));
        preferred.into_iter().chain(deprioritized).collect()
    }
}

impl FromStr for DeprioritizedSet {
    type Err = ElectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<ReplicaId> for DeprioritizedSet {
    fn from_iter<T: IntoIterator<Item = ReplicaId>>(iter: T) -> Self {
        Self {
            replicas: iter.into_iter().collect(),
        }
    }
}

/// Reorders `assignment` so the replicas named in `deprioritized_replicas`
/// come last.
pub fn prioritize(assignment: &[ReplicaId], deprioritized_replicas: &str) -> ElectionResult<Vec<ReplicaId>> {
    Ok(DeprioritizedSet::parse(deprioritized_replicas)?.prioritize(assignment))
}
