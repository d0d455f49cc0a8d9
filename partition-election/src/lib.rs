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

//! # Partition Leader Election
//!
//! Decision core of a replicated log controller: given the persisted
//! leadership record of a partition and a view of the cluster, decide which
//! replica leads next and what the in-sync replica set becomes.
//!
//! Four triggers are supported:
//! - offline: the leader is gone
//! - reassignment: the replica set is moving to new brokers
//! - preferred replica: leadership returns to the most preferred replica
//! - controlled shutdown: a broker is leaving gracefully
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │  PartitionLeaderElector (entry)  │
//! └───────────────┬──────────────────┘
//!                 │ batch of partitions
//!        ┌────────▼─────────┐
//!        │ election pipeline │──── Prioritizer (deprioritized replicas)
//!        └───┬──────────┬───┘
//!            │          │
//!   ┌────────▼───┐  ┌───▼──────────┐
//!   │ClusterState│  │ ElectPolicy  │
//!   │ (liveness) │  │ (selection)  │
//!   └────────────┘  └──────────────┘
//! ```
//!
//! Everything here is a pure computation over the supplied state; callers
//! persist the returned [`ElectionOutcome`]s.

#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

pub mod cluster_state;
pub mod config;
pub mod elect;
pub mod election;
pub mod log;
pub mod prioritizer;
pub mod typ;

pub use cluster_state::ClusterState;
pub use cluster_state::InMemoryClusterState;
pub use config::DynamicElectionConfig;
pub use config::ElectionConfig;
pub use elect::elect_policy::ElectPolicy;
pub use elect::policy::DefaultElectPolicy;
pub use election::elect_leader_for_controlled_shutdown;
pub use election::elect_leader_for_offline;
pub use election::elect_leader_for_preferred_replica;
pub use election::elect_leader_for_reassign;
pub use election::PartitionLeaderElector;
pub use partition_election_error::ElectionError;
pub use partition_election_error::ElectionResult;
pub use prioritizer::prioritize;
pub use prioritizer::DeprioritizedSet;
pub use typ::ElectionDecision;
pub use typ::ElectionMode;
pub use typ::ElectionOutcome;
pub use typ::LeaderAndIsr;
pub use typ::OfflineElectionRequest;
pub use typ::ReplicaAssignment;
pub use typ::ReplicaId;
pub use typ::TopicPartition;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
