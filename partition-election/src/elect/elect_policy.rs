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

use std::collections::HashSet;

use crate::typ::ReplicaId;

/// Picks the leader of a partition once the inputs for an election mode are
/// prepared. Every method returns `None` when no replica qualifies.
///
/// Priority lists arrive already reordered by the deprioritized replica list.
#[cfg_attr(test, mockall::automock)]
pub trait ElectPolicy: Send + Sync {
    /// Elect a leader for a partition whose leader is gone.
    ///
    /// # Arguments
    /// * `assignment` - replicas in priority order
    /// * `isr` - in-sync replicas of the last persisted record
    /// * `live_replicas` - reachable replicas, shutting-down brokers excluded
    /// * `unclean_leader_election_allowed` - whether a live replica outside the ISR may be chosen
    ///
    /// # Returns
    /// A member of `live_replicas`, restricted to `isr` unless unclean election is allowed
    fn elect_for_offline(
        &self,
        assignment: &[ReplicaId],
        isr: &[ReplicaId],
        live_replicas: &HashSet<ReplicaId>,
        unclean_leader_election_allowed: bool,
    ) -> Option<ReplicaId>;

    /// Elect a leader among the target replicas of a reassignment.
    ///
    /// The result is a member of both `isr` and `live_replicas`.
    fn elect_for_reassignment(
        &self,
        target_replicas: &[ReplicaId],
        isr: &[ReplicaId],
        live_replicas: &HashSet<ReplicaId>,
    ) -> Option<ReplicaId>;

    /// Elect the earliest replica in priority order that is live and in sync.
    fn elect_for_preferred_replica(
        &self,
        assignment: &[ReplicaId],
        isr: &[ReplicaId],
        live_replicas: &HashSet<ReplicaId>,
    ) -> Option<ReplicaId>;

    /// Elect a leader while some brokers shut down gracefully.
    ///
    /// # Arguments
    /// * `assignment` - replicas in priority order
    /// * `isr` - in-sync replicas of the last persisted record
    /// * `live_or_shutting_down_replicas` - reachable replicas including shutting-down brokers
    /// * `shutting_down_brokers` - brokers that must not become leader
    ///
    /// # Returns
    /// A member of `isr` and `live_or_shutting_down_replicas` that is not shutting down
    fn elect_for_controlled_shutdown(
        &self,
        assignment: &[ReplicaId],
        isr: &[ReplicaId],
        live_or_shutting_down_replicas: &HashSet<ReplicaId>,
        shutting_down_brokers: &HashSet<ReplicaId>,
    ) -> Option<ReplicaId>;
}
