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

//! Default election policy.
//!
//! Every mode walks the priority list in order and returns the first replica
//! that satisfies the mode's constraints:
//! 1. Offline: live and in sync, falling back to any live replica when unclean
//!    election is allowed
//! 2. Reassignment: live and in sync, taken from the target replicas
//! 3. Preferred replica: live and in sync
//! 4. Controlled shutdown: live or shutting down, in sync, and not shutting down

use std::collections::HashSet;

use tracing::warn;

use crate::elect::elect_policy::ElectPolicy;
use crate::typ::ReplicaId;

/// Default implementation of the election policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultElectPolicy;

impl DefaultElectPolicy {
    pub fn new() -> Self {
        Self
    }

    /// First replica of `priority_list` that is live and in sync.
    fn first_live_in_sync(
        priority_list: &[ReplicaId],
        isr: &[ReplicaId],
        live_replicas: &HashSet<ReplicaId>,
    ) -> Option<ReplicaId> {
        priority_list
            .iter()
            .copied()
            .find(|replica| live_replicas.contains(replica) && isr.contains(replica))
    }
}

impl ElectPolicy for DefaultElectPolicy {
    fn elect_for_offline(
        &self,
        assignment: &[ReplicaId],
        isr: &[ReplicaId],
        live_replicas: &HashSet<ReplicaId>,
        unclean_leader_election_allowed: bool,
    ) -> Option<ReplicaId> {
        if let Some(leader) = Self::first_live_in_sync(assignment, isr, live_replicas) {
            return Some(leader);
        }
        if !unclean_leader_election_allowed {
            return None;
        }

        let leader = assignment.iter().copied().find(|replica| live_replicas.contains(replica));
        if let Some(leader) = leader {
            warn!(
                "Unclean leader election: replica {} is not in ISR {:?}, data loss is possible",
                leader, isr
            );
        }
        leader
    }

    fn elect_for_reassignment(
        &self,
        target_replicas: &[ReplicaId],
        isr: &[ReplicaId],
        live_replicas: &HashSet<ReplicaId>,
    ) -> Option<ReplicaId> {
        Self::first_live_in_sync(target_replicas, isr, live_replicas)
    }

    fn elect_for_preferred_replica(
        &self,
        assignment: &[ReplicaId],
        isr: &[ReplicaId],
        live_replicas: &HashSet<ReplicaId>,
    ) -> Option<ReplicaId> {
        Self::first_live_in_sync(assignment, isr, live_replicas)
    }

    fn elect_for_controlled_shutdown(
        &self,
        assignment: &[ReplicaId],
        isr: &[ReplicaId],
        live_or_shutting_down_replicas: &HashSet<ReplicaId>,
        shutting_down_brokers: &HashSet<ReplicaId>,
    ) -> Option<ReplicaId> {
        assignment.iter().copied().find(|replica| {
            live_or_shutting_down_replicas.contains(replica)
                && isr.contains(replica)
                && !shutting_down_brokers.contains(replica)
        })
    }
}
