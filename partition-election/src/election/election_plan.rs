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

//! The per-partition pipeline shared by every election mode.
//!
//! A mode only decides three things: which priority list to use, whether
//! shutting-down brokers count as live, and how the ISR changes once a leader
//! is picked. Those choices form an [`ElectionPlan`]; [`run_election`] does
//! the rest.

use std::collections::HashSet;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::cluster_state::ClusterState;
use crate::typ::ElectionDecision;
use crate::typ::ElectionMode;
use crate::typ::ElectionOutcome;
use crate::typ::LeaderAndIsr;
use crate::typ::ReplicaId;
use crate::typ::TopicPartition;

/// How the ISR is derived from the prior record once a leader is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IsrRule {
    /// Keep the ISR as is, only the leader changes.
    Unchanged,
    /// Keep the online members of the ISR when the leader was one of them,
    /// otherwise restart the ISR from the leader alone.
    ShrinkToOnline,
    /// Drop the given brokers from the ISR.
    RemoveShuttingDown(HashSet<ReplicaId>),
}

impl IsrRule {
    fn apply(
        &self,
        cluster_state: &dyn ClusterState,
        topic_partition: &TopicPartition,
        leader_and_isr: &LeaderAndIsr,
        leader: ReplicaId,
    ) -> LeaderAndIsr {
        match self {
            IsrRule::Unchanged => leader_and_isr.new_leader(leader),
            IsrRule::ShrinkToOnline => {
                let isr = leader_and_isr.isr();
                let new_isr: Vec<ReplicaId> = if isr.contains(&leader) {
                    isr.iter()
                        .copied()
                        .filter(|&replica| cluster_state.is_replica_online(replica, topic_partition, false))
                        .collect()
                } else {
                    debug!(
                        "Leader {} of {} is outside ISR {:?}, resetting ISR",
                        leader, topic_partition, isr
                    );
                    vec![leader]
                };
                leader_and_isr.new_leader_and_isr(leader, new_isr)
            }
            IsrRule::RemoveShuttingDown(shutting_down) => {
                let new_isr: Vec<ReplicaId> = leader_and_isr
                    .isr()
                    .iter()
                    .copied()
                    .filter(|replica| !shutting_down.contains(replica))
                    .collect();
                leader_and_isr.new_leader_and_isr(leader, new_isr)
            }
        }
    }
}

/// Inputs that differ between election modes.
#[derive(Debug, Clone)]
pub(crate) struct ElectionPlan {
    pub(crate) mode: ElectionMode,
    /// Deprioritized priority list.
    pub(crate) priority_list: Vec<ReplicaId>,
    pub(crate) include_shutting_down: bool,
    pub(crate) isr_rule: IsrRule,
}

/// Runs one partition through the election pipeline.
///
/// `select` receives the priority list, the prior ISR and the live set, and
/// returns the chosen leader. It is not called when there is no prior record.
pub(crate) fn run_election<F>(
    cluster_state: &dyn ClusterState,
    topic_partition: &TopicPartition,
    leader_and_isr: Option<&LeaderAndIsr>,
    plan: ElectionPlan,
    select: F,
) -> ElectionOutcome
where
    F: FnOnce(&[ReplicaId], &[ReplicaId], &HashSet<ReplicaId>) -> Option<ReplicaId>,
{
    let live_replicas: Vec<ReplicaId> = plan
        .priority_list
        .iter()
        .copied()
        .filter(|&replica| cluster_state.is_replica_online(replica, topic_partition, plan.include_shutting_down))
        .collect();
    debug!(
        "{} election for {}: priority list {:?}, live replicas {:?}",
        plan.mode, topic_partition, plan.priority_list, live_replicas
    );

    let Some(leader_and_isr) = leader_and_isr else {
        debug!("No leadership record for {}, skipping {} election", topic_partition, plan.mode);
        return ElectionOutcome::new(topic_partition.clone(), ElectionDecision::NoPriorState, live_replicas);
    };

    let live_set: HashSet<ReplicaId> = live_replicas.iter().copied().collect();
    let decision = match select(&plan.priority_list, leader_and_isr.isr(), &live_set) {
        Some(leader) => {
            let new_leader_and_isr = plan
                .isr_rule
                .apply(cluster_state, topic_partition, leader_and_isr, leader);
            info!(
                "Elected leader {} for {} ({}), ISR {:?} -> {:?}",
                leader,
                topic_partition,
                plan.mode,
                leader_and_isr.isr(),
                new_leader_and_isr.isr()
            );
            ElectionDecision::Elected(new_leader_and_isr)
        }
        None => {
            warn!(
                "No eligible leader for {} ({}), ISR {:?}, live replicas {:?}",
                topic_partition,
                plan.mode,
                leader_and_isr.isr(),
                live_replicas
            );
            ElectionDecision::NoEligibleLeader
        }
    };

    ElectionOutcome::new(topic_partition.clone(), decision, live_replicas)
}
