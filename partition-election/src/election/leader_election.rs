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

//! Batch entry points, one per election mode.
//!
//! Each call validates the deprioritized replica list once, then elects every
//! partition independently. Outcomes are returned in input order. Nothing is
//! persisted here; callers write the returned records themselves.

use tracing::debug;

use partition_election_error::ElectionResult;

use crate::cluster_state::ClusterState;
use crate::elect::elect_policy::ElectPolicy;
use crate::election::election_plan::run_election;
use crate::election::election_plan::ElectionPlan;
use crate::election::election_plan::IsrRule;
use crate::prioritizer::DeprioritizedSet;
use crate::typ::ElectionMode;
use crate::typ::ElectionOutcome;
use crate::typ::LeaderAndIsr;
use crate::typ::OfflineElectionRequest;
use crate::typ::TopicPartition;

/// Elects leaders for partitions whose leader is missing or unreachable.
///
/// When the chosen leader was in sync the ISR shrinks to its online members;
/// an unclean leader restarts the ISR as `[leader]`.
pub fn elect_leader_for_offline(
    cluster_state: &dyn ClusterState,
    elect_policy: &dyn ElectPolicy,
    requests: &[OfflineElectionRequest],
    deprioritized_replicas: Option<&str>,
) -> ElectionResult<Vec<ElectionOutcome>> {
    let deprioritized = DeprioritizedSet::parse_optional(deprioritized_replicas)?;
    debug!("Offline election for {} partitions", requests.len());

    Ok(requests
        .iter()
        .map(|request| {
            let plan = ElectionPlan {
                mode: ElectionMode::Offline,
                priority_list: deprioritized.prioritize(&cluster_state.current_assignment(&request.topic_partition)),
                include_shutting_down: false,
                isr_rule: IsrRule::ShrinkToOnline,
            };
            run_election(
                cluster_state,
                &request.topic_partition,
                request.leader_and_isr.as_ref(),
                plan,
                |assignment, isr, live_replicas| {
                    elect_policy.elect_for_offline(
                        assignment,
                        isr,
                        live_replicas,
                        request.unclean_leader_election_allowed,
                    )
                },
            )
        })
        .collect())
}

/// Elects leaders among the target replicas of partitions under reassignment.
/// Only the leader changes.
pub fn elect_leader_for_reassign(
    cluster_state: &dyn ClusterState,
    elect_policy: &dyn ElectPolicy,
    partitions: &[(TopicPartition, Option<LeaderAndIsr>)],
    deprioritized_replicas: Option<&str>,
) -> ElectionResult<Vec<ElectionOutcome>> {
    let deprioritized = DeprioritizedSet::parse_optional(deprioritized_replicas)?;
    debug!("Reassignment election for {} partitions", partitions.len());

    Ok(partitions
        .iter()
        .map(|(topic_partition, leader_and_isr)| {
            let plan = ElectionPlan {
                mode: ElectionMode::Reassignment,
                priority_list: deprioritized.prioritize(&cluster_state.target_assignment(topic_partition)),
                include_shutting_down: false,
                isr_rule: IsrRule::Unchanged,
            };
            run_election(
                cluster_state,
                topic_partition,
                leader_and_isr.as_ref(),
                plan,
                |target_replicas, isr, live_replicas| {
                    elect_policy.elect_for_reassignment(target_replicas, isr, live_replicas)
                },
            )
        })
        .collect())
}

/// Moves leadership back to the most preferred live in-sync replica.
/// Only the leader changes.
pub fn elect_leader_for_preferred_replica(
    cluster_state: &dyn ClusterState,
    elect_policy: &dyn ElectPolicy,
    partitions: &[(TopicPartition, Option<LeaderAndIsr>)],
    deprioritized_replicas: Option<&str>,
) -> ElectionResult<Vec<ElectionOutcome>> {
    let deprioritized = DeprioritizedSet::parse_optional(deprioritized_replicas)?;
    debug!("Preferred replica election for {} partitions", partitions.len());

    Ok(partitions
        .iter()
        .map(|(topic_partition, leader_and_isr)| {
            let plan = ElectionPlan {
                mode: ElectionMode::PreferredReplica,
                priority_list: deprioritized.prioritize(&cluster_state.current_assignment(topic_partition)),
                include_shutting_down: false,
                isr_rule: IsrRule::Unchanged,
            };
            run_election(
                cluster_state,
                topic_partition,
                leader_and_isr.as_ref(),
                plan,
                |assignment, isr, live_replicas| {
                    elect_policy.elect_for_preferred_replica(assignment, isr, live_replicas)
                },
            )
        })
        .collect())
}

/// Hands leadership off brokers in controlled shutdown.
///
/// Shutting-down brokers still count as live in the reported replicas but
/// cannot become leader, and are removed from the ISR of every elected record.
pub fn elect_leader_for_controlled_shutdown(
    cluster_state: &dyn ClusterState,
    elect_policy: &dyn ElectPolicy,
    partitions: &[(TopicPartition, Option<LeaderAndIsr>)],
    deprioritized_replicas: Option<&str>,
) -> ElectionResult<Vec<ElectionOutcome>> {
    let deprioritized = DeprioritizedSet::parse_optional(deprioritized_replicas)?;
    let shutting_down = cluster_state.shutting_down_broker_ids();
    debug!(
        "Controlled shutdown election for {} partitions, shutting down brokers {:?}",
        partitions.len(),
        shutting_down
    );

    Ok(partitions
        .iter()
        .map(|(topic_partition, leader_and_isr)| {
            let plan = ElectionPlan {
                mode: ElectionMode::ControlledShutdown,
                priority_list: deprioritized.prioritize(&cluster_state.current_assignment(topic_partition)),
                include_shutting_down: true,
                isr_rule: IsrRule::RemoveShuttingDown(shutting_down.clone()),
            };
            run_election(
                cluster_state,
                topic_partition,
                leader_and_isr.as_ref(),
                plan,
                |assignment, isr, live_or_shutting_down| {
                    elect_policy.elect_for_controlled_shutdown(assignment, isr, live_or_shutting_down, &shutting_down)
                },
            )
        })
        .collect())
}
