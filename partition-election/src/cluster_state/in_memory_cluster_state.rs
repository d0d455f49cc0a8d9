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

use dashmap::DashMap;
use dashmap::DashSet;
use tracing::debug;
use tracing::info;

use crate::cluster_state::ClusterState;
use crate::typ::ReplicaAssignment;
use crate::typ::ReplicaId;
use crate::typ::TopicPartition;

/// Cluster state held in concurrent maps.
///
/// Registered brokers stay in `live_brokers` while they shut down; the
/// shutting-down ones are additionally tracked in `shutting_down_brokers`.
/// A replica is offline when its broker is gone or when the partition sits on
/// one of the broker's failed log directories.
///
/// # Thread Safety
///
/// All methods take `&self` and can be called from multiple threads.
#[derive(Debug, Default)]
pub struct InMemoryClusterState {
    live_brokers: DashSet<ReplicaId>,
    shutting_down_brokers: DashSet<ReplicaId>,
    assignments: DashMap<TopicPartition, ReplicaAssignment>,
    /// broker id -> partitions on offline log directories of that broker
    replicas_on_offline_dirs: DashMap<ReplicaId, HashSet<TopicPartition>>,
}

impl InMemoryClusterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_live_brokers(&self, broker_ids: impl IntoIterator<Item = ReplicaId>) {
        for broker_id in broker_ids {
            info!("Broker {} registered as live", broker_id);
            self.live_brokers.insert(broker_id);
        }
    }

    /// Removes a broker entirely, including any shutdown bookkeeping.
    pub fn remove_live_broker(&self, broker_id: ReplicaId) {
        self.live_brokers.remove(&broker_id);
        self.shutting_down_brokers.remove(&broker_id);
        self.replicas_on_offline_dirs.remove(&broker_id);
        info!("Broker {} removed from live brokers", broker_id);
    }

    /// Marks a live broker as shutting down. Returns false when the broker is
    /// not registered.
    pub fn begin_controlled_shutdown(&self, broker_id: ReplicaId) -> bool {
        if !self.live_brokers.contains(&broker_id) {
            return false;
        }
        info!("Broker {} entered controlled shutdown", broker_id);
        self.shutting_down_brokers.insert(broker_id);
        true
    }

    pub fn set_assignment(&self, topic_partition: TopicPartition, assignment: ReplicaAssignment) {
        debug!("Assignment of {} set to {:?}", topic_partition, assignment);
        self.assignments.insert(topic_partition, assignment);
    }

    pub fn assignment(&self, topic_partition: &TopicPartition) -> Option<ReplicaAssignment> {
        self.assignments.get(topic_partition).map(|entry| entry.value().clone())
    }

    /// Records that `broker_id` lost the log directory holding `topic_partition`.
    pub fn mark_replica_offline(&self, broker_id: ReplicaId, topic_partition: TopicPartition) {
        self.replicas_on_offline_dirs
            .entry(broker_id)
            .or_default()
            .insert(topic_partition);
    }

    /// Brokers that are registered and not shutting down.
    pub fn live_broker_ids(&self) -> HashSet<ReplicaId> {
        self.live_brokers
            .iter()
            .map(|broker_id| *broker_id)
            .filter(|broker_id| !self.shutting_down_brokers.contains(broker_id))
            .collect()
    }

    pub fn live_or_shutting_down_broker_ids(&self) -> HashSet<ReplicaId> {
        self.live_brokers.iter().map(|broker_id| *broker_id).collect()
    }

    fn is_on_offline_dir(&self, replica: ReplicaId, topic_partition: &TopicPartition) -> bool {
        self.replicas_on_offline_dirs
            .get(&replica)
            .is_some_and(|partitions| partitions.contains(topic_partition))
    }
}

impl ClusterState for InMemoryClusterState {
    fn current_assignment(&self, topic_partition: &TopicPartition) -> Vec<ReplicaId> {
        self.assignments
            .get(topic_partition)
            .map(|assignment| assignment.replicas().to_vec())
            .unwrap_or_default()
    }

    fn target_assignment(&self, topic_partition: &TopicPartition) -> Vec<ReplicaId> {
        self.assignments
            .get(topic_partition)
            .map(|assignment| assignment.target_replicas())
            .unwrap_or_default()
    }

    fn is_replica_online(
        &self,
        replica: ReplicaId,
        topic_partition: &TopicPartition,
        include_shutting_down: bool,
    ) -> bool {
        let broker_online = if include_shutting_down {
            self.live_brokers.contains(&replica)
        } else {
            self.live_brokers.contains(&replica) && !self.shutting_down_brokers.contains(&replica)
        };
        broker_online && !self.is_on_offline_dir(replica, topic_partition)
    }

    fn shutting_down_broker_ids(&self) -> HashSet<ReplicaId> {
        self.shutting_down_brokers.iter().map(|broker_id| *broker_id).collect()
    }
}
