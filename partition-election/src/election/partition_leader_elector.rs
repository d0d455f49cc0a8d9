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

use std::sync::Arc;

use partition_election_error::ElectionResult;

use crate::cluster_state::ClusterState;
use crate::config::DynamicElectionConfig;
use crate::elect::elect_policy::ElectPolicy;
use crate::election::leader_election;
use crate::typ::ElectionOutcome;
use crate::typ::LeaderAndIsr;
use crate::typ::OfflineElectionRequest;
use crate::typ::TopicPartition;

/// Binds a cluster state view, an election policy and the dynamic
/// configuration together.
///
/// Every call reads the configuration afresh, so deprioritized replica
/// changes apply from the next batch on. The elector keeps no election state
/// of its own.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use partition_election::DefaultElectPolicy;
/// use partition_election::DynamicElectionConfig;
/// use partition_election::InMemoryClusterState;
/// use partition_election::LeaderAndIsr;
/// use partition_election::PartitionLeaderElector;
/// use partition_election::ReplicaAssignment;
/// use partition_election::TopicPartition;
///
/// let cluster_state = Arc::new(InMemoryClusterState::new());
/// cluster_state.add_live_brokers([1, 2]);
/// let tp = TopicPartition::new("orders", 0);
/// cluster_state.set_assignment(tp.clone(), ReplicaAssignment::new(vec![0, 1, 2]));
///
/// let elector = PartitionLeaderElector::new(
///     cluster_state,
///     Arc::new(DefaultElectPolicy::new()),
///     DynamicElectionConfig::default(),
/// );
/// let outcomes = elector
///     .elect_for_offline(&[(tp, Some(LeaderAndIsr::new(0, vec![0, 1])))])
///     .unwrap();
/// assert_eq!(outcomes[0].leader_and_isr(), Some(&LeaderAndIsr::new(1, vec![1])));
/// ```
#[derive(Clone)]
pub struct PartitionLeaderElector {
    cluster_state: Arc<dyn ClusterState>,
    elect_policy: Arc<dyn ElectPolicy>,
    config: DynamicElectionConfig,
}

impl PartitionLeaderElector {
    pub fn new(
        cluster_state: Arc<dyn ClusterState>,
        elect_policy: Arc<dyn ElectPolicy>,
        config: DynamicElectionConfig,
    ) -> Self {
        Self {
            cluster_state,
            elect_policy,
            config,
        }
    }

    pub fn config(&self) -> &DynamicElectionConfig {
        &self.config
    }

    /// Offline election using the configured unclean election setting for
    /// every partition.
    pub fn elect_for_offline(
        &self,
        partitions: &[(TopicPartition, Option<LeaderAndIsr>)],
    ) -> ElectionResult<Vec<ElectionOutcome>> {
        let config = self.config.snapshot();
        let requests: Vec<OfflineElectionRequest> = partitions
            .iter()
            .map(|(topic_partition, leader_and_isr)| {
                OfflineElectionRequest::new(
                    topic_partition.clone(),
                    leader_and_isr.clone(),
                    config.unclean_leader_election_enable,
                )
            })
            .collect();
        leader_election::elect_leader_for_offline(
            self.cluster_state.as_ref(),
            self.elect_policy.as_ref(),
            &requests,
            Some(&config.deprioritized_replicas),
        )
    }

    /// Offline election with a per-partition unclean election setting.
    pub fn elect_for_offline_requests(
        &self,
        requests: &[OfflineElectionRequest],
    ) -> ElectionResult<Vec<ElectionOutcome>> {
        let config = self.config.snapshot();
        leader_election::elect_leader_for_offline(
            self.cluster_state.as_ref(),
            self.elect_policy.as_ref(),
            requests,
            Some(&config.deprioritized_replicas),
        )
    }

    pub fn elect_for_reassignment(
        &self,
        partitions: &[(TopicPartition, Option<LeaderAndIsr>)],
    ) -> ElectionResult<Vec<ElectionOutcome>> {
        let config = self.config.snapshot();
        leader_election::elect_leader_for_reassign(
            self.cluster_state.as_ref(),
            self.elect_policy.as_ref(),
            partitions,
            Some(&config.deprioritized_replicas),
        )
    }

    pub fn elect_for_preferred_replica(
        &self,
        partitions: &[(TopicPartition, Option<LeaderAndIsr>)],
    ) -> ElectionResult<Vec<ElectionOutcome>> {
        let config = self.config.snapshot();
        leader_election::elect_leader_for_preferred_replica(
            self.cluster_state.as_ref(),
            self.elect_policy.as_ref(),
            partitions,
            Some(&config.deprioritized_replicas),
        )
    }

    pub fn elect_for_controlled_shutdown(
        &self,
        partitions: &[(TopicPartition, Option<LeaderAndIsr>)],
    ) -> ElectionResult<Vec<ElectionOutcome>> {
        let config = self.config.snapshot();
        leader_election::elect_leader_for_controlled_shutdown(
            self.cluster_state.as_ref(),
            self.elect_policy.as_ref(),
            partitions,
            Some(&config.deprioritized_replicas),
        )
    }
}
