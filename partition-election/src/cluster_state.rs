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

//! Read-only view of cluster membership and replica placement consulted by
//! the election modes.

pub mod in_memory_cluster_state;

use std::collections::HashSet;

pub use in_memory_cluster_state::InMemoryClusterState;

use crate::typ::ReplicaId;
use crate::typ::TopicPartition;

#[cfg_attr(test, mockall::automock)]
pub trait ClusterState: Send + Sync {
    /// Current replica assignment of the partition in priority order.
    /// Unknown partitions have an empty assignment.
    fn current_assignment(&self, topic_partition: &TopicPartition) -> Vec<ReplicaId>;

    /// Replicas the partition is being moved to. Equal to the current
    /// assignment when no reassignment is in flight.
    fn target_assignment(&self, topic_partition: &TopicPartition) -> Vec<ReplicaId>;

    /// Whether `replica` can serve `topic_partition` right now.
    ///
    /// Brokers in controlled shutdown count as online only when
    /// `include_shutting_down` is set.
    fn is_replica_online(&self, replica: ReplicaId, topic_partition: &TopicPartition, include_shutting_down: bool)
        -> bool;

    /// Brokers currently in controlled shutdown.
    fn shutting_down_broker_ids(&self) -> HashSet<ReplicaId>;
}
