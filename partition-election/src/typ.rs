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

//! Core data types shared by the election modes.

use std::fmt;

use cheetah_string::CheetahString;
use serde::Deserialize;
use serde::Serialize;

/// Identifier of a broker holding a replica.
pub type ReplicaId = i32;

/// A single partition of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicPartition {
    topic: CheetahString,
    partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<CheetahString>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn partition(&self) -> i32 {
        self.partition
    }
}

impl fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.topic(), self.partition)
    }
}

/// Persisted replica assignment of a partition.
///
/// While a reassignment is in flight the assignment lists the union of the
/// original and target replicas, with `adding_replicas` and
/// `removing_replicas` describing the move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaAssignment {
    replicas: Vec<ReplicaId>,
    adding_replicas: Vec<ReplicaId>,
    removing_replicas: Vec<ReplicaId>,
}

impl ReplicaAssignment {
    pub fn new(replicas: Vec<ReplicaId>) -> Self {
        Self {
            replicas,
            adding_replicas: Vec::new(),
            removing_replicas: Vec::new(),
        }
    }

    pub fn with_reassignment(
        replicas: Vec<ReplicaId>,
        adding_replicas: Vec<ReplicaId>,
        removing_replicas: Vec<ReplicaId>,
    ) -> Self {
        Self {
            replicas,
            adding_replicas,
            removing_replicas,
        }
    }

    pub fn replicas(&self) -> &[ReplicaId] {
        &self.replicas
    }

    pub fn adding_replicas(&self) -> &[ReplicaId] {
        &self.adding_replicas
    }

    pub fn removing_replicas(&self) -> &[ReplicaId] {
        &self.removing_replicas
    }

    /// Replicas the partition ends up with once the reassignment completes.
    pub fn target_replicas(&self) -> Vec<ReplicaId> {
        self.replicas
            .iter()
            .copied()
            .filter(|replica| !self.removing_replicas.contains(replica))
            .collect()
    }

    pub fn is_being_reassigned(&self) -> bool {
        !self.adding_replicas.is_empty() || !self.removing_replicas.is_empty()
    }
}

/// Leadership record of one partition.
///
/// `leader_epoch` and `partition_epoch` are version tokens owned by the
/// persistence layer; election never touches them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderAndIsr {
    leader: ReplicaId,
    leader_epoch: i32,
    isr: Vec<ReplicaId>,
    partition_epoch: i32,
}

impl LeaderAndIsr {
    pub fn new(leader: ReplicaId, isr: Vec<ReplicaId>) -> Self {
        Self {
            leader,
            leader_epoch: 0,
            isr,
            partition_epoch: 0,
        }
    }

    pub fn with_epochs(leader: ReplicaId, leader_epoch: i32, isr: Vec<ReplicaId>, partition_epoch: i32) -> Self {
        Self {
            leader,
            leader_epoch,
            isr,
            partition_epoch,
        }
    }

    pub fn leader(&self) -> ReplicaId {
        self.leader
    }

    pub fn leader_epoch(&self) -> i32 {
        self.leader_epoch
    }

    pub fn isr(&self) -> &[ReplicaId] {
        &self.isr
    }

    pub fn partition_epoch(&self) -> i32 {
        self.partition_epoch
    }

    /// Same record with a different leader; the ISR is kept as is.
    pub fn new_leader(&self, leader: ReplicaId) -> Self {
        Self {
            leader,
            ..self.clone()
        }
    }

    pub fn new_leader_and_isr(&self, leader: ReplicaId, isr: Vec<ReplicaId>) -> Self {
        Self {
            leader,
            leader_epoch: self.leader_epoch,
            isr,
            partition_epoch: self.partition_epoch,
        }
    }
}

/// What triggered an election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectionMode {
    Offline,
    Reassignment,
    PreferredReplica,
    ControlledShutdown,
}

impl fmt::Display for ElectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => write!(f, "offline"),
            Self::Reassignment => write!(f, "reassignment"),
            Self::PreferredReplica => write!(f, "preferred_replica"),
            Self::ControlledShutdown => write!(f, "controlled_shutdown"),
        }
    }
}

/// Result of running an election for one partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionDecision {
    /// A leader was chosen; carries the record to persist.
    Elected(LeaderAndIsr),
    /// The partition had a leadership record but no replica qualified.
    NoEligibleLeader,
    /// The partition had no leadership record, so no election took place.
    NoPriorState,
}

/// Per-partition outcome handed back to the caller for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionOutcome {
    topic_partition: TopicPartition,
    decision: ElectionDecision,
    live_replicas: Vec<ReplicaId>,
}

impl ElectionOutcome {
    pub fn new(topic_partition: TopicPartition, decision: ElectionDecision, live_replicas: Vec<ReplicaId>) -> Self {
        Self {
            topic_partition,
            decision,
            live_replicas,
        }
    }

    pub fn topic_partition(&self) -> &TopicPartition {
        &self.topic_partition
    }

    pub fn decision(&self) -> &ElectionDecision {
        &self.decision
    }

    /// Replicas observed live when the decision was made, in priority order.
    pub fn live_replicas(&self) -> &[ReplicaId] {
        &self.live_replicas
    }

    pub fn leader_and_isr(&self) -> Option<&LeaderAndIsr> {
        match &self.decision {
            ElectionDecision::Elected(leader_and_isr) => Some(leader_and_isr),
            _ => None,
        }
    }

    pub fn is_elected(&self) -> bool {
        matches!(self.decision, ElectionDecision::Elected(_))
    }
}

/// One partition of an offline election batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineElectionRequest {
    pub topic_partition: TopicPartition,
    pub leader_and_isr: Option<LeaderAndIsr>,
    pub unclean_leader_election_allowed: bool,
}

impl OfflineElectionRequest {
    pub fn new(
        topic_partition: TopicPartition,
        leader_and_isr: Option<LeaderAndIsr>,
        unclean_leader_election_allowed: bool,
    ) -> Self {
        Self {
            topic_partition,
            leader_and_isr,
            unclean_leader_election_allowed,
        }
    }
}
