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

//! Example: walking one partition through every election mode
//!
//! This example demonstrates how to:
//! 1. Build an in-memory cluster view
//! 2. Configure deprioritized replicas
//! 3. Run offline, preferred replica, controlled shutdown and reassignment elections
//!
//! Run with:
//! ```bash
//! cargo run --example election_walkthrough
//! ```

use std::sync::Arc;

use partition_election::log::init_logger;
use partition_election::DefaultElectPolicy;
use partition_election::DynamicElectionConfig;
use partition_election::ElectionConfig;
use partition_election::ElectionOutcome;
use partition_election::ElectionResult;
use partition_election::InMemoryClusterState;
use partition_election::LeaderAndIsr;
use partition_election::PartitionLeaderElector;
use partition_election::ReplicaAssignment;
use partition_election::TopicPartition;
use tracing::info;

fn main() -> ElectionResult<()> {
    init_logger();

    let tp = TopicPartition::new("payments", 0);
    let cluster_state = Arc::new(InMemoryClusterState::new());
    cluster_state.add_live_brokers([1, 2, 3]);
    cluster_state.set_assignment(tp.clone(), ReplicaAssignment::new(vec![0, 1, 2, 3]));

    // Broker 1 runs on smaller hardware.
    let config = DynamicElectionConfig::new(ElectionConfig {
        deprioritized_replicas: "1".to_string(),
        unclean_leader_election_enable: false,
    });
    let elector = PartitionLeaderElector::new(cluster_state.clone(), Arc::new(DefaultElectPolicy::new()), config);

    // Broker 0 led the partition and is gone.
    let mut record = LeaderAndIsr::with_epochs(0, 5, vec![0, 1, 2], 17);
    info!("Offline election after broker 0 failed");
    let outcomes = elector.elect_for_offline(&[(tp.clone(), Some(record.clone()))])?;
    record = report(&outcomes[0]).unwrap_or(record);

    info!("Broker 0 is back, restoring the preferred leader");
    cluster_state.add_live_brokers([0]);
    let outcomes = elector.elect_for_preferred_replica(&[(tp.clone(), Some(record.clone()))])?;
    record = report(&outcomes[0]).unwrap_or(record);

    info!("Broker 0 shuts down gracefully");
    cluster_state.begin_controlled_shutdown(0);
    let outcomes = elector.elect_for_controlled_shutdown(&[(tp.clone(), Some(record.clone()))])?;
    record = report(&outcomes[0]).unwrap_or(record);

    info!("Moving the partition off broker 0 and 2");
    cluster_state.remove_live_broker(0);
    cluster_state.set_assignment(
        tp.clone(),
        ReplicaAssignment::with_reassignment(vec![0, 1, 2, 3], vec![3], vec![0, 2]),
    );
    let outcomes = elector.elect_for_reassignment(&[(tp, Some(record.clone()))])?;
    report(&outcomes[0]);

    Ok(())
}

fn report(outcome: &ElectionOutcome) -> Option<LeaderAndIsr> {
    match outcome.leader_and_isr() {
        Some(leader_and_isr) => {
            info!(
                "  {} -> leader {}, ISR {:?}, live {:?}",
                outcome.topic_partition(),
                leader_and_isr.leader(),
                leader_and_isr.isr(),
                outcome.live_replicas()
            );
            Some(leader_and_isr.clone())
        }
        None => {
            info!(
                "  {} -> {:?}, live {:?}",
                outcome.topic_partition(),
                outcome.decision(),
                outcome.live_replicas()
            );
            None
        }
    }
}
