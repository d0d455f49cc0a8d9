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

//! End-to-end election scenarios through the public API.

use std::collections::HashSet;
use std::sync::Arc;

use partition_election::elect_leader_for_controlled_shutdown;
use partition_election::elect_leader_for_offline;
use partition_election::elect_leader_for_preferred_replica;
use partition_election::elect_leader_for_reassign;
use partition_election::prioritize;
use partition_election::ClusterState;
use partition_election::DefaultElectPolicy;
use partition_election::DeprioritizedSet;
use partition_election::DynamicElectionConfig;
use partition_election::ElectionConfig;
use partition_election::ElectionDecision;
use partition_election::ElectionError;
use partition_election::ElectionResult;
use partition_election::InMemoryClusterState;
use partition_election::LeaderAndIsr;
use partition_election::OfflineElectionRequest;
use partition_election::PartitionLeaderElector;
use partition_election::ReplicaAssignment;
use partition_election::ReplicaId;
use partition_election::TopicPartition;

fn tp(partition: i32) -> TopicPartition {
    TopicPartition::new("orders", partition)
}

fn cluster(live: &[ReplicaId], assignment: &[ReplicaId]) -> InMemoryClusterState {
    let state = InMemoryClusterState::new();
    state.add_live_brokers(live.iter().copied());
    state.set_assignment(tp(0), ReplicaAssignment::new(assignment.to_vec()));
    state
}

#[test]
fn test_prioritize_empty_list() {
    assert_eq!(prioritize(&[0, 1, 2], "").unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_prioritize_all_deprioritized() {
    assert_eq!(prioritize(&[0, 1, 2], "1:2:0").unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_prioritize_partial() {
    assert_eq!(prioritize(&[0, 1, 2, 3], "1:3").unwrap(), vec![0, 2, 1, 3]);
}

#[test]
fn test_prioritize_properties() {
    let assignments: Vec<Vec<ReplicaId>> = vec![
        vec![],
        vec![5],
        vec![0, 1, 2],
        vec![3, 1, 4, 1, 5],
        vec![9, 8, 7, 6, 5, 4],
    ];
    let lists = ["", "1", "1:5", "9:4:7", "3:1:4:5", "0:1:2:3:4:5:6:7:8:9", "42"];

    for assignment in &assignments {
        for list in lists {
            let set = DeprioritizedSet::parse(list).unwrap();
            let result = prioritize(assignment, list).unwrap();

            // same multiset
            let mut sorted_in = assignment.clone();
            let mut sorted_out = result.clone();
            sorted_in.sort_unstable();
            sorted_out.sort_unstable();
            assert_eq!(sorted_in, sorted_out, "assignment {assignment:?} list {list}");

            // preferred group first, each group in original order
            let preferred: Vec<ReplicaId> = assignment.iter().copied().filter(|r| !set.contains(*r)).collect();
            let deprioritized: Vec<ReplicaId> = assignment.iter().copied().filter(|r| set.contains(*r)).collect();
            assert_eq!(result[..preferred.len()], preferred[..]);
            assert_eq!(result[preferred.len()..], deprioritized[..]);

            // uniform predicate is the identity
            if preferred.is_empty() || deprioritized.is_empty() {
                assert_eq!(&result, assignment);
            }
        }
    }
}

#[test]
fn test_prioritize_rejects_malformed_list() {
    let err = prioritize(&[0, 1], "1:b").unwrap_err();
    assert!(matches!(err, ElectionError::ConfigParse { .. }));
}

fn leader_preference(assignment: &[ReplicaId], deprioritized_replicas: &str) -> ElectionResult<ReplicaId> {
    let ordered = prioritize(assignment, deprioritized_replicas)?;
    Ok(ordered.first().copied().unwrap_or(-1))
}

#[test]
fn test_config_parse_error_propagates_through_question_mark() {
    assert_eq!(leader_preference(&[0, 1, 2], "0").unwrap(), 1);

    match leader_preference(&[0, 1, 2], "1: :2").unwrap_err() {
        ElectionError::ConfigParse { token, list } => {
            assert_eq!(token, " ");
            assert_eq!(list, "1: :2");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(leader_preference(&[0, 1, 2], " 1 ").unwrap_err().is_config_parse());
}

#[test]
fn test_offline_clean_election_shrinks_isr() {
    let state = cluster(&[1, 2], &[0, 1, 2]);
    let requests = vec![OfflineElectionRequest::new(
        tp(0),
        Some(LeaderAndIsr::new(0, vec![0, 1])),
        false,
    )];

    let outcomes = elect_leader_for_offline(&state, &DefaultElectPolicy::new(), &requests, None).unwrap();

    let leader_and_isr = outcomes[0].leader_and_isr().unwrap();
    assert_eq!(leader_and_isr.leader(), 1);
    assert_eq!(leader_and_isr.isr(), &[1]);
    assert_eq!(outcomes[0].live_replicas(), &[1, 2]);
}

#[test]
fn test_offline_unclean_election_resets_isr() {
    let state = cluster(&[1, 2], &[0, 2, 1]);
    let requests = vec![OfflineElectionRequest::new(tp(0), Some(LeaderAndIsr::new(0, vec![0])), true)];

    let outcomes = elect_leader_for_offline(&state, &DefaultElectPolicy::new(), &requests, None).unwrap();

    let leader_and_isr = outcomes[0].leader_and_isr().unwrap();
    assert_eq!(leader_and_isr.leader(), 2);
    assert_eq!(leader_and_isr.isr(), &[2]);
}

#[test]
fn test_offline_unclean_disabled_leaves_partition_leaderless() {
    let state = cluster(&[1, 2], &[0, 1, 2]);
    let requests = vec![OfflineElectionRequest::new(tp(0), Some(LeaderAndIsr::new(0, vec![0])), false)];

    let outcomes = elect_leader_for_offline(&state, &DefaultElectPolicy::new(), &requests, None).unwrap();

    assert_eq!(outcomes[0].decision(), &ElectionDecision::NoEligibleLeader);
    assert_eq!(outcomes[0].live_replicas(), &[1, 2]);
}

#[test]
fn test_offline_without_prior_state_reports_live_replicas() {
    let state = cluster(&[0, 2], &[0, 1, 2]);
    let requests = vec![OfflineElectionRequest::new(tp(0), None, true)];

    let outcomes = elect_leader_for_offline(&state, &DefaultElectPolicy::new(), &requests, None).unwrap();

    assert_eq!(outcomes[0].decision(), &ElectionDecision::NoPriorState);
    assert_eq!(outcomes[0].live_replicas(), &[0, 2]);
}

#[test]
fn test_offline_excludes_shutting_down_brokers() {
    let state = cluster(&[0, 1, 2], &[0, 1, 2]);
    state.begin_controlled_shutdown(0);
    let requests = vec![OfflineElectionRequest::new(
        tp(0),
        Some(LeaderAndIsr::new(0, vec![0, 1, 2])),
        false,
    )];

    let outcomes = elect_leader_for_offline(&state, &DefaultElectPolicy::new(), &requests, None).unwrap();

    let leader_and_isr = outcomes[0].leader_and_isr().unwrap();
    assert_eq!(leader_and_isr.leader(), 1);
    assert_eq!(leader_and_isr.isr(), &[1, 2]);
    assert_eq!(outcomes[0].live_replicas(), &[1, 2]);
}

#[test]
fn test_offline_deprioritized_replica_leads_only_as_last_resort() {
    let state = cluster(&[0, 1, 2], &[0, 1, 2]);
    let record = LeaderAndIsr::new(2, vec![0, 1]);
    let requests = vec![OfflineElectionRequest::new(tp(0), Some(record), false)];
    let policy = DefaultElectPolicy::new();

    let outcomes = elect_leader_for_offline(&state, &policy, &requests, Some("0")).unwrap();
    assert_eq!(outcomes[0].leader_and_isr().map(|l| l.leader()), Some(1));

    let outcomes = elect_leader_for_offline(&state, &policy, &requests, Some("0:1")).unwrap();
    assert_eq!(outcomes[0].leader_and_isr().map(|l| l.leader()), Some(0));
}

#[test]
fn test_offline_isr_shrink_invariant() {
    let state = cluster(&[1, 3, 4], &[0, 1, 2, 3, 4]);
    let prior_isr = vec![4, 0, 3, 2];
    let requests = vec![OfflineElectionRequest::new(
        tp(0),
        Some(LeaderAndIsr::new(0, prior_isr.clone())),
        false,
    )];

    let outcomes = elect_leader_for_offline(&state, &DefaultElectPolicy::new(), &requests, None).unwrap();

    let leader_and_isr = outcomes[0].leader_and_isr().unwrap();
    assert!(prior_isr.contains(&leader_and_isr.leader()));
    for replica in leader_and_isr.isr() {
        assert!(prior_isr.contains(replica));
        assert!(state.is_replica_online(*replica, &tp(0), false));
    }
    assert_eq!(leader_and_isr.isr(), &[4, 3]);
}

#[test]
fn test_reassignment_keeps_isr_and_uses_target_replicas() {
    let state = InMemoryClusterState::new();
    state.add_live_brokers([0, 1, 2, 3, 4]);
    state.set_assignment(
        tp(0),
        ReplicaAssignment::with_reassignment(vec![0, 1, 2, 3, 4], vec![3, 4], vec![0, 1]),
    );
    let record = LeaderAndIsr::with_epochs(0, 12, vec![0, 1, 2, 3, 4], 40);

    let outcomes = elect_leader_for_reassign(
        &state,
        &DefaultElectPolicy::new(),
        &[(tp(0), Some(record.clone()))],
        None,
    )
    .unwrap();

    let leader_and_isr = outcomes[0].leader_and_isr().unwrap();
    assert_eq!(leader_and_isr.leader(), 2);
    assert_eq!(leader_and_isr.isr(), record.isr());
    assert_eq!(leader_and_isr.leader_epoch(), 12);
    assert_eq!(leader_and_isr.partition_epoch(), 40);
    assert_eq!(outcomes[0].live_replicas(), &[2, 3, 4]);
}

#[test]
fn test_reassignment_with_deprioritized_target() {
    let state = InMemoryClusterState::new();
    state.add_live_brokers([2, 3, 4]);
    state.set_assignment(
        tp(0),
        ReplicaAssignment::with_reassignment(vec![0, 2, 3, 4], vec![3, 4], vec![0]),
    );
    let record = LeaderAndIsr::new(0, vec![0, 2, 3, 4]);

    let outcomes = elect_leader_for_reassign(
        &state,
        &DefaultElectPolicy::new(),
        &[(tp(0), Some(record))],
        Some("2"),
    )
    .unwrap();

    assert_eq!(outcomes[0].leader_and_isr().map(|l| l.leader()), Some(3));
    assert_eq!(outcomes[0].live_replicas(), &[3, 4, 2]);
}

#[test]
fn test_reassignment_no_target_in_isr() {
    let state = InMemoryClusterState::new();
    state.add_live_brokers([0, 3, 4]);
    state.set_assignment(
        tp(0),
        ReplicaAssignment::with_reassignment(vec![0, 3, 4], vec![3, 4], vec![0]),
    );

    let outcomes = elect_leader_for_reassign(
        &state,
        &DefaultElectPolicy::new(),
        &[(tp(0), Some(LeaderAndIsr::new(0, vec![0])))],
        None,
    )
    .unwrap();

    assert_eq!(outcomes[0].decision(), &ElectionDecision::NoEligibleLeader);
    assert_eq!(outcomes[0].live_replicas(), &[3, 4]);
}

#[test]
fn test_preferred_replica_restores_first_replica() {
    let state = cluster(&[0, 1, 2], &[0, 1, 2]);
    let record = LeaderAndIsr::new(2, vec![2, 1, 0]);

    let outcomes = elect_leader_for_preferred_replica(
        &state,
        &DefaultElectPolicy::new(),
        &[(tp(0), Some(record.clone()))],
        None,
    )
    .unwrap();

    let leader_and_isr = outcomes[0].leader_and_isr().unwrap();
    assert_eq!(leader_and_isr.leader(), 0);
    assert_eq!(leader_and_isr.isr(), record.isr());
}

#[test]
fn test_preferred_replica_skips_out_of_sync_preferred() {
    let state = cluster(&[0, 1, 2], &[0, 1, 2]);

    let outcomes = elect_leader_for_preferred_replica(
        &state,
        &DefaultElectPolicy::new(),
        &[(tp(0), Some(LeaderAndIsr::new(2, vec![1, 2])))],
        None,
    )
    .unwrap();

    assert_eq!(outcomes[0].leader_and_isr(), Some(&LeaderAndIsr::new(1, vec![1, 2])));
}

#[test]
fn test_controlled_shutdown_removes_shutting_down_from_isr() {
    let state = cluster(&[0, 1, 2], &[1, 0, 2]);
    state.begin_controlled_shutdown(1);

    let outcomes = elect_leader_for_controlled_shutdown(
        &state,
        &DefaultElectPolicy::new(),
        &[(tp(0), Some(LeaderAndIsr::new(1, vec![0, 1, 2])))],
        None,
    )
    .unwrap();

    let leader_and_isr = outcomes[0].leader_and_isr().unwrap();
    assert_eq!(leader_and_isr.leader(), 0);
    assert_eq!(leader_and_isr.isr(), &[0, 2]);
    assert_eq!(outcomes[0].live_replicas(), &[1, 0, 2]);
}

#[test]
fn test_controlled_shutdown_invariant_across_batch() {
    let state = InMemoryClusterState::new();
    state.add_live_brokers([0, 1, 2, 3]);
    state.begin_controlled_shutdown(1);
    state.begin_controlled_shutdown(3);
    let shutting_down = state.shutting_down_broker_ids();

    let mut partitions = Vec::new();
    for (partition, replicas) in [(0, vec![1, 2, 3]), (1, vec![3, 1]), (2, vec![0, 1, 2, 3])] {
        state.set_assignment(tp(partition), ReplicaAssignment::new(replicas.clone()));
        partitions.push((tp(partition), Some(LeaderAndIsr::new(replicas[0], replicas))));
    }

    let outcomes =
        elect_leader_for_controlled_shutdown(&state, &DefaultElectPolicy::new(), &partitions, None).unwrap();

    for outcome in &outcomes {
        if let Some(leader_and_isr) = outcome.leader_and_isr() {
            assert!(!shutting_down.contains(&leader_and_isr.leader()));
            assert!(leader_and_isr.isr().iter().all(|r| !shutting_down.contains(r)));
        }
    }
    assert_eq!(outcomes[0].leader_and_isr(), Some(&LeaderAndIsr::new(2, vec![2])));
    assert_eq!(outcomes[1].decision(), &ElectionDecision::NoEligibleLeader);
    assert_eq!(outcomes[1].live_replicas(), &[3, 1]);
    assert_eq!(outcomes[2].leader_and_isr(), Some(&LeaderAndIsr::new(0, vec![0, 2])));
}

#[test]
fn test_elector_end_to_end() {
    let cluster_state = Arc::new(InMemoryClusterState::new());
    cluster_state.add_live_brokers([0, 1, 2]);
    cluster_state.set_assignment(tp(0), ReplicaAssignment::new(vec![0, 1, 2]));
    cluster_state.set_assignment(tp(1), ReplicaAssignment::new(vec![1, 2, 0]));

    let config = DynamicElectionConfig::new(ElectionConfig {
        deprioritized_replicas: "1".to_string(),
        unclean_leader_election_enable: false,
    });
    let elector = PartitionLeaderElector::new(cluster_state.clone(), Arc::new(DefaultElectPolicy::new()), config);

    let partitions = vec![
        (tp(0), Some(LeaderAndIsr::new(0, vec![0, 1, 2]))),
        (tp(1), Some(LeaderAndIsr::new(0, vec![0, 1, 2]))),
    ];
    let outcomes = elector.elect_for_preferred_replica(&partitions).unwrap();
    assert_eq!(outcomes[0].leader_and_isr().map(|l| l.leader()), Some(0));
    assert_eq!(outcomes[1].leader_and_isr().map(|l| l.leader()), Some(2));

    cluster_state.begin_controlled_shutdown(0);
    let outcomes = elector.elect_for_controlled_shutdown(&partitions).unwrap();
    assert_eq!(outcomes[0].leader_and_isr(), Some(&LeaderAndIsr::new(2, vec![1, 2])));
    assert_eq!(outcomes[1].leader_and_isr(), Some(&LeaderAndIsr::new(2, vec![1, 2])));

    let live: HashSet<ReplicaId> = outcomes[0].live_replicas().iter().copied().collect();
    assert_eq!(live, HashSet::from([0, 1, 2]));
}

#[test]
fn test_outcome_serializes_to_json() {
    let state = cluster(&[1, 2], &[0, 1, 2]);
    let requests = vec![OfflineElectionRequest::new(
        tp(0),
        Some(LeaderAndIsr::with_epochs(0, 3, vec![0, 1], 8)),
        false,
    )];
    let outcomes = elect_leader_for_offline(&state, &DefaultElectPolicy::new(), &requests, None).unwrap();

    let json = serde_json::to_value(&outcomes[0]).unwrap();
    assert_eq!(json["liveReplicas"], serde_json::json!([1, 2]));
    assert_eq!(json["decision"]["Elected"]["leader"], 1);
    assert_eq!(json["decision"]["Elected"]["isr"], serde_json::json!([1]));
    assert_eq!(json["decision"]["Elected"]["leaderEpoch"], 3);
}
