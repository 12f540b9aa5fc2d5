//! Profiles loaded from documents, activated, and evaluated from many threads

mod common;

use common::RoadEdge;
use edge_priority::{
    road, AttributeSet, CompileError, Direction, Profile, ProfileError, ProfileStore,
};
use std::sync::Arc;
use std::thread;

const QUIET_CAR: &str = "
name: quiet_car
priority:
  road_class:
    MOTORWAY: 0.4
    PRIMARY: 0.7
  road_environment:
    BRIDGE: 0.5
    TUNNEL: 0.8
  max_speed:
    '<30': 0.2
    '<100': 0.5
";

#[test]
fn test_yaml_profile_scenario() {
    let registry = AttributeSet::road_defaults();
    let store = ProfileStore::new();
    let profile = Profile::from_yaml_str(QUIET_CAR).unwrap();
    let evaluator = store.activate(&profile, &registry).unwrap();

    let edge = RoadEdge::new(&registry)
        .with(road::ROAD_CLASS, "PRIMARY")
        .with(road::ROAD_ENVIRONMENT, "BRIDGE")
        .with_max_speed(110.0, 50.0)
        .build();

    let forward = evaluator.evaluate(&edge, Direction::Forward);
    let backward = evaluator.evaluate(&edge, Direction::Backward);
    assert!((forward - 0.35).abs() < 1e-12);
    assert!((backward - 0.175).abs() < 1e-12);

    let slow = RoadEdge::new(&registry).with_max_speed(20.0, 20.0).build();
    assert_eq!(evaluator.evaluate_both(&slow), (0.2, 0.2));
}

#[test]
fn test_json_profile_rejected_with_message() {
    let registry = AttributeSet::road_defaults();
    let store = ProfileStore::new();
    let profile = Profile::from_json_str(
        r#"{ "name": "bad", "priority": { "road_class": { "*": 1.1 } } }"#,
    )
    .unwrap();

    let err = store.activate(&profile, &registry).unwrap_err();
    assert!(err
        .to_string()
        .contains("priority.road_class cannot be bigger than 1.0, was 1.1"));
    assert!(store.get("bad").is_none());
}

#[test]
fn test_compile_errors_convert_into_profile_errors() {
    let registry = AttributeSet::road_defaults();
    let profile = Profile::from_json_str(
        r#"{ "name": "bad", "priority": { "lanes": { "*": 0.5 } } }"#,
    )
    .unwrap();

    let result: Result<(), ProfileError> = edge_priority::compile(&profile.priority, &registry)
        .map(|_| ())
        .map_err(Into::into);
    match result {
        Err(ProfileError::Compile(CompileError::UnknownAttribute { name })) => {
            assert_eq!(name, "lanes")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_profile_file_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("quiet_car.yml"), QUIET_CAR).unwrap();

    let path = Profile::locate("quiet_car", dir.path()).unwrap();
    let profile = Profile::from_path(path).unwrap();

    let store = ProfileStore::new();
    store
        .activate(&profile, &AttributeSet::road_defaults())
        .unwrap();
    assert_eq!(store.list(), vec!["quiet_car".to_string()]);
}

#[test]
fn test_shared_evaluator_gives_same_answer_on_every_thread() {
    let registry = AttributeSet::road_defaults();
    let store = ProfileStore::new();
    let profile = Profile::from_yaml_str(QUIET_CAR).unwrap();
    let evaluator = store.activate(&profile, &registry).unwrap();

    let edges = Arc::new(vec![
        RoadEdge::new(&registry).with(road::ROAD_CLASS, "MOTORWAY").build(),
        RoadEdge::new(&registry)
            .with(road::ROAD_ENVIRONMENT, "TUNNEL")
            .with_max_speed(120.0, 25.0)
            .build(),
        RoadEdge::new(&registry).with_max_speed(200.0, 200.0).build(),
    ]);
    let expected: Vec<(f64, f64)> = edges.iter().map(|e| evaluator.evaluate_both(e)).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let evaluator = Arc::clone(&evaluator);
            let edges = Arc::clone(&edges);
            thread::spawn(move || {
                (0..1_000)
                    .map(|_| edges.iter().map(|e| evaluator.evaluate_both(e)).collect::<Vec<_>>())
                    .last()
                    .unwrap_or_default()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
