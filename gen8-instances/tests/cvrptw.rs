use gen8_instances::{GenerationError, GeneratorConfig, Instance};

fn seed(value: u8) -> [u8; 32] {
    [value; 32]
}

#[test]
fn test_feasibility_invariants() {
    let config = GeneratorConfig::default();
    for &num_nodes in &[20, 50, 100] {
        for s in 0..3 {
            let instance = Instance::generate(&seed(s), num_nodes, &config).unwrap();
            assert_eq!(instance.num_nodes, num_nodes);
            assert_eq!(instance.node_positions.len(), num_nodes);
            for node in 0..num_nodes {
                let (x, y) = instance.node_positions[node];
                let (depot_x, depot_y) = instance.depot_position;
                let travel = (x - depot_x).hypot(y - depot_y);
                let (ready, due) = instance.time_windows[node];
                let min_ready = travel.ceil() as i32 + 1;
                let max_due = config.service_window
                    - ((travel + instance.service_durations[node] as f64).ceil() as i32 + 1);
                assert!(ready >= min_ready, "node {} opens before it is reachable", node);
                assert!(due <= max_due, "node {} closes too late to return", node);
                assert!(ready <= due, "node {} has an empty window", node);
            }
        }
    }
}

#[test]
fn test_demand_bounds() {
    let config = GeneratorConfig::default();
    for s in 0..5 {
        let instance = Instance::generate(&seed(s), 50, &config).unwrap();
        assert!(instance
            .demands
            .iter()
            .all(|&demand| demand >= 1 && demand <= config.max_demand));
    }
}

#[test]
fn test_capacity_table() {
    let config = GeneratorConfig::default();
    for &(num_nodes, capacity) in &[(20, 70), (50, 100), (100, 200), (150, 500), (200, 700)] {
        let first = Instance::generate(&seed(1), num_nodes, &config).unwrap();
        let second = Instance::generate(&seed(2), num_nodes, &config).unwrap();
        assert_eq!(first.max_capacity, capacity);
        assert_eq!(second.max_capacity, capacity);
    }
}

#[test]
fn test_unsupported_graph_size() {
    let config = GeneratorConfig::default();
    let err = Instance::generate(&seed(0), 37, &config).unwrap_err();
    assert!(matches!(err, GenerationError::UnsupportedGraphSize(37)));
}

#[test]
fn test_depot_time_window_spans_horizon() {
    let config = GeneratorConfig::default();
    let instance = Instance::generate(&seed(4), 20, &config).unwrap();
    assert_eq!(instance.depot_time_window, (0, config.service_window));
    assert!(instance
        .service_durations
        .iter()
        .all(|&duration| duration == config.service_duration));
}

#[test]
fn test_same_seed_reproduces_instance() {
    let config = GeneratorConfig::default();
    let first = Instance::generate(&seed(11), 20, &config).unwrap();
    let second = Instance::generate(&seed(11), 20, &config).unwrap();
    assert_eq!(first, second);

    let other = Instance::generate(&seed(12), 20, &config).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_batch_uses_independent_seeds() {
    let config = GeneratorConfig::default();
    let batch = Instance::generate_batch(&seed(7), 20, 4, &config).unwrap();
    assert_eq!(batch.len(), 4);
    for instance in &batch {
        instance.validate(&config).unwrap();
    }
    for i in 0..batch.len() {
        for j in (i + 1)..batch.len() {
            assert_ne!(batch[i].seed, batch[j].seed);
        }
    }
}

#[test]
fn test_infeasible_horizon_is_rejected() {
    // A 12 unit service window cannot fit 10 units of service plus travel.
    let config = GeneratorConfig {
        service_window: 12,
        ..GeneratorConfig::default()
    };
    let err = Instance::generate(&seed(0), 20, &config).unwrap_err();
    assert!(matches!(err, GenerationError::InfeasibleInstance { .. }));
}

#[test]
fn test_distance_matrix() {
    let config = GeneratorConfig::default();
    let instance = Instance::generate(&seed(3), 20, &config).unwrap();
    let distances = instance.distance_matrix();
    assert_eq!(distances.dim(), (20, 20));
    for i in 0..20 {
        assert_eq!(distances[(i, i)], 0.0);
        for j in 0..20 {
            assert_eq!(distances[(i, j)], distances[(j, i)]);
        }
    }
}

#[test]
fn test_instance_json_round_trip() {
    let config = GeneratorConfig::default();
    let instance = Instance::generate(&seed(5), 20, &config).unwrap();
    let json = serde_json::to_string(&instance).unwrap();
    let parsed: Instance = serde_json::from_str(&json).unwrap();
    assert_eq!(instance, parsed);
}
