//! Integration tests for the phyz identification stack.

use approx::assert_relative_eq;
use phyz::{
    FrictionTerms, IdentError, JointTable, MechanismConfig, ModelBuilder, RegressorEngine,
    RegressorReport, State,
    phyz_math::{DVec, GRAVITY, Mat3, SpatialInertia, SpatialTransform, Vec3},
    presets, rnea, signal, write_json, write_matrix_text,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Planar double pendulum: revolute about Z, gravity along -Y, rods of 1 m.
const DOUBLE_PENDULUM: &str = r#"{
    "name": "double_pendulum",
    "gravity": [0.0, -9.81, 0.0],
    "friction": { "viscous": true, "coulomb": true },
    "links": [
        {
            "name": "upper",
            "joint": { "type": "revolute", "damping": 0.1, "friction": 0.05 },
            "inertia": { "mass": 1.0, "com": [0.0, -0.5, 0.0], "inertia": [0.0833, 0.0, 0.0, 0.0, 0.0, 0.0833] }
        },
        {
            "name": "lower",
            "joint": { "type": "revolute", "xyz": [0.0, -1.0, 0.0], "damping": 0.1 },
            "inertia": { "mass": 1.0, "com": [0.0, -0.5, 0.0], "inertia": [0.0833, 0.0, 0.0, 0.0, 0.0, 0.0833] }
        }
    ]
}"#;

fn random_trajectory(seed: u64, n: usize, dof: usize) -> (JointTable, JointTable, JointTable) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = |amp: f64| JointTable::from_fn(n, dof, |_, _| rng.gen_range(-amp..amp));
    (table(2.5), table(1.5), table(3.0))
}

#[test]
fn test_pendulum_static_torque_from_regressor() {
    // Horizontal single pendulum at rest: tau = m g l/2.
    let model = ModelBuilder::new()
        .gravity(Vec3::new(0.0, -GRAVITY, 0.0))
        .add_revolute_body(
            "rod",
            -1,
            SpatialTransform::identity(),
            SpatialInertia::new(
                1.0,
                Vec3::new(0.5, 0.0, 0.0),
                Mat3::from_diagonal(&Vec3::new(0.0, 1.0 / 12.0, 1.0 / 12.0)),
            ),
        )
        .build();
    let engine = RegressorEngine::new("rod", model, FrictionTerms::none()).unwrap();
    let y = engine.compute_basic_regressor(&[0.0], &[0.0], &[0.0]).unwrap();
    let tau = &y * engine.basis().nominal(engine.model());
    assert_relative_eq!(tau[0], 0.5 * GRAVITY, epsilon = 1e-12);
}

#[test]
fn test_config_to_reduced_regressor() {
    let config = MechanismConfig::from_json_str(DOUBLE_PENDULUM).unwrap();
    let engine = RegressorEngine::from_config(&config).unwrap();
    assert_eq!(engine.dof(), 2);
    assert_eq!(engine.num_parameters(), 24);
    assert_eq!(engine.parameter_names()[10], "upper.fv");

    let (q, qd, qdd) = random_trajectory(17, 50, 2);
    let full = engine.compute_full_regressor(&q, &qd, &qdd).unwrap();
    assert_eq!(full.shape(), (100, 24));

    // Planar motion about Z only excites a handful of parameter combinations.
    let reduced = engine.compute_reduced_regressor(&q, &qd, &qdd, 1e-8).unwrap();
    assert!(reduced.ncols() < 24);
    let names = reduced.parameter_names(engine.basis());
    assert!(names.contains(&"upper.fv"));
    assert!(names.contains(&"lower.fc"));
    // Moments about the horizontal axes never appear in planar dynamics.
    assert!(!names.contains(&"upper.xy"));
    assert!(!names.contains(&"lower.yz"));
}

#[test]
fn test_full_regressor_reproduces_rnea_on_iiwa() {
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let pi = engine.basis().nominal(engine.model());
    let (q, qd, qdd) = random_trajectory(99, 25, 7);
    let y = engine.compute_full_regressor(&q, &qd, &qdd).unwrap();
    let tau = &y * &pi;
    for i in 0..25 {
        let state = State::from_slices(q.row(i), qd.row(i));
        let expected = rnea(engine.model(), &state, &DVec::from_column_slice(qdd.row(i)));
        for k in 0..7 {
            assert_relative_eq!(tau[7 * i + k], expected[k], epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_reduced_columns_still_explain_torques() {
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let (q, qd, qdd) = random_trajectory(5, 60, 7);
    let full = engine.compute_full_regressor(&q, &qd, &qdd).unwrap();
    let tau = &full * engine.basis().nominal(engine.model());

    let reduced = engine.compute_reduced_regressor(&q, &qd, &qdd, 1e-8).unwrap();
    let fit = reduced
        .matrix()
        .clone()
        .svd(true, true)
        .solve(&tau, 1e-12)
        .unwrap();
    let residual = reduced.matrix() * fit - &tau;
    assert!(
        residual.norm() <= 1e-6 * tau.norm(),
        "residual {} for |tau| {}",
        residual.norm(),
        tau.norm()
    );
}

#[test]
fn test_reduced_rank_stable_across_trajectories() {
    // The identifiable set is a property of the mechanism, not the data.
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let (q1, qd1, qdd1) = random_trajectory(1, 80, 7);
    let (q2, qd2, qdd2) = random_trajectory(2, 80, 7);
    let a = engine.compute_reduced_regressor(&q1, &qd1, &qdd1, 1e-8).unwrap();
    let b = engine.compute_reduced_regressor(&q2, &qd2, &qdd2, 1e-8).unwrap();
    assert_eq!(a.rank(), b.rank());
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let (q, qd, qdd) = random_trajectory(3, 10, 7);
    let reference = engine.compute_full_regressor(&q, &qd, &qdd).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.compute_full_regressor(&q, &qd, &qdd).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), reference);
        }
    });
}

#[test]
fn test_preprocessed_degrees_feed_engine() {
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let n = 40;
    let q_deg = JointTable::from_fn(n, 7, |i, j| {
        signal::wrap_to_180_deg(10.0 * i as f64 + 30.0 * j as f64)
    });
    let q = signal::deg_to_rad(&q_deg);
    assert!(q.as_slice().iter().all(|v| v.abs() <= std::f64::consts::PI));

    let jitter = |i: usize| if i % 2 == 0 { 0.01 } else { -0.01 };
    let noisy = JointTable::from_fn(n, 7, |i, j| 0.1 * j as f64 + jitter(i));
    let qd = signal::smooth_columns(&noisy, 4).unwrap();
    let ramp = JointTable::from_fn(n, 7, |i, _| i as f64 - 20.0);
    let qdd = signal::clamp_table(&ramp, -5.0, 5.0).unwrap();

    let full = engine.compute_full_regressor(&q, &qd, &qdd).unwrap();
    assert_eq!(full.shape(), (7 * n, 84));
}

#[test]
fn test_export_reduction() {
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let (q, qd, qdd) = random_trajectory(8, 20, 7);
    let reduced = engine.compute_reduced_regressor(&q, &qd, &qdd, 1e-6).unwrap();
    let report = RegressorReport::new(&engine, &reduced);

    let dir = std::env::temp_dir();
    let stem = format!("phyz-integration-{}", std::process::id());
    let matrix_path = dir.join(format!("{stem}.txt"));
    let report_path = dir.join(format!("{stem}.json"));
    write_matrix_text(reduced.matrix(), &matrix_path).unwrap();
    write_json(&report, &report_path).unwrap();

    let text = std::fs::read_to_string(&matrix_path).unwrap();
    assert_eq!(text.lines().count(), 140);
    assert!(
        text.lines()
            .all(|l| l.split_whitespace().count() == reduced.ncols())
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["samples"], 20);
    assert_eq!(json["num_parameters"], 84);

    std::fs::remove_file(matrix_path).unwrap();
    std::fs::remove_file(report_path).unwrap();
}

#[test]
fn test_preset_roundtrips_through_json() {
    let config = presets::lbr_iiwa14();
    let json = config.to_json_string().unwrap();
    let parsed = MechanismConfig::from_json_str(&json).unwrap();
    let engine = RegressorEngine::from_config(&parsed).unwrap();
    let reference = RegressorEngine::lbr_iiwa14().unwrap();

    let (q, qd, qdd) = random_trajectory(21, 3, 7);
    assert_relative_eq!(
        engine.compute_full_regressor(&q, &qd, &qdd).unwrap(),
        reference.compute_full_regressor(&q, &qd, &qdd).unwrap(),
        epsilon = 1e-9
    );
}

#[test]
fn test_errors_surface_through_umbrella() {
    let engine = RegressorEngine::lbr_iiwa14().unwrap();
    let (q, qd, qdd) = random_trajectory(4, 3, 7);
    let short = JointTable::from_fn(2, 7, |_, _| 0.0);
    assert!(matches!(
        engine.compute_full_regressor(&q, &short, &qdd),
        Err(IdentError::ShapeMismatch(_))
    ));
    assert!(matches!(
        engine.compute_reduced_regressor(&q, &qd, &qdd, -0.1),
        Err(IdentError::InvalidInput(_))
    ));

    let bad = MechanismConfig::from_json_str(r#"{ "name": "none", "links": [] }"#).unwrap();
    assert!(matches!(
        RegressorEngine::from_config(&bad),
        Err(IdentError::ModelError(_))
    ));
}
