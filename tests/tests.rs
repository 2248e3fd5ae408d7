use gravsim::configuration::config::{BodyConfig, ScenarioConfig, SpawnConfig};
use gravsim::simulation::controller::{SimController, Slingshot};
use gravsim::simulation::engine::Engine;
use gravsim::simulation::forces::{gravity_pair_force, ForceSet, PairwiseGravity};
use gravsim::simulation::integrator::sandbox_step;
use gravsim::simulation::params::{Parameters, SpawnRules};
use gravsim::simulation::scenario::Scenario;
use gravsim::simulation::states::{Body, NVec2, System};

/// Default physics parameters for tests
fn test_params() -> Parameters {
    Parameters {
        h0: 0.1,
        g: 2000.0,
        min_distance: 10.0,
        v_max: 100.0,
        slingshot_scale: 0.1,
        trail_cap: 150,
    }
}

/// Default viewport for tests
fn test_engine() -> Engine {
    Engine {
        width: 1100.0,
        height: 800.0,
        fps: 60.0,
        title: "test".to_string(),
    }
}

/// Body at (x, y) with mass m, no velocity, not an anchor
fn body_at(x: f64, y: f64, m: f64) -> Body {
    Body::new(NVec2::new(x, y), NVec2::zeros(), m, [255, 255, 255], false)
}

/// Build a gravity term + ForceSet
fn gravity_set(p: &Parameters) -> ForceSet {
    ForceSet::new().with(PairwiseGravity {
        g: p.g,
        min_distance: p.min_distance,
    })
}

// ==================================================================================
// Body tests
// ==================================================================================

#[test]
fn velocity_never_exceeds_clamp() {
    let p = test_params();
    let mut b = body_at(0.0, 0.0, 10.0);

    for _ in 0..50 {
        b.add_force(NVec2::new(1.0e6, -5.0e5));
        b.update_position(&p);
        assert!(
            b.v.norm() <= p.v_max + 1e-9,
            "Speed {} exceeds clamp {}",
            b.v.norm(),
            p.v_max
        );
    }

    // Once the limit is hit, the clamp rescales to exactly v_max
    assert!((b.v.norm() - p.v_max).abs() < 1e-9);
}

#[test]
fn radius_has_floor_of_three() {
    assert_eq!(Body::radius_for_mass(0.0), 3.0);
    assert_eq!(Body::radius_for_mass(1.0), 3.0);
    assert_eq!(Body::radius_for_mass(10000.0), 141.0);

    // Sign of the mass does not matter
    assert_eq!(Body::radius_for_mass(-50.0), Body::radius_for_mass(50.0));

    for m in [0.0, 0.5, 5.0, 70.0, 10000.0, -3.0] {
        assert!(Body::radius_for_mass(m) >= 3.0, "radius below floor for m={m}");
    }
}

#[test]
fn zero_mass_coerced_to_one() {
    let b = Body::new(NVec2::zeros(), NVec2::zeros(), 0.0, [0, 0, 0], false);
    assert_eq!(b.m, 1.0);
}

#[test]
fn update_consumes_pending_force() {
    let p = test_params();
    let mut b = body_at(0.0, 0.0, 10.0);

    b.add_force(NVec2::new(100.0, 0.0));
    b.update_position(&p);

    assert_eq!(b.f, NVec2::zeros());
}

#[test]
fn trail_bounded_and_oldest_dropped() {
    let p = test_params();
    let mut b = body_at(0.0, 0.0, 1.0);
    b.v = NVec2::new(1.0, 0.0);

    b.update_position(&p);
    let first = b.x;
    b.update_position(&p);
    let second = b.x;

    // 151 updates in total
    for _ in 0..149 {
        b.update_position(&p);
    }

    assert_eq!(b.trail.len(), 150);
    // The very first recorded position fell off the front
    assert_eq!(*b.trail.front().unwrap(), second);
    assert!(b.trail.iter().all(|q| *q != first));
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn pair_force_is_antisymmetric() {
    let b1 = body_at(100.0, 200.0, 40.0);
    let b2 = body_at(337.0, 151.0, 90.0);

    let f12 = gravity_pair_force(&b1, &b2, 2000.0, 10.0);
    let f21 = gravity_pair_force(&b2, &b1, 2000.0, 10.0);

    assert_eq!(f12, -f21);
}

#[test]
fn coincident_pair_produces_no_force() {
    let b1 = body_at(42.0, 42.0, 50.0);
    let b2 = body_at(42.0, 42.0, 70.0);

    assert_eq!(gravity_pair_force(&b1, &b2, 2000.0, 10.0), NVec2::zeros());
}

#[test]
fn overlapping_pair_produces_no_force() {
    // radius_for_mass(50) = 9, so the contact radius is 9; a separation of 5
    // sits under both the contact radius and min_distance
    let b1 = body_at(0.0, 0.0, 50.0);
    let b2 = body_at(5.0, 0.0, 50.0);

    assert_eq!(gravity_pair_force(&b1, &b2, 2000.0, 10.0), NVec2::zeros());
}

#[test]
fn close_range_force_is_capped() {
    // Mass-1 bodies have radius 3, contact radius 3; separations 4 and 9
    // both sit in the cap band (under min_distance 10, outside contact)
    let b1 = body_at(0.0, 0.0, 1.0);
    let near = body_at(4.0, 0.0, 1.0);
    let far = body_at(9.0, 0.0, 1.0);

    let f_near = gravity_pair_force(&b1, &near, 2000.0, 10.0);
    let f_far = gravity_pair_force(&b1, &far, 2000.0, 10.0);

    // Both equal the value at d^2 = min_distance^2: the force stops growing
    // as the band shrinks further
    let capped = 2000.0 * 1.0 * 1.0 / (10.0 * 10.0);
    assert!((f_near.norm() - capped).abs() < 1e-12);
    assert!((f_far.norm() - capped).abs() < 1e-12);
}

#[test]
fn gravity_inverse_square_outside_cap() {
    let b1 = body_at(0.0, 0.0, 100.0);
    let at_200 = body_at(200.0, 0.0, 100.0);
    let at_400 = body_at(400.0, 0.0, 100.0);

    let near = gravity_pair_force(&b1, &at_200, 2000.0, 10.0);
    let far = gravity_pair_force(&b1, &at_400, 2000.0, 10.0);

    let ratio = near.norm() / far.norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected ~4x, got {ratio}");
}

#[test]
fn light_body_accelerates_toward_heavy_body() {
    let p = test_params();

    let mut sys = System::new();
    sys.insert(Body::new(
        NVec2::new(550.0, 400.0),
        NVec2::zeros(),
        10000.0,
        [255, 255, 0],
        true,
    ));
    sys.insert(Body::new(
        NVec2::new(750.0, 400.0),
        NVec2::new(0.0, -25.0),
        70.0,
        [100, 150, 255],
        false,
    ));

    let forces = gravity_set(&p);
    let mut out = vec![NVec2::zeros(); 2];
    forces.accumulate_forces(sys.t, &sys, &mut out);

    // The light body's force-derived acceleration points at the heavy one
    let toward_heavy = sys.bodies[0].x - sys.bodies[1].x;
    let a_light = out[1] / sys.bodies[1].m;
    assert!(
        a_light.dot(&toward_heavy) > 0.0,
        "Acceleration is not toward the heavy body"
    );
}

// ==================================================================================
// Step / culling tests
// ==================================================================================

#[test]
fn escaped_body_is_culled() {
    let p = test_params();
    let engine = test_engine();
    let forces = gravity_set(&p);

    // At the 1.5x-width threshold with outward velocity: the step that
    // crosses the boundary removes it
    let mut sys = System::new();
    sys.insert(Body::new(
        NVec2::new(1.5 * engine.width, 400.0),
        NVec2::new(50.0, 0.0),
        10.0,
        [255, 255, 255],
        false,
    ));

    sandbox_step(&mut sys, &forces, &p, &engine);

    assert!(sys.bodies.is_empty());
}

#[test]
fn anchor_is_exempt_from_culling() {
    let p = test_params();
    let engine = test_engine();
    let forces = gravity_set(&p);

    let mut sys = System::new();
    sys.insert(Body::new(
        NVec2::new(1.5 * engine.width, 400.0),
        NVec2::new(50.0, 0.0),
        10000.0,
        [255, 255, 0],
        true,
    ));

    sandbox_step(&mut sys, &forces, &p, &engine);

    assert_eq!(sys.bodies.len(), 1);
    assert_eq!(sys.t, p.h0);
}

#[test]
fn step_is_deterministic() {
    let p = test_params();
    let engine = test_engine();
    let forces = gravity_set(&p);

    let mut sys_a = System::new();
    sys_a.insert(body_at(550.0, 400.0, 10000.0));
    sys_a.insert(body_at(750.0, 400.0, 70.0));
    sys_a.insert(body_at(450.0, 250.0, 30.0));
    let mut sys_b = sys_a.clone();

    for _ in 0..10 {
        sandbox_step(&mut sys_a, &forces, &p, &engine);
        sandbox_step(&mut sys_b, &forces, &p, &engine);
    }

    for (a, b) in sys_a.bodies.iter().zip(sys_b.bodies.iter()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.v, b.v);
    }
}

#[test]
fn removing_absent_body_is_noop() {
    let mut sys = System::new();
    let id = sys.insert(body_at(0.0, 0.0, 1.0));

    sys.remove(id);
    assert!(sys.bodies.is_empty());

    // Same id again, and an id that never existed
    sys.remove(id);
    sys.remove(9999);
    assert!(sys.bodies.is_empty());
}

// ==================================================================================
// Gesture and controller tests
// ==================================================================================

#[test]
fn slingshot_release_inverts_drag() {
    let mut sling = Slingshot::Idle;

    sling.press(NVec2::new(100.0, 100.0));
    sling.drag(NVec2::new(90.0, 110.0));
    assert!(sling.is_aiming());

    let (x, v) = sling.release(NVec2::new(80.0, 120.0), 0.1).unwrap();

    // Launch from the press point, velocity opposite the drag
    assert_eq!(x, NVec2::new(100.0, 100.0));
    assert!((v.x - 2.0).abs() < 1e-12);
    assert!((v.y + 2.0).abs() < 1e-12);
    assert_eq!(sling, Slingshot::Idle);
}

#[test]
fn slingshot_ignores_redundant_transitions() {
    let mut sling = Slingshot::Idle;

    // Motion while idle is a no-op
    sling.drag(NVec2::new(5.0, 5.0));
    assert_eq!(sling, Slingshot::Idle);

    // A second press while aiming keeps the original start
    sling.press(NVec2::new(1.0, 2.0));
    sling.press(NVec2::new(9.0, 9.0));
    match sling {
        Slingshot::Aiming { start, .. } => assert_eq!(start, NVec2::new(1.0, 2.0)),
        Slingshot::Idle => panic!("gesture should be aiming"),
    }

    // Release while idle yields nothing
    assert!(sling.release(NVec2::zeros(), 1.0).is_some());
    assert!(sling.release(NVec2::zeros(), 1.0).is_none());
}

#[test]
fn spawn_mass_steps_are_clamped() {
    let rules = SpawnRules {
        mass_min: 5.0,
        mass_max: 20.0,
        mass_step: 5.0,
        mass_start: 15.0,
        max_bodies: 256,
    };
    let mut controller = SimController::new(&rules);

    controller.raise_mass(&rules);
    controller.raise_mass(&rules);
    assert_eq!(controller.spawn_mass, 20.0);

    for _ in 0..10 {
        controller.lower_mass(&rules);
    }
    assert_eq!(controller.spawn_mass, 5.0);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

/// Scenario with a single anchor and a small body cap
fn anchored_scenario(max_bodies: usize) -> Scenario {
    let cfg = ScenarioConfig {
        spawn: SpawnConfig {
            max_bodies,
            ..Default::default()
        },
        bodies: vec![BodyConfig {
            x: [550.0, 400.0],
            v: [0.0, 0.0],
            m: 10000.0,
            color: [255, 255, 0],
            anchor: true,
        }],
        ..Default::default()
    };
    Scenario::build_scenario(cfg)
}

#[test]
fn clear_with_only_anchor_is_noop() {
    let mut scenario = anchored_scenario(256);

    scenario.clear_spawned();
    scenario.clear_spawned();

    assert_eq!(scenario.system.bodies.len(), 1);
    assert!(scenario.system.bodies[0].anchor);
}

#[test]
fn clear_drops_spawned_bodies_only() {
    let mut scenario = anchored_scenario(256);
    scenario.spawn_body(NVec2::new(100.0, 100.0), NVec2::zeros(), 50.0, [0, 255, 0]);
    scenario.spawn_body(NVec2::new(200.0, 100.0), NVec2::zeros(), 50.0, [0, 255, 0]);

    scenario.clear_spawned();

    assert_eq!(scenario.system.bodies.len(), 1);
    assert!(scenario.system.bodies[0].anchor);
}

#[test]
fn spawn_at_capacity_evicts_oldest_non_anchor() {
    let mut scenario = anchored_scenario(3);

    let first = scenario
        .spawn_body(NVec2::new(100.0, 100.0), NVec2::zeros(), 50.0, [0, 255, 0])
        .unwrap();
    let second = scenario
        .spawn_body(NVec2::new(200.0, 100.0), NVec2::zeros(), 50.0, [0, 255, 0])
        .unwrap();

    // At the cap: the next spawn evicts the longest-lived non-anchor
    let third = scenario
        .spawn_body(NVec2::new(300.0, 100.0), NVec2::zeros(), 50.0, [0, 255, 0])
        .unwrap();

    assert_eq!(scenario.system.bodies.len(), 3);
    assert!(scenario.system.body(first).is_none());
    assert!(scenario.system.body(second).is_some());
    assert!(scenario.system.body(third).is_some());
    assert!(scenario.system.bodies.iter().any(|b| b.anchor));
}

#[test]
fn spawn_rejected_when_only_anchors_fill_the_cap() {
    let mut scenario = anchored_scenario(1);

    let spawned = scenario.spawn_body(NVec2::new(100.0, 100.0), NVec2::zeros(), 50.0, [0, 255, 0]);

    assert!(spawned.is_none());
    assert_eq!(scenario.system.bodies.len(), 1);
}

#[test]
fn reset_restores_initial_bodies() {
    let mut scenario = Scenario::build_scenario(ScenarioConfig::default());
    let initial: Vec<NVec2> = scenario.system.bodies.iter().map(|b| b.x).collect();

    scenario.spawn_body(NVec2::new(10.0, 10.0), NVec2::new(1.0, 0.0), 50.0, [1, 2, 3]);
    for _ in 0..5 {
        sandbox_step(
            &mut scenario.system,
            &scenario.forces,
            &scenario.parameters,
            &scenario.engine,
        );
    }

    scenario.reset();

    assert_eq!(scenario.system.t, 0.0);
    assert_eq!(scenario.system.bodies.len(), initial.len());
    for (b, x0) in scenario.system.bodies.iter().zip(initial.iter()) {
        assert_eq!(b.x, *x0);
    }
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let yaml = r#"
parameters:
  g: 500.0
  h0: 0.05
  min_distance: 10.0
  v_max: 100.0
  slingshot_scale: 0.1
  trail_cap: 150
"#;
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(cfg.parameters.g, 500.0);
    assert_eq!(cfg.engine.width, 1100.0);
    assert_eq!(cfg.bodies.len(), 3);
    assert!(cfg.bodies[0].anchor);
}
