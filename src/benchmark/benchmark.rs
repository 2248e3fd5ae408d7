use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, PairwiseGravity};
use crate::simulation::integrator::sandbox_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// Helper to build a System of size `n` with deterministic positions,
/// no rand needed
fn make_system(n: usize) -> System {
    let mut system = System::new();

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            550.0 + (i_f * 0.37).sin() * 500.0,
            400.0 + (i_f * 0.13).cos() * 350.0,
        );

        // Anchors, so culling cannot shrink n mid-benchmark
        system.insert(Body::new(x, NVec2::zeros(), 50.0, [255, 255, 255], true));
    }

    system
}

fn make_params() -> Parameters {
    Parameters {
        h0: 0.1,
        g: 2000.0,
        min_distance: 10.0,
        v_max: 100.0,
        slingshot_scale: 0.1,
        trail_cap: 150,
    }
}

fn make_engine() -> Engine {
    Engine {
        width: 1100.0,
        height: 800.0,
        fps: 60.0,
        title: "bench".to_string(),
    }
}

/// Time the direct O(n^2) pairwise force accumulation for a range of n
pub fn bench_pairwise() {
    // Different system sizes to test
    let ns = [50, 100, 200, 400, 800, 1600, 3200];

    let params = make_params();
    let gravity = ForceSet::new().with(PairwiseGravity {
        g: params.g,
        min_distance: params.min_distance,
    });

    for n in ns {
        let sys = make_system(n);
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        gravity.accumulate_forces(0.0, &sys, &mut out);

        let t0 = Instant::now();
        gravity.accumulate_forces(0.0, &sys, &mut out);
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, pairwise = {dt:8.6} s");
    }
}

/// Time the full sandbox step for a growing body count
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    let params = make_params();
    let engine = make_engine();

    // Steps of 50 to give a smooth curve
    for n in (50..=3200).step_by(50) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 400 { 10 } else { 2 };

        let mut sys = make_system(n);
        let forces = ForceSet::new().with(PairwiseGravity {
            g: params.g,
            min_distance: params.min_distance,
        });

        // Warm-up one step
        sandbox_step(&mut sys, &forces, &params, &engine);

        let t0 = Instant::now();
        for _ in 0..steps {
            sandbox_step(&mut sys, &forces, &params, &engine);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{n},{ms:.6}");
    }
}
