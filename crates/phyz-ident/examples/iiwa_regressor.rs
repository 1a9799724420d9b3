//! Identifiable parameters of the KUKA LBR iiwa along an excitation trajectory.
//!
//! Builds a finite Fourier series trajectory, stacks the full regressor and
//! reports how many parameter columns survive at several tolerances. The
//! reduction at the last tolerance is written to the system temp directory.
//!
//! Run with `RUST_LOG=debug` to see engine diagnostics.

use std::f64::consts::PI;

use phyz_ident::{JointTable, RegressorEngine, RegressorReport, write_json, write_matrix_text};

const SAMPLES: usize = 500;
const DT: f64 = 0.02;
const HARMONICS: usize = 5;
/// Fundamental frequency of the excitation [Hz].
const BASE_FREQ: f64 = 0.1;

/// Joint position, velocity and acceleration of a Fourier excitation.
fn fourier(joint: usize, t: f64) -> (f64, f64, f64) {
    let wf = 2.0 * PI * BASE_FREQ;
    let (mut q, mut qd, mut qdd) = (0.0, 0.0, 0.0);
    for k in 1..=HARMONICS {
        let kf = k as f64;
        let a = 0.3 / kf * (1.0 + 0.1 * joint as f64);
        let b = 0.2 / kf * ((joint + k) % 3) as f64;
        let w = wf * kf;
        let (s, c) = (w * t).sin_cos();
        q += a / w * s - b / w * c;
        qd += a * c + b * s;
        qdd += -a * w * s + b * w * c;
    }
    (q, qd, qdd)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let engine = RegressorEngine::lbr_iiwa14()?;
    println!("KUKA LBR iiwa regressor");
    println!("=======================\n");
    println!("dof: {}, parameters: {}", engine.dof(), engine.num_parameters());

    let dof = engine.dof();
    let sample = |i: usize, j: usize| fourier(j, i as f64 * DT);
    let q = JointTable::from_fn(SAMPLES, dof, |i, j| sample(i, j).0);
    let qd = JointTable::from_fn(SAMPLES, dof, |i, j| sample(i, j).1);
    let qdd = JointTable::from_fn(SAMPLES, dof, |i, j| sample(i, j).2);

    let full = engine.compute_full_regressor(&q, &qd, &qdd)?;
    println!("full regressor: {} x {}\n", full.nrows(), full.ncols());

    let mut last = None;
    for tolerance in [1e-12, 1e-8, 1e-6, 1e-4, 1e-2] {
        let reduced = engine.compute_reduced_regressor(&q, &qd, &qdd, tolerance)?;
        println!("tolerance {tolerance:>8.0e}: {:>3} columns", reduced.ncols());
        last = Some(reduced);
    }

    if let Some(reduced) = last {
        let report = RegressorReport::new(&engine, &reduced);
        println!("\nretained at tolerance {:e}:", report.tolerance);
        for name in &report.retained {
            println!("  {name}");
        }

        let dir = std::env::temp_dir();
        write_matrix_text(reduced.matrix(), dir.join("iiwa_reduced_regressor.txt"))?;
        write_json(&report, dir.join("iiwa_reduced_regressor.json"))?;
        println!("\nwrote results to {}", dir.display());
    }

    Ok(())
}
