use std::time::Instant;
use clap::Parser;
use fullstate_sim::{
    gate::{ sample_unitary, sample_unitary_1q },
    prelude::*,
};
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::{ rngs::StdRng, SeedableRng };
use tracing_subscriber::EnvFilter;

/// Compare full-expansion and optimized gate application on random gates.
#[derive(Parser, Debug)]
struct Args {
    /// Largest register size to check.
    #[arg(short, long, default_value_t = 8)]
    max_qubits: usize,

    /// Random gates per register size and strategy.
    #[arg(short, long, default_value_t = 10)]
    gates: usize,

    /// Seed for the random number generator; drawn from entropy if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn max_dev(a: &na::DVector<C64>, b: &na::DVector<C64>) -> f64 {
    (a - b).iter().map(|d| d.norm()).fold(0.0, f64::max)
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    let mut rng
        = args.seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy);

    println!("{:>2}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
        "n", "dev1", "t1_full", "t1_fast", "dev2", "t2_full", "t2_fast");
    for n in 1..=args.max_qubits {
        let mut psi = FullStateQuantumRegister::new(n);
        (0..n).try_for_each(|k| {
            apply_1qubit_mut(&mut psi, &sample_unitary_1q(&mut rng), k)
        })?;

        let mut dev1: f64 = 0.0;
        let mut t1 = [0.0; 2];
        for m in 0..args.gates {
            let g = sample_unitary_1q(&mut rng);
            let k = m % n;
            let t0 = Instant::now();
            let full = apply_1qubit_full(&psi, &g, k)?;
            t1[0] += t0.elapsed().as_secs_f64();
            let t0 = Instant::now();
            let fast = apply_1qubit(&psi, &g, k)?;
            t1[1] += t0.elapsed().as_secs_f64();
            dev1 = dev1.max(max_dev(full.state(), fast.state()));
        }

        let mut dev2: f64 = 0.0;
        let mut t2 = [0.0; 2];
        if n >= 2 {
            for m in 0..args.gates {
                let g = sample_unitary(4, &mut rng);
                let i = m % n;
                let j = (i + 1 + m % (n - 1)) % n;
                let t0 = Instant::now();
                let full = apply_2qubit_full(&psi, &g, i, j)?;
                t2[0] += t0.elapsed().as_secs_f64();
                let t0 = Instant::now();
                let fast = apply_2qubit(&psi, &g, i, j)?;
                t2[1] += t0.elapsed().as_secs_f64();
                dev2 = dev2.max(max_dev(full.state(), fast.state()));
            }
        }

        println!("{:>2}  {:>10.3e}  {:>10.3e}  {:>10.3e}  {:>10.3e}  {:>10.3e}  {:>10.3e}",
            n, dev1, t1[0], t1[1], dev2, t2[0], t2[1]);
    }
    Ok(())
}
