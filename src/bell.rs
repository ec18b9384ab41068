use std::f64::consts::FRAC_1_SQRT_2;
use clap::Parser;
use fullstate_sim::prelude::*;
use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::{ rngs::StdRng, SeedableRng };
use tracing_subscriber::EnvFilter;

/// Prepare a GHZ state with a Hadamard and a chain of CNOTs, then sample it.
#[derive(Parser, Debug)]
struct Args {
    /// Number of qubits.
    #[arg(short, long, default_value_t = 2)]
    qubits: usize,

    /// Number of measurement shots.
    #[arg(short, long, default_value_t = 1000)]
    shots: usize,

    /// Seed for the random number generator; drawn from entropy if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Apply gates by expanding the full operator.
    #[arg(long)]
    full: bool,
}

fn hadamard() -> na::Matrix2<C64> {
    na::Matrix2::new(
        FRAC_1_SQRT_2.into(),   FRAC_1_SQRT_2.into(),
        FRAC_1_SQRT_2.into(), (-FRAC_1_SQRT_2).into(),
    )
}

fn cnot() -> na::DMatrix<C64> {
    let mut g = na::DMatrix::zeros(4, 4);
    g[(0, 0)] = C64::from(1.0);
    g[(1, 1)] = C64::from(1.0);
    g[(2, 3)] = C64::from(1.0);
    g[(3, 2)] = C64::from(1.0);
    g
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    if args.qubits == 0 {
        eprintln!("bell: need at least one qubit");
        std::process::exit(1);
    }

    let mut psi = FullStateQuantumRegister::new(args.qubits);
    let cx = cnot();
    if args.full {
        apply_1qubit_full_mut(&mut psi, &hadamard(), 0)?;
        for k in 1..args.qubits {
            apply_2qubit_full_mut(&mut psi, &cx, k - 1, k)?;
        }
    } else {
        apply_1qubit_mut(&mut psi, &hadamard(), 0)?;
        for k in 1..args.qubits {
            apply_2qubit_mut(&mut psi, &cx, k - 1, k)?;
        }
    }
    println!("state: {}", psi);

    println!("probabilities:");
    measure_probs(&psi).into_iter()
        .filter(|(_, p)| *p > 0.0)
        .for_each(|(bits, p)| { println!("  {}: {:.6}", bits, p); });

    let mut rng
        = args.seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy);
    let results = measure(&psi, args.shots, &mut rng)?;
    println!("counts ({} shots):", args.shots);
    get_counts(&results).into_iter()
        .sorted()
        .for_each(|(bits, count)| { println!("  {}: {}", bits, count); });
    Ok(())
}
