//! CP-ALS (Canonical Polyadic via Alternating Least Squares) Example
//!
//! Decomposes the reference 2×2×2 all-ones tensor at rank 3, then a noisy
//! low-rank tensor with several initialization strategies.
//!
//! Run with:
//! ```bash
//! cargo run --example cp_als
//! RUST_LOG=parafac_decomp=debug cargo run --example cp_als
//! ```

use parafac_core::DenseND;
use parafac_decomp::tracing_support::{init_tracing, TracingConfig};
use parafac_decomp::{cp_als, decompose, recompose, CpDecomp, InitStrategy};
use scirs2_core::ndarray_ext::{Array1, Array2};

fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default())?;

    println!("{}", "=".repeat(80));
    println!("CP-ALS Decomposition Example");
    println!("{}", "=".repeat(80));
    println!();

    // ========================================================================
    // Example 1: Reference run on the all-ones tensor
    // ========================================================================
    println!("Example 1: ones(2, 2, 2), rank 3, 20 epochs");
    println!("{}", "-".repeat(80));

    let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
    let cp = decompose(&tensor, 3, 20)?;
    print_result(&cp, tensor.frobenius_norm());

    println!("  - Weights: {:?}", cp.weights.to_vec());
    for (mode, factor) in cp.factors.iter().enumerate() {
        println!("  - Factor {}:", mode);
        for row in factor.rows() {
            println!("      {:?}", row.to_vec());
        }
    }

    let approx = cp.reconstruct(tensor.shape())?;
    println!("  - Reconstruction: {:?}", approx.to_vec());
    println!();

    // ========================================================================
    // Example 2: Noisy rank-3 tensor, comparing initializations
    // ========================================================================
    println!("Example 2: rank-3 tensor (20×15×10) plus noise");
    println!("{}", "-".repeat(80));

    let shape = [20, 15, 10];
    let factors: Vec<Array2<f64>> = shape
        .iter()
        .enumerate()
        .map(|(mode, &size)| {
            let seeded = DenseND::<f64>::random_uniform_seeded(&[size, 3], 0.0, 1.0, mode as u64);
            Array2::from_shape_vec((size, 3), seeded.to_vec())
        })
        .collect::<Result<_, _>>()?;
    let weights = Array1::from_vec(vec![5.0, 3.0, 1.0]);
    let clean = recompose(&factors, &weights, &shape)?;
    let noise = DenseND::<f64>::random_normal_seeded(&shape, 0.0, 0.01, 99)?;
    let noisy = DenseND::from_vec(
        clean.iter().zip(noise.iter()).map(|(c, n)| c + n).collect(),
        &shape,
    )?;
    let norm = noisy.frobenius_norm();

    let strategies = [
        ("constant", InitStrategy::Constant(1.0)),
        ("uniform", InitStrategy::Uniform { seed: Some(7) }),
        ("normal", InitStrategy::Normal { seed: Some(7) }),
        ("svd", InitStrategy::Svd),
    ];

    for (name, init) in strategies {
        let cp = cp_als(&noisy, 3, 200, init)?;
        println!("Init: {}", name);
        print_result(&cp, norm);
    }

    println!("{}", "=".repeat(80));

    Ok(())
}

fn print_result(cp: &CpDecomp<f64>, norm: f64) {
    println!("  - Epochs: {} of {}", cp.epochs, cp.max_epochs);
    println!("  - Stop reason: {:?}", cp.stop_reason);
    println!("  - Error: {:.6e}", cp.error);
    println!("  - Fit: {:.6}", cp.fit(norm));
    if !cp.degenerate.is_empty() {
        println!("  - Degenerate columns: {}", cp.degenerate.len());
    }
}
