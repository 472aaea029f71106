//! Example walking through the kernels of one CP-ALS mode update
//!
//! Builds the Khatri-Rao product of two factors, the Hadamard product of
//! their Gram matrices and its pseudo-inverse, then solves the normal
//! equations for the remaining factor.
//!
//! Run with: cargo run --example khatri_rao

use parafac_kernels::{
    gram, hadamard, khatri_rao, khatri_rao_fold, khatri_rao_seed, pinv, DEFAULT_PINV_RCOND,
};
use scirs2_core::ndarray_ext::{array, Array2};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Khatri-Rao Product Example ===\n");

    // Example 1: Basic Khatri-Rao product
    println!("1. Basic Khatri-Rao Product");
    println!("---------------------------");

    let a = array![[1.0, 2.0], [3.0, 4.0]];
    let b = array![[5.0, 6.0], [7.0, 8.0], [9.0, 10.0]];

    println!("Matrix A (2×2):");
    println!("{:?}\n", a);
    println!("Matrix B (3×2):");
    println!("{:?}\n", b);

    let kr = khatri_rao(&a.view(), &b.view())?;
    println!("Khatri-Rao Product A ⊙ B (6×2):");
    println!("{:?}\n", kr);

    println!("Column 0 = a[:,0] ⊗ b[:,0]:");
    println!("  expected [5, 7, 9, 15, 21, 27]");
    println!("  actual   {:?}\n", kr.column(0).to_vec());

    // Example 2: Folding from the 1×1 seed
    println!("2. Folding a Sequence of Factors");
    println!("--------------------------------");

    let seed: Array2<f64> = khatri_rao_seed();
    println!("Seed: {:?}", seed);
    let seeded = khatri_rao(&seed.view(), &b.view())?;
    println!("seed ⊙ B == B: {}", seeded == b);

    let folded = khatri_rao_fold([a.view(), b.view()])?;
    println!("fold(A, B) == A ⊙ B: {}\n", folded == kr);

    // Example 3: Normal equations of a mode update
    println!("3. Normal Equations");
    println!("-------------------");

    let c_true = array![[1.0, 0.5], [-2.0, 1.0], [0.0, 3.0], [1.5, -1.0]];
    // X(2) = C (A ⊙ B)ᵀ for an exact rank-2 model
    let unfolding = c_true.dot(&kr.t());

    let v = hadamard(&gram(&a.view()).view(), &gram(&b.view()).view())?;
    let v_pinv = pinv(&v.view(), DEFAULT_PINV_RCOND)?;
    let c = unfolding.dot(&kr).dot(&v_pinv);

    println!("V = AᵀA ∗ BᵀB:");
    println!("{:?}\n", v);
    println!("Recovered factor C = X(2) (A ⊙ B) V⁺:");
    println!("{:?}\n", c);

    let max_err = c
        .iter()
        .zip(c_true.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0_f64, f64::max);
    println!("Max deviation from the true factor: {:.3e}", max_err);

    // Example 4: Singular systems
    println!("\n4. Singular Normal Equations");
    println!("----------------------------");

    let collinear = array![[1.0, 1.0], [2.0, 2.0]];
    let singular = gram(&collinear.view());
    let singular_pinv = pinv(&singular.view(), DEFAULT_PINV_RCOND)?;
    println!("Gram of collinear columns: {:?}", singular);
    println!("Pseudo-inverse: {:?}", singular_pinv);

    Ok(())
}
