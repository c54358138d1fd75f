//! Walkthrough of the basic bright/dark interference model on the
//! `[-4, 4]` grid with packets at ±0.8.

use brightdark::analysis::{incoherent_sum, interference_term, intensity, visibility};
use brightdark::scenarios::{amplitude_sweep, phase_curves, phase_sweep};
use brightdark::{superpose, AmplitudeParameters, ModelContext, ModelError};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

fn main() -> Result<(), ModelError> {
    env_logger::init();
    let ctx = ModelContext::basic_interference()?;
    println!("Context: {}", ctx);

    // --- 1. Components against the classical sum ---
    let (psi_b, psi_d) = ctx.components()?;
    let psi = superpose(&psi_b, &psi_d, FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0)?;
    let quantum = intensity(&psi, None)?;
    let classical = incoherent_sum(&psi_b.scale_real(FRAC_1_SQRT_2), &psi_d.scale_real(FRAC_1_SQRT_2))?;
    let cross = interference_term(&psi_b.scale_real(FRAC_1_SQRT_2), &psi_d.scale_real(FRAC_1_SQRT_2))?;
    let centre = ctx.grid.nearest_index(0.0);
    println!("\nAt x = 0:");
    println!("  quantum   I = {:.6}", quantum.values()[centre]);
    println!("  classical I = {:.6}", classical.values()[centre]);
    println!("  cross term  = {:.6}", cross[centre]);

    // --- 2. Phase dependence ---
    println!("\nPhase dependence (alpha = beta = 1/sqrt(2)):");
    let phases = [0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0, PI];
    for curve in phase_curves(&ctx, &AmplitudeParameters::default(), &phases)? {
        println!("  phi = {:.2}, V = {:.3}", curve.amplitudes.beta_phase, curve.visibility);
    }

    // --- 3. Amplitude ratio ---
    println!("\nAmplitude dependence (phi = pi/4):");
    for curve in amplitude_sweep(&ctx, &[0.2, 0.4, 0.6, 0.8], PI / 4.0)? {
        println!(
            "  beta = {:.2}, alpha = {:.3}, V = {:.3}",
            curve.amplitudes.beta_magnitude, curve.amplitudes.alpha, curve.visibility
        );
    }

    // --- 4. Visibility over two full turns ---
    let sweep = phase_sweep(&ctx, &AmplitudeParameters::default(), 0.0, 4.0 * PI, 200)?;
    println!(
        "\nVisibility over [0, 4pi]: mean {:.3}, range [{:.3}, {:.3}]",
        sweep.mean_visibility(),
        sweep.min_visibility(),
        sweep.max_visibility()
    );
    println!("Equal-weight pattern visibility: {:.3}", visibility(&quantum));
    Ok(())
}
