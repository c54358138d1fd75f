//! Double-slit interference with bright-only which-path detection.

use brightdark::analysis::IntensityStats;
use brightdark::scenarios::DoubleSlitSetup;
use brightdark::ModelError;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

fn main() -> Result<(), ModelError> {
    env_logger::init();
    let setup = DoubleSlitSetup::default();
    let screen = DoubleSlitSetup::default_screen()?;
    println!("Setup: {:?}", setup);
    println!("Screen: {}", screen);

    // Standard pattern with equal bright/dark weights
    let pattern = setup.default_pattern(&screen)?;
    let stats = IntensityStats::from_profile(&pattern.total_intensity, &screen)?;
    println!("\nStandard pattern: V = {:.3}, central peak {:.4} at x = {:.3}", pattern.visibility, stats.max, stats.peak_position);

    // Dark-phase dependence
    println!("\nDark phase shift:");
    for theta in [0.0, PI / 4.0, PI / 2.0, PI] {
        let p = setup.pattern(&screen, FRAC_1_SQRT_2, FRAC_1_SQRT_2, theta)?;
        println!("  theta = {:.2}: V = {:.3}", theta, p.visibility);
    }

    // Which-path detection that only sees the bright component
    let which = setup.which_path(&screen, 0.8)?;
    println!(
        "\nWhich-path (eta = {:.1}): V {:.3} -> {:.3}, {:.1}% reduction",
        which.detection_efficiency,
        which.no_detection.visibility,
        which.with_detection.visibility,
        100.0 * which.visibility_reduction()
    );

    let scan = setup.visibility_vs_efficiency(&screen, 20)?;
    println!("\nVisibility vs detector efficiency:");
    for (eta, v) in scan.efficiencies.iter().zip(&scan.visibilities).step_by(4) {
        println!("  eta = {:.2}: V = {:.3}", eta, v);
    }

    let delayed = setup.delayed_choice(&screen)?;
    println!("\nDelayed choice:");
    println!("  initial          V = {:.3}", delayed.initial.visibility);
    println!("  bright only      V = {:.3}", delayed.bright_only.visibility);
    println!("  dark influence   V = {:.3}", delayed.dark_influence.visibility);
    Ok(())
}
