//! Weak measurements coupled to the bright component, compared against a
//! measurement that couples to both.

use brightdark::scenarios::weak_measurement::{
    apply, coupling_scan, fidelity, mean_momentum, mean_position, post_select, prepare,
};
use brightdark::scenarios::{MeasurementOperator, MeasurementSettings, MeasurementTarget};
use brightdark::{AmplitudeParameters, ModelContext, ModelError};
use std::f64::consts::PI;

fn main() -> Result<(), ModelError> {
    env_logger::init();
    let ctx = ModelContext::weak_measurement()?;
    let grid = &ctx.grid;
    let initial = prepare(&ctx, &AmplitudeParameters::equal_weight(PI / 4.0))?;
    println!("Context: {}", ctx);
    println!(
        "Initial: <x> = {:.4}, <p> = {:.4}",
        mean_position(&initial.total, grid)?,
        mean_momentum(&initial.total, grid)?
    );

    for target in [MeasurementTarget::BrightOnly, MeasurementTarget::Both] {
        let settings = MeasurementSettings { target, ..Default::default() };
        let after = apply(&initial, &MeasurementOperator::new(grid, &settings)?, grid)?;
        println!(
            "\n{:?}: fidelity = {:.6}, <x> = {:.4}, <p> = {:.4}",
            target,
            fidelity(&initial.total, &after.total, grid)?,
            mean_position(&after.total, grid)?,
            mean_momentum(&after.total, grid)?
        );
    }

    let selected = post_select(&initial.total, grid, (0.0, 3.0))?;
    println!("\nPost-selection on [0, 3]: p = {:.4}", selected.selection_probability);

    println!("\nFidelity vs coupling (bright only / both):");
    let scan = coupling_scan(&ctx, &AmplitudeParameters::equal_weight(PI / 4.0), &[0.0, 0.1, 0.5, 1.0, 2.0], 0.0, Some(1.0))?;
    for point in scan {
        println!(
            "  g = {:.2}: {:.6} / {:.6}",
            point.coupling_strength, point.bright_only_fidelity, point.both_fidelity
        );
    }
    Ok(())
}
