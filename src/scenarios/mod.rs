// src/scenarios/mod.rs

//! Parameterized formula families built on the wavefunction model and the
//! analyzer. Each is a set of pure functions of a grid (or [`ModelContext`](crate::core::ModelContext))
//! plus scalar parameters; nothing is shared between calls.

pub mod decoherence;
pub mod double_slit;
pub mod phase_sweep;
pub mod weak_measurement;

pub use decoherence::{bright_decoherence_scan, dephase, DecoherencePoint};
pub use double_slit::{
    DelayedChoiceOutcome, DoubleSlitPattern, DoubleSlitSetup, EfficiencyScan, WhichPathOutcome,
};
pub use phase_sweep::{
    amplitude_sweep, animation_frames, interference_profile, phase_curves, phase_sweep,
    AnimationFrame, InterferenceCurve, PhaseSweep,
};
pub use weak_measurement::{
    coupling_scan, measure, CouplingPoint, MeasurementOperator, MeasurementReport,
    MeasurementSettings, MeasurementTarget, PostSelection, PreparedState,
};
