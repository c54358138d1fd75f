//! Numerical constants and the literal defaults of each scenario family.

/// Mathematical constants used throughout the model.
pub mod model_constants {
    /// Used for phase angles (`e^(iθ)`)
    pub const PI: f64 = std::f64::consts::PI;
    /// One full phase turn, the visibility period.
    pub const TAU: f64 = std::f64::consts::TAU;
    /// Equal-weight amplitude `1/√2`.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}

/// Tolerances shared by the analyzer and the validation helpers.
pub mod tolerances {
    /// Allowed deviation of `|α|² + |β|²` from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Overlaps below this magnitude make a weak value undefined.
    pub const OVERLAP_TOLERANCE: f64 = 1e-12;
}

/// Defaults of the stand-alone simulator (grid, centres, width).
pub mod simulator_defaults {
    pub const GRID_MIN: f64 = -5.0;
    pub const GRID_MAX: f64 = 5.0;
    pub const GRID_POINTS: usize = 1000;
    /// Bright state sits at `+OFFSET`, dark state at `-OFFSET`.
    pub const OFFSET: f64 = 1.0;
    pub const SIGMA: f64 = 0.5;
    /// Animation: frame count and playback rate for the exported sequence.
    pub const ANIMATION_FRAMES: usize = 100;
    pub const ANIMATION_FPS: u32 = 10;
    pub const ANIMATION_FILE: &str = "bright_dark_interference.json";
}

/// Defaults of the basic interference walkthrough.
pub mod basic_defaults {
    pub const GRID_MIN: f64 = -4.0;
    pub const GRID_MAX: f64 = 4.0;
    pub const GRID_POINTS: usize = 800;
    pub const OFFSET: f64 = 0.8;
    pub const SIGMA: f64 = 0.6;
}

/// Defaults of the double-slit analyzer.
pub mod double_slit_defaults {
    pub const SLIT_SEPARATION: f64 = 2.0;
    pub const SLIT_WIDTH: f64 = 0.3;
    pub const SCREEN_DISTANCE: f64 = 10.0;
    /// Normalised wavelength.
    pub const WAVELENGTH: f64 = 1.0;
    pub const SCREEN_MIN: f64 = -4.0;
    pub const SCREEN_MAX: f64 = 4.0;
    pub const SCREEN_POINTS: usize = 1000;
    pub const DETECTION_EFFICIENCY: f64 = 0.8;
    /// Extra dark phase picked up when which-path detectors are present.
    pub const DETECTION_DARK_PHASE: f64 = std::f64::consts::PI / 8.0;
}

/// Defaults of the weak-measurement simulator.
pub mod weak_defaults {
    pub const GRID_MIN: f64 = -5.0;
    pub const GRID_MAX: f64 = 5.0;
    pub const GRID_POINTS: usize = 1000;
    pub const OFFSET: f64 = 1.5;
    pub const SIGMA: f64 = 0.5;
    pub const COUPLING: f64 = 0.1;
    pub const POSITION: f64 = 0.0;
    pub const WIDTH: f64 = 1.0;
}
