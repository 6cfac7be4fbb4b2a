//! pixfit-test - Regression test framework for pixfit
//!
//! This crate provides the regression harness shared by the integration
//! tests of every pixfit crate, supporting two modes:
//!
//! - **Compare**: Check computed values and buffers against expectations
//! - **Display**: Compare as above, and also dump intermediate buffers as
//!   PNG files for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use pixfit_test::{RegParams, pattern};
//!
//! let mut rp = RegParams::new("downscale");
//! let src = pattern::checkerboard(4, 4, PixelFormat::Rgb888);
//! rp.compare_values(4.0, src.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod pattern;
pub mod png;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixfit-test is at crates/pixfit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
