//! Host capability probing for MPX support.
//!
//! Detects the toolchain, kernel, and CPU prerequisites for Intel MPX.
//! Consumed as a yes/no precondition gate by the CLI run path and as skip
//! gates by environment-dependent tests; never consulted by the monitoring
//! engine itself.

mod detect;

pub use detect::{detect, Probe};
