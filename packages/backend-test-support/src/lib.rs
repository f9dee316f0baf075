//! Test support shared by the roshambo integration test binaries.

pub mod logging;
