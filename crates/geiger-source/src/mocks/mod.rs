//! Mock implementations for testing.
//!
//! This module provides test doubles for the source ports, enabling
//! controlled testing of the poll cycle and the estimator behind it.

pub mod clock;
pub mod counter;

pub use clock::MockClock;
pub use counter::ScriptedCounter;
