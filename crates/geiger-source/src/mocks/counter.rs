//! Scripted counter for testing.

use std::collections::VecDeque;

use geiger_types::ReadFailure;

use crate::CounterSource;

/// Counter source that replays a fixed list of read results.
///
/// Once the script runs out every read fails with a bus error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCounter {
    script: VecDeque<Result<u32, ReadFailure>>,
}

impl ScriptedCounter {
    /// Creates a counter from read results in order.
    pub fn new(script: impl IntoIterator<Item = Result<u32, ReadFailure>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Appends a successful reading.
    pub fn push_value(&mut self, value: u32) {
        self.script.push_back(Ok(value));
    }

    /// Number of scripted reads left.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl CounterSource for ScriptedCounter {
    fn read_counter(&mut self) -> Result<u32, ReadFailure> {
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(ReadFailure::Bus("script exhausted".to_string())))
    }
}
