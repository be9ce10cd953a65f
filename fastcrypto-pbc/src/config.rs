// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::random::{default_source, RandomSource};
use std::sync::Arc;

/// Per-pairing configuration, fixed when the pairing is created.
#[derive(Clone, Debug)]
pub struct PairingConfig {
    /// Source used whenever the engine needs randomness.
    pub random: Arc<dyn RandomSource>,
    /// Emit engine diagnostics (e.g. inverting zero, unsolvable discrete logs) as `warn!` events.
    pub engine_messages: bool,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            random: default_source(),
            engine_messages: false,
        }
    }
}

impl PairingConfig {
    pub fn with_random<R: RandomSource + 'static>(mut self, source: R) -> Self {
        self.random = Arc::new(source);
        self
    }

    pub fn with_engine_messages(mut self, enabled: bool) -> Self {
        self.engine_messages = enabled;
        self
    }
}
