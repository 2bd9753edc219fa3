//! Pause state machine.

use serde::{Deserialize, Serialize};

use strongbox_types::{Result, TreasuryError};

/// Binary circuit breaker over every fund-moving operation.
///
/// Starts active. Transitions into the state already held are rejected, so
/// callers must track state rather than rely on silent no-ops.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PauseGate {
    paused: bool,
}

impl PauseGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ensure_active(&self) -> Result<()> {
        if self.paused {
            return Err(TreasuryError::Paused);
        }
        Ok(())
    }

    pub fn engage(&mut self) -> Result<()> {
        if self.paused {
            return Err(TreasuryError::AlreadyPaused);
        }
        self.paused = true;
        Ok(())
    }

    pub fn release(&mut self) -> Result<()> {
        if !self.paused {
            return Err(TreasuryError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }
}
