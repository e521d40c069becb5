//! Named session operations
//!
//! The closed set of operations a host can request by name, replacing
//! stringly-typed method dispatch: unknown names are rejected at the
//! boundary with a typed error instead of reflection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ScratchError;

/// Operations a session exposes to host callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Enable,
    Disable,
    Reset,
    Destroy,
    Ratio,
}

impl FromStr for Operation {
    type Err = ScratchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            "reset" => Ok(Self::Reset),
            "destroy" => Ok(Self::Destroy),
            "ratio" => Ok(Self::Ratio),
            other => Err(ScratchError::UnsupportedOperation(other.to_string())),
        }
    }
}

/// What a dispatched operation produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationOutput {
    /// The operation ran; nothing to report
    Done,
    /// The current reveal ratio
    Ratio(f64),
}
