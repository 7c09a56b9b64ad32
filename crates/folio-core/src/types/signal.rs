//! Strategy signals.

use serde::{Deserialize, Serialize};

/// Action a strategy requests at a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    /// Open a long position if flat
    Enter,
    /// Close the open position if long
    Exit,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Enter => write!(f, "ENTER"),
            SignalType::Exit => write!(f, "EXIT"),
        }
    }
}

/// A signal emitted at a bar index of the price series.
///
/// Signals are raw: whether they are actionable depends on the portfolio
/// state when the simulator reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Bar index in the price series
    pub index: usize,
    /// Requested action
    pub signal_type: SignalType,
}

impl Signal {
    pub fn enter(index: usize) -> Self {
        Self {
            index,
            signal_type: SignalType::Enter,
        }
    }

    pub fn exit(index: usize) -> Self {
        Self {
            index,
            signal_type: SignalType::Exit,
        }
    }
}
