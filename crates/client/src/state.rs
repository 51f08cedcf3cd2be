use crate::Message;
use alloy_primitives::{Address, TxHash, U256};
use std::fmt;

/// Progress of the write path.
///
/// `Idle -> Sending -> Confirming -> Idle`; every exit path returns to `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteState {
    #[default]
    Idle,
    /// The `wave` call is being sent.
    Sending,
    /// The transaction was sent and is awaiting confirmation.
    Confirming { tx_hash: TxHash },
}

impl WriteState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Everything the presentation depends on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// The session account.
    pub account: Option<Address>,
    /// Waves in arrival order.
    pub messages: Vec<Message>,
    pub write: WriteState,
    /// Last known total wave count.
    pub wave_count: U256,
    /// Description of the last failed operation.
    pub alert: Option<String>,
}

impl ViewState {
    /// Whether a submitted wave is awaiting confirmation.
    pub fn is_pending(&self) -> bool {
        matches!(self.write, WriteState::Confirming { .. })
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

/// The text of a wave to submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionInput(String);

impl SubmissionInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SubmissionInput {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for SubmissionInput {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for SubmissionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A confirmed wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submitted {
    pub tx_hash: TxHash,
    /// The total wave count read after confirmation.
    pub total_waves: U256,
}
