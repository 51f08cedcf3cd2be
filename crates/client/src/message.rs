use crate::ClientError;
use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};

/// A wave as reported by `getAllWaves` and the `NewWave` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawWave {
    pub waver: Address,
    /// Seconds since the unix epoch.
    pub timestamp: U256,
    pub message: String,
}

/// A normalized wave, ready to be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub address: Address,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl TryFrom<RawWave> for Message {
    type Error = ClientError;

    fn try_from(raw: RawWave) -> Result<Self, Self::Error> {
        let timestamp = timestamp_from_secs(raw.timestamp)
            .ok_or(ClientError::InvalidTimestamp(raw.timestamp))?;
        Ok(Self { address: raw.waver, timestamp, text: raw.message })
    }
}

/// Converts a contract timestamp in seconds to a date-time, through `secs * 1000` milliseconds.
///
/// Returns `None` if the milliseconds do not fit a date-time.
pub fn timestamp_from_secs(secs: U256) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(u64::try_from(secs).ok()?).ok()?;
    DateTime::from_timestamp_millis(secs.checked_mul(1000)?)
}

/// Normalizes raw waves, preserving their order.
pub fn normalize(raw: impl IntoIterator<Item = RawWave>) -> Result<Vec<Message>, ClientError> {
    raw.into_iter().map(Message::try_from).collect()
}
