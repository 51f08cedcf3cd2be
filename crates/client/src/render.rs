//! Presentation of the view state.

use crate::{Message, ViewState, WriteState};
use alloy_primitives::{TxHash, U256};
use chrono::{Local, TimeZone};
use std::fmt;

pub const HEADER: &str = "👋 Hey there, Yash Here!";

pub const BIO: &str =
    "I'm Yash Welcome to my inbox. Send a message through this Dapp...You might win some free ETH.";

pub const INPUT_PLACEHOLDER: &str = "Write me a message...";

/// Format of a wave's time, e.g. `Mon Oct 18 2021 14:38:10 GMT+0000`.
pub const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// The rendered view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewTree {
    pub header: &'static str,
    pub bio: &'static str,
    pub alert: Option<String>,
    pub controls: Controls,
    /// Most recent first.
    pub waves: Vec<WaveCard>,
}

/// What the user can do right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Controls {
    /// A wave is being mined.
    Busy { tx_hash: TxHash },
    Ready {
        placeholder: &'static str,
        /// Whether to offer the connect action.
        show_connect: bool,
        wave_count: U256,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveCard {
    pub message: String,
    pub from: String,
    pub time: String,
}

/// Renders `state` with times in the local time zone.
pub fn render(state: &ViewState) -> ViewTree {
    render_in(state, &Local)
}

/// Renders `state` with times in `tz`.
pub fn render_in<Tz: TimeZone>(state: &ViewState, tz: &Tz) -> ViewTree
where
    Tz::Offset: fmt::Display,
{
    let controls = match state.write {
        WriteState::Confirming { tx_hash } => Controls::Busy { tx_hash },
        WriteState::Idle | WriteState::Sending => Controls::Ready {
            placeholder: INPUT_PLACEHOLDER,
            show_connect: !state.is_connected(),
            wave_count: state.wave_count,
        },
    };
    ViewTree {
        header: HEADER,
        bio: BIO,
        alert: state.alert.clone(),
        controls,
        waves: state.messages.iter().rev().map(|message| card(message, tz)).collect(),
    }
}

fn card<Tz: TimeZone>(message: &Message, tz: &Tz) -> WaveCard
where
    Tz::Offset: fmt::Display,
{
    WaveCard {
        message: message.text.clone(),
        from: message.address.to_checksum(None),
        time: message.timestamp.with_timezone(tz).format(TIME_FORMAT).to_string(),
    }
}

impl fmt::Display for ViewTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f)?;
        writeln!(f, "{}", self.bio)?;
        if let Some(alert) = &self.alert {
            writeln!(f)?;
            writeln!(f, "! {alert}")?;
        }
        writeln!(f)?;
        match &self.controls {
            Controls::Busy { tx_hash } => writeln!(f, "Mining {tx_hash}...")?,
            Controls::Ready { placeholder, show_connect, wave_count } => {
                writeln!(f, "[ {placeholder} ]")?;
                if *show_connect {
                    writeln!(f, "[Connect Wallet]")?;
                }
                writeln!(f, "[Wave at Me]")?;
                writeln!(f, "(Total # of waves: {wave_count})")?;
            }
        }
        for wave in &self.waves {
            writeln!(f)?;
            writeln!(f, "Message: {}", wave.message)?;
            writeln!(f, "From: {}", wave.from)?;
            writeln!(f, "Time: {}", wave.time)?;
        }
        Ok(())
    }
}
