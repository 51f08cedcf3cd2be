//! Subcommands of the `waveportal` binary.

use clap::Subcommand;
use eyre::Result;
use waveportal_client::{Bind, ClientView, WalletProvider};

pub mod connect;
pub mod count;
pub mod view;
pub mod wave;
pub mod watch;

#[derive(Debug, Subcommand)]
pub enum WaveportalSubcommand {
    /// Load the waves of the authorized account and print them.
    #[command(visible_alias = "v")]
    View(view::ViewArgs),

    /// Ask the wallet for account access, then print the waves.
    #[command(visible_alias = "c")]
    Connect(connect::ConnectArgs),

    /// Wave at the portal with a message and wait until it is mined.
    #[command(visible_alias = "w")]
    Wave(wave::WaveArgs),

    /// Print the waves and keep printing them as new ones arrive, until Ctrl-C.
    Watch(watch::WatchArgs),

    /// Print the total number of waves.
    Count(count::CountArgs),
}

impl WaveportalSubcommand {
    pub async fn run<P: WalletProvider + Bind>(self, view: &ClientView<P>) -> Result<()> {
        match self {
            Self::View(args) => args.run(view).await,
            Self::Connect(args) => args.run(view).await,
            Self::Wave(args) => args.run(view).await,
            Self::Watch(args) => args.run(view).await,
            Self::Count(args) => args.run(view).await,
        }
    }
}
