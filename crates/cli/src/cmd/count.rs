use clap::Parser;
use eyre::Result;
use waveportal_client::{Bind, ClientView, WalletProvider};
use yansi::Paint;

/// CLI arguments for `waveportal count`.
#[derive(Clone, Debug, Parser)]
pub struct CountArgs {}

impl CountArgs {
    pub async fn run<P: WalletProvider + Bind>(self, view: &ClientView<P>) -> Result<()> {
        if view.detect_session().await?.is_some() {
            let count = view.refresh_wave_count().await?;
            anstream::println!("{count}");
        } else {
            let count = view.snapshot().wave_count;
            anstream::println!("{count} {}", "(cached)".dim());
        }
        Ok(())
    }
}
