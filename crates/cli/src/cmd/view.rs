use clap::Parser;
use eyre::Result;
use waveportal_client::{Bind, ClientView, WalletProvider};

/// CLI arguments for `waveportal view`.
#[derive(Clone, Debug, Parser)]
pub struct ViewArgs {}

impl ViewArgs {
    pub async fn run<P: WalletProvider + Bind>(self, view: &ClientView<P>) -> Result<()> {
        let account = view.detect_session().await?;
        if account.is_none() && view.has_provider() {
            anstream::eprintln!("no authorized account, run `waveportal connect` first");
        }
        anstream::print!("{}", view.render());
        Ok(())
    }
}
