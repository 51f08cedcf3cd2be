use clap::Parser;
use eyre::Result;
use waveportal_client::{Bind, ClientView, WalletProvider};
use yansi::Paint;

/// CLI arguments for `waveportal connect`.
#[derive(Clone, Debug, Parser)]
pub struct ConnectArgs {}

impl ConnectArgs {
    pub async fn run<P: WalletProvider + Bind>(self, view: &ClientView<P>) -> Result<()> {
        let account = view.connect().await?;
        anstream::println!("{} {account}", "Connected".green());
        anstream::print!("{}", view.render());
        Ok(())
    }
}
