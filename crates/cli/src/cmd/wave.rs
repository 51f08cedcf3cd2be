use clap::Parser;
use eyre::Result;
use waveportal_client::{Bind, ClientView, SubmissionInput, WalletProvider};
use yansi::Paint;

/// CLI arguments for `waveportal wave`.
#[derive(Clone, Debug, Parser)]
pub struct WaveArgs {
    /// The message to send.
    pub message: String,
}

impl WaveArgs {
    pub async fn run<P: WalletProvider + Bind>(self, view: &ClientView<P>) -> Result<()> {
        if view.detect_session().await?.is_none() {
            view.connect().await?;
        }

        let submitted = view.submit(SubmissionInput::from(self.message)).await?;
        anstream::println!("{} {}", "Mined".green(), submitted.tx_hash);
        anstream::print!("{}", view.render());
        Ok(())
    }
}
