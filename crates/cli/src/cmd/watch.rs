use clap::Parser;
use eyre::Result;
use waveportal_client::{Bind, ClientView, WalletProvider, render};

/// CLI arguments for `waveportal watch`.
#[derive(Clone, Debug, Parser)]
pub struct WatchArgs {}

impl WatchArgs {
    pub async fn run<P: WalletProvider + Bind>(self, view: &ClientView<P>) -> Result<()> {
        view.detect_session().await?;
        if !view.is_subscribed() {
            anstream::print!("{}", view.render());
            return Ok(());
        }

        let mut rx = view.watch();
        anstream::print!("{}", render::render(&rx.borrow_and_update()));
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let tree = render::render(&rx.borrow_and_update());
                    anstream::println!();
                    anstream::print!("{tree}");
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        view.teardown();
        debug!("stopped watching");
        Ok(())
    }
}
