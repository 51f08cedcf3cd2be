use crate::{cmd::WaveportalSubcommand, opts::WaveportalOpts};
use clap::Parser;
use eyre::Result;

/// Wave at the wave portal contract from your terminal.
#[derive(Debug, Parser)]
#[command(name = "waveportal", version, next_display_order = None)]
pub struct Waveportal {
    #[command(flatten)]
    pub opts: WaveportalOpts,

    #[command(subcommand)]
    pub cmd: WaveportalSubcommand,
}

impl Waveportal {
    pub async fn run(self) -> Result<()> {
        let config = self.opts.load_config()?;
        trace!(?config, "loaded config");
        let view = self.opts.view(&config)?;
        self.cmd.run(&view).await
    }
}
