use clap::Parser;
use eyre::Result;
use waveportal_cli::{args::Waveportal, handler, utils};

fn main() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();
    utils::enable_paint();
    let args = Waveportal::parse();
    main_args(args)
}

#[tokio::main]
async fn main_args(args: Waveportal) -> Result<()> {
    args.run().await
}
