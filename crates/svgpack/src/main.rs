//! svgpack optimises SVG assets and builds them into symbol sprites.

use clap::Parser;
use svgpack::args::Args;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Args::parse().run()
}
