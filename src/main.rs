mod cmd;

use clap::Parser;
use cmd::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Show(a) => a.run()?,
        Commands::Compile(a) => a.run()?,
        Commands::Decode(a) => a.run()?,
        Commands::Random(a) => a.run()?,
    }
    Ok(())
}
