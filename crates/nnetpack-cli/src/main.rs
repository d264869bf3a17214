use anyhow::Result;
use clap::Parser;
use nnetpack_cli::cli::Cli;
use nnetpack_cli::{print_layout, print_summary, run};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    std::env::set_var("RUST_LOG", &cli.log);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let layout = run(&cli)?;

    let mut stdout = std::io::stdout().lock();
    if cli.layout {
        print_layout(&mut stdout, &layout)?;
    } else {
        print_summary(&mut stdout, &layout, "OK")?;
        tracing::info!(
            path = %cli.path.display(),
            bytes = layout.total_bytes(),
            "round trip verified"
        );
    }
    Ok(())
}
