use anyhow::Context;
use clap::Parser;
use envelope3d::config::Args;
use envelope3d::content::CardContent;
use envelope3d::logging::init_logging;
use envelope3d::terminal;
use log::info;

/// Main function
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_dir = args.log_dir();
    init_logging(&args.log_level, &log_dir)
        .with_context(|| format!("could not start logging in {}", log_dir.display()))?;

    let content = match &args.message {
        Some(path) => CardContent::load(path).context("could not load the card message")?,
        None => CardContent::builtin(),
    };
    info!(
        "event=content_loaded title={:?} sections={} buttons={}",
        content.title,
        content.sections.len(),
        content.buttons.len()
    );

    terminal::run(&args, content)?;
    Ok(())
}
