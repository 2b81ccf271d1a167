use clap::Parser;

/// Post a build status message to a Slack incoming webhook.
///
/// Inputs are read from the environment (`webhook_url`, `color`, `title`, ...).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Build and print the JSON payload without sending it
    #[arg(long)]
    pub dry_run: bool,
}
