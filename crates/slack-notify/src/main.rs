use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tokio::runtime::Runtime;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use slack_notify::cli::Cli;
use slack_notify::config::Settings;
use slack_notify::error::NotifyError;
use slack_notify::payload::build_payload;
use slack_notify::sink::post_slack;

use tabled::settings::{object::Columns, Alignment, Modify, Padding, Style};
use tabled::{Table, Tabled};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::from_env();

    init_tracing(settings.is_debug_mode || cli.verbose > 0);
    print_settings(&settings);

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    settings.validate()?;

    let payload_json = build_payload(settings).to_json()?;
    debug!("JSON payload: {payload_json}");

    if cli.dry_run {
        println!("{payload_json}");
        return Ok(());
    }

    let rt = Runtime::new()?;
    let body = rt.block_on(post_slack(&settings.webhook_url, &payload_json))?;
    debug!("Response from Slack: {body}");

    println!();
    println!("{}", "Slack message successfully sent! 🚀".green());
    println!();
    Ok(())
}

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("slack_notify={level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .without_time()
        .init();
}

fn print_settings(settings: &Settings) {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "input")]
        name: &'static str,
        #[tabled(rename = "value")]
        value: String,
    }

    let table = |rows: Vec<(&'static str, String)>| {
        let mut table = Table::new(rows.into_iter().map(|(name, value)| Row { name, value }));
        table
            .with(Style::modern())
            .with(Modify::new(Columns::single(0)).with(Alignment::left()))
            .with(Modify::new(Columns::new(0..)).with(Padding::new(1, 1, 0, 0)));
        table
    };

    println!();
    println!("{}", "Slack configs:".blue());
    println!("{}", table(settings.slack_rows()));
    println!();
    println!("{}", "Other configs:".blue());
    println!("{}", table(settings.other_rows()));
    println!();
}

fn report(err: &anyhow::Error) {
    let Some(notify_err) = err.downcast_ref::<NotifyError>() else {
        println!("{} {err:#}", "Error:".red());
        return;
    };

    println!();
    match notify_err {
        NotifyError::DeliveryRejected { body, .. } => {
            println!("{}", notify_err.heading().red());
            println!("Response from Slack: {body}");
        }
        other => println!("{} {other}", other.heading().red()),
    }
    println!();
}
