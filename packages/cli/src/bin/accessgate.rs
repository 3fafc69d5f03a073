use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use url::Url;

use accessgate_cli::{Gate, GateConfig, PageLoadReport};
use accessgate_view::{DisplayState, MemoryPage};

#[derive(Parser)]
#[command(name = "accessgate")]
#[command(about = "AccessGate - token-gated page bootstrap diagnostics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gate against a page URL and report the resulting state
    Check {
        /// Full page URL including the token query parameter
        page_url: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    accessgate_cli::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { page_url, json } => check(&page_url, json).await,
        Commands::Config { json } => show_config(json),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(2);
        }
    }
}

async fn check(page_url: &str, json: bool) -> anyhow::Result<i32> {
    let location = Url::parse(page_url).with_context(|| format!("Invalid page URL: {}", page_url))?;
    let config = GateConfig::from_env().context("Failed to load configuration")?;
    let layout = config.layout.clone();
    let gate = Gate::from_config(config).context("Failed to build validation client")?;

    let mut page = MemoryPage::new(layout).with_known_fields();
    let report = gate.run(&location, &mut page).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &page);
    }

    Ok(if report.state.is_active() { 0 } else { 1 })
}

fn print_report(report: &PageLoadReport, page: &MemoryPage) {
    match &report.state {
        DisplayState::Active { warning } => {
            println!("{} {}", "✅".green(), "Access granted".green().bold());
            if let Some(banner) = page.banners().first() {
                println!("{} {}", banner.headline.yellow().bold(), banner.body);
                println!("   {} {}", banner.action.label.cyan(), banner.action.href);
            } else if warning.is_none() {
                println!("{}", "   No expiry warning".dimmed());
            }
        }
        DisplayState::Denied { .. } | DisplayState::Expired { .. } => {
            if let Some(view) = page.body() {
                println!("{} {}", view.icon, view.title.red().bold());
                println!("   {}", view.message);
                println!("   {} {}", view.action.label.cyan(), view.action.href);
            }
        }
        DisplayState::Loading => println!("{}", "Page never left the loading state".red()),
    }

    if let Some(kind) = report.error {
        println!("{} {}", "Reason:".cyan(), kind);
    }
    if !report.validated {
        println!("{}", "Validation endpoint was not contacted".dimmed());
    }

    if let Some(populated) = &report.populated {
        println!(
            "{} {} populated, {} without value",
            "Fields:".cyan(),
            populated.populated.len(),
            populated.missing_value.len()
        );
        for input in page.inputs().iter().filter(|input| !input.value.is_empty()) {
            let key = input.id.as_deref().or(input.name.as_deref()).unwrap_or("?");
            println!("   {:<18} {}", key, input.value);
        }
    }
}

fn show_config(json: bool) -> anyhow::Result<i32> {
    let summary = GateConfig::from_env()
        .context("Failed to load configuration")?
        .summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(0);
    }

    println!("{}", "AccessGate configuration".bold());
    let rows = [
        ("Endpoint", summary.endpoint),
        ("Transport", summary.transport),
        ("Envelope", summary.envelope),
        (
            "Timeout",
            summary
                .timeout_secs
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "none".to_string()),
        ),
        ("Token param", summary.token_param),
        ("Token prefix", summary.token_prefix),
        ("Warning days", summary.warning_days.to_string()),
        ("Purchase URL", summary.purchase_url),
        ("Extend URL", summary.extend_url),
        ("Loading id", summary.loading_id),
        ("Content id", summary.content_id),
    ];
    for (label, value) in rows {
        println!("  {:<14} {}", format!("{}:", label).cyan(), value);
    }
    Ok(0)
}
