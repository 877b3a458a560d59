use anyhow::{Context, Result};
use byte_unit::{Byte, UnitType};
use cli::Cli;
use collector::{collect_invoice, LinePrompter, Prompter, TerminalPrompter};
use indicatif::{ProgressBar, ProgressStyle};
use sinks::{render_invoice, InvoiceStyle};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod collector;
mod invoice;
mod sinks {
    mod pdf;
    pub use pdf::{render_invoice, InvoiceStyle, DEFAULT_OUTFILE};
}
mod validation;

fn main() -> ExitCode {
    init_logging();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Log to stderr, quietly unless `RUST_LOG` asks for more.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let style = match &cli.style {
        Some(path) => InvoiceStyle::load(path)?,
        None => InvoiceStyle::default(),
    };

    let invoice = if std::io::stdin().is_terminal() {
        let mut prompter = TerminalPrompter::new();
        prompter.message(&format!(
            "\n{}\n",
            console::style("Welcome to the Interactive Invoice Generator!").bold()
        ))?;
        dialoguer::Input::<String>::new()
            .with_prompt("Press Enter to start your invoice")
            .allow_empty(true)
            .interact_text()
            .with_context(|| "Failed to start the invoice")?;
        collect_invoice(&mut prompter)?
    } else {
        log::info!("stdin is not a terminal, reading answers line by line");
        let mut prompter = LinePrompter::new(std::io::stdin().lock(), std::io::stdout());
        collect_invoice(&mut prompter)?
    };

    println!("\nCreating your invoice PDF...");
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );
    progress.set_message("Rendering PDF...");

    let stats = render_invoice(&invoice, &style, &cli.output, &progress)
        .with_context(|| "Failed to render invoice")?;
    progress.finish_and_clear();

    let size = Byte::from_u64(stats.bytes_written).get_appropriate_unit(UnitType::Binary);
    println!(
        "\n{} Your invoice has been generated as '{}' ({} page(s), {size:.1})",
        console::style("Success!").green().bold(),
        cli.output.display(),
        stats.page_count,
    );

    Ok(())
}
