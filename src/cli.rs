// command line interface

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::Result;

use crate::tui::ThemeKind;
use crate::{
    Console, DEFAULT_SERVICE_URL, DecisionService, Error, HttpDecisionService, ModelPicker, Output,
    RequestState, logging,
};

#[derive(Parser)]
#[command(name = "ctrlq", about = "Query an LLM control plane and inspect its verdict")]
struct Cli {
    /// decision service base url (requests go to <url>/query)
    #[arg(long, short, env = "CTRLQ_SERVICE_URL", default_value = DEFAULT_SERVICE_URL, global = true)]
    service: String,

    /// send an embedding model with every query
    #[arg(long, global = true)]
    select_model: bool,

    /// initial embedding model (implies --select-model)
    #[arg(long, short, global = true)]
    model: Option<String>,

    /// color theme, detected from the terminal when omitted
    #[arg(long, short)]
    theme: Option<ThemeKind>,

    /// write diagnostics to this file while the tui runs
    #[arg(long, env = "CTRLQ_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// submit one query and print the decision trace
    Ask {
        /// query text, sent as-is
        query: String,

        /// print the raw response json instead of the trace
        #[arg(long)]
        json: bool,
    },

    /// list the embedding models the console offers
    Models,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let console = build_console(cli.select_model, cli.model.as_deref())?;

    match cli.command {
        Some(Commands::Ask { query, json }) => {
            logging::init_stderr()?;
            let service = HttpDecisionService::new(&cli.service)?;
            ask(console, &service, query, json).await
        }

        Some(Commands::Models) => {
            let picker = console.models().cloned().unwrap_or_else(ModelPicker::builtin);
            for (i, model) in picker.models().iter().enumerate() {
                let marker = if i == picker.index() { "*" } else { " " };
                println!("{marker} {model}");
            }
            Ok(())
        }

        None => {
            if let Some(path) = &cli.log_file {
                logging::init_file(path)?;
            }
            let service = Arc::new(HttpDecisionService::new(&cli.service)?);
            Ok(crate::tui::run(console, service, cli.service, cli.theme).await?)
        }
    }
}

fn build_console(select_model: bool, model: Option<&str>) -> Result<Console, Error> {
    if !select_model && model.is_none() {
        return Ok(Console::new());
    }

    let mut picker = ModelPicker::builtin();
    if let Some(id) = model {
        picker.select(id)?;
    }
    Ok(Console::with_models(picker))
}

/// One-shot submit. A blank query sends nothing and prints nothing.
pub async fn ask(
    mut console: Console,
    service: &dyn DecisionService,
    query: String,
    json: bool,
) -> Result<()> {
    console.set_text(query);
    if !console.run(service).await {
        tracing::debug!("blank query, nothing sent");
        return Ok(());
    }

    if let RequestState::Failed(message) = console.state() {
        return Err(miette::miette!("{message}"));
    }

    match console.response() {
        Some(response) if json => Output::raw(response)?,
        _ => Output::pretty(&console),
    }
    Ok(())
}
