use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use gemini_cli::cli::{Cli, Commands, GenerateArgs};
use gemini_cli::{commands, logging, parts, GeminiClient, KeyStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = commands::key_store(cli.config)?;

    match cli.command {
        Commands::SetConfig { key } => {
            commands::set_config(&store, &key, &mut io::stdout())
                .context("Error saving API key")?;
        }
        Commands::Generate(args) => {
            let parts = parse_parts_or_usage(&args)?;
            let client = client_from(&store)?;
            commands::generate(&client, &args, &parts, &mut io::stdout())
                .await
                .context("Error generating content")?;
        }
        Commands::ListModels => {
            let client = client_from(&store)?;
            commands::list_models(&client, &mut io::stdout())
                .await
                .context("Error listing models")?;
        }
    }
    Ok(())
}

fn client_from(store: &KeyStore) -> Result<GeminiClient> {
    let api_key = store.load().context("Error loading API key")?;
    Ok(GeminiClient::new(api_key))
}

/// Argument errors also show the `generate` usage text.
fn parse_parts_or_usage(args: &GenerateArgs) -> Result<Vec<parts::ParsedPart>> {
    let parsed = parts::parse_input_parts(args.parts.as_slice());
    let parsed = match parsed {
        Ok(parsed) if !parsed.is_empty() || !args.system_instruction.is_empty() => Ok(parsed),
        Ok(_) => Err(anyhow::anyhow!(
            "at least one input part (text/file) or system-instruction is required for generate"
        )),
        Err(e) => Err(anyhow::Error::new(e).context("Error parsing input parts")),
    };

    if parsed.is_err() {
        if let Some(generate) = Cli::command().find_subcommand_mut("generate") {
            eprintln!("{}", generate.render_help());
        }
    }
    parsed
}
