// Engine main entry point: load the ledger export, print the dashboard, optionally drill down.
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::{EngineSettings, OutputFormat};
use engine::data::LedgerCsvParser;
use engine::presentation::{renderer_for, SnapshotRenderer};
use engine::services::commands::HELP;
use engine::services::{apply, Command, Outcome, ViewController};
use engine::EngineError;
use shared::models::LedgerRow;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ledger-dashboard", version, about = "Painel financeiro: totais por departamento e natureza")]
struct Cli {
    /// Arquivo de configuração JSON (padrão: configuração embutida)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Exportação do razão, separada por ';'
    #[arg(short = 'd', long = "data")]
    data: Option<PathBuf>,

    /// Abre o painel já filtrado por este departamento
    #[arg(long = "department")]
    department: Option<String>,

    /// Formato de saída
    #[arg(long = "format", value_enum)]
    format: Option<OutputFormat>,

    /// Atalho para --format json
    #[arg(long = "json", conflicts_with = "format")]
    json: bool,

    /// Quantidade de cards de departamento
    #[arg(long = "top")]
    top: Option<usize>,

    /// Lê comandos de filtro da entrada padrão
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout only carries the rendered dashboard.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        tracing::error!("{:#}", err);
        let code = err
            .downcast_ref::<EngineError>()
            .map_or(1, EngineError::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => EngineSettings::from_file(path)?,
        None => EngineSettings::embedded()?,
    };
    apply_overrides(&cli, &mut settings);
    settings.validate()?;

    let rows = load_rows(&settings).await?;
    let mut controller =
        ViewController::load(rows, &settings).context("Cannot build the dashboard")?;
    let renderer = renderer_for(settings.output);

    if let Some(department) = cli.department.as_deref() {
        controller.filter_by_department(department);
    }
    println!("{}", renderer.render(controller.snapshot())?);

    if cli.interactive {
        interactive_loop(&mut controller, renderer.as_ref()).await?;
    }
    info!(session_id = %controller.session_id(), "Session finished");
    Ok(())
}

/// Command-line flags win over the configuration file.
fn apply_overrides(cli: &Cli, settings: &mut EngineSettings) {
    if let Some(data) = &cli.data {
        settings.data_path = data.clone();
    }
    if cli.json {
        settings.output = OutputFormat::Json;
    } else if let Some(format) = cli.format {
        settings.output = format;
    }
    if let Some(top) = cli.top {
        settings.top_departments = top;
    }
}

// An empty export is passed on as-is; `ViewController::load` refuses it with EmptyDataset.
async fn load_rows(settings: &EngineSettings) -> Result<Vec<LedgerRow>> {
    let parser = LedgerCsvParser::new(settings.delimiter()?);
    let path = settings.data_path.clone();
    info!(path = %path.display(), "Loading ledger export");

    let rows = tokio::task::spawn_blocking(move || parser.load_rows_from_csv(&path))
        .await
        .context("Ledger loader task failed")?
        .with_context(|| format!("Failed to load '{}'", settings.data_path.display()))?;
    Ok(rows)
}

async fn interactive_loop(
    controller: &mut ViewController,
    renderer: &(dyn SnapshotRenderer + Send + Sync),
) -> Result<()> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        match apply(controller, command) {
            Outcome::Render(snapshot) => println!("{}", renderer.render(snapshot)?),
            Outcome::ShowHelp => println!("{}", HELP),
            Outcome::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overridden(args: &[&str]) -> EngineSettings {
        let cli = Cli::try_parse_from(std::iter::once("ledger-dashboard").chain(args.iter().copied())).unwrap();
        let mut settings = EngineSettings::default();
        apply_overrides(&cli, &mut settings);
        settings
    }

    #[test]
    fn test_no_flags_keep_settings() {
        assert_eq!(overridden(&[]), EngineSettings::default());
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = overridden(&["--data", "extrato.csv", "--format", "json", "--top", "3"]);
        assert_eq!(settings.data_path, PathBuf::from("extrato.csv"));
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.top_departments, 3);
    }

    #[test]
    fn test_json_shortcut() {
        assert_eq!(overridden(&["--json"]).output, OutputFormat::Json);
    }

    #[test]
    fn test_json_conflicts_with_format() {
        let result = Cli::try_parse_from(["ledger-dashboard", "--json", "--format", "text"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_department_and_interactive_flags() {
        let cli = Cli::try_parse_from(["ledger-dashboard", "--department", "RECURSOS HUMANOS", "-i"]).unwrap();
        assert_eq!(cli.department.as_deref(), Some("RECURSOS HUMANOS"));
        assert!(cli.interactive);
    }
}
