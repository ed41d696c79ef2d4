use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use super::report::{render_metrics, render_report};
use crate::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HttpAnalyzer};
use crate::models::{Theme, canonical_language};
use crate::playground::export::ExportFormat;
use crate::playground::metrics::compute_metrics;
use crate::playground::{AnalysisOutcome, Playground};
use crate::storage::LocalStore;
use crate::utils::{LogTarget, format_path_with_tilde, get_data_dir, init_logging, read_source};

#[derive(Parser)]
#[command(name = "ai-debug-playground")]
#[command(version)]
#[command(about = "Send code to an analysis service and review bugs, fixes and complexity", long_about = None)]
pub struct Cli {
    /// Base URL of the analysis service
    #[arg(long, global = true, env = "DEBUG_PLAYGROUND_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory holding settings, history and the log file
    #[arg(long, global = true, env = "DEBUG_PLAYGROUND_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a source file (or stdin) and print the report
    Analyze {
        /// Source file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Language of the code (defaults to the saved default language)
        #[arg(short, long)]
        language: Option<String>,
        /// Print the raw response as JSON instead of the report
        #[arg(long)]
        json: bool,
        /// Also export the report (json or markdown)
        #[arg(long, value_name = "FORMAT")]
        export: Option<ExportFormat>,
        /// Export destination (defaults to code-analysis.<ext> in the current directory)
        #[arg(short, long, requires = "export")]
        output: Option<PathBuf>,
    },
    /// Open the interactive playground
    Tui {
        /// Load this file into the editor instead of the last saved code
        file: Option<PathBuf>,
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Browse or clear analysis history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
    /// Toggle between the dark and light theme
    Theme,
    /// Print line, character, function and complexity metrics for code
    Metrics {
        /// Source file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// Export code as a report without analyzing it
    Export {
        /// Source file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Check that the analysis service is reachable
    Ping,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List past analyses, newest first
    List,
    /// Print the full code of one entry
    Show { id: i64 },
    /// Delete all history
    Clear,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print every setting
    Show,
    /// Change one setting
    Set { key: SettingKey, value: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SettingKey {
    Theme,
    DefaultLanguage,
    AutoAnalyze,
    AutoSave,
    ShowMetrics,
}

/// Resolved global options shared by every command
struct AppContext {
    config: ClientConfig,
    data_dir: PathBuf,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let config = ClientConfig::new(&cli.base_url, cli.timeout)?;
        let data_dir = get_data_dir(cli.data_dir.clone())?;
        Ok(Self { config, data_dir })
    }

    fn store(&self) -> Result<LocalStore> {
        LocalStore::open(&self.data_dir)
    }

    fn analyzer(&self) -> Result<HttpAnalyzer> {
        HttpAnalyzer::new(self.config.clone()).context("Failed to create HTTP client")
    }

    fn playground(&self) -> Result<Playground> {
        Ok(Playground::new(self.store()?, Arc::new(self.analyzer()?)))
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let ctx = AppContext::from_cli(&cli)?;
    if matches!(command, Commands::Tui { .. }) {
        init_logging(cli.verbose, LogTarget::File(&ctx.data_dir))?;
    } else {
        init_logging(cli.verbose, LogTarget::Stderr)?;
    }
    log::debug!("Data directory: {}", ctx.data_dir.display());

    match command {
        Commands::Analyze { file, language, json, export, output } => {
            analyze(&ctx, file.clone(), language.as_deref(), *json, *export, output.clone())
        }
        Commands::Tui { file, language } => tui(&ctx, file.clone(), language.as_deref()),
        Commands::History { action } => history(&ctx, action),
        Commands::Settings { action } => settings(&ctx, action),
        Commands::Theme => toggle_theme(&ctx),
        Commands::Metrics { file } => {
            let code = read_source(file.as_deref())?;
            print!("{}", render_metrics(&compute_metrics(&code)));
            Ok(())
        }
        Commands::Export { file, format, output, language } => {
            export(&ctx, file.clone(), *format, output.clone(), language.as_deref())
        }
        Commands::Ping => ping(&ctx),
    }
}

fn parse_language(name: &str) -> Result<&'static str> {
    match canonical_language(name) {
        Some(language) => Ok(language),
        None => bail!("Unsupported language '{}'", name),
    }
}

fn apply_language(playground: &mut Playground, language: Option<&str>) -> Result<()> {
    if let Some(name) = language {
        playground.set_language(parse_language(name)?);
    }
    Ok(())
}

fn analyze(
    ctx: &AppContext,
    file: Option<PathBuf>,
    language: Option<&str>,
    json: bool,
    export: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let code = read_source(file.as_deref())?;
    let mut playground = ctx.playground()?;
    apply_language(&mut playground, language)?;

    match playground.analyze(&code) {
        AnalysisOutcome::Completed => {}
        AnalysisOutcome::Rejected | AnalysisOutcome::Failed | AnalysisOutcome::Busy => {
            let reason = playground.status().map(|s| s.text.as_str()).unwrap_or_default();
            // main prefixes its own "Error: "
            bail!("{}", reason.trim_start_matches("Error: "));
        }
    }

    if json {
        if let Some(result) = playground.last_result() {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    } else if let Some(view) = playground.view() {
        print!("{}", render_report(playground.status(), view));
    }

    if let Some(format) = export {
        let cwd = env::current_dir().context("Failed to resolve current directory")?;
        let path = playground.export_report(&code).write(format, output.as_deref(), &cwd)?;
        eprintln!("Exported to {}", format_path_with_tilde(&path));
    }

    Ok(())
}

fn tui(ctx: &AppContext, file: Option<PathBuf>, language: Option<&str>) -> Result<()> {
    let initial_code = match file {
        Some(path) => Some(read_source(Some(&path))?),
        None => None,
    };
    let mut playground = ctx.playground()?;
    apply_language(&mut playground, language)?;
    crate::tui::run_interactive(playground, initial_code)
}

fn history(ctx: &AppContext, action: &HistoryCommand) -> Result<()> {
    let mut store = ctx.store()?;
    match action {
        HistoryCommand::List => {
            let entries = crate::storage::load_history(&store);
            if entries.is_empty() {
                println!("No history yet");
            }
            for entry in entries {
                let first_line = entry.code.lines().next().unwrap_or("");
                println!(
                    "{}  {}  {}  {} bugs  {}",
                    entry.id, entry.timestamp, entry.language, entry.bug_count, first_line
                );
            }
        }
        HistoryCommand::Show { id } => match crate::storage::find_entry(&store, *id) {
            Some(entry) => {
                eprintln!("{} | {} | {} bugs", entry.timestamp, entry.language, entry.bug_count);
                println!("{}", entry.full_code);
            }
            None => bail!("No history entry with id {}", id),
        },
        HistoryCommand::Clear => {
            crate::storage::clear_history(&mut store)?;
            println!("History cleared");
        }
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => bail!("Expected true or false, got '{}'", other),
    }
}

fn settings(ctx: &AppContext, action: &SettingsCommand) -> Result<()> {
    let mut store = ctx.store()?;
    let mut settings = crate::storage::load_settings(&store);

    match action {
        SettingsCommand::Show => {
            println!("theme: {}", settings.theme);
            println!("default-language: {}", settings.default_language);
            println!("auto-analyze: {}", settings.auto_analyze);
            println!("auto-save: {}", settings.auto_save);
            println!("show-metrics: {}", settings.show_metrics);
            println!("data-dir: {}", format_path_with_tilde(&ctx.data_dir));
        }
        SettingsCommand::Set { key, value } => {
            match key {
                SettingKey::Theme => {
                    let theme: Theme = value.parse()?;
                    crate::storage::set_theme(&mut store, &mut settings, theme)?;
                }
                SettingKey::DefaultLanguage => {
                    let language = parse_language(value)?;
                    crate::storage::set_default_language(&mut store, &mut settings, language)?;
                }
                SettingKey::AutoAnalyze => {
                    crate::storage::set_auto_analyze(&mut store, &mut settings, parse_flag(value)?)?;
                }
                SettingKey::AutoSave => {
                    crate::storage::set_auto_save(&mut store, &mut settings, parse_flag(value)?)?;
                }
                SettingKey::ShowMetrics => {
                    crate::storage::set_show_metrics(&mut store, &mut settings, parse_flag(value)?)?;
                }
            }
            println!("Saved");
        }
    }
    Ok(())
}

fn toggle_theme(ctx: &AppContext) -> Result<()> {
    let mut store = ctx.store()?;
    let mut settings = crate::storage::load_settings(&store);
    let theme = crate::storage::toggle_theme(&mut store, &mut settings)?;
    println!("Theme: {}", theme);
    Ok(())
}

fn export(
    ctx: &AppContext,
    file: Option<PathBuf>,
    format: ExportFormat,
    output: Option<PathBuf>,
    language: Option<&str>,
) -> Result<()> {
    let code = read_source(file.as_deref())?;
    let mut playground = ctx.playground()?;
    apply_language(&mut playground, language)?;

    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    let path = playground.export_report(&code).write(format, output.as_deref(), &cwd)?;
    println!("Exported to {}", format_path_with_tilde(&path));
    Ok(())
}

fn ping(ctx: &AppContext) -> Result<()> {
    let analyzer = ctx.analyzer()?;
    let health = analyzer
        .health()
        .with_context(|| format!("Analyzer at {} is not reachable", ctx.config.base_url))?;
    println!("{}: {}", health.status, health.message);
    Ok(())
}
