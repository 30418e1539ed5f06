use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{
    Confirm, CustomType, CustomUserError, InquireError, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};
use std::{process::ExitCode, sync::Arc};

use cuaca_core::{
    Config, Coordinates, FileStorage, FixedLocator, Language, Orchestrator, RecentSearches,
    Renderer, SearchError, SearchOutcome, locale::Label, open_meteo_from_config,
};

use crate::terminal::TerminalDisplay;

const PROMPT: Label = Label::new("Nama kota:", "City name:");
const PROMPT_HELP: Label = Label::new(
    "'@' untuk lokasi Anda, Esc untuk keluar",
    "'@' for your position, Esc to quit",
);
const NO_RECENT: Label = Label::new("Belum ada pencarian.", "No recent searches.");

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cuaca", version, about = "City and location weather lookup")]
pub struct Cli {
    /// Display language ("id" or "en"); overrides the configured one.
    #[arg(long, global = true, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Without a subcommand, prompt for cities until cancelled.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set language, timezone and home position.
    Configure,

    /// Show weather for a city.
    Search {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Show weather at a position (defaults to the configured home).
    Here {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// List recent searches.
    Recent {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let mut config = Config::load()?;
        if let Some(lang) = self.lang {
            config.language = lang;
        }

        match self.command {
            Some(Command::Configure) => {
                configure(&mut config)?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Search { city }) => {
                let orchestrator = build_orchestrator(&config, None)?;
                Ok(exit_code(orchestrator.search_city(&city.join(" ")).await))
            }
            Some(Command::Here { lat, lon }) => {
                let position = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon)).or(config.home);
                let orchestrator = build_orchestrator(&config, position)?;
                Ok(exit_code(orchestrator.search_here().await))
            }
            Some(Command::Recent { clear }) => {
                let orchestrator = build_orchestrator(&config, None)?;
                if clear {
                    orchestrator.clear_recent()?;
                    return Ok(ExitCode::SUCCESS);
                }
                let searches = orchestrator.recent()?;
                if searches.is_empty() {
                    println!("{}", NO_RECENT.get(config.language));
                }
                for city in searches {
                    println!("{city}");
                }
                Ok(ExitCode::SUCCESS)
            }
            None => interactive(&config).await,
        }
    }
}

fn build_orchestrator(
    config: &Config,
    position: Option<Coordinates>,
) -> anyhow::Result<Orchestrator> {
    let api = Arc::new(open_meteo_from_config(config).context("Failed to create HTTP client")?);
    let storage = Arc::new(FileStorage::new(Config::storage_file_path()?));

    Ok(Orchestrator::new(
        api.clone(),
        api,
        Arc::new(FixedLocator::new(position)),
        RecentSearches::new(storage),
        Arc::new(TerminalDisplay::new(config.language)),
        Renderer::new(config.language),
    ))
}

/// The error itself was already shown by the display.
fn exit_code(result: Result<SearchOutcome, SearchError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

async fn interactive(config: &Config) -> anyhow::Result<ExitCode> {
    let orchestrator = build_orchestrator(config, config.home)?;
    if let Err(e) = orchestrator.load_recent() {
        tracing::warn!("Could not load recent searches: {e}");
    }

    loop {
        let suggester = RecentSuggester { searches: orchestrator.recent().unwrap_or_default() };
        let answer = Text::new(PROMPT.get(config.language))
            .with_help_message(PROMPT_HELP.get(config.language))
            .with_autocomplete(suggester)
            .prompt();

        let result = match answer {
            Ok(input) if input.trim() == "@" => orchestrator.search_here().await,
            Ok(input) => orchestrator.search_city(&input).await,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = result {
            tracing::debug!("Search ended with: {e}");
        }
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let languages = Language::all().to_vec();
    let cursor = languages.iter().position(|l| *l == config.language).unwrap_or(0);
    let language = Select::new("Language:", languages).with_starting_cursor(cursor).prompt()?;

    let timezone = Text::new("Timezone (IANA name):").with_default(&config.timezone).prompt()?;

    let set_home = Confirm::new("Set a home position for `cuaca here`?")
        .with_default(config.home.is_some())
        .prompt()?;

    if set_home {
        let current = config.home.unwrap_or(Coordinates::new(-6.2, 106.8));
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_default(current.latitude)
            .with_error_message("Please type a number, e.g. -6.2")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_default(current.longitude)
            .with_error_message("Please type a number, e.g. 106.8")
            .prompt()?;
        config.set_home(latitude, longitude)?;
    } else {
        config.home = None;
    }

    config.language = language;
    config.timezone = timezone.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Offers recent searches containing the typed text, ignoring case.
#[derive(Debug, Clone)]
struct RecentSuggester {
    searches: Vec<String>,
}

impl RecentSuggester {
    fn matching(&self, input: &str) -> Vec<String> {
        let needle = input.trim().to_lowercase();
        self.searches
            .iter()
            .filter(|s| s.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl Autocomplete for RecentSuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(self.matching(input))
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}
