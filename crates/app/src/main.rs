mod logging;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::countdown::TimeoutMode;
use quiz_core::model::{Difficulty, Language};
use services::{
    Clock, ContentSource, CountdownConfig, DirectoryContentSource, HttpContentConfig,
    HttpContentSource, RandomSource, SeededRandom, SessionConfig, ThreadRandom,
};
use tracing::info;
use ui::{App, UiApp, build_app_context};

const ENV_CONTENT_URL: &str = "QUIZ_CONTENT_URL";
const ENV_CONTENT_DIR: &str = "QUIZ_CONTENT_DIR";
const ENV_LANGUAGE: &str = "QUIZ_LANGUAGE";
const ENV_LANGUAGES: &str = "QUIZ_LANGUAGES";
const ENV_DIFFICULTY: &str = "QUIZ_DIFFICULTY";
const ENV_ROUND_SECS: &str = "QUIZ_ROUND_SECS";
const ENV_TIMEOUT_MODE: &str = "QUIZ_TIMEOUT_MODE";
const ENV_SEED: &str = "QUIZ_SEED";

const DEFAULT_CONTENT_URL: &str = "http://127.0.0.1:8080/";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_ROUND_SECS: u32 = 60;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidValue { flag: &'static str, raw: String },
    Rejected { flag: &'static str, source: quiz_core::Error },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::Rejected { flag, source } => write!(f, "invalid {flag} value: {source}"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_value<T: FromStr>(flag: &'static str, raw: &str) -> Result<T, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidValue {
        flag,
        raw: raw.to_string(),
    })
}

/// Parse a domain value, keeping the domain error for the message.
fn parse_domain<T>(flag: &'static str, raw: &str) -> Result<T, ArgsError>
where
    T: FromStr,
    T::Err: Into<quiz_core::Error>,
{
    raw.trim().parse().map_err(|err: T::Err| ArgsError::Rejected {
        flag,
        source: err.into(),
    })
}

fn parse_languages(flag: &'static str, raw: &str) -> Result<Vec<Language>, ArgsError> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| parse_domain(flag, code))
        .collect()
}

fn parse_round_secs(flag: &'static str, raw: &str) -> Result<u32, ArgsError> {
    match parse_value::<u32>(flag, raw)? {
        0 => Err(ArgsError::InvalidValue {
            flag,
            raw: raw.to_string(),
        }),
        secs => Ok(secs),
    }
}

fn parse_content_url(flag: &'static str, raw: &str) -> Result<HttpContentConfig, ArgsError> {
    HttpContentConfig::new(raw.trim()).map_err(|_| ArgsError::InvalidValue {
        flag,
        raw: raw.to_string(),
    })
}

struct DesktopApp {
    source: Arc<dyn ContentSource>,
    random: Arc<dyn RandomSource>,
    language: Language,
    languages: Vec<Language>,
    difficulty: Difficulty,
    config: SessionConfig,
    round_duration: Duration,
}

impl UiApp for DesktopApp {
    fn content_source(&self) -> Arc<dyn ContentSource> {
        Arc::clone(&self.source)
    }

    fn random_source(&self) -> Arc<dyn RandomSource> {
        Arc::clone(&self.random)
    }

    fn initial_language(&self) -> Language {
        self.language.clone()
    }

    fn initial_difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn languages(&self) -> Vec<Language> {
        self.languages.clone()
    }

    fn session_config(&self) -> SessionConfig {
        self.config
    }

    fn round_duration(&self) -> Duration {
        self.round_duration
    }

    fn clock(&self) -> Clock {
        Clock::default_clock()
    }
}

#[derive(Debug)]
enum ContentLocation {
    Http(HttpContentConfig),
    Directory(PathBuf),
}

#[derive(Debug)]
struct Args {
    content: ContentLocation,
    language: Language,
    languages: Vec<Language>,
    difficulty: Difficulty,
    round_secs: u32,
    timeout_mode: TimeoutMode,
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --content-url <url>      content host serving dict/<language>/...");
    eprintln!("  --content-dir <path>     read content from a local directory instead");
    eprintln!("  --language <code>        language of the first round");
    eprintln!("  --languages <a,b,...>    languages offered in the picker");
    eprintln!("  --difficulty <level>     easy | normal | hard");
    eprintln!("  --round-secs <secs>      time budget per round");
    eprintln!("  --timeout-mode <mode>    once | repeat");
    eprintln!("  --seed <n>               deterministic instance selection");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --content-url {DEFAULT_CONTENT_URL}");
    eprintln!("  --language {DEFAULT_LANGUAGE}");
    eprintln!("  --difficulty normal");
    eprintln!("  --round-secs {DEFAULT_ROUND_SECS}");
    eprintln!("  --timeout-mode once");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {ENV_CONTENT_URL}, {ENV_CONTENT_DIR}, {ENV_LANGUAGE}, {ENV_LANGUAGES},");
    eprintln!("  {ENV_DIFFICULTY}, {ENV_ROUND_SECS}, {ENV_TIMEOUT_MODE}, {ENV_SEED},");
    eprintln!("  {} (log filter, default info)", logging::LOG_ENV);
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut content_url = match env(ENV_CONTENT_URL) {
            Some(raw) => parse_content_url(ENV_CONTENT_URL, &raw)?,
            None => parse_content_url(ENV_CONTENT_URL, DEFAULT_CONTENT_URL)?,
        };
        let mut content_dir = env(ENV_CONTENT_DIR)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        let mut language: Language = match env(ENV_LANGUAGE) {
            Some(raw) => parse_domain(ENV_LANGUAGE, &raw)?,
            None => parse_domain(ENV_LANGUAGE, DEFAULT_LANGUAGE)?,
        };
        let mut languages = match env(ENV_LANGUAGES) {
            Some(raw) => parse_languages(ENV_LANGUAGES, &raw)?,
            None => Vec::new(),
        };
        let mut difficulty = match env(ENV_DIFFICULTY) {
            Some(raw) => parse_domain(ENV_DIFFICULTY, &raw)?,
            None => Difficulty::default(),
        };
        let mut round_secs = match env(ENV_ROUND_SECS) {
            Some(raw) => parse_round_secs(ENV_ROUND_SECS, &raw)?,
            None => DEFAULT_ROUND_SECS,
        };
        let mut timeout_mode = match env(ENV_TIMEOUT_MODE) {
            Some(raw) => parse_domain(ENV_TIMEOUT_MODE, &raw)?,
            None => TimeoutMode::default(),
        };
        let mut seed = match env(ENV_SEED) {
            Some(raw) => Some(parse_value(ENV_SEED, &raw)?),
            None => None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content-url" => {
                    let value = require_value(args, "--content-url")?;
                    content_url = parse_content_url("--content-url", &value)?;
                    content_dir = None;
                }
                "--content-dir" => {
                    let value = require_value(args, "--content-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidValue {
                            flag: "--content-dir",
                            raw: value,
                        });
                    }
                    content_dir = Some(PathBuf::from(value));
                }
                "--language" => {
                    let value = require_value(args, "--language")?;
                    language = parse_domain("--language", &value)?;
                }
                "--languages" => {
                    let value = require_value(args, "--languages")?;
                    languages = parse_languages("--languages", &value)?;
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    difficulty = parse_domain("--difficulty", &value)?;
                }
                "--round-secs" => {
                    let value = require_value(args, "--round-secs")?;
                    round_secs = parse_round_secs("--round-secs", &value)?;
                }
                "--timeout-mode" => {
                    let value = require_value(args, "--timeout-mode")?;
                    timeout_mode = parse_domain("--timeout-mode", &value)?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    seed = Some(parse_value("--seed", &value)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if languages.is_empty() {
            languages.push(language.clone());
        }

        let content = match content_dir {
            Some(root) => ContentLocation::Directory(root),
            None => ContentLocation::Http(content_url),
        };

        Ok(Self {
            content,
            language,
            languages,
            difficulty,
            round_secs,
            timeout_mode,
            seed,
        })
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            countdown: CountdownConfig {
                mode: self.timeout_mode,
                ..CountdownConfig::default()
            },
            ..SessionConfig::default()
        }
    }
}

fn build_content_source(
    location: ContentLocation,
) -> Result<Arc<dyn ContentSource>, Box<dyn std::error::Error>> {
    Ok(match location {
        ContentLocation::Http(config) => {
            info!(base_url = %config.base_url, "serving content over http");
            Arc::new(HttpContentSource::new(config)?)
        }
        ContentLocation::Directory(root) => {
            info!(root = %root.display(), "serving content from directory");
            Arc::new(DirectoryContentSource::new(root))
        }
    })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config = parsed.session_config();
    let random: Arc<dyn RandomSource> = match parsed.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };
    info!(
        language = %parsed.language,
        difficulty = %parsed.difficulty,
        round_secs = parsed.round_secs,
        timeout_mode = %parsed.timeout_mode,
        seeded = parsed.seed.is_some(),
        "starting quiz"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        source: build_content_source(parsed.content)?,
        random,
        language: parsed.language,
        languages: parsed.languages,
        difficulty: parsed.difficulty,
        config,
        round_duration: Duration::seconds(i64::from(parsed.round_secs)),
    });

    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        let mut args = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut args, |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_args_or_env() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.language.as_str(), "en");
        assert_eq!(args.languages, vec![args.language.clone()]);
        assert_eq!(args.difficulty, Difficulty::Normal);
        assert_eq!(args.round_secs, DEFAULT_ROUND_SECS);
        assert_eq!(args.timeout_mode, TimeoutMode::Once);
        assert!(args.seed.is_none());
        assert!(matches!(args.content, ContentLocation::Http(_)));
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--language", "da", "--difficulty", "hard", "--timeout-mode", "repeat"],
            &[(ENV_LANGUAGE, "en"), (ENV_DIFFICULTY, "easy"), (ENV_SEED, "9")],
        )
        .unwrap();
        assert_eq!(args.language.as_str(), "da");
        assert_eq!(args.difficulty, Difficulty::Hard);
        assert_eq!(args.timeout_mode, TimeoutMode::Repeat);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.session_config().countdown.mode, TimeoutMode::Repeat);
    }

    #[test]
    fn content_dir_takes_precedence_over_url() {
        let args = parse(&["--content-dir", "/srv/quiz"], &[]).unwrap();
        match args.content {
            ContentLocation::Directory(root) => assert_eq!(root, PathBuf::from("/srv/quiz")),
            ContentLocation::Http(_) => panic!("expected directory content"),
        }
    }

    #[test]
    fn language_list_is_parsed() {
        let args = parse(&["--languages", "en, da,,sv"], &[]).unwrap();
        let codes: Vec<&str> = args.languages.iter().map(Language::as_str).collect();
        assert_eq!(codes, vec!["en", "da", "sv"]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            parse(&["--round-secs", "0"], &[]),
            Err(ArgsError::InvalidValue { flag: "--round-secs", .. })
        ));
        assert!(matches!(
            parse(&["--content-url", "not a url"], &[]),
            Err(ArgsError::InvalidValue { flag: "--content-url", .. })
        ));
        assert!(matches!(
            parse(&["--language"], &[]),
            Err(ArgsError::MissingValue { flag: "--language" })
        ));
        assert!(matches!(
            parse(&["--difficulty", "extreme"], &[]),
            Err(ArgsError::Rejected {
                flag: "--difficulty",
                source: quiz_core::Error::Difficulty(_),
            })
        ));
        assert!(matches!(
            parse(&[], &[(ENV_LANGUAGE, "e n")]),
            Err(ArgsError::Rejected {
                flag: ENV_LANGUAGE,
                source: quiz_core::Error::Language(_),
            })
        ));
        assert!(matches!(
            parse(&["--timeout-mode", "twice"], &[]),
            Err(ArgsError::Rejected {
                source: quiz_core::Error::TimeoutMode(_),
                ..
            })
        ));
        assert!(matches!(
            parse(&["--bogus"], &[]),
            Err(ArgsError::UnknownArg(_))
        ));
    }
}
