use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    Clock, GenerationRequest, QuizApiClient, QuizApiConfig, QuizService, SessionCredentials,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidQuestionCount { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidQuestionCount { raw } => write!(
                f,
                "invalid --questions value: {raw} (expected 1..={})",
                GenerationRequest::MAX_QUESTIONS
            ),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--token <bearer>] [--questions <n>] [--verbose]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", QuizApiConfig::DEFAULT_BASE_URL);
    eprintln!("  --questions {}", GenerationRequest::DEFAULT_QUESTIONS);
    eprintln!("  without --token, answers are graded as a guest");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_URL, QUIZ_API_TOKEN, QUIZ_QUESTION_COUNT, QUIZ_LOG");
}

#[derive(Debug)]
struct Args {
    api: QuizApiConfig,
    token: Option<String>,
    question_count: u8,
    verbose: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api = QuizApiConfig::from_env();
        let mut token = std::env::var("QUIZ_API_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut question_count = match std::env::var("QUIZ_QUESTION_COUNT") {
            Ok(raw) => parse_question_count(raw)?,
            Err(_) => GenerationRequest::DEFAULT_QUESTIONS,
        };
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    let trimmed = value.trim();
                    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api = QuizApiConfig::new(trimmed);
                }
                "--token" => {
                    let value = require_value(args, "--token")?;
                    token = Some(value).filter(|value| !value.trim().is_empty());
                }
                "--questions" => {
                    question_count = parse_question_count(require_value(args, "--questions")?)?;
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api,
            token,
            question_count,
            verbose,
        })
    }
}

fn parse_question_count(raw: String) -> Result<u8, ArgsError> {
    match raw.trim().parse::<u8>() {
        Ok(n) if (1..=GenerationRequest::MAX_QUESTIONS).contains(&n) => Ok(n),
        _ => Err(ArgsError::InvalidQuestionCount { raw }),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("QUIZ_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

struct DesktopApp {
    quiz: Arc<QuizService>,
    question_count: u8,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    fn default_question_count(&self) -> u8 {
        self.question_count
    }
}

fn run() -> Result<(), ArgsError> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).inspect_err(|_| print_usage())?;
    init_tracing(parsed.verbose);

    let signed_in = parsed.token.is_some();
    let credentials = Arc::new(match parsed.token {
        Some(token) => SessionCredentials::with_token(token),
        None => SessionCredentials::guest(),
    });
    info!(
        api = %parsed.api.base_url,
        signed_in,
        questions = parsed.question_count,
        "starting quiz app"
    );

    let client = Arc::new(QuizApiClient::new(parsed.api, credentials.clone()));
    let quiz = QuizService::new(Clock::system(), client.clone(), client, credentials);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz: Arc::new(quiz),
        question_count: parsed.question_count,
    });
    let context = build_app_context(&app);

    // Some dev setups default the desktop window to always-on-top.
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

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
