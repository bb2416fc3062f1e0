//! Command-line interface for quizbank
//! Parses question-bank files and prints the questions as JSON or as a readable summary.
//!
//! Usage:
//!   quizbank parse `<path>` [--format json|summary]          - Parse a .txt / .docx question bank
//!   quizbank select `<path>` --start N [--count N] [--random]  - Draw a subset of a bank
//!   quizbank catalog `<manifest>`                            - List the tests of a catalog manifest
//!   quizbank grammars                                        - List grammars in priority order
//!
//! Every subcommand accepts `--config <file>` to layer a TOML file over the built-in defaults.

use clap::{Arg, ArgAction, ArgMatches, Command};
use quizbank::quiz::catalog::TestCatalog;
use quizbank::quiz::config::{Loader, QuizConfig};
use quizbank::quiz::model::{Question, QuestionKind};
use quizbank::quiz::selection::{select_questions, SelectionMethod};
use quizbank::quiz::QuestionLoader;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let matches = Command::new("quizbank")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing quiz question banks")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in configuration")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log grammar detection and fallback to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a question bank")
                .arg(Arg::new("path").help("Path to a .txt or .docx file").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "summary"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("select")
                .about("Draw a subset of a question bank")
                .arg(Arg::new("path").help("Path to a .txt or .docx file").required(true))
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("Index of the first eligible question")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .help("Number of questions (default: selection.default_count, capped at the bank size)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("random")
                        .long("random")
                        .help("Draw questions at random instead of in order")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for reproducible random draws")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("catalog")
                .about("List the tests of a catalog manifest")
                .arg(Arg::new("manifest").help("Path to the JSON manifest").required(true)),
        )
        .subcommand(Command::new("grammars").about("List grammars in priority order"))
        .get_matches();

    init_logging(matches.get_flag("verbose"));
    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(&config, sub).await,
        Some(("select", sub)) => handle_select_command(&config, sub).await,
        Some(("catalog", sub)) => handle_catalog_command(&config, sub),
        Some(("grammars", _)) => handle_grammars_command(&config),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&String>) -> QuizConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn question_loader(config: &QuizConfig) -> QuestionLoader {
    QuestionLoader::from_config(config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

async fn load_bank(config: &QuizConfig, path: &str) -> Vec<Question> {
    question_loader(config)
        .load_path_async(path)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })
}

/// Handle the parse command
async fn handle_parse_command(config: &QuizConfig, matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").expect("path is required");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json");

    let questions = load_bank(config, path).await;
    match format {
        "summary" => print!("{}", summarize(&questions)),
        _ => print_json(&questions),
    }
}

/// Handle the select command
async fn handle_select_command(config: &QuizConfig, matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").expect("path is required");
    let start = matches.get_one::<usize>("start").copied().unwrap_or(0);
    let method = if matches.get_flag("random") {
        SelectionMethod::Random
    } else {
        config.selection.method
    };
    let mut rng = match matches.get_one::<u64>("seed") {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    };

    let bank = load_bank(config, path).await;
    // The configured default never asks for more than the bank holds past `start`.
    let count = matches.get_one::<usize>("count").copied().unwrap_or_else(|| {
        config
            .selection
            .default_count
            .min(bank.len().saturating_sub(start))
            .max(1)
    });
    let selected = select_questions(&bank, start, count, method, &mut rng).unwrap_or_else(|e| {
        eprintln!("Selection error: {}", e);
        std::process::exit(1);
    });
    print_json(&selected);
}

/// Handle the catalog command
fn handle_catalog_command(config: &QuizConfig, matches: &ArgMatches) {
    let manifest = matches
        .get_one::<String>("manifest")
        .expect("manifest is required");
    let catalog = TestCatalog::from_path(manifest).unwrap_or_else(|e| {
        eprintln!("Catalog error: {}", e);
        std::process::exit(1);
    });

    for (depth, item) in catalog.iter() {
        let indent = "  ".repeat(depth);
        match item.resolve_path(&config.catalog.asset_base) {
            Some(path) => println!("{}{}  {}  {}", indent, item.id, item.name, path.display()),
            None => println!("{}{}  {}", indent, item.id, item.name),
        }
    }
}

/// Handle the grammars command
fn handle_grammars_command(config: &QuizConfig) {
    let loader = question_loader(config);
    println!("Grammars in priority order:\n");

    for (name, description) in loader.registry().list_grammars() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}

fn print_json(questions: &[Question]) {
    let json = serde_json::to_string_pretty(questions).unwrap_or_else(|e| {
        eprintln!("Error formatting questions: {}", e);
        std::process::exit(1);
    });
    println!("{}", json);
}

fn summarize(questions: &[Question]) -> String {
    let mut out = format!("{} questions\n", questions.len());
    for (i, question) in questions.iter().enumerate() {
        let kind = match question.kind() {
            QuestionKind::Choice if question.is_multi_select => "multi",
            QuestionKind::Choice => "single",
            QuestionKind::Sequence => "sequence",
            QuestionKind::Matching => "matching",
        };
        out.push_str(&format!("\n{}. [{}] {}\n", i + 1, kind, question.text));
        for answer in &question.answers {
            let mark = match question.kind() {
                QuestionKind::Choice if answer.is_correct => "+".to_string(),
                QuestionKind::Choice => "-".to_string(),
                QuestionKind::Sequence => answer.order_number.unwrap_or(0).to_string(),
                QuestionKind::Matching if answer.is_left() => format!("→{:?}", answer.accepted_matches()),
                QuestionKind::Matching => "·".to_string(),
            };
            out.push_str(&format!("   {} {}\n", mark, answer.text));
        }
    }
    out
}
