//! Norskkurs CLI
//!
//! Command-line client for the Norskkurs platform:
//! - Browse and take placement tests
//! - Look up verbs, glossary terms, expressions and readings
//! - Keep a local list of favorite verbs
//! - Export content in the backend's CSV import layout

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use norskkurs::catalog::{
    build_rows, collect_tags, filter_by_tag, GlossaryBoard, ModeFilter, TestBoard, VerbBoard,
    VerbView,
};
use norskkurs::client::{ApiClient, ApiError};
use norskkurs::config::{self, Config, LoggingConfig};
use norskkurs::domain::{
    FilterParams, GlossaryQuery, Level, QuestionType, Stream, StreamUpdate, TestDetail,
};
use norskkurs::export::{self, ExportKind};
use norskkurs::favorites::{FavoriteStore, JsonFileStore};
use norskkurs::i18n::Lang;
use norskkurs::links::AdminLinks;
use norskkurs::quiz::{AnswerSheet, QuizError};
use norskkurs::render;

#[derive(Parser)]
#[command(name = "norskkurs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Norwegian course client: tests, verbs, glossary and readings")]
#[command(long_about = "Norskkurs talks to the course backend.\nTake placement tests, look up verbs and glossary terms, and read graded texts.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (default from config: http://localhost:8001/api/)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: the user config dir, then ./norskkurs.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Student email used to look up assigned content
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Stream: bokmaal, nynorsk, english
    #[arg(long, global = true)]
    pub stream: Option<Stream>,

    /// Level: A1, A2, B1, B2
    #[arg(long, global = true)]
    pub level: Option<Level>,

    /// Translation language: en, nb, nn, ru
    #[arg(long, global = true)]
    pub lang: Option<Lang>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

/// How command results are printed
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List placement tests
    Tests {
        /// Only show one level
        #[arg(long)]
        only: Option<Level>,
        /// Question mode (all, single, fill, mixed, exam)
        #[arg(short, long, default_value = "all")]
        mode: ModeFilter,
        /// Search title, description and slug
        #[arg(short, long, default_value = "")]
        search: String,
        /// Number of pages to show
        #[arg(short, long, default_value = "1")]
        pages: usize,
        /// Show every match
        #[arg(long)]
        all: bool,
    },

    /// Show a test with its questions
    Show {
        /// Test slug
        slug: String,
    },

    /// Take a test and submit it for scoring
    Take {
        /// Test slug
        slug: String,
        /// JSON answers file: {"<question id>": <option id> | "<text>"}
        #[arg(short, long)]
        answers: Option<PathBuf>,
        /// Name sent with the submission (default from config)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List verbs
    Verbs {
        /// Starting letter
        #[arg(short = 'L', long)]
        letter: Option<String>,
        /// Only verbs with this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Only favorite verbs
        #[arg(long)]
        favorites: bool,
        /// Search any verb form
        #[arg(short, long, default_value = "")]
        search: String,
        /// Number of pages to show
        #[arg(short, long, default_value = "1")]
        pages: usize,
        /// Show every match
        #[arg(long)]
        all: bool,
    },

    /// Show one verb with its examples
    Verb {
        /// Verb ID
        id: u64,
    },

    /// Add or remove a favorite verb
    Favorite {
        /// Verb ID
        id: u64,
    },

    /// List favorite verbs
    Favorites,

    /// Browse the glossary
    Glossary {
        /// Server-side search
        #[arg(short, long)]
        query: Option<String>,
        /// Starting letter
        #[arg(short = 'L', long)]
        letter: Option<String>,
        /// Only rows with this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Search every column
        #[arg(short, long, default_value = "")]
        search: String,
        /// Search all streams instead of the current one
        #[arg(long)]
        any_stream: bool,
        /// Number of pages to show
        #[arg(short, long, default_value = "1")]
        pages: usize,
        /// Show every match
        #[arg(long)]
        all: bool,
    },

    /// List idiomatic expressions
    Expressions {
        /// Only expressions with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// List readings
    Readings {
        /// Only readings with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show a reading with its translation
    Reading {
        /// Reading slug
        slug: String,
    },

    /// List learning materials
    Materials,

    /// List homework
    Homework,

    /// List exercises
    Exercises {
        /// Only exercises with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show the current session and admin links
    Profile,

    /// End the backend session
    Logout,

    /// Change the student's stream and level
    SetStream {
        /// New stream
        target_stream: Stream,
        /// New level
        target_level: Option<Level>,
    },

    /// Export content as CSV
    Export {
        /// What to export (verbs, glossary, glossary-rows, readings, expressions)
        kind: ExportKind,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Everything a command needs after config and CLI flags are merged
struct Session {
    api: ApiClient,
    config: Config,
    lang: Lang,
    format: OutputFormat,
}

impl Session {
    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn email(&self) -> Option<&str> {
        Some(self.config.student.email.trim()).filter(|e| !e.is_empty())
    }

    /// Stream and level of the student, plus their email when known
    fn params(&self) -> FilterParams {
        self.test_params().level(self.config.student.level)
    }

    /// Tests are filtered by level locally
    fn test_params(&self) -> FilterParams {
        let params = FilterParams::new().stream(self.config.student.stream);
        match self.email() {
            Some(email) => params.student_email(email),
            None => params,
        }
    }

    fn favorites(&self) -> JsonFileStore {
        JsonFileStore::new(self.config.storage.data_path())
    }

    fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> anyhow::Result<()> {
        if self.json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text().trim_end());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(email) = cli.email {
        config.student.email = email;
    }
    if let Some(stream) = cli.stream {
        config.student.stream = stream;
    }
    if let Some(level) = cli.level {
        config.student.level = level;
    }
    if let Some(lang) = cli.lang {
        config.student.lang = lang;
    }

    init_logging(&config.logging);
    tracing::debug!(api = %config.api.base_url, "Starting norskkurs v{}", env!("CARGO_PKG_VERSION"));

    let session = Session {
        api: ApiClient::new(&config.api)?,
        lang: config.student.lang,
        format: cli.format,
        config,
    };

    match cli.command {
        Commands::Tests {
            only,
            mode,
            search,
            pages,
            all,
        } => {
            let tests = or_empty("tests", session.api.list_tests(&session.test_params()).await);
            let mut board = TestBoard::new(tests);
            board.set_level(only);
            board.set_mode(mode);
            board.set_search(search);
            for _ in 1..pages {
                board.load_more();
            }
            while all && board.has_more() {
                board.load_more();
            }

            let visible = board.visible();
            if visible.is_empty() && !session.json() {
                println!("No tests match these filters.");
            } else {
                session.emit(&visible, || render::tests_table(&visible))?;
            }
            if !session.json() && !visible.is_empty() {
                println!();
                println!("{}", board.status());
                if board.has_more() {
                    println!("Use --pages or --all to see more.");
                }
            }
        }

        Commands::Show { slug } => {
            let detail = session
                .api
                .get_test(&slug, &session.test_params())
                .await
                .with_context(|| format!("Could not open test {}", slug))?;
            session.emit(&detail, || render::test_detail(&detail, session.lang))?;
        }

        Commands::Take {
            slug,
            answers,
            name,
        } => {
            take_test(&session, &slug, answers.as_deref(), name).await?;
        }

        Commands::Verbs {
            letter,
            tag,
            favorites,
            search,
            pages,
            all,
        } => {
            let store = session.favorites();
            let favorite_set = store.load();
            let verbs = or_empty("verbs", session.api.verbs(&session.params()).await);

            let mut board = VerbBoard::new(verbs);
            board.set_tag(tag);
            if favorites {
                board.set_view(VerbView::Favorites);
            }
            board.set_letter(letter.map(|l| l.to_uppercase()));
            board.set_search(search);
            for _ in 1..pages {
                board.load_more(&favorite_set);
            }
            while all && board.has_more(&favorite_set) {
                board.load_more(&favorite_set);
            }

            let visible = board.visible(&favorite_set);
            if session.json() {
                session.emit(&visible, String::new)?;
            } else {
                let bar: Vec<String> = board
                    .alphabet()
                    .into_iter()
                    .map(|(letter, available)| {
                        if available {
                            letter.to_string()
                        } else {
                            "·".to_string()
                        }
                    })
                    .collect();
                println!("{}", bar.join(" "));
                println!();
                if visible.is_empty() {
                    println!("No verbs match these filters.");
                } else {
                    println!(
                        "{}",
                        render::verbs_table(&visible, &favorite_set, session.lang)
                    );
                    println!();
                    println!("{}", board.status(&favorite_set));
                }
            }
        }

        Commands::Verb { id } => {
            let verbs = session
                .api
                .verbs(&session.params())
                .await
                .context("Could not load verbs")?;
            let board = VerbBoard::new(verbs);
            let verb = board
                .find(id)
                .with_context(|| format!("Verb {} not found", id))?;
            let favorite = session.favorites().load().contains(id);
            session.emit(verb, || render::verb_detail(verb, session.lang, favorite))?;
        }

        Commands::Favorite { id } => {
            let store = session.favorites();
            if store.toggle(id)? {
                println!("Added verb {} to favorites", id);
            } else {
                println!("Removed verb {} from favorites", id);
            }
            tracing::debug!(path = %store.path().display(), "Favorites updated");
        }

        Commands::Favorites => {
            let favorite_set = session.favorites().load();
            if favorite_set.is_empty() {
                println!("No favorite verbs yet.");
                println!();
                println!("Mark one with:");
                println!("  norskkurs favorite <verb id>");
                return Ok(());
            }

            let verbs = or_empty("verbs", session.api.verbs(&session.params()).await);
            let mut board = VerbBoard::new(verbs);
            board.set_view(VerbView::Favorites);
            while board.has_more(&favorite_set) {
                board.load_more(&favorite_set);
            }
            let visible = board.visible(&favorite_set);
            session.emit(&visible, || {
                render::verbs_table(&visible, &favorite_set, session.lang)
            })?;
        }

        Commands::Glossary {
            query,
            letter,
            tag,
            search,
            any_stream,
            pages,
            all,
        } => {
            let glossary_query = GlossaryQuery {
                stream: (!any_stream).then_some(session.config.student.stream),
                q: query,
            };
            let terms = or_empty("glossary", session.api.glossary(&glossary_query).await);

            let mut board = GlossaryBoard::new(&terms);
            board.set_tag(tag);
            board.set_letter(letter.map(|l| l.to_uppercase()));
            board.set_search(search);
            for _ in 1..pages {
                board.load_more();
            }
            while all && board.has_more() {
                board.load_more();
            }

            let visible = board.visible();
            if visible.is_empty() && !session.json() {
                println!("No glossary entries match these filters.");
            } else {
                session.emit(&visible, || render::glossary_table(&visible))?;
                if !session.json() {
                    println!();
                    println!("{}", board.status());
                }
            }
        }

        Commands::Expressions { tag } => {
            let expressions = or_empty(
                "expressions",
                session.api.expressions(&session.params()).await,
            );
            let shown = filter_by_tag(&expressions, tag.as_deref());
            if shown.is_empty() && !session.json() {
                println!("No expressions found.");
            } else {
                session.emit(&shown, || render::expressions_table(&shown, session.lang))?;
            }
            print_tags(&session, &collect_tags(&expressions));
        }

        Commands::Readings { tag } => {
            let readings = or_empty("readings", session.api.readings(&session.params()).await);
            let shown = filter_by_tag(&readings, tag.as_deref());
            if shown.is_empty() && !session.json() {
                println!("No readings found.");
            } else {
                session.emit(&shown, || render::readings_table(&shown, session.lang))?;
            }
            print_tags(&session, &collect_tags(&readings));
        }

        Commands::Reading { slug } => {
            let reading = session
                .api
                .get_reading(&slug)
                .await
                .with_context(|| format!("Could not open reading {}", slug))?;
            session.emit(&reading, || render::reading_detail(&reading, session.lang))?;
        }

        Commands::Materials => {
            let materials = or_empty("materials", session.api.materials(&session.params()).await);
            let shown: Vec<_> = materials.iter().collect();
            if shown.is_empty() && !session.json() {
                println!("No materials assigned.");
            } else {
                session.emit(&shown, || render::materials_table(&shown))?;
            }
        }

        Commands::Homework => {
            let homework = or_empty("homework", session.api.homework(&session.params()).await);
            let shown: Vec<_> = homework.iter().collect();
            if shown.is_empty() && !session.json() {
                println!("No homework assigned.");
            } else {
                let now = chrono::Utc::now();
                session.emit(&shown, || render::homework_table(&shown, now))?;
            }
        }

        Commands::Exercises { tag } => {
            let exercises = or_empty("exercises", session.api.exercises(&session.params()).await);
            let shown = filter_by_tag(&exercises, tag.as_deref());
            if shown.is_empty() && !session.json() {
                println!("No exercises found.");
            } else {
                session.emit(&shown, || render::exercises_table(&shown))?;
            }
            print_tags(&session, &collect_tags(&exercises));
        }

        Commands::Profile => {
            let profile = session
                .api
                .profile(session.email())
                .await
                .context("Could not load profile")?;
            session.emit(&profile, || render::profile(&profile, session.lang))?;

            if !session.json() {
                let links = AdminLinks::new(&session.config.api.admin_url);
                println!();
                if profile.is_authenticated {
                    println!("Logout: {}", links.logout());
                    if profile.is_teacher {
                        println!("Admin:  {}", links.panel());
                    }
                } else {
                    println!("Login:  {}", links.login());
                }
            }
        }

        Commands::Logout => {
            session.api.logout().await.context("Logout failed")?;
            println!("Logged out");
        }

        Commands::SetStream {
            target_stream,
            target_level,
        } => {
            let email = session
                .email()
                .context("Set an email with --email, NORSKKURS_EMAIL or [student] email")?;
            let update = StreamUpdate {
                email: email.to_string(),
                stream: Some(target_stream),
                level: target_level,
            };
            let student = session
                .api
                .update_stream(&update)
                .await
                .context("Could not change stream")?;
            session.emit(&student, || {
                format!(
                    "{} now follows {} at level {}",
                    student.email,
                    student.stream.label(),
                    student.level
                )
            })?;
        }

        Commands::Export { kind, output } => {
            let count = match &output {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("Cannot create {}", path.display()))?;
                    export_to(&session, kind, std::io::BufWriter::new(file)).await?
                }
                None => export_to(&session, kind, std::io::stdout().lock()).await?,
            };
            if let Some(path) = output {
                eprintln!("Exported {} rows to {}", count, path.display());
            }
        }

        // Handled before the config is loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("norskkurs={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// List failures degrade to an empty list with a banner on stderr
fn or_empty<T>(what: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load {}", what);
            eprintln!("Could not load {}: {}", what, e);
            Vec::new()
        }
    }
}

fn print_tags(session: &Session, tags: &[String]) {
    if !session.json() && !tags.is_empty() {
        println!();
        println!("Tags: {}", tags.join(", "));
    }
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = config::generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn export_to<W: Write>(session: &Session, kind: ExportKind, out: W) -> anyhow::Result<usize> {
    let params = session.params();
    let count = match kind {
        ExportKind::Verbs => {
            let verbs = session.api.verbs(&params).await?;
            export::write_verbs(out, &verbs)?
        }
        ExportKind::Glossary | ExportKind::GlossaryRows => {
            let query = GlossaryQuery {
                stream: None,
                q: None,
            };
            let terms = session.api.glossary(&query).await?;
            if kind == ExportKind::Glossary {
                export::write_glossary(out, &terms)?
            } else {
                export::write_glossary_rows(out, &build_rows(&terms))?
            }
        }
        ExportKind::Readings => {
            let readings = session.api.readings(&params).await?;
            export::write_readings(out, &readings)?
        }
        ExportKind::Expressions => {
            let expressions = session.api.expressions(&params).await?;
            export::write_expressions(out, &expressions)?
        }
    };
    Ok(count)
}

// ============================================
// TEST TAKING
// ============================================

async fn take_test(
    session: &Session,
    slug: &str,
    answers: Option<&Path>,
    name: Option<String>,
) -> anyhow::Result<()> {
    let detail = session
        .api
        .get_test(slug, &session.test_params())
        .await
        .with_context(|| format!("Could not open test {}", slug))?;
    if detail.questions.is_empty() {
        anyhow::bail!("Test {} has no questions", slug);
    }

    let mut sheet = AnswerSheet::new(&detail);
    match answers {
        Some(path) => apply_answers_file(&mut sheet, path)?,
        None => {
            println!("{} ({} questions)", detail.test.title, detail.questions.len());
            let all: Vec<u64> = detail.questions.iter().map(|q| q.id).collect();
            prompt_questions(&mut sheet, &detail, &all)?;
        }
    }

    loop {
        match sheet.validate() {
            Ok(_) => break,
            Err(QuizError::Incomplete { missing }) => {
                eprintln!();
                eprintln!("{} question(s) still need an answer", missing.len());
                if !prompt_questions(&mut sheet, &detail, &missing)? {
                    return Err(QuizError::Incomplete { missing }.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    let name = name.unwrap_or_else(|| session.config.student.name.clone());
    let email = session.email().unwrap_or_default();
    let request = sheet.submit_request(&name, email, session.lang.code())?;
    let response = session
        .api
        .submit_test(slug, &request)
        .await
        .context("Submission failed")?;

    session.emit(&response, || render::submission(&detail, &response))
}

/// Answers keyed by question id: a number selects an option, a string fills
/// in a blank
fn apply_answers_file(sheet: &mut AnswerSheet, path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read answers file {}", path.display()))?;
    let answers: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("Answers file {} must be a JSON object", path.display()))?;

    for (key, value) in answers {
        let question: u64 = key
            .parse()
            .with_context(|| format!("Invalid question id {:?}", key))?;
        match value {
            serde_json::Value::Number(n) => {
                let option = n
                    .as_u64()
                    .with_context(|| format!("Invalid option for question {}", question))?;
                sheet.select_option(question, option)?;
            }
            serde_json::Value::String(text) => sheet.set_text(question, text)?,
            serde_json::Value::Null => {}
            other => anyhow::bail!("Unsupported answer for question {}: {}", question, other),
        }
    }
    Ok(())
}

/// Ask for each listed question on stdin; returns false once stdin is closed
fn prompt_questions(
    sheet: &mut AnswerSheet,
    detail: &TestDetail,
    ids: &[u64],
) -> anyhow::Result<bool> {
    let stdin = std::io::stdin();
    for (position, question) in detail.questions.iter().enumerate() {
        if !ids.contains(&question.id) {
            continue;
        }

        println!();
        print!("{}", render::question_block(position + 1, question));
        match question.question_type {
            QuestionType::Single => print!("Answer (1-{}): ", question.choices().len()),
            QuestionType::Fill => print!("Answer: "),
        }
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match question.question_type {
            QuestionType::Single => {
                let choice = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| question.choices().get(i));
                match choice {
                    Some(option) => sheet.select_option(question.id, option.id)?,
                    None => eprintln!("Pick a number between 1 and {}", question.choices().len()),
                }
            }
            QuestionType::Fill => sheet.set_text(question.id, input)?,
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["norskkurs", "tests", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);

        let cli = Cli::try_parse_from(["norskkurs", "materials"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["norskkurs", "tests", "-f", "yaml"]).is_err());
    }
}
