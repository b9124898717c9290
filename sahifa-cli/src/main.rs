use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

use sahifa_core::core_backend::PostFilter;
use sahifa_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use sahifa_core::{BackendError, Config, ContentBackend, Method};

#[derive(Parser, Debug)]
#[command(name = "sahifa")]
#[command(author, version, about = "In-process mock backend for the Sahifa content site", long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Configuration file (TOML); defaults plus SAHIFA_* env otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password
    Login { email: String, password: String },
    /// Register a new reader account
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// End the active session
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// Subscribe an email to the newsletter
    Subscribe { email: String },
    /// List posts, newest first
    Posts {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one post by slug
    Post { slug: String },
    /// Vote in a poll
    Vote { poll_id: String, option: String },
    /// Show poll results
    Results {
        #[arg(default_value = "homepage-theme")]
        poll_id: String,
    },
    /// Rate an article (1-5)
    Rate { slug: String, rating: u8 },
    /// Publish an article (requires login)
    NewArticle {
        title: String,
        body: String,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Create a poll (requires login)
    NewPoll {
        question: String,
        /// Option labels, two or more
        #[arg(required = true, num_args = 2..)]
        options: Vec<String>,
    },
    /// Create a user with the default password (requires login)
    NewUser {
        name: String,
        email: String,
        #[arg(long)]
        role: Option<String>,
    },
    /// Send a raw request to the dispatch table
    Request {
        /// Path with optional query string, e.g. /polls/results?pollId=x
        path: String,
        #[arg(long, default_value = "GET")]
        method: String,
        /// JSON body
        #[arg(long)]
        body: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = LogLevel::from_str(&args.log_level).unwrap_or_else(|| {
        eprintln!("Invalid log level '{}', using 'info'", args.log_level);
        LogLevel::Info
    });
    init_logging_with_config(LogConfig::new(log_level).json_format(args.json_logs))?;

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env().context("loading config from environment")?,
    };

    let mut backend = ContentBackend::new(&config);
    info!(data_dir = %config.store.data_dir.display(), "backend ready");

    match args.command {
        Command::Login { email, password } => request(
            &mut backend,
            "/auth/login",
            Method::Post,
            json!({"email": email, "password": password}),
        ),
        Command::Register {
            name,
            email,
            password,
        } => request(
            &mut backend,
            "/auth/register",
            Method::Post,
            json!({
                "fullName": name,
                "email": email,
                "password": password,
                "confirmPassword": password,
            }),
        ),
        Command::Logout => request(&mut backend, "/auth/logout", Method::Post, Value::Null),
        Command::Whoami => {
            match backend.current_user() {
                Some(user) => print_json(&serde_json::to_value(user)?)?,
                None => println!("no active session"),
            }
            Ok(())
        }
        Command::Subscribe { email } => request(
            &mut backend,
            "/newsletter/subscribe",
            Method::Post,
            json!({"email": email}),
        ),
        Command::Posts {
            category,
            tag,
            limit,
        } => {
            let posts = backend.get_posts(&PostFilter {
                category,
                tag,
                limit,
            });
            print_json(&serde_json::to_value(posts)?)
        }
        Command::Post { slug } => match backend.get_post_by_slug(&slug) {
            Some(post) => print_json(&serde_json::to_value(post)?),
            None => {
                eprintln!("no post with slug '{}'", slug);
                std::process::exit(1);
            }
        },
        Command::Vote { poll_id, option } => request(
            &mut backend,
            "/polls/vote",
            Method::Post,
            json!({"pollId": poll_id, "theme": option}),
        ),
        Command::Results { poll_id } => request(
            &mut backend,
            &format!("/polls/results?pollId={}", poll_id),
            Method::Get,
            Value::Null,
        ),
        Command::Rate { slug, rating } => request(
            &mut backend,
            &format!("/articles/{}/rating", slug),
            Method::Post,
            json!({"rating": rating}),
        ),
        Command::NewArticle {
            title,
            body,
            category,
            tags,
        } => request(
            &mut backend,
            "/admin/articles",
            Method::Post,
            json!({"title": title, "body": body, "category": category, "tags": tags}),
        ),
        Command::NewPoll { question, options } => request(
            &mut backend,
            "/admin/polls",
            Method::Post,
            json!({"question": question, "options": options.join("\n")}),
        ),
        Command::NewUser { name, email, role } => request(
            &mut backend,
            "/admin/users",
            Method::Post,
            json!({"fullName": name, "email": email, "role": role}),
        ),
        Command::Request { path, method, body } => {
            let method: Method = method
                .parse()
                .map_err(|err: BackendError| anyhow::anyhow!(err.to_string()))?;
            let payload = match body {
                Some(raw) => serde_json::from_str(&raw).context("parsing --body as JSON")?,
                None => Value::Null,
            };
            request(&mut backend, &path, method, payload)
        }
    }
}

fn request(backend: &mut ContentBackend, path: &str, method: Method, payload: Value) -> Result<()> {
    match backend.process_request(path, method, payload) {
        Ok(value) => print_json(&value),
        Err(err) => {
            eprintln!("[{}] {}", err.code(), err);
            std::process::exit(1);
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
