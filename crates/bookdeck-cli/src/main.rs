use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::sync::mpsc;

use bookdeck_api::CatalogClient;
use bookdeck_core::{AppConfig, Book, CatalogController, CatalogError};
use bookdeck_tui::app::App;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "bookdeck",
    about = "Terminal client for a remote book catalog",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the catalog service (overrides the config file).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output in JSON format (for scripts).
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of the catalog.
    List {
        #[arg(long, default_value = "0")]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
    },

    /// Search by title and/or author.
    Search {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
    },

    /// Show one book by id.
    Show { id: i64 },

    /// Fetch the AI insight for a book.
    Insight { id: i64 },

    /// Delete a book by id.
    Delete {
        id: i64,
        /// Confirm the deletion; without this nothing is sent.
        #[arg(long)]
        yes: bool,
    },
}

// Exit codes, matching the rest of the tooling here: 0 success, 1 general,
// 2 not found, 3 invalid arguments, 6 network, 8 confirmation required.
const EXIT_GENERAL: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;
const EXIT_INVALID_ARGS: u8 = 3;
const EXIT_NETWORK: u8 = 6;
const EXIT_CONFIRM_REQUIRED: u8 = 8;

fn error_exit(err: &CatalogError) -> ExitCode {
    let code = match err {
        CatalogError::NotFound => EXIT_NOT_FOUND,
        CatalogError::Network(_) => EXIT_NETWORK,
        _ => EXIT_GENERAL,
    };
    ExitCode::from(code)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {err}");
            return ExitCode::from(EXIT_GENERAL);
        }
    };
    if let Some(base_url) = cli.base_url.clone() {
        config.server.base_url = base_url;
    }

    let client = Arc::new(CatalogClient::new(config.server.base_url.clone()));

    match cli.command {
        None => run_tui(client, &config),
        Some(command) => run_command(command, &client, &config, cli.json).await,
    }
}

fn run_tui(client: Arc<CatalogClient>, config: &AppConfig) -> ExitCode {
    let controller = CatalogController::new(config.ui.page_size);
    let (net_tx, net_rx) = mpsc::unbounded_channel();
    let mut app = App::new(controller, client, net_tx);

    match bookdeck_tui::run_tui(&mut app, net_rx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("TUI error: {err}");
            ExitCode::from(EXIT_GENERAL)
        }
    }
}

async fn run_command(
    command: Commands,
    client: &CatalogClient,
    config: &AppConfig,
    json: bool,
) -> ExitCode {
    match command {
        Commands::List { page, size } => {
            let size = size.unwrap_or(config.ui.page_size);
            match client.list_books(page, size).await {
                Ok(catalog_page) => {
                    if json {
                        let value = json!({
                            "page": catalog_page.page,
                            "totalPages": catalog_page.total_pages,
                            "content": catalog_page.books,
                        });
                        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
                    } else {
                        print_books(&catalog_page.books);
                        println!(
                            "Page {} of {}",
                            catalog_page.page + 1,
                            catalog_page.total_pages
                        );
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Failed to list books: {err}");
                    error_exit(&err)
                }
            }
        }

        Commands::Search { title, author } => {
            // Same guard as the UI: both blank means no request at all.
            if title.trim().is_empty() && author.trim().is_empty() {
                eprintln!("Nothing to search for: give --title and/or --author.");
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            match client.search_books(&title, &author).await {
                Ok(books) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&books).unwrap_or_default());
                    } else {
                        print_books(&books);
                        println!("{} result(s)", books.len());
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Search failed: {err}");
                    error_exit(&err)
                }
            }
        }

        Commands::Show { id } => match client.get_book(id).await {
            Ok(book) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&book).unwrap_or_default());
                } else {
                    print_book(&book);
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to fetch book {id}: {err}");
                error_exit(&err)
            }
        },

        Commands::Insight { id } => match client.get_insight(id).await {
            Ok(insight) => {
                if json {
                    let value = json!({
                        "book": insight.book,
                        "aiInsight": insight.insight,
                    });
                    println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
                } else {
                    print_book(&insight.book);
                    println!();
                    println!("AI Insight: {}", insight.insight);
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to fetch insight for {id}: {err}");
                error_exit(&err)
            }
        },

        Commands::Delete { id, yes } => {
            if !yes {
                eprintln!("Refusing to delete book {id} without --yes.");
                return ExitCode::from(EXIT_CONFIRM_REQUIRED);
            }
            match client.delete_book(id).await {
                Ok(()) => {
                    if json {
                        println!("{}", json!({"deleted": id}));
                    } else {
                        println!("Book deleted successfully!");
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Failed to delete book {id}: {err}");
                    error_exit(&err)
                }
            }
        }
    }
}

fn print_books(books: &[Book]) {
    for book in books {
        println!(
            "{:>5}  {} — {} ({})",
            book.id, book.title, book.author, book.publication_year
        );
    }
}

fn print_book(book: &Book) {
    println!("{} — {} ({})", book.title, book.author, book.publication_year);
    println!("id: {}", book.id);
    if !book.description.is_empty() {
        println!();
        println!("{}", book.description);
    }
}
