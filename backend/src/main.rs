//! Bookstock CLI - book inventory service and CSV import client
//!
//! # Main Commands
//!
//! ```bash
//! bookstock serve                    # Start HTTP server (port 3000)
//! bookstock import books.csv         # Upload a CSV file to a running server
//! bookstock books                    # List stored books
//! bookstock template                 # Write the empty import template
//! ```
//!
//! # Offline Commands
//!
//! ```bash
//! bookstock parse books.csv          # Parse a CSV file to the upload JSON
//! bookstock check books.csv          # Run the server-side rules locally
//! ```

use bookstock::config::{ServerConfig, DEFAULT_LOG_FILTER};
use bookstock::{check_batch, read_import_file, ImportClient, TEMPLATE_CSV, TEMPLATE_FILE_NAME};
use bookstock_contracts::DEFAULT_SERVICE_ROOT;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "bookstock")]
#[command(about = "Book inventory with validated bulk CSV import", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve(ServerConfig),

    /// Parse a CSV file and output the UploadBooks request body
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a CSV file with the server rules, without uploading
    Check {
        /// Input CSV file
        input: PathBuf,
    },

    /// Upload a CSV file in one UploadBooks call
    Import {
        /// Input CSV file
        input: PathBuf,

        /// Service root URL (default: http://localhost:3000/odata/v4/catalog)
        #[arg(short, long, env = "BOOKSTOCK_SERVICE_URL")]
        url: Option<String>,
    },

    /// Write the empty import template
    Template {
        /// Output file (default: TemplateCsv.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List stored books
    Books {
        /// Service root URL (default: http://localhost:3000/odata/v4/catalog)
        #[arg(short, long, env = "BOOKSTOCK_SERVICE_URL")]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(config) => cmd_serve(config).await,
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
        Commands::Check { input } => cmd_check(&input),
        Commands::Import { input, url } => cmd_import(&input, url).await,
        Commands::Template { output } => cmd_template(output.as_deref()),
        Commands::Books { url } => cmd_books(url).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    bookstock::server::start_server(config).await?;
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let parsed = read_import_file(input)?;
    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!("   Columns: {}", parsed.headers.join(", "));
    eprintln!("✅ Parsed {} records", parsed.batch.len());

    let json = serde_json::to_string_pretty(&parsed.batch.to_request())?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Checking: {}", input.display());

    let parsed = read_import_file(input)?;
    match check_batch(&parsed.batch.to_request()) {
        Ok(books) => {
            eprintln!("✅ All {} records valid!", books.len());
            Ok(())
        }
        Err(err) => {
            eprintln!("\n❌ {}", err.code());
            for detail in err.details() {
                eprintln!("   - {}", detail);
            }
            Err(err.into())
        }
    }
}

async fn cmd_import(input: &Path, url: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let parsed = read_import_file(input)?;
    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!("   Rows: {}", parsed.batch.len());

    let client = ImportClient::new(service_url(url));
    eprintln!("   Uploading to: {}", client.upload_url());

    let created = client.upload_books(&parsed.batch).await?;
    println!("Created {} books.", created);

    Ok(())
}

fn cmd_template(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = output.unwrap_or_else(|| Path::new(TEMPLATE_FILE_NAME));
    fs::write(path, TEMPLATE_CSV)?;
    eprintln!("💾 Template written to: {}", path.display());
    Ok(())
}

async fn cmd_books(url: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let client = ImportClient::new(service_url(url));
    let page = client.list_books().await?;

    if page.value.is_empty() {
        eprintln!("📋 No books stored yet.");
        eprintln!("   Use 'bookstock import <file>' to add some.");
        return Ok(());
    }

    eprintln!("📋 Stored books ({}):\n", page.value.len());
    for book in page.value {
        println!("  📖 {} ({})", book.title, book.id);
        println!("     Stock: {}", book.stock);
        println!("     Created: {}", book.created_at);
    }

    Ok(())
}

fn service_url(url: Option<String>) -> String {
    url.unwrap_or_else(|| format!("{}{}", DEFAULT_SERVICE_URL, DEFAULT_SERVICE_ROOT))
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_check_valid_file() {
        let file = csv_file("title;stock\nDune;5\nEmma;2\n");
        assert!(cmd_check(file.path()).is_ok());
    }

    #[test]
    fn test_check_invalid_file_returns_error() {
        let file = csv_file("title;stock\nDune;-1\n");
        let err = cmd_check(file.path()).unwrap_err();
        assert!(err.to_string().contains("Row 1"));
        assert!(err.to_string().contains("negative"));
    }
}
