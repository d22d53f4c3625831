//! CLI parsing and orchestration. Builds one page URL, optionally loads it and prints its text. Maps errors to exit codes.

use crate::config::{self, Config};
use crate::logging;
use crate::model::{Book, PageText};
use crate::scraper::{
    resolve_site, website_for, HttpPage, PageHandle, PoliteClient, ScraperError, Site,
    StaticPage, Website,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Scraper(#[from] ScraperError),

    #[error("Cannot write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Scraper(
                ScraperError::UnknownSite { .. }
                | ScraperError::MalformedBook { .. }
                | ScraperError::InvalidSelector { .. },
            ) => 1,
            CliRunError::Scraper(_) => 2,
            CliRunError::Output { .. } => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "novelpages")]
#[command(about = "Build page URLs and extract page text from AllFreeNovel, OnlineReadFreeBooks and GemiBook")]
#[command(
    after_help = "Config file keys (user_agent, request_delay_secs, timeout_secs, output_dir, log_level, default_site) are read from ./novelpages.toml or ~/.config/novelpages/config.toml. CLI flags override config."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Debug logging and full error chain.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported sites and their base URLs.
    Sites,
    /// Print the URL of one page.
    Url(PageArgs),
    /// Load one page and print (or write) its text.
    Text(TextArgs),
}

#[derive(ClapArgs, Debug)]
pub struct PageArgs {
    /// Site key (allfreenovel, onlinereadfreebooks, gemibook), alias, or a URL on the site. Default: config default_site.
    #[arg(long, value_parser = parse_site)]
    pub site: Option<Site>,

    /// Book identifier as the site uses it.
    #[arg(long)]
    pub number: String,

    /// Book name; spaces become dashes in the URL.
    #[arg(long)]
    pub name: String,

    /// Page number.
    #[arg(long)]
    pub page: u32,

    /// Total page count (only AllFreeNovel URLs use it). Default: the page number.
    #[arg(long)]
    pub total: Option<u32>,
}

#[derive(ClapArgs, Debug)]
pub struct TextArgs {
    #[command(flatten)]
    pub target: PageArgs,

    /// Read the page from a saved HTML file instead of fetching it.
    #[arg(long)]
    pub html_file: Option<PathBuf>,

    /// Load the page in a local Chrome/Chromium so script-rendered text is seen (needs the `browser` feature).
    #[arg(long, conflicts_with = "html_file")]
    pub browser: bool,

    /// With --browser, show the browser window instead of running headless.
    #[arg(long, requires = "browser")]
    pub headed: bool,

    /// Write to this path instead of stdout. Relative paths resolve against config output_dir.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: text or json.
    #[arg(long, default_value = "text", value_parser = parse_format)]
    pub format: OutputFormat,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Delay between requests in seconds (overrides config; default 2).
    #[arg(long)]
    pub delay: Option<u64>,

    /// Request timeout in seconds (overrides config; default 30).
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_site(s: &str) -> Result<Site, String> {
    resolve_site(s).map_err(|e| e.to_string())
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid --format value: '{}'. Use text or json.", s)),
    }
}

/// --site, else config default_site.
fn effective_site(arg: Option<Site>, config: Option<&Config>) -> Result<Site, CliRunError> {
    if let Some(site) = arg {
        return Ok(site);
    }
    match config.and_then(|c| c.default_site.as_deref()) {
        Some(key) => Ok(resolve_site(key)?),
        None => Err(CliRunError::InvalidInput(
            "No site given. Use --site allfreenovel, onlinereadfreebooks or gemibook, or set default_site in config.".to_string(),
        )),
    }
}

/// Relative output paths go under config output_dir when one is set.
fn resolve_output_path(path: &Path, config: Option<&Config>) -> PathBuf {
    match config.and_then(|c| c.output_dir.as_ref()) {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Ensure output path parent exists.
fn validate_output_path(path: &Path) -> Result<(), CliRunError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(CliRunError::InvalidInput(format!(
                "Cannot write output: {}: parent directory does not exist.",
                path.display()
            )));
        }
    }
    Ok(())
}

fn build_client(args: &TextArgs, config: Option<&Config>) -> Result<PoliteClient, CliRunError> {
    let delay_secs = args
        .delay
        .or_else(|| config.and_then(|c| c.request_delay_secs));
    let timeout_secs = args
        .timeout
        .or_else(|| config.and_then(|c| c.timeout_secs));
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.and_then(|c| c.user_agent.clone()));

    let mut builder = PoliteClient::builder();
    if let Some(secs) = delay_secs {
        builder = builder.delay_secs(secs);
    }
    if let Some(secs) = timeout_secs {
        builder = builder.timeout_secs(secs);
    }
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(feature = "browser")]
fn browser_text(
    website: &dyn Website,
    url: &str,
    headed: bool,
) -> Result<String, CliRunError> {
    let mut page = crate::scraper::ChromePage::launch(headed)?;
    page.navigate(url)?;
    Ok(website.get_text(&page)?)
}

#[cfg(not(feature = "browser"))]
fn browser_text(
    _website: &dyn Website,
    _url: &str,
    _headed: bool,
) -> Result<String, CliRunError> {
    Err(CliRunError::InvalidInput(
        "--browser needs a build with the `browser` feature (cargo install novelpages --features browser)."
            .to_string(),
    ))
}

fn render(record: &PageText, format: OutputFormat) -> Result<String, CliRunError> {
    match format {
        OutputFormat::Text => Ok(record.text.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(record)
            .map_err(|e| CliRunError::InvalidInput(format!("Failed to encode JSON: {}", e))),
    }
}

fn run_url(args: &PageArgs, config: Option<&Config>) -> Result<(), CliRunError> {
    let site = effective_site(args.site, config)?;
    let book = Book::new(&args.number, args.name.as_str());
    let page = args.page;
    let url = website_for(site).create_url(&book, page, args.total.unwrap_or(page))?;
    println!("{}", url);
    Ok(())
}

fn run_text(args: &TextArgs, config: Option<&Config>, quiet: bool) -> Result<(), CliRunError> {
    let site = effective_site(args.target.site, config)?;
    let website = website_for(site);
    let book = Book::new(&args.target.number, args.target.name.as_str());
    let page_number = args.target.page;
    let total_pages = args.target.total.unwrap_or(page_number);
    let url = website.create_url(&book, page_number, total_pages)?;

    let output_path = args
        .output
        .as_deref()
        .map(|p| resolve_output_path(p, config));
    if let Some(path) = &output_path {
        validate_output_path(path)?;
    }

    let text = match &args.html_file {
        Some(html_path) => {
            let html = std::fs::read_to_string(html_path).map_err(|e| {
                CliRunError::InvalidInput(format!(
                    "Cannot read HTML file {}: {}",
                    html_path.display(),
                    e
                ))
            })?;
            let page = StaticPage::with_url(url.as_str(), &html);
            website.get_text(&page)?
        }
        None if args.browser => browser_text(website, &url, args.headed)?,
        None => {
            let mut client = build_client(args, config)?;
            let mut page = HttpPage::new(&mut client);
            page.navigate(&url)?;
            website.get_text(&page)?
        }
    };
    tracing::info!(site = %site, page = page_number, chars = text.chars().count(), "extracted page text");

    let record = PageText {
        site,
        book,
        url,
        page: page_number,
        total_pages,
        text,
    };
    let rendered = render(&record, args.format)?;
    match output_path {
        Some(path) => {
            std::fs::write(&path, rendered.as_bytes())
                .map_err(|e| CliRunError::Output { path: path.clone(), source: e })?;
            if !quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;
    let directive = logging::filter_directive(
        args.verbose,
        args.quiet,
        config.as_ref().and_then(|c| c.log_level.as_deref()),
    );
    logging::init_logging(&directive).map_err(CliRunError::InvalidInput)?;

    match &args.command {
        Command::Sites => {
            for site in Site::ALL {
                println!("{:<20} {}", site.key(), site.base_url());
            }
            Ok(())
        }
        Command::Url(page_args) => run_url(page_args, config.as_ref()),
        Command::Text(text_args) => run_text(text_args, config.as_ref(), args.quiet),
    }
}
