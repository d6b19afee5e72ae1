use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use classpick::bookmarklet::{BundleLocation, bookmarklet};
use classpick::html::derive_selections;
use classpick_common::ElementSelection;
use classpick_h::config::{ClasspickConfig, ConfigLoader};
use classpick_h::{CdpHost, PickerHost};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classpick", version, about = "Pick page elements and derive class paths")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to ./classpick.yaml, then ~/.classpick/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Open a page in Chromium and wait for an element to be clicked
    Pick {
        url: String,
        /// Run the browser headless (only useful when scripted)
        #[arg(long)]
        headless: bool,
        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Number of class path segments
        #[arg(long)]
        depth: Option<usize>,
        /// Print the selection as JSON instead of the bare class path
        #[arg(long)]
        json: bool,
    },
    /// Print a bookmarklet that runs the picker from a published bundle
    Bookmarklet {
        /// Where classpick_web.js and classpick_web_bg.wasm are served from
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Derive class paths for elements of a local HTML file
    Derive {
        file: PathBuf,
        /// CSS selector of the elements to describe
        selector: String,
        #[arg(long)]
        depth: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Results go to stdout; keep logs on stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ConfigLoader::load_default().await?,
    };

    match args.command {
        Command::Pick {
            url,
            headless,
            timeout_ms,
            depth,
            json,
        } => {
            if headless {
                config.host.visible = false;
            }
            if let Some(timeout_ms) = timeout_ms {
                config.host.pick_timeout_ms = timeout_ms;
            }
            if let Some(depth) = depth {
                config.picker.max_depth = depth;
            }
            let selection = pick(config, &url).await?;
            print_selection(&selection, json)?;
        }
        Command::Bookmarklet { base_url } => {
            let Some(base_url) = base_url.or(config.bookmarklet.base_url) else {
                bail!("No base URL: pass --base-url or set bookmarklet.base_url in the config");
            };
            let location = BundleLocation::new(&base_url, &config.host.bundle_name)?;
            println!("{}", bookmarklet(&location)?);
        }
        Command::Derive {
            file,
            selector,
            depth,
            json,
        } => {
            if let Some(depth) = depth {
                config.picker.max_depth = depth;
            }
            let html = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let selections = derive_selections(&html, &selector, &config.picker)?;
            if selections.is_empty() {
                tracing::warn!("No element matches {}", selector);
            }
            for selection in &selections {
                print_selection(selection, json)?;
            }
        }
    }
    Ok(())
}

async fn pick(config: ClasspickConfig, url: &str) -> anyhow::Result<ElementSelection> {
    let mut host = CdpHost::new(config);
    host.launch().await.context("Failed to launch host")?;

    let result = host.pick(url).await;
    if let Err(e) = host.close().await {
        tracing::warn!("Failed to close browser: {}", e);
    }
    Ok(result?)
}

fn print_selection(selection: &ElementSelection, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(selection)?);
    } else {
        println!("{}", selection.class_path);
    }
    Ok(())
}
