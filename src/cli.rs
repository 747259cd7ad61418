use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::api::HttpSearchClient;
use crate::config::CONFIG;
use crate::controller::{ResultsView, SearchController, SubmitOutcome};
use crate::error::Error;
use crate::presenter::ResultsContent;
use crate::view::{LOADING_TEXT, TextRenderer, page};

/// Search news articles through a scrape server
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Base URL of the scrape server (defaults to HEADLINES_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single search and print the cards
    Search {
        /// Keyword or URL to search for
        #[arg(num_args = 0..)]
        keyword: Vec<String>,

        /// Write an HTML results page here instead of printing text
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Read keywords from stdin; every line submits a search
    Interactive,
}

pub async fn run(cli: Cli) -> Result<()> {
    let api_url = cli.api_url.unwrap_or_else(|| CONFIG.api_url.clone());
    let client = HttpSearchClient::new(&api_url)
        .with_context(|| format!("Failed to set up client for {api_url}"))?;
    let controller = Arc::new(SearchController::new(Arc::new(client)));
    let renderer = TextRenderer::new(CONFIG.text_width);

    match cli.command {
        Command::Search { keyword, html } => {
            search_once(&controller, &renderer, &keyword.join(" "), html).await
        }
        Command::Interactive => interactive(controller, renderer).await,
    }
}

async fn search_once(
    controller: &SearchController,
    renderer: &TextRenderer,
    keyword: &str,
    html: Option<PathBuf>,
) -> Result<()> {
    controller.submit_search(keyword).await?;
    let view = controller.view();

    match html {
        Some(path) => {
            let markup = page(keyword.trim(), &view).into_string();
            tokio::fs::write(&path, markup)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote results page to {}", path.display());
        }
        None => print!("{}", renderer.render(&view.content)?),
    }
    Ok(())
}

/// Submits whatever is in the input line, as pressing Enter in the search box does.
pub async fn on_enter_key(controller: &SearchController, input: &str) {
    match controller.submit_search(input).await {
        Ok(SubmitOutcome::Rendered) => {}
        Ok(SubmitOutcome::Superseded) => log::debug!("search for {input:?} was superseded"),
        Err(Error::EmptyKeyword) => eprintln!("{}", Error::EmptyKeyword),
        Err(e) => log::error!("search for {input:?} failed, error: {:#}", e),
    }
}

async fn interactive(controller: Arc<SearchController>, renderer: TextRenderer) -> Result<()> {
    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        let mut shown = ResultsView::default();
        while updates.changed().await.is_ok() {
            let view = updates.borrow_and_update().clone();
            if view.loading && !shown.loading {
                println!("{LOADING_TEXT}");
            }
            if needs_print(&shown, &view) {
                match renderer.render(&view.content) {
                    Ok(text) => print!("{text}"),
                    Err(e) => log::error!("failed to render results, error: {:#}", e),
                }
            }
            shown = view;
        }
    });

    println!("Type a keyword or URL and press Enter (Ctrl-D to quit).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut searches = JoinSet::new();
    while let Some(line) = lines.next_line().await? {
        let controller = controller.clone();
        searches.spawn(async move { on_enter_key(&controller, &line).await });
    }
    while searches.join_next().await.is_some() {}

    // the printer stops once the last controller handle is gone
    drop(controller);
    printer.await?;
    Ok(())
}

/// Whether `view` brings results the terminal has not printed yet.
// watch updates coalesce: a repeated search with identical results may never
// show the cleared state in between, only loading going down
fn needs_print(shown: &ResultsView, view: &ResultsView) -> bool {
    let finished = shown.loading && !view.loading;
    let changed = view.content != shown.content || finished;
    changed && view.content != ResultsContent::Blank
}
