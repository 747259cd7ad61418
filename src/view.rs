use maud::{DOCTYPE, Markup, Render, html};

use crate::controller::ResultsView;
use crate::error::{Error, Result};
use crate::presenter::{Card, NO_RESULTS, ResultsContent};

pub const READ_MORE: &str = "Read Full Article →";
pub const LOADING_TEXT: &str = "Searching for articles...";

impl Render for Card {
    fn render(&self) -> Markup {
        html! {
            div class="card" {
                div class="card-header" {
                    span class="source-badge" { (self.source_label) }
                    @if let Some(date) = &self.date_label {
                        span class="date-badge" { (date) }
                    }
                }
                h3 { (self.title) }
                p { (self.summary) }
                a href=(self.link) target="_blank" rel="noopener noreferrer" class="read-more" {
                    (READ_MORE)
                }
            }
        }
    }
}

impl Render for ResultsContent {
    fn render(&self) -> Markup {
        html! {
            @match self {
                ResultsContent::Blank => {}
                ResultsContent::NoResults => { p { (NO_RESULTS) } }
                ResultsContent::Cards(cards) => {
                    @for card in cards {
                        (card)
                    }
                }
                ResultsContent::Error(message) => {
                    p style="color: red; text-align: center;" { (message) }
                }
            }
        }
    }
}

impl Render for ResultsView {
    fn render(&self) -> Markup {
        html! {
            div id="loading" class=[(!self.loading).then_some("hidden")] { (LOADING_TEXT) }
            div id="results" { (self.content) }
        }
    }
}

/// Standalone results page: the search box, loading indicator and results area.
pub fn page(keyword: &str, view: &ResultsView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "News search: " (keyword) }
                style { (PAGE_STYLE) }
            }
            body {
                div class="search" {
                    input id="keywordInput" type="text" value=(keyword)
                        placeholder="Enter a keyword or URL";
                }
                (view)
            }
        }
    }
}

const PAGE_STYLE: &str = "\
.hidden { display: none; }
.card { border: 1px solid #ddd; border-radius: 8px; padding: 16px; margin: 12px 0; }
.card-header { display: flex; gap: 8px; }
.source-badge, .date-badge { font-size: 0.8em; padding: 2px 8px; }
.source-badge, .date-badge { border-radius: 12px; background: #eef; }
.read-more { font-weight: bold; }
";

/// Plain-text cards for a terminal.
pub struct TextRenderer {
    width: usize,
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render(&self, content: &ResultsContent) -> Result<String> {
        match content {
            ResultsContent::Blank => Ok(String::new()),
            ResultsContent::NoResults => Ok(format!("{NO_RESULTS}\n")),
            ResultsContent::Error(message) => Ok(format!("{message}\n")),
            ResultsContent::Cards(cards) => {
                let mut out = String::new();
                for card in cards {
                    out.push_str(&self.render_card(card)?);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    fn render_card(&self, card: &Card) -> Result<String> {
        let mut header = format!("[{}]", card.source_label);
        if let Some(date) = &card.date_label {
            header.push_str(&format!(" {date}"));
        }
        let title = self.plain(&card.title)?;
        let summary = self.plain(&card.summary)?;
        Ok(format!(
            "{header}\n{title}\n{summary}\n{READ_MORE} {}\n",
            card.link
        ))
    }

    // the server may hand back markup in titles and summaries
    fn plain(&self, text: &str) -> Result<String> {
        let rendered = html2text::from_read(text.as_bytes(), self.width)
            .map_err(|e| Error::Render(e.to_string()))?;
        Ok(rendered.trim_end().to_string())
    }
}
