//! The page the report is drawn into.

use ghreport_common::{html_escape, GhReportError, Metric, Result};
use parking_lot::Mutex;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Element id of the repository label.
pub const REPO_LABEL_ID: &str = "repo";

/// What the report controller needs from its host page.
pub trait PageEnvironment: Send + Sync {
    /// Full URL the page was loaded from, including the query string.
    fn current_url(&self) -> String;

    /// Replaces the text content of the element with id `element_id`.
    fn set_text(&self, element_id: &str, text: &str) -> Result<()>;

    /// Replaces the content of the region matching `selector` with `content`.
    fn render_region(&self, selector: &str, content: &str) -> Result<()>;
}

#[derive(Debug)]
struct Region {
    id: String,
    content: Option<String>,
}

#[derive(Debug)]
struct PageState {
    label: Option<String>,
    regions: Vec<Region>,
}

/// A static HTML page holding a repository label and one region per series.
#[derive(Debug)]
pub struct HtmlPage {
    url: String,
    state: Mutex<PageState>,
}

impl HtmlPage {
    /// Creates a page loaded from `url` with an empty region for each of `series`.
    pub fn new(url: impl Into<String>, series: &[Metric]) -> Self {
        let regions = series
            .iter()
            .map(|metric| Region {
                id: selector_id(metric.target()).to_string(),
                content: None,
            })
            .collect();

        Self {
            url: url.into(),
            state: Mutex::new(PageState { label: None, regions }),
        }
    }

    /// Current repository label, if set.
    pub fn label(&self) -> Option<String> {
        self.state.lock().label.clone()
    }

    /// Content of the region matching `selector`; `None` when the region is
    /// unknown or still empty.
    pub fn region(&self, selector: &str) -> Option<String> {
        let id = selector_id(selector);
        let state = self.state.lock();
        state
            .regions
            .iter()
            .find(|region| region.id == id)
            .and_then(|region| region.content.clone())
    }

    /// Serializes the page. Region content is inserted as markup; the label is escaped.
    pub fn to_html(&self) -> String {
        let state = self.state.lock();
        let label = state.label.as_deref().unwrap_or_default();

        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", html_escape(label));
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(html, "<h1 id=\"{REPO_LABEL_ID}\">{}</h1>", html_escape(label));
        for region in &state.regions {
            let _ = writeln!(
                html,
                "<div id=\"{}\" class=\"chart\">{}</div>",
                html_escape(&region.id),
                region.content.as_deref().unwrap_or_default()
            );
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Writes the page to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let html = self.to_html();
        std::fs::write(path, &html)?;
        info!(path = %path.display(), bytes = html.len(), "Wrote report page");
        Ok(())
    }
}

impl PageEnvironment for HtmlPage {
    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn set_text(&self, element_id: &str, text: &str) -> Result<()> {
        if element_id != REPO_LABEL_ID {
            return Err(GhReportError::page(format!("no text element with id '{element_id}'")));
        }
        self.state.lock().label = Some(text.to_string());
        debug!(element_id, "Set page text");
        Ok(())
    }

    fn render_region(&self, selector: &str, content: &str) -> Result<()> {
        let id = selector_id(selector);
        let mut state = self.state.lock();
        let region = state
            .regions
            .iter_mut()
            .find(|region| region.id == id)
            .ok_or_else(|| GhReportError::page(format!("no region matches '{selector}'")))?;
        region.content = Some(content.to_string());
        debug!(selector, bytes = content.len(), "Rendered page region");
        Ok(())
    }
}

/// `#commits-over-time` -> `commits-over-time`.
fn selector_id(selector: &str) -> &str {
    selector.strip_prefix('#').unwrap_or(selector)
}
