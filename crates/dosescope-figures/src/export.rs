//! Standalone HTML export for figures viewed outside the dashboard.

use std::fs;
use std::path::{Path, PathBuf};

use dosescope_common::{DoseError, Result};
use minijinja::{context, Environment};
use tracing::{debug, info};

use crate::explore::ExplorationFigure;
use crate::plot::Figure;

/// Plotly bundle loaded by every rendered page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STANDALONE_TEMPLATE: &str = "standalone.html";

pub struct HtmlExporter {
    env: Environment<'static>,
}

impl HtmlExporter {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(STANDALONE_TEMPLATE, include_str!("../templates/standalone.html"))
            .map_err(render_error)?;
        Ok(Self { env })
    }

    pub fn render(&self, title: &str, figure: &Figure) -> Result<String> {
        let template = self.env.get_template(STANDALONE_TEMPLATE).map_err(render_error)?;
        template
            .render(context! { title, figure, plotly_src => PLOTLY_CDN })
            .map_err(render_error)
    }

    /// Writes `{dir}/{name}.html` for each figure and returns the paths.
    pub fn write_all(&self, dir: &Path, figures: &[ExplorationFigure]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(figures.len());

        for fig in figures {
            let title = fig
                .figure
                .layout
                .title
                .as_ref()
                .map(|t| t.text.as_str())
                .unwrap_or(fig.name.as_str());
            let path = dir.join(format!("{}.html", fig.name));
            fs::write(&path, self.render(title, &fig.figure)?)?;
            debug!(path = %path.display(), "Wrote figure page");
            written.push(path);
        }

        info!(dir = %dir.display(), count = written.len(), "Exported figures");
        Ok(written)
    }
}

fn render_error(e: minijinja::Error) -> DoseError {
    DoseError::Render(e.to_string())
}
