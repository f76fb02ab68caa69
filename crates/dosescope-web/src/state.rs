//! Shared application state for the web server.

use std::collections::BTreeMap;
use std::sync::Arc;

use dosescope_common::{ActivityTable, DoseError, DrugInfo};
use dosescope_figures::{FigureKey, FigureSet, FigureView};
use minijinja::Environment;
use serde::Serialize;

use crate::error::ApiError;

/// Everything the handlers read. Built once before serving and never
/// mutated, so handlers share it without locking.
pub struct AppState {
    pub figures: FigureSet,
    pub activities: BTreeMap<String, ActivityTable>,
    pub drug_info: BTreeMap<String, DrugInfo>,
    templates: Environment<'static>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        activities: BTreeMap<String, ActivityTable>,
        drug_info: BTreeMap<String, DrugInfo>,
        figures: FigureSet,
    ) -> Result<Self, DoseError> {
        Ok(Self { figures, activities, drug_info, templates: template_env()? })
    }

    /// Comparison-view keys in display order.
    pub fn comparison_keys(&self) -> impl Iterator<Item = &FigureKey> {
        self.figures.keys().filter(|k| k.view == FigureView::Comparison)
    }

    pub fn default_key(&self) -> Option<&FigureKey> {
        self.comparison_keys().next()
    }

    /// Property record for a compound; unavailable when none was persisted.
    pub fn info_for(&self, compound: &str) -> DrugInfo {
        self.drug_info.get(compound).cloned().unwrap_or_else(DrugInfo::unavailable)
    }

    pub fn knows_compound(&self, compound: &str) -> bool {
        self.activities.contains_key(compound) || self.drug_info.contains_key(compound)
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, ApiError> {
        let template = self.templates.get_template(name).map_err(ApiError::from)?;
        template.render(ctx).map_err(ApiError::from)
    }
}

fn template_env() -> Result<Environment<'static>, DoseError> {
    let mut env = Environment::new();
    for (name, source) in [
        ("base.html", include_str!("../templates/base.html")),
        ("home.html", include_str!("../templates/home.html")),
        ("organisms.html", include_str!("../templates/organisms.html")),
    ] {
        env.add_template(name, source)
            .map_err(|e| DoseError::Render(e.to_string()))?;
    }
    env.add_global("plotly_src", dosescope_figures::PLOTLY_CDN);
    Ok(env)
}
