//! dosescope-figures: declarative chart construction.
//!
//! Figures are Plotly JSON specifications (`data` + `layout`) built from the
//! per-compound activity tables:
//! 1. ED50 vs TD50 comparison scatter
//! 2. ED50/TD50 distribution box plot
//! 3. Organism test-count summary (table + grouped bar)
//! 4. Exploratory views over unfiltered activity data
//!
//! Rendering happens client-side; `export` writes standalone HTML pages.

pub mod plot;
pub mod key;
pub mod dose;
pub mod organisms;
pub mod explore;
pub mod export;

pub use dose::{build_figures, FigureSet};
pub use explore::{build_exploration_figures, ExplorationFigure};
pub use export::{HtmlExporter, PLOTLY_CDN};
pub use key::{FigureKey, FigureView};
pub use organisms::{build_organism_summary, OrganismCount};
pub use plot::Figure;
