//! Figure keys: `{compound}_{view}`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FigureView {
    /// ED50 vs TD50 marker chart.
    Comparison,
    /// ED50/TD50 box plot with all points.
    Distribution,
}

impl FigureView {
    pub fn suffix(&self) -> &'static str {
        match self {
            FigureView::Comparison   => "ed_td",
            FigureView::Distribution => "distribution",
        }
    }

    pub fn other(&self) -> FigureView {
        match self {
            FigureView::Comparison   => FigureView::Distribution,
            FigureView::Distribution => FigureView::Comparison,
        }
    }
}

/// Identifies one chart. Parsing strips the known view suffix from the
/// right, so compound names may themselves contain underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FigureKey {
    pub compound: String,
    pub view: FigureView,
}

impl FigureKey {
    pub fn new(compound: &str, view: FigureView) -> Self {
        Self { compound: compound.to_string(), view }
    }

    pub fn comparison(compound: &str) -> Self {
        Self::new(compound, FigureView::Comparison)
    }

    pub fn distribution(compound: &str) -> Self {
        Self::new(compound, FigureView::Distribution)
    }

    /// The same compound's figure in the other view.
    pub fn sibling(&self) -> Self {
        Self::new(&self.compound, self.view.other())
    }
}

impl fmt::Display for FigureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.compound, self.view.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFigureKey(pub String);

impl fmt::Display for UnknownFigureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a figure key: {}", self.0)
    }
}

impl std::error::Error for UnknownFigureKey {}

impl FromStr for FigureKey {
    type Err = UnknownFigureKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for view in [FigureView::Comparison, FigureView::Distribution] {
            if let Some(compound) = s.strip_suffix(view.suffix()).and_then(|c| c.strip_suffix('_')) {
                if !compound.is_empty() {
                    return Ok(FigureKey::new(compound, view));
                }
            }
        }
        Err(UnknownFigureKey(s.to_string()))
    }
}

impl Serialize for FigureKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
