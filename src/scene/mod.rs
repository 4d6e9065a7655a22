//! Building scenes: IFC products with simple geometric representations,
//! read from JSON.

mod element;
mod representation;

pub use element::{ElementKind, ElementRecord};
pub use representation::Representation;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisEvent, Progress, SkipReason, Stage};
use crate::error::{Result, SceneError};
use crate::topology::{SolidId, TopologyStore};

/// A building model: a named list of products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub products: Vec<ElementRecord>,
}

/// A scene product turned into a solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub label: String,
    pub kind: ElementKind,
    pub solid: SolidId,
}

impl Scene {
    /// Reads a scene from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read and
    /// [`SceneError::Parse`] if it is not a valid scene.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }

    /// Parses a scene from JSON text; `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Parse`] on malformed input.
    pub fn from_json(text: &str, origin: &str) -> Result<Self> {
        let scene: Self = serde_json::from_str(text).map_err(|source| SceneError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        debug!(origin, products = scene.products.len(), "scene parsed");
        Ok(scene)
    }

    /// Builds a solid for every product that takes part in the analyses.
    ///
    /// Openings and the site are skipped, as are products without a
    /// representation and products whose representation does not describe
    /// a valid solid. Every skip is reported to `progress`.
    pub fn build(&self, store: &mut TopologyStore, progress: &mut impl Progress) -> Vec<Product> {
        let mut products = Vec::with_capacity(self.products.len());
        for record in &self.products {
            let kind = record.kind();
            let label = record.label().to_string();

            let representation = match &record.representation {
                _ if kind.is_excluded() => Err(SkipReason::ExcludedType),
                None => Err(SkipReason::MissingGeometry),
                Some(representation) => Ok(representation),
            };
            let representation = match representation {
                Ok(representation) => representation,
                Err(reason) => {
                    debug!(element = %label, %kind, ?reason, "product skipped");
                    progress.on_event(&AnalysisEvent::Skipped {
                        element: label,
                        reason,
                    });
                    continue;
                }
            };

            match representation.to_solid(store) {
                Ok(solid) => products.push(Product { label, kind, solid }),
                Err(e) => {
                    let error = SceneError::InvalidRepresentation {
                        element: format!("{kind} '{label}'"),
                        reason: e.to_string(),
                    };
                    warn!(%error, "product skipped");
                    progress.on_event(&AnalysisEvent::Skipped {
                        element: label,
                        reason: SkipReason::InvalidGeometry,
                    });
                }
            }
        }

        info!(
            products = products.len(),
            skipped = self.products.len() - products.len(),
            "scene built"
        );
        progress.on_event(&AnalysisEvent::Stage {
            stage: Stage::SceneBuilt,
        });
        products
    }
}
