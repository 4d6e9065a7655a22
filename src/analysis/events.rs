//! Progress reporting for the analysis pipelines.
//!
//! Pipelines never block; they emit [`AnalysisEvent`]s to a [`Progress`]
//! sink, which may log them, collect them, or pause for the user.

use serde::Serialize;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Scene elements turned into solids.
    SceneBuilt,
    /// Wall bounding box and center computed.
    BoundsComputed,
    /// Bounding planes selected from walls and roofs.
    PlanesSelected,
    /// Half-spaces folded into the initial box.
    SpaceReduced,
    /// Volume of the reduced solid measured.
    VolumeMeasured,
}

/// Why an element or face was left out of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The element has no geometric representation.
    MissingGeometry,
    /// The element type is never analyzed (openings, site).
    ExcludedType,
    /// A candidate face is curved and has no plane equation.
    NonPlanarFace,
    /// The representation does not describe a valid solid.
    InvalidGeometry,
}

/// Something that happened during an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    /// A stage finished.
    Stage { stage: Stage },

    /// An element (or one of its faces) was skipped.
    Skipped { element: String, reason: SkipReason },

    /// One half-space was applied during the reduction.
    HalfSpaceApplied { step: usize, volume: f64 },

    /// A slice is about to be sectioned.
    SliceStarted { height: f64 },

    /// A slice is done.
    SliceFinished { height: f64, total_area: f64 },

    /// Section edges of an element did not all close into loops.
    OpenSection {
        element: String,
        height: f64,
        open_wires: usize,
    },
}

impl AnalysisEvent {
    /// Whether an interactive front end should pause after this event.
    #[must_use]
    pub fn is_checkpoint(&self) -> bool {
        matches!(
            self,
            Self::Stage { .. } | Self::SliceStarted { .. } | Self::SliceFinished { .. }
        )
    }
}

/// Receiver of [`AnalysisEvent`]s.
pub trait Progress {
    fn on_event(&mut self, event: &AnalysisEvent);
}

impl<F: FnMut(&AnalysisEvent)> Progress for F {
    fn on_event(&mut self, event: &AnalysisEvent) {
        self(event);
    }
}

/// A [`Progress`] sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    fn on_event(&mut self, _event: &AnalysisEvent) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn closures_collect_events() {
        let mut seen = Vec::new();
        let mut sink = |e: &AnalysisEvent| seen.push(e.clone());
        sink.on_event(&AnalysisEvent::SliceStarted { height: 0.5 });
        sink.on_event(&AnalysisEvent::Stage {
            stage: Stage::SceneBuilt,
        });
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn checkpoints() {
        assert!(AnalysisEvent::SliceStarted { height: 0.0 }.is_checkpoint());
        assert!(!AnalysisEvent::Skipped {
            element: "Site".into(),
            reason: SkipReason::ExcludedType,
        }
        .is_checkpoint());
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&AnalysisEvent::OpenSection {
            element: "Roof".into(),
            height: 1.0,
            open_wires: 2,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"open_section","element":"Roof","height":1.0,"open_wires":2}"#
        );
    }
}
