use tracing::{info, warn};

use crate::error::Result;
use crate::operations::creation::MakeBox;
use crate::report::InteriorVolumeReport;
use crate::scene::Product;
use crate::topology::{SolidId, TopologyStore};

use super::bounds::aggregate_bounds;
use super::config::VolumeSettings;
use super::events::{AnalysisEvent, Progress, SkipReason, Stage};
use super::reduce::{measure_volume, reduce_half_spaces};
use super::select::{select_bounding_planes, ElementRole};

/// Estimates the interior volume enclosed by the walls and roofs.
///
/// The center of the walls' bounding box is taken as a point inside the
/// building. The inner faces of the walls and the undersides of the roofs
/// bound the interior; the initial box is cut by each of their half-spaces
/// in turn and the volume of what remains is measured.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptySolidSet`](crate::error::AnalysisError::EmptySolidSet)
/// if there are no walls and
/// [`AnalysisError::DegenerateReduction`](crate::error::AnalysisError::DegenerateReduction)
/// if the half-spaces do not leave a solid.
pub fn interior_volume(
    store: &mut TopologyStore,
    products: &[Product],
    settings: &VolumeSettings,
    progress: &mut impl Progress,
) -> Result<InteriorVolumeReport> {
    settings.validate()?;

    let walls: Vec<&Product> = products.iter().filter(|p| p.kind.is_wall()).collect();
    let roofs: Vec<&Product> = products.iter().filter(|p| p.kind.is_roof()).collect();

    // Step 1: wall bounds
    let wall_solids: Vec<SolidId> = walls.iter().map(|p| p.solid).collect();
    let bounds = aggregate_bounds(store, &wall_solids)?;
    let center = bounds.center();
    info!(walls = walls.len(), roofs = roofs.len(), ?center, "wall bounds computed");
    progress.on_event(&AnalysisEvent::Stage {
        stage: Stage::BoundsComputed,
    });

    // Step 2: bounding planes, walls first
    let mut planes = Vec::new();
    let (mut wall_planes, mut roof_planes, mut skipped_faces) = (0, 0, 0);
    for (role, group) in [(ElementRole::Wall, &walls), (ElementRole::Roof, &roofs)] {
        for product in group {
            let selection = select_bounding_planes(store, product.solid, role, &center, settings)?;
            if selection.non_planar_faces > 0 {
                warn!(
                    element = %product.label,
                    faces = selection.non_planar_faces,
                    "skipping curved faces"
                );
                skipped_faces += selection.non_planar_faces;
                progress.on_event(&AnalysisEvent::Skipped {
                    element: product.label.clone(),
                    reason: SkipReason::NonPlanarFace,
                });
            }
            match role {
                ElementRole::Wall => wall_planes += selection.planes.len(),
                ElementRole::Roof => roof_planes += selection.planes.len(),
            }
            planes.extend(selection.planes);
        }
    }
    info!(wall_planes, roof_planes, "bounding planes selected");
    progress.on_event(&AnalysisEvent::Stage {
        stage: Stage::PlanesSelected,
    });

    // Step 3: fold half-spaces into the initial box
    let initial = settings.initial_box();
    let start = MakeBox::new(initial.min, initial.max).execute(store)?;
    let reduced = reduce_half_spaces(store, start, &planes, &center, progress)?;
    progress.on_event(&AnalysisEvent::Stage {
        stage: Stage::SpaceReduced,
    });

    // Step 4: measure
    let volume = measure_volume(store, reduced)?;
    info!(volume, "interior volume measured");
    progress.on_event(&AnalysisEvent::Stage {
        stage: Stage::VolumeMeasured,
    });

    Ok(InteriorVolumeReport {
        bounds_min: bounds.min.into(),
        bounds_max: bounds.max.into(),
        center: center.into(),
        wall_planes,
        roof_planes,
        skipped_faces,
        volume,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::scene::Scene;
    use crate::SpaceError;
    use approx::assert_relative_eq;

    /// A 4 x 10 m corridor, 3 m high, closed at both ends, under a flat roof slab.
    const CORRIDOR: &str = r#"{ "products": [
        { "type": "IfcWallStandardCase", "name": "West",
          "representation": { "kind": "box", "min": [-2.2, -5, 0], "max": [-2, 5, 3] } },
        { "type": "IfcWall", "name": "East",
          "representation": { "kind": "box", "min": [2, -5, 0], "max": [2.2, 5, 3] } },
        { "type": "IfcWall", "name": "South",
          "representation": { "kind": "box", "min": [-2, -5.2, 0], "max": [2, -5, 3] } },
        { "type": "IfcWall", "name": "North",
          "representation": { "kind": "box", "min": [-2, 5, 0], "max": [2, 5.2, 3] } },
        { "type": "IfcRoof", "name": "Roof",
          "representation": { "kind": "box", "min": [-2.2, -5.2, 3], "max": [2.2, 5.2, 3.2] } },
        { "type": "IfcColumn", "name": "Column",
          "representation": { "kind": "cylinder", "center": [0, 0, 0], "radius": 0.2, "height": 3 } }
    ] }"#;

    fn run(json: &str, events: &mut Vec<AnalysisEvent>) -> Result<InteriorVolumeReport> {
        let scene = Scene::from_json(json, "inline").unwrap();
        let mut store = TopologyStore::new();
        let mut record = |e: &AnalysisEvent| events.push(e.clone());
        let products = scene.build(&mut store, &mut record);
        interior_volume(&mut store, &products, &VolumeSettings::default(), &mut record)
    }

    #[test]
    fn corridor_volume() {
        let mut events = Vec::new();
        let report = run(CORRIDOR, &mut events).unwrap();

        assert_relative_eq!(report.center[2], 1.5, epsilon = 1e-12);
        // The inner face of each wall and the underside of the roof.
        assert_eq!(report.wall_planes, 4);
        assert_eq!(report.roof_planes, 1);
        assert_relative_eq!(report.volume, 4.0 * 10.0 * 3.0, epsilon = 1e-9);

        let stages: Vec<Stage> = events
            .iter()
            .filter_map(|e| match e {
                AnalysisEvent::Stage { stage } => Some(*stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            vec![
                Stage::SceneBuilt,
                Stage::BoundsComputed,
                Stage::PlanesSelected,
                Stage::SpaceReduced,
                Stage::VolumeMeasured
            ]
        );
    }

    #[test]
    fn gable_house_volume() {
        let mut events = Vec::new();
        let report = run(include_str!("../../demos/gable_house.json"), &mut events).unwrap();
        assert_eq!(report.wall_planes, 4);
        assert_eq!(report.roof_planes, 2);
        // 9.6 m long inside; the profile is 7.6 m wide under a ceiling at
        // 5 - |y| / 2, which is 3.1 m where it meets the walls.
        let profile = 2.0 * (5.0 * 3.8 - 3.8 * 3.8 / 4.0);
        assert_relative_eq!(report.volume, 9.6 * profile, epsilon = 1e-6);
    }

    #[test]
    fn open_ends_fall_back_to_the_initial_box() {
        let json = r#"{ "products": [
            { "type": "IfcWall", "name": "West",
              "representation": { "kind": "box", "min": [-2.2, -5, 0], "max": [-2, 5, 3] } },
            { "type": "IfcWall", "name": "East",
              "representation": { "kind": "box", "min": [2, -5, 0], "max": [2.2, 5, 3] } },
            { "type": "IfcRoof", "name": "Roof",
              "representation": { "kind": "box", "min": [-2.2, -5, 3], "max": [2.2, 5, 3.2] } }
        ] }"#;
        let report = run(json, &mut Vec::new()).unwrap();
        assert_eq!(report.wall_planes, 2);
        // Bounded along y by the 20 m initial box only.
        assert_relative_eq!(report.volume, 4.0 * 20.0 * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn scene_without_walls_fails() {
        let json = r#"{ "products": [ { "type": "IfcRoof", "name": "Roof",
            "representation": { "kind": "box", "min": [0, 0, 3], "max": [1, 1, 3.2] } } ] }"#;
        let err = run(json, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, SpaceError::Analysis(AnalysisError::EmptySolidSet)));
    }

    #[test]
    fn curved_wall_faces_are_reported() {
        let json = r#"{ "products": [
            { "type": "IfcWall", "name": "Round tower",
              "representation": { "kind": "cylinder", "center": [0, 0, 0], "radius": 3, "height": 4 } }
        ] }"#;
        let mut events = Vec::new();
        let report = run(json, &mut events).unwrap();
        assert_eq!(report.skipped_faces, 16);
        assert_eq!(report.wall_planes, 0);
        assert!(events.iter().any(|e| matches!(
            e,
            AnalysisEvent::Skipped {
                reason: SkipReason::NonPlanarFace,
                ..
            }
        )));
        assert_relative_eq!(report.volume, 4000.0, epsilon = 1e-9);
    }

    #[test]
    fn plane_through_center_is_fatal() {
        // The roof underside lies in the horizontal plane through the center.
        let json = r#"{ "products": [
            { "type": "IfcWall", "name": "Low",
              "representation": { "kind": "box", "min": [-1, -1, 0], "max": [1, 1, 1] } },
            { "type": "IfcRoof", "name": "Cap",
              "representation": { "kind": "box", "min": [-5, -5, 0.5], "max": [5, 5, 0.7] } }
        ] }"#;
        let err = run(json, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            SpaceError::Analysis(AnalysisError::DegenerateReduction { .. })
        ));
    }
}
