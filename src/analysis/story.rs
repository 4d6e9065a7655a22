use tracing::{debug, info, warn};

use crate::error::Result;
use crate::operations::creation::MakeFace;
use crate::operations::query::FaceArea;
use crate::operations::section::{ConnectEdges, Section};
use crate::report::{HeightSection, ProductSection, SectionReport};
use crate::scene::Product;
use crate::topology::{FaceId, TopologyStore};

use super::config::SectionSettings;
use super::events::{AnalysisEvent, Progress};
use super::slicing::{slice_face, SliceHeights};

/// Sections every product at a series of heights and sums the areas.
///
/// At each height a horizontal slice face is intersected with each product.
/// The section edges are connected into wires, each closed wire becomes a
/// face, and the face areas are summed per product, per height and overall.
/// Open wires are reported and left out of the sums.
///
/// # Errors
///
/// Returns an error for invalid settings or when a kernel operation fails.
pub fn story_sections(
    store: &mut TopologyStore,
    products: &[Product],
    settings: &SectionSettings,
    progress: &mut impl Progress,
) -> Result<SectionReport> {
    let heights = SliceHeights::new(settings)?;
    let mut report = SectionReport::default();

    for height in heights.iter() {
        progress.on_event(&AnalysisEvent::SliceStarted { height });
        let face = slice_face(store, height, settings.extent)?;

        let mut sections = Vec::new();
        for product in products {
            if let Some(section) =
                section_product(store, face, product, height, settings.wire_tolerance, progress)?
            {
                sections.push(section);
            }
        }
        let total_area = sections
            .iter()
            .fold(0.0, |total, section| total + section.total_area());

        info!(height, products = sections.len(), total_area, "section done");
        progress.on_event(&AnalysisEvent::SliceFinished { height, total_area });
        report.total_area += total_area;
        report.heights.push(HeightSection {
            height,
            products: sections,
            total_area,
        });
    }

    info!(
        heights = report.heights.len(),
        total_area = report.total_area,
        "story sections done"
    );
    Ok(report)
}

/// Section of one product, or `None` if the slice misses it.
fn section_product(
    store: &mut TopologyStore,
    face: FaceId,
    product: &Product,
    height: f64,
    tolerance: f64,
    progress: &mut impl Progress,
) -> Result<Option<ProductSection>> {
    let edges = Section::new(face, product.solid).execute(store)?;
    if edges.is_empty() {
        return Ok(None);
    }
    let edge_count = edges.len();
    let wires = ConnectEdges::new(edges, tolerance).execute(store)?;

    let mut areas = Vec::with_capacity(wires.closed.len());
    for &wire in &wires.closed {
        match MakeFace::new(wire, vec![]).execute(store) {
            Ok(loop_face) => areas.push(FaceArea::new(loop_face).execute(store)?),
            Err(e) => warn!(element = %product.label, height, error = %e, "section loop has no area"),
        }
    }

    if !wires.open.is_empty() {
        warn!(
            element = %product.label,
            height,
            open_wires = wires.open.len(),
            "section did not close"
        );
        progress.on_event(&AnalysisEvent::OpenSection {
            element: product.label.clone(),
            height,
            open_wires: wires.open.len(),
        });
    }
    debug!(element = %product.label, height, edge_count, loops = areas.len(), "product sectioned");

    Ok(Some(ProductSection {
        label: product.label.clone(),
        ifc_type: product.kind.to_string(),
        edge_count,
        wire_count: wires.closed.len() + wires.open.len(),
        areas,
        open_wires: wires.open.len(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::analysis::Silent;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;
    use crate::scene::{ElementKind, Scene};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn unit_cube_profile() {
        let mut store = TopologyStore::new();
        let cube = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let products = vec![Product {
            label: "Cube".into(),
            kind: ElementKind::Slab,
            solid: cube,
        }];
        let report =
            story_sections(&mut store, &products, &SectionSettings::default(), &mut Silent).unwrap();

        // Heights 0.0, 0.5, 1.0, 1.5: base and top both give the footprint.
        let per_height: Vec<usize> = report.heights.iter().map(|h| h.products.len()).collect();
        assert_eq!(per_height, vec![1, 1, 1, 0]);
        for section in &report.heights[..3] {
            assert_eq!(section.products[0].areas.len(), 1);
            assert_eq!(section.products[0].edge_count, 4);
            assert_relative_eq!(section.total_area, 1.0, epsilon = 1e-9);
        }
        assert!(report.heights[3].total_area.is_sign_positive());
        assert_relative_eq!(report.total_area, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn house_profile() {
        let json = r#"{ "products": [
            { "type": "IfcWall", "name": "West",
              "representation": { "kind": "box", "min": [-2.2, -5, 0], "max": [-2, 5, 3] } },
            { "type": "IfcWall", "name": "East",
              "representation": { "kind": "box", "min": [2, -5, 0], "max": [2.2, 5, 3] } },
            { "type": "IfcSlab", "name": "Floor",
              "representation": { "kind": "box", "min": [-2, -5, -0.2], "max": [2, 5, 0.1] } },
            { "type": "IfcOpeningElement", "name": "Window opening",
              "representation": { "kind": "box", "min": [-2.3, 0, 1], "max": [-1.9, 1, 2] } }
        ] }"#;
        let scene = Scene::from_json(json, "inline").unwrap();
        let mut store = TopologyStore::new();
        let products = scene.build(&mut store, &mut Silent);

        let settings = SectionSettings {
            max: 1.0,
            ..SectionSettings::default()
        };
        let mut finished = Vec::new();
        let report = story_sections(&mut store, &products, &settings, &mut |e: &AnalysisEvent| {
            if let AnalysisEvent::SliceFinished { height, .. } = e {
                finished.push(*height);
            }
        })
        .unwrap();

        assert_eq!(finished, vec![0.0, 0.5, 1.0]);
        // At 0.0 the floor slab is cut and the walls standing on it show
        // their footprints.
        let ground = &report.heights[0];
        let types: Vec<&str> = ground.products.iter().map(|s| s.ifc_type.as_str()).collect();
        assert_eq!(types, vec!["IfcWall", "IfcWall", "IfcSlab"]);
        assert_relative_eq!(ground.total_area, 44.0, epsilon = 1e-9);
        // Above the slab, two wall sections of 0.2 x 10 each.
        assert_relative_eq!(report.heights[1].total_area, 4.0, epsilon = 1e-9);
        assert_relative_eq!(report.total_area, 52.0, epsilon = 1e-9);
    }

    #[test]
    fn product_outside_slice_face_is_missing() {
        let mut store = TopologyStore::new();
        let far = MakeBox::new(p(50.0, 50.0, 0.0), p(51.0, 51.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let products = vec![Product {
            label: "Shed".into(),
            kind: ElementKind::Other("IfcBuildingElementProxy".into()),
            solid: far,
        }];
        let report =
            story_sections(&mut store, &products, &SectionSettings::default(), &mut Silent).unwrap();
        assert!(report.heights.iter().all(|h| h.products.is_empty()));
        assert_relative_eq!(report.total_area, 0.0);
    }

    #[test]
    fn partly_covered_product_reports_open_wires() {
        let mut store = TopologyStore::new();
        // Crosses the slice face border at x = 10.
        let long = MakeBox::new(p(5.0, 0.0, 0.0), p(15.0, 1.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let products = vec![Product {
            label: "Beam".into(),
            kind: ElementKind::Beam,
            solid: long,
        }];
        let settings = SectionSettings {
            start: 1.0,
            max: 1.0,
            ..SectionSettings::default()
        };
        let mut open = 0;
        let report = story_sections(&mut store, &products, &settings, &mut |e: &AnalysisEvent| {
            if let AnalysisEvent::OpenSection { open_wires, .. } = e {
                open += open_wires;
            }
        })
        .unwrap();

        let section = &report.heights[0].products[0];
        assert!(section.areas.is_empty());
        assert_eq!(section.open_wires, 1);
        assert_eq!(section.wire_count, 1);
        assert_eq!(open, 1);
        assert_relative_eq!(report.total_area, 0.0);
    }
}
