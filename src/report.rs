//! Results of the two analyses and their text rendering.
//!
//! Every report serializes to JSON and prints, via [`Display`](fmt::Display),
//! in the plain text layout of the command line tool.

use std::fmt;

use serde::Serialize;

/// Result of the interior volume analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteriorVolumeReport {
    /// Lower corner of the wall bounding box.
    pub bounds_min: [f64; 3],
    /// Upper corner of the wall bounding box.
    pub bounds_max: [f64; 3],
    /// Center of the wall bounding box, the reference point of every half-space.
    pub center: [f64; 3],
    pub wall_planes: usize,
    pub roof_planes: usize,
    /// Curved faces left out of the plane selection.
    pub skipped_faces: usize,
    /// Volume of the reduced solid in cubic meters.
    pub volume: f64,
}

impl fmt::Display for InteriorVolumeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.center;
        writeln!(f, "Bounding box center: {x:.2} {y:.2} {z:.2}")?;
        writeln!(
            f,
            "Bounding planes: {} from walls, {} from roofs",
            self.wall_planes, self.roof_planes
        )?;
        if self.skipped_faces > 0 {
            writeln!(f, "Skipped curved faces: {}", self.skipped_faces)?;
        }
        writeln!(f, "Space volume: {:.3} cubic meter", self.volume)
    }
}

/// Section of one product at one height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSection {
    pub label: String,
    /// IFC type name of the product.
    pub ifc_type: String,
    /// Number of section edges before wire reconstruction.
    pub edge_count: usize,
    /// Wires reconstructed from the edges, closed and open.
    pub wire_count: usize,
    /// Area of each closed section loop.
    pub areas: Vec<f64>,
    /// Section chains that did not close; their area is not counted.
    pub open_wires: usize,
}

impl ProductSection {
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.areas.iter().fold(0.0, |total, area| total + area)
    }
}

/// All product sections at one height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightSection {
    pub height: f64,
    /// Products the slice intersects, in scene order.
    pub products: Vec<ProductSection>,
    pub total_area: f64,
}

/// Result of the story area analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionReport {
    pub heights: Vec<HeightSection>,
    /// Sum of the section areas over all heights.
    pub total_area: f64,
}

impl fmt::Display for HeightSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Section height          = {:?}", self.height)?;
        for product in &self.products {
            writeln!(f, "    {:<20}: {}", product.ifc_type, product.label)?;
            writeln!(f, "        number of faces = {}", product.wire_count)?;
            for area in &product.areas {
                writeln!(f, "        surface area    = {area:?}")?;
            }
            if product.open_wires > 0 {
                writeln!(
                    f,
                    "        open wires      = {} (not counted)",
                    product.open_wires
                )?;
            }
        }
        writeln!(f, "    Total section area  = {:?}", self.total_area)
    }
}

impl fmt::Display for SectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.heights {
            writeln!(f, "{section}")?;
        }
        writeln!(f, "Total building section areas = {:?}", self.total_area)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_sections() -> SectionReport {
        let wall = ProductSection {
            label: "West wall".into(),
            ifc_type: "IfcWallStandardCase".into(),
            edge_count: 4,
            wire_count: 1,
            areas: vec![2.0],
            open_wires: 0,
        };
        let roof = ProductSection {
            label: "Roof".into(),
            ifc_type: "IfcRoof".into(),
            edge_count: 3,
            wire_count: 1,
            areas: vec![],
            open_wires: 1,
        };
        SectionReport {
            heights: vec![HeightSection {
                height: 0.5,
                products: vec![wall, roof],
                total_area: 2.0,
            }],
            total_area: 2.0,
        }
    }

    #[test]
    fn volume_report_layout() {
        let report = InteriorVolumeReport {
            bounds_min: [-2.2, -5.0, 0.0],
            bounds_max: [2.2, 5.0, 3.0],
            center: [0.0, 0.0, 1.5],
            wall_planes: 4,
            roof_planes: 1,
            skipped_faces: 0,
            volume: 120.0,
        };
        assert_eq!(
            report.to_string(),
            "Bounding box center: 0.00 0.00 1.50\n\
             Bounding planes: 4 from walls, 1 from roofs\n\
             Space volume: 120.000 cubic meter\n"
        );
    }

    #[test]
    fn section_report_layout() {
        let text = sample_sections().to_string();
        let expected = "Section height          = 0.5\n\
                        \x20   IfcWallStandardCase : West wall\n\
                        \x20       number of faces = 1\n\
                        \x20       surface area    = 2.0\n\
                        \x20   IfcRoof             : Roof\n\
                        \x20       number of faces = 1\n\
                        \x20       open wires      = 1 (not counted)\n\
                        \x20   Total section area  = 2.0\n\
                        \n\
                        Total building section areas = 2.0\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn reports_serialize() {
        let json = serde_json::to_value(sample_sections()).unwrap();
        assert_eq!(json["heights"][0]["products"][1]["open_wires"], 1);
        assert_eq!(json["total_area"], 2.0);
    }

    #[test]
    fn empty_section_prints_positive_zero() {
        let section = HeightSection {
            height: 2.0,
            products: vec![],
            total_area: ProductSection {
                label: "Nothing".into(),
                ifc_type: "IfcSlab".into(),
                edge_count: 0,
                wire_count: 0,
                areas: vec![],
                open_wires: 0,
            }
            .total_area(),
        };
        assert!(section.total_area.is_sign_positive());
        assert!(section.to_string().ends_with("    Total section area  = 0.0\n"));
    }
}
