//! IFC product types and scene element records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::representation::Representation;

/// IFC product types the analyses tell apart.
///
/// Parsing is case-insensitive so both `IfcWall` and the STEP spelling
/// `IFCWALL` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Wall,
    WallStandardCase,
    Roof,
    Slab,
    Plate,
    Window,
    Door,
    Column,
    Beam,
    Member,
    Stair,
    Railing,
    OpeningElement,
    Site,
    /// Any other product type, by its IFC name.
    Other(String),
}

impl ElementKind {
    /// Parses an IFC type name.
    #[must_use]
    pub fn from_ifc_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "IFCWALL" => Self::Wall,
            "IFCWALLSTANDARDCASE" => Self::WallStandardCase,
            "IFCROOF" => Self::Roof,
            "IFCSLAB" => Self::Slab,
            "IFCPLATE" => Self::Plate,
            "IFCWINDOW" => Self::Window,
            "IFCDOOR" => Self::Door,
            "IFCCOLUMN" => Self::Column,
            "IFCBEAM" => Self::Beam,
            "IFCMEMBER" => Self::Member,
            "IFCSTAIR" => Self::Stair,
            "IFCRAILING" => Self::Railing,
            "IFCOPENINGELEMENT" => Self::OpeningElement,
            "IFCSITE" => Self::Site,
            _ => Self::Other(name.to_string()),
        }
    }

    /// The IFC type name.
    #[must_use]
    pub fn ifc_name(&self) -> &str {
        match self {
            Self::Wall => "IfcWall",
            Self::WallStandardCase => "IfcWallStandardCase",
            Self::Roof => "IfcRoof",
            Self::Slab => "IfcSlab",
            Self::Plate => "IfcPlate",
            Self::Window => "IfcWindow",
            Self::Door => "IfcDoor",
            Self::Column => "IfcColumn",
            Self::Beam => "IfcBeam",
            Self::Member => "IfcMember",
            Self::Stair => "IfcStair",
            Self::Railing => "IfcRailing",
            Self::OpeningElement => "IfcOpeningElement",
            Self::Site => "IfcSite",
            Self::Other(name) => name,
        }
    }

    /// Walls, including the `IfcWallStandardCase` subtype.
    #[must_use]
    pub fn is_wall(&self) -> bool {
        matches!(self, Self::Wall | Self::WallStandardCase)
    }

    #[must_use]
    pub fn is_roof(&self) -> bool {
        matches!(self, Self::Roof)
    }

    /// Types that never take part in an analysis.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::OpeningElement | Self::Site)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ifc_name())
    }
}

/// One product of a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// IFC type name, e.g. `IfcWall`.
    #[serde(rename = "type")]
    pub ifc_type: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Geometry; `null` or absent for products without a shape.
    #[serde(default)]
    pub representation: Option<Representation>,
}

impl ElementRecord {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_ifc_name(&self.ifc_type)
    }

    /// Name for reports and logs.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_spellings() {
        assert_eq!(ElementKind::from_ifc_name("IfcWall"), ElementKind::Wall);
        assert_eq!(ElementKind::from_ifc_name("IFCROOF"), ElementKind::Roof);
        assert_eq!(
            ElementKind::from_ifc_name("IfcFurnishingElement"),
            ElementKind::Other("IfcFurnishingElement".into())
        );
    }

    #[test]
    fn standard_case_is_a_wall() {
        let kind = ElementKind::from_ifc_name("IfcWallStandardCase");
        assert!(kind.is_wall());
        assert!(!kind.is_roof());
        assert_eq!(kind.to_string(), "IfcWallStandardCase");
    }

    #[test]
    fn openings_and_site_are_excluded() {
        assert!(ElementKind::OpeningElement.is_excluded());
        assert!(ElementKind::Site.is_excluded());
        assert!(!ElementKind::Slab.is_excluded());
    }

    #[test]
    fn unnamed_label() {
        let record = ElementRecord {
            ifc_type: "IfcSlab".into(),
            name: None,
            representation: None,
        };
        assert_eq!(record.label(), "unnamed");
    }
}
