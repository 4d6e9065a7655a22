use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::math::Point3;
use crate::operations::query::Aabb;
use crate::operations::section::DEFAULT_CONNECT_TOLERANCE;

/// Tuning of the interior volume analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSettings {
    /// A wall face is selected when the dot product of its normal with the
    /// unit vector towards the scene center is below this value.
    pub wall_dot_threshold: f64,
    /// A roof face is selected when the z component of its normal exceeds this value.
    pub roof_normal_z: f64,
    /// Largest `|normal.z|` for a face to count as vertical.
    pub horizontal_tolerance: f64,
    /// Lower corner of the box the half-spaces are folded into.
    pub initial_box_min: [f64; 3],
    /// Upper corner of the box the half-spaces are folded into.
    pub initial_box_max: [f64; 3],
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            wall_dot_threshold: -0.8,
            roof_normal_z: 0.7,
            horizontal_tolerance: 1e-6,
            initial_box_min: [-10.0, -10.0, 0.0],
            initial_box_max: [10.0, 10.0, 10.0],
        }
    }
}

impl VolumeSettings {
    /// The initial box as an [`Aabb`].
    #[must_use]
    pub fn initial_box(&self) -> Aabb {
        Aabb {
            min: Point3::from(self.initial_box_min),
            max: Point3::from(self.initial_box_max),
        }
    }

    /// Checks the settings for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidSettings`] for an initial box that
    /// does not span a volume or a negative horizontal tolerance.
    pub fn validate(&self) -> Result<()> {
        if (0..3).any(|i| self.initial_box_min[i] >= self.initial_box_max[i]) {
            return Err(invalid(format!(
                "initial box {:?} .. {:?} is empty",
                self.initial_box_min, self.initial_box_max
            )));
        }
        if self.horizontal_tolerance < 0.0 {
            return Err(invalid("horizontal tolerance must not be negative".into()));
        }
        Ok(())
    }
}

/// Tuning of the story area analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    /// Height of the first section.
    pub start: f64,
    /// Highest section height (inclusive).
    pub max: f64,
    /// Distance between consecutive sections.
    pub step: f64,
    /// Half size of the square slice face.
    pub extent: f64,
    /// Endpoint tolerance when connecting section edges into wires.
    pub wire_tolerance: f64,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            start: 0.0,
            max: 1.5,
            step: 0.5,
            extent: 10.0,
            wire_tolerance: DEFAULT_CONNECT_TOLERANCE,
        }
    }
}

impl SectionSettings {
    /// Checks the settings for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidSettings`] for a non-positive step,
    /// extent or tolerance, or a maximum below the start height.
    pub fn validate(&self) -> Result<()> {
        if self.step <= 0.0 {
            return Err(invalid(format!("section step must be positive, got {}", self.step)));
        }
        if self.max < self.start {
            return Err(invalid(format!(
                "maximum height {} is below start height {}",
                self.max, self.start
            )));
        }
        if self.extent <= 0.0 {
            return Err(invalid(format!("slice extent must be positive, got {}", self.extent)));
        }
        if self.wire_tolerance <= 0.0 {
            return Err(invalid("wire tolerance must be positive".into()));
        }
        Ok(())
    }
}

/// Settings of both analyses, as read from a configuration file.
///
/// Missing keys take their default values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub volume: VolumeSettings,
    pub sections: SectionSettings,
}

impl AnalysisConfig {
    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ConfigIo`] if the file cannot be read and
    /// [`AnalysisError::ConfigParse`] if it is not a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }

    /// Parses a JSON configuration; `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ConfigParse`] on malformed input.
    pub fn from_json(text: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| {
            AnalysisError::ConfigParse {
                origin: origin.to_string(),
                source,
            }
            .into()
        })
    }

    /// Validates both settings groups.
    ///
    /// # Errors
    ///
    /// Returns the first [`AnalysisError::InvalidSettings`] found.
    pub fn validate(&self) -> Result<()> {
        self.volume.validate()?;
        self.sections.validate()
    }
}

fn invalid(reason: String) -> crate::SpaceError {
    AnalysisError::InvalidSettings(reason).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.sections.step, 0.5);
        assert_relative_eq!(config.volume.initial_box().volume(), 4000.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(r#"{ "sections": { "max": 3.0 } }"#, "inline").unwrap();
        assert_relative_eq!(config.sections.max, 3.0);
        assert_relative_eq!(config.sections.step, 0.5);
        assert_eq!(config.volume, VolumeSettings::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AnalysisConfig::from_json("{ sections: }", "inline").unwrap_err();
        assert!(matches!(
            err,
            crate::SpaceError::Analysis(AnalysisError::ConfigParse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AnalysisConfig::from_file(Path::new("/nonexistent/ifcspace.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ifcspace.json"));
    }

    #[test]
    fn rejects_bad_sections() {
        let zero_step = SectionSettings {
            step: 0.0,
            ..SectionSettings::default()
        };
        assert!(zero_step.validate().is_err());

        let inverted = SectionSettings {
            start: 2.0,
            max: 1.0,
            ..SectionSettings::default()
        };
        assert!(inverted.validate().is_err());

        let no_extent = SectionSettings {
            extent: -1.0,
            ..SectionSettings::default()
        };
        assert!(no_extent.validate().is_err());
    }

    #[test]
    fn rejects_empty_initial_box() {
        let flat = VolumeSettings {
            initial_box_max: [10.0, 10.0, 0.0],
            ..VolumeSettings::default()
        };
        assert!(flat.validate().is_err());
    }
}
