use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options for one generation run.
///
/// Every field has a default, so a TOML document only needs the keys it
/// changes:
///
/// ```toml
/// num_hull_segments_min = 2
/// num_hull_segments_max = 4
/// allow_vertical_symmetry = true
///
/// [thresholds]
/// rear_engine = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Lower bound of the hull segment count (inclusive).
    pub num_hull_segments_min: usize,
    /// Upper bound of the hull segment count (exclusive unless equal to min).
    pub num_hull_segments_max: usize,
    /// Grow one-sided bulges after the hull.
    pub create_asymmetry_segments: bool,
    /// Lower bound of the bulge chain length (inclusive).
    pub num_asymmetry_segments_min: usize,
    /// Upper bound of the bulge chain length (exclusive unless equal to min).
    pub num_asymmetry_segments_max: usize,
    /// Categorize faces and run the detail generators.
    pub create_face_detail: bool,
    /// Allow the 50% chance of mirroring about the Y plane.
    pub allow_horizontal_symmetry: bool,
    /// Allow the 50% chance of mirroring about the Z plane.
    pub allow_vertical_symmetry: bool,
    /// Return a cosmetic bevel recommendation with the mesh.
    pub apply_bevel_hint: bool,
    /// Use the five-tag material scheme; otherwise everything is `Hull`.
    pub assign_material_tags: bool,
    /// Chance that a hull segment is ribbed rather than smooth.
    pub ribbed_segment_chance: f64,
    /// Chance that a face sprouts a bulge.
    pub asymmetry_chance: f64,
    /// Face categorization thresholds.
    pub thresholds: DetailThresholds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_hull_segments_min: 3,
            num_hull_segments_max: 6,
            create_asymmetry_segments: true,
            num_asymmetry_segments_min: 1,
            num_asymmetry_segments_max: 5,
            create_face_detail: true,
            allow_horizontal_symmetry: true,
            allow_vertical_symmetry: false,
            apply_bevel_hint: true,
            assign_material_tags: true,
            ribbed_segment_chance: 0.1,
            asymmetry_chance: 0.15,
            thresholds: DetailThresholds::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or mistyped
    /// values, and any error [`GeneratorConfig::validate`] reports.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] if a min exceeds its max, or
    /// [`ConfigError::ProbabilityOutOfRange`] if a chance or threshold is
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "num_hull_segments",
            self.num_hull_segments_min,
            self.num_hull_segments_max,
        )?;
        check_range(
            "num_asymmetry_segments",
            self.num_asymmetry_segments_min,
            self.num_asymmetry_segments_max,
        )?;
        check_probability("ribbed_segment_chance", self.ribbed_segment_chance)?;
        check_probability("asymmetry_chance", self.asymmetry_chance)?;
        for (parameter, value) in self.thresholds.entries() {
            check_probability(parameter, value)?;
        }
        Ok(())
    }
}

fn check_range(parameter: &'static str, min: usize, max: usize) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvalidRange {
            parameter,
            min,
            max,
        });
    }
    Ok(())
}

fn check_probability(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { parameter, value });
    }
    Ok(())
}

/// Thresholds for face categorization.
///
/// Each face draws one value in `[0, 1)`; the first threshold in its
/// direction's list that the value exceeds picks the bucket. The values
/// are tuning constants, not contracts: only the guarantee of one engine
/// and one weapon emplacement is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailThresholds {
    pub rear_engine: f64,
    pub rear_cylinders: f64,
    pub rear_grid: f64,
    pub front_antenna: f64,
    pub front_grid: f64,
    pub top_antenna: f64,
    pub top_grid: f64,
    pub top_cylinders: f64,
    pub bottom_disc: f64,
    pub bottom_grid: f64,
    pub bottom_weapons: f64,
    pub side_weapons: f64,
    pub side_grid: f64,
    pub side_sphere: f64,
}

impl Default for DetailThresholds {
    fn default() -> Self {
        Self {
            rear_engine: 0.75,
            rear_cylinders: 0.5,
            rear_grid: 0.25,
            front_antenna: 0.7,
            front_grid: 0.4,
            top_antenna: 0.7,
            top_grid: 0.6,
            top_cylinders: 0.3,
            bottom_disc: 0.75,
            bottom_grid: 0.5,
            bottom_weapons: 0.25,
            side_weapons: 0.75,
            side_grid: 0.6,
            side_sphere: 0.4,
        }
    }
}

impl DetailThresholds {
    fn entries(&self) -> [(&'static str, f64); 14] {
        [
            ("thresholds.rear_engine", self.rear_engine),
            ("thresholds.rear_cylinders", self.rear_cylinders),
            ("thresholds.rear_grid", self.rear_grid),
            ("thresholds.front_antenna", self.front_antenna),
            ("thresholds.front_grid", self.front_grid),
            ("thresholds.top_antenna", self.top_antenna),
            ("thresholds.top_grid", self.top_grid),
            ("thresholds.top_cylinders", self.top_cylinders),
            ("thresholds.bottom_disc", self.bottom_disc),
            ("thresholds.bottom_grid", self.bottom_grid),
            ("thresholds.bottom_weapons", self.bottom_weapons),
            ("thresholds.side_weapons", self.side_weapons),
            ("thresholds.side_grid", self.side_grid),
            ("thresholds.side_sphere", self.side_sphere),
        ]
    }
}
