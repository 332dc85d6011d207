//! Resolving a variable font to a single weight instance.

use log::{debug, info, warn};
use skrifa::{
    FontRef, MetadataProvider, Tag,
    instance::Location,
    raw::{ReadError, TableProvider},
};

use crate::{config::WEIGHT_AXIS, error::Result};

/// Outcome of [`FontInstance::select_weight`].
#[derive(Debug, Clone, PartialEq)]
pub enum WeightSelection {
    /// Static font; the requested weight was ignored.
    Static,
    /// The (possibly clamped) weight is now active.
    Applied { requested: f32, weight: f32 },
    /// Variable font without a weight axis; the current instance is kept.
    NoWeightAxis,
    /// The variation data could not be read; the current instance is kept.
    Failed(String),
}

/// A variation axis as shown to users.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisInfo {
    pub tag: Tag,
    pub min: f32,
    pub default: f32,
    pub max: f32,
}

/// A parsed font together with the design-space location used for rasterizing.
///
/// Owned by one conversion; the location starts at the font's default instance.
pub struct FontInstance<'a> {
    font: FontRef<'a>,
    location: Location,
    weight: Option<f32>,
}

impl<'a> FontInstance<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Ok(Self {
            font: FontRef::new(data)?,
            location: Location::default(),
            weight: None,
        })
    }

    pub fn font(&self) -> &FontRef<'a> {
        &self.font
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The committed weight, if one was applied.
    pub fn weight(&self) -> Option<f32> {
        self.weight
    }

    /// Variation axes declared by the font (empty for static fonts).
    pub fn axes(&self) -> Vec<AxisInfo> {
        self.font
            .axes()
            .iter()
            .map(|axis| AxisInfo {
                tag: axis.tag(),
                min: axis.min_value(),
                default: axis.default_value(),
                max: axis.max_value(),
            })
            .collect()
    }

    /// Commit `weight` to the font's weight axis, clamped to the axis range.
    ///
    /// Never fails: problems are logged as warnings and the current instance stays active.
    pub fn select_weight(&mut self, weight: f32) -> WeightSelection {
        let range = self.weight_range();
        self.apply_weight(weight, range)
    }

    fn apply_weight(
        &mut self,
        weight: f32,
        range: std::result::Result<WeightRange, ReadError>,
    ) -> WeightSelection {
        match range {
            Ok(WeightRange::Static) => {
                debug!("Static font, ignoring weight {weight}");
                WeightSelection::Static
            }
            Ok(WeightRange::Missing) => {
                warn!("No weight axis found, using the default instance");
                WeightSelection::NoWeightAxis
            }
            Ok(WeightRange::Axis { min, max }) => {
                let clamped = clamp_weight(weight, min, max);
                self.location = self.font.axes().location([(WEIGHT_AXIS, clamped)]);
                self.weight = Some(clamped);
                info!("Set variable font weight to {clamped}");
                WeightSelection::Applied { requested: weight, weight: clamped }
            }
            Err(e) => {
                warn!("Could not set weight: {e}");
                WeightSelection::Failed(e.to_string())
            }
        }
    }

    fn weight_range(&self) -> std::result::Result<WeightRange, ReadError> {
        let fvar = match self.font.fvar() {
            Ok(fvar) => fvar,
            Err(ReadError::TableIsMissing(_)) => return Ok(WeightRange::Static),
            Err(e) => return Err(e),
        };

        let range = fvar
            .axes()?
            .iter()
            .find(|axis| axis.axis_tag() == WEIGHT_AXIS)
            .map(|axis| WeightRange::Axis {
                min: axis.min_value().to_f32(),
                max: axis.max_value().to_f32(),
            })
            .unwrap_or(WeightRange::Missing);
        Ok(range)
    }
}

enum WeightRange {
    Static,
    Missing,
    Axis { min: f32, max: f32 },
}

fn clamp_weight(weight: f32, min: f32, max: f32) -> f32 {
    weight.max(min).min(max)
}
