//! Configuration types for tensordraw layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML configuration file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout defaults and style settings.
//! - [`Defaults`] - Default tensor and leg dimensions used by node and chain layout.
//! - [`DefaultsOverride`] - Partial [`Defaults`], applied on top of an existing set.
//! - [`StyleConfig`] - SVG output options such as scale and stroke width.
//!
//! # Precedence
//!
//! A value given at a layout call wins over the session [`Defaults`], which
//! in turn start from the configuration file and may be patched by a
//! diagram description's `[defaults]` table.
//!
//! # Example
//!
//! ```
//! # use tensordraw::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().tensor_width(), 3.0);
//! ```

use serde::Deserialize;

use tensordraw_core::leg::{Side, SpacingPolicy};

use crate::error::LayoutError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout defaults section.
    #[serde(default)]
    layout: Defaults,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout defaults and style.
    pub fn new(layout: Defaults, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout defaults.
    pub fn layout(&self) -> &Defaults {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Default dimensions for tensors and legs, in diagram units.
///
/// | option | default | used for |
/// |---|---|---|
/// | `tensor_width` | 3.0 | minimum box width |
/// | `tensor_height` | 1.0 | minimum box height |
/// | `horizontal_leg_length` | 0.5 | west and east legs |
/// | `vertical_leg_length` | 0.5 | north and south legs |
/// | `leg_pitch` | 1.0 | room per leg when deriving a box size from leg counts |
/// | `node_gap` | 1.0 | free space between neighbouring chain nodes and placed items |
/// | `spacing` | even | how legs share a side |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    tensor_width: f32,
    tensor_height: f32,
    horizontal_leg_length: f32,
    vertical_leg_length: f32,
    leg_pitch: f32,
    node_gap: f32,
    spacing: SpacingPolicy,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            tensor_width: 3.0,
            tensor_height: 1.0,
            horizontal_leg_length: 0.5,
            vertical_leg_length: 0.5,
            leg_pitch: 1.0,
            node_gap: 1.0,
            spacing: SpacingPolicy::Even,
        }
    }
}

impl Defaults {
    pub fn tensor_width(&self) -> f32 {
        self.tensor_width
    }

    pub fn tensor_height(&self) -> f32 {
        self.tensor_height
    }

    pub fn horizontal_leg_length(&self) -> f32 {
        self.horizontal_leg_length
    }

    pub fn vertical_leg_length(&self) -> f32 {
        self.vertical_leg_length
    }

    pub fn leg_pitch(&self) -> f32 {
        self.leg_pitch
    }

    pub fn node_gap(&self) -> f32 {
        self.node_gap
    }

    pub fn spacing(&self) -> SpacingPolicy {
        self.spacing
    }

    /// Leg length for legs on `side`.
    pub fn leg_length(&self, side: Side) -> f32 {
        if side.is_vertical_leg() {
            self.vertical_leg_length
        } else {
            self.horizontal_leg_length
        }
    }

    pub fn set_tensor_width(&mut self, value: f32) -> &mut Self {
        self.tensor_width = value;
        self
    }

    pub fn set_tensor_height(&mut self, value: f32) -> &mut Self {
        self.tensor_height = value;
        self
    }

    pub fn set_horizontal_leg_length(&mut self, value: f32) -> &mut Self {
        self.horizontal_leg_length = value;
        self
    }

    pub fn set_vertical_leg_length(&mut self, value: f32) -> &mut Self {
        self.vertical_leg_length = value;
        self
    }

    pub fn set_leg_pitch(&mut self, value: f32) -> &mut Self {
        self.leg_pitch = value;
        self
    }

    pub fn set_node_gap(&mut self, value: f32) -> &mut Self {
        self.node_gap = value;
        self
    }

    pub fn set_spacing(&mut self, spacing: SpacingPolicy) -> &mut Self {
        self.spacing = spacing;
        self
    }

    /// Returns a copy with every value present in `overrides` replaced.
    pub fn merged(&self, overrides: &DefaultsOverride) -> Self {
        Self {
            tensor_width: overrides.tensor_width.unwrap_or(self.tensor_width),
            tensor_height: overrides.tensor_height.unwrap_or(self.tensor_height),
            horizontal_leg_length: overrides
                .horizontal_leg_length
                .unwrap_or(self.horizontal_leg_length),
            vertical_leg_length: overrides
                .vertical_leg_length
                .unwrap_or(self.vertical_leg_length),
            leg_pitch: overrides.leg_pitch.unwrap_or(self.leg_pitch),
            node_gap: overrides.node_gap.unwrap_or(self.node_gap),
            spacing: overrides.spacing.unwrap_or(self.spacing),
        }
    }

    /// Checks that every default is a usable dimension.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] for a non-finite value, a
    /// non-positive tensor size or leg pitch, or a negative length or gap.
    pub fn validate(&self) -> Result<(), LayoutError> {
        const OWNER: &str = "defaults";
        check_positive(OWNER, "tensor_width", self.tensor_width)?;
        check_positive(OWNER, "tensor_height", self.tensor_height)?;
        check_positive(OWNER, "leg_pitch", self.leg_pitch)?;
        check_non_negative(OWNER, "horizontal_leg_length", self.horizontal_leg_length)?;
        check_non_negative(OWNER, "vertical_leg_length", self.vertical_leg_length)?;
        check_non_negative(OWNER, "node_gap", self.node_gap)?;
        check_spacing(OWNER, self.spacing)
    }
}

/// A partial set of [`Defaults`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsOverride {
    pub tensor_width: Option<f32>,
    pub tensor_height: Option<f32>,
    pub horizontal_leg_length: Option<f32>,
    pub vertical_leg_length: Option<f32>,
    pub leg_pitch: Option<f32>,
    pub node_gap: Option<f32>,
    pub spacing: Option<SpacingPolicy>,
}

/// SVG output options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Pixels per diagram unit
    scale: f32,
    /// Blank margin around the diagram, in diagram units
    padding: f32,
    /// Stroke width in pixels
    stroke_width: f32,
    /// Draw anchors as visible dots instead of invisible markers
    show_anchors: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            scale: 40.0,
            padding: 0.5,
            stroke_width: 1.5,
            show_anchors: false,
        }
    }
}

impl StyleConfig {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn show_anchors(&self) -> bool {
        self.show_anchors
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_show_anchors(mut self, show_anchors: bool) -> Self {
        self.show_anchors = show_anchors;
        self
    }
}

pub(crate) fn check_positive(
    owner: &str,
    what: &'static str,
    value: f32,
) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid_dimension(owner, what, value))
    }
}

pub(crate) fn check_non_negative(
    owner: &str,
    what: &'static str,
    value: f32,
) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid_dimension(owner, what, value))
    }
}

pub(crate) fn check_spacing(owner: &str, spacing: SpacingPolicy) -> Result<(), LayoutError> {
    match spacing {
        SpacingPolicy::Even => Ok(()),
        SpacingPolicy::Fixed { pitch } => check_non_negative(owner, "spacing pitch", pitch),
    }
}
