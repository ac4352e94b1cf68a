//! Transformation Resolver - Variant Kind to CDN Parameters
//!
//! Pure derivation from a requested variant kind to the transformation the
//! image CDN applies at render time. Unknown kinds degrade to the square
//! definition with a logged warning; a bad catalog row must never block
//! image display, only its crop choice.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::variants::{VariantCatalog, VariantDefinition, VariantKind, VariantTag};

/// How the CDN fits the source image into the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    /// Cut the target rectangle out of the source at full resolution.
    Extract,
    PadResize,
    Force,
    AtMax,
    AtLeast,
}

/// Focus point for the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    Auto,
}

/// Parameter set sent to the image CDN to produce one crop/size on the fly.
///
/// Width and height are strings because the CDN query protocol is
/// string-typed throughout. Never persisted; recomputed per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationDescriptor {
    pub width: String,
    pub height: String,
    pub crop_mode: CropMode,
    pub focus: Focus,
}

impl TransformationDescriptor {
    /// Extract-at-center descriptor for a catalog definition.
    pub fn for_definition(definition: &VariantDefinition) -> Self {
        Self {
            width: definition.dimensions.width.to_string(),
            height: definition.dimensions.height.to_string(),
            crop_mode: CropMode::Extract,
            focus: Focus::Center,
        }
    }
}

/// Definition backing a wire tag, degrading legacy tags to square.
///
/// The degraded path is the resolver's single diagnostic: one warning per
/// call, carrying the raw tag.
pub fn resolved_definition<'a>(
    catalog: &'a VariantCatalog,
    tag: &VariantTag,
) -> &'a VariantDefinition {
    match tag.kind() {
        Some(kind) => catalog.definition(kind),
        None => {
            warn!(kind = %tag, "unknown variant kind, rendering square definition");
            catalog.definition(VariantKind::Square)
        }
    }
}

/// Transformation list for a requested kind; `None` means the default square
/// preview.
///
/// Single-entry today: the CDN accepts a chain but the page applies one step.
/// Pure in (kind, catalog).
pub fn resolve(catalog: &VariantCatalog, tag: Option<&VariantTag>) -> Vec<TransformationDescriptor> {
    let definition = match tag {
        Some(tag) => resolved_definition(catalog, tag),
        None => catalog.definition(VariantKind::Square),
    };
    vec![TransformationDescriptor::for_definition(definition)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_stringifies_dimensions() {
        let definition = VariantDefinition::new(VariantKind::Wide, "Widescreen (16:9)", 1920, 1080);
        let descriptor = TransformationDescriptor::for_definition(&definition);
        assert_eq!(descriptor.width, "1920");
        assert_eq!(descriptor.height, "1080");
        assert_eq!(descriptor.crop_mode, CropMode::Extract);
        assert_eq!(descriptor.focus, Focus::Center);
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let definition = VariantDefinition::new(VariantKind::Square, "Square (1:1)", 400, 400);
        let descriptor = TransformationDescriptor::for_definition(&definition);
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "width": "400",
                "height": "400",
                "cropMode": "extract",
                "focus": "center",
            })
        );
    }

    #[test]
    fn test_default_resolves_to_square() {
        let catalog = VariantCatalog::new();
        let transformation = resolve(&catalog, None);
        assert_eq!(transformation.len(), 1);
        assert_eq!(transformation[0].width, "1200");
        assert_eq!(transformation[0].height, "1200");
    }

    #[test]
    fn test_legacy_tag_resolves_square() {
        let catalog = VariantCatalog::new();
        let legacy = VariantTag::from_wire("HERO");
        assert_eq!(resolve(&catalog, Some(&legacy)), resolve(&catalog, None));
    }
}
