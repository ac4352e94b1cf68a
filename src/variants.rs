//! Variant Catalog - Closed Set of Licensed Renditions
//!
//! Every purchasable rendition of a product image is one of a fixed set of
//! variant kinds. The catalog maps each kind to its display label and target
//! pixel dimensions, and the mapping is total: lookups cannot miss.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Closed set of variant kinds offered by the storefront.
///
/// Fixed at build time. Wire data carrying anything else stays representable
/// only as [`VariantTag::Legacy`] and never reaches a catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantKind {
    Square,
    Wide,
    Portrait,
}

impl VariantKind {
    /// Every kind, in display order.
    pub const ALL: [VariantKind; 3] = [
        VariantKind::Square,
        VariantKind::Wide,
        VariantKind::Portrait,
    ];

    /// Wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Square => "SQUARE",
            VariantKind::Wide => "WIDE",
            VariantKind::Portrait => "PORTRAIT",
        }
    }

    /// Parse a wire tag. Stored rows are upper-case but older writers were
    /// not consistent, so matching ignores case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SQUARE" => Some(VariantKind::Square),
            "WIDE" => Some(VariantKind::Wide),
            "PORTRAIT" => Some(VariantKind::Portrait),
            _ => None,
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant kind as it appears on the wire.
///
/// Catalog rows written by older builds may carry kinds this build no longer
/// knows. Those decode as `Legacy` so one bad row degrades its crop instead
/// of failing the whole product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantTag {
    Known(VariantKind),
    Legacy(String),
}

impl VariantTag {
    /// Classify a raw wire string.
    pub fn from_wire(raw: &str) -> Self {
        match VariantKind::parse(raw) {
            Some(kind) => VariantTag::Known(kind),
            None => VariantTag::Legacy(raw.to_string()),
        }
    }

    /// The recognized kind, if any.
    pub fn kind(&self) -> Option<VariantKind> {
        match self {
            VariantTag::Known(kind) => Some(*kind),
            VariantTag::Legacy(_) => None,
        }
    }

    /// Wire string for this tag. Legacy tags keep their original spelling.
    pub fn as_str(&self) -> &str {
        match self {
            VariantTag::Known(kind) => kind.as_str(),
            VariantTag::Legacy(raw) => raw,
        }
    }
}

impl From<VariantKind> for VariantTag {
    fn from(kind: VariantKind) -> Self {
        VariantTag::Known(kind)
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VariantTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VariantTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(VariantTag::from_wire(&raw))
    }
}

/// License tier attached to one purchasable rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
    Personal,
    Commercial,
}

impl License {
    pub fn as_str(&self) -> &'static str {
        match self {
            License::Personal => "personal",
            License::Commercial => "commercial",
        }
    }

    /// Card copy, e.g. "Personal".
    pub fn label(&self) -> &'static str {
        match self {
            License::Personal => "Personal",
            License::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target pixel dimensions for a rendered variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// CSS-style ratio string, e.g. "1920 / 1080".
    pub fn aspect_ratio(&self) -> String {
        format!("{} / {}", self.width, self.height)
    }
}

impl fmt::Display for Dimensions {
    // Card copy format: "1200 x 1200px"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}px", self.width, self.height)
    }
}

/// One catalog entry: how a variant kind is labeled and rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDefinition {
    pub kind: VariantKind,
    pub label: String,
    pub dimensions: Dimensions,
}

impl VariantDefinition {
    pub fn new(kind: VariantKind, label: &str, width: u32, height: u32) -> Self {
        Self {
            kind,
            label: label.to_string(),
            dimensions: Dimensions::new(width, height),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("variant {kind} dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        kind: VariantKind,
        width: u32,
        height: u32,
    },
}

/// Total mapping from variant kind to definition.
///
/// Backed by a kind-indexed array, so "every kind has exactly one definition"
/// holds by construction and lookups need no `Option`.
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    // Index = VariantKind declaration order.
    definitions: [VariantDefinition; 3],
}

impl VariantCatalog {
    /// The production catalog.
    pub fn new() -> Self {
        Self {
            definitions: [
                VariantDefinition::new(VariantKind::Square, "Square (1:1)", 1200, 1200),
                VariantDefinition::new(VariantKind::Wide, "Widescreen (16:9)", 1920, 1080),
                VariantDefinition::new(VariantKind::Portrait, "Portrait (3:4)", 1080, 1440),
            ],
        }
    }

    /// Replace one definition, keeping the mapping total.
    ///
    /// A zero dimension is a startup configuration fault, not a render-time
    /// branch, so it fails here.
    pub fn with_definition(mut self, definition: VariantDefinition) -> Result<Self, CatalogError> {
        if definition.dimensions.width == 0 || definition.dimensions.height == 0 {
            return Err(CatalogError::InvalidDimensions {
                kind: definition.kind,
                width: definition.dimensions.width,
                height: definition.dimensions.height,
            });
        }
        let index = definition.kind as usize;
        self.definitions[index] = definition;
        Ok(self)
    }

    /// Definition for a kind. Total over the closed set.
    pub fn definition(&self, kind: VariantKind) -> &VariantDefinition {
        &self.definitions[kind as usize]
    }

    /// All definitions, in display order.
    pub fn definitions(&self) -> &[VariantDefinition] {
        &self.definitions
    }
}

impl Default for VariantCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_ignores_case() {
        assert_eq!(VariantKind::parse("wide"), Some(VariantKind::Wide));
        assert_eq!(VariantKind::parse("Square"), Some(VariantKind::Square));
        assert_eq!(VariantKind::parse("PORTRAIT"), Some(VariantKind::Portrait));
        assert_eq!(VariantKind::parse("banner"), None);
    }

    #[test]
    fn test_tag_decodes_unknown_as_legacy() {
        let known: VariantTag = serde_json::from_str(r#""wide""#).unwrap();
        assert_eq!(known, VariantTag::Known(VariantKind::Wide));

        let legacy: VariantTag = serde_json::from_str(r#""BANNER""#).unwrap();
        assert_eq!(legacy, VariantTag::Legacy("BANNER".to_string()));
        assert_eq!(legacy.as_str(), "BANNER");
    }

    #[test]
    fn test_tag_serializes_canonical_or_verbatim() {
        let known = VariantTag::Known(VariantKind::Square);
        assert_eq!(serde_json::to_string(&known).unwrap(), r#""SQUARE""#);

        let legacy = VariantTag::Legacy("hero-wide".to_string());
        assert_eq!(serde_json::to_string(&legacy).unwrap(), r#""hero-wide""#);
    }

    #[test]
    fn test_license_wire_format() {
        assert_eq!(
            serde_json::from_str::<License>(r#""personal""#).unwrap(),
            License::Personal
        );
        assert_eq!(
            serde_json::to_string(&License::Commercial).unwrap(),
            r#""commercial""#
        );
        assert_eq!(License::Personal.label(), "Personal");
    }

    #[test]
    fn test_catalog_is_total() {
        let catalog = VariantCatalog::new();
        for kind in VariantKind::ALL {
            assert_eq!(catalog.definition(kind).kind, kind);
        }
        assert_eq!(catalog.definitions().len(), VariantKind::ALL.len());
    }

    #[test]
    fn test_catalog_replaces_single_definition() {
        let catalog = VariantCatalog::new()
            .with_definition(VariantDefinition::new(VariantKind::Wide, "Wide", 800, 450))
            .unwrap();

        assert_eq!(
            catalog.definition(VariantKind::Wide).dimensions,
            Dimensions::new(800, 450)
        );
        // Other entries untouched
        assert_eq!(
            catalog.definition(VariantKind::Square).dimensions,
            Dimensions::new(1200, 1200)
        );
    }

    #[test]
    fn test_catalog_rejects_zero_dimensions() {
        let result = VariantCatalog::new()
            .with_definition(VariantDefinition::new(VariantKind::Square, "Square", 0, 400));
        assert!(result.is_err());
    }

    #[test]
    fn test_dimension_display_formats() {
        let dims = Dimensions::new(1920, 1080);
        assert_eq!(dims.aspect_ratio(), "1920 / 1080");
        assert_eq!(dims.to_string(), "1920 x 1080px");
    }
}
