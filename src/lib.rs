//! ForgeStore Core - Licensed Image Storefront Engine
//!
//! # The Six Laws (Non-Negotiable)
//! 1. Variant Kinds Are Closed
//! 2. The Catalog Is Total
//! 3. Bad Data Degrades The Crop, Never The Page
//! 4. Each View Owns Its State
//! 5. Stale Responses Are Discarded
//! 6. Purchases Are Notifications, Not Orders

pub mod variants;
pub mod transform;
pub mod products;
pub mod client;
pub mod detail;
pub mod gallery;
pub mod notify;
pub mod mail;

pub use variants::{License, VariantCatalog, VariantDefinition, VariantKind, VariantTag};
pub use transform::{resolve, resolved_definition, CropMode, Focus, TransformationDescriptor};
pub use products::{Product, ProductId, ProductVariant};
pub use client::{FetchError, HttpCatalogClient, ProductSource};
pub use detail::{DetailState, FetchTicket, ProductDetailViewModel};
pub use gallery::{GalleryTicket, ProductGallery};
pub use notify::{MemoryRelay, Notification, NotificationRelay, Severity, TracingRelay};
pub use mail::{handle_send_email, EmailRequest, HttpMailTransport, MailerConfig, MailTransport, RelayResponse};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
