//! Product Detail View-Model - Fetch, Select, Purchase
//!
//! One instance per product page view; nothing is shared between views. The
//! machine is event-driven: mount issues a fetch ticket, the ticket's
//! completion transitions the state, selection re-derives the preview, and
//! purchase emits a toast and nothing else. Completions for superseded
//! tickets are discarded, so a response for one product can never paint
//! another's page.

use std::sync::Arc;

use tracing::debug;

use crate::client::{FetchError, ProductSource};
use crate::notify::{NotificationRelay, Severity};
use crate::products::{Product, ProductVariant};
use crate::transform::{resolve, resolved_definition, TransformationDescriptor};
use crate::variants::VariantCatalog;

/// Preview box ratio before any selection is made (square preview).
const DEFAULT_ASPECT_RATIO: &str = "1 / 1";

/// Page state as one tagged value; loading/error/product flags cannot
/// disagree.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Error(String),
    Loaded(Product),
}

/// Token tying one issued fetch to the mount that requested it.
///
/// A completion is applied only while its ticket is current; any re-mount or
/// unmount invalidates every ticket issued before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    product_id: String,
}

impl FetchTicket {
    /// Product the fetch should retrieve.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}

/// State machine behind the product detail page.
pub struct ProductDetailViewModel {
    catalog: Arc<VariantCatalog>,
    relay: Arc<dyn NotificationRelay>,
    state: DetailState,
    selected: Option<usize>,
    seq: u64,
    in_flight: Option<String>,
}

impl ProductDetailViewModel {
    pub fn new(catalog: Arc<VariantCatalog>, relay: Arc<dyn NotificationRelay>) -> Self {
        Self {
            catalog,
            relay,
            state: DetailState::Loading,
            selected: None,
            seq: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Enter the page for `product_id`, returning the fetch to run.
    ///
    /// A missing id is an immediate error and issues nothing. Re-mounting
    /// the id already in flight issues nothing either (one fetch at a time
    /// per id); a different id supersedes the outstanding ticket.
    pub fn mount(&mut self, product_id: Option<&str>) -> Option<FetchTicket> {
        let Some(id) = product_id else {
            self.seq += 1;
            self.in_flight = None;
            self.selected = None;
            self.state = DetailState::Error("Product ID is missing".to_string());
            return None;
        };

        if self.in_flight.as_deref() == Some(id) {
            return None;
        }

        self.seq += 1;
        self.in_flight = Some(id.to_string());
        self.selected = None;
        self.state = DetailState::Loading;
        Some(FetchTicket {
            seq: self.seq,
            product_id: id.to_string(),
        })
    }

    /// Leave the page. Outstanding fetches resolve into the void.
    pub fn unmount(&mut self) {
        self.seq += 1;
        self.in_flight = None;
        self.selected = None;
        self.state = DetailState::Loading;
    }

    /// Deliver a fetch result. Stale tickets are discarded untouched.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Product, FetchError>) {
        if ticket.seq != self.seq {
            debug!(product_id = %ticket.product_id, "discarding stale product fetch");
            return;
        }
        self.in_flight = None;
        match result {
            Ok(product) => {
                self.selected = None;
                self.state = DetailState::Loaded(product);
            }
            Err(err) => {
                tracing::error!(error = %err, product_id = %ticket.product_id, "product fetch failed");
                self.state = DetailState::Error(err.user_message());
            }
        }
    }

    /// Select a variant card. Valid only once loaded; out-of-range picks are
    /// ignored. The latest selection wins outright.
    pub fn select_variant(&mut self, index: usize) -> bool {
        match &self.state {
            DetailState::Loaded(product) if index < product.variants.len() => {
                self.selected = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Currently selected variant, if any.
    pub fn selected_variant(&self) -> Option<&ProductVariant> {
        match (&self.state, self.selected) {
            (DetailState::Loaded(product), Some(index)) => product.variants.get(index),
            _ => None,
        }
    }

    /// CSS ratio for the preview box: "1 / 1" until a selection is made.
    pub fn aspect_ratio(&self) -> String {
        match self.selected_variant() {
            Some(variant) => resolved_definition(&self.catalog, &variant.kind)
                .dimensions
                .aspect_ratio(),
            None => DEFAULT_ASPECT_RATIO.to_string(),
        }
    }

    /// CDN transformation for the current selection (square when none).
    pub fn transformation(&self) -> Vec<TransformationDescriptor> {
        resolve(&self.catalog, self.selected_variant().map(|v| &v.kind))
    }

    /// Dimension line under the preview, present once a variant is chosen.
    pub fn preview_dimensions(&self) -> Option<String> {
        self.selected_variant().map(|variant| {
            resolved_definition(&self.catalog, &variant.kind)
                .dimensions
                .to_string()
        })
    }

    /// Buy Now stub: raises the processing toast and nothing else.
    ///
    /// No order, payment, or inventory side effect; state is untouched.
    pub fn purchase(&self, index: usize) -> bool {
        let DetailState::Loaded(product) = &self.state else {
            return false;
        };
        let Some(variant) = product.variants.get(index) else {
            return false;
        };
        self.relay.notify(
            &format!("Processing purchase for {} version", variant.kind),
            Severity::Info,
        );
        true
    }

    /// Mount and run the single fetch attempt against `source`.
    pub async fn load(&mut self, source: &(impl ProductSource + ?Sized), product_id: Option<&str>) {
        if let Some(ticket) = self.mount(product_id) {
            let result = source.fetch_product(ticket.product_id()).await;
            self.complete_fetch(ticket, result);
        }
    }
}
