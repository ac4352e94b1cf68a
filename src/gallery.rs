//! Product Gallery - Browse Page List
//!
//! The storefront's landing view. The list stays empty until a fetch lands;
//! a failed fetch is logged and leaves the previous list in place, which on
//! first load means an empty gallery rather than an error page.

use tracing::warn;

use crate::client::{FetchError, ProductSource};
use crate::products::Product;

/// Token tying one issued list fetch to the mount that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryTicket {
    seq: u64,
}

/// State behind the gallery page. One instance per view.
#[derive(Debug, Default)]
pub struct ProductGallery {
    products: Vec<Product>,
    seq: u64,
}

impl ProductGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the page, superseding any outstanding list fetch.
    pub fn mount(&mut self) -> GalleryTicket {
        self.seq += 1;
        GalleryTicket { seq: self.seq }
    }

    /// Leave the page. Outstanding fetches resolve into the void.
    pub fn unmount(&mut self) {
        self.seq += 1;
    }

    /// Deliver a list fetch result. Stale tickets are discarded untouched.
    pub fn complete_fetch(&mut self, ticket: GalleryTicket, result: Result<Vec<Product>, FetchError>) {
        if ticket.seq != self.seq {
            return;
        }
        match result {
            Ok(products) => self.products = products,
            Err(err) => warn!(error = %err, "product list fetch failed"),
        }
    }

    /// Products in stored order; empty until a fetch lands.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Mount and run one list fetch against `source`.
    pub async fn load(&mut self, source: &(impl ProductSource + ?Sized)) {
        let ticket = self.mount();
        let result = source.list_products().await;
        self.complete_fetch(ticket, result);
    }
}
