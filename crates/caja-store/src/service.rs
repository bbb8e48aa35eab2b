//! # PosService
//!
//! The operation surface the view layer calls. One instance per process,
//! owning the [`State`], the [`CompanyProfile`] and the persistence
//! gateway.
//!
//! ## Command Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       PosService Operations                         │
//! │                                                                     │
//! │  View Action              Operation              Persists?          │
//! │  ───────────              ─────────              ─────────          │
//! │  Save product form ─────► create/update_product      yes            │
//! │  Delete confirm ────────► delete_product             yes            │
//! │  Pick suggestion ───────► add_to_cart                yes            │
//! │  Scan barcode ──────────► add_by_code                yes            │
//! │  Remove cart row ───────► remove_cart_line           yes            │
//! │  Complete sale ─────────► complete_sale              yes            │
//! │  Type in search box ────► search                     no             │
//! │  Open dashboard ────────► stats / top_seller / ...   no             │
//! │  Backup / restore ──────► export_json / import_json  import: yes    │
//! │  Factory reset ─────────► reset                      yes            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Discipline
//! Every mutating operation saves the full state before returning. If the
//! save fails the in-memory mutation is kept and the error surfaced: the
//! caller learns the data may not survive a restart, but the running
//! session stays consistent. There is no rollback.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use caja_core::dashboard::{self, DashboardStats, TopSeller};
use caja_core::{
    commit_sale, CompanyProfile, CoreError, Product, ProductDraft, Receipt, Sale, State,
    HISTORY_RECENT_SALES,
};

use crate::blob::BlobStore;
use crate::error::{ServiceError, StoreError};
use crate::gateway::StateGateway;

// =============================================================================
// Profile Update
// =============================================================================

/// Partial company-profile update from the settings form.
///
/// `None` or blank fields keep the previous value, so a half-filled form
/// never erases the business identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub nit: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub thank_you_message: Option<String>,
}

// =============================================================================
// PosService
// =============================================================================

/// The single state-owning service. All mutation flows through here.
#[derive(Debug)]
pub struct PosService<S: BlobStore> {
    state: State,
    profile: CompanyProfile,
    gateway: StateGateway<S>,
}

impl<S: BlobStore> PosService<S> {
    /// Opens the service over a blob store.
    ///
    /// Loads the persisted state, or initializes an empty one and persists
    /// it immediately. A missing profile falls back to the defaults
    /// without writing (the shop may never customize it).
    pub fn open(store: S) -> Result<Self, StoreError> {
        let mut gateway = StateGateway::new(store);

        let state = match gateway.load_state()? {
            Some(state) => state,
            None => {
                let empty = State::new();
                gateway.save_state(&empty)?;
                info!("No persisted state found, initialized empty");
                empty
            }
        };
        let profile = gateway.load_profile()?.unwrap_or_default();

        debug!(
            products = state.catalog.len(),
            sales = state.ledger.len(),
            "State loaded"
        );
        Ok(PosService {
            state,
            profile,
            gateway,
        })
    }

    /// Read-only view of the whole state, for rendering.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The current company profile.
    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    // -------------------------------------------------------------------------
    // Catalog operations
    // -------------------------------------------------------------------------

    /// Creates a product and persists.
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<Product, ServiceError> {
        debug!(code = %draft.code, "create_product");
        let product = self.state.catalog.create(draft)?;
        self.persist()?;
        info!(id = product.id, code = %product.code, "Product created");
        Ok(product)
    }

    /// Replaces a product's fields (id kept) and persists.
    pub fn update_product(
        &mut self,
        id: i64,
        draft: ProductDraft,
    ) -> Result<Product, ServiceError> {
        debug!(id, "update_product");
        let product = self.state.catalog.update(id, draft)?;
        self.persist()?;
        info!(id = product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product and persists. Returns whether anything was
    /// removed; deleting a missing id is a harmless no-op and skips the
    /// save.
    pub fn delete_product(&mut self, id: i64) -> Result<bool, ServiceError> {
        debug!(id, "delete_product");
        if !self.state.catalog.delete(id) {
            return Ok(false);
        }
        self.persist()?;
        info!(id, "Product deleted");
        Ok(true)
    }

    /// Filtered catalog search (see [`caja_core::Catalog::search`]).
    /// Read-only; nothing is persisted.
    pub fn search(&self, text: &str, material: Option<&str>) -> Vec<&Product> {
        self.state.catalog.search(text, material)
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Adds `qty` units of a product to the cart by id and persists.
    pub fn add_to_cart(&mut self, product_id: i64, qty: i64) -> Result<(), ServiceError> {
        debug!(product_id, qty, "add_to_cart");
        let product = self
            .state
            .catalog
            .find_by_id(product_id)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        self.state.cart.add(&product, qty)?;
        self.persist()?;
        info!(product_id, qty, "Added to cart");
        Ok(())
    }

    /// Barcode path: exact case-insensitive code lookup, then the normal
    /// cart-add. Unknown codes report ProductNotFound with the scanned
    /// code so the view can show it.
    pub fn add_by_code(&mut self, code: &str, qty: i64) -> Result<(), ServiceError> {
        debug!(code, qty, "add_by_code");
        let product = self
            .state
            .catalog
            .find_by_code(code)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))?;

        self.state.cart.add(&product, qty)?;
        self.persist()?;
        info!(product_id = product.id, qty, "Added to cart by code");
        Ok(())
    }

    /// Removes the cart line at `index` and persists. Out-of-range
    /// indices are ignored (stale row click after a re-render).
    pub fn remove_cart_line(&mut self, index: usize) -> Result<(), ServiceError> {
        debug!(index, "remove_cart_line");
        self.state.cart.remove(index);
        self.persist()?;
        Ok(())
    }

    /// Empties the cart without selling anything, and persists.
    pub fn clear_cart(&mut self) -> Result<(), ServiceError> {
        debug!("clear_cart");
        self.state.cart.clear();
        self.persist()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Sale commit
    // -------------------------------------------------------------------------

    /// Runs the full commit protocol: validate, snapshot, decrement
    /// stock, append to the ledger, clear the cart, persist, and return
    /// the sale for receipt rendering.
    ///
    /// An empty cart reports [`CoreError::EmptyCart`] — use
    /// [`ServiceError::is_empty_cart`] to render it as a hint, not an
    /// error.
    pub fn complete_sale(&mut self) -> Result<Sale, ServiceError> {
        debug!(lines = self.state.cart.len(), "complete_sale");
        let outcome = commit_sale(&mut self.state)?;

        for product_id in &outcome.missing_products {
            warn!(
                product_id,
                sale_id = outcome.sale.id,
                "Sold product no longer exists; stock not decremented"
            );
        }

        self.persist()?;
        info!(
            sale_id = outcome.sale.id,
            total = outcome.sale.total,
            items = outcome.sale.items.len(),
            "Sale completed"
        );
        Ok(outcome.sale)
    }

    /// Receipt data for a recorded sale, for re-display from the history.
    pub fn receipt(&self, sale_id: i64) -> Result<Receipt, ServiceError> {
        let sale = self
            .state
            .ledger
            .find_by_id(sale_id)
            .ok_or(CoreError::SaleNotFound(sale_id))?;
        Ok(Receipt::build(sale, &self.profile))
    }

    // -------------------------------------------------------------------------
    // Dashboard reads
    // -------------------------------------------------------------------------

    /// Headline numbers for today (UTC day bucket, matching the stored
    /// ISO timestamps).
    pub fn stats_today(&self) -> DashboardStats {
        dashboard::stats(&self.state, Utc::now().date_naive())
    }

    /// All-time best seller by units, if any sales exist.
    pub fn top_seller(&self) -> Option<TopSeller> {
        dashboard::top_seller_by_volume(&self.state)
    }

    /// The dashboard's recent-sales strip.
    pub fn recent_sales(&self) -> Vec<&Sale> {
        dashboard::recent_sales(&self.state)
    }

    /// The POS screen's sale-history panel (a little longer than the
    /// dashboard strip).
    pub fn sales_history(&self) -> Vec<&Sale> {
        self.state.ledger.recent(HISTORY_RECENT_SALES)
    }

    /// Most critical low-stock products for the alert panel.
    pub fn restock_alerts(&self) -> Vec<&Product> {
        dashboard::restock_alerts(&self.state)
    }

    // -------------------------------------------------------------------------
    // Profile
    // -------------------------------------------------------------------------

    /// Applies a partial profile update and persists it under its own
    /// key. Blank fields keep their previous value.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), ServiceError> {
        debug!("update_profile");
        apply_if_present(&mut self.profile.name, update.name);
        apply_if_present(&mut self.profile.nit, update.nit);
        apply_if_present(&mut self.profile.address, update.address);
        apply_if_present(&mut self.profile.phone, update.phone);
        apply_if_present(
            &mut self.profile.thank_you_message,
            update.thank_you_message,
        );

        self.gateway.save_profile(&self.profile)?;
        info!("Company profile saved");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Import / Export / Reset
    // -------------------------------------------------------------------------

    /// Serializes the full state as a pretty JSON backup document.
    pub fn export_json(&self) -> Result<String, ServiceError> {
        let doc = serde_json::to_string_pretty(&self.state).map_err(StoreError::Corrupt)?;
        Ok(doc)
    }

    /// Validates and imports a backup document, wholesale-replacing the
    /// state (no merge), then persists.
    ///
    /// The document must be a JSON object carrying `products` and `sales`
    /// arrays; anything else is [`StoreError::ImportStructure`] and the
    /// current state is left untouched.
    pub fn import_json(&mut self, raw: &str) -> Result<(), ServiceError> {
        debug!(bytes = raw.len(), "import_json");
        let doc: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| StoreError::ImportStructure {
                reason: format!("not valid JSON: {e}"),
            })?;

        for field in ["products", "sales"] {
            let present = doc.get(field).is_some_and(|v| v.is_array());
            if !present {
                return Err(StoreError::ImportStructure {
                    reason: format!("missing '{field}' array"),
                }
                .into());
            }
        }

        let imported: State =
            serde_json::from_value(doc).map_err(|e| StoreError::ImportStructure {
                reason: format!("malformed document: {e}"),
            })?;

        self.state = imported;
        self.persist()?;
        info!(
            products = self.state.catalog.len(),
            sales = self.state.ledger.len(),
            "Backup imported, state replaced"
        );
        Ok(())
    }

    /// Factory reset: wipes the store, reinstates an empty state and the
    /// default profile, and persists both.
    pub fn reset(&mut self) -> Result<(), ServiceError> {
        debug!("reset");
        self.gateway.clear()?;
        self.state = State::new();
        self.profile = CompanyProfile::default();
        self.gateway.save_state(&self.state)?;
        self.gateway.save_profile(&self.profile)?;
        info!("Factory reset complete");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Saves the state blob. Called after every mutation; a failure is
    /// surfaced to the caller while the in-memory effect stands.
    fn persist(&mut self) -> Result<(), ServiceError> {
        self.gateway.save_state(&self.state).map_err(|e| {
            warn!(error = %e, "State mutation could not be persisted");
            e.into()
        })
    }
}

/// Overwrites `slot` when the update carries a non-blank value.
fn apply_if_present(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        let v = v.trim();
        if !v.is_empty() {
            *slot = v.to_string();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
