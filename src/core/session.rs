//! Per-user session state and the manager that keeps sessions apart.
//!
//! A [`Session`] owns one cart and one ledger. All state transitions are
//! explicit methods; `checkout` is the only one that touches both.
//!
//! [`SessionManager`] maps [`SessionId`]s to sessions. Each session sits
//! behind its own mutex, so concurrent hosts never share cart or ledger
//! state and only contend on the map when opening or closing sessions.

use crate::core::cart::Cart;
use crate::core::ledger::{generate_reference, Ledger, DEFAULT_REFERENCE_PREFIX};
use crate::core::marketplace::Marketplace;
use crate::core::tax::TaxPolicy;
use crate::domain::model::{
    ArtItem, CartEntry, LedgerRecord, LedgerStatus, PaymentDetails, SessionId,
};
use crate::utils::error::{RenaissanceError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// How a cart is turned into a ledger record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPolicy {
    pub tax: TaxPolicy,
    pub reference_prefix: String,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            tax: TaxPolicy::default(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
        }
    }
}

/// One shopper's cart and settled transactions.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    cart: Cart,
    ledger: Ledger,
    closed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            cart: Cart::new(),
            ledger: Ledger::new(),
            closed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Set once the manager has released the session; it accepts no further operations.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn add_to_cart(&mut self, item: Arc<ArtItem>) -> usize {
        tracing::debug!(session = %self.id, item = item.id, "add to cart");
        self.cart.add(item)
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Result<CartEntry> {
        self.cart.remove(index).inspect_err(|e| {
            tracing::warn!(session = %self.id, index, error = %e, "remove from cart rejected");
        })
    }

    pub fn checkout(
        &mut self,
        payment: &PaymentDetails,
        policy: &SettlementPolicy,
    ) -> Result<LedgerRecord> {
        self.checkout_at(payment, policy, Utc::now())
    }

    /// Settles the cart into one ledger record and empties the cart.
    /// On error neither the cart nor the ledger change.
    pub fn checkout_at(
        &mut self,
        payment: &PaymentDetails,
        policy: &SettlementPolicy,
        now: DateTime<Utc>,
    ) -> Result<LedgerRecord> {
        if payment.account.trim().is_empty() {
            return Err(RenaissanceError::MissingPaymentDetails {
                method: payment.method.to_string(),
            });
        }
        if self.cart.is_empty() {
            return Err(RenaissanceError::EmptyCart);
        }

        let items_total = self.cart.items_total()?;
        let breakdown = policy.tax.apply(items_total)?;
        let record = LedgerRecord {
            reference: generate_reference(&policy.reference_prefix, now),
            settled_at: now,
            item_count: self.cart.len(),
            items_total,
            subtotal: breakdown.subtotal,
            tax: breakdown.tax,
            gross_total: breakdown.total,
            tax_rate: policy.tax.rate(),
            payment_method: payment.method,
            status: LedgerStatus::Settled,
        };

        self.ledger.append(record.clone());
        self.cart.clear();

        tracing::info!(
            session = %self.id,
            reference = %record.reference,
            items = record.item_count,
            total = %record.gross_total,
            method = %record.payment_method,
            "checkout settled"
        );
        Ok(record)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SessionManager {
    marketplace: Arc<Marketplace>,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionManager {
    pub fn new(marketplace: Arc<Marketplace>) -> Self {
        Self {
            marketplace,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn marketplace(&self) -> &Marketplace {
        &self.marketplace
    }

    pub async fn open_session(&self) -> SessionId {
        let session = Session::new();
        let id = session.id();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(session = %id, "session opened");
        id
    }

    /// Removes the session and hands back its final state.
    pub async fn close_session(&self, id: SessionId) -> Result<Session> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| RenaissanceError::SessionNotFound { id: id.to_string() })?;
        let session = {
            let mut guard = handle.lock().await;
            guard.closed = true;
            guard.clone()
        };
        tracing::info!(session = %id, settled = session.ledger().len(), "session closed");
        Ok(session)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn session(&self, id: SessionId) -> Result<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RenaissanceError::SessionNotFound { id: id.to_string() })
    }

    /// Locks `handle`; a session closed after the handle was fetched counts as gone.
    async fn lock_open(handle: Arc<Mutex<Session>>) -> Result<OwnedMutexGuard<Session>> {
        let guard = handle.lock_owned().await;
        if guard.is_closed() {
            return Err(RenaissanceError::SessionNotFound {
                id: guard.id().to_string(),
            });
        }
        Ok(guard)
    }

    async fn open_guard(&self, id: SessionId) -> Result<OwnedMutexGuard<Session>> {
        let handle = self.session(id).await?;
        Self::lock_open(handle).await
    }

    pub async fn add_to_cart(&self, id: SessionId, item_id: u32) -> Result<usize> {
        let item = self.marketplace.catalog().require(item_id)?;
        let mut guard = self.open_guard(id).await?;
        Ok(guard.add_to_cart(item))
    }

    pub async fn remove_from_cart(&self, id: SessionId, index: usize) -> Result<CartEntry> {
        let mut guard = self.open_guard(id).await?;
        guard.remove_from_cart(index)
    }

    pub async fn cart(&self, id: SessionId) -> Result<Vec<CartEntry>> {
        let guard = self.open_guard(id).await?;
        Ok(guard.cart().entries().to_vec())
    }

    pub async fn checkout(&self, id: SessionId, payment: &PaymentDetails) -> Result<LedgerRecord> {
        let mut guard = self.open_guard(id).await?;
        guard.checkout(payment, self.marketplace.settlement())
    }

    pub async fn ledger(&self, id: SessionId) -> Result<Vec<LedgerRecord>> {
        let guard = self.open_guard(id).await?;
        Ok(guard.ledger().records().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::domain::model::PaymentMethod;
    use rust_decimal::Decimal;

    fn card() -> PaymentDetails {
        PaymentDetails::new(PaymentMethod::CreditCard, "4111 1111 1111 1111")
    }

    fn session_with(ids: &[u32]) -> Session {
        let catalog = Catalog::default();
        let mut session = Session::new();
        for id in ids {
            session.add_to_cart(catalog.require(*id).unwrap());
        }
        session
    }

    #[test]
    fn test_checkout_clears_cart_and_appends_one_record() {
        let mut session = session_with(&[1, 2, 3]);
        let record = session.checkout(&card(), &SettlementPolicy::default()).unwrap();

        assert!(session.cart().is_empty());
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(record.items_total, Decimal::from(12700));
        assert_eq!(record.subtotal, Decimal::from(12700));
        assert_eq!(record.tax, Decimal::from(1016));
        assert_eq!(record.gross_total, Decimal::from(13716));
        assert_eq!(record.item_count, 3);
        assert_eq!(record.status, LedgerStatus::Settled);
        assert!(record.reference.starts_with("TX-"));
    }

    #[test]
    fn test_checkout_empty_cart_is_precondition_error() {
        let mut session = Session::new();
        let err = session.checkout(&card(), &SettlementPolicy::default()).unwrap_err();
        assert!(matches!(err, RenaissanceError::EmptyCart));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_checkout_without_payment_details_keeps_cart() {
        let mut session = session_with(&[4]);
        let payment = PaymentDetails::new(PaymentMethod::Crypto, "   ");
        let err = session.checkout(&payment, &SettlementPolicy::default()).unwrap_err();
        assert!(matches!(err, RenaissanceError::MissingPaymentDetails { .. }));
        assert_eq!(session.cart().len(), 1);
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_checkout_overflow_leaves_session_untouched() {
        let mut huge = (*Catalog::default().require(2).unwrap()).clone();
        huge.price = Decimal::MAX - Decimal::ONE;
        let huge = Arc::new(huge);

        let mut single = Session::new();
        single.add_to_cart(huge.clone());
        let err = single.checkout(&card(), &SettlementPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            RenaissanceError::AmountOverflow { operation: "order total" }
        ));
        assert_eq!(single.cart().len(), 1);
        assert!(single.ledger().is_empty());

        let mut pair = Session::new();
        pair.add_to_cart(huge.clone());
        pair.add_to_cart(huge);
        let err = pair.checkout(&card(), &SettlementPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            RenaissanceError::AmountOverflow { operation: "cart total" }
        ));
        assert_eq!(pair.cart().len(), 2);
        assert!(pair.ledger().is_empty());
    }

    /// A caller that fetched the handle just before the session was closed
    /// must not settle into the detached session.
    #[tokio::test]
    async fn test_checkout_racing_close_is_rejected() {
        let manager = SessionManager::new(Arc::new(Marketplace::default()));
        let id = manager.open_session().await;
        manager.add_to_cart(id, 1).await.unwrap();

        let stale_handle = manager.session(id).await.unwrap();
        let closed = manager.close_session(id).await.unwrap();
        assert!(closed.is_closed());
        assert!(closed.ledger().is_empty());

        let err = SessionManager::lock_open(stale_handle.clone()).await.unwrap_err();
        assert!(matches!(err, RenaissanceError::SessionNotFound { .. }));

        let orphan = stale_handle.lock().await;
        assert_eq!(orphan.cart().len(), 1);
        assert!(orphan.ledger().is_empty());
    }

    #[test]
    fn test_checkout_uses_given_timestamp() {
        let mut session = session_with(&[5]);
        let now = DateTime::parse_from_rfc3339("2025-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = session
            .checkout_at(&card(), &SettlementPolicy::default(), now)
            .unwrap();
        assert_eq!(record.settled_at, now);
        assert!(record.reference.starts_with("TX-20250102030405-"));
    }
}
