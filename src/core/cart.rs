use crate::domain::model::{ArtItem, CartEntry};
use crate::utils::error::{RenaissanceError, Result};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Ordered cart; the same artwork may appear more than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unconditionally and returns the new length.
    pub fn add(&mut self, item: Arc<ArtItem>) -> usize {
        self.entries.push(CartEntry::new(item));
        self.entries.len()
    }

    /// # Errors
    ///
    /// - [`RenaissanceError::EmptyCart`] if there is nothing to remove
    /// - [`RenaissanceError::CartIndexOutOfRange`] if `index >= len`
    pub fn remove(&mut self, index: usize) -> Result<CartEntry> {
        if self.entries.is_empty() {
            return Err(RenaissanceError::EmptyCart);
        }
        if index >= self.entries.len() {
            return Err(RenaissanceError::CartIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the entry prices.
    ///
    /// # Errors
    ///
    /// [`RenaissanceError::AmountOverflow`] if the sum does not fit a `Decimal`.
    pub fn items_total(&self) -> Result<Decimal> {
        self.entries
            .iter()
            .map(CartEntry::price)
            .try_fold(Decimal::ZERO, |acc, price| acc.checked_add(price))
            .ok_or(RenaissanceError::AmountOverflow {
                operation: "cart total",
            })
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn test_duplicates_allowed() {
        let catalog = Catalog::default();
        let item = catalog.require(1).unwrap();
        let mut cart = Cart::new();
        cart.add(item.clone());
        assert_eq!(cart.add(item), 2);
        assert_eq!(cart.items_total().unwrap(), Decimal::from(1100));
    }

    #[test]
    fn test_items_total_overflow_is_an_error() {
        let mut huge = (*Catalog::default().require(2).unwrap()).clone();
        huge.price = Decimal::MAX - Decimal::ONE;
        let huge = Arc::new(huge);

        let mut cart = Cart::new();
        cart.add(huge.clone());
        assert_eq!(cart.items_total().unwrap(), huge.price);

        cart.add(huge);
        assert!(matches!(
            cart.items_total(),
            Err(RenaissanceError::AmountOverflow { operation: "cart total" })
        ));
    }

    #[test]
    fn test_add_then_remove_restores_cart() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add(catalog.require(1).unwrap());
        cart.add(catalog.require(3).unwrap());
        let before = cart.clone();

        let len = cart.add(catalog.require(2).unwrap());
        let removed = cart.remove(len - 1).unwrap();

        assert_eq!(removed.item.id, 2);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_from_empty_cart() {
        let mut cart = Cart::new();
        assert!(matches!(cart.remove(0), Err(RenaissanceError::EmptyCart)));
    }

    #[test]
    fn test_remove_out_of_range_leaves_cart_intact() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add(catalog.require(5).unwrap());
        assert!(matches!(
            cart.remove(1),
            Err(RenaissanceError::CartIndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        for id in [1, 2, 3] {
            cart.add(catalog.require(id).unwrap());
        }
        cart.remove(1).unwrap();
        let ids: Vec<u32> = cart.entries().iter().map(|e| e.item.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
