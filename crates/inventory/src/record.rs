use serde::{Deserialize, Serialize};

use sockwarehouse_core::{DomainError, DomainResult, StockId};

/// Lowercase a color for storage and lookup.
pub fn normalize_color(color: &str) -> String {
    color.to_lowercase()
}

/// One stock row: running quantity for a (color, cotton part) key.
///
/// `id` is `None` until the record has been saved once; stores assign it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: Option<StockId>,
    pub color: String,
    pub cotton_part: i32,
    pub quantity: u32,
}

impl StockRecord {
    /// Fresh, unsaved record with zero stock.
    pub fn empty(color: impl Into<String>, cotton_part: i32) -> Self {
        Self {
            id: None,
            color: color.into(),
            cotton_part,
            quantity: 0,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Add incoming stock.
    pub fn receive(&mut self, quantity: u32) -> DomainResult<()> {
        self.quantity = self.quantity.checked_add(quantity).ok_or_else(|| {
            DomainError::invalid_input(format!(
                "quantity overflow: stock={}, income={}",
                self.quantity, quantity
            ))
        })?;
        Ok(())
    }

    /// Remove outgoing stock; the quantity is left untouched on failure.
    pub fn release(&mut self, quantity: u32) -> DomainResult<()> {
        if self.quantity < quantity {
            return Err(DomainError::insufficient_stock(self.quantity, quantity));
        }
        self.quantity -= quantity;
        Ok(())
    }

    /// Overwrite every mutable field with the delta's values, verbatim.
    pub fn overwrite(&mut self, delta: &StockDelta) {
        self.color = delta.color.clone();
        self.cotton_part = delta.cotton_part;
        self.quantity = delta.quantity;
    }
}

/// Requested change for one (color, cotton part) key. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDelta {
    pub color: String,
    pub cotton_part: i32,
    pub quantity: u32,
}

impl StockDelta {
    pub fn new(color: impl Into<String>, cotton_part: i32, quantity: u32) -> Self {
        Self {
            color: color.into(),
            cotton_part,
            quantity,
        }
    }

    /// Same delta with its color lowercased.
    pub fn normalized(&self) -> Self {
        Self {
            color: normalize_color(&self.color),
            cotton_part: self.cotton_part,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_record_has_no_id_and_no_stock() {
        let record = StockRecord::empty("red", 50);
        assert!(!record.is_persisted());
        assert_eq!(record.quantity, 0);
    }

    #[test]
    fn release_guards_against_negative_stock() {
        let mut record = StockRecord::empty("red", 50);
        record.receive(100).unwrap();

        let err = record.release(150).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(100, 150));
        assert_eq!(record.quantity, 100);

        record.release(100).unwrap();
        assert_eq!(record.quantity, 0);
    }

    #[test]
    fn receive_rejects_overflow() {
        let mut record = StockRecord::empty("red", 50);
        record.receive(u32::MAX).unwrap();
        let err = record.receive(1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(record.quantity, u32::MAX);
    }

    #[test]
    fn overwrite_keeps_id_and_takes_delta_verbatim() {
        let id = StockId::new();
        let mut record = StockRecord {
            id: Some(id),
            color: "red".to_string(),
            cotton_part: 50,
            quantity: 100,
        };

        record.overwrite(&StockDelta::new("Blue", 70, 150));

        assert_eq!(record.id, Some(id));
        assert_eq!(record.color, "Blue");
        assert_eq!(record.cotton_part, 70);
        assert_eq!(record.quantity, 150);
    }

    #[test]
    fn normalized_lowercases_only_the_color() {
        let delta = StockDelta::new("ReD", 50, 10).normalized();
        assert_eq!(delta, StockDelta::new("red", 50, 10));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        /// Property: successive receipts accumulate.
        #[test]
        fn receipts_accumulate(q1 in 0u32..1_000_000, q2 in 0u32..1_000_000) {
            let mut record = StockRecord::empty("red", 50);
            record.receive(q1).unwrap();
            record.receive(q2).unwrap();
            prop_assert_eq!(record.quantity, q1 + q2);
        }

        /// Property: a release either succeeds exactly or changes nothing.
        #[test]
        fn release_is_all_or_nothing(stock in 0u32..10_000, take in 0u32..20_000) {
            let mut record = StockRecord::empty("blue", 40);
            record.receive(stock).unwrap();

            match record.release(take) {
                Ok(()) => prop_assert_eq!(record.quantity, stock - take),
                Err(_) => {
                    prop_assert!(take > stock);
                    prop_assert_eq!(record.quantity, stock);
                }
            }
        }
    }
}
