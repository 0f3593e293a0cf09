//! Inventory Reconciler

use sqlx::{Postgres, Transaction};
use storefront::stock::{StockDemand, StockLevel, check_availability};
use uuid::Uuid;

use crate::domain::inventory::{
    errors::InventoryError, records::StockRecord, repository::PgInventoryRepository,
};

#[derive(Debug, Clone, Default)]
pub struct PgInventoryReconciler {
    repository: PgInventoryRepository,
}

impl PgInventoryReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: PgInventoryRepository::new(),
        }
    }

    /// Lock the demanded products and check each has enough stock.
    ///
    /// The row locks are held until `tx` ends, so the stock read here cannot
    /// change before [`Self::apply_deltas`] runs in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Stock`] naming the first missing or
    /// under-stocked product.
    pub async fn verify_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        demand: &[StockDemand],
    ) -> Result<Vec<StockRecord>, InventoryError> {
        let products: Vec<Uuid> = demand.iter().map(|wanted| wanted.product).collect();

        let records = self.repository.lock_products(tx, &products).await?;

        let levels: Vec<StockLevel<'_>> = records.iter().map(StockRecord::level).collect();

        check_availability(demand, &levels)?;

        Ok(records)
    }

    /// Apply every stock/sold delta in one conditional batch update.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Reconciliation`] when any product lacked
    /// the stock to cover its delta. The caller must abort the transaction.
    pub async fn apply_deltas(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        demand: &[StockDemand],
    ) -> Result<(), InventoryError> {
        let applied = self.repository.apply_deltas(tx, demand).await?;

        if applied.len() != demand.len() {
            return Err(InventoryError::Reconciliation {
                expected: demand.len(),
                applied: applied.len(),
            });
        }

        Ok(())
    }
}
