use list_query::RegionParams;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{WarehouseError, WarehouseResult};
use crate::models::{InventoryItem, NewWarehouse, UpdateWarehouse, Warehouse};
use crate::repository::WarehouseRepository;

pub struct WarehouseService<R: WarehouseRepository> {
    repository: Arc<R>,
}

impl<R: WarehouseRepository> WarehouseService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_warehouses(&self) -> WarehouseResult<Vec<Warehouse>> {
        self.repository.list_warehouses().await
    }

    #[instrument(skip(self))]
    pub async fn get_warehouse(&self, id: i32) -> WarehouseResult<Warehouse> {
        self.repository
            .find_warehouse(id)
            .await?
            .ok_or(WarehouseError::WarehouseNotFound(id))
    }

    #[instrument(skip(self, input), fields(warehouse_name = %input.name))]
    pub async fn create_warehouse(&self, input: NewWarehouse) -> WarehouseResult<i32> {
        self.repository.insert_warehouse(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_warehouse(&self, id: i32, input: UpdateWarehouse) -> WarehouseResult<()> {
        if self.repository.update_warehouse(id, input).await? {
            Ok(())
        } else {
            Err(WarehouseError::WarehouseNotFound(id))
        }
    }

    /// Drops the warehouse's stock records, then soft-deletes it
    #[instrument(skip(self))]
    pub async fn delete_warehouse(&self, id: i32) -> WarehouseResult<()> {
        let removed = self
            .repository
            .deactivate_warehouse(id)
            .await?
            .ok_or(WarehouseError::WarehouseNotFound(id))?;
        tracing::info!(warehouse_id = id, inventory_rows = removed, "Warehouse deactivated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_inventory(&self, params: &RegionParams) -> WarehouseResult<Vec<InventoryItem>> {
        self.repository.list_inventory(params.region()).await
    }

    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: i32, quantity: i32) -> WarehouseResult<()> {
        if self.repository.update_stock(id, quantity).await? {
            Ok(())
        } else {
            Err(WarehouseError::InventoryNotFound(id))
        }
    }
}
