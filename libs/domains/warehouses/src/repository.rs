use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::WarehouseResult;
use crate::models::{InventoryItem, NewWarehouse, UpdateWarehouse, Warehouse};

/// Repository trait for warehouses and their stock
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    /// Active warehouses, newest first
    async fn list_warehouses(&self) -> WarehouseResult<Vec<Warehouse>>;

    /// An active warehouse by id
    async fn find_warehouse(&self, id: i32) -> WarehouseResult<Option<Warehouse>>;

    async fn insert_warehouse(&self, input: NewWarehouse) -> WarehouseResult<i32>;

    /// `false` when no active warehouse has this id
    async fn update_warehouse(&self, id: i32, input: UpdateWarehouse) -> WarehouseResult<bool>;

    /// Remove the warehouse's inventory rows, then clear its active flag.
    ///
    /// Returns the number of inventory rows removed, or `None` (with nothing
    /// changed) when no active warehouse has this id.
    async fn deactivate_warehouse(&self, id: i32) -> WarehouseResult<Option<u64>>;

    /// Stock in active warehouses, optionally limited to one branch region,
    /// most recently updated first
    async fn list_inventory(&self, region: Option<String>) -> WarehouseResult<Vec<InventoryItem>>;

    /// Set the quantity and stamp the update time; `false` when the row is missing
    async fn update_stock(&self, id: i32, quantity: i32) -> WarehouseResult<bool>;
}

#[derive(Debug, Default)]
struct Tables {
    warehouses: BTreeMap<i32, Warehouse>,
    inventory: BTreeMap<i32, InventoryItem>,
    /// Branch name and region by id
    branches: HashMap<i32, (String, String)>,
}

/// In-memory implementation of WarehouseRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryWarehouseRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryWarehouseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_branch(&self, id: i32, name: &str, region: &str) {
        self.tables
            .write()
            .await
            .branches
            .insert(id, (name.to_string(), region.to_string()));
    }

    /// Stock a product in a warehouse, returning the inventory id
    pub async fn add_stock(
        &self,
        warehouse_id: i32,
        product_id: i32,
        product_name: &str,
        quantity: i32,
    ) -> i32 {
        let mut tables = self.tables.write().await;
        let id = tables.inventory.keys().next_back().copied().unwrap_or(0) + 1;
        let warehouse = tables.warehouses.get(&warehouse_id).cloned();
        let branch_id = warehouse.as_ref().map(|w| w.branch_id);

        tables.inventory.insert(
            id,
            InventoryItem {
                id,
                warehouse_id,
                branch_id,
                product_id,
                quantity,
                updated_at: Utc::now(),
                warehouse_name: warehouse.as_ref().map(|w| w.name.clone()),
                branch_name: warehouse.as_ref().and_then(|w| w.branch_name.clone()),
                region: warehouse.as_ref().and_then(|w| w.region.clone()),
                product_name: Some(product_name.to_string()),
                unit: Some("kg".to_string()),
            },
        );
        id
    }

    /// Inventory rows of a warehouse, whatever its state
    pub async fn stock_rows(&self, warehouse_id: i32) -> usize {
        self.tables
            .read()
            .await
            .inventory
            .values()
            .filter(|i| i.warehouse_id == warehouse_id)
            .count()
    }
}

#[async_trait]
impl WarehouseRepository for InMemoryWarehouseRepository {
    async fn list_warehouses(&self) -> WarehouseResult<Vec<Warehouse>> {
        let tables = self.tables.read().await;
        Ok(tables
            .warehouses
            .values()
            .rev()
            .filter(|w| w.active)
            .cloned()
            .collect())
    }

    async fn find_warehouse(&self, id: i32) -> WarehouseResult<Option<Warehouse>> {
        let tables = self.tables.read().await;
        Ok(tables.warehouses.get(&id).filter(|w| w.active).cloned())
    }

    async fn insert_warehouse(&self, input: NewWarehouse) -> WarehouseResult<i32> {
        let mut tables = self.tables.write().await;
        let id = tables.warehouses.keys().next_back().copied().unwrap_or(0) + 1;
        let branch = tables.branches.get(&input.branch_id).cloned();

        tables.warehouses.insert(
            id,
            Warehouse {
                id,
                branch_id: input.branch_id,
                name: input.name,
                address: input.address,
                manager: input.manager,
                capacity: input.capacity,
                active: true,
                branch_name: branch.as_ref().map(|(name, _)| name.clone()),
                region: branch.map(|(_, region)| region),
            },
        );
        Ok(id)
    }

    async fn update_warehouse(&self, id: i32, input: UpdateWarehouse) -> WarehouseResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.warehouses.get_mut(&id) {
            Some(warehouse) if warehouse.active => {
                warehouse.name = input.name;
                warehouse.address = input.address;
                warehouse.manager = input.manager;
                warehouse.capacity = input.capacity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate_warehouse(&self, id: i32) -> WarehouseResult<Option<u64>> {
        let mut tables = self.tables.write().await;
        if !tables.warehouses.get(&id).is_some_and(|w| w.active) {
            return Ok(None);
        }

        let before = tables.inventory.len();
        tables.inventory.retain(|_, item| item.warehouse_id != id);
        let removed = (before - tables.inventory.len()) as u64;

        if let Some(warehouse) = tables.warehouses.get_mut(&id) {
            warehouse.active = false;
        }
        Ok(Some(removed))
    }

    async fn list_inventory(&self, region: Option<String>) -> WarehouseResult<Vec<InventoryItem>> {
        let tables = self.tables.read().await;
        let mut items: Vec<InventoryItem> = tables
            .inventory
            .values()
            .filter(|i| {
                tables
                    .warehouses
                    .get(&i.warehouse_id)
                    .is_some_and(|w| w.active)
            })
            .filter(|i| region.as_ref().is_none_or(|r| i.region.as_ref() == Some(r)))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn update_stock(&self, id: i32, quantity: i32) -> WarehouseResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(item) = tables.inventory.get_mut(&id) else {
            return Ok(false);
        };
        item.quantity = quantity;
        item.updated_at = Utc::now();
        Ok(true)
    }
}
