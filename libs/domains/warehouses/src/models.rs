use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Warehouse row joined with its branch's name and region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct Warehouse {
    #[serde(rename = "MaKho")]
    pub id: i32,
    #[serde(rename = "MaChiNhanh")]
    pub branch_id: i32,
    #[serde(rename = "TenKho")]
    pub name: String,
    #[serde(rename = "DiaChiKho")]
    pub address: Option<String>,
    #[serde(rename = "NguoiQuanLy")]
    pub manager: Option<String>,
    #[serde(rename = "SucChua")]
    pub capacity: Option<i32>,
    #[serde(rename = "TrangThai")]
    pub active: bool,
    #[serde(rename = "TenChiNhanh")]
    pub branch_name: Option<String>,
    #[serde(rename = "VungMien")]
    pub region: Option<String>,
}

/// Body of `POST /warehouse`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewWarehouse {
    #[serde(rename = "MaChiNhanh")]
    #[validate(range(min = 1, message = "MaChiNhanh must be a positive id"))]
    pub branch_id: i32,
    #[serde(rename = "TenKho")]
    #[validate(length(min = 1, max = 255, message = "TenKho must not be empty"))]
    pub name: String,
    #[serde(rename = "DiaChiKho", default)]
    pub address: Option<String>,
    #[serde(rename = "NguoiQuanLy", default)]
    pub manager: Option<String>,
    #[serde(rename = "SucChua", default)]
    #[validate(range(min = 0, message = "SucChua must not be negative"))]
    pub capacity: Option<i32>,
}

/// Body of `PUT /warehouse/{id}`. The branch cannot change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateWarehouse {
    #[serde(rename = "TenKho")]
    #[validate(length(min = 1, max = 255, message = "TenKho must not be empty"))]
    pub name: String,
    #[serde(rename = "DiaChiKho", default)]
    pub address: Option<String>,
    #[serde(rename = "NguoiQuanLy", default)]
    pub manager: Option<String>,
    #[serde(rename = "SucChua", default)]
    #[validate(range(min = 0, message = "SucChua must not be negative"))]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WarehouseCreated {
    #[serde(rename = "MaKho")]
    pub id: i32,
}

/// Stock of one product in one warehouse, with warehouse, branch and product names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct InventoryItem {
    #[serde(rename = "MaTonKho")]
    pub id: i32,
    #[serde(rename = "MaKho")]
    pub warehouse_id: i32,
    #[serde(rename = "MaChiNhanh")]
    pub branch_id: Option<i32>,
    #[serde(rename = "MaHangHoa")]
    pub product_id: i32,
    #[serde(rename = "SoLuongTon")]
    pub quantity: i32,
    #[serde(rename = "NgayCapNhat")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "TenKho")]
    pub warehouse_name: Option<String>,
    #[serde(rename = "TenChiNhanh")]
    pub branch_name: Option<String>,
    #[serde(rename = "VungMien")]
    pub region: Option<String>,
    #[serde(rename = "TenHangHoa")]
    pub product_name: Option<String>,
    #[serde(rename = "DonViTinh")]
    pub unit: Option<String>,
}

/// Body of `PUT /inventory/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStock {
    #[serde(rename = "SoLuongTon")]
    #[validate(range(min = 0, message = "SoLuongTon must not be negative"))]
    pub quantity: i32,
}
