use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "MaDanhMuc")]
    pub id: i32,
    #[serde(rename = "TenDanhMuc")]
    pub name: String,
    #[serde(rename = "LoaiDanhMuc")]
    pub kind: Option<String>,
    #[serde(rename = "TrangThai")]
    pub active: bool,
}

/// Body of `POST /category` and `PUT /category/{id}`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[serde(rename = "TenDanhMuc")]
    #[validate(length(min = 1, max = 255, message = "TenDanhMuc must not be empty"))]
    pub name: String,
    #[serde(rename = "LoaiDanhMuc", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCreated {
    #[serde(rename = "MaDanhMuc")]
    pub id: i32,
}

/// Goods supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    #[serde(rename = "MaNhaCungCap")]
    pub id: i32,
    #[serde(rename = "TenNhaCungCap")]
    pub name: String,
    #[serde(rename = "DiaChi")]
    pub address: Option<String>,
    #[serde(rename = "SoDienThoai")]
    pub phone: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "TrangThai")]
    pub active: bool,
}

/// Body of `POST /supplier` and `PUT /supplier/{id}`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate, ToSchema)]
pub struct SupplierInput {
    #[serde(rename = "TenNhaCungCap")]
    #[validate(length(min = 1, max = 255, message = "TenNhaCungCap must not be empty"))]
    pub name: String,
    #[serde(rename = "DiaChi", default)]
    pub address: Option<String>,
    #[serde(rename = "SoDienThoai", default)]
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[serde(rename = "Email", default)]
    #[validate(email(message = "Email is not a valid address"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierCreated {
    #[serde(rename = "MaNhaCungCap")]
    pub id: i32,
}

/// Store branch; its region partitions customers, orders and inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Branch {
    #[serde(rename = "MaChiNhanh")]
    pub id: i32,
    #[serde(rename = "TenChiNhanh")]
    pub name: String,
    #[serde(rename = "DiaChi")]
    pub address: Option<String>,
    #[serde(rename = "SoDienThoai")]
    pub phone: Option<String>,
    #[serde(rename = "VungMien")]
    pub region: String,
    #[serde(rename = "TrangThai")]
    pub active: bool,
}
