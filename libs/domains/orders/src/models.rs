use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Status given to orders created without one
pub const DEFAULT_ORDER_STATUS: &str = "Chờ xử lý";

/// Order row with the customer's name and phone and the handling branch name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct OrderSummary {
    #[serde(rename = "MaDonHang")]
    pub id: Uuid,
    #[serde(rename = "MaKhachHang")]
    pub customer_id: i32,
    #[serde(rename = "MaChiNhanhXuLy")]
    pub branch_id: Option<i32>,
    #[serde(rename = "VungMien")]
    pub region: String,
    #[serde(rename = "NgayDatHang")]
    pub ordered_at: DateTime<Utc>,
    #[serde(rename = "TongTien")]
    pub total: f64,
    #[serde(rename = "TrangThaiDonHang")]
    pub status: String,
    #[serde(rename = "TenKhachHang")]
    pub customer_name: Option<String>,
    #[serde(rename = "SoDienThoai")]
    pub customer_phone: Option<String>,
    #[serde(rename = "TenChiNhanh")]
    pub branch_name: Option<String>,
}

/// Contact details of the ordering customer, nested in [`OrderDetail`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderCustomer {
    #[serde(rename = "TenKhachHang")]
    pub name: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "SoDienThoai")]
    pub phone: Option<String>,
    #[serde(rename = "DiaChi")]
    pub address: Option<String>,
}

/// One order line with the product's name and unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct OrderLine {
    #[serde(rename = "MaHangHoa")]
    pub product_id: i32,
    #[serde(rename = "TenHangHoa")]
    pub product_name: Option<String>,
    #[serde(rename = "SoLuong")]
    pub quantity: i32,
    #[serde(rename = "DonGia")]
    pub unit_price: f64,
    #[serde(rename = "ThanhTien")]
    pub line_total: f64,
    #[serde(rename = "DonViTinh")]
    pub unit: Option<String>,
}

/// An order with its customer and lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    #[serde(rename = "MaDonHang")]
    pub id: Uuid,
    #[serde(rename = "NgayDatHang")]
    pub ordered_at: DateTime<Utc>,
    #[serde(rename = "TongTien")]
    pub total: f64,
    #[serde(rename = "TrangThaiDonHang")]
    pub status: String,
    #[serde(rename = "VungMien")]
    pub region: String,
    #[serde(rename = "MaKhachHang")]
    pub customer_id: i32,
    #[serde(rename = "KhachHang")]
    pub customer: OrderCustomer,
    #[serde(rename = "ChiTiet")]
    pub lines: Vec<OrderLine>,
}

/// One line of `POST /order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewOrderLine {
    #[serde(rename = "MaHangHoa")]
    pub product_id: i32,
    #[serde(rename = "SoLuong")]
    #[validate(range(min = 1, message = "SoLuong must be at least 1"))]
    pub quantity: i32,
    #[serde(rename = "DonGia")]
    #[validate(range(min = 0.0, message = "DonGia must not be negative"))]
    pub unit_price: f64,
}

impl NewOrderLine {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// Body of `POST /order`
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct NewOrder {
    #[serde(rename = "MaKhachHang")]
    pub customer_id: i32,
    #[serde(rename = "VungMien")]
    #[validate(length(min = 1, message = "VungMien must not be empty"))]
    pub region: String,
    #[serde(rename = "MaChiNhanhXuLy", default)]
    pub branch_id: Option<i32>,
    #[serde(rename = "TrangThaiDonHang", default)]
    pub status: Option<String>,
    #[serde(rename = "ChiTiet")]
    #[validate(length(min = 1, message = "ChiTiet must contain at least one line"))]
    #[validate(nested)]
    pub lines: Vec<NewOrderLine>,
}

impl NewOrder {
    /// Sum of quantity × unit price over all lines
    pub fn total(&self) -> f64 {
        self.lines.iter().map(NewOrderLine::line_total).sum()
    }

    pub fn status_or_default(&self) -> String {
        self.status
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string())
    }
}

/// Body of `PUT /order/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatus {
    #[serde(rename = "TrangThaiDonHang")]
    #[validate(length(min = 1, max = 50, message = "TrangThaiDonHang must not be empty"))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderCreated {
    #[serde(rename = "MaDonHang")]
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(body: serde_json::Value) -> NewOrder {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let input = order(json!({
            "MaKhachHang": 1,
            "VungMien": "Miền Bắc",
            "ChiTiet": [
                {"MaHangHoa": 1, "SoLuong": 2, "DonGia": 15000.0},
                {"MaHangHoa": 2, "SoLuong": 3, "DonGia": 2500.5}
            ]
        }));
        assert_eq!(input.total(), 37501.5);
        assert_eq!(input.status_or_default(), DEFAULT_ORDER_STATUS);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_lines_are_validated() {
        let empty = order(json!({"MaKhachHang": 1, "VungMien": "Miền Nam", "ChiTiet": []}));
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("lines"));

        let zero_quantity = order(json!({
            "MaKhachHang": 1,
            "VungMien": "Miền Nam",
            "ChiTiet": [{"MaHangHoa": 1, "SoLuong": 0, "DonGia": 1.0}]
        }));
        assert!(zero_quantity.validate().is_err());
    }

    #[test]
    fn test_explicit_status_is_kept() {
        let input = order(json!({
            "MaKhachHang": 1,
            "VungMien": "Miền Trung",
            "TrangThaiDonHang": "Đang giao",
            "ChiTiet": [{"MaHangHoa": 1, "SoLuong": 1, "DonGia": 1.0}]
        }));
        assert_eq!(input.status_or_default(), "Đang giao");
    }
}
