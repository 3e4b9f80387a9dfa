use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Type assigned when the client does not send one
pub const DEFAULT_CUSTOMER_TYPE: &str = "Thường";

/// Customer row joined with the name of the nearest branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct Customer {
    #[serde(rename = "MaKhachHang")]
    pub id: i32,
    #[serde(rename = "TenKhachHang")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "SoDienThoai")]
    pub phone: Option<String>,
    #[serde(rename = "DiaChi")]
    pub address: Option<String>,
    #[serde(rename = "VungMien")]
    pub region: Option<String>,
    #[serde(rename = "LoaiKhachHang")]
    pub customer_type: String,
    #[serde(rename = "DiemTichLuy")]
    pub loyalty_points: i32,
    #[serde(rename = "NgayDangKy")]
    pub registered_at: DateTime<Utc>,
    #[serde(rename = "MaChiNhanhGanNhat")]
    pub nearest_branch_id: Option<i32>,
    #[serde(rename = "TenChiNhanh")]
    pub branch_name: Option<String>,
}

/// Body of `POST /customer`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewCustomer {
    #[serde(rename = "TenKhachHang")]
    #[validate(length(min = 1, max = 255, message = "TenKhachHang must not be empty"))]
    pub name: String,
    #[serde(rename = "Email", default)]
    #[validate(email(message = "Email is not a valid address"))]
    pub email: Option<String>,
    #[serde(rename = "SoDienThoai", default)]
    #[validate(length(max = 20, message = "SoDienThoai is too long"))]
    pub phone: Option<String>,
    #[serde(rename = "DiaChi", default)]
    pub address: Option<String>,
    #[serde(rename = "VungMien", default)]
    pub region: Option<String>,
    #[serde(rename = "LoaiKhachHang", default)]
    pub customer_type: Option<String>,
    #[serde(rename = "MaChiNhanhGanNhat", default)]
    pub nearest_branch_id: Option<i32>,
}

/// Body of `PUT /customer/{id}`. Replaces the contact fields and the type.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[serde(rename = "TenKhachHang")]
    #[validate(length(min = 1, max = 255, message = "TenKhachHang must not be empty"))]
    pub name: String,
    #[serde(rename = "Email", default)]
    #[validate(email(message = "Email is not a valid address"))]
    pub email: Option<String>,
    #[serde(rename = "SoDienThoai", default)]
    #[validate(length(max = 20, message = "SoDienThoai is too long"))]
    pub phone: Option<String>,
    #[serde(rename = "DiaChi", default)]
    pub address: Option<String>,
    #[serde(rename = "LoaiKhachHang", default)]
    pub customer_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerCreated {
    #[serde(rename = "MaKhachHang")]
    pub id: i32,
}

/// Blank strings from form-style clients are stored as NULL
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_customer_deserializes_legacy_keys() {
        let input: NewCustomer = serde_json::from_value(json!({
            "TenKhachHang": "Nguyễn Văn An",
            "SoDienThoai": "0901234567",
            "VungMien": "Miền Nam"
        }))
        .unwrap();

        assert_eq!(input.name, "Nguyễn Văn An");
        assert_eq!(input.phone.as_deref(), Some("0901234567"));
        assert!(input.customer_type.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let input = NewCustomer {
            name: "Lê Thị Bình".into(),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("a".into())), Some("a".into()));
        assert_eq!(non_blank(None), None);
    }
}
