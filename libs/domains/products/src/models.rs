use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

/// Relational product row joined with its category and supplier names.
///
/// Field names are English; the JSON keys are the ones the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct Product {
    #[serde(rename = "MaHangHoa")]
    pub id: i32,
    #[serde(rename = "TenHangHoa")]
    pub name: String,
    #[serde(rename = "MaDanhMuc")]
    pub category_id: i32,
    #[serde(rename = "MaNhaCungCap")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "VungMien")]
    pub region: String,
    #[serde(rename = "DonViTinh")]
    pub unit: String,
    #[serde(rename = "DonGiaNhap")]
    pub cost_price: f64,
    #[serde(rename = "DonGiaBan")]
    pub sale_price: f64,
    #[serde(rename = "SoLuongTon")]
    pub stock: i32,
    #[serde(rename = "HanSuDung")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(rename = "TrangThai")]
    pub active: bool,
    #[serde(rename = "TenDanhMuc")]
    pub category_name: Option<String>,
    #[serde(rename = "LoaiDanhMuc")]
    pub category_kind: Option<String>,
    #[serde(rename = "TenNhaCungCap")]
    pub supplier_name: Option<String>,
    #[serde(rename = "DiaChiNCC")]
    pub supplier_address: Option<String>,
    #[serde(rename = "SDTNCC")]
    pub supplier_phone: Option<String>,
}

/// Writable product fields, parsed from the multipart form.
///
/// Create and update both take the full set. Only the name, category, region and
/// sale price are required; the rest fall back to `0` / `NULL` / `""` when omitted.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 255, message = "TenHangHoa must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "MaDanhMuc must be a positive id"))]
    pub category_id: i32,
    pub supplier_id: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "VungMien must not be empty"))]
    pub region: String,
    #[validate(length(max = 50, message = "DonViTinh is too long"))]
    pub unit: String,
    #[validate(range(min = 0.0, message = "DonGiaNhap must not be negative"))]
    pub cost_price: f64,
    #[validate(range(min = 0.0, message = "DonGiaBan must not be negative"))]
    pub sale_price: f64,
    #[validate(range(min = 0, message = "SoLuongTon must not be negative"))]
    pub stock: i32,
    pub expiry_date: Option<NaiveDate>,
    pub description: String,
}

/// An image file received with a product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload to the image store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
}

/// Value of one extended attribute: plain text or a list such as certifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
}

/// Customer review embedded in the detail document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    #[serde(rename = "nguoiDanhGia")]
    pub reviewer: String,
    /// 1 to 5 by convention, not enforced.
    #[serde(rename = "soSao")]
    pub rating: i32,
    #[serde(rename = "noiDung")]
    pub body: String,
    #[serde(rename = "ngayDanhGia")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Descriptive side data for one product, kept in the document store.
///
/// Fields other than `MaHangHoa` may be omitted when deserializing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductDetail {
    #[serde(rename = "MaHangHoa")]
    pub product_id: i32,
    #[serde(rename = "TenHangHoa", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "MoTaChiTiet")]
    pub description: String,
    #[serde(rename = "ThongTinMoRong")]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(rename = "DanhGia")]
    pub reviews: Vec<Review>,
    #[serde(rename = "HinhAnh")]
    pub images: Vec<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductDetail {
    /// Fresh document written right after the relational insert.
    pub fn new(product_id: i32, name: &str, description: &str, images: Vec<String>) -> Self {
        Self {
            product_id,
            name: Some(name.to_string()),
            description: description.to_string(),
            attributes: BTreeMap::new(),
            reviews: Vec::new(),
            images,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }
}

/// Textual fields written on every update; `images` only when a new image was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailChanges {
    pub name: String,
    pub description: String,
    pub images: Option<Vec<String>>,
}

/// Product row overlaid with its detail document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "MoTaChiTiet")]
    pub description: String,
    #[serde(rename = "ThongTinMoRong")]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(rename = "DanhGia")]
    pub reviews: Vec<Review>,
    #[serde(rename = "HinhAnh")]
    pub images: Vec<String>,
}

impl ProductView {
    /// A missing document reads as empty text, attributes, reviews and images.
    pub fn merge(product: Product, detail: Option<ProductDetail>) -> Self {
        let detail = detail.unwrap_or_default();
        Self {
            product,
            description: detail.description,
            attributes: detail.attributes,
            reviews: detail.reviews,
            images: detail.images,
        }
    }
}

/// `data` of a successful create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedProduct {
    #[serde(rename = "MaHangHoa")]
    pub id: i32,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    /// Set when the image could not be stored; the product exists without it.
    #[serde(rename = "imageError", skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

/// `data` of a successful update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedProduct {
    #[serde(rename = "MaHangHoa")]
    pub id: i32,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Set when a new image was sent but could not be stored; prior images are kept.
    #[serde(rename = "imageError", skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

/// Outcome of a best-effort image cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct CleanupReport {
    pub attempted: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Per-region aggregate over active products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct RegionStatistics {
    #[serde(rename = "VungMien")]
    pub region: String,
    #[serde(rename = "SoLuongSanPham")]
    pub product_count: i64,
    #[serde(rename = "TongSoLuongTon")]
    pub total_stock: i64,
    #[serde(rename = "GiaTrungBinh")]
    pub average_price: Option<f64>,
}

/// Aggregate over the detail documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DetailOverview {
    #[serde(rename = "tongSanPhamCoChiTiet")]
    pub documents: i64,
    #[serde(rename = "tongDanhGia")]
    pub reviews: i64,
}

/// `GET /statistics` payload. `tongQuan` is `{}` when no document exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Statistics {
    #[serde(rename = "theoVungMien")]
    pub by_region: Vec<RegionStatistics>,
    #[serde(rename = "tongQuan")]
    #[schema(value_type = Object)]
    pub overview: serde_json::Value,
}

impl Statistics {
    pub fn new(by_region: Vec<RegionStatistics>, overview: Option<DetailOverview>) -> Self {
        let overview = overview
            .and_then(|o| serde_json::to_value(o).ok())
            .unwrap_or_else(|| serde_json::json!({}));
        Self {
            by_region,
            overview,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_product() -> Product {
        Product {
            id: 7,
            name: "Cam Cao Phong".to_string(),
            category_id: 2,
            supplier_id: None,
            region: "Miền Bắc".to_string(),
            unit: "kg".to_string(),
            cost_price: 20000.0,
            sale_price: 35000.0,
            stock: 12,
            expiry_date: None,
            active: true,
            category_name: Some("Trái cây".to_string()),
            category_kind: None,
            supplier_name: None,
            supplier_address: None,
            supplier_phone: None,
        }
    }

    #[test]
    fn test_product_serializes_with_legacy_keys() {
        let value = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(value["MaHangHoa"], 7);
        assert_eq!(value["DonGiaBan"], 35000.0);
        assert_eq!(value["TenDanhMuc"], "Trái cây");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_merge_without_detail_uses_defaults() {
        let view = ProductView::merge(sample_product(), None);
        let value = serde_json::to_value(view).unwrap();

        assert_eq!(value["MoTaChiTiet"], "");
        assert_eq!(value["ThongTinMoRong"], json!({}));
        assert_eq!(value["DanhGia"], json!([]));
        assert_eq!(value["HinhAnh"], json!([]));
        assert_eq!(value["SoLuongTon"], 12);
    }

    #[test]
    fn test_merge_overlays_detail() {
        let mut detail = ProductDetail::new(7, "Cam", "Ngọt thanh", vec!["u1".into()]);
        detail
            .attributes
            .insert("chungNhan".into(), AttributeValue::List(vec!["VietGAP".into()]));

        let view = ProductView::merge(sample_product(), Some(detail));
        assert_eq!(view.description, "Ngọt thanh");
        assert_eq!(view.images, vec!["u1".to_string()]);

        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["ThongTinMoRong"]["chungNhan"], json!(["VietGAP"]));
    }

    #[test]
    fn test_attribute_value_untagged() {
        let text: AttributeValue = serde_json::from_value(json!("Hà Nội")).unwrap();
        assert_eq!(text, AttributeValue::Text("Hà Nội".into()));
        let list: AttributeValue = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(list, AttributeValue::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_statistics_empty_overview_is_object() {
        let stats = Statistics::new(vec![], None);
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["tongQuan"], json!({}));
        assert_eq!(value["theoVungMien"], json!([]));
    }

    #[test]
    fn test_statistics_overview_keys() {
        let stats = Statistics::new(
            vec![],
            Some(DetailOverview {
                documents: 3,
                reviews: 5,
            }),
        );
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(
            value["tongQuan"],
            json!({"tongSanPhamCoChiTiet": 3, "tongDanhGia": 5})
        );
    }

    #[test]
    fn test_created_product_omits_missing_image_error() {
        let value = serde_json::to_value(CreatedProduct {
            id: 1,
            image_url: None,
            image_error: None,
        })
        .unwrap();
        assert_eq!(value, json!({"MaHangHoa": 1, "imageUrl": null}));
    }
}
