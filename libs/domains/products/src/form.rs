//! Multipart product form shared by create and update.

use axum::extract::{FromRequest, Multipart, Request};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::cloudinary::{IMAGE_EXTENSIONS, is_supported_image};
use crate::error::{ProductError, ProductResult};
use crate::models::{ImageUpload, ProductInput};

/// Name of the file field.
pub const IMAGE_FIELD: &str = "image";

/// Parsed and validated `multipart/form-data` body of `POST /product` and `PUT /product/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub input: ProductInput,
    pub image: Option<ImageUpload>,
}

/// OpenAPI description of the form fields.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProductFormBody {
    #[schema(rename = "TenHangHoa", example = "Rau muống")]
    name: String,
    #[schema(rename = "MaDanhMuc", example = 1)]
    category_id: i32,
    #[schema(rename = "MaNhaCungCap")]
    supplier_id: Option<i32>,
    #[schema(rename = "VungMien", example = "Miền Bắc")]
    region: String,
    #[schema(rename = "DonViTinh", example = "kg")]
    unit: Option<String>,
    #[schema(rename = "DonGiaNhap")]
    cost_price: Option<f64>,
    #[schema(rename = "DonGiaBan", example = 15000)]
    sale_price: f64,
    #[schema(rename = "SoLuongTon")]
    stock: Option<i32>,
    /// `YYYY-MM-DD`
    #[schema(rename = "HanSuDung")]
    expiry_date: Option<String>,
    #[schema(rename = "MoTaChiTiet")]
    description: Option<String>,
    /// jpg, jpeg, png or webp
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

impl ProductForm {
    pub async fn from_multipart(mut multipart: Multipart) -> ProductResult<Self> {
        let mut fields = HashMap::new();
        let mut image = None;

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was chosen
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                if !is_supported_image(&file_name) {
                    return Err(ProductError::Validation(format!(
                        "Unsupported image type, expected one of: {}",
                        IMAGE_EXTENSIONS.join(", ")
                    )));
                }
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                fields.insert(name, field.text().await?);
            }
        }

        let input = parse_fields(&fields)?;
        input.validate()?;
        Ok(Self { input, image })
    }
}

impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = ProductError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ProductError::Validation(e.body_text()))?;
        Self::from_multipart(multipart).await
    }
}

fn text<'a>(fields: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn required<'a>(fields: &'a HashMap<String, String>, key: &str) -> ProductResult<&'a str> {
    text(fields, key).ok_or_else(|| ProductError::Validation(format!("{} is required", key)))
}

fn number<T: FromStr>(fields: &HashMap<String, String>, key: &str) -> ProductResult<Option<T>> {
    text(fields, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| ProductError::Validation(format!("{} must be a number", key)))
        })
        .transpose()
}

fn parse_fields(fields: &HashMap<String, String>) -> ProductResult<ProductInput> {
    let category_id = required(fields, "MaDanhMuc")?;
    let sale_price = required(fields, "DonGiaBan")?;

    let expiry_date = text(fields, "HanSuDung")
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ProductError::Validation("HanSuDung must be a date (YYYY-MM-DD)".to_string())
            })
        })
        .transpose()?;

    Ok(ProductInput {
        name: required(fields, "TenHangHoa")?.to_string(),
        category_id: category_id
            .parse()
            .map_err(|_| ProductError::Validation("MaDanhMuc must be a number".to_string()))?,
        supplier_id: number(fields, "MaNhaCungCap")?,
        region: required(fields, "VungMien")?.to_string(),
        unit: text(fields, "DonViTinh").unwrap_or_default().to_string(),
        cost_price: number(fields, "DonGiaNhap")?.unwrap_or(0.0),
        sale_price: sale_price
            .parse()
            .map_err(|_| ProductError::Validation("DonGiaBan must be a number".to_string()))?,
        stock: number(fields, "SoLuongTon")?.unwrap_or(0),
        expiry_date,
        description: fields
            .get("MoTaChiTiet")
            .cloned()
            .unwrap_or_default(),
    })
}
