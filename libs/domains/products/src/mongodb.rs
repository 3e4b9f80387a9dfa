//! MongoDB implementation of DetailRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Bson, Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{AttributeValue, DetailChanges, DetailOverview, ProductDetail, Review};
use crate::repository::DetailRepository;

/// Collection holding one detail document per product.
pub const DETAIL_COLLECTION: &str = "hanghoa_details";

/// Stored shape of a detail document. Every field but the key is optional on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DetailDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(rename = "MaHangHoa")]
    product_id: i32,
    #[serde(rename = "TenHangHoa", default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(rename = "MoTaChiTiet", default)]
    description: Option<String>,
    #[serde(rename = "ThongTinMoRong", default)]
    attributes: Option<Document>,
    #[serde(rename = "DanhGia", default)]
    reviews: Option<Vec<ReviewDocument>>,
    #[serde(rename = "HinhAnh", default)]
    images: Option<Vec<String>>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    created_at: Option<bson::DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<bson::DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReviewDocument {
    #[serde(rename = "nguoiDanhGia", default)]
    reviewer: String,
    #[serde(rename = "soSao", default)]
    rating: i32,
    #[serde(rename = "noiDung", default)]
    body: String,
    #[serde(rename = "ngayDanhGia", default)]
    reviewed_at: Option<bson::DateTime>,
}

fn to_chrono(value: bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn attribute_from_bson(value: Bson) -> AttributeValue {
    match value {
        Bson::String(s) => AttributeValue::Text(s),
        Bson::Array(items) => AttributeValue::List(
            items
                .into_iter()
                .map(|item| match item {
                    Bson::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        other => AttributeValue::Text(other.to_string()),
    }
}

fn attribute_to_bson(value: &AttributeValue) -> Bson {
    match value {
        AttributeValue::Text(s) => Bson::String(s.clone()),
        AttributeValue::List(items) => {
            Bson::Array(items.iter().cloned().map(Bson::String).collect())
        }
    }
}

impl From<DetailDocument> for ProductDetail {
    fn from(doc: DetailDocument) -> Self {
        let attributes: BTreeMap<String, AttributeValue> = doc
            .attributes
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, attribute_from_bson(value)))
            .collect();

        Self {
            product_id: doc.product_id,
            name: doc.name,
            description: doc.description.unwrap_or_default(),
            attributes,
            reviews: doc
                .reviews
                .unwrap_or_default()
                .into_iter()
                .map(|r| Review {
                    reviewer: r.reviewer,
                    rating: r.rating,
                    body: r.body,
                    reviewed_at: r.reviewed_at.and_then(to_chrono),
                })
                .collect(),
            images: doc.images.unwrap_or_default(),
            created_at: doc.created_at.and_then(to_chrono),
            updated_at: doc.updated_at.and_then(to_chrono),
        }
    }
}

impl From<ProductDetail> for DetailDocument {
    fn from(detail: ProductDetail) -> Self {
        Self {
            id: None,
            product_id: detail.product_id,
            name: detail.name,
            description: Some(detail.description),
            attributes: Some(
                detail
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), attribute_to_bson(v)))
                    .collect(),
            ),
            reviews: Some(
                detail
                    .reviews
                    .into_iter()
                    .map(|r| ReviewDocument {
                        reviewer: r.reviewer,
                        rating: r.rating,
                        body: r.body,
                        reviewed_at: r.reviewed_at.map(to_bson_datetime),
                    })
                    .collect(),
            ),
            images: Some(detail.images),
            created_at: detail.created_at.map(to_bson_datetime),
            updated_at: detail.updated_at.map(to_bson_datetime),
        }
    }
}

/// `$set` the textual fields (and images when given); seed the empty collections on insert.
fn upsert_update(changes: &DetailChanges, now: bson::DateTime) -> Document {
    let mut set = doc! {
        "TenHangHoa": &changes.name,
        "MoTaChiTiet": &changes.description,
        "updatedAt": now,
    };
    let mut on_insert = doc! {
        "ThongTinMoRong": {},
        "DanhGia": [],
        "createdAt": now,
    };
    match &changes.images {
        Some(images) => {
            set.insert("HinhAnh", images.clone());
        }
        None => {
            on_insert.insert("HinhAnh", Bson::Array(Vec::new()));
        }
    }
    doc! { "$set": set, "$setOnInsert": on_insert }
}

/// Every field of a seed document is `$set`; an empty image list leaves stored images alone.
fn seed_update(detail: ProductDetail, now: bson::DateTime) -> ProductResult<Document> {
    let mut set = bson::to_document(&DetailDocument::from(detail))
        .map_err(|e| ProductError::Document(e.to_string()))?;
    set.remove("MaHangHoa");
    set.remove("createdAt");
    set.insert("updatedAt", now);

    let mut on_insert = doc! { "createdAt": now };
    if !set.get_array("HinhAnh").is_ok_and(|images| !images.is_empty()) {
        set.remove("HinhAnh");
        on_insert.insert("HinhAnh", Bson::Array(Vec::new()));
    }
    Ok(doc! { "$set": set, "$setOnInsert": on_insert })
}

fn as_i64(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        Some(Bson::Double(n)) => *n as i64,
        _ => 0,
    }
}

/// MongoDB implementation of the DetailRepository
#[derive(Clone)]
pub struct MongoDetailRepository {
    collection: Collection<DetailDocument>,
}

impl MongoDetailRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DETAIL_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<DetailDocument>(collection_name),
        }
    }

    /// One document per product id
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "MaHangHoa": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_mahanghoa_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Detail document indexes created successfully");
        Ok(())
    }

    /// Write a complete detail document (text, attributes, reviews), creating it if missing.
    #[instrument(skip(self, detail), fields(product_id = detail.product_id))]
    pub async fn seed_detail(&self, detail: ProductDetail) -> ProductResult<()> {
        let product_id = detail.product_id;
        let update = seed_update(detail, bson::DateTime::now())?;
        self.collection
            .update_one(doc! { "MaHangHoa": product_id }, update)
            .upsert(true)
            .await?;
        Ok(())
    }

    /// Make `images` the whole image list of a product, creating the document if missing.
    #[instrument(skip(self))]
    pub async fn set_images(&self, product_id: i32, images: Vec<String>) -> ProductResult<()> {
        let now = bson::DateTime::now();
        self.collection
            .update_one(
                doc! { "MaHangHoa": product_id },
                doc! {
                    "$set": { "HinhAnh": images, "updatedAt": now },
                    "$setOnInsert": {
                        "MoTaChiTiet": "",
                        "ThongTinMoRong": {},
                        "DanhGia": [],
                        "createdAt": now,
                    },
                },
            )
            .upsert(true)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DetailRepository for MongoDetailRepository {
    #[instrument(skip(self))]
    async fn find(&self, product_id: i32) -> ProductResult<Option<ProductDetail>> {
        let doc = self
            .collection
            .find_one(doc! { "MaHangHoa": product_id })
            .await?;
        Ok(doc.map(ProductDetail::from))
    }

    #[instrument(skip(self, detail), fields(product_id = detail.product_id))]
    async fn insert(&self, detail: ProductDetail) -> ProductResult<()> {
        self.collection
            .insert_one(DetailDocument::from(detail))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, changes))]
    async fn upsert(&self, product_id: i32, changes: DetailChanges) -> ProductResult<()> {
        let update = upsert_update(&changes, bson::DateTime::now());
        self.collection
            .update_one(doc! { "MaHangHoa": product_id }, update)
            .upsert(true)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, product_id: i32) -> ProductResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "MaHangHoa": product_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn overview(&self) -> ProductResult<Option<DetailOverview>> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": Bson::Null,
                "documents": { "$sum": 1 },
                "reviews": { "$sum": { "$size": { "$ifNull": ["$DanhGia", []] } } },
            }
        }];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let Some(summary) = cursor.try_next().await? else {
            return Ok(None);
        };

        Ok(Some(DetailOverview {
            documents: as_i64(summary.get("documents")),
            reviews: as_i64(summary.get("reviews")),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_with_missing_fields_reads_as_defaults() {
        let raw = doc! { "MaHangHoa": 5 };
        let stored: DetailDocument = bson::from_document(raw).unwrap();
        let detail = ProductDetail::from(stored);

        assert_eq!(detail.product_id, 5);
        assert_eq!(detail.description, "");
        assert!(detail.attributes.is_empty());
        assert!(detail.reviews.is_empty());
        assert!(detail.images.is_empty());
    }

    #[test]
    fn test_legacy_document_conversion() {
        let reviewed = bson::DateTime::from_millis(1_733_788_800_000);
        let raw = doc! {
            "_id": ObjectId::new(),
            "MaHangHoa": 1,
            "TenHangHoa": "Rau muống sạch",
            "MoTaChiTiet": "Rau muống hữu cơ",
            "ThongTinMoRong": {
                "nguonGoc": "Hà Nội",
                "chungNhan": ["VietGAP"],
                "hanDung": 5,
            },
            "DanhGia": [{
                "nguoiDanhGia": "Nguyễn Văn An",
                "soSao": 5,
                "noiDung": "Rau rất tươi",
                "ngayDanhGia": reviewed,
            }],
            "HinhAnh": ["https://res.cloudinary.com/x/nongsan-images/product_1.jpg"],
        };

        let detail = ProductDetail::from(bson::from_document::<DetailDocument>(raw).unwrap());

        assert_eq!(
            detail.attributes["nguonGoc"],
            AttributeValue::Text("Hà Nội".into())
        );
        assert_eq!(
            detail.attributes["chungNhan"],
            AttributeValue::List(vec!["VietGAP".into()])
        );
        assert_eq!(detail.attributes["hanDung"], AttributeValue::Text("5".into()));
        assert_eq!(detail.reviews[0].rating, 5);
        assert_eq!(
            detail.reviews[0].reviewed_at.map(|d| d.timestamp_millis()),
            Some(1_733_788_800_000)
        );
        assert_eq!(detail.images.len(), 1);
    }

    #[test]
    fn test_new_detail_serializes_legacy_keys() {
        let detail = ProductDetail::new(3, "Cam", "", vec![]);
        let stored = bson::to_document(&DetailDocument::from(detail)).unwrap();

        assert_eq!(stored.get_i32("MaHangHoa").unwrap(), 3);
        assert_eq!(stored.get_array("HinhAnh").unwrap().len(), 0);
        assert!(stored.get_document("ThongTinMoRong").unwrap().is_empty());
        assert!(stored.get_datetime("createdAt").is_ok());
        assert!(!stored.contains_key("_id"));
    }

    #[test]
    fn test_upsert_update_without_images_seeds_empty_list() {
        let update = upsert_update(
            &DetailChanges {
                name: "Cam".into(),
                description: "Ngọt".into(),
                images: None,
            },
            bson::DateTime::now(),
        );

        let set = update.get_document("$set").unwrap();
        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert_eq!(set.get_str("MoTaChiTiet").unwrap(), "Ngọt");
        assert!(!set.contains_key("HinhAnh"));
        assert!(on_insert.get_array("HinhAnh").unwrap().is_empty());
    }

    #[test]
    fn test_upsert_update_with_images_replaces_list() {
        let update = upsert_update(
            &DetailChanges {
                name: "Cam".into(),
                description: String::new(),
                images: Some(vec!["u2".into()]),
            },
            bson::DateTime::now(),
        );

        let set = update.get_document("$set").unwrap();
        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert_eq!(
            set.get_array("HinhAnh").unwrap(),
            &vec![Bson::String("u2".into())]
        );
        assert!(!on_insert.contains_key("HinhAnh"));
    }

    #[test]
    fn test_seed_update_writes_attributes_and_reviews() {
        let mut detail = ProductDetail::new(7, "Gạo ST25", "Hạt dài", vec![]);
        detail.attributes.insert(
            "chungNhan".into(),
            AttributeValue::List(vec!["VietGAP".into(), "Organic".into()]),
        );
        detail.reviews.push(Review {
            reviewer: "Đặng Văn Hải".into(),
            rating: 5,
            body: "Cơm dẻo thơm".into(),
            reviewed_at: None,
        });

        let update = seed_update(detail, bson::DateTime::now()).unwrap();
        let set = update.get_document("$set").unwrap();
        let on_insert = update.get_document("$setOnInsert").unwrap();

        assert_eq!(set.get_str("TenHangHoa").unwrap(), "Gạo ST25");
        assert_eq!(
            set.get_document("ThongTinMoRong")
                .unwrap()
                .get_array("chungNhan")
                .unwrap()
                .len(),
            2
        );
        assert_eq!(set.get_array("DanhGia").unwrap().len(), 1);
        assert!(!set.contains_key("MaHangHoa"));
        assert!(!set.contains_key("HinhAnh"));
        assert!(on_insert.get_array("HinhAnh").unwrap().is_empty());
        assert!(on_insert.get_datetime("createdAt").is_ok());
    }

    #[test]
    fn test_seed_update_with_images_replaces_list() {
        let detail = ProductDetail::new(1, "Rau muống", "", vec!["u1".into()]);
        let update = seed_update(detail, bson::DateTime::now()).unwrap();

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_array("HinhAnh").unwrap(), &vec![Bson::String("u1".into())]);
        assert!(!update.get_document("$setOnInsert").unwrap().contains_key("HinhAnh"));
    }

    #[test]
    fn test_as_i64_accepts_numeric_types() {
        assert_eq!(as_i64(Some(&Bson::Int32(3))), 3);
        assert_eq!(as_i64(Some(&Bson::Int64(4))), 4);
        assert_eq!(as_i64(Some(&Bson::Double(5.0))), 5);
        assert_eq!(as_i64(None), 0);
    }
}
