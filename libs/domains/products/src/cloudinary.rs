//! Cloudinary implementation of [`ImageStore`] over the signed upload/destroy REST API.

use async_trait::async_trait;
use chrono::Utc;
use core_config::cloudinary::{CloudinaryConfig, SignatureAlgorithm};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{ImageUpload, StoredImage};
use crate::repository::ImageStore;

/// Folder every product image lives in; also the public id prefix.
pub const DEFAULT_FOLDER: &str = "nongsan-images";

/// File extensions accepted for upload and recognised in asset URLs.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Images are scaled down to fit 800x800.
const UPLOAD_TRANSFORMATION: &str = "c_limit,h_800,w_800";

/// Public id of an asset from its delivery URL.
///
/// `https://.../nongsan-images/abc.jpg` gives `nongsan-images/abc`. URLs whose last
/// segment does not end in a known image extension have no public id.
pub fn public_id_from_url(url: &str, folder: &str) -> Option<String> {
    let file_name = url.rsplit('/').next()?;
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || !IMAGE_EXTENSIONS.contains(&extension) {
        return None;
    }
    Some(format!("{}/{}", folder, stem))
}

/// Whether a file name carries one of [`IMAGE_EXTENSIONS`] (any case).
pub fn is_supported_image(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Extra upload parameters used by the catalog maintenance tooling.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Name inside the folder, e.g. `product_7`
    pub public_id: Option<String>,
    pub overwrite: bool,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Clone)]
pub struct CloudinaryImageStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self { client, config }
    }

    fn ensure_configured(&self) -> ProductResult<()> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ProductError::ImageStore(
                "image storage is not configured".to_string(),
            ))
        }
    }

    fn signature(&self, params: &[(&str, String)]) -> String {
        sign(
            params,
            &self.config.api_secret,
            self.config.signature_algorithm,
        )
    }

    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    pub async fn upload_with(
        &self,
        image: ImageUpload,
        options: UploadOptions,
    ) -> ProductResult<StoredImage> {
        self.ensure_configured()?;

        let mut params = vec![
            ("folder", self.config.folder.clone()),
            ("timestamp", Utc::now().timestamp().to_string()),
            ("transformation", UPLOAD_TRANSFORMATION.to_string()),
        ];
        if let Some(public_id) = options.public_id {
            params.push(("public_id", public_id));
        }
        if options.overwrite {
            params.push(("overwrite", "true".to_string()));
        }
        let signature = self.signature(&params);

        let mut part = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let mut form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }
        form = form.part("file", part);

        let response = self
            .client
            .post(self.config.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProductError::ImageStore(format!(
                "upload rejected ({}): {}",
                status, body
            )));
        }

        let uploaded: UploadResponse = response.json().await?;
        tracing::info!(public_id = %uploaded.public_id, "Uploaded image");
        Ok(StoredImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn upload(&self, image: ImageUpload) -> ProductResult<StoredImage> {
        self.upload_with(image, UploadOptions::default()).await
    }

    #[instrument(skip(self))]
    async fn destroy(&self, public_id: &str) -> ProductResult<()> {
        self.ensure_configured()?;

        let params = vec![
            ("public_id", public_id.to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
        ];
        let signature = self.signature(&params);

        let mut form: Vec<(&str, String)> = params;
        form.push(("api_key", self.config.api_key.clone()));
        form.push(("signature", signature));

        let response = self
            .client
            .post(self.config.endpoint("destroy"))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProductError::ImageStore(format!(
                "destroy rejected ({}): {}",
                status, body
            )));
        }

        let outcome: DestroyResponse = response.json().await?;
        if outcome.result != "ok" {
            return Err(ProductError::ImageStore(format!(
                "destroy of {} returned '{}'",
                public_id, outcome.result
            )));
        }

        tracing::info!(public_id, "Destroyed image");
        Ok(())
    }

    fn folder(&self) -> &str {
        &self.config.folder
    }
}

/// `key=value` pairs sorted by key and joined with `&`.
fn string_to_sign(params: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Hex digest of the sorted parameters followed by the API secret.
fn sign(params: &[(&str, String)], secret: &str, algorithm: SignatureAlgorithm) -> String {
    match algorithm {
        SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(params, secret),
        SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(params, secret),
    }
}

fn hex_digest<H: Digest>(params: &[(&str, String)], secret: &str) -> String {
    let mut hasher = H::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(secret.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Form as AxumForm, Multipart},
        routing::post,
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    #[test]
    fn test_public_id_from_url() {
        assert_eq!(
            public_id_from_url(
                "https://res.cloudinary.com/demo/image/upload/v17/nongsan-images/rau-muong.jpg",
                DEFAULT_FOLDER
            )
            .as_deref(),
            Some("nongsan-images/rau-muong")
        );
        assert_eq!(
            public_id_from_url("https://x/y/a.b.webp", DEFAULT_FOLDER).as_deref(),
            Some("nongsan-images/a.b")
        );
    }

    #[test]
    fn test_public_id_requires_known_extension() {
        assert_eq!(public_id_from_url("https://x/y/file.gif", DEFAULT_FOLDER), None);
        assert_eq!(public_id_from_url("https://x/y/file", DEFAULT_FOLDER), None);
        assert_eq!(public_id_from_url("https://x/y/.jpg", DEFAULT_FOLDER), None);
        assert_eq!(public_id_from_url("https://x/y/FILE.JPG", DEFAULT_FOLDER), None);
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image("cam.JPG"));
        assert!(is_supported_image("a.webp"));
        assert!(!is_supported_image("notes.txt"));
        assert!(!is_supported_image("README"));
    }

    #[test]
    fn test_string_to_sign_sorts_keys() {
        let params = [
            ("timestamp", "1700000000".to_string()),
            ("folder", "nongsan-images".to_string()),
            ("public_id", "product_1".to_string()),
        ];
        assert_eq!(
            string_to_sign(&params),
            "folder=nongsan-images&public_id=product_1&timestamp=1700000000"
        );
    }

    fn documented_params() -> [(&'static str, String); 3] {
        [
            ("timestamp", "1315060510".to_string()),
            ("public_id", "sample_image".to_string()),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop".to_string()),
        ]
    }

    #[test]
    fn test_sha1_signature_matches_documented_vector() {
        assert_eq!(
            sign(&documented_params(), "abcd", SignatureAlgorithm::Sha1),
            "bfd09f95f331f558cbd1320e67aa8d488770583e"
        );
    }

    #[test]
    fn test_sha256_signature() {
        let signature = sign(&documented_params(), "abcd", SignatureAlgorithm::Sha256);
        assert_eq!(
            signature,
            "cc927e1290f9e3ae4c1a741eda21a4630b4ce80f9ce0bc0296337d25cf40f91e"
        );
        assert_ne!(
            signature,
            sign(&documented_params(), "other", SignatureAlgorithm::Sha256)
        );
    }

    #[tokio::test]
    async fn test_unconfigured_store_fails_fast() {
        let store = CloudinaryImageStore::new(CloudinaryConfig::new("", "", ""));
        let err = store
            .upload(ImageUpload {
                file_name: "a.jpg".into(),
                content_type: None,
                bytes: vec![0],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::ImageStore(_)));
        assert!(store.destroy("nongsan-images/a").await.is_err());
    }

    async fn upload_endpoint(mut multipart: Multipart) -> Json<Value> {
        let mut fields = HashMap::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap();
                fields.insert(name, format!("{}:{}", file_name, bytes.len()));
            } else {
                fields.insert(name, field.text().await.unwrap());
            }
        }
        let public_id = format!(
            "{}/{}",
            fields["folder"],
            fields.get("public_id").cloned().unwrap_or("generated".into())
        );
        Json(json!({
            "public_id": public_id,
            "secure_url": format!("https://cdn.test/{}.jpg", public_id),
            "echo": fields,
        }))
    }

    async fn destroy_endpoint(AxumForm(form): AxumForm<HashMap<String, String>>) -> Json<Value> {
        let result = if form["public_id"].ends_with("missing") {
            "not found"
        } else {
            "ok"
        };
        Json(json!({ "result": result }))
    }

    async fn fake_cloudinary() -> CloudinaryConfig {
        let app = Router::new()
            .route("/demo/image/upload", post(upload_endpoint))
            .route("/demo/image/destroy", post(destroy_endpoint));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = CloudinaryConfig::new("demo", "key", "secret");
        config.api_base = format!("http://{}", addr);
        config
    }

    #[tokio::test]
    async fn test_upload_and_destroy_against_fake_api() {
        let store = CloudinaryImageStore::new(fake_cloudinary().await);

        let stored = store
            .upload_with(
                ImageUpload {
                    file_name: "cam.jpg".into(),
                    content_type: Some("image/jpeg".into()),
                    bytes: vec![1, 2, 3, 4],
                },
                UploadOptions {
                    public_id: Some("product_3".into()),
                    overwrite: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(stored.public_id, "nongsan-images/product_3");
        assert_eq!(
            public_id_from_url(&stored.url, store.folder()).as_deref(),
            Some("nongsan-images/product_3")
        );

        store.destroy(&stored.public_id).await.unwrap();
        assert!(store.destroy("nongsan-images/missing").await.is_err());
    }
}
