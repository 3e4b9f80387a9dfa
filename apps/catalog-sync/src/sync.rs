//! Maintenance steps: push image files to Cloudinary, point detail documents at
//! them, and seed full detail documents

use domain_products::{
    CloudinaryImageStore, ImageUpload, MongoDetailRepository, ProductDetail, UploadOptions,
};
use std::path::Path;
use tracing::{error, info, warn};

use crate::mapping::{ImageMapping, UploadedImage, public_id_for};

fn content_type(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Uploads every mapped image in `dir` as `product_{id}`, overwriting earlier uploads.
///
/// A failed upload is logged and skipped; the rest of the directory still goes up.
pub async fn upload_images(
    store: &CloudinaryImageStore,
    dir: &Path,
    mapping: &ImageMapping,
) -> eyre::Result<Vec<UploadedImage>> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    let mut uploaded = Vec::new();
    for entry in entries {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let Some(product_id) = mapping.product_for(&file_name) else {
            warn!(file_name, "No product mapped to file, skipping");
            continue;
        };

        let image = ImageUpload {
            content_type: content_type(&file_name).map(str::to_string),
            bytes: std::fs::read(entry.path())?,
            file_name: file_name.clone(),
        };
        let options = UploadOptions {
            public_id: Some(public_id_for(product_id)),
            overwrite: true,
        };

        match store.upload_with(image, options).await {
            Ok(stored) => {
                info!(product_id, url = %stored.url, "Uploaded");
                uploaded.push(UploadedImage {
                    product_id,
                    file_name,
                    url: stored.url,
                });
            }
            Err(e) => error!(product_id, file_name, error = %e, "Upload failed"),
        }
    }

    Ok(uploaded)
}

/// Makes each product's image list exactly its uploaded URL. Returns how many were set.
pub async fn assign_images(
    details: &MongoDetailRepository,
    uploaded: &[UploadedImage],
) -> eyre::Result<usize> {
    for image in uploaded {
        details
            .set_images(image.product_id, vec![image.url.clone()])
            .await?;
        info!(product_id = image.product_id, "Image assigned");
    }
    Ok(uploaded.len())
}

/// Gives every seed without images the URL uploaded for its product, if any.
pub fn attach_uploaded(details: &mut [ProductDetail], uploaded: &[UploadedImage]) {
    for detail in details.iter_mut().filter(|d| d.images.is_empty()) {
        if let Some(image) = uploaded.iter().find(|i| i.product_id == detail.product_id) {
            detail.images = vec![image.url.clone()];
        }
    }
}

/// Upserts each detail document in full. Returns how many were written.
pub async fn seed_details(
    details: &MongoDetailRepository,
    seeds: Vec<ProductDetail>,
) -> eyre::Result<usize> {
    let count = seeds.len();
    for seed in seeds {
        let product_id = seed.product_id;
        let reviews = seed.reviews.len();
        details.seed_detail(seed).await?;
        info!(product_id, reviews, "Detail document seeded");
    }
    Ok(count)
}
