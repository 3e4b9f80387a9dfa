//! File name to product id mapping and the upload results file

use domain_products::ProductDetail;
use domain_products::cloudinary::is_supported_image;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One uploaded product image, as written by `upload-images` and read by `assign-images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(rename = "MaHangHoa")]
    pub product_id: i32,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub url: String,
}

/// `{"rau-muong.jpg": 1, ...}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ImageMapping(BTreeMap<String, i32>);

impl ImageMapping {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Product for an image file: the first mapping key whose stem occurs in the
    /// lower-cased file name, so `Gao-ST25-1.JPG` still matches `gao-st25-1.jpg`.
    pub fn product_for(&self, file_name: &str) -> Option<i32> {
        if !is_supported_image(file_name) {
            return None;
        }
        let lowered = file_name.to_lowercase();
        self.0.iter().find_map(|(key, id)| {
            let key = key.to_lowercase();
            let stem = key.rsplit_once('.').map_or(key.as_str(), |(stem, _)| stem);
            lowered.contains(stem).then_some(*id)
        })
    }
}

impl FromIterator<(String, i32)> for ImageMapping {
    fn from_iter<T: IntoIterator<Item = (String, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Public id inside the image folder, stable per product so re-uploads overwrite.
pub fn public_id_for(product_id: i32) -> String {
    format!("product_{}", product_id)
}

pub fn write_results(path: &Path, uploaded: &[UploadedImage]) -> eyre::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(uploaded)?)?;
    Ok(())
}

pub fn read_results(path: &Path) -> eyre::Result<Vec<UploadedImage>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Detail documents to seed: a JSON array in the stored document shape.
///
/// Entries without a positive `MaHangHoa` are rejected.
pub fn read_details(path: &Path) -> eyre::Result<Vec<ProductDetail>> {
    let raw = std::fs::read_to_string(path)?;
    let details: Vec<ProductDetail> = serde_json::from_str(&raw)?;
    if let Some(position) = details.iter().position(|d| d.product_id <= 0) {
        eyre::bail!(
            "entry {} of {} has no MaHangHoa",
            position,
            path.display()
        );
    }
    Ok(details)
}
