use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{FilePart, MultipartForm};

use super::de;

/// Multipart field carrying the dish image.
const IMAGE_FIELD: &str = "image";

/// Wire shape of a dish. Older backends used `MealID` or `id` instead of `DishID`.
#[derive(Debug, Deserialize)]
struct DishRecord {
    #[serde(rename = "DishID", default, deserialize_with = "de::opt_i64_from_any")]
    dish_id: Option<i64>,
    #[serde(rename = "MealID", default, deserialize_with = "de::opt_i64_from_any")]
    meal_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64_from_any")]
    id: Option<i64>,
    #[serde(rename = "Name", alias = "name", default)]
    name: Option<String>,
    #[serde(rename = "Price", alias = "price", default, deserialize_with = "de::f64_from_any")]
    price: f64,
    #[serde(rename = "Image", alias = "image", default)]
    image: Option<String>,
    #[serde(rename = "Ingredients", alias = "ingredients", default)]
    ingredients: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DishRecord")]
pub struct Dish {
    #[serde(rename = "DishID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Price")]
    pub price: f64,
    /// Server-relative image path, e.g. `uploads/gyoza.jpg`
    #[serde(rename = "Image")]
    pub image: Option<String>,
    #[serde(rename = "Ingredients")]
    pub ingredients: Option<String>,
}

impl TryFrom<DishRecord> for Dish {
    type Error = String;

    fn try_from(record: DishRecord) -> Result<Self, Self::Error> {
        let id = record
            .dish_id
            .or(record.meal_id)
            .or(record.id)
            .ok_or_else(|| "dish without DishID".to_string())?;
        Ok(Self {
            id,
            name: record.name,
            price: record.price,
            image: record.image.filter(|i| !i.trim().is_empty()),
            ingredients: record.ingredients.or(record.description),
        })
    }
}

impl Dish {
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("Dish #{}", self.id),
        }
    }

    /// Absolute image URL, resolving server-relative paths against `server_root`.
    pub fn image_url(&self, server_root: &str) -> Option<String> {
        let image = self.image.as_deref()?.replace('\\', "/");
        if image.starts_with("http://") || image.starts_with("https://") {
            return Some(image);
        }
        Some(format!(
            "{}/{}",
            server_root.trim_end_matches('/'),
            image.trim_start_matches('/')
        ))
    }
}

/// Image file attached to a dish form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(Self {
            mime: mime_for(&file_name).to_string(),
            file_name,
            bytes,
        })
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Fields submitted when creating or editing a dish.
#[derive(Debug, Clone)]
pub struct DishForm {
    pub name: String,
    pub price: f64,
    pub ingredients: String,
    /// Required on create; on update the existing image is kept when absent.
    pub image: Option<ImageUpload>,
}

impl DishForm {
    pub fn validate(&self, creating: bool) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Dish name is required".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a positive number".to_string());
        }
        if creating && self.image.is_none() {
            return Err("An image is required for a new dish".to_string());
        }
        Ok(())
    }

    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("Name", self.name.trim())
            .text("Price", self.price.to_string())
            .text("Ingredients", self.ingredients.trim());
        if let Some(ref image) = self.image {
            form = form.file(FilePart {
                field: IMAGE_FIELD.to_string(),
                file_name: image.file_name.clone(),
                mime: image.mime.clone(),
                bytes: image.bytes.clone(),
            });
        }
        form
    }
}
