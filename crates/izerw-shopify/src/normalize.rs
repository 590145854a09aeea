//! Conversion from raw `products.json` shapes to [`izerw_core::Product`].

use std::str::FromStr;

use izerw_core::{Product, ProductImage, ProductVariant};
use rust_decimal::Decimal;

use crate::error::ShopifyError;
use crate::types::{ShopifyImage, ShopifyProduct, ShopifyVariant};

/// Normalizes a raw [`ShopifyProduct`] into a catalog [`Product`].
///
/// - `vendor` becomes the manufacturer, `product_type` the category name
///   (empty strings are treated as absent).
/// - Price comes from the default variant: position 1, else the first.
/// - The product SKU is the first non-empty variant SKU.
/// - The featured image (matched by id) is flagged primary; without one,
///   the position-1 or first gallery image is.
///
/// # Errors
///
/// Returns [`ShopifyError::Normalization`] if the product has no variants or
/// the default variant's price is not a decimal.
pub fn normalize_product(product: ShopifyProduct) -> Result<Product, ShopifyError> {
    let product_id = product.id.to_string();

    let default_index = product
        .variants
        .iter()
        .position(|v| v.position == Some(1))
        .unwrap_or(0);
    let default_variant =
        product
            .variants
            .get(default_index)
            .ok_or_else(|| ShopifyError::Normalization {
                product_id: product_id.clone(),
                reason: "product has no variants".into(),
            })?;

    let price = parse_price(default_variant, &product_id)?;

    let sku = product
        .variants
        .iter()
        .find_map(|v| non_empty(v.sku.as_deref()))
        .map(str::to_owned);

    let description = product
        .body_html
        .as_deref()
        .map(strip_html)
        .filter(|text| !text.is_empty());

    let featured_id = product.image.as_ref().and_then(|img| img.id);
    let images = normalize_images(&product.images, featured_id);

    let variants = product.variants.iter().map(normalize_variant).collect();

    Ok(Product {
        id: product_id,
        title: product.title,
        manufacturer: product.vendor.filter(|s| !s.trim().is_empty()),
        category_name: product.product_type.filter(|s| !s.trim().is_empty()),
        sku,
        description,
        price: Some(price),
        display_price: None,
        images,
        variants,
    })
}

fn parse_price(variant: &ShopifyVariant, product_id: &str) -> Result<Decimal, ShopifyError> {
    Decimal::from_str(variant.price.trim()).map_err(|e| ShopifyError::Normalization {
        product_id: product_id.to_owned(),
        reason: format!("variant {} has invalid price {:?}: {e}", variant.id, variant.price),
    })
}

fn normalize_variant(variant: &ShopifyVariant) -> ProductVariant {
    ProductVariant {
        id: variant.id.to_string(),
        sku: non_empty(variant.sku.as_deref()).map(str::to_owned),
        inventory_quantity: variant.inventory_quantity,
        available: variant.available,
    }
}

fn normalize_images(images: &[ShopifyImage], featured_id: Option<i64>) -> Vec<ProductImage> {
    let primary_index = featured_id
        .and_then(|id| images.iter().position(|img| img.id == Some(id)))
        .or_else(|| images.iter().position(|img| img.position == Some(1)))
        .unwrap_or(0);

    images
        .iter()
        .enumerate()
        .map(|(idx, img)| ProductImage {
            id: img
                .id
                .map_or_else(|| format!("image-{}", idx + 1), |id| id.to_string()),
            url: img.src.clone(),
            alt_text: non_empty(img.alt.as_deref()).map(str::to_owned),
            is_primary: idx == primary_index,
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Drops HTML tags, decodes the common entities, and collapses whitespace.
fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
