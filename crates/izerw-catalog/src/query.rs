//! Listing and search evaluation over an in-memory product list.
//!
//! Both [`crate::ShopifyCommerce`] and [`crate::FixtureCommerce`] hold the
//! whole catalog, so paging and filtering happen here rather than upstream.

use izerw_core::{Category, PageResult, Pagination, Product};

use crate::error::CommerceError;

/// True when the product's category name is `category`'s display name,
/// ignoring case.
#[must_use]
pub fn matches_category(product: &Product, category: Category) -> bool {
    product
        .category_name
        .as_deref()
        .is_some_and(|name| category.matches(name))
}

/// True when every whitespace-separated token of `query` occurs in one of the
/// product's searchable fields. A blank query matches everything.
#[must_use]
pub fn matches_search(product: &Product, query: &str) -> bool {
    let haystack = searchable_text(product);
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|token| haystack.contains(&token))
}

fn searchable_text(product: &Product) -> String {
    let mut fields: Vec<&str> = vec![product.title.as_str()];
    fields.extend(product.sku.as_deref());
    fields.extend(product.variants.iter().filter_map(|v| v.sku.as_deref()));
    fields.extend(product.manufacturer.as_deref());
    fields.extend(product.category_name.as_deref());
    fields.extend(product.description.as_deref());
    fields.join("\n").to_lowercase()
}

/// Filters `products` and cuts out page `page` of size `page_size`.
///
/// `total` counts all matches; `total_pages` is at least 1 so an empty
/// result still reads "Page 1 of 1". A page past the end is empty.
///
/// # Errors
///
/// Returns [`CommerceError::InvalidRequest`] if `page` or `page_size` is 0.
pub fn list_page(
    products: &[Product],
    page: u32,
    page_size: u32,
    search: Option<&str>,
    category: Option<Category>,
) -> Result<PageResult, CommerceError> {
    if page == 0 {
        return Err(CommerceError::InvalidRequest(
            "page numbers start at 1".to_owned(),
        ));
    }
    if page_size == 0 {
        return Err(CommerceError::InvalidRequest(
            "page size must be at least 1".to_owned(),
        ));
    }

    let search = search.map(str::trim).filter(|s| !s.is_empty());
    let matching: Vec<&Product> = products
        .iter()
        .filter(|p| category.is_none_or(|c| matches_category(p, c)))
        .filter(|p| search.is_none_or(|q| matches_search(p, q)))
        .collect();

    let size = page_size as usize;
    let total = matching.len();
    let total_pages = u32::try_from(total.div_ceil(size))
        .unwrap_or(u32::MAX)
        .max(1);
    let start = (page as usize - 1).saturating_mul(size);

    let data = matching
        .into_iter()
        .skip(start)
        .take(size)
        .cloned()
        .collect();

    Ok(PageResult {
        data,
        pagination: Pagination { total, total_pages },
    })
}

/// Up to `limit` products matching `query`, in catalog order.
#[must_use]
pub fn search(products: &[Product], query: &str, limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches_search(p, query))
        .take(limit)
        .cloned()
        .collect()
}
