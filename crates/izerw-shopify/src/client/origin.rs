//! Storefront origin and host helpers.

/// Scheme + host of a storefront URL, so `products.json` is always requested
/// from the store root even when the configured URL points at a collection.
///
/// `"https://izerw-marine.myshopify.com/collections/all"` becomes
/// `"https://izerw-marine.myshopify.com"`.
#[must_use]
pub fn extract_store_origin(shop_url: &str) -> String {
    reqwest::Url::parse(shop_url).map_or_else(
        |e| {
            tracing::warn!(
                shop_url,
                error = %e,
                "shop URL does not parse, deriving origin by splitting on '/'"
            );
            shop_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Host name for error messages; the input itself when it does not parse.
pub(super) fn extract_domain(shop_url: &str) -> String {
    reqwest::Url::parse(shop_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| shop_url.to_owned())
}
