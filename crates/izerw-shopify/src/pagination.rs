//! Cursor pagination for `products.json` via the `Link` response header.
//!
//! Each response carries the URLs of adjacent pages in a `Link` header; the
//! cursor is the `page_info` query parameter of the `rel="next"` URL:
//!
//! ```text
//! <https://shop.com/products.json?limit=250&page_info=PREV>; rel="previous",
//! <https://shop.com/products.json?limit=250&page_info=NEXT>; rel="next"
//! ```

/// Returns the `page_info` cursor of the `rel="next"` link, or `None` when
/// there is no header, no next link, or no cursor in the next URL.
#[must_use]
pub fn extract_next_cursor(link_header: Option<&str>) -> Option<String> {
    link_header?
        .split(',')
        .map(str::trim)
        .find(|directive| is_next_relation(directive))
        .and_then(link_target)
        .and_then(|target| page_info_param(target))
}

/// Checks the `rel` parameters of one link directive for `next`.
fn is_next_relation(directive: &str) -> bool {
    directive.split(';').skip(1).any(|param| {
        let param = param.trim();
        param
            .strip_prefix("rel=")
            .map(|rel| rel.trim_matches('"'))
            .is_some_and(|rel| rel.split_whitespace().any(|r| r == "next"))
    })
}

/// The URL between `<` and `>` in a link directive.
fn link_target(directive: &str) -> Option<&str> {
    let start = directive.find('<')? + 1;
    let end = directive.find('>')?;
    directive.get(start..end).filter(|s| !s.is_empty())
}

fn page_info_param(target: &str) -> Option<String> {
    let url = reqwest::Url::parse(target).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page_info")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
