//! Plain-text rendering of a [`CatalogViewModel`] snapshot.
//!
//! Renderers are stateless: every call reads the view-model and returns the
//! text to print.

use std::fmt::Write as _;
use std::str::FromStr;

use izerw_core::{
    Category, CategoryFilter, ConnectionStatus, Product, IMAGE_PLACEHOLDER_URL,
};

use crate::view_model::{CatalogViewModel, Phase};

/// Roughly two lines of list-mode description.
const DESCRIPTION_PREVIEW_CHARS: usize = 140;

/// Card layout for the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Multi-line cards.
    #[default]
    Grid,
    /// One row per product.
    List,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view mode \"{other}\" (expected grid or list)")),
        }
    }
}

/// The SKU as a bracketed badge, e.g. `[SC-E3-5]`.
#[must_use]
pub fn sku_badge(product: &Product) -> Option<String> {
    product
        .sku
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|sku| format!("[{sku}]"))
}

/// Multi-line card for grid mode.
#[must_use]
pub fn product_card(product: &Product) -> String {
    let mut card = format!("+ {}\n", product.title);
    if let Some(manufacturer) = &product.manufacturer {
        let _ = writeln!(card, "|  Manufacturer: {manufacturer}");
    }
    if let Some(category) = &product.category_name {
        let _ = writeln!(card, "|  Category: {category}");
    }
    if let Some(price) = product.formatted_price() {
        let _ = writeln!(card, "|  Price: {price}");
    }
    if let Some(badge) = sku_badge(product) {
        let _ = writeln!(card, "|  SKU: {badge}");
    }
    let _ = writeln!(card, "|  Image: {}", product.image_url_or_placeholder());
    let _ = writeln!(card, "|  Details: show {}", product.id);
    card
}

/// Row for list mode: the fields on one line, then up to two lines' worth
/// of description.
#[must_use]
pub fn product_row(product: &Product) -> String {
    let mut columns = vec![format!("#{} {}", product.id, product.title)];
    columns.extend(product.manufacturer.clone());
    columns.extend(product.category_name.clone());
    columns.extend(product.formatted_price());
    columns.extend(sku_badge(product));
    let mut row = columns.join(" | ");
    let description = product.description.as_deref().map(str::trim);
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        let _ = write!(
            row,
            "\n    {}",
            description_preview(description, DESCRIPTION_PREVIEW_CHARS)
        );
    }
    row
}

/// `text` cut at a word boundary to at most `max_chars` characters, with
/// `...` appended when anything was dropped.
#[must_use]
pub fn description_preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let head: String = text.chars().take(max_chars).collect();
    let cut = match head.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &head[..idx],
        _ => head.as_str(),
    };
    format!("{}...", cut.trim_end_matches(|c: char| c.is_whitespace() || c == ','))
}

/// Everything known about one product, for the shell's `show` command.
#[must_use]
pub fn product_detail(product: &Product) -> String {
    let mut out = format!("{}\n", product.title);
    let _ = writeln!(out, "  ID: {}", product.id);
    if let Some(manufacturer) = &product.manufacturer {
        let _ = writeln!(out, "  Manufacturer: {manufacturer}");
    }
    if let Some(category) = &product.category_name {
        let _ = writeln!(out, "  Category: {category}");
    }
    if let Some(price) = product.formatted_price() {
        let _ = writeln!(out, "  Price: {price}");
    }
    if let Some(badge) = sku_badge(product) {
        let _ = writeln!(out, "  SKU: {badge}");
    }
    match product.total_inventory() {
        Some(quantity) => {
            let _ = writeln!(out, "  In stock: {quantity}");
        }
        None => out.push_str("  In stock: not reported\n"),
    }
    if let Some(description) = &product.description {
        let _ = writeln!(out, "\n  {description}");
    }

    if !product.variants.is_empty() {
        out.push_str("\n  Variants:\n");
        for variant in &product.variants {
            let availability = if variant.available { "available" } else { "sold out" };
            let _ = write!(out, "    - {}", variant.id);
            if let Some(sku) = &variant.sku {
                let _ = write!(out, " [{sku}]");
            }
            let _ = write!(out, "  {availability}");
            if let Some(quantity) = variant.inventory_quantity {
                let _ = write!(out, ", {quantity} in stock");
            }
            out.push('\n');
        }
    }

    out.push_str("\n  Images:\n");
    if product.images.is_empty() {
        let _ = writeln!(out, "    * {IMAGE_PLACEHOLDER_URL} (placeholder)");
    }
    for image in &product.images {
        let _ = write!(out, "    * {}", image.url);
        if image.is_primary {
            out.push_str(" (primary)");
        }
        if let Some(alt) = &image.alt_text {
            let _ = write!(out, ": {alt}");
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn connection_badge(status: ConnectionStatus) -> &'static str {
    match (status.is_connected, status.using_live_data) {
        (true, true) => "LIVE Connected",
        (true, false) => "Connected (offline data)",
        (false, _) => "Disconnected",
    }
}

/// Previous/next controls and the "Page X of Y" label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: u32,
    pub total: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    #[must_use]
    pub fn from_view(view: &CatalogViewModel) -> Self {
        Self {
            current: view.current_page(),
            total: view.total_pages(),
            previous_enabled: view.has_previous_page(),
            next_enabled: view.has_next_page(),
        }
    }

    /// Hidden for single-page results.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }

    #[must_use]
    pub fn render(&self) -> String {
        let previous = if self.previous_enabled { "< prev" } else { "  ----" };
        let next = if self.next_enabled { "next >" } else { "----  " };
        format!("{previous}   {}   {next}", self.label())
    }
}

/// Category list with the current selection plus the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSidebar {
    pub selected: CategoryFilter,
    pub search: String,
}

impl FilterSidebar {
    #[must_use]
    pub fn from_view(view: &CatalogViewModel) -> Self {
        Self {
            selected: view.intent().category,
            search: view.intent().active_search().unwrap_or_default().to_owned(),
        }
    }

    /// "Clear All Filters" is offered once a category or search is active.
    #[must_use]
    pub fn can_clear(&self) -> bool {
        !self.selected.is_all() || !self.search.is_empty()
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("Categories\n");
        let options = std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.iter().copied().map(CategoryFilter::Only));
        for option in options {
            let marker = if option == self.selected { "(*)" } else { "( )" };
            let _ = writeln!(out, "  {marker} {option}");
        }
        let _ = writeln!(out, "Search: {}", self.search);
        if self.can_clear() {
            out.push_str("[clear] Clear All Filters\n");
        }
        out
    }
}

/// Summary line above the results.
#[must_use]
pub fn results_summary(view: &CatalogViewModel) -> String {
    let shown = view.products().len();
    if view.intent().is_search() {
        format!("{shown} products found")
    } else {
        format!("Showing {shown} of {} products", view.pagination().total)
    }
}

/// Full page: header, status line, results or state message, pagination.
#[must_use]
pub fn render_page(view: &CatalogViewModel, mode: ViewMode) -> String {
    let mut out = format!(
        "izerw Marine Hardware Catalog  [{}]\n",
        connection_badge(view.connection())
    );
    let intent = view.intent();
    match intent.active_search() {
        Some(query) => {
            let _ = writeln!(out, "Search: \"{query}\"");
        }
        None => {
            let _ = writeln!(out, "Category: {}", intent.category);
        }
    }
    out.push('\n');

    if view.is_searching() {
        out.push_str("Searching...\n");
        return out;
    }

    match view.phase() {
        Phase::Idle | Phase::Loading => out.push_str("Loading products...\n"),
        Phase::Error => {
            out.push_str("Failed to load products\n");
            if let Some(error) = view.error() {
                let _ = writeln!(out, "{}", error.message);
                let _ = writeln!(out, "  ({})", error.detail);
            }
            out.push_str("[retry] Try again\n");
        }
        Phase::Loaded if view.products().is_empty() => {
            out.push_str("No products found\n");
            out.push_str("Try adjusting your search or category filter.\n");
        }
        Phase::Loaded => {
            let _ = writeln!(out, "{}\n", results_summary(view));
            for product in view.products() {
                match mode {
                    ViewMode::Grid => {
                        out.push_str(&product_card(product));
                        out.push('\n');
                    }
                    ViewMode::List => {
                        out.push_str(&product_row(product));
                        out.push('\n');
                    }
                }
            }
            let controls = PaginationControls::from_view(view);
            if controls.is_visible() {
                let _ = writeln!(out, "\n{}", controls.render());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use izerw_core::{PageResult, Pagination, ProductImage, ProductVariant};
    use rust_decimal::Decimal;

    use super::*;
    use crate::error::CommerceError;
    use crate::view_model::Fetched;

    fn latch() -> Product {
        Product {
            id: "8812345".to_owned(),
            title: "Stainless Compression Latch".to_owned(),
            manufacturer: Some("Southco".to_owned()),
            category_name: Some("Marine Locks".to_owned()),
            sku: Some("SC-E3-5".to_owned()),
            description: None,
            price: Some(Decimal::from_str("42.5").unwrap()),
            display_price: None,
            images: vec![],
            variants: vec![],
        }
    }

    fn loaded_view(data: Vec<Product>, total: usize, total_pages: u32) -> CatalogViewModel {
        let mut view = CatalogViewModel::new(12);
        let request = view.reload();
        view.apply(
            &request,
            Ok(Fetched {
                page: PageResult {
                    data,
                    pagination: Pagination { total, total_pages },
                },
                connection: ConnectionStatus {
                    is_connected: true,
                    using_live_data: true,
                },
            }),
        );
        view
    }

    #[test]
    fn card_shows_every_field() {
        let card = product_card(&latch());
        assert!(card.contains("Stainless Compression Latch"));
        assert!(card.contains("Manufacturer: Southco"));
        assert!(card.contains("Category: Marine Locks"));
        assert!(card.contains("Price: $42.50"));
        assert!(card.contains("SKU: [SC-E3-5]"));
        assert!(card.contains(izerw_core::IMAGE_PLACEHOLDER_URL));
    }

    #[test]
    fn card_omits_missing_sku_and_uses_primary_image() {
        let mut product = latch();
        product.sku = None;
        product.images = vec![ProductImage {
            id: "1".to_owned(),
            url: "https://cdn.shopify.com/latch.jpg".to_owned(),
            alt_text: None,
            is_primary: true,
        }];
        let card = product_card(&product);
        assert!(!card.contains("SKU"));
        assert!(card.contains("https://cdn.shopify.com/latch.jpg"));
    }

    #[test]
    fn list_row_without_description_is_single_line() {
        let row = product_row(&latch());
        assert_eq!(
            row,
            "#8812345 Stainless Compression Latch | Southco | Marine Locks | $42.50 | [SC-E3-5]"
        );
    }

    #[test]
    fn list_row_shows_description_preview() {
        let mut product = latch();
        product.description = Some("Chrome bronze latch".to_owned());
        let row = product_row(&product);
        let lines: Vec<_> = row.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "    Chrome bronze latch");
    }

    #[test]
    fn list_row_truncates_long_description() {
        let mut product = latch();
        product.description = Some("Vibration resistant compression latch. ".repeat(10));
        let row = product_row(&product);
        let preview = row.lines().nth(1).expect("description line");
        assert!(preview.ends_with("..."), "got: {preview}");
        assert!(preview.trim().chars().count() <= DESCRIPTION_PREVIEW_CHARS + 3);
    }

    #[test]
    fn description_preview_cuts_at_word_boundary() {
        assert_eq!(description_preview("cam latch, keyed", 12), "cam latch...");
        assert_eq!(description_preview("  short  ", 12), "short");
    }

    #[test]
    fn card_links_to_details() {
        assert!(product_card(&latch()).contains("Details: show 8812345"));
    }

    #[test]
    fn detail_shows_stock_variants_and_image_alt_text() {
        let mut product = latch();
        product.description = Some("Chrome bronze latch".to_owned());
        product.variants = vec![
            ProductVariant {
                id: "41".to_owned(),
                sku: Some("SC-E3-5-BLK".to_owned()),
                inventory_quantity: Some(4),
                available: true,
            },
            ProductVariant {
                id: "42".to_owned(),
                sku: None,
                inventory_quantity: Some(0),
                available: false,
            },
        ];
        product.images = vec![ProductImage {
            id: "1".to_owned(),
            url: "https://cdn.shopify.com/latch.jpg".to_owned(),
            alt_text: Some("Latch, black finish".to_owned()),
            is_primary: true,
        }];

        let detail = product_detail(&product);
        assert!(detail.contains("In stock: 4"));
        assert!(detail.contains("Chrome bronze latch"));
        assert!(detail.contains("- 41 [SC-E3-5-BLK]  available, 4 in stock"));
        assert!(detail.contains("- 42  sold out, 0 in stock"));
        assert!(detail.contains("https://cdn.shopify.com/latch.jpg (primary): Latch, black finish"));
    }

    #[test]
    fn detail_without_stock_or_images() {
        let detail = product_detail(&latch());
        assert!(detail.contains("In stock: not reported"));
        assert!(detail.contains(IMAGE_PLACEHOLDER_URL));
        assert!(!detail.contains("Variants:"));
    }

    #[test]
    fn connection_badges() {
        assert_eq!(
            connection_badge(ConnectionStatus {
                is_connected: true,
                using_live_data: true
            }),
            "LIVE Connected"
        );
        assert_eq!(
            connection_badge(ConnectionStatus {
                is_connected: true,
                using_live_data: false
            }),
            "Connected (offline data)"
        );
        assert_eq!(
            connection_badge(ConnectionStatus::DISCONNECTED),
            "Disconnected"
        );
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!("LIST".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert_eq!("grid".parse::<ViewMode>().unwrap(), ViewMode::Grid);
        assert!("table".parse::<ViewMode>().is_err());
    }

    #[test]
    fn pagination_label_and_boundaries() {
        let mut view = loaded_view(vec![latch()], 50, 5);
        let request = view.set_page(2);
        view.apply(
            &request,
            Ok(Fetched {
                page: PageResult {
                    data: vec![latch()],
                    pagination: Pagination {
                        total: 50,
                        total_pages: 5,
                    },
                },
                connection: ConnectionStatus::default(),
            }),
        );
        let controls = PaginationControls::from_view(&view);
        assert_eq!(controls.label(), "Page 2 of 5");
        assert!(controls.previous_enabled);
        assert!(controls.next_enabled);
        assert!(controls.is_visible());

        let first = PaginationControls::from_view(&loaded_view(vec![latch()], 50, 5));
        assert!(!first.previous_enabled);
    }

    #[test]
    fn pagination_hidden_for_single_page() {
        let view = loaded_view(vec![latch()], 1, 1);
        assert!(!PaginationControls::from_view(&view).is_visible());
        assert!(!render_page(&view, ViewMode::Grid).contains("Page 1 of 1"));
    }

    #[test]
    fn sidebar_offers_clear_only_when_filtered() {
        let mut view = CatalogViewModel::new(12);
        assert!(!FilterSidebar::from_view(&view).can_clear());

        view.set_category(CategoryFilter::Only(Category::Hinges));
        let sidebar = FilterSidebar::from_view(&view);
        assert!(sidebar.can_clear());
        assert!(sidebar.render().contains("(*) Hinges"));
        assert!(sidebar.render().contains("( ) All Categories"));

        view.clear_filters();
        view.submit_search("cleat");
        assert!(FilterSidebar::from_view(&view).can_clear());
    }

    #[test]
    fn page_shows_summary_cards_and_pager() {
        let view = loaded_view(vec![latch(); 12], 50, 5);
        let page = render_page(&view, ViewMode::Grid);
        assert!(page.contains("[LIVE Connected]"));
        assert!(page.contains("Showing 12 of 50 products"));
        assert_eq!(page.matches("+ Stainless Compression Latch").count(), 12);
        assert!(page.contains("Page 1 of 5"));
    }

    #[test]
    fn page_shows_loading_and_searching_states() {
        let mut view = CatalogViewModel::new(12);
        view.reload();
        assert!(render_page(&view, ViewMode::Grid).contains("Loading products..."));
        view.submit_search("latch");
        let page = render_page(&view, ViewMode::Grid);
        assert!(page.contains("Searching..."));
        assert!(page.contains("Search: \"latch\""));
    }

    #[test]
    fn page_shows_error_with_retry() {
        let mut view = CatalogViewModel::new(12);
        let request = view.reload();
        view.apply(
            &request,
            Err(CommerceError::InvalidRequest("connection refused".to_owned())),
        );
        let page = render_page(&view, ViewMode::List);
        assert!(page.contains("[Disconnected]"));
        assert!(page.contains("Failed to load products"));
        assert!(page.contains("Failed to load products. Please try again."));
        assert!(page.contains("connection refused"));
        assert!(page.contains("[retry]"));
    }

    #[test]
    fn page_shows_empty_state() {
        let view = loaded_view(vec![], 0, 1);
        assert!(render_page(&view, ViewMode::Grid).contains("No products found"));
    }
}
