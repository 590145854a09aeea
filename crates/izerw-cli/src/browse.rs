//! One-shot catalog commands: `browse`, `search`, `categories`, `status`.

use izerw_catalog::present::{connection_badge, render_page};
use izerw_catalog::{CatalogController, CommerceClient, ViewMode};
use izerw_core::{AppConfig, Category, CategoryFilter};

/// Print one page of a category listing.
///
/// The category is loaded first so the requested page can be clamped to the
/// real page count.
///
/// # Errors
///
/// Returns an error if the catalog could not be loaded; the error page is
/// printed first.
pub(crate) async fn run_browse(
    client: Box<dyn CommerceClient>,
    page_size: u32,
    category: CategoryFilter,
    page: u32,
    view: ViewMode,
) -> anyhow::Result<()> {
    let mut controller = CatalogController::new(client, page_size);
    controller.set_category(category).await;
    if page > 1 && controller.view().error().is_none() {
        controller.set_page(page).await;
    }
    finish(&controller, view)
}

/// Print the results of a free-text search.
///
/// # Errors
///
/// Returns an error if the search failed.
pub(crate) async fn run_search(
    client: Box<dyn CommerceClient>,
    page_size: u32,
    query: &str,
    view: ViewMode,
) -> anyhow::Result<()> {
    let mut controller = CatalogController::new(client, page_size);
    controller.submit_search(query).await;
    finish(&controller, view)
}

pub(crate) fn run_categories() {
    for category in Category::ALL {
        println!("{:<16}{}", category.slug(), category.display_name());
    }
}

/// Load the first page and report connectivity.
///
/// # Errors
///
/// Returns an error if the catalog could not be loaded.
pub(crate) async fn run_status(
    client: Box<dyn CommerceClient>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut controller = CatalogController::new(client, config.page_size);
    controller.load().await;
    let view = controller.view();

    let source = match (&config.fixture_path, &config.shop_url) {
        (Some(path), _) => format!("fixture {}", path.display()),
        (None, Some(url)) => url.clone(),
        (None, None) => "none".to_string(),
    };
    println!("connection:  {}", connection_badge(view.connection()));
    println!("source:      {source}");
    println!("environment: {}", config.env);
    println!("page size:   {}", view.page_size());

    if let Some(error) = view.error() {
        anyhow::bail!("{}: {}", error.message, error.detail);
    }
    println!("products:    {}", view.pagination().total);
    println!("pages:       {}", view.total_pages());
    Ok(())
}

fn finish<C: CommerceClient>(
    controller: &CatalogController<C>,
    view: ViewMode,
) -> anyhow::Result<()> {
    print!("{}", render_page(controller.view(), view));
    match controller.view().error() {
        Some(error) => anyhow::bail!("{}", error.detail),
        None => Ok(()),
    }
}
