use crate::commerce::CommerceClient;
use crate::view_model::{execute, CatalogViewModel, FetchRequest};

use izerw_core::CategoryFilter;

/// Drives a [`CatalogViewModel`] against one commerce client: each operation
/// issues a fetch, awaits it, and applies the outcome.
pub struct CatalogController<C> {
    client: C,
    view: CatalogViewModel,
}

impl<C: CommerceClient> CatalogController<C> {
    #[must_use]
    pub fn new(client: C, page_size: u32) -> Self {
        Self {
            client,
            view: CatalogViewModel::new(page_size),
        }
    }

    #[must_use]
    pub fn view(&self) -> &CatalogViewModel {
        &self.view
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Initial fetch for the current intent.
    pub async fn load(&mut self) {
        let request = self.view.reload();
        self.run(request).await;
    }

    pub async fn set_category(&mut self, filter: CategoryFilter) {
        let request = self.view.set_category(filter);
        self.run(request).await;
    }

    pub async fn set_page(&mut self, page: u32) {
        let request = self.view.set_page(page);
        self.run(request).await;
    }

    /// Returns `false` without fetching when already on the last page.
    pub async fn next_page(&mut self) -> bool {
        match self.view.next_page() {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Returns `false` without fetching when already on page 1.
    pub async fn previous_page(&mut self) -> bool {
        match self.view.previous_page() {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    pub async fn submit_search(&mut self, query: &str) {
        let request = self.view.submit_search(query);
        self.run(request).await;
    }

    pub async fn clear_filters(&mut self) {
        let request = self.view.clear_filters();
        self.run(request).await;
    }

    /// Retries the current query.
    pub async fn reload(&mut self) {
        let request = self.view.reload();
        self.run(request).await;
    }

    async fn run(&mut self, request: FetchRequest) {
        let outcome = execute(&self.client, &request).await;
        self.view.apply(&request, outcome);
    }
}
