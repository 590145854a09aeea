//! Catalog view-model: query intent, the current result set, and the
//! request-generation bookkeeping that keeps late responses from winning.
//!
//! Every mutating operation returns the [`FetchRequest`] it issued. The
//! caller runs it with [`execute`] and hands the outcome back to
//! [`CatalogViewModel::apply`]. [`crate::CatalogController`] wires the two
//! together for the single-task case.

use izerw_core::{
    Category, CategoryFilter, ConnectionStatus, PageResult, Pagination, Product, QueryIntent,
    SEARCH_RESULT_LIMIT,
};

use crate::commerce::CommerceClient;
use crate::error::CommerceError;

pub const LISTING_ERROR_MESSAGE: &str = "Failed to load products. Please try again.";
pub const SEARCH_ERROR_MESSAGE: &str = "Search failed. Please try again.";

/// What a fetch asks the commerce client for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    Listing {
        page: u32,
        page_size: u32,
        category: Option<Category>,
    },
    Search {
        query: String,
        limit: usize,
    },
}

impl FetchKind {
    #[must_use]
    pub fn is_search(&self) -> bool {
        matches!(self, FetchKind::Search { .. })
    }
}

/// A fetch stamped with the generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub kind: FetchKind,
}

/// A successful fetch plus the client's connection status right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub page: PageResult,
    pub connection: ConnectionStatus,
}

/// Runs `request` against `client`.
///
/// Search results come back as a single page: `total` is the match count and
/// `total_pages` is 1.
///
/// # Errors
///
/// Propagates the client's [`CommerceError`].
pub async fn execute<C>(client: &C, request: &FetchRequest) -> Result<Fetched, CommerceError>
where
    C: CommerceClient + ?Sized,
{
    let page = match &request.kind {
        FetchKind::Listing {
            page,
            page_size,
            category,
        } => client.get_products(*page, *page_size, None, *category).await?,
        FetchKind::Search { query, limit } => {
            let data = client.search_products(query, *limit).await?;
            PageResult {
                pagination: Pagination {
                    total: data.len(),
                    total_pages: 1,
                },
                data,
            }
        }
    };
    Ok(Fetched {
        page,
        connection: client.connection_status(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// A listing fetch is in flight.
    Loading,
    Loaded,
    Error,
}

/// A failed fetch as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: &'static str,
    /// Underlying error text.
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Settled {
    Idle,
    Loaded,
    Error(ErrorState),
}

#[derive(Debug, Clone)]
pub struct CatalogViewModel {
    page_size: u32,
    intent: QueryIntent,
    result: PageResult,
    total_pages: u32,
    settled: Settled,
    /// Kind of the latest request while it is unresolved.
    pending: Option<FetchKind>,
    connection: ConnectionStatus,
    generation: u64,
}

impl CatalogViewModel {
    /// A view-model on page 1 of all categories. A `page_size` of 0 is
    /// treated as 1.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            intent: QueryIntent::default(),
            result: PageResult::default(),
            total_pages: 1,
            settled: Settled::Idle,
            pending: None,
            connection: ConnectionStatus::DISCONNECTED,
            generation: 0,
        }
    }

    // -----------------------------------------------------------------------
    // operations
    // -----------------------------------------------------------------------

    /// Selects a category, dropping any active search.
    pub fn set_category(&mut self, filter: CategoryFilter) -> FetchRequest {
        self.intent.category = filter;
        self.intent.search = None;
        self.intent.page = 1;
        self.issue()
    }

    /// Jumps to page `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: u32) -> FetchRequest {
        self.intent.page = page.clamp(1, self.total_pages);
        self.issue()
    }

    /// `None` on the last page.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.has_next_page().then(|| self.set_page(self.intent.page + 1))
    }

    /// `None` on page 1.
    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        self.has_previous_page().then(|| self.set_page(self.intent.page - 1))
    }

    /// Starts a search, or clears it when `query` is blank. Either way the
    /// page resets to 1; a search also collapses pagination to one page.
    pub fn submit_search(&mut self, query: &str) -> FetchRequest {
        let query = query.trim();
        self.intent.page = 1;
        if query.is_empty() {
            self.intent.search = None;
        } else {
            self.intent.search = Some(query.to_owned());
            self.total_pages = 1;
        }
        self.issue()
    }

    /// Resets to all categories with no search.
    pub fn clear_filters(&mut self) -> FetchRequest {
        self.intent = QueryIntent::default();
        self.issue()
    }

    /// Re-issues the fetch for the current intent.
    pub fn reload(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Reconciles the outcome of `request`. Returns `false`, leaving state
    /// untouched, when a newer request has been issued since.
    pub fn apply(
        &mut self,
        request: &FetchRequest,
        outcome: Result<Fetched, CommerceError>,
    ) -> bool {
        if request.generation != self.generation {
            tracing::debug!(
                stale = request.generation,
                latest = self.generation,
                "discarding superseded response"
            );
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(fetched) => {
                self.total_pages = if request.kind.is_search() {
                    1
                } else {
                    fetched.page.pagination.total_pages.max(1)
                };
                self.intent.page = self.intent.page.clamp(1, self.total_pages);
                self.result = fetched.page;
                self.settled = Settled::Loaded;
                self.connection = ConnectionStatus {
                    is_connected: true,
                    using_live_data: fetched.connection.using_live_data,
                };
            }
            Err(e) => {
                let message = if request.kind.is_search() {
                    SEARCH_ERROR_MESSAGE
                } else {
                    LISTING_ERROR_MESSAGE
                };
                tracing::warn!(error = %e, generation = request.generation, "catalog fetch failed");
                self.result = PageResult::default();
                self.settled = Settled::Error(ErrorState {
                    message,
                    detail: e.to_string(),
                });
                self.connection = ConnectionStatus::DISCONNECTED;
            }
        }
        true
    }

    fn issue(&mut self) -> FetchRequest {
        self.generation += 1;
        let kind = match self.intent.active_search() {
            Some(query) => FetchKind::Search {
                query: query.to_owned(),
                limit: SEARCH_RESULT_LIMIT,
            },
            None => FetchKind::Listing {
                page: self.intent.page,
                page_size: self.page_size,
                category: self.intent.category.category(),
            },
        };
        tracing::debug!(generation = self.generation, ?kind, "issuing catalog fetch");
        self.pending = Some(kind.clone());
        FetchRequest {
            generation: self.generation,
            kind,
        }
    }

    // -----------------------------------------------------------------------
    // state
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (&self.pending, &self.settled) {
            (Some(FetchKind::Listing { .. }), _) => Phase::Loading,
            (_, Settled::Idle) => Phase::Idle,
            (_, Settled::Loaded) => Phase::Loaded,
            (_, Settled::Error(_)) => Phase::Error,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.pending, Some(FetchKind::Listing { .. }))
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        matches!(self.pending, Some(FetchKind::Search { .. }))
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorState> {
        match &self.settled {
            Settled::Error(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn intent(&self) -> &QueryIntent {
        &self.intent
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.result.data
    }

    /// A product on the current page by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.result.data.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.result.pagination
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.intent.page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.intent.page < self.total_pages
    }

    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.intent.page > 1
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    /// Generation of the most recently issued request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[path = "view_model_test.rs"]
mod tests;
