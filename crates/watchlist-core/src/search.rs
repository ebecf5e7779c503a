use tracing::info;
use watchlist_client::ApiClient;
use watchlist_models::{ModelError, SearchCategory, SearchQuery, SortKey};

use crate::panel::{QueryPanel, QueryResult, StalePolicy};

/// Search inputs. The sort key is always valid for the category: changing
/// category resets it to `az` unless a sort from the new vocabulary is given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchForm {
    term: String,
    category: SearchCategory,
    sort: SortKey,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn category(&self) -> SearchCategory {
        self.category
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Switch category and fall back to the shared default sort, since the
    /// previous key may not exist in the new vocabulary
    pub fn set_category(&mut self, category: SearchCategory) {
        self.category = category;
        self.sort = SortKey::default();
    }

    /// Switch category and sort together. Leaves the form untouched if the
    /// sort is not offered by `category`.
    pub fn set_category_with_sort(&mut self, category: SearchCategory, sort: SortKey) -> Result<(), ModelError> {
        ensure_allowed(category, sort)?;
        self.category = category;
        self.sort = sort;
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortKey) -> Result<(), ModelError> {
        ensure_allowed(self.category, sort)?;
        self.sort = sort;
        Ok(())
    }

    /// Sort choices for the current category
    pub fn sort_options(&self) -> &'static [SortKey] {
        self.category.sort_keys()
    }

    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            term: self.term.clone(),
            category: self.category,
            sort: self.sort,
        }
    }
}

fn ensure_allowed(category: SearchCategory, sort: SortKey) -> Result<(), ModelError> {
    if category.allows(sort) {
        Ok(())
    } else {
        Err(ModelError::SortNotInCategory {
            category: category.to_string(),
            sort: sort.to_string(),
        })
    }
}

/// Runs searches into a dismissible results panel
pub struct SearchController {
    client: ApiClient,
    panel: QueryPanel,
}

impl SearchController {
    pub fn new(client: ApiClient, policy: StalePolicy) -> Self {
        Self {
            client,
            panel: QueryPanel::new(policy),
        }
    }

    pub fn panel(&self) -> &QueryPanel {
        &self.panel
    }

    pub async fn search(&self, query: &SearchQuery) -> QueryResult {
        let request = self.panel.begin("");
        info!(
            term = %query.term,
            category = %query.category,
            sort = %query.sort,
            token = request.token(),
            "Searching"
        );

        let outcome = self.client.search(query).await;
        self.panel.complete(request, outcome);
        self.panel.snapshot()
    }

    pub async fn submit(&self, form: &SearchForm) -> QueryResult {
        self.search(&form.to_query()).await
    }

    /// Close the results panel. An in-flight search is not cancelled.
    pub fn dismiss(&self) {
        self.panel.dismiss();
    }
}
