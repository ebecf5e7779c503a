use super::ui::LoadingUI;
use crate::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchlist_core::{SearchController, SearchForm};
use watchlist_models::{SearchCategory, SortKey};

pub async fn run_search(
    ctx: &AppContext,
    term: String,
    category: SearchCategory,
    sort: Option<SortKey>,
    output: &Output,
) -> Result<()> {
    let mut form = SearchForm::new();
    form.set_term(term);
    form.set_category(category);
    if let Some(sort) = sort {
        if let Err(e) = form.set_sort(sort) {
            return Err(eyre!("{}. Valid sorts for {}: {}", e, category, sort_choices(category)));
        }
    }

    let controller = SearchController::new(ctx.client.clone(), ctx.stale_policy());
    let loading = LoadingUI::start(output, "");
    let result = controller.submit(&form).await;
    loading.finish();

    let label = result.panel_label();
    output.query_result(&result, Some(&label));

    if result.error.is_some() {
        return Err(eyre!("Search failed"));
    }
    Ok(())
}

/// `key (label)` for every sort the category offers
fn sort_choices(category: SearchCategory) -> String {
    category
        .sort_keys()
        .iter()
        .map(|sort| format!("{} ({})", sort, category.sort_label(*sort)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_choices_use_category_labels() {
        assert_eq!(
            sort_choices(SearchCategory::User),
            "az (A-Z), za (Z-A), count_desc (Most Reviews), count_asc (Least Reviews)"
        );
        let genre = sort_choices(SearchCategory::Genre);
        assert!(genre.contains("count_desc (Most Media)"));
        assert!(genre.contains("rating_desc (Highest Avg Rating)"));
    }
}
