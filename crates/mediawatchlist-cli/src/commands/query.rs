use super::ui::LoadingUI;
use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use watchlist_core::render::LOADING_TEXT;
use watchlist_core::QueryDispatcher;
use watchlist_models::CannedQuery;

/// Run reports one after another through a single results panel
pub async fn run_query(ctx: &AppContext, reports: &[CannedQuery], output: &Output) -> Result<()> {
    let dispatcher = QueryDispatcher::new(ctx.client.clone(), ctx.stale_policy());
    let mut failures = 0usize;

    for report in reports {
        let loading = LoadingUI::start(output, &format!("{}: {}", report.title(), LOADING_TEXT));
        let result = dispatcher.run_canned(*report).await;
        loading.finish();

        if result.error.is_some() {
            failures += 1;
        }
        output.query_result(&result, None);
    }

    if failures > 0 {
        tracing::warn!(failures, total = reports.len(), "Some reports failed");
        return Err(color_eyre::eyre::eyre!(
            "{} of {} report(s) failed",
            failures,
            reports.len()
        ));
    }
    Ok(())
}
