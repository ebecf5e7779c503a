use super::ui::LoadingUI;
use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use watchlist_core::check_backend;

pub async fn run_status(ctx: &AppContext, output: &Output) -> Result<()> {
    let loading = LoadingUI::start(output, "");
    let status = check_backend(&ctx.client).await;
    loading.finish();

    output.backend_status(&status);
    if !status.is_healthy() {
        output.warn(format!("Backend at {} is not fully available", ctx.config.base_url()));
    }
    Ok(())
}
