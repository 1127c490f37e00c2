//! Product search.

use anyhow::Result;

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner(&format!("Searching \"{}\"...", args.text.trim()));
    let result = catalog.search(&args.text).await;
    spinner.finish_and_clear();
    let products = result?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.info(&format!("No products match \"{}\"", args.text.trim()));
        return Ok(());
    }

    ctx.output.header(&format!("{} product(s)", products.len()));
    ctx.output.products(&products);
    Ok(())
}
