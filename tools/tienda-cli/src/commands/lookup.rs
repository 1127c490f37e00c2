//! Single product lookup.

use anyhow::Result;

use tienda_commerce::ProductCode;

use super::LookupArgs;
use crate::context::Context;

/// Run the lookup command.
pub async fn run(args: LookupArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let code = ProductCode::new(args.code.trim());

    let product = match args.quantity {
        Some(quantity) => catalog.validate(&code, quantity, ctx.today).await?,
        None => catalog.lookup(&code).await?,
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("code", product.code.as_str());
    ctx.output.kv("net", &product.net_price.display());
    ctx.output.kv("price", &product.sale_price.display());
    ctx.output.kv("stock", &product.stock.to_string());
    ctx.output.kv("expires", &product.expires_on.to_string());

    if product.is_expired_on(ctx.today) {
        ctx.output.warn(&format!(
            "Expired {} days ago",
            product.days_expired(ctx.today)
        ));
    }
    if let Some(quantity) = args.quantity {
        ctx.output.success(&format!("{} units can be sold", quantity));
    }
    Ok(())
}
