//! Cart management commands.

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use tienda_commerce::cart::Cart;
use tienda_commerce::catalog::{Catalog, ProductSource};
use tienda_commerce::{CommerceError, LineId, ProductCode};
use tienda_store::{CartStore, KeyValueStore};

use super::{confirm, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(ctx),
        CartCommand::Add { code, quantity } => add_product(&code, quantity, ctx).await,
        CartCommand::Edit { line, quantity } => edit_line(LineId(line), quantity, ctx).await,
        CartCommand::Remove { line, yes } => remove_line(LineId(line), yes, ctx),
        CartCommand::Clear { yes } => clear_cart(yes, ctx),
    }
}

/// Print the cart in the active output mode.
pub(crate) fn print_cart(cart: &Cart, ctx: &Context) -> Result<()> {
    let totals = cart.totals()?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "cart": cart,
            "totals": totals,
            "rounded": totals.rounded(),
        }));
    } else {
        ctx.output.cart(cart, &totals);
    }
    Ok(())
}

/// Add `quantity` units of `code` and save the cart.
///
/// Stock is checked against what the line will hold after merging.
pub(crate) async fn add_to_cart<S: KeyValueStore, P: ProductSource>(
    store: &CartStore<S>,
    catalog: &Catalog<P>,
    code: &ProductCode,
    quantity: i64,
    today: NaiveDate,
) -> Result<(Cart, LineId), CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }

    let mut cart = store.load()?;
    let in_cart = cart.line_by_code(code).map(|l| l.quantity).unwrap_or(0);
    let wanted = in_cart
        .checked_add(quantity)
        .ok_or(CommerceError::Overflow)?;
    let product = catalog.validate(code, wanted, today).await?;

    let id = cart.add(product, quantity)?;
    store.save(&cart)?;
    Ok((cart, id))
}

/// Set a line's quantity and save the cart. Zero removes the line.
pub(crate) async fn edit_cart_line<S: KeyValueStore, P: ProductSource>(
    store: &CartStore<S>,
    catalog: &Catalog<P>,
    id: LineId,
    quantity: i64,
    today: NaiveDate,
) -> Result<Cart, CommerceError> {
    let mut cart = store.load()?;
    let code = cart
        .line(id)
        .map(|l| l.product.code.clone())
        .ok_or(CommerceError::LineNotFound(id.0))?;

    if quantity > 0 {
        catalog.validate(&code, quantity, today).await?;
    }
    cart.edit(id, quantity)?;
    store.save(&cart)?;
    Ok(cart)
}

/// Remove a line and save the cart.
pub(crate) fn remove_cart_line<S: KeyValueStore>(
    store: &CartStore<S>,
    id: LineId,
) -> Result<Cart, CommerceError> {
    store.update(|cart| {
        if cart.remove(id) {
            Ok(cart.clone())
        } else {
            Err(CommerceError::LineNotFound(id.0))
        }
    })
}

fn show_cart(ctx: &Context) -> Result<()> {
    let cart = ctx.cart_store()?.load()?;
    ctx.output.header(&format!("Cart ({} items)", cart.item_count()));
    print_cart(&cart, ctx)
}

async fn add_product(code: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let code = ProductCode::new(code.trim());
    let (cart, id) = add_to_cart(&ctx.cart_store()?, &ctx.catalog()?, &code, quantity, ctx.today).await?;

    let name = cart.line(id).map(|l| l.product.name.as_str()).unwrap_or_default();
    ctx.output
        .success(&format!("Added {} x {} (line {})", quantity, name, id));
    print_cart(&cart, ctx)
}

async fn edit_line(id: LineId, quantity: i64, ctx: &Context) -> Result<()> {
    let cart = edit_cart_line(&ctx.cart_store()?, &ctx.catalog()?, id, quantity, ctx.today).await?;

    if quantity == 0 {
        ctx.output.success(&format!("Removed line {}", id));
    } else {
        ctx.output
            .success(&format!("Line {} set to {} units", id, quantity));
    }
    print_cart(&cart, ctx)
}

fn remove_line(id: LineId, yes: bool, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let name = store
        .load()?
        .line(id)
        .map(|l| l.product.name.clone())
        .ok_or(CommerceError::LineNotFound(id.0))?;

    if !confirm(&format!("Remove line {} ({})?", id, name), yes)? {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    let cart = remove_cart_line(&store, id)?;
    ctx.output.success(&format!("Removed line {}", id));
    print_cart(&cart, ctx)
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let cart = store.load()?;
    if cart.is_empty() && cart.shipping.is_none() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !confirm(
        &format!("Clear the cart ({} items)?", cart.item_count()),
        yes,
    )? {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    store.clear()?;
    ctx.output.success("Cart cleared");
    print_cart(&Cart::default(), ctx)
}
