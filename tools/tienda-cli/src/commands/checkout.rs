//! Order placement.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use tienda_commerce::cart::Cart;
use tienda_commerce::checkout::Order;
use tienda_commerce::CommerceError;
use tienda_store::{CartStore, KeyValueStore};

use super::cart::print_cart;
use super::{confirm, CheckoutArgs};
use crate::context::Context;

/// Load the stored cart and check it can be ordered on `today`.
///
/// Delivery dates are checked against the day the order is placed, not the
/// day they were entered.
pub(crate) fn ready_cart<S: KeyValueStore>(
    store: &CartStore<S>,
    today: NaiveDate,
    min_days: i64,
) -> Result<Cart, CommerceError> {
    let cart = store.load()?;
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    if let Some(info) = &cart.shipping {
        info.validate_delivery_date(today, min_days)?;
    }
    Ok(cart)
}

/// Place the order for the stored cart and save the emptied cart.
pub(crate) fn place_order<S: KeyValueStore>(
    store: &CartStore<S>,
    today: NaiveDate,
    min_days: i64,
    placed_at: DateTime<Utc>,
) -> Result<Order, CommerceError> {
    let mut cart = ready_cart(store, today, min_days)?;
    let order = cart.checkout(placed_at)?;
    store.save(&cart)?;
    Ok(order)
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let cart = ready_cart(&store, ctx.today, ctx.min_delivery_days())?;

    ctx.output.header("Checkout");
    print_cart(&cart, ctx)?;

    let total = cart.totals()?.rounded().total;
    if !confirm(&format!("Place order for {}?", total.display()), args.yes)? {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    let order = place_order(&store, ctx.today, ctx.min_delivery_days(), Utc::now())?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!("Order {} placed", order.number));
    ctx.output.kv("items", &order.item_count().to_string());
    ctx.output
        .kv("total", &order.totals.rounded().total.display());
    match &order.shipping {
        Some(info) => ctx.output.kv(
            "delivery",
            &format!("{} to {}", info.delivery_date, info.address),
        ),
        None => ctx.output.kv("delivery", "pickup"),
    }
    Ok(())
}
