//! Delivery details.

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use tienda_commerce::checkout::{earliest_delivery_date, ShippingInfo};
use tienda_commerce::CommerceError;
use tienda_store::{CartStore, KeyValueStore};

use super::{confirm, ShippingArgs, ShippingCommand};
use crate::context::Context;

/// Run the shipping command.
pub async fn run(args: ShippingArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(ShippingCommand::Show) {
        ShippingCommand::Show => show_shipping(ctx),
        ShippingCommand::Set {
            name,
            address,
            email,
            date,
        } => set_shipping(ShippingInfo::new(name, address, email, date), ctx),
        ShippingCommand::Clear { yes } => clear_shipping(yes, ctx),
    }
}

fn earliest(ctx: &Context) -> NaiveDate {
    earliest_delivery_date(ctx.today, ctx.min_delivery_days())
}

/// Attach delivery details to the stored cart.
pub(crate) fn set_delivery<S: KeyValueStore>(
    store: &CartStore<S>,
    info: ShippingInfo,
    today: NaiveDate,
    min_days: i64,
) -> Result<(), CommerceError> {
    if !info.is_complete() {
        return Err(CommerceError::ValidationError(
            "name, address and email are required for delivery".to_string(),
        ));
    }
    store.update(|cart| cart.set_shipping(info, today, min_days))
}

/// Drop delivery details from the stored cart. Returns whether there were any.
pub(crate) fn clear_delivery<S: KeyValueStore>(store: &CartStore<S>) -> Result<bool, CommerceError> {
    store.update(|cart| Ok(cart.clear_shipping()))
}

fn show_shipping(ctx: &Context) -> Result<()> {
    let cart = ctx.cart_store()?.load()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "envio": cart.shipping,
            "earliest": earliest(ctx),
        }));
        return Ok(());
    }

    match &cart.shipping {
        Some(info) => ctx.output.shipping(info),
        None => ctx.output.info("No delivery details; the order will be picked up"),
    }
    ctx.output
        .kv("earliest delivery", &earliest(ctx).to_string());
    Ok(())
}

fn set_shipping(info: ShippingInfo, ctx: &Context) -> Result<()> {
    set_delivery(&ctx.cart_store()?, info.clone(), ctx.today, ctx.min_delivery_days())?;

    if ctx.output.is_json() {
        ctx.output.json(&info);
    } else {
        ctx.output.success(&format!(
            "Delivery to {} on {}",
            info.customer_name, info.delivery_date
        ));
    }
    Ok(())
}

fn clear_shipping(yes: bool, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    if store.load()?.shipping.is_none() {
        ctx.output.info("No delivery details to clear");
        return Ok(());
    }

    if !confirm("Remove delivery details?", yes)? {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    clear_delivery(&store)?;
    ctx.output.success("Delivery details removed");
    Ok(())
}
