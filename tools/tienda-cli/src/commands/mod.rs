//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod lookup;
pub mod search;
pub mod shipping;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::Confirm;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Product name, code fragment or barcode (at least 3 characters).
    pub text: String,
}

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// Product code.
    pub code: String,

    /// Check the product can be sold in this quantity today.
    #[arg(short, long)]
    pub quantity: Option<i64>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show lines and totals.
    Show,
    /// Add a product.
    Add {
        /// Product code.
        code: String,
        /// Units to add.
        #[arg(default_value = "1", allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Change the quantity of a line (0 removes it).
    Edit {
        /// Line number.
        line: u32,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Line number.
        line: u32,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Empty the cart, delivery details included.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the shipping command.
#[derive(Args)]
pub struct ShippingArgs {
    #[command(subcommand)]
    pub command: Option<ShippingCommand>,
}

#[derive(Subcommand)]
pub enum ShippingCommand {
    /// Show delivery details.
    Show,
    /// Set delivery details.
    Set {
        /// Customer name.
        #[arg(long)]
        name: String,
        /// Delivery address.
        #[arg(long)]
        address: String,
        /// Customer email.
        #[arg(long)]
        email: String,
        /// Delivery date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
    },
    /// Remove delivery details.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Ask before a destructive action unless `yes` was given.
pub(crate) fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
