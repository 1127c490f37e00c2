//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use tienda_commerce::cart::{Cart, CartTotals};
use tienda_commerce::catalog::Product;
use tienda_commerce::checkout::ShippingInfo;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print products as a table.
    pub fn products(&self, products: &[Product]) {
        const WIDTHS: [usize; 5] = [14, 32, 12, 12, 6];
        self.table_row(&["CODE", "NAME", "NET", "PRICE", "STOCK"], &WIDTHS);
        for p in products {
            self.table_row(
                &[
                    p.code.as_str(),
                    &truncate(&p.name, WIDTHS[1]),
                    &p.net_price.display(),
                    &p.sale_price.display(),
                    &p.stock.to_string(),
                ],
                &WIDTHS,
            );
        }
    }

    /// Print the cart lines, shipping and totals.
    pub fn cart(&self, cart: &Cart, totals: &CartTotals) {
        if cart.is_empty() {
            self.info("Cart is empty");
        } else {
            const WIDTHS: [usize; 6] = [4, 14, 28, 12, 5, 12];
            self.table_row(&["#", "CODE", "NAME", "PRICE", "QTY", "TOTAL"], &WIDTHS);
            for line in &cart.lines {
                self.table_row(
                    &[
                        &line.id.to_string(),
                        line.product.code.as_str(),
                        &truncate(&line.product.name, WIDTHS[2]),
                        &line.product.sale_price.display(),
                        &line.quantity.to_string(),
                        &line.total.display(),
                    ],
                    &WIDTHS,
                );
            }
        }

        if let Some(info) = &cart.shipping {
            self.shipping(info);
        }
        self.totals(totals);
    }

    pub fn shipping(&self, info: &ShippingInfo) {
        self.header("Delivery");
        self.kv("name", &info.customer_name);
        self.kv("address", &info.address);
        self.kv("email", &info.email);
        self.kv("date", &info.delivery_date.to_string());
    }

    pub fn totals(&self, totals: &CartTotals) {
        let rounded = totals.rounded();
        self.header("Totals");
        self.kv("net", &format!("{} ({})", totals.net.display(), rounded.net.display()));
        self.kv("IVA", &format!("{} ({})", totals.iva.display(), rounded.iva.display()));
        self.kv("total", &format!("{} ({})", totals.total.display(), rounded.total.display()));
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
