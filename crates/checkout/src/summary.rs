use serde::Serialize;

use fastchow_cart::CartSnapshot;
use fastchow_core::{ProductId, Xlm};

/// Flat placeholder network fee: 0.00001 XLM.
pub const TRANSACTION_FEE: Xlm = Xlm::from_stroops(100);

/// Decimals for subtotal, fee and total lines.
pub const SUMMARY_DECIMALS: u32 = 5;

/// Decimals for per-item subtotals.
pub const LINE_DECIMALS: u32 = 2;

/// `"{amount} XLM"` with a fixed number of decimals.
pub fn format_xlm(amount: Xlm, decimals: u32) -> String {
    format!("{} XLM", amount.format_fixed(decimals))
}

/// One order-summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: &'static str,
    pub quantity: u64,
    pub subtotal: Xlm,
}

impl SummaryLine {
    pub fn formatted_subtotal(&self) -> String {
        format_xlm(self.subtotal, LINE_DECIMALS)
    }
}

/// Checkout figures derived from one cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: Xlm,
    pub fee: Xlm,
    pub total: Xlm,
    /// Cart version the summary was computed from.
    pub cart_version: u64,
}

impl CheckoutSummary {
    pub fn from_snapshot(snapshot: &CartSnapshot) -> Self {
        let lines = snapshot
            .items
            .iter()
            .map(|item| SummaryLine {
                product_id: item.product.id,
                name: item.product.name,
                quantity: item.quantity,
                subtotal: item.line_total(),
            })
            .collect();

        Self {
            lines,
            subtotal: snapshot.total_price,
            fee: TRANSACTION_FEE,
            total: snapshot.total_price + TRANSACTION_FEE,
            cart_version: snapshot.version,
        }
    }

    /// Nothing to pay for; the storefront sends the visitor back to the cart.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn formatted_subtotal(&self) -> String {
        format_xlm(self.subtotal, SUMMARY_DECIMALS)
    }

    pub fn formatted_fee(&self) -> String {
        format_xlm(self.fee, SUMMARY_DECIMALS)
    }

    pub fn formatted_total(&self) -> String {
        format_xlm(self.total, SUMMARY_DECIMALS)
    }
}
