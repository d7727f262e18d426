//! Sales statistics derived from a single aggregation snapshot.

use serde::Serialize;

/// Raw aggregates returned by one round trip to the order store.
///
/// All four values come from the same query so they describe one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderTotals {
    pub order_count: i64,
    pub order_amount: f64,
    pub sale_count: i64,
    pub sale_amount: f64,
}

/// Summary figures shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_orders: i64,
    pub total_order_amount: f64,
    pub total_sales: i64,
    pub total_sales_amount: f64,
    pub average_sale_amount: f64,
}

impl OrderStats {
    /// Derives the dashboard figures from raw totals.
    ///
    /// Sums are rounded to cents first; the average divides the rounded sales
    /// amount and is zero when there are no sales.
    pub fn from_totals(totals: OrderTotals) -> Self {
        let total_order_amount = round_currency(totals.order_amount);
        let total_sales_amount = round_currency(totals.sale_amount);

        let average_sale_amount = if totals.sale_count > 0 {
            round_currency(total_sales_amount / totals.sale_count as f64)
        } else {
            0.0
        };

        Self {
            total_orders: totals.order_count,
            total_order_amount,
            total_sales: totals.sale_count,
            total_sales_amount,
            average_sale_amount,
        }
    }
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_currency(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}
