//! Order entity and status vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an order.
///
/// Stored as lowercase text in the `orders.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Paid,
    Canceled,
    Refunded,
}

impl OrderStatus {
    /// Every known status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Paid,
        OrderStatus::Canceled,
        OrderStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Paid => "paid",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is not part of the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A purchase record as seen by the reporting layer.
///
/// Orders are owned by the order-management system; this service only reads
/// them. A missing `amount` counts as zero in every sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: i64,
        status: OrderStatus,
        amount: Option<f64>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            status,
            amount,
            created_at,
            updated_at,
        }
    }
}

/// Statuses that count toward sales figures.
///
/// Always non-empty. Defaults to `{paid}`; configured through `SALE_STATUSES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleStatuses(Vec<OrderStatus>);

impl SaleStatuses {
    /// Builds a set from the given statuses, dropping duplicates.
    ///
    /// Returns `None` when the list is empty.
    pub fn new(statuses: impl IntoIterator<Item = OrderStatus>) -> Option<Self> {
        let mut unique: Vec<OrderStatus> = Vec::new();
        for status in statuses {
            if !unique.contains(&status) {
                unique.push(status);
            }
        }

        if unique.is_empty() {
            None
        } else {
            Some(Self(unique))
        }
    }

    /// Parses a comma-separated list such as `"paid, refunded"`.
    pub fn parse(list: &str) -> Result<Self, UnknownStatus> {
        let statuses = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(OrderStatus::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(statuses).ok_or_else(|| UnknownStatus(list.to_string()))
    }

    pub fn contains(&self, status: OrderStatus) -> bool {
        self.0.contains(&status)
    }

    pub fn iter(&self) -> impl Iterator<Item = OrderStatus> + '_ {
        self.0.iter().copied()
    }

    /// Status names in the form stored in the database.
    pub fn as_strings(&self) -> Vec<String> {
        self.0.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl Default for SaleStatuses {
    fn default() -> Self {
        Self(vec![OrderStatus::Paid])
    }
}

impl fmt::Display for SaleStatuses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(OrderStatus::as_str).collect();
        f.write_str(&names.join(","))
    }
}
