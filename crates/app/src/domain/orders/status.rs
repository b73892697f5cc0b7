//! Order status state machine.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// States reachable in one step.
    #[must_use]
    pub const fn next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    /// Whether an update from `self` to `next` is allowed. Staying put is always
    /// allowed so admins can add notes.
    #[must_use]
    pub fn can_become(self, next: Self) -> bool {
        self == next || self.next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.next_states().is_empty()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_status_by_name() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert_eq!("Shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(OrderStatus::Pending.can_become(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_become(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_become(OrderStatus::Delivered));
        assert!(OrderStatus::Pending.can_become(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_become(OrderStatus::Cancelled));
    }

    #[test]
    fn skipping_and_reversing_are_rejected() {
        assert!(!OrderStatus::Pending.can_become(OrderStatus::Delivered));
        assert!(!OrderStatus::Shipped.can_become(OrderStatus::Pending));
        assert!(!OrderStatus::Shipped.can_become(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_become(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_become(OrderStatus::Confirmed));
    }

    #[test]
    fn same_status_is_always_allowed() {
        for status in OrderStatus::ALL {
            assert!(status.can_become(status), "{status} -> {status}");
        }
    }

    #[test]
    fn only_delivered_and_cancelled_are_terminal() {
        let terminal: Vec<OrderStatus> = OrderStatus::ALL
            .into_iter()
            .filter(|status| status.is_terminal())
            .collect();

        assert_eq!(terminal, vec![OrderStatus::Delivered, OrderStatus::Cancelled]);
    }
}
