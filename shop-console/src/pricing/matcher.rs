//! Discount matching
//!
//! Overlapping campaigns resolve by scope level first (item, then
//! category, then global), then by the highest `sale_off`, then by the
//! lowest id.

use chrono::{DateTime, Utc};
use shared::models::{Discount, DiscountScope, Product, Service};

use super::DiscountState;

/// Priced entity a discount may apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTarget {
    Product { id: i64, category_id: Option<i64> },
    Service { id: i64, category_id: Option<i64> },
}

impl From<&Product> for PriceTarget {
    fn from(p: &Product) -> Self {
        Self::Product {
            id: p.id,
            category_id: p.category_id,
        }
    }
}

impl From<&Service> for PriceTarget {
    fn from(s: &Service) -> Self {
        Self::Service {
            id: s.id,
            category_id: s.category_id,
        }
    }
}

impl PriceTarget {
    fn category_id(&self) -> Option<i64> {
        match self {
            Self::Product { category_id, .. } | Self::Service { category_id, .. } => *category_id,
        }
    }
}

/// Inclusive on both ends
pub fn discount_state(discount: &Discount, now: DateTime<Utc>) -> DiscountState {
    if now < discount.start {
        DiscountState::Upcoming
    } else if now <= discount.end {
        DiscountState::Active
    } else {
        DiscountState::Expired
    }
}

/// Precedence level when `discount` applies to `target`, lower wins
fn scope_level(discount: &Discount, target: PriceTarget) -> Option<u8> {
    match (discount.scope, target) {
        (DiscountScope::Product(d), PriceTarget::Product { id, .. }) if d == id => Some(0),
        (DiscountScope::Service(d), PriceTarget::Service { id, .. }) if d == id => Some(0),
        (DiscountScope::Category(c), t) if t.category_id() == Some(c) => Some(1),
        (DiscountScope::Global, _) => Some(2),
        _ => None,
    }
}

pub fn applies_to(discount: &Discount, target: PriceTarget) -> bool {
    scope_level(discount, target).is_some()
}

/// The active discount that wins for `target`
pub fn best_discount(
    discounts: &[Discount],
    target: PriceTarget,
    now: DateTime<Utc>,
) -> Option<&Discount> {
    discounts
        .iter()
        .filter(|d| discount_state(d, now) == DiscountState::Active)
        .filter_map(|d| scope_level(d, target).map(|level| (level, d)))
        .min_by(|(la, a), (lb, b)| {
            la.cmp(lb)
                .then(b.sale_off.cmp(&a.sale_off))
                .then(a.id.cmp(&b.id))
        })
        .map(|(_, d)| d)
}

/// The applicable campaign starting soonest, for the pending badge
pub fn next_upcoming(
    discounts: &[Discount],
    target: PriceTarget,
    now: DateTime<Utc>,
) -> Option<&Discount> {
    discounts
        .iter()
        .filter(|d| discount_state(d, now) == DiscountState::Upcoming && applies_to(d, target))
        .min_by_key(|d| (d.start, d.id))
}
