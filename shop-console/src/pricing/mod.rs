//! Discount resolution and price display
//!
//! One rounding rule for every displayed amount: whole đồng, half away
//! from zero.

pub mod format;
pub mod matcher;

pub use format::format_vnd;
pub use matcher::{PriceTarget, best_discount, discount_state, next_upcoming};

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shared::models::{Discount, Product, Service};

/// Where a discount's window sits relative to now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountState {
    Active,
    Upcoming,
    Expired,
}

/// Price badge shown next to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Active,
    Upcoming,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "đang giảm",
            Self::Upcoming => "sắp",
        }
    }
}

/// Round to whole đồng
pub fn round_vnd(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `price * (1 - sale_off / 100)`, rounded; `sale_off` above 100 counts as 100
pub fn discounted_price(price: Decimal, sale_off: u8) -> Decimal {
    let pct = Decimal::from(sale_off.min(100));
    round_vnd(price * (Decimal::ONE_HUNDRED - pct) / Decimal::ONE_HUNDRED)
}

/// Everything a price cell needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDisplay {
    /// What the customer pays now
    pub price: Decimal,
    /// Struck-through price, only while a discount is active
    pub old_price: Option<Decimal>,
    pub sale_off: Option<u8>,
    pub badge: Option<Badge>,
    pub discount_id: Option<i64>,
}

impl PriceDisplay {
    pub fn plain(price: Decimal) -> Self {
        Self {
            price: round_vnd(price),
            old_price: None,
            sale_off: None,
            badge: None,
            discount_id: None,
        }
    }

    /// Display for a single discount record
    pub fn for_discount(price: Decimal, discount: Option<&Discount>, now: DateTime<Utc>) -> Self {
        let Some(discount) = discount else {
            return Self::plain(price);
        };
        match discount_state(discount, now) {
            DiscountState::Active => Self {
                price: discounted_price(price, discount.sale_off),
                old_price: Some(round_vnd(price)),
                sale_off: Some(discount.sale_off),
                badge: Some(Badge::Active),
                discount_id: Some(discount.id),
            },
            DiscountState::Upcoming => Self {
                badge: Some(Badge::Upcoming),
                sale_off: Some(discount.sale_off),
                discount_id: Some(discount.id),
                ..Self::plain(price)
            },
            DiscountState::Expired => Self::plain(price),
        }
    }

    /// Resolve among overlapping campaigns, then display
    pub fn resolve(
        price: Decimal,
        target: PriceTarget,
        discounts: &[Discount],
        now: DateTime<Utc>,
    ) -> Self {
        let chosen = best_discount(discounts, target, now).or_else(|| next_upcoming(discounts, target, now));
        Self::for_discount(price, chosen, now)
    }

    pub fn is_discounted(&self) -> bool {
        self.old_price.is_some()
    }
}

/// Product price, combining the embedded discount with any fetched campaigns
pub fn product_price(product: &Product, campaigns: &[Discount], now: DateTime<Utc>) -> PriceDisplay {
    let mut all: Vec<Discount> = campaigns.to_vec();
    if let Some(d) = &product.discount
        && !all.iter().any(|c| c.id == d.id)
    {
        all.push(d.clone());
    }
    PriceDisplay::resolve(product.price, PriceTarget::from(product), &all, now)
}

pub fn service_price(service: &Service, campaigns: &[Discount], now: DateTime<Utc>) -> PriceDisplay {
    let mut all: Vec<Discount> = campaigns.to_vec();
    if let Some(d) = &service.discount
        && !all.iter().any(|c| c.id == d.id)
    {
        all.push(d.clone());
    }
    PriceDisplay::resolve(service.price, PriceTarget::from(service), &all, now)
}
