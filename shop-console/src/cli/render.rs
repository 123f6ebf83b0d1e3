//! Plain-text output

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::Page;
use shared::models::{Banner, Cart, Category, Discount, RequestStatus, SiteInfo, StatsOverview};
use shop_client::mapper::time::format_store_datetime;
use std::fmt::Write;

use crate::board::{Board, COLUMNS, CompletionReport};
use crate::flows::{ProductCard, ReviewSummary, ServiceCard};
use crate::pricing::{DiscountState, PriceDisplay, discount_state, format_vnd};
use crate::utils::{PageItem, bucket_series, page_range, sample_labels};

fn price_cell(price: &PriceDisplay) -> String {
    let mut cell = format_vnd(price.price);
    if let Some(old) = price.old_price {
        let _ = write!(cell, " (was {})", format_vnd(old));
    }
    if let Some(badge) = price.badge {
        let _ = write!(cell, " [{}", badge.label());
        if let Some(pct) = price.sale_off {
            let _ = write!(cell, " -{pct}%");
        }
        cell.push(']');
    }
    cell
}

fn pages(current: u32, total: u32) -> String {
    page_range(current, total, 1)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(p) if p == current => format!("[{p}]"),
            PageItem::Page(p) => p.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn products(page: &Page<ProductCard>) -> String {
    let mut out = String::new();
    for card in &page.items {
        let p = &card.product;
        let stock = if p.in_stock {
            format!("stock {}", p.stock)
        } else {
            "hết hàng".to_string()
        };
        let _ = writeln!(out, "#{:<5} {:<40} {:<36} {stock}", p.id, p.name, price_cell(&card.price));
    }
    let pg = &page.pagination;
    let _ = writeln!(out, "{} item(s)  pages: {}", pg.total, pages(pg.page, pg.total_pages));
    out
}

pub fn product_detail(card: &ProductCard) -> String {
    let p = &card.product;
    let mut out = format!("#{} {}\n", p.id, p.name);
    let _ = writeln!(out, "Giá: {}", price_cell(&card.price));
    if let Some(category) = &p.category_name {
        let _ = writeln!(out, "Danh mục: {category}");
    }
    let _ = writeln!(out, "Tồn kho: {}{}", p.stock, if p.in_stock { "" } else { " (hết hàng)" });
    if !p.description.is_empty() {
        let _ = writeln!(out, "\n{}", p.description);
    }
    out
}

pub fn services(cards: &[ServiceCard]) -> String {
    let mut out = String::new();
    for card in cards {
        let s = &card.service;
        let _ = writeln!(
            out,
            "#{:<5} {:<40} {:<36} {}",
            s.id,
            s.name,
            price_cell(&card.price),
            s.duration.as_deref().unwrap_or("")
        );
    }
    out
}

pub fn categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| format!("#{:<5} {:<30} {}\n", c.id, c.name, c.kind.as_str()))
        .collect()
}

pub fn discounts(discounts: &[Discount], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for d in discounts {
        let state = match discount_state(d, now) {
            DiscountState::Active => "đang giảm",
            DiscountState::Upcoming => "sắp",
            DiscountState::Expired => "hết hạn",
        };
        let _ = writeln!(
            out,
            "#{:<5} {:<30} -{:>3}%  {} → {}  {:?}  {state}",
            d.id,
            d.name,
            d.sale_off,
            format_store_datetime(&d.start),
            format_store_datetime(&d.end),
            d.scope
        );
    }
    out
}

pub fn board(board: &Board) -> String {
    let mut out = format!("== {} ==\n", board.tab().label());
    for status in COLUMNS {
        let cards = board.column(status);
        let _ = writeln!(out, "\n{} ({})", status.label(), cards.len());
        for r in cards {
            let _ = writeln!(
                out,
                "  #{:<5} {:<24} {:<12} {}",
                r.id,
                r.contact.name,
                r.contact.phone,
                r.created_at.as_ref().map(format_store_datetime).unwrap_or_default()
            );
        }
    }
    if !board.cancelled().is_empty() {
        let _ = writeln!(out, "\n{} ({})", RequestStatus::Cancelled.label(), board.cancelled().len());
        for r in board.cancelled() {
            let _ = writeln!(out, "  #{:<5} {}", r.id, r.contact.name);
        }
    }
    out
}

pub fn completion(report: &CompletionReport) -> String {
    let mut out = String::new();
    for (id, remaining) in &report.stock {
        let _ = writeln!(out, "stock #{id}: {remaining}");
    }
    for id in &report.out_of_stock {
        let _ = writeln!(out, "out of stock: #{id}");
    }
    for to in &report.mailed {
        let _ = writeln!(out, "mailed {to}");
    }
    for failure in &report.failures {
        let _ = writeln!(out, "warning: {failure}");
    }
    out
}

pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Giỏ hàng trống\n".to_string();
    }
    let mut out = String::new();
    for (i, item) in cart.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{i:>2}. #{:<5} {:<36} {} x{} = {}",
            item.product_id,
            item.name,
            format_vnd(item.price),
            item.quantity,
            format_vnd(item.price * Decimal::from(item.quantity))
        );
    }
    let _ = writeln!(out, "Tổng: {}", format_vnd(cart.total_price));
    out
}

pub fn reviews(summary: &ReviewSummary) -> String {
    let mut out = match summary.average {
        Some(avg) => format!("{avg:.1}/5 ({} đánh giá)\n", summary.reviews.len()),
        None => "Chưa có đánh giá\n".to_string(),
    };
    for r in &summary.reviews {
        let _ = writeln!(out, "{} {}: {}", "★".repeat(r.rating as usize), r.author, r.comment);
    }
    out
}

pub fn stats(overview: &StatsOverview, days: i64, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Doanh thu: {}", format_vnd(overview.total_revenue));
    let _ = writeln!(
        out,
        "Đơn hàng: {}  Sửa chữa: {}  Khách hàng: {}  Chờ xử lý: {}",
        overview.total_orders, overview.total_repairs, overview.total_customers, overview.pending_requests
    );

    let start = today - Duration::days(days - 1);
    let buckets = bucket_series(&overview.revenue, start, today);
    let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();
    let labels = sample_labels(&labels, 12);
    let _ = writeln!(out);
    for (bucket, label) in buckets.iter().zip(labels) {
        let _ = writeln!(out, "{label:>8} {}", format_vnd(bucket.value));
    }

    if !overview.top_products.is_empty() {
        let _ = writeln!(out, "\nBán chạy:");
        for p in &overview.top_products {
            let _ = writeln!(out, "  {:<36} {}", p.name, p.sold);
        }
    }
    out
}

pub fn site_info(info: &SiteInfo) -> String {
    let mut out = String::new();
    let rows = [
        ("Tên", Some(info.name.as_str())),
        ("Địa chỉ", Some(info.address.as_str())),
        ("Điện thoại", Some(info.phone.as_str())),
        ("Hotline", info.hotline.as_deref()),
        ("Email", Some(info.email.as_str())),
        ("Email liên hệ", info.notice_address()),
        ("Giờ làm việc", info.working_hours.as_deref()),
        ("Facebook", info.facebook.as_deref()),
        ("Zalo", info.zalo.as_deref()),
    ];
    for (label, value) in rows {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "{label:<14} {v}");
        }
    }
    out
}

pub fn banners(banners: &[Banner]) -> String {
    banners
        .iter()
        .map(|b| format!("#{:<4} [{}] {} {}\n", b.id, b.layout.as_str(), b.title, b.image))
        .collect()
}
