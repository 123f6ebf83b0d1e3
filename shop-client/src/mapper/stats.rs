//! Dashboard statistics mapper

use shared::dto::StatsDto;
use shared::models::{RevenuePoint, StatsOverview, TopProduct};

use super::time::parse_date;

pub fn stats(dto: StatsDto) -> StatsOverview {
    let mut revenue: Vec<RevenuePoint> = dto
        .revenue
        .into_iter()
        .filter_map(|p| match parse_date(&p.date) {
            Some(date) => Some(RevenuePoint { date, value: p.value }),
            None => {
                tracing::warn!(date = %p.date, "skipping revenue point with bad date");
                None
            }
        })
        .collect();
    revenue.sort_by_key(|p| p.date);

    let mut top_products: Vec<TopProduct> = dto
        .top_products
        .into_iter()
        .map(|p| TopProduct { name: p.name, sold: p.sold })
        .collect();
    top_products.sort_by(|a, b| b.sold.cmp(&a.sold));

    StatsOverview {
        total_revenue: dto.total_revenue,
        total_orders: dto.total_orders,
        total_repairs: dto.total_repairs,
        total_customers: dto.total_customers,
        pending_requests: dto.pending_requests,
        revenue,
        top_products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_sorted_and_filtered() {
        let dto: StatsDto = serde_json::from_value(json!({
            "total_revenue": "1500000",
            "total_orders": 3,
            "revenue": [
                {"date": "2024-05-03", "value": 100},
                {"date": "??", "value": 5},
                {"date": "2024-05-01", "value": "200"}
            ],
            "top_products": [
                {"name": "Cáp", "sold": 2},
                {"name": "Sạc", "sales": 9}
            ]
        }))
        .unwrap();
        let s = stats(dto);
        assert_eq!(s.revenue.len(), 2);
        assert!(s.revenue[0].date < s.revenue[1].date);
        assert_eq!(s.top_products[0].name, "Sạc");
        assert_eq!(s.total_repairs, 0);
    }
}
