//! Product, service, category and discount mappers

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::dto::{CategoryDto, DiscountDto, ProductDto, ServiceDto};
use shared::models::{Category, CategoryKind, Discount, DiscountScope, Product, Service};

use super::non_empty;
use super::time::{DayBound, parse_datetime_bound, parse_opt_datetime};
use crate::{ClientError, ClientResult};

/// Clamp a wire percentage into 0..=100, rounding half away from zero
pub fn clamp_sale_off(raw: Decimal) -> u8 {
    raw.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .to_u8()
        .unwrap_or(0)
}

/// Translate the wire discount type into a scope.
///
/// An explicit type wins; without one the scope is inferred from whichever
/// target id is present, and no target at all means a global campaign.
pub fn discount_scope(
    discount_type: Option<&str>,
    product_id: Option<i64>,
    service_id: Option<i64>,
    category_id: Option<i64>,
) -> ClientResult<DiscountScope> {
    let missing = |what: &str| {
        ClientError::InvalidResponse(format!("{what} discount without {what}_id"))
    };
    match discount_type.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
        Some("product") => product_id.map(DiscountScope::Product).ok_or_else(|| missing("product")),
        Some("service") => service_id.map(DiscountScope::Service).ok_or_else(|| missing("service")),
        Some("category") => category_id
            .map(DiscountScope::Category)
            .ok_or_else(|| missing("category")),
        Some("all") | Some("global") => Ok(DiscountScope::Global),
        Some(other) if !other.is_empty() => Err(ClientError::InvalidResponse(format!(
            "unknown discount type: {other}"
        ))),
        _ => Ok(match (product_id, service_id, category_id) {
            (Some(id), _, _) => DiscountScope::Product(id),
            (None, Some(id), _) => DiscountScope::Service(id),
            (None, None, Some(id)) => DiscountScope::Category(id),
            (None, None, None) => DiscountScope::Global,
        }),
    }
}

pub fn discount(dto: DiscountDto) -> ClientResult<Discount> {
    let start = parse_datetime_bound(&dto.start_date, DayBound::Start).ok_or_else(|| {
        ClientError::InvalidResponse(format!("discount {}: bad start_date", dto.id))
    })?;
    let end = parse_datetime_bound(&dto.end_date, DayBound::End).ok_or_else(|| {
        ClientError::InvalidResponse(format!("discount {}: bad end_date", dto.id))
    })?;
    let sale_off = clamp_sale_off(dto.sale_off);
    let scope = discount_scope(
        dto.discount_type.as_deref(),
        dto.product_id,
        dto.service_id,
        dto.category_id,
    )?;

    Ok(Discount {
        id: dto.id,
        name: non_empty(dto.name).unwrap_or_else(|| format!("Giảm {sale_off}%")),
        sale_off,
        start,
        end,
        scope,
    })
}

/// Embedded discounts are optional decoration; a bad one is dropped.
fn embedded_discount(owner: &str, id: i64, dto: Option<DiscountDto>) -> Option<Discount> {
    match dto.map(discount).transpose() {
        Ok(discount) => discount,
        Err(e) => {
            tracing::warn!(owner = %owner, id, error = %e, "dropping malformed discount");
            None
        }
    }
}

pub fn category(dto: CategoryDto) -> Category {
    let kind = match dto.kind.as_deref().map(str::trim) {
        Some(k) if k.eq_ignore_ascii_case("service") => CategoryKind::Service,
        _ => CategoryKind::Product,
    };
    Category {
        id: dto.id,
        name: dto.name,
        description: non_empty(dto.description).unwrap_or_default(),
        kind,
    }
}

pub fn product(dto: ProductDto) -> Product {
    let images: Vec<String> = dto
        .images
        .unwrap_or_default()
        .into_iter()
        .filter(|i| !i.trim().is_empty())
        .collect();
    let image = non_empty(dto.image).or_else(|| images.first().cloned());
    let in_stock = !dto.out_of_stock.unwrap_or(false) && dto.stock.is_none_or(|s| s > 0);
    let category_id = dto.category_id.or(dto.category.as_ref().map(|c| c.id));
    let category_name = dto.category.map(|c| c.name);

    Product {
        id: dto.id,
        name: dto.name,
        description: non_empty(dto.description).unwrap_or_default(),
        price: dto.price.max(Decimal::ZERO),
        stock: dto.stock.unwrap_or(0).max(0),
        in_stock,
        image,
        images,
        category_id,
        category_name,
        discount: embedded_discount("product", dto.id, dto.discount),
        created_at: parse_opt_datetime(dto.created_at.as_deref()),
        updated_at: parse_opt_datetime(dto.updated_at.as_deref()),
    }
}

pub fn service(dto: ServiceDto) -> Service {
    let category_id = dto.category_id.or(dto.category.as_ref().map(|c| c.id));
    Service {
        id: dto.id,
        name: dto.name,
        description: non_empty(dto.description).unwrap_or_default(),
        price: dto.price.max(Decimal::ZERO),
        image: non_empty(dto.image),
        category_id,
        category_name: dto.category.map(|c| c.name),
        duration: non_empty(dto.duration),
        discount: embedded_discount("service", dto.id, dto.discount),
        created_at: parse_opt_datetime(dto.created_at.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn discount_dto(value: serde_json::Value) -> DiscountDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sale_off_clamped_and_rounded() {
        assert_eq!(clamp_sale_off(Decimal::new(125, 1)), 13);
        assert_eq!(clamp_sale_off(Decimal::from(150)), 100);
        assert_eq!(clamp_sale_off(Decimal::from(-5)), 0);
    }

    #[test]
    fn test_scope_translation() {
        assert_eq!(
            discount_scope(Some("Category"), None, None, Some(4)).unwrap(),
            DiscountScope::Category(4)
        );
        assert_eq!(discount_scope(Some("all"), Some(1), None, None).unwrap(), DiscountScope::Global);
        assert_eq!(discount_scope(None, None, Some(2), None).unwrap(), DiscountScope::Service(2));
        assert_eq!(discount_scope(None, None, None, None).unwrap(), DiscountScope::Global);
        assert!(discount_scope(Some("product"), None, None, None).is_err());
        assert!(discount_scope(Some("flash"), None, None, None).is_err());
    }

    #[test]
    fn test_discount_from_string_percent_and_dates() {
        let d = discount(discount_dto(json!({
            "id": 9,
            "sale_off": "20",
            "start_date": "2024-06-01",
            "end_date": "2024-06-30",
            "type": "product",
            "product_id": 3
        })))
        .unwrap();
        assert_eq!(d.sale_off, 20);
        assert_eq!(d.name, "Giảm 20%");
        assert_eq!(d.scope, DiscountScope::Product(3));
        assert!(d.start < d.end);
    }

    #[test]
    fn test_product_defaults() {
        let dto: ProductDto = serde_json::from_value(json!({
            "id": 1,
            "name": "Ốp lưng",
            "price": "120000.00",
            "images": ["", "a.jpg", "b.jpg"],
            "category": {"id": 5, "name": "Phụ kiện"},
            "discount": {"id": 2, "sale_off": 10, "start_date": "bad", "end_date": "2024-01-01"}
        }))
        .unwrap();
        let p = product(dto);
        assert_eq!(p.description, "");
        assert_eq!(p.price, Decimal::from(120_000));
        assert_eq!(p.image.as_deref(), Some("a.jpg"));
        assert_eq!(p.images.len(), 2);
        assert_eq!(p.category_id, Some(5));
        assert_eq!(p.category_name.as_deref(), Some("Phụ kiện"));
        // untracked stock is sellable
        assert!(p.in_stock);
        // malformed embedded discount is dropped, not fatal
        assert!(p.discount.is_none());
    }

    #[test]
    fn test_product_out_of_stock() {
        let dto: ProductDto = serde_json::from_value(json!({
            "id": 1, "name": "Pin", "price": 50000, "stock": 0
        }))
        .unwrap();
        assert!(!product(dto).in_stock);

        let dto: ProductDto = serde_json::from_value(json!({
            "id": 1, "name": "Pin", "price": 50000, "stock": 4, "out_of_stock": 1
        }))
        .unwrap();
        assert!(!product(dto).in_stock);
    }

    #[test]
    fn test_category_kind() {
        let c = category(serde_json::from_value(json!({"id": 1, "name": "Sửa màn hình", "type": "service"})).unwrap());
        assert_eq!(c.kind, CategoryKind::Service);
        let c = category(serde_json::from_value(json!({"id": 2, "name": "Cáp"})).unwrap());
        assert_eq!(c.kind, CategoryKind::Product);
    }
}
