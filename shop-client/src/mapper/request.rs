//! Request and review mappers

use rust_decimal::Decimal;
use shared::dto::{RequestDto, RequestItemDto, ReviewDto};
use shared::models::{
    Contact, OrderLine, Request, RequestDetail, RequestKind, RequestStatus, Review, ReviewTarget,
};

use super::non_empty;
use super::time::parse_opt_datetime;
use crate::{ClientError, ClientResult};

/// `order`/`product` are orders, `repair`/`service` are repair tickets
pub fn request_kind(raw: &str) -> ClientResult<RequestKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "order" | "product" => Ok(RequestKind::Order),
        "repair" | "service" => Ok(RequestKind::Repair),
        other => Err(ClientError::InvalidResponse(format!(
            "unknown request type: {other}"
        ))),
    }
}

pub fn order_line(dto: RequestItemDto) -> OrderLine {
    OrderLine {
        product_id: dto.product_id,
        name: dto.name,
        price: dto.price.max(Decimal::ZERO),
        quantity: dto.quantity,
        image: non_empty(dto.image),
    }
}

pub fn request(dto: RequestDto) -> ClientResult<Request> {
    let kind = request_kind(&dto.request_type)?;
    let status = match non_empty(dto.status) {
        Some(raw) => raw
            .parse::<RequestStatus>()
            .map_err(|e| ClientError::InvalidResponse(format!("request {}: {e}", dto.id)))?,
        None => RequestStatus::New,
    };

    let detail = match kind {
        RequestKind::Order => {
            let items: Vec<OrderLine> = dto
                .items
                .unwrap_or_default()
                .into_iter()
                .map(order_line)
                .collect();
            let total = dto
                .total
                .unwrap_or_else(|| items.iter().map(OrderLine::subtotal).sum());
            RequestDetail::Order { items, total }
        }
        RequestKind::Repair => RequestDetail::Repair {
            service_id: dto.service_id,
            problem: non_empty(dto.description).unwrap_or_default(),
            images: dto.images.unwrap_or_default(),
        },
    };

    Ok(Request {
        id: dto.id,
        contact: Contact {
            name: dto.name,
            email: non_empty(dto.email),
            phone: non_empty(dto.phone).unwrap_or_default(),
            address: non_empty(dto.address).unwrap_or_default(),
        },
        detail,
        status,
        hidden: dto.hidden,
        created_at: parse_opt_datetime(dto.created_at.as_deref()),
        updated_at: parse_opt_datetime(dto.updated_at.as_deref()),
    })
}

pub fn review(dto: ReviewDto) -> ClientResult<Review> {
    let target = match (dto.product_id, dto.service_id) {
        (Some(id), _) => ReviewTarget::Product(id),
        (None, Some(id)) => ReviewTarget::Service(id),
        (None, None) => {
            return Err(ClientError::InvalidResponse(format!(
                "review {} has no target",
                dto.id
            )));
        }
    };
    Ok(Review {
        id: dto.id,
        target,
        author: dto.name,
        rating: dto.rating.clamp(1, 5),
        comment: non_empty(dto.comment).unwrap_or_default(),
        created_at: parse_opt_datetime(dto.created_at.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_request_total_from_lines() {
        let dto: RequestDto = serde_json::from_value(json!({
            "id": 11,
            "type": "product",
            "name": "Lan",
            "phone": "0901234567",
            "email": "",
            "items": [
                {"product_id": 1, "name": "Cáp", "price": "50000", "quantity": 2},
                {"product_id": 2, "name": "Sạc", "price": 150000, "quantity": 1}
            ],
            "status": "processing",
            "hidden": 0
        }))
        .unwrap();

        let r = request(dto).unwrap();
        assert_eq!(r.kind(), RequestKind::Order);
        assert_eq!(r.status, RequestStatus::InProgress);
        assert!(r.contact.email.is_none());
        assert!(!r.hidden);
        match r.detail {
            RequestDetail::Order { items, total } => {
                assert_eq!(items.len(), 2);
                assert_eq!(total, Decimal::from(250_000));
            }
            RequestDetail::Repair { .. } => panic!("expected order"),
        }
    }

    #[test]
    fn test_repair_request_defaults() {
        let dto: RequestDto = serde_json::from_value(json!({
            "id": 12,
            "request_type": "repair",
            "name": "Minh",
            "problem": "Màn hình sọc",
            "hidden": true
        }))
        .unwrap();

        let r = request(dto).unwrap();
        assert_eq!(r.status, RequestStatus::New);
        assert!(r.hidden);
        assert_eq!(r.contact.phone, "");
        match r.detail {
            RequestDetail::Repair { problem, images, .. } => {
                assert_eq!(problem, "Màn hình sọc");
                assert!(images.is_empty());
            }
            RequestDetail::Order { .. } => panic!("expected repair"),
        }
    }

    #[test]
    fn test_unknown_type_and_status_rejected() {
        let dto: RequestDto =
            serde_json::from_value(json!({"id": 1, "type": "refund", "name": "x"})).unwrap();
        assert!(request(dto).is_err());

        let dto: RequestDto = serde_json::from_value(
            json!({"id": 1, "type": "order", "name": "x", "status": "shipped"}),
        )
        .unwrap();
        assert!(request(dto).is_err());
    }

    #[test]
    fn test_review_target() {
        let dto: ReviewDto = serde_json::from_value(
            json!({"id": 1, "service_id": 4, "author": "Hà", "rating": 9}),
        )
        .unwrap();
        let r = review(dto).unwrap();
        assert_eq!(r.target, ReviewTarget::Service(4));
        assert_eq!(r.rating, 5);
    }
}
