//! Side effects of completing a request
//!
//! Orders first decrement stock for every line and flag products that ran
//! out, then mail. Repairs only mail. Nothing here is transactional: each
//! step that fails is recorded and the rest still run.

use serde::Serialize;
use shared::models::{Request, RequestDetail, RequestKind, SiteInfo};
use shop_client::ApiClient;

use crate::pricing::format_vnd;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionReport {
    /// `(product_id, remaining stock)` per decremented line
    pub stock: Vec<(i64, i64)>,
    pub out_of_stock: Vec<i64>,
    /// Recipients that were mailed
    pub mailed: Vec<String>,
    /// Human-readable failures, one per failed step
    pub failures: Vec<String>,
}

impl CompletionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Subject and body of the completion mail
pub fn completion_mail(request: &Request, store_name: &str) -> (String, String) {
    let store = if store_name.is_empty() {
        "Cửa hàng"
    } else {
        store_name
    };
    match &request.detail {
        RequestDetail::Order { items, total } => {
            let subject = format!("[{store}] Đơn hàng #{} đã hoàn thành", request.id);
            let mut body = format!(
                "Xin chào {},\n\nĐơn hàng #{} của bạn đã được hoàn thành.\n\n",
                request.contact.name, request.id
            );
            for line in items {
                body.push_str(&format!(
                    "- {} x{}: {}\n",
                    line.name,
                    line.quantity,
                    format_vnd(line.subtotal())
                ));
            }
            body.push_str(&format!("\nTổng cộng: {}\n\nCảm ơn bạn đã mua hàng.\n{store}", format_vnd(*total)));
            (subject, body)
        }
        RequestDetail::Repair { problem, .. } => {
            let subject = format!("[{store}] Yêu cầu sửa chữa #{} đã hoàn thành", request.id);
            let body = format!(
                "Xin chào {},\n\nYêu cầu sửa chữa #{} ({}) đã được hoàn thành. \
                 Vui lòng liên hệ cửa hàng để nhận lại thiết bị.\n\n{store}",
                request.contact.name, request.id, problem
            );
            (subject, body)
        }
    }
}

async fn adjust_stock(api: &ApiClient, request: &Request, report: &mut CompletionReport) {
    for line in request.items() {
        match api.products().decrement_stock(line.product_id, line.quantity).await {
            Ok(remaining) => {
                report.stock.push((line.product_id, remaining));
                if remaining <= 0 {
                    match api.products().mark_out_of_stock(line.product_id).await {
                        Ok(()) => report.out_of_stock.push(line.product_id),
                        Err(e) => report
                            .failures
                            .push(format!("Không đánh dấu hết hàng cho sản phẩm #{}: {e}", line.product_id)),
                    }
                }
            }
            Err(e) => report
                .failures
                .push(format!("Không trừ tồn kho sản phẩm #{}: {e}", line.product_id)),
        }
    }
}

/// Run every completion step for `request`
pub(crate) async fn complete(
    api: &ApiClient,
    request: &Request,
    site: Option<&SiteInfo>,
) -> CompletionReport {
    let mut report = CompletionReport::default();

    if request.kind() == RequestKind::Order {
        adjust_stock(api, request, &mut report).await;
    }

    let store_name = site.map(|s| s.name.as_str()).unwrap_or_default();
    let (subject, body) = completion_mail(request, store_name);

    let mut recipients: Vec<String> = Vec::new();
    match request.contact.email.as_deref() {
        Some(email) => recipients.push(email.to_string()),
        None => report
            .failures
            .push(format!("Yêu cầu #{} không có email khách hàng", request.id)),
    }
    match site.and_then(SiteInfo::notice_address) {
        Some(address) if !recipients.iter().any(|r| r == address) => recipients.push(address.to_string()),
        Some(_) => {}
        None => report
            .failures
            .push("Chưa cấu hình email liên hệ của cửa hàng".to_string()),
    }

    for to in recipients {
        match api.mail().send(&to, &subject, &body).await {
            Ok(()) => report.mailed.push(to),
            Err(e) => report.failures.push(format!("Gửi email tới {to} thất bại: {e}")),
        }
    }

    tracing::info!(
        request_id = request.id,
        mailed = report.mailed.len(),
        failures = report.failures.len(),
        "completion side effects finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{Contact, OrderLine, RequestStatus};

    #[test]
    fn test_order_mail_lists_lines_and_total() {
        let request = Request {
            id: 42,
            contact: Contact {
                name: "Minh".into(),
                email: None,
                phone: "0900000000".into(),
                address: "Hà Nội".into(),
            },
            detail: RequestDetail::Order {
                items: vec![OrderLine {
                    product_id: 1,
                    name: "Pin".into(),
                    price: Decimal::from(250_000),
                    quantity: 2,
                    image: None,
                }],
                total: Decimal::from(500_000),
            },
            status: RequestStatus::Completed,
            hidden: false,
            created_at: None,
            updated_at: None,
        };
        let (subject, body) = completion_mail(&request, "Sửa Nhanh");
        assert_eq!(subject, "[Sửa Nhanh] Đơn hàng #42 đã hoàn thành");
        assert!(body.contains("- Pin x2: 500.000 ₫"));
        assert!(body.contains("Tổng cộng: 500.000 ₫"));
    }
}
