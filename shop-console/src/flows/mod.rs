//! Storefront flows built on the client services

pub mod catalog;
pub mod checkout;
pub mod repair;
pub mod reviews;
pub mod session;

pub use catalog::{
    ProductCard, ServiceCard, browse_products, browse_services, scoped_campaigns, search_products,
};
pub use checkout::{CheckoutForm, checkout};
pub use repair::{RepairForm, submit_repair};
pub use reviews::{ReviewSummary, product_reviews, service_reviews};
pub use session::Session;
