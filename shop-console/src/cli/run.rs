//! Command dispatch

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use shared::dto::{DiscountPayload, ProductPayload};
use shared::models::{DiscountScope, ProductQuery, ReviewTarget};

use super::{
    BoardCommand, CartCommand, CategoryCommand, Cli, Command, DiscountCommand, ProductCommand,
    ReviewCommand, ServiceCommand, render,
};
use crate::app::App;
use crate::board::{BoardController, BoardTab, RequestEdit};
use crate::core::AppConfig;
use crate::flows::{self, CheckoutForm, RepairForm};
use crate::pricing::{product_price, service_price};

/// Print `value` as JSON, or `text` otherwise
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

pub fn config_from(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone());
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    config
}

pub async fn run(cli: Cli, app: &App) -> anyhow::Result<()> {
    let json = cli.json;
    let api = &app.api;
    let now = Utc::now();

    match cli.command {
        Command::Login { email, password } => {
            let user = app.session.login(api, &email, &password).await?;
            println!("Đăng nhập: {} <{}> ({})", user.name, user.email, user.role);
        }
        Command::Logout => {
            app.session.logout(api)?;
            println!("Đã đăng xuất");
        }
        Command::Whoami => match app.session.user()? {
            Some(user) => emit(json, &user, |u| format!("{} <{}> ({})\n", u.name, u.email, u.role))?,
            None => println!("Chưa đăng nhập"),
        },

        Command::Products { command } => match command {
            ProductCommand::List {
                search,
                category,
                page,
                limit,
            } => {
                let query = ProductQuery {
                    search,
                    category_id: category,
                    page: Some(page),
                    limit: Some(limit),
                };
                let page = if query.search.is_some() {
                    flows::search_products(api, &app.debouncer, &app.latest, query, now)
                        .await?
                        .context("search superseded")?
                } else {
                    flows::browse_products(api, &query, now).await?
                };
                emit(json, &page, render::products)?;
            }
            ProductCommand::Show { id } => {
                let product = api.products().get(id).await?;
                let campaigns = flows::scoped_campaigns(api, DiscountScope::Product(id)).await;
                let card = flows::ProductCard {
                    price: product_price(&product, &campaigns, now),
                    product,
                };
                emit(json, &card, render::product_detail)?;
            }
            ProductCommand::Create {
                name,
                price,
                stock,
                description,
                category,
                image,
            } => {
                let image = match image {
                    Some(path) => Some(api.uploads().upload_path(&path).await?),
                    None => None,
                };
                let payload = ProductPayload {
                    name,
                    description,
                    price,
                    stock,
                    images: image.iter().cloned().collect(),
                    image,
                    category_id: category,
                };
                let product = api.products().create(&payload).await?;
                println!("Đã tạo sản phẩm #{}", product.id);
            }
            ProductCommand::Delete { id } => {
                api.products().delete(id).await?;
                println!("Đã xóa sản phẩm #{id}");
            }
        },

        Command::Services { command } => match command {
            ServiceCommand::List { category } => {
                let cards = flows::browse_services(api, category, now).await?;
                emit(json, &cards, |c| render::services(c))?;
            }
            ServiceCommand::Show { id } => {
                let service = api.services().get(id).await?;
                let campaigns = flows::scoped_campaigns(api, DiscountScope::Service(id)).await;
                let card = flows::ServiceCard {
                    price: service_price(&service, &campaigns, now),
                    service,
                };
                emit(json, &card, |c| {
                    let mut out = render::services(std::slice::from_ref(c));
                    if !c.service.description.is_empty() {
                        out.push_str(&format!("\n{}\n", c.service.description));
                    }
                    out
                })?;
            }
        },

        Command::Categories { command } => match command {
            CategoryCommand::List { kind } => {
                let categories = api.categories().list(kind.map(Into::into)).await?;
                emit(json, &categories, |c| render::categories(c))?;
            }
            CategoryCommand::Create {
                name,
                kind,
                description,
            } => {
                let category = api
                    .categories()
                    .create(&name, description, kind.into())
                    .await?;
                println!("Đã tạo danh mục #{}", category.id);
            }
            CategoryCommand::Delete { id } => {
                api.categories().delete(id).await?;
                println!("Đã xóa danh mục #{id}");
            }
        },

        Command::Discounts { command } => match command {
            DiscountCommand::List {
                product,
                service,
                category,
            } => {
                let discounts = match (product, service, category) {
                    (Some(id), _, _) => api.discounts().for_product(id).await?,
                    (None, Some(id), _) => api.discounts().for_service(id).await?,
                    (None, None, Some(id)) => api.discounts().for_category(id).await?,
                    (None, None, None) => api.discounts().list().await?,
                };
                emit(json, &discounts, |d| render::discounts(d, now))?;
            }
            DiscountCommand::Create {
                name,
                sale_off,
                start,
                end,
                product,
                service,
                category,
            } => {
                let scope = match (product, service, category) {
                    (Some(id), _, _) => DiscountScope::Product(id),
                    (None, Some(id), _) => DiscountScope::Service(id),
                    (None, None, Some(id)) => DiscountScope::Category(id),
                    (None, None, None) => DiscountScope::Global,
                };
                let discount_type = match scope {
                    DiscountScope::Product(_) => "product",
                    DiscountScope::Service(_) => "service",
                    DiscountScope::Category(_) => "category",
                    DiscountScope::Global => "all",
                };
                let payload = DiscountPayload {
                    name,
                    sale_off,
                    start_date: start,
                    end_date: end,
                    discount_type: discount_type.to_string(),
                    product_id: product,
                    service_id: service,
                    category_id: category,
                };
                let discount = api.discounts().create(&payload).await?;
                println!("Đã tạo khuyến mãi #{} (-{}%)", discount.id, discount.sale_off);
            }
            DiscountCommand::Delete { id } => {
                api.discounts().delete(id).await?;
                println!("Đã xóa khuyến mãi #{id}");
            }
        },

        Command::Board { command } => run_board(command, app).await?,

        Command::Cart { command } => {
            let cart = &app.cart;
            match command {
                CartCommand::Show => {}
                CartCommand::Add { product_id, qty } => {
                    let product = api.products().get(product_id).await?;
                    if !product.in_stock {
                        anyhow::bail!("sản phẩm #{product_id} đã hết hàng");
                    }
                    let campaigns = flows::scoped_campaigns(api, DiscountScope::Product(product_id)).await;
                    cart.add_product(&product, qty, &campaigns, now)?;
                }
                CartCommand::Remove { product_id } => {
                    if cart.remove_product(product_id)?.is_none() {
                        anyhow::bail!("sản phẩm #{product_id} không có trong giỏ");
                    }
                }
                CartCommand::Set { product_id, qty } => {
                    if !cart.set_quantity(product_id, qty)? {
                        anyhow::bail!("sản phẩm #{product_id} không có trong giỏ");
                    }
                }
                CartCommand::Clear => cart.clear()?,
                CartCommand::Push => cart.push(api).await?,
                CartCommand::Pull => cart.pull(api).await?,
            }
            emit(json, &cart.snapshot(), render::cart)?;
        }

        Command::Checkout {
            name,
            email,
            phone,
            address,
            note,
        } => {
            let form = CheckoutForm {
                name,
                email,
                phone,
                address,
                note,
            };
            let request = flows::checkout(api, &app.cart, &app.bus, &form).await?;
            println!("Đặt hàng thành công, mã đơn #{}", request.id);
        }

        Command::Repair {
            name,
            email,
            phone,
            address,
            service,
            description,
            images,
        } => {
            let form = RepairForm {
                name,
                email,
                phone,
                address,
                service_id: service,
                description,
                images,
            };
            let request = flows::submit_repair(api, &app.bus, &form).await?;
            println!("Đã gửi yêu cầu sửa chữa #{}", request.id);
        }

        Command::Reviews { command } => match command {
            ReviewCommand::Product { id } => {
                let summary = flows::product_reviews(api, id).await?;
                emit(json, &summary, render::reviews)?;
            }
            ReviewCommand::Service { id } => {
                let summary = flows::service_reviews(api, id).await?;
                emit(json, &summary, render::reviews)?;
            }
            ReviewCommand::Submit {
                product,
                service,
                name,
                rating,
                comment,
            } => {
                let target = match (product, service) {
                    (Some(id), _) => ReviewTarget::Product(id),
                    (None, Some(id)) => ReviewTarget::Service(id),
                    (None, None) => anyhow::bail!("--product hoặc --service là bắt buộc"),
                };
                let review = api.reviews().submit(target, &name, rating, comment).await?;
                println!("Cảm ơn bạn đã đánh giá ({} sao)", review.rating);
            }
        },

        Command::Stats { range } => {
            let overview = api.stats().overview(range).await?;
            let today = now
                .with_timezone(&shop_client::mapper::time::store_offset())
                .date_naive();
            emit(json, &overview, |o| render::stats(o, range.days(), today))?;
        }
        Command::Info => {
            let info = api.content().site_info().await?;
            emit(json, &info, render::site_info)?;
        }
        Command::Banners => {
            let banners = api.content().banners().await?;
            emit(json, &banners, |b| render::banners(b))?;
        }
    }
    Ok(())
}

async fn run_board(command: BoardCommand, app: &App) -> anyhow::Result<()> {
    let api = &app.api;
    let bus = app.bus.clone();
    match command {
        BoardCommand::Show { tab } => {
            let controller = BoardController::load(api, bus, tab).await?;
            print!("{}", render::board(controller.board()));
        }
        BoardCommand::Move { id, to, tab } => {
            let mut controller = BoardController::load(api, bus, tab).await?;
            match controller.move_card(id, to).await? {
                None => println!("#{id} đã ở cột \"{}\"", to.label()),
                Some(outcome) => {
                    println!("#{id}: {} → {}", outcome.from.label(), outcome.to.label());
                    if let Some(report) = &outcome.completion {
                        print!("{}", render::completion(report));
                    }
                }
            }
        }
        BoardCommand::Edit {
            id,
            tab,
            name,
            email,
            phone,
            address,
            description,
            status,
        } => {
            let mut controller = BoardController::load(api, bus, tab).await?;
            let edit = RequestEdit {
                name,
                email,
                phone,
                address,
                description,
                status,
            };
            if let Some(report) = controller.edit(id, edit).await? {
                print!("{}", render::completion(&report));
            }
            println!("Đã lưu yêu cầu #{id}");
        }
        BoardCommand::Archive { id, tab } => {
            let mut controller = BoardController::load(api, bus, tab).await?;
            controller.archive(id).await?;
            println!("Đã lưu trữ yêu cầu #{id}");
        }
        BoardCommand::Restore { id } => {
            let mut controller = BoardController::load(api, bus, BoardTab::History).await?;
            controller.restore(id).await?;
            println!("Đã khôi phục yêu cầu #{id}");
        }
    }
    Ok(())
}
