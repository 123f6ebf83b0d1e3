//! Banner and site info mappers

use shared::dto::{BannerDto, SiteInfoDto};
use shared::models::{Banner, BannerLayout, SiteInfo};

use super::non_empty;

/// Unknown or missing layouts fall back to a centered caption
pub fn banner_layout(raw: Option<&str>) -> BannerLayout {
    match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
        Some("left") => BannerLayout::Left,
        Some("right") => BannerLayout::Right,
        Some("full") | Some("image") => BannerLayout::Full,
        _ => BannerLayout::Center,
    }
}

pub fn banner(dto: BannerDto) -> Banner {
    Banner {
        id: dto.id,
        title: non_empty(dto.title).unwrap_or_default(),
        subtitle: non_empty(dto.subtitle).unwrap_or_default(),
        image: dto.image,
        link: non_empty(dto.link),
        layout: banner_layout(dto.layout.as_deref()),
        position: dto.position.unwrap_or(0),
        is_active: dto.is_active.unwrap_or(true),
    }
}

/// Active banners in display order
pub fn active_banners(dtos: Vec<BannerDto>) -> Vec<Banner> {
    let mut banners: Vec<Banner> = dtos.into_iter().map(banner).filter(|b| b.is_active).collect();
    banners.sort_by_key(|b| (b.position, b.id));
    banners
}

pub fn site_info(dto: SiteInfoDto) -> SiteInfo {
    SiteInfo {
        name: non_empty(dto.name).unwrap_or_default(),
        address: non_empty(dto.address).unwrap_or_default(),
        phone: non_empty(dto.phone).unwrap_or_default(),
        email: non_empty(dto.email).unwrap_or_default(),
        contact_email: non_empty(dto.contact_email),
        hotline: non_empty(dto.hotline),
        facebook: non_empty(dto.facebook),
        zalo: non_empty(dto.zalo),
        working_hours: non_empty(dto.working_hours),
        about: non_empty(dto.about).unwrap_or_default(),
        logo: non_empty(dto.logo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_translation() {
        assert_eq!(banner_layout(Some("LEFT")), BannerLayout::Left);
        assert_eq!(banner_layout(Some("image")), BannerLayout::Full);
        assert_eq!(banner_layout(Some("diagonal")), BannerLayout::Center);
        assert_eq!(banner_layout(None), BannerLayout::Center);
    }

    #[test]
    fn test_active_banners_sorted() {
        let dtos: Vec<BannerDto> = serde_json::from_value(json!([
            {"id": 1, "image": "a.jpg", "order": 2},
            {"id": 2, "image": "b.jpg", "order": 1, "is_active": 0},
            {"id": 3, "image": "c.jpg", "position": 1, "layout": "right"}
        ]))
        .unwrap();
        let banners = active_banners(dtos);
        assert_eq!(banners.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(banners[0].layout, BannerLayout::Right);
    }

    #[test]
    fn test_site_info_notice_address_fallback() {
        let info = site_info(serde_json::from_value(json!({
            "name": "Tiệm Sửa",
            "email": "shop@example.vn",
            "contact_email": "  "
        }))
        .unwrap());
        assert_eq!(info.contact_email, None);
        assert_eq!(info.notice_address(), Some("shop@example.vn"));
    }
}
