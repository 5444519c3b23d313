//! Banners Page
//!
//! Home-screen banners. An image can be uploaded or given as a URL.

use leptos::prelude::*;

use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec, Rule};
use crate::media::media_url;
use crate::models::Banner;
use crate::resource::{AdminResource, Badge, CardView, Tone};

#[derive(Debug, Clone, Copy)]
pub struct Banners;

impl AdminResource for Banners {
    type Item = Banner;

    const ENDPOINT: &'static str = "/banners";
    const SINGULAR: &'static str = "Banner";
    const PLURAL: &'static str = "Banners";

    fn id(item: &Banner) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("title", "Title", FieldKind::Text).required(),
            FieldSpec::new("linkUrl", "Link URL", FieldKind::Url).placeholder("https://"),
            FieldSpec::new("image", "Image", FieldKind::File { accept: "image/*" }).required(),
            FieldSpec::new("imageUrl", "Or image URL", FieldKind::Url).placeholder("https://"),
            FieldSpec::new("order", "Display order", FieldKind::Number),
            FieldSpec::new("isActive", "Active", FieldKind::Checkbox),
        ]
    }

    fn rules() -> Vec<Rule> {
        vec![Rule::OneOf("image", "imageUrl")]
    }

    fn card(item: &Banner, config: &AdminConfig) -> CardView {
        let image = media_url(item.image.as_deref(), config).or_else(|| media_url(item.image_url.as_deref(), config));
        let status = if item.is_active {
            Badge::new("Active", Tone::Good)
        } else {
            Badge::new("Inactive", Tone::Neutral)
        };
        let mut details = Vec::new();
        if let Some(link) = item.link_url.as_ref().filter(|l| !l.is_empty()) {
            details.push(("Link", link.clone()));
        }
        if let Some(order) = item.order {
            details.push(("Order", order.to_string()));
        }
        CardView {
            title: item.title.clone(),
            subtitle: None,
            image,
            badges: vec![status],
            details,
        }
    }
}

#[component]
pub fn BannersPage() -> impl IntoView {
    view! { <ResourcePage resource=Banners/> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::forms::{validate, FormValues};

    #[test]
    fn test_image_or_url_required() {
        let specs = Banners::fields();
        let rules = Banners::rules();
        let mut values = FormValues::empty(&specs);
        values.set_text("title", "Ramadan Stories".to_string());

        assert!(matches!(validate(&specs, &rules, &values), Err(ValidationError::OneOf(_, _))));

        values.attach_file("image", Some("ramadan.png".to_string()));
        assert!(validate(&specs, &rules, &values).is_ok());
    }

    #[test]
    fn test_card_prefers_uploaded_image() {
        let banner = Banner {
            id: "b1".to_string(),
            title: "Eid".to_string(),
            image: Some("banners/eid.png".to_string()),
            image_url: Some("https://example.com/other.png".to_string()),
            is_active: true,
            order: Some(2),
            ..Banner::default()
        };
        let card = Banners::card(&banner, &AdminConfig::default());
        assert_eq!(card.image.as_deref(), Some("https://cdn.zaitoon.app/banners/eid.png"));
        assert_eq!(card.badges[0].tone, Tone::Good);
        assert_eq!(card.details, vec![("Order", "2".to_string())]);
    }
}
