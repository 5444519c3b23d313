//! Notifications Page
//!
//! Push notifications are sent on create, so they can be removed but not edited.

use leptos::prelude::*;

use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec};
use crate::media::media_url;
use crate::models::{format_timestamp, Notification};
use crate::resource::{AdminResource, Badge, CardView, Tone};

const AUDIENCES: &[(&str, &str)] = &[("all", "Everyone"), ("kids", "Kids"), ("parents", "Parents")];

#[derive(Debug, Clone, Copy)]
pub struct Notifications;

impl AdminResource for Notifications {
    type Item = Notification;

    const ENDPOINT: &'static str = "/notifications";
    const SINGULAR: &'static str = "Notification";
    const PLURAL: &'static str = "Notifications";
    const CAN_EDIT: bool = false;

    fn id(item: &Notification) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("titleEn", "Title (English)", FieldKind::Text).required(),
            FieldSpec::new("titleAr", "Title (Arabic)", FieldKind::Text).required(),
            FieldSpec::new("bodyEn", "Message (English)", FieldKind::TextArea).required(),
            FieldSpec::new("bodyAr", "Message (Arabic)", FieldKind::TextArea).required(),
            FieldSpec::new("audience", "Audience", FieldKind::Select(AUDIENCES)).required(),
            FieldSpec::new("image", "Image", FieldKind::File { accept: "image/*" }),
        ]
    }

    fn card(item: &Notification, config: &AdminConfig) -> CardView {
        let mut details = vec![("Message", item.body_en.clone())];
        if let Some(sent) = &item.sent_at {
            details.push(("Sent", format_timestamp(sent)));
        }
        CardView {
            title: item.title_en.clone(),
            subtitle: Some(item.title_ar.clone()).filter(|t| !t.is_empty()),
            image: media_url(item.image.as_deref(), config),
            badges: vec![Badge::new(item.audience.clone().unwrap_or_else(|| "all".to_string()), Tone::Neutral)],
            details,
        }
    }
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    view! { <ResourcePage resource=Notifications/> }
}
