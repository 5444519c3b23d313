//! Stories Page
//!
//! Single stories with cover art and narration audio. Media links coming
//! straight from the storage bucket are shown through the CDN.

use leptos::prelude::*;

use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec};
use crate::media::media_url;
use crate::models::{format_timestamp, PublishStatus, Story};
use crate::resource::{AdminResource, Badge, CardView, Tone};

pub const PUBLISH_OPTIONS: &[(&str, &str)] = &[("draft", "Draft"), ("published", "Published")];

const AGE_GROUPS: &[(&str, &str)] = &[("3-5", "3-5 years"), ("6-8", "6-8 years"), ("9-12", "9-12 years")];

pub fn publish_badge(status: PublishStatus) -> Badge {
    match status {
        PublishStatus::Published => Badge::new("Published", Tone::Good),
        PublishStatus::Draft => Badge::new("Draft", Tone::Warn),
        PublishStatus::Unknown => Badge::new("Unknown", Tone::Neutral),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Stories;

impl AdminResource for Stories {
    type Item = Story;

    const ENDPOINT: &'static str = "/single-stories";
    const SINGULAR: &'static str = "Story";
    const PLURAL: &'static str = "Stories";

    fn id(item: &Story) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("titleEn", "Title (English)", FieldKind::Text).required(),
            FieldSpec::new("titleAr", "Title (Arabic)", FieldKind::Text).required(),
            FieldSpec::new("descriptionEn", "Description (English)", FieldKind::TextArea),
            FieldSpec::new("descriptionAr", "Description (Arabic)", FieldKind::TextArea),
            FieldSpec::new("ageGroup", "Age group", FieldKind::Select(AGE_GROUPS)),
            FieldSpec::new("status", "Status", FieldKind::Select(PUBLISH_OPTIONS)).required(),
            FieldSpec::new("coverImage", "Cover image", FieldKind::File { accept: "image/*" }).required(),
            FieldSpec::new("audio", "Narration audio", FieldKind::File { accept: "audio/*" }),
        ]
    }

    fn card(item: &Story, config: &AdminConfig) -> CardView {
        let mut details = Vec::new();
        if let Some(age) = &item.age_group {
            details.push(("Ages", age.clone()));
        }
        if let Some(audio) = media_url(item.audio.as_deref(), config) {
            details.push(("Audio", audio));
        }
        if let Some(created) = &item.created_at {
            details.push(("Created", format_timestamp(created)));
        }
        CardView {
            title: item.title_en.clone(),
            subtitle: Some(item.title_ar.clone()).filter(|t| !t.is_empty()),
            image: media_url(item.cover_image.as_deref(), config),
            badges: vec![publish_badge(item.status)],
            details,
        }
    }
}

#[component]
pub fn StoriesPage() -> impl IntoView {
    view! { <ResourcePage resource=Stories/> }
}
