//! Videos Page

use leptos::prelude::*;

use super::stories::{publish_badge, PUBLISH_OPTIONS};
use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec, Rule};
use crate::media::media_url;
use crate::models::Video;
use crate::resource::{AdminResource, CardView};

const CATEGORIES: &[(&str, &str)] = &[
    ("cartoons", "Cartoons"),
    ("songs", "Songs"),
    ("learning", "Learning"),
    ("quran", "Quran"),
];

#[derive(Debug, Clone, Copy)]
pub struct Videos;

impl AdminResource for Videos {
    type Item = Video;

    const ENDPOINT: &'static str = "/videos";
    const SINGULAR: &'static str = "Video";
    const PLURAL: &'static str = "Videos";

    fn id(item: &Video) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("titleEn", "Title (English)", FieldKind::Text).required(),
            FieldSpec::new("titleAr", "Title (Arabic)", FieldKind::Text).required(),
            FieldSpec::new("videoUrl", "Video URL", FieldKind::Url).required().placeholder("https://"),
            FieldSpec::new("video", "Or upload video", FieldKind::File { accept: "video/*" }),
            FieldSpec::new("thumbnail", "Thumbnail", FieldKind::File { accept: "image/*" }),
            FieldSpec::new("category", "Category", FieldKind::Select(CATEGORIES)),
            FieldSpec::new("durationSeconds", "Duration (seconds)", FieldKind::Number),
            FieldSpec::new("status", "Status", FieldKind::Select(PUBLISH_OPTIONS)).required(),
        ]
    }

    fn rules() -> Vec<Rule> {
        vec![Rule::OneOf("videoUrl", "video")]
    }

    fn card(item: &Video, config: &AdminConfig) -> CardView {
        let mut details = Vec::new();
        if let Some(category) = &item.category {
            details.push(("Category", category.clone()));
        }
        if let Some(seconds) = item.duration_seconds {
            details.push(("Duration", format_duration(seconds)));
        }
        if let Some(url) = media_url(item.video_url.as_deref(), config) {
            details.push(("URL", url));
        }
        CardView {
            title: item.title_en.clone(),
            subtitle: Some(item.title_ar.clone()).filter(|t| !t.is_empty()),
            image: media_url(item.thumbnail.as_deref(), config),
            badges: vec![publish_badge(item.status)],
            details,
        }
    }
}

/// `m:ss`
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[component]
pub fn VideosPage() -> impl IntoView {
    view! { <ResourcePage resource=Videos/> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(95), "1:35");
        assert_eq!(format_duration(600), "10:00");
    }
}
