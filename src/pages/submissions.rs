//! Kid Submissions Page
//!
//! Drawings and recordings sent in by kids. Staff review them: no create,
//! edit only touches status and feedback.

use leptos::prelude::*;

use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec};
use crate::media::media_url;
use crate::models::{format_timestamp, KidSubmission, ReviewStatus};
use crate::resource::{AdminResource, Badge, CardView, Tone};

const REVIEW_OPTIONS: &[(&str, &str)] = &[("pending", "Pending"), ("approved", "Approved"), ("rejected", "Rejected")];

#[derive(Debug, Clone, Copy)]
pub struct Submissions;

impl AdminResource for Submissions {
    type Item = KidSubmission;

    const ENDPOINT: &'static str = "/kids-submissions";
    const SINGULAR: &'static str = "Submission";
    const PLURAL: &'static str = "Kid Submissions";
    const CAN_CREATE: bool = false;

    fn id(item: &KidSubmission) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("status", "Review status", FieldKind::Select(REVIEW_OPTIONS)).required(),
            FieldSpec::new("feedback", "Feedback for the kid", FieldKind::TextArea),
        ]
    }

    fn card(item: &KidSubmission, config: &AdminConfig) -> CardView {
        let media = media_url(item.media_url.as_deref(), config);
        let is_image = item.kind.as_deref().map_or(true, |k| k == "image" || k == "drawing");

        let mut details = vec![("By", kid_label(item))];
        if let (Some(url), false) = (&media, is_image) {
            details.push(("Media", url.clone()));
        }
        if let Some(feedback) = item.feedback.as_ref().filter(|f| !f.is_empty()) {
            details.push(("Feedback", feedback.clone()));
        }
        if let Some(created) = &item.created_at {
            details.push(("Sent", format_timestamp(created)));
        }

        CardView {
            title: item.title.clone(),
            subtitle: item.kind.clone(),
            image: media.filter(|_| is_image),
            badges: vec![review_badge(item.status)],
            details,
        }
    }
}

fn kid_label(item: &KidSubmission) -> String {
    match item.age {
        Some(age) => format!("{} ({})", item.kid_name, age),
        None => item.kid_name.clone(),
    }
}

fn review_badge(status: ReviewStatus) -> Badge {
    let tone = match status {
        ReviewStatus::Pending => Tone::Warn,
        ReviewStatus::Approved => Tone::Good,
        ReviewStatus::Rejected => Tone::Bad,
        ReviewStatus::Unknown => Tone::Neutral,
    };
    Badge::new(status.as_str(), tone)
}

#[component]
pub fn SubmissionsPage() -> impl IntoView {
    view! { <ResourcePage resource=Submissions/> }
}
