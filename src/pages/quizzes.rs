//! Quizzes Page

use leptos::prelude::*;

use super::stories::{publish_badge, PUBLISH_OPTIONS};
use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec};
use crate::models::Quiz;
use crate::resource::{AdminResource, CardView};

#[derive(Debug, Clone, Copy)]
pub struct Quizzes;

impl AdminResource for Quizzes {
    type Item = Quiz;

    const ENDPOINT: &'static str = "/quizzes";
    const SINGULAR: &'static str = "Quiz";
    const PLURAL: &'static str = "Quizzes";

    fn id(item: &Quiz) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("titleEn", "Title (English)", FieldKind::Text).required(),
            FieldSpec::new("titleAr", "Title (Arabic)", FieldKind::Text).required(),
            FieldSpec::new("descriptionEn", "Description", FieldKind::TextArea),
            FieldSpec::new("category", "Category", FieldKind::Text),
            FieldSpec::new("timeLimit", "Time limit (minutes)", FieldKind::Number),
            FieldSpec::new("status", "Status", FieldKind::Select(PUBLISH_OPTIONS)).required(),
        ]
    }

    fn card(item: &Quiz, _config: &AdminConfig) -> CardView {
        let mut details = Vec::new();
        if let Some(category) = item.category.as_ref().filter(|c| !c.is_empty()) {
            details.push(("Category", category.clone()));
        }
        if let Some(minutes) = item.time_limit {
            details.push(("Time limit", format!("{} min", minutes)));
        }
        CardView {
            title: item.title_en.clone(),
            subtitle: Some(item.description_en.clone()).filter(|d| !d.is_empty()),
            image: None,
            badges: vec![publish_badge(item.status)],
            details,
        }
    }
}

#[component]
pub fn QuizzesPage() -> impl IntoView {
    view! { <ResourcePage resource=Quizzes/> }
}
