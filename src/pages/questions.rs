//! Questions Page
//!
//! Quiz questions with parallel English/Arabic option lists. The correct
//! answer is a zero-based index into the options.

use leptos::prelude::*;

use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec, Rule};
use crate::models::Question;
use crate::resource::{AdminResource, Badge, CardView, Tone};

#[derive(Debug, Clone, Copy)]
pub struct Questions;

impl AdminResource for Questions {
    type Item = Question;

    const ENDPOINT: &'static str = "/questions";
    const SINGULAR: &'static str = "Question";
    const PLURAL: &'static str = "Questions";

    fn id(item: &Question) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("quizId", "Quiz", FieldKind::Remote { endpoint: "/quizzes", label_key: "titleEn" }).required(),
            FieldSpec::new("questionEn", "Question (English)", FieldKind::TextArea).required(),
            FieldSpec::new("questionAr", "Question (Arabic)", FieldKind::TextArea).required(),
            FieldSpec::new("optionsEn", "Options (English)", FieldKind::Lines).required(),
            FieldSpec::new("optionsAr", "Options (Arabic)", FieldKind::Lines).required(),
            FieldSpec::new("correctIndex", "Correct option (0 = first)", FieldKind::Number).required(),
        ]
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::SameLength("optionsEn", "optionsAr"),
            Rule::IndexWithin("correctIndex", "optionsEn"),
        ]
    }

    fn card(item: &Question, _config: &AdminConfig) -> CardView {
        let details = item
            .options_en
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let marker = if i == item.correct_index { "✓" } else { "" };
                ("Option", format!("{}. {} {}", i, option, marker).trim_end().to_string())
            })
            .collect();
        CardView {
            title: item.question_en.clone(),
            subtitle: Some(item.question_ar.clone()).filter(|q| !q.is_empty()),
            image: None,
            badges: vec![Badge::new(item.quiz_label(), Tone::Neutral)],
            details,
        }
    }
}

#[component]
pub fn QuestionsPage() -> impl IntoView {
    view! { <ResourcePage resource=Questions/> }
}
