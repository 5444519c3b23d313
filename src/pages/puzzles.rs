//! Puzzles Page

use leptos::prelude::*;

use crate::components::ResourcePage;
use crate::config::AdminConfig;
use crate::forms::{FieldKind, FieldSpec};
use crate::media::media_url;
use crate::models::Puzzle;
use crate::resource::{AdminResource, Badge, CardView, Tone};

const DIFFICULTY: &[(&str, &str)] = &[("easy", "Easy"), ("medium", "Medium"), ("hard", "Hard")];

#[derive(Debug, Clone, Copy)]
pub struct Puzzles;

impl AdminResource for Puzzles {
    type Item = Puzzle;

    const ENDPOINT: &'static str = "/puzzles";
    const SINGULAR: &'static str = "Puzzle";
    const PLURAL: &'static str = "Puzzles";

    fn id(item: &Puzzle) -> String {
        item.id.clone()
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("titleEn", "Title (English)", FieldKind::Text).required(),
            FieldSpec::new("titleAr", "Title (Arabic)", FieldKind::Text).required(),
            FieldSpec::new("difficulty", "Difficulty", FieldKind::Select(DIFFICULTY)).required(),
            FieldSpec::new("pieces", "Pieces", FieldKind::Number),
            FieldSpec::new("image", "Puzzle image", FieldKind::File { accept: "image/*" }).required(),
        ]
    }

    fn card(item: &Puzzle, config: &AdminConfig) -> CardView {
        let badges = item
            .difficulty
            .as_deref()
            .map(|d| {
                let tone = match d {
                    "easy" => Tone::Good,
                    "hard" => Tone::Bad,
                    _ => Tone::Warn,
                };
                Badge::new(d, tone)
            })
            .into_iter()
            .collect();
        CardView {
            title: item.title_en.clone(),
            subtitle: Some(item.title_ar.clone()).filter(|t| !t.is_empty()),
            image: media_url(item.image.as_deref(), config),
            badges,
            details: item.pieces.map(|p| ("Pieces", p.to_string())).into_iter().collect(),
        }
    }
}

#[component]
pub fn PuzzlesPage() -> impl IntoView {
    view! { <ResourcePage resource=Puzzles/> }
}
