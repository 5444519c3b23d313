//! Quiz Attempts Page
//!
//! Read-only leaderboard table. Search is debounced; the date range only
//! applies when "Apply" is clicked.

use leptos::prelude::*;

use crate::api::parse_date_input;
use crate::components::{tone_class, use_status, ErrorPanel, LoadingPanel, PaginationBar};
use crate::config::{AdminConfig, SEARCH_DEBOUNCE_MS};
use crate::crud::use_crud;
use crate::debounce::Debounced;
use crate::models::{format_timestamp, Pagination, QuizAttempt};
use crate::resource::{AdminResource, Badge, CardView, LoadPhase, Tone};

#[derive(Debug, Clone, Copy)]
pub struct QuizAttempts;

impl AdminResource for QuizAttempts {
    type Item = QuizAttempt;

    const ENDPOINT: &'static str = "/quiz-attempts";
    const SINGULAR: &'static str = "Quiz Attempt";
    const PLURAL: &'static str = "Quiz Attempts";
    const CAN_CREATE: bool = false;
    const CAN_EDIT: bool = false;
    const CAN_DELETE: bool = false;
    const PAGINATED: bool = true;

    fn id(item: &QuizAttempt) -> String {
        item.id.clone()
    }

    fn card(item: &QuizAttempt, _config: &AdminConfig) -> CardView {
        CardView {
            title: item.user.name.clone(),
            subtitle: Some(item.quiz.title_en.clone()),
            image: None,
            badges: vec![score_badge(item)],
            details: vec![("Score", format!("{}/{}", item.score, item.total_questions))],
        }
    }
}

/// Leaderboard position of the `index`-th row on the current page
pub fn rank(pagination: &Pagination, index: usize) -> u64 {
    let page = u64::from(pagination.page.max(1));
    (page - 1) * u64::from(pagination.limit) + index as u64 + 1
}

fn score_badge(attempt: &QuizAttempt) -> Badge {
    let pct = attempt.percentage();
    let tone = if pct >= 80 {
        Tone::Good
    } else if pct >= 50 {
        Tone::Warn
    } else {
        Tone::Bad
    };
    Badge::new(format!("{}%", pct), tone)
}

fn format_seconds(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) if s >= 60 => format!("{}m {}s", s / 60, s % 60),
        Some(s) => format!("{}s", s),
        None => "-".to_string(),
    }
}

#[component]
pub fn QuizAttemptsPage() -> impl IntoView {
    let crud = use_crud::<QuizAttempts>();
    let status = use_status();

    let (search, set_search) = signal(String::new());
    let (start_date, set_start_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());

    let search_settled = Debounced::new(SEARCH_DEBOUNCE_MS, move |query: String| {
        crud.apply_filter(move |params| {
            let query = query.trim().to_string();
            params.search = (!query.is_empty()).then_some(query);
        });
    });

    let apply_dates = move |_| {
        let start = parse_date_input(&start_date.get_untracked());
        let end = parse_date_input(&end_date.get_untracked());
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                status.error("Start date must be on or before the end date.");
                return;
            }
        }
        crud.apply_filter(move |params| {
            params.start_date = start;
            params.end_date = end;
        });
    };

    let clear = move |_| {
        search_settled.cancel();
        set_search.set(String::new());
        set_start_date.set(String::new());
        set_end_date.set(String::new());
        crud.apply_filter(|params| {
            params.search = None;
            params.start_date = None;
            params.end_date = None;
        });
    };

    let table = move || {
        crud.state.with(|state| {
            if state.items.is_empty() && (state.is_loading() || state.phase == LoadPhase::Idle) {
                return view! { <LoadingPanel label=QuizAttempts::PLURAL/> }.into_any();
            }
            if let (true, Some(message)) = (state.items.is_empty(), state.error()) {
                return view! {
                    <ErrorPanel message=message.to_string() on_retry=Callback::new(move |_| crud.reload())/>
                }
                .into_any();
            }
            if state.items.is_empty() {
                return view! { <div class="empty-state"><p>"No quiz attempts match these filters."</p></div> }
                    .into_any();
            }

            let rows = state
                .items
                .iter()
                .enumerate()
                .map(|(i, attempt)| {
                    let badge = score_badge(attempt);
                    view! {
                        <tr>
                            <td class="rank">{rank(&state.pagination, i)}</td>
                            <td>
                                <div>{attempt.user.name.clone()}</div>
                                <div class="muted">{attempt.user.email.clone()}</div>
                            </td>
                            <td>{attempt.quiz.title_en.clone()}</td>
                            <td>{format!("{}/{}", attempt.score, attempt.total_questions)}</td>
                            <td><span class=tone_class(badge.tone)>{badge.label}</span></td>
                            <td>{format_seconds(attempt.duration_seconds)}</td>
                            <td>{attempt.created_at.as_deref().map(format_timestamp).unwrap_or_default()}</td>
                        </tr>
                    }
                })
                .collect_view();

            view! {
                <table class="data-table" class:refreshing=state.is_loading()>
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Player"</th>
                            <th>"Quiz"</th>
                            <th>"Score"</th>
                            <th>"%"</th>
                            <th>"Time"</th>
                            <th>"Date"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            }
            .into_any()
        })
    };

    view! {
        <section class="resource-page">
            <header class="page-header">
                <h1>{QuizAttempts::PLURAL}</h1>
            </header>

            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Search by player or quiz..."
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_search.set(value.clone());
                        search_settled.call(value);
                    }
                />
                <label>
                    "From"
                    <input type="date" prop:value=move || start_date.get() on:input=move |ev| set_start_date.set(event_target_value(&ev))/>
                </label>
                <label>
                    "To"
                    <input type="date" prop:value=move || end_date.get() on:input=move |ev| set_end_date.set(event_target_value(&ev))/>
                </label>
                <button class="btn primary" on:click=apply_dates>"Apply"</button>
                <button class="btn secondary" on:click=clear>"Clear"</button>
            </div>

            {table}

            <PaginationBar
                pagination=Signal::derive(move || crud.state.with(|s| s.pagination.clone()))
                disabled=Signal::derive(move || crud.state.with(|s| s.is_loading()))
                on_page=Callback::new(move |page| crud.go_to_page(page))
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttemptQuiz, AttemptUser};

    #[test]
    fn test_rank_continues_across_pages() {
        let first = Pagination { page: 1, limit: 10, total: 25, total_pages: 3 };
        let third = Pagination { page: 3, ..first.clone() };
        assert_eq!(rank(&first, 0), 1);
        assert_eq!(rank(&first, 9), 10);
        assert_eq!(rank(&third, 0), 21);
    }

    #[test]
    fn test_score_badge_tones() {
        let attempt = |score| QuizAttempt {
            user: AttemptUser { name: "Lina".to_string(), email: "lina@x".to_string() },
            quiz: AttemptQuiz { title_en: "Animals".to_string() },
            score,
            total_questions: 10,
            ..QuizAttempt::default()
        };
        assert_eq!(score_badge(&attempt(9)), Badge::new("90%", Tone::Good));
        assert_eq!(score_badge(&attempt(5)), Badge::new("50%", Tone::Warn));
        assert_eq!(score_badge(&attempt(2)), Badge::new("20%", Tone::Bad));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Some(42)), "42s");
        assert_eq!(format_seconds(Some(125)), "2m 5s");
        assert_eq!(format_seconds(None), "-");
    }
}
