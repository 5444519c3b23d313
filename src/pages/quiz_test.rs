//! Quiz Test Page
//!
//! Lets staff take a quiz the way a player would: player login, pick a quiz,
//! answer, score locally and post the attempt.

use leptos::prelude::*;
use serde::Serialize;

use crate::api::{player_login, ApiClient, HttpMethod, ListParams};
use crate::components::{use_status, LoadingPanel};
use crate::context::use_app_context;
use crate::error::ApiResult;
use crate::models::{Question, Quiz};
use crate::session::{AuthState, BrowserStorage, SessionKeys, SessionStore};
use crate::task::TaskScope;

/// Number of answers matching `correct_index`
pub fn score_answers(questions: &[Question], answers: &[Option<usize>]) -> u32 {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| **a == Some(q.correct_index))
        .count() as u32
}

/// Body of `POST /quiz-attempts`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSubmission {
    pub quiz_id: String,
    pub answers: Vec<Option<usize>>,
    pub score: u32,
    pub total_questions: u32,
}

impl AttemptSubmission {
    pub fn new(quiz_id: &str, questions: &[Question], answers: &[Option<usize>]) -> Self {
        let mut answers = answers.to_vec();
        answers.resize(questions.len(), None);
        Self {
            quiz_id: quiz_id.to_string(),
            score: score_answers(questions, &answers),
            total_questions: questions.len() as u32,
            answers,
        }
    }
}

async fn load_questions(client: &ApiClient, quiz_id: &str) -> ApiResult<Vec<Question>> {
    let params = ListParams::default().with_filter("quizId", quiz_id);
    Ok(client.get_list::<Question>("/questions", &params).await?.items)
}

#[component]
pub fn QuizTestPage() -> impl IntoView {
    let ctx = use_app_context();
    let status = use_status();
    let scope = StoredValue::new(TaskScope::bound());
    status.dismiss_blocking_on_cleanup();

    let auth = RwSignal::new(AuthState::Loading);
    let mut player = SessionStore::new(BrowserStorage, SessionKeys::PLAYER);
    player.subscribe(move |state| auth.set(state.clone()));
    player.load();
    let player = StoredValue::new_local(player);

    let client = move || ApiClient::new(ctx.config().api_base_url, auth.with_untracked(AuthState::token));

    let quizzes = RwSignal::new(Vec::<Quiz>::new());
    let active_quiz = RwSignal::new(None::<Quiz>);
    let questions = RwSignal::new(Vec::<Question>::new());
    let answers = RwSignal::new(Vec::<Option<usize>>::new());
    let result = RwSignal::new(None::<AttemptSubmission>);
    let busy = RwSignal::new(false);
    let highlight_unanswered = RwSignal::new(false);

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    // Quiz list follows the player session
    Effect::new(move |_| {
        if !auth.with(AuthState::is_authenticated) {
            quizzes.set(Vec::new());
            return;
        }
        let client = client();
        scope.try_with_value(|s| {
            s.spawn(async move {
                match client.get_list::<Quiz>("/quizzes", &ListParams::default()).await {
                    Ok(page) => quizzes.set(page.items),
                    Err(err) => status.error(err.user_message()),
                }
            })
        });
    });

    let login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let anonymous = ApiClient::new(ctx.config().api_base_url, None);
        let (email, password) = (email.get_untracked(), password.get_untracked());
        busy.set(true);
        scope.try_with_value(|s| {
            s.spawn(async move {
                let outcome = player_login(&anonymous, &email, &password).await;
                busy.set(false);
                match outcome {
                    Ok(grant) => {
                        if let Some(Err(err)) = player.try_update_value(|p| p.login(grant)) {
                            status.error(err.to_string());
                        }
                    }
                    Err(err) => status.error(err.user_message()),
                }
            })
        });
    };

    let open_quiz = move |quiz: Quiz| {
        let client = client();
        let quiz_id = quiz.id.clone();
        active_quiz.set(Some(quiz));
        result.set(None);
        questions.set(Vec::new());
        busy.set(true);
        scope.try_with_value(|s| {
            s.spawn(async move {
                let loaded = load_questions(&client, &quiz_id).await;
                busy.set(false);
                match loaded {
                    Ok(list) => {
                        answers.set(vec![None; list.len()]);
                        highlight_unanswered.set(false);
                        questions.set(list);
                    }
                    Err(err) => status.error(err.user_message()),
                }
            })
        });
    };

    let send_attempt = move || {
        let Some(quiz) = active_quiz.get_untracked() else { return };
        let attempt = questions.with_untracked(|qs| answers.with_untracked(|a| AttemptSubmission::new(&quiz.id, qs, a)));
        let client = client();
        busy.set(true);
        scope.try_with_value(|s| {
            s.spawn(async move {
                let sent = client.send_json(HttpMethod::Post, "/quiz-attempts", &attempt).await;
                busy.set(false);
                match sent {
                    Ok(_) => {
                        log::info!("[quiz-test] attempt saved: {}/{}", attempt.score, attempt.total_questions);
                        result.set(Some(attempt));
                    }
                    Err(err) => status.error(err.user_message()),
                }
            })
        });
    };

    // Unanswered questions need a second look before the attempt is sent
    let submit = move |_| {
        let unanswered = answers.with_untracked(|a| a.iter().filter(|x| x.is_none()).count());
        if unanswered == 0 {
            send_attempt();
            return;
        }
        status.confirm_with_cancel(
            "Submit anyway?",
            format!("{} question(s) have no answer yet.", unanswered),
            move || {
                highlight_unanswered.set(false);
                send_attempt();
            },
            move || highlight_unanswered.set(true),
        );
    };

    let logout = move |_| {
        player.update_value(|p| p.logout());
        active_quiz.set(None);
        questions.set(Vec::new());
        result.set(None);
    };

    let login_form = move || {
        view! {
            <form class="login-card" on:submit=login>
                <h2>"Player login"</h2>
                <input type="email" placeholder="Email" required prop:value=move || email.get() on:input=move |ev| set_email.set(event_target_value(&ev))/>
                <input type="password" placeholder="Password" required prop:value=move || password.get() on:input=move |ev| set_password.set(event_target_value(&ev))/>
                <button type="submit" class="btn primary" disabled=move || busy.get()>"Sign in"</button>
            </form>
        }
    };

    let quiz_list = move || {
        view! {
            <div class="quiz-picker">
                <For
                    each=move || quizzes.get()
                    key=|quiz| quiz.id.clone()
                    children=move |quiz| {
                        let title = quiz.title_en.clone();
                        view! { <button class="btn secondary" on:click=move |_| open_quiz(quiz.clone())>{title}</button> }
                    }
                />
            </div>
        }
    };

    let question_list = move || {
        questions.with(|qs| {
            qs.iter()
                .enumerate()
                .map(|(qi, question)| {
                    let options = question.options_en.clone();
                    view! {
                        <fieldset
                            class="quiz-question"
                            class=("unanswered", move || {
                                highlight_unanswered.get() && answers.with(|a| a.get(qi).copied().flatten().is_none())
                            })
                        >
                            <legend>{format!("{}. {}", qi + 1, question.question_en)}</legend>
                            {options.into_iter().enumerate().map(|(oi, option)| view! {
                                <label class="quiz-option">
                                    <input
                                        type="radio"
                                        name=format!("q{}", qi)
                                        prop:checked=move || answers.with(|a| a.get(qi).copied().flatten() == Some(oi))
                                        on:change=move |_| answers.update(|a| {
                                            if let Some(slot) = a.get_mut(qi) {
                                                *slot = Some(oi);
                                            }
                                        })
                                    />
                                    {option}
                                </label>
                            }).collect_view()}
                        </fieldset>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <section class="quiz-test">
            <header class="page-header">
                <h1>"Quiz Test"</h1>
                <Show when=move || auth.with(AuthState::is_authenticated)>
                    <button class="btn secondary" on:click=logout>"Log out player"</button>
                </Show>
            </header>

            {move || match auth.get() {
                AuthState::Loading => view! { <LoadingPanel label="session"/> }.into_any(),
                AuthState::Unauthenticated => login_form().into_any(),
                AuthState::Authenticated(_) => view! {
                    {quiz_list}
                    {move || active_quiz.get().map(|quiz| view! {
                        <div class="quiz-runner">
                            <h2>{quiz.title_en.clone()}</h2>
                            <Show when=move || busy.get()>
                                <div class="spinner"></div>
                            </Show>
                            {question_list}
                            <Show when=move || !questions.with(Vec::is_empty)>
                                <button class="btn primary" disabled=move || busy.get() on:click=submit>"Submit answers"</button>
                            </Show>
                            {move || result.get().map(|r| view! {
                                <p class="quiz-result">{format!("You scored {} out of {}", r.score, r.total_questions)}</p>
                            })}
                        </div>
                    })}
                }
                .into_any(),
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        Question {
            options_en: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_index: correct,
            ..Question::default()
        }
    }

    #[test]
    fn test_scoring_counts_correct_answers_only() {
        let questions = vec![question(0), question(2), question(1)];
        assert_eq!(score_answers(&questions, &[Some(0), Some(1), Some(1)]), 2);
        assert_eq!(score_answers(&questions, &[None, None, None]), 0);
        assert_eq!(score_answers(&questions, &[Some(0)]), 1);
    }

    #[test]
    fn test_submission_pads_unanswered() {
        let questions = vec![question(1), question(1)];
        let attempt = AttemptSubmission::new("quiz-7", &questions, &[Some(1)]);

        assert_eq!(attempt.answers, vec![Some(1), None]);
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.total_questions, 2);
        assert_eq!(
            serde_json::to_value(&attempt).unwrap(),
            serde_json::json!({ "quizId": "quiz-7", "answers": [1, null], "score": 1, "totalQuestions": 2 })
        );
    }
}
