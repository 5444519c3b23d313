//! Pages
//!
//! One module per route. Resource pages pair an `AdminResource` marker with
//! a thin component around `ResourcePage`.

mod banners;
mod dashboard;
mod login;
mod not_found;
mod notifications;
mod puzzles;
mod questions;
mod quiz_attempts;
mod quiz_test;
mod quizzes;
mod stories;
mod submissions;
mod support;
mod videos;

pub use banners::BannersPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use notifications::NotificationsPage;
pub use puzzles::PuzzlesPage;
pub use questions::QuestionsPage;
pub use quiz_attempts::QuizAttemptsPage;
pub use quiz_test::QuizTestPage;
pub use quizzes::QuizzesPage;
pub use stories::StoriesPage;
pub use submissions::SubmissionsPage;
pub use support::SupportPage;
pub use videos::VideosPage;
