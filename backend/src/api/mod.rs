pub mod attendance;
pub mod auth;
pub mod campuses;
pub mod extract;
pub mod news;
pub mod students;
pub mod teachers;

use axum::routing::{delete, get, patch, post, put};
use axum::{Router, extract::State, http::StatusCode};

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // attendance
        .route("/attendance", get(attendance::list_attendance).post(attendance::report_presence))
        .route("/attendance/reset", post(attendance::run_reset))
        // teachers
        .route("/teachers", get(teachers::list_teachers).post(teachers::create_teacher))
        .route(
            "/teachers/{id}",
            get(teachers::get_teacher)
                .put(teachers::update_teacher)
                .delete(teachers::delete_teacher),
        )
        .route("/teachers/email/{email}", get(teachers::get_teacher_by_email))
        .route("/teachers/{id}/presence", patch(attendance::update_teacher_presence))
        .route("/teachers/{id}/attendance", get(attendance::teacher_attendance))
        // students
        .route("/students", get(students::list_students).post(students::create_student))
        .route("/students/import", post(students::import))
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/students/{id}/campus", put(students::assign_campus))
        // paths used by the existing admin UI
        .route("/import-students", post(students::import))
        .route("/users/{id}/campus", put(students::assign_campus))
        // campuses
        .route("/campuses", get(campuses::list_campuses).post(campuses::create_campus))
        .route(
            "/campuses/{id}",
            get(campuses::get_campus)
                .put(campuses::update_campus)
                .delete(campuses::delete_campus),
        )
        // news
        .route("/news", get(news::list_news).post(news::create_news))
        .route("/news/{id}", put(news::update_news).delete(news::delete_news))
        .route("/news/campus/{campus_id}", get(news::list_campus_news))
        .route("/news/title/{title}", delete(news::delete_news_by_title))
        // auth
        .route("/auth/google", get(auth::google_login))
        .route("/auth/google/callback", get(auth::google_callback))
        .route("/refresh-token", post(auth::refresh_token))
        .route("/user", get(auth::current_user))
        .route("/profile", get(auth::profile))
        .route("/api/updateProfile", put(auth::update_profile))
        .route("/logout", post(auth::logout))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
