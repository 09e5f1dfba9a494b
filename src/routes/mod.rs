pub mod application;
pub mod company;
pub mod health;
pub mod resume;
pub mod user;
pub mod vacancy;

use axum::{
    handler::Handler,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth::require_bearer_auth, AppState};

/// Builds the HTTP surface. Mutating routes pass through bearer auth; reads
/// are public.
pub fn router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), require_bearer_auth);

    let users = Router::new()
        .route("/users", get(user::list_users).post(user::create_user))
        .route("/users/login", post(user::login))
        .route("/users/me", get(user::me.layer(auth.clone())))
        .route(
            "/users/:id",
            get(user::get_user).put(user::update_user.layer(auth.clone())),
        );

    let companies = Router::new()
        .route(
            "/companies",
            get(company::list_companies).post(company::create_company.layer(auth.clone())),
        )
        .route(
            "/companies/:id",
            get(company::get_company)
                .put(company::update_company.layer(auth.clone()))
                .delete(company::delete_company.layer(auth.clone())),
        );

    let vacancies = Router::new()
        .route(
            "/vacancies",
            get(vacancy::list_vacancies).post(vacancy::create_vacancy.layer(auth.clone())),
        )
        .route("/vacancies/search", get(vacancy::search_vacancies))
        .route("/vacancies/user/:id", get(vacancy::list_user_vacancies))
        .route(
            "/vacancies/:id",
            get(vacancy::get_vacancy)
                .put(vacancy::update_vacancy.layer(auth.clone()))
                .delete(vacancy::delete_vacancy.layer(auth.clone())),
        );

    let applications = Router::new()
        .route(
            "/applications",
            post(application::create_application.layer(auth.clone())),
        )
        .route(
            "/applications/:id",
            get(application::get_application)
                .patch(application::update_application_status.layer(auth.clone())),
        )
        .route(
            "/applications/user/:id",
            get(application::list_user_applications),
        )
        .route(
            "/applications/vacancy/:id",
            get(application::list_vacancy_applications),
        );

    let resumes = Router::new()
        .route(
            "/resumes",
            get(resume::list_resumes).post(resume::create_resume.layer(auth.clone())),
        )
        .route(
            "/resumes/:id",
            get(resume::get_resume)
                .put(resume::update_resume.layer(auth.clone()))
                .delete(resume::delete_resume.layer(auth)),
        );

    Router::new()
        .route("/health", get(health::health))
        .merge(users)
        .merge(companies)
        .merge(vacancies)
        .merge(applications)
        .merge(resumes)
        .with_state(state)
}
