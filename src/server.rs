use crate::config::Config;
use crate::contact::{
    ContactService, DiscordSinkProvider, Field, RawSubmission, SinkProvider, SubmissionError,
};
use crate::content;
use crate::i18n::resolver::{lang_from_cookies, language_middleware};
use crate::i18n::{Lang, LanguageStrings};
use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared, immutable per-process state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub contact: Arc<ContactService>,
}

impl AppState {
    /// State delivering contact notifications to Discord.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let provider = Arc::new(DiscordSinkProvider::new(Arc::clone(&config)));
        Self::with_sink_provider(config, provider)
    }

    pub fn with_sink_provider(config: Arc<Config>, provider: Arc<dyn SinkProvider>) -> Self {
        let contact = Arc::new(ContactService::from_config(provider, &config));
        Self { config, contact }
    }
}

pub fn app_router(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(home))
        .route("/en", get(home))
        .route("/en/", get(home))
        .route("/projects/:id", get(project_detail))
        .route("/en/projects/:id", get(project_detail))
        .layer(middleware::from_fn_with_state(
            state.config.redirect_policy,
            language_middleware,
        ));

    Router::new()
        .merge(pages)
        .route("/api/contact", post(submit_contact))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn home(Extension(lang): Extension<Lang>) -> Json<content::HomePage> {
    Json(content::home_page(lang))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Unknown and non-numeric ids both answer with the localized 404.
async fn project_detail(Extension(lang): Extension<Lang>, Path(id): Path<String>) -> Response {
    match id.parse::<u32>().ok().and_then(content::project) {
        Some(project) => Json(project.detail(lang)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: LanguageStrings::for_lang(lang).project_not_found,
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Serialize)]
struct ContactResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<Field, &'static str>>,
}

impl ContactResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            fields: None,
        }
    }

    fn failed(error: &'static str) -> Self {
        Self {
            success: false,
            error: Some(error),
            fields: None,
        }
    }
}

/// `POST /api/contact` with a form-encoded body.
///
/// Messages are localized with the visitor's `lang` cookie, Japanese otherwise.
async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<RawSubmission>, FormRejection>,
) -> Response {
    let lang = lang_from_cookies(&headers).unwrap_or_default();

    let raw = match form {
        Ok(Form(raw)) => raw,
        Err(rejection) => {
            warn!("Unreadable contact form: {}", rejection);
            let message = LanguageStrings::for_lang(lang).validation_failed;
            return (StatusCode::BAD_REQUEST, Json(ContactResponse::failed(message)))
                .into_response();
        }
    };

    match state.contact.submit(raw).await {
        Ok(()) => (StatusCode::OK, Json(ContactResponse::ok())).into_response(),
        Err(err) => {
            let status = match &err {
                SubmissionError::Rejected(_) => StatusCode::BAD_REQUEST,
                SubmissionError::Configuration | SubmissionError::Delivery => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let mut body = ContactResponse::failed(err.user_message(lang));
            if let SubmissionError::Rejected(errors) = &err {
                body.fields = Some(errors.messages(lang));
            }
            (status, Json(body)).into_response()
        }
    }
}
