// ============================
// crates/backend-lib/src/handlers.rs
// ============================
//! HTTP handlers for the activity roster.
use activities_common::MessageResponse;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Redirect,
    Json,
};
use metrics::counter;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::metrics::{
    ACTIVITIES_LISTED, SIGNUP_ACCEPTED, SIGNUP_REJECTED, UNREGISTER_ACCEPTED, UNREGISTER_REJECTED,
};
use crate::roster::{Roster, RosterSnapshot};
use crate::AppState;

/// Landing page the site root redirects to.
pub const LANDING_PAGE: &str = "/static/index.html";

/// Raw query pairs of the signup and unregister routes.
pub type QueryPairs = Vec<(String, String)>;

/// Pick `email` out of the query string. A repeated parameter resolves to its
/// last value; a missing one is a 422 with a JSON body.
fn email_from(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<String, AppError> {
    let Query(pairs) = query.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "email").then_some(value))
        .ok_or_else(|| AppError::InvalidInput("Missing query parameter `email`".to_string()))
}

/// An activity segment that does not decode cannot name a catalog entry.
fn activity_from(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    path.map(|Path(activity)| activity)
        .map_err(|rejection| AppError::ActivityNotFound(rejection.body_text()))
}

/// `GET /`
pub async fn root() -> Redirect {
    Redirect::temporary(LANDING_PAGE)
}

/// Any route not matched above.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}

/// `GET /activities`
pub async fn list_activities<R: Roster + 'static>(
    State(state): State<AppState<R>>,
) -> Json<RosterSnapshot> {
    counter!(ACTIVITIES_LISTED).increment(1);
    let snapshot = state.roster.get_all();
    tracing::debug!(activities = snapshot.len(), "listing activities");
    Json(snapshot)
}

/// `POST /activities/{activity}/signup?email=...`
#[instrument(skip_all)]
pub async fn signup<R: Roster + 'static>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let activity = activity_from(path)?;
    let email = email_from(query)?;

    match state.roster.add_participant(&activity, &email) {
        Ok(()) => {
            counter!(SIGNUP_ACCEPTED).increment(1);
            info!(%activity, %email, "participant signed up");
            Ok(Json(MessageResponse::new(format!("Signed up {email} for {activity}"))))
        }
        Err(err) => {
            let err = AppError::from(err);
            counter!(SIGNUP_REJECTED, "reason" => err.error_code()).increment(1);
            Err(err)
        }
    }
}

/// `DELETE /activities/{activity}/unregister?email=...`
#[instrument(skip_all)]
pub async fn unregister<R: Roster + 'static>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let activity = activity_from(path)?;
    let email = email_from(query)?;

    match state.roster.remove_participant(&activity, &email) {
        Ok(()) => {
            counter!(UNREGISTER_ACCEPTED).increment(1);
            info!(%activity, %email, "participant unregistered");
            Ok(Json(MessageResponse::new(format!("Unregistered {email} from {activity}"))))
        }
        Err(err) => {
            let err = AppError::from(err);
            counter!(UNREGISTER_REJECTED, "reason" => err.error_code()).increment(1);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::config::Settings;
    use crate::roster::InMemoryRoster;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn state() -> AppState<InMemoryRoster> {
        AppState::new(InMemoryRoster::new(catalog::builtin()), Settings::default())
    }

    fn activity(name: &str) -> Result<Path<String>, PathRejection> {
        Ok(Path(name.to_string()))
    }

    fn email(addr: &str) -> Result<Query<QueryPairs>, QueryRejection> {
        Ok(Query(vec![("email".to_string(), addr.to_string())]))
    }

    #[tokio::test]
    async fn root_is_temporary_redirect() {
        let response = root().await.into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], LANDING_PAGE);
    }

    #[tokio::test]
    async fn signup_message_names_email_and_activity() {
        let Json(body) = signup(
            State(state()),
            activity("Chess Club"),
            email("newstudent@mergington.edu"),
        )
        .await
        .unwrap();
        assert_eq!(body.message, "Signed up newstudent@mergington.edu for Chess Club");
    }

    #[tokio::test]
    async fn unregister_maps_missing_participant() {
        let err = unregister(
            State(state()),
            activity("Chess Club"),
            email("notstudent@mergington.edu"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotSignedUp { .. }));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_reflects_mutations() {
        let state = state();
        signup(
            State(state.clone()),
            activity("Basketball"),
            email("jordan@mergington.edu"),
        )
        .await
        .unwrap();

        let Json(snapshot) = list_activities(State(state)).await;
        assert!(snapshot
            .get("Basketball")
            .unwrap()
            .has_participant("jordan@mergington.edu"));
    }

    #[test]
    fn repeated_email_uses_last_value() {
        let query = Ok(Query(vec![
            ("email".to_string(), "first@mergington.edu".to_string()),
            ("other".to_string(), "x".to_string()),
            ("email".to_string(), "last@mergington.edu".to_string()),
        ]));
        assert_eq!(email_from(query).unwrap(), "last@mergington.edu");
    }

    #[test]
    fn missing_email_is_invalid_input() {
        let query = Ok(Query(vec![("mail".to_string(), "a@b".to_string())]));
        let err = email_from(query).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("email"));
    }
}
