use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;

use super::session::{end_session, set_flash, start_session, take_flash, AdminSession, Flash};
use super::{DASHBOARD_PATH, HOME_PATH, LOGIN_PATH};
use crate::booking::total_sales;
use crate::db::{Admin, LoginForm, Reservation};
use crate::error::AppError;
use crate::ui::{render_template, DashboardTemplate, LoginTemplate};
use crate::AppState;

// Login page
pub async fn login_page(jar: SignedCookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    let template = LoginTemplate {
        flash,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (jar, render_template(template)).into_response()
}

// Login submit
pub async fn login_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!("Rejected login form: {}", rejection);
            let jar = set_flash(jar, Flash::error(AppError::Auth.user_message()));
            return (jar, Redirect::to(LOGIN_PATH)).into_response();
        }
    };

    match Admin::authenticate(&state.db, &form.username, &form.password).await {
        Ok(Some(admin)) => {
            tracing::info!(username = %admin.username, "Admin logged in");
            (start_session(jar), Redirect::to(DASHBOARD_PATH)).into_response()
        }
        Ok(None) => {
            tracing::warn!(username = %form.username, "Failed admin login");
            let jar = set_flash(jar, Flash::error(AppError::Auth.user_message()));
            (jar, Redirect::to(LOGIN_PATH)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to check admin credentials: {}", e);
            let jar = set_flash(jar, Flash::error(AppError::Database(e).user_message()));
            (jar, Redirect::to(LOGIN_PATH)).into_response()
        }
    }
}

// Logout
pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    (end_session(jar), Redirect::to(HOME_PATH))
}

/// Reservations, total sales and the seating chart
pub async fn dashboard(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Response {
    let (jar, mut flash) = take_flash(jar);

    let reservations = match Reservation::list_all(&state.db).await {
        Ok(reservations) => reservations,
        Err(e) => {
            tracing::error!("Failed to list reservations: {}", e);
            flash = Some(Flash::error(AppError::Database(e).user_message()));
            Vec::new()
        }
    };
    let sales = total_sales(&reservations);

    (jar, render_template(DashboardTemplate::new(flash, reservations, sales))).into_response()
}

/// Delete a reservation. Unknown ids go back to the dashboard silently.
pub async fn delete_reservation(
    _admin: AdminSession,
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> Response {
    // a non-numeric id cannot match any reservation
    let result = match id.parse::<i64>() {
        Ok(id) => Reservation::delete(&state.db, id).await,
        Err(_) => Err(AppError::NotFound(0)),
    };

    let jar = match result {
        Ok(reservation) => {
            tracing::info!(
                id = reservation.id,
                ticket = %reservation.e_ticket_number,
                "Deleted reservation for {}",
                reservation.seat_label()
            );
            set_flash(jar, Flash::success("Reservation deleted successfully."))
        }
        Err(AppError::NotFound(_)) => {
            tracing::debug!(id = %id, "Delete requested for unknown reservation");
            jar
        }
        Err(e) => {
            tracing::error!("Failed to delete reservation {}: {}", id, e);
            set_flash(jar, Flash::error(e.user_message()))
        }
    };

    (jar, Redirect::to(DASHBOARD_PATH)).into_response()
}
