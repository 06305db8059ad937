use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;

use super::session::{set_flash, take_flash, Flash};
use super::RESERVE_PATH;
use crate::booking::{self, ReservationForm};
use crate::db::Reservation;
use crate::error::{AppError, INVALID_SEAT};
use crate::ui::{render_template, ReserveTemplate};
use crate::AppState;

/// Seat grid with prices and the seats already taken
pub async fn reserve_page(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let (jar, mut flash) = take_flash(jar);

    let taken = match Reservation::taken_seats(&state.db).await {
        Ok(taken) => taken,
        Err(e) => {
            tracing::error!("Failed to load taken seats: {}", e);
            flash = Some(Flash::error(AppError::Database(e).user_message()));
            Vec::new()
        }
    };

    (jar, render_template(ReserveTemplate::new(flash, &taken))).into_response()
}

/// Book a seat and redirect back to the grid with the outcome
pub async fn reserve_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<ReservationForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => booking::reserve(&state.db, &form).await,
        Err(rejection) => {
            tracing::debug!("Rejected reservation form: {}", rejection);
            Err(AppError::Validation(INVALID_SEAT))
        }
    };

    let flash = match result {
        Ok(reservation) => Flash::success(format!(
            "Reservation confirmed! Your e-ticket number is {}.",
            reservation.e_ticket_number
        )),
        Err(e) => {
            if let AppError::Database(ref err) = e {
                tracing::error!("Failed to store reservation: {}", err);
            }
            Flash::error(e.user_message())
        }
    };

    (set_flash(jar, flash), Redirect::to(RESERVE_PATH)).into_response()
}
