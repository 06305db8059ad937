mod admin;
mod reservations;
pub mod session;

use axum::{response::Response, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::ui::{render_template, IndexTemplate};
use crate::AppState;

pub const HOME_PATH: &str = "/";
pub const RESERVE_PATH: &str = "/reserve";
pub const LOGIN_PATH: &str = "/admin";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

pub fn create_router(state: AppState) -> Router {
    // Passenger routes (public)
    let public_routes = Router::new()
        .route(HOME_PATH, get(index))
        .route(
            RESERVE_PATH,
            get(reservations::reserve_page).post(reservations::reserve_submit),
        );

    // Admin routes; dashboard and delete check the session themselves
    let admin_routes = Router::new()
        .route(LOGIN_PATH, get(admin::login_page).post(admin::login_submit))
        .route(DASHBOARD_PATH, get(admin::dashboard))
        .route("/delete/:id", get(admin::delete_reservation))
        .route("/logout", get(admin::logout));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Response {
    render_template(IndexTemplate {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{is_valid_ticket_code, Seat};
    use crate::config::Config;
    use crate::db::{self, NewReservation, Reservation};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use regex::Regex;
    use tower::ServiceExt;

    async fn test_app() -> (Router, AppState) {
        let db = db::connect_in_memory().await.unwrap();
        let state = AppState::new(Config::default(), db);
        (create_router(state.clone()), state)
    }

    fn get_request(uri: &str, cookies: &str) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if !cookies.is_empty() {
            builder = builder.header(header::COOKIE, cookies);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str, cookies: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if !cookies.is_empty() {
            builder = builder.header(header::COOKIE, cookies);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn post_request(uri: &str, body: &str, content_type: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    /// Send `request`, expect a redirect to `path`, and return the page it lands on
    async fn follow_flash(app: &Router, request: Request<Body>, path: &str) -> String {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), path);
        let response = app
            .clone()
            .oneshot(get_request(path, &cookies(&response)))
            .await
            .unwrap();
        body_text(response).await
    }

    /// Cookies a browser would send back, skipping removals
    fn cookies(response: &Response) -> String {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter(|pair| !pair.ends_with('='))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(form_request(LOGIN_PATH, "username=admin&password=password", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), DASHBOARD_PATH);
        cookies(&response)
    }

    async fn add_reservation(state: &AppState, name: &str, row: i64, column: i64) -> Reservation {
        Reservation::create(
            &state.db,
            &NewReservation {
                passenger_name: name.to_string(),
                seat: Seat::new(row, column).unwrap(),
                e_ticket_number: crate::booking::generate_ticket_code(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_index() {
        let (app, _) = test_app().await;

        let response = app.clone().oneshot(get_request("/health", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");

        let response = app.oneshot(get_request("/", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Reserve a seat"));
    }

    #[tokio::test]
    async fn test_reserve_scenario() {
        let (app, state) = test_app().await;

        let response = app
            .clone()
            .oneshot(form_request(
                RESERVE_PATH,
                "first_name=Jane&last_name=Doe&row=3&column=2",
                "",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), RESERVE_PATH);
        let flash_cookie = cookies(&response);
        assert!(flash_cookie.starts_with("tripseat_flash="));

        let response = app
            .clone()
            .oneshot(get_request(RESERVE_PATH, &flash_cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        // the flash is consumed by the render
        let cleared = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .any(|v| v.to_str().unwrap().starts_with("tripseat_flash=;"));
        assert!(cleared);

        let html = body_text(response).await;
        assert!(html.contains("Reservation confirmed! Your e-ticket number is TRIP-"));
        assert!(html.contains(r#"data-seat="3-2" data-taken="true""#));

        let code = Regex::new(r"TRIP-[A-Z0-9]{6}")
            .unwrap()
            .find(&html)
            .unwrap()
            .as_str()
            .to_string();
        assert!(is_valid_ticket_code(&code));

        let stored = Reservation::list_all(&state.db).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].passenger_name, "Jane Doe");
        assert_eq!((stored[0].seat_row, stored[0].seat_column), (3, 2));
        assert_eq!(stored[0].e_ticket_number, code);

        // without the flash cookie the page shows no message
        let response = app.oneshot(get_request(RESERVE_PATH, "")).await.unwrap();
        let html = body_text(response).await;
        assert!(!html.contains("Reservation confirmed"));
        assert!(html.contains(r#"data-seat="3-2" data-taken="true""#));
    }

    #[tokio::test]
    async fn test_reserve_errors_redirect_with_message() {
        let (app, state) = test_app().await;
        add_reservation(&state, "Jane Doe", 3, 2).await;

        let cases = [
            ("first_name=A&last_name=B&row=3&column=2", "Seat already taken."),
            ("first_name=A&last_name=B&row=13&column=2", "Seat must be row 1–12, column 1–4."),
            ("first_name=A&last_name=B&row=0&column=1", "Seat must be row 1–12, column 1–4."),
            ("first_name=A&last_name=B&row=two&column=1", "Please select a valid seat."),
            ("", "Please select a valid seat."),
        ];

        for (body, message) in cases {
            let response = app
                .clone()
                .oneshot(form_request(RESERVE_PATH, body, ""))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "body: {body}");
            assert_eq!(location(&response), RESERVE_PATH);

            let response = app
                .clone()
                .oneshot(get_request(RESERVE_PATH, &cookies(&response)))
                .await
                .unwrap();
            let html = body_text(response).await;
            assert!(html.contains(message), "expected {message:?} for {body:?}");
        }

        assert_eq!(Reservation::count(&state.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_malformed_reserve_body_redirects_with_message() {
        let (app, state) = test_app().await;
        let body = "first_name=A&last_name=B&row=1&row=2&column=1";

        let requests = [
            form_request(RESERVE_PATH, body, ""),
            post_request(RESERVE_PATH, body, None),
            post_request(RESERVE_PATH, body, Some("text/plain")),
        ];

        for request in requests {
            let html = follow_flash(&app, request, RESERVE_PATH).await;
            assert!(html.contains("Please select a valid seat."));
        }

        assert_eq!(Reservation::count(&state.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        let (app, state) = test_app().await;
        add_reservation(&state, "Jane Doe", 1, 2).await;

        let response = app
            .clone()
            .oneshot(get_request(DASHBOARD_PATH, ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), LOGIN_PATH);

        // an unsigned session cookie is not accepted
        let response = app
            .clone()
            .oneshot(get_request(DASHBOARD_PATH, "tripseat_session=admin"))
            .await
            .unwrap();
        assert_eq!(location(&response), LOGIN_PATH);

        let response = app
            .oneshot(get_request("/delete/1", ""))
            .await
            .unwrap();
        assert_eq!(location(&response), LOGIN_PATH);

        assert_eq!(Reservation::count(&state.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_login_failure() {
        let (app, _) = test_app().await;

        let response = app
            .clone()
            .oneshot(form_request(LOGIN_PATH, "username=admin&password=nope", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), LOGIN_PATH);
        let flash_cookie = cookies(&response);
        assert!(!flash_cookie.contains("tripseat_session"));

        let response = app
            .oneshot(get_request(LOGIN_PATH, &flash_cookie))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_malformed_login_body_is_rejected() {
        let (app, _) = test_app().await;

        let requests = [
            form_request(LOGIN_PATH, "username=a&username=b&password=password", ""),
            post_request(LOGIN_PATH, "username=admin&password=password", None),
        ];

        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), LOGIN_PATH);
            let flash_cookie = cookies(&response);
            assert!(!flash_cookie.contains("tripseat_session"));

            let response = app
                .clone()
                .oneshot(get_request(LOGIN_PATH, &flash_cookie))
                .await
                .unwrap();
            assert!(body_text(response).await.contains("Invalid credentials"));
        }
    }

    #[tokio::test]
    async fn test_dashboard_shows_sales_and_chart() {
        let (app, state) = test_app().await;
        add_reservation(&state, "Jane Doe", 1, 2).await;
        let session = login(&app).await;

        let response = app
            .oneshot(get_request(DASHBOARD_PATH, &session))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Total sales: $75"));
        assert!(html.contains("<td>Jane Doe</td>"));
        assert_eq!(html.matches("<td>Available</td>").count(), 47);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let (app, _) = test_app().await;
        let session = login(&app).await;

        let response = app
            .clone()
            .oneshot(get_request("/logout", &session))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), HOME_PATH);
        let removed = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .any(|v| v.to_str().unwrap().starts_with("tripseat_session=;"));
        assert!(removed);

        // the browser dropped the cookie
        let response = app
            .oneshot(get_request(DASHBOARD_PATH, ""))
            .await
            .unwrap();
        assert_eq!(location(&response), LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_delete_reservation() {
        let (app, state) = test_app().await;
        let keep = add_reservation(&state, "Keep Me", 1, 1).await;
        let gone = add_reservation(&state, "Drop Me", 2, 3).await;
        let session = login(&app).await;

        let response = app
            .clone()
            .oneshot(get_request(&format!("/delete/{}", gone.id), &session))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), DASHBOARD_PATH);
        assert_eq!(Reservation::list_all(&state.db).await.unwrap(), vec![keep]);

        let cookie = format!("{}; {}", session, cookies(&response));
        let response = app
            .oneshot(get_request(DASHBOARD_PATH, &cookie))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Reservation deleted successfully."));
        assert!(html.contains("Total sales: $100"));
    }

    #[tokio::test]
    async fn test_delete_missing_reservation_is_silent() {
        let (app, state) = test_app().await;
        add_reservation(&state, "Jane Doe", 4, 4).await;
        let session = login(&app).await;

        for path in ["/delete/999", "/delete/abc"] {
            let response = app
                .clone()
                .oneshot(get_request(path, &session))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), DASHBOARD_PATH);
            assert!(response.headers().get(header::SET_COOKIE).is_none());
        }

        assert_eq!(Reservation::count(&state.db).await.unwrap(), 1);
    }
}
