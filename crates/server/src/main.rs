// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{NaiveDateTime, Utc};
use clap::Parser;
use client_schedule_api::{
    ApiError, AppointmentRequest, AppointmentResponse, AuthenticatedSession,
    CancelAppointmentResponse, ContactScheduleReport, CountryReport, CustomerRequest,
    CustomerResponse, DeleteCustomerResponse, ListAppointmentsResponse, ListContactsResponse,
    ListCountriesResponse, ListCustomersResponse, ListDivisionsResponse, LoginActivityLog,
    LoginRequest, LoginResponse, TypeMonthReport, WhoAmIResponse, cancel_appointment,
    contact_schedule_csv, contact_schedule_report, country_csv, country_report,
    create_appointment, create_customer, delete_customer, list_appointments, list_contacts,
    list_countries, list_customers, list_divisions, login, logout, type_month_csv,
    type_month_report, update_appointment, update_customer, whoami,
};
use client_schedule_persistence::{PersistenceError, SqlitePersistence};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::SessionUser;

/// Client Schedule Server - HTTP server for customer appointment scheduling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// File that login attempts are appended to
    #[arg(long, default_value = "login_activity.txt")]
    login_log: PathBuf,

    /// Name of a user to create at startup if it does not exist
    #[arg(long, requires = "bootstrap_password")]
    bootstrap_user: Option<String>,

    /// Password for the bootstrap user
    #[arg(long, requires = "bootstrap_user")]
    bootstrap_password: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The single database connection, serialized behind a mutex.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Where login attempts are recorded.
    login_activity: LoginActivityLog,
}

/// The current instant as naive UTC, as stored by the persistence layer.
fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Query parameters for listing divisions.
#[derive(Debug, Deserialize)]
struct DivisionsQuery {
    /// Restricts the listing to one country.
    country: Option<String>,
}

/// Query parameters shared by the report endpoints.
#[derive(Debug, Deserialize)]
struct ReportQuery {
    /// `json` (default) or `csv`.
    format: Option<String>,
    /// Country for the country report.
    country: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Renders a report as JSON, or as CSV when `format=csv`.
fn report_response<T: Serialize>(
    report: &T,
    format: Option<&str>,
    render_csv: fn(&T) -> Result<String, ApiError>,
) -> Result<Response, HttpError> {
    match format.map(str::to_ascii_lowercase).as_deref() {
        None | Some("json") => Ok(Json(report).into_response()),
        Some("csv") => {
            let body: String = render_csv(report)?;
            Ok(([(CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response())
        }
        Some(other) => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Unknown report format '{other}'. Expected 'json' or 'csv'"),
        }),
    }
}

// ============================================================================
// Session
// ============================================================================

/// Handler for POST `/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(user_name = %req.user_name, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse =
        login(&mut persistence, &app_state.login_activity, &req, now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &authenticated.token)?;
    drop(persistence);

    info!(user = authenticated.session.user_name(), "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/whoami` endpoint.
async fn handle_whoami(SessionUser(authenticated): SessionUser) -> Json<WhoAmIResponse> {
    Json(whoami(&authenticated))
}

// ============================================================================
// Appointments
// ============================================================================

async fn list_view(
    app_state: &AppState,
    authenticated: &AuthenticatedSession,
    view: &str,
) -> Result<Json<ListAppointmentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListAppointmentsResponse =
        list_appointments(&mut persistence, &authenticated.session, view, now_utc())?;
    Ok(Json(response))
}

/// Handler for GET `/appointments` endpoint.
async fn handle_list_appointments(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
) -> Result<Json<ListAppointmentsResponse>, HttpError> {
    list_view(&app_state, &authenticated, "all").await
}

/// Handler for GET `/appointments/month` endpoint.
async fn handle_list_month(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
) -> Result<Json<ListAppointmentsResponse>, HttpError> {
    list_view(&app_state, &authenticated, "month").await
}

/// Handler for GET `/appointments/week` endpoint.
async fn handle_list_week(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
) -> Result<Json<ListAppointmentsResponse>, HttpError> {
    list_view(&app_state, &authenticated, "week").await
}

/// Handler for POST `/appointments` endpoint.
async fn handle_create_appointment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Json(req): Json<AppointmentRequest>,
) -> Result<Json<AppointmentResponse>, HttpError> {
    info!(
        user = authenticated.session.user_name(),
        title = %req.title,
        "Handling create_appointment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AppointmentResponse =
        create_appointment(&mut persistence, &authenticated.session, req)?;
    Ok(Json(response))
}

/// Handler for PUT `/appointments/{appointment_id}` endpoint.
async fn handle_update_appointment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Path(appointment_id): Path<i64>,
    Json(req): Json<AppointmentRequest>,
) -> Result<Json<AppointmentResponse>, HttpError> {
    info!(
        user = authenticated.session.user_name(),
        appointment_id, "Handling update_appointment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AppointmentResponse =
        update_appointment(&mut persistence, &authenticated.session, appointment_id, req)?;
    Ok(Json(response))
}

/// Handler for DELETE `/appointments/{appointment_id}` endpoint.
async fn handle_cancel_appointment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Path(appointment_id): Path<i64>,
) -> Result<Json<CancelAppointmentResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CancelAppointmentResponse =
        cancel_appointment(&mut persistence, &authenticated.session, appointment_id)?;
    Ok(Json(response))
}

// ============================================================================
// Customers
// ============================================================================

/// Handler for GET `/customers` endpoint.
async fn handle_list_customers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Json<ListCustomersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_customers(&mut persistence)?))
}

/// Handler for POST `/customers` endpoint.
async fn handle_create_customer(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<CustomerResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CustomerResponse =
        create_customer(&mut persistence, &authenticated.session, req)?;
    Ok(Json(response))
}

/// Handler for PUT `/customers/{customer_id}` endpoint.
async fn handle_update_customer(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Path(customer_id): Path<i64>,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<CustomerResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CustomerResponse =
        update_customer(&mut persistence, &authenticated.session, customer_id, req)?;
    Ok(Json(response))
}

/// Handler for DELETE `/customers/{customer_id}` endpoint.
///
/// Removes the customer's appointments along with it.
async fn handle_delete_customer(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Path(customer_id): Path<i64>,
) -> Result<Json<DeleteCustomerResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteCustomerResponse =
        delete_customer(&mut persistence, &authenticated.session, customer_id)?;
    Ok(Json(response))
}

// ============================================================================
// Reference data
// ============================================================================

/// Handler for GET `/contacts` endpoint.
async fn handle_list_contacts(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Json<ListContactsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_contacts(&mut persistence)?))
}

/// Handler for GET `/countries` endpoint.
async fn handle_list_countries(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
) -> Result<Json<ListCountriesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_countries(&mut persistence)?))
}

/// Handler for GET `/divisions` endpoint.
async fn handle_list_divisions(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Query(query): Query<DivisionsQuery>,
) -> Result<Json<ListDivisionsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_divisions(
        &mut persistence,
        query.country.as_deref(),
    )?))
}

// ============================================================================
// Reports
// ============================================================================

/// Handler for GET `/reports/type-month` endpoint.
async fn handle_type_month_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Query(query): Query<ReportQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let report: TypeMonthReport = type_month_report(&mut persistence, &authenticated.session)?;
    drop(persistence);

    report_response(&report, query.format.as_deref(), type_month_csv)
}

/// Handler for GET `/reports/contact/{contact_id}` endpoint.
async fn handle_contact_schedule_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(authenticated): SessionUser,
    Path(contact_id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let report: ContactScheduleReport =
        contact_schedule_report(&mut persistence, &authenticated.session, contact_id)?;
    drop(persistence);

    report_response(&report, query.format.as_deref(), contact_schedule_csv)
}

/// Handler for GET `/reports/country` endpoint.
async fn handle_country_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_): SessionUser,
    Query(query): Query<ReportQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let report: CountryReport = country_report(&mut persistence, query.country.as_deref())?;
    drop(persistence);

    report_response(&report, query.format.as_deref(), country_csv)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route(
            "/appointments",
            get(handle_list_appointments).post(handle_create_appointment),
        )
        .route("/appointments/month", get(handle_list_month))
        .route("/appointments/week", get(handle_list_week))
        .route(
            "/appointments/{appointment_id}",
            put(handle_update_appointment).delete(handle_cancel_appointment),
        )
        .route(
            "/customers",
            get(handle_list_customers).post(handle_create_customer),
        )
        .route(
            "/customers/{customer_id}",
            put(handle_update_customer).delete(handle_delete_customer),
        )
        .route("/contacts", get(handle_list_contacts))
        .route("/countries", get(handle_list_countries))
        .route("/divisions", get(handle_list_divisions))
        .route("/reports/type-month", get(handle_type_month_report))
        .route(
            "/reports/contact/{contact_id}",
            get(handle_contact_schedule_report),
        )
        .route("/reports/country", get(handle_country_report))
        .with_state(app_state)
}

/// Creates the bootstrap user unless one with that name already exists.
fn bootstrap_user(
    persistence: &mut SqlitePersistence,
    user_name: &str,
    password: &str,
) -> Result<(), PersistenceError> {
    if persistence.get_user_by_name(user_name)?.is_some() {
        info!(user_name, "Bootstrap user already exists");
        return Ok(());
    }
    let user_id: i64 = persistence.create_user(user_name, password)?;
    info!(user_id, user_name, "Created bootstrap user");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Client Schedule Server");

    let mut persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    if let (Some(user_name), Some(password)) = (&args.bootstrap_user, &args.bootstrap_password) {
        bootstrap_user(&mut persistence, user_name, password)?;
    } else if args.database.is_none() {
        warn!("In-memory database has no users; pass --bootstrap-user to log in");
    }

    info!(path = %args.login_log.display(), "Recording login activity");
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        login_activity: LoginActivityLog::new(args.login_log),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use std::sync::atomic::{AtomicU64, Ordering};
    use tower::ServiceExt;

    static LOG_COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Creates app state with an in-memory database holding user `test`
    /// (password `test`).
    fn create_test_app_state() -> AppState {
        let mut persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
        persistence
            .create_user("test", "test")
            .expect("Failed to create test user");

        let log_id: u64 = LOG_COUNTER.fetch_add(1, Ordering::SeqCst);
        let log_path: PathBuf = std::env::temp_dir().join(format!(
            "client_schedule_server_login_{}_{log_id}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&log_path);

        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            login_activity: LoginActivityLog::new(log_path),
        }
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: String) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn get_request(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn login_as_test(app: &Router) -> String {
        let request: LoginRequest = LoginRequest {
            user_name: String::from("test"),
            password: String::from("test"),
            time_zone: Some(String::from("America/New_York")),
        };
        let response: Response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                serde_json::to_string(&request).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let login: LoginResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        login.session_token
    }

    fn test_customer_request() -> CustomerRequest {
        CustomerRequest {
            customer_name: String::from("Acme"),
            address: String::from("123 Main St"),
            postal_code: String::from("10001"),
            phone: String::from("555-0100"),
            division: String::from("New York"),
        }
    }

    fn test_appointment_request() -> AppointmentRequest {
        AppointmentRequest {
            title: String::from("Kickoff"),
            description: String::from("Project kickoff"),
            location: String::from("Room 1"),
            appointment_type: String::from("Planning Session"),
            contact_name: String::from("Anika Costa"),
            start_date: String::from("2024-06-03"),
            start_time: String::from("09:00"),
            end_date: String::from("2024-06-03"),
            end_time: String::from("10:00"),
            customer_id: Some(1),
            user_id: None,
        }
    }

    async fn create_test_customer(app: &Router, token: &str) {
        let response: Response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/customers",
                Some(token),
                serde_json::to_string(&test_customer_request()).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    async fn post_appointment(app: &Router, token: &str, request: &AppointmentRequest) -> Response {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/appointments",
                Some(token),
                serde_json::to_string(request).unwrap(),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_reports_no_upcoming_appointments() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());

        let request: LoginRequest = LoginRequest {
            user_name: String::from("test"),
            password: String::from("test"),
            time_zone: None,
        };
        let response: Response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                serde_json::to_string(&request).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let login: LoginResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(login.time_zone, "UTC");
        assert_eq!(
            login.alert,
            "There are no upcoming appointments within 15 minutes."
        );

        let activity: String =
            std::fs::read_to_string(app_state.login_activity.path()).unwrap();
        assert!(activity.contains("User: test, Status: Success"));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());

        let request: LoginRequest = LoginRequest {
            user_name: String::from("test"),
            password: String::from("wrong"),
            time_zone: None,
        };
        let response: Response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                serde_json::to_string(&request).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
        let activity: String =
            std::fs::read_to_string(app_state.login_activity.path()).unwrap();
        assert!(activity.contains("User: test, Status: Failed"));
    }

    #[tokio::test]
    async fn test_login_with_unknown_zone_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let request: LoginRequest = LoginRequest {
            user_name: String::from("test"),
            password: String::from("test"),
            time_zone: Some(String::from("Mars/Olympus")),
        };
        let response: Response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                serde_json::to_string(&request).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response: Response = app
            .oneshot(
                Request::builder()
                    .uri("/appointments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response: Response = app
            .oneshot(get_request("/whoami", "session_0_0"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_whoami_then_logout() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;

        let response: Response = app.clone().oneshot(get_request("/whoami", &token)).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let who: WhoAmIResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(who.user_name, "test");
        assert_eq!(who.time_zone, "America/New_York");

        let response: Response = app
            .clone()
            .oneshot(json_request("POST", "/logout", Some(&token), String::new()))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NO_CONTENT);

        let response: Response = app.oneshot(get_request("/whoami", &token)).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_and_list_appointment() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;
        create_test_customer(&app, &token).await;

        let response: Response = post_appointment(&app, &token, &test_appointment_request()).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let created: AppointmentResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(created.appointment.start, "2024-06-03 09:00");
        assert_eq!(created.message, "Appointment 1 'Kickoff' has been scheduled");

        let response: Response = app
            .oneshot(get_request("/appointments", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let listed: ListAppointmentsResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(listed.view, "all");
        assert_eq!(listed.appointments.len(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_appointment_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;
        create_test_customer(&app, &token).await;
        post_appointment(&app, &token, &test_appointment_request()).await;

        let overlapping: AppointmentRequest = AppointmentRequest {
            start_time: String::from("09:30"),
            end_time: String::from("10:30"),
            ..test_appointment_request()
        };
        let response: Response = post_appointment(&app, &token, &overlapping).await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(error.error);
        assert!(error.message.contains("no_overlap"));
    }

    #[tokio::test]
    async fn test_appointment_outside_business_hours_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;
        create_test_customer(&app, &token).await;

        let late: AppointmentRequest = AppointmentRequest {
            start_time: String::from("21:30"),
            end_time: String::from("22:30"),
            ..test_appointment_request()
        };
        let response: Response = post_appointment(&app, &token, &late).await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_and_cancel_appointment() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;
        create_test_customer(&app, &token).await;
        post_appointment(&app, &token, &test_appointment_request()).await;

        let changes: AppointmentRequest = AppointmentRequest {
            title: String::from("Kickoff (moved)"),
            start_time: String::from("13:00"),
            end_time: String::from("14:00"),
            ..AppointmentRequest::default()
        };
        let response: Response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/appointments/1",
                Some(&token),
                serde_json::to_string(&changes).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let updated: AppointmentResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(updated.appointment.start, "2024-06-03 13:00");
        assert_eq!(updated.appointment.location, "Room 1");

        let response: Response = app
            .clone()
            .oneshot(json_request("DELETE", "/appointments/1", Some(&token), String::new()))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let canceled: CancelAppointmentResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            canceled.message,
            "Appointment ID: 1, Type: Planning Session has been canceled"
        );

        let response: Response = app
            .oneshot(json_request("DELETE", "/appointments/1", Some(&token), String::new()))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_week_and_month_views_respond() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;

        let response: Response = app
            .clone()
            .oneshot(get_request("/appointments/week", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let week: ListAppointmentsResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(week.view, "week");

        let response: Response = app
            .oneshot(get_request("/appointments/month", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_customer_lifecycle() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;
        create_test_customer(&app, &token).await;
        post_appointment(&app, &token, &test_appointment_request()).await;

        let changes: CustomerRequest = CustomerRequest {
            customer_name: String::new(),
            address: String::new(),
            postal_code: String::new(),
            phone: String::new(),
            division: String::from("Ontario"),
        };
        let response: Response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/customers/1",
                Some(&token),
                serde_json::to_string(&changes).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let updated: CustomerResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(updated.customer.customer_name, "Acme");
        assert_eq!(updated.customer.country, "Canada");

        let response: Response = app
            .clone()
            .oneshot(json_request("DELETE", "/customers/1", Some(&token), String::new()))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let deleted: DeleteCustomerResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(deleted.removed_appointments, 1);

        let response: Response = app
            .oneshot(get_request("/customers", &token))
            .await
            .unwrap();
        let listed: ListCustomersResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(listed.customers.is_empty());
    }

    #[tokio::test]
    async fn test_customer_with_unknown_division_is_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;

        let request: CustomerRequest = CustomerRequest {
            division: String::from("Atlantis"),
            ..test_customer_request()
        };
        let response: Response = app
            .oneshot(json_request(
                "POST",
                "/customers",
                Some(&token),
                serde_json::to_string(&request).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reference_endpoints() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;

        let response: Response = app
            .clone()
            .oneshot(get_request("/contacts", &token))
            .await
            .unwrap();
        let contacts: ListContactsResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(contacts.contacts.len(), 3);

        let response: Response = app
            .clone()
            .oneshot(get_request("/countries", &token))
            .await
            .unwrap();
        let countries: ListCountriesResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(countries.countries.len(), 3);

        let response: Response = app
            .oneshot(get_request("/divisions?country=Canada", &token))
            .await
            .unwrap();
        let divisions: ListDivisionsResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(
            divisions
                .divisions
                .iter()
                .any(|d| d.division_name == "Alberta")
        );
    }

    #[tokio::test]
    async fn test_type_month_report_as_csv() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;
        create_test_customer(&app, &token).await;
        post_appointment(&app, &token, &test_appointment_request()).await;

        let response: Response = app
            .clone()
            .oneshot(get_request("/reports/type-month?format=csv", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        let body: String = String::from_utf8(body_bytes(response).await).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines, vec!["appointment_type,month,count", "Planning Session,June,1"]);

        let response: Response = app
            .oneshot(get_request("/reports/type-month", &token))
            .await
            .unwrap();
        let report: TypeMonthReport = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(report.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_contact_report_for_unknown_contact_is_not_found() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;

        let response: Response = app
            .oneshot(get_request("/reports/contact/99", &token))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_country_report_filters_by_country() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login_as_test(&app).await;
        create_test_customer(&app, &token).await;

        let response: Response = app
            .clone()
            .oneshot(get_request("/reports/country?country=U.S", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let report: CountryReport = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(report.available_countries, vec!["U.S"]);
        assert_eq!(report.customers.len(), 1);

        let response: Response = app
            .oneshot(get_request("/reports/country?format=xml", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_session_store_failure_is_server_error() {
        let response: Response = session::SessionError::StoreUnavailable.into_response();
        assert_eq!(response.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);

        let response: Response =
            session::SessionError::InvalidSession(String::from("Session expired")).into_response();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }
}
