// Copyright (C) 2026 Relief Ledger contributors
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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use relief_ledger_api::{
    ActingUser, AllocateDonationsRequest, AllocateDonationsResponse, AllocationPreviewResponse,
    ApiError, AuditEventInfo, DEFAULT_MAX_ALLOCATION_ATTEMPTS, DonationInfo,
    DonationStatusResponse, LeadDetailResponse, ListDonationsRequest, ListDonationsResponse,
    ListLeadsRequest, ListLeadsResponse, OpenLeadRequest, OpenLeadResponse,
    PreviewAllocationRequest, RecordDonationRequest, RecordDonationResponse,
    RejectDonationRequest, ReviseHelpRequestedRequest, ReviseHelpRequestedResponse,
    allocate_donations, get_audit_event, get_donation, get_donation_audit_timeline, get_lead,
    get_lead_audit_timeline, list_donations, list_leads, open_lead, preview_lead_allocation,
    record_donation, reject_donation, revise_help_requested, verify_donation,
};
use relief_ledger_audit::Cause;
use relief_ledger_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Relief Ledger Server - HTTP server for recording donations and funding leads
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If no database is given, uses in-memory database.
    #[arg(short, long, conflicts_with = "mysql_url")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Load, compute and persist cycles before an allocation conflict is reported
    #[arg(long, default_value_t = DEFAULT_MAX_ALLOCATION_ATTEMPTS)]
    max_allocation_attempts: u32,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The ledger store.
    persistence: Arc<Mutex<Persistence>>,
    /// Upper bound on allocation attempts per request.
    max_allocation_attempts: u32,
}

/// API request for recording a donation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RecordDonationApiRequest {
    /// The operator performing this action.
    acting_user_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// Who gave the donation.
    donor_name: String,
    /// Amount in minor units.
    amount: u64,
    /// When the donation was received (RFC 3339). Defaults to now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recorded_at: Option<String>,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

/// API request for verifying a donation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct VerifyDonationApiRequest {
    /// The operator performing this action.
    acting_user_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// API request for rejecting a donation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RejectDonationApiRequest {
    /// The operator performing this action.
    acting_user_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// Why the donation failed verification.
    reason: String,
}

/// API request for opening a lead.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OpenLeadApiRequest {
    /// The operator performing this action.
    acting_user_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// Who the help is for.
    beneficiary_name: String,
    /// What the help is for.
    purpose: String,
    /// Amount requested in minor units.
    help_requested: u64,
    /// When the lead was opened (RFC 3339). Defaults to now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opened_at: Option<String>,
}

/// API request for revising a lead's requested amount.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReviseHelpRequestedApiRequest {
    /// The operator performing this action.
    acting_user_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// New requested amount in minor units.
    help_requested: u64,
}

/// API request for previewing an allocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PreviewAllocationApiRequest {
    /// Selected donations, in draw order.
    donation_ids: Vec<i64>,
}

/// API request for allocating donations to a lead.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AllocateDonationsApiRequest {
    /// The operator performing this action.
    acting_user_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// Selected donations, in draw order.
    donation_ids: Vec<i64>,
}

/// Query parameters for listing donations.
#[derive(Debug, Default, Deserialize)]
struct ListDonationsQuery {
    status: Option<String>,
    eligible_only: Option<bool>,
    search: Option<String>,
    sort_by: Option<String>,
    direction: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

/// Query parameters for listing leads.
#[derive(Debug, Default, Deserialize)]
struct ListLeadsQuery {
    funding_status: Option<String>,
    search: Option<String>,
    sort_by: Option<String>,
    direction: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
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
#[derive(Debug)]
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
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
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

/// Validates the acting user and builds the audit cause.
fn authenticate(
    acting_user_id: String,
    cause_id: String,
    cause_description: String,
) -> Result<(ActingUser, Cause), HttpError> {
    let acting_user: ActingUser = ActingUser::new(acting_user_id)?;
    Ok((acting_user, Cause::new(cause_id, cause_description)))
}

/// Parses an optional RFC 3339 timestamp, defaulting to now.
fn parse_timestamp(field: &str, value: Option<&str>) -> Result<OffsetDateTime, HttpError> {
    value.map_or_else(
        || Ok(OffsetDateTime::now_utc()),
        |raw| {
            OffsetDateTime::parse(raw, &Rfc3339).map_err(|e| {
                HttpError::from(ApiError::InvalidInput {
                    field: field.to_string(),
                    message: format!("Expected an RFC 3339 timestamp: {e}"),
                })
            })
        },
    )
}

// ============================================================================
// Donations
// ============================================================================

/// Handler for POST `/donations` endpoint.
async fn handle_record_donation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RecordDonationApiRequest>,
) -> Result<Json<RecordDonationResponse>, HttpError> {
    info!(
        acting_user_id = %req.acting_user_id,
        amount = req.amount,
        "Handling record_donation request"
    );

    let (acting_user, cause) = authenticate(req.acting_user_id, req.cause_id, req.cause_description)?;
    let request: RecordDonationRequest = RecordDonationRequest {
        donor_name: req.donor_name,
        amount: req.amount,
        recorded_at: parse_timestamp("recorded_at", req.recorded_at.as_deref())?,
        notes: req.notes,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RecordDonationResponse =
        record_donation(&mut persistence, request, &acting_user, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/donations` endpoint.
async fn handle_list_donations(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListDonationsQuery>,
) -> Result<Json<ListDonationsResponse>, HttpError> {
    let request: ListDonationsRequest = ListDonationsRequest {
        status: query.status,
        eligible_only: query.eligible_only.unwrap_or(false),
        search: query.search,
        sort_by: query.sort_by,
        direction: query.direction,
        page: query.page,
        per_page: query.per_page,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListDonationsResponse = list_donations(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/donations/{id}` endpoint.
async fn handle_get_donation(
    AxumState(app_state): AxumState<AppState>,
    Path(donation_id): Path<i64>,
) -> Result<Json<DonationInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DonationInfo = get_donation(&mut persistence, donation_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/donations/{id}/verify` endpoint.
async fn handle_verify_donation(
    AxumState(app_state): AxumState<AppState>,
    Path(donation_id): Path<i64>,
    Json(req): Json<VerifyDonationApiRequest>,
) -> Result<Json<DonationStatusResponse>, HttpError> {
    info!(
        acting_user_id = %req.acting_user_id,
        donation_id,
        "Handling verify_donation request"
    );

    let (acting_user, cause) = authenticate(req.acting_user_id, req.cause_id, req.cause_description)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DonationStatusResponse =
        verify_donation(&mut persistence, donation_id, &acting_user, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/donations/{id}/reject` endpoint.
async fn handle_reject_donation(
    AxumState(app_state): AxumState<AppState>,
    Path(donation_id): Path<i64>,
    Json(req): Json<RejectDonationApiRequest>,
) -> Result<Json<DonationStatusResponse>, HttpError> {
    info!(
        acting_user_id = %req.acting_user_id,
        donation_id,
        "Handling reject_donation request"
    );

    let (acting_user, cause) = authenticate(req.acting_user_id, req.cause_id, req.cause_description)?;
    let request: RejectDonationRequest = RejectDonationRequest {
        donation_id,
        reason: req.reason,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: DonationStatusResponse =
        reject_donation(&mut persistence, request, &acting_user, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/donations/{id}/audit` endpoint.
async fn handle_get_donation_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(donation_id): Path<i64>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<AuditEventInfo> = get_donation_audit_timeline(&mut persistence, donation_id)?;
    drop(persistence);

    Ok(Json(events))
}

// ============================================================================
// Leads
// ============================================================================

/// Handler for POST `/leads` endpoint.
async fn handle_open_lead(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<OpenLeadApiRequest>,
) -> Result<Json<OpenLeadResponse>, HttpError> {
    info!(
        acting_user_id = %req.acting_user_id,
        help_requested = req.help_requested,
        "Handling open_lead request"
    );

    let (acting_user, cause) = authenticate(req.acting_user_id, req.cause_id, req.cause_description)?;
    let request: OpenLeadRequest = OpenLeadRequest {
        beneficiary_name: req.beneficiary_name,
        purpose: req.purpose,
        help_requested: req.help_requested,
        opened_at: parse_timestamp("opened_at", req.opened_at.as_deref())?,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: OpenLeadResponse = open_lead(&mut persistence, request, &acting_user, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/leads` endpoint.
async fn handle_list_leads(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListLeadsQuery>,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let request: ListLeadsRequest = ListLeadsRequest {
        funding_status: query.funding_status,
        search: query.search,
        sort_by: query.sort_by,
        direction: query.direction,
        page: query.page,
        per_page: query.per_page,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeadsResponse = list_leads(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/leads/{id}` endpoint.
async fn handle_get_lead(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<LeadDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeadDetailResponse = get_lead(&mut persistence, lead_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/leads/{id}/help_requested` endpoint.
async fn handle_revise_help_requested(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
    Json(req): Json<ReviseHelpRequestedApiRequest>,
) -> Result<Json<ReviseHelpRequestedResponse>, HttpError> {
    info!(
        acting_user_id = %req.acting_user_id,
        lead_id,
        help_requested = req.help_requested,
        "Handling revise_help_requested request"
    );

    let (acting_user, cause) = authenticate(req.acting_user_id, req.cause_id, req.cause_description)?;
    let request: ReviseHelpRequestedRequest = ReviseHelpRequestedRequest {
        lead_id,
        help_requested: req.help_requested,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ReviseHelpRequestedResponse =
        revise_help_requested(&mut persistence, request, &acting_user, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/leads/{id}/allocation_preview` endpoint.
///
/// Read-only; no acting user is required.
async fn handle_preview_allocation(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
    Json(req): Json<PreviewAllocationApiRequest>,
) -> Result<Json<AllocationPreviewResponse>, HttpError> {
    let request: PreviewAllocationRequest = PreviewAllocationRequest {
        lead_id,
        donation_ids: req.donation_ids,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AllocationPreviewResponse = preview_lead_allocation(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/leads/{id}/allocations` endpoint.
///
/// Allocates the selected donations in the order given. The allocation
/// time is stamped here.
async fn handle_allocate_donations(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
    Json(req): Json<AllocateDonationsApiRequest>,
) -> Result<Json<AllocateDonationsResponse>, HttpError> {
    info!(
        acting_user_id = %req.acting_user_id,
        lead_id,
        selected = req.donation_ids.len(),
        "Handling allocate_donations request"
    );

    let (acting_user, cause) = authenticate(req.acting_user_id, req.cause_id, req.cause_description)?;
    let request: AllocateDonationsRequest = AllocateDonationsRequest {
        lead_id,
        donation_ids: req.donation_ids,
        allocated_at: OffsetDateTime::now_utc(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AllocateDonationsResponse = allocate_donations(
        &mut persistence,
        &request,
        &acting_user,
        &cause,
        app_state.max_allocation_attempts,
    )?;
    drop(persistence);

    info!(
        lead_id,
        total_allocated = response.total_allocated,
        needed_amount = response.needed_amount,
        "Successfully handled allocate_donations request"
    );

    Ok(Json(response))
}

/// Handler for GET `/leads/{id}/audit` endpoint.
async fn handle_get_lead_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<AuditEventInfo> = get_lead_audit_timeline(&mut persistence, lead_id)?;
    drop(persistence);

    Ok(Json(events))
}

/// Handler for GET `/audit/event/{event_id}` endpoint.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventInfo>, HttpError> {
    info!(event_id = event_id, "Handling get_audit_event request");

    let mut persistence = app_state.persistence.lock().await;
    let event: AuditEventInfo = get_audit_event(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(event))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/donations",
            post(handle_record_donation).get(handle_list_donations),
        )
        .route("/donations/{id}", get(handle_get_donation))
        .route("/donations/{id}/verify", post(handle_verify_donation))
        .route("/donations/{id}/reject", post(handle_reject_donation))
        .route("/donations/{id}/audit", get(handle_get_donation_audit))
        .route("/leads", post(handle_open_lead).get(handle_list_leads))
        .route("/leads/{id}", get(handle_get_lead))
        .route(
            "/leads/{id}/help_requested",
            post(handle_revise_help_requested),
        )
        .route(
            "/leads/{id}/allocation_preview",
            post(handle_preview_allocation),
        )
        .route("/leads/{id}/allocations", post(handle_allocate_donations))
        .route("/leads/{id}/audit", get(handle_get_lead_audit))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .with_state(app_state)
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

    info!("Initializing Relief Ledger Server");

    let persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        max_allocation_attempts: args.max_allocation_attempts,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
