use axum::http::header;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::payout::PayoutTable;
use crate::core::types::GameRules;
use crate::parsing::tickets::{delimiter_for, parse_tickets_text, TicketError};
use crate::search::engine::{SearchConfig, SearchEngine, SearchReport};
use crate::utils::validation::{validate_upload, ValidationError};

/// Hard caps on what one upload request may carry
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_FILE_FIELD_SIZE: usize = 4 * 1024 * 1024; // 4MB
pub const MAX_TEXT_FIELD_SIZE: usize = 1024 * 1024; // 1MB

/// Upper bound on result rows returned to the browser, regardless of the
/// requested `top` value
pub const MAX_WEB_RESULTS: usize = 1000;

/// Shared application state
pub struct AppState {
    pub rules: GameRules,
    pub payouts: PayoutTable,
}

/// Input data extracted from multipart form
#[derive(Debug)]
struct InputData {
    /// Ticket text (from a textarea or an uploaded text file)
    text_content: Option<String>,
    /// Original filename, used for delimiter detection
    filename: Option<String>,
}

/// Search knobs extracted from multipart form
#[derive(Debug)]
struct SearchOptions {
    /// 1-based column carrying the ticket in delimited files
    column: usize,
    /// Maximum number of tied draws to return
    top: usize,
}

/// Error payload returned to API clients
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Query parameters for the search endpoint
#[derive(Deserialize)]
struct SearchQueryParams {
    /// Output format: "csv" for a downloadable file, omit for JSON
    format: Option<String>,
}

/// Build a client-facing error payload. Whatever detail the server has
/// goes to the log; the client only ever sees `user_message`.
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
#[must_use]
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        rules: GameRules::default(),
        payouts: PayoutTable::default(),
    });

    // Rate limiting is keyed on the peer IP
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .unwrap();

    Router::new()
        .route("/", get(index_handler))
        .route("/api/search", post(search_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-xss-protection"),
                    HeaderValue::from_static("1; mode=block"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("strict-transport-security"),
                    HeaderValue::from_static("max-age=31536000; includeSubDomains"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                // Largest allowed file plus multipart overhead
                .layer(DefaultBodyLimit::max(5 * 1024 * 1024)),
        )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router();

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting draw-solver web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// Liveness probe
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// API endpoint for running a payout search over an uploaded ticket book
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
    mut multipart: Multipart,
) -> Response {
    let start_time = std::time::Instant::now();

    // Extract ticket data and search options from multipart form
    let (input_data, options) = match extract_request_data(&mut multipart).await {
        Ok(data) => data,
        Err(error_response) => return error_response,
    };

    let Some(text) = input_data.text_content.as_deref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal error: no input data".to_string(),
                error_type: "internal_error".to_string(),
                details: None,
            }),
        )
            .into_response();
    };

    // Parse the ticket book; row diagnostics go back to the user
    let delimiter = input_data.filename.as_deref().and_then(delimiter_for);
    let book = match parse_tickets_text(text, &state.rules, delimiter, options.column) {
        Ok(book) => book,
        Err(err) => return ticket_error_response(&err),
    };

    let ticket_count = book.len();
    let config = SearchConfig {
        rules: state.rules,
        payouts: state.payouts.clone(),
        ..SearchConfig::default()
    };

    // The exhaustive search is CPU-bound; keep it off the async workers
    let report = match tokio::task::spawn_blocking(move || {
        let engine = SearchEngine::new(&book, config);
        engine.run_parallel()
    })
    .await
    {
        Ok(report) => report,
        Err(join_err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(create_safe_error_response(
                    "search_failed",
                    "Search failed unexpectedly",
                    Some(&join_err.to_string()),
                )),
            )
                .into_response();
        }
    };

    let shown = options.top.min(report.tie_count());

    if params.format.as_deref() == Some("csv") {
        return csv_response(&report, shown);
    }

    let results: Vec<serde_json::Value> = report
        .results
        .iter()
        .take(shown)
        .enumerate()
        .map(|(i, result)| {
            serde_json::json!({
                "rank": i + 1,
                "combination": result.combination.numbers(),
                "total_payout": result.total_payout,
                "matches_3": result.tally.count(3),
                "matches_4": result.tally.count(4),
                "matches_5": result.tally.count(5),
                "matches_6": result.tally.count(6),
                "tiebreak_score": result.tiebreak_score,
            })
        })
        .collect();

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(serde_json::json!({
        "query": {
            "ticket_count": ticket_count,
            "column": options.column,
        },
        "search": {
            "candidates_evaluated": report.candidates_evaluated,
            "min_payout": report.min_payout,
            "tie_count": report.tie_count(),
            "shown": shown,
        },
        "results": results,
        "processing_info": {
            "processing_time_ms": processing_time,
            "configuration": {
                "pool_size": state.rules.pool_size,
                "pick_size": state.rules.pick_size,
                "top": options.top,
            }
        }
    }))
    .into_response()
}

/// Map a ticket parse failure onto a status code and client payload. Row
/// and value diagnostics are the user's own data and are echoed back.
fn ticket_error_response(err: &TicketError) -> Response {
    let (status, error_type) = match err {
        TicketError::TooManyTickets(_) => (StatusCode::PAYLOAD_TOO_LARGE, "too_many_tickets"),
        TicketError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
        _ => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_ticket"),
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            error_type: error_type.to_string(),
            details: None,
        }),
    )
        .into_response()
}

/// Render the winning draws as a downloadable CSV attachment
fn csv_response(report: &SearchReport, shown: usize) -> Response {
    let mut body =
        String::from("combination,total_payout,matches_3,matches_4,matches_5,matches_6\n");
    for result in report.results.iter().take(shown) {
        body.push_str(&format!(
            "\"{}\",{},{},{},{},{}\n",
            result.combination,
            result.total_payout,
            result.tally.count(3),
            result.tally.count(4),
            result.tally.count(5),
            result.tally.count(6)
        ));
    }

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"draws.csv\"",
            ),
        ],
        body,
    )
        .into_response()
}

/// Extract ticket data and search options from multipart form
async fn extract_request_data(
    multipart: &mut Multipart,
) -> Result<(InputData, SearchOptions), Response> {
    let mut input_data = InputData {
        text_content: None,
        filename: None,
    };

    let mut options = SearchOptions { column: 1, top: 10 };

    let mut fields_received = 0usize;
    let mut had_parse_error = false;

    loop {
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Too many form fields in request".to_string(),
                    error_type: "too_many_fields".to_string(),
                    details: None,
                }),
            )
                .into_response());
        }

        match multipart.next_field().await {
            Ok(Some(field)) => {
                fields_received += 1;
                let name = field.name().unwrap_or_default().to_string();

                match name.as_str() {
                    "file" => {
                        let filename = field.file_name().map(std::string::ToString::to_string);

                        match field.bytes().await {
                            Ok(bytes) => {
                                if bytes.len() > MAX_FILE_FIELD_SIZE {
                                    return Err((
                                        StatusCode::PAYLOAD_TOO_LARGE,
                                        Json(ErrorResponse {
                                            error: "Uploaded file is too large".to_string(),
                                            error_type: "file_too_large".to_string(),
                                            details: None,
                                        }),
                                    )
                                        .into_response());
                                }

                                // The sanitized filename is the one used from here on
                                match validate_upload(filename.as_deref(), &bytes) {
                                    Ok(validated_filename) => {
                                        input_data.filename = validated_filename;
                                        input_data.text_content =
                                            Some(String::from_utf8_lossy(&bytes).to_string());
                                    }
                                    Err(ValidationError::FilenameTooLong) => {
                                        return Err((
                                            StatusCode::BAD_REQUEST,
                                            Json(create_safe_error_response(
                                                "filename_too_long",
                                                "Filename is too long",
                                                Some("Upload rejected: filename length over the cap"),
                                            )),
                                        ).into_response());
                                    }
                                    Err(ValidationError::InvalidFilename
                                    | ValidationError::EmptyFilename) => {
                                        return Err((
                                            StatusCode::BAD_REQUEST,
                                            Json(create_safe_error_response(
                                                "invalid_filename",
                                                "Filename contains unsafe characters",
                                                Some("Upload rejected: filename failed sanitization"),
                                            )),
                                        ).into_response());
                                    }
                                    Err(ValidationError::InvalidFileContent) => {
                                        return Err((
                                            StatusCode::BAD_REQUEST,
                                            Json(create_safe_error_response(
                                                "invalid_content",
                                                "File content does not look like a ticket list",
                                                None,
                                            )),
                                        )
                                            .into_response());
                                    }
                                }
                            }
                            Err(_) => had_parse_error = true,
                        }
                    }
                    "tickets" => match field.text().await {
                        Ok(text) => {
                            if text.len() > MAX_TEXT_FIELD_SIZE {
                                return Err((
                                    StatusCode::PAYLOAD_TOO_LARGE,
                                    Json(ErrorResponse {
                                        error: "Pasted ticket text is too large".to_string(),
                                        error_type: "text_too_large".to_string(),
                                        details: None,
                                    }),
                                )
                                    .into_response());
                            }

                            if !text.trim().is_empty() {
                                input_data.text_content = Some(text);
                            }
                        }
                        Err(_) => had_parse_error = true,
                    },
                    "column" => {
                        if let Some(column) = numeric_field(field).await {
                            options.column = column.clamp(1, 10_000);
                        }
                    }
                    "top" => {
                        if let Some(top) = numeric_field(field).await {
                            options.top = top.clamp(1, MAX_WEB_RESULTS);
                        }
                    }
                    // Unknown fields are skipped
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(_) => {
                had_parse_error = true;
                break;
            }
        }
    }

    if input_data.text_content.is_none() {
        let error_msg = if had_parse_error {
            "Could not read the uploaded form data."
        } else if fields_received == 0 {
            "No data received. Please upload a file or paste tickets."
        } else {
            "No ticket data found in upload."
        };

        return Err((
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response("missing_input", error_msg, None)),
        )
            .into_response());
    }

    Ok((input_data, options))
}

/// Read a numeric option field, ignoring values that do not parse.
async fn numeric_field(field: axum::extract::multipart::Field<'_>) -> Option<usize> {
    field.text().await.ok()?.parse().ok()
}
