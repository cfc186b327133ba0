//! Web server for browser-based payout searches.
//!
//! This module provides an interactive web interface using Axum. Users can
//! upload a ticket file or paste tickets directly, then run the exhaustive
//! search and download the winning draws as CSV.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! draw-solver serve
//!
//! # Custom port and auto-open browser
//! draw-solver serve --port 3000 --open
//!
//! # Bind to all interfaces
//! draw-solver serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Main page with ticket input form
//! - `POST /api/search` - Run a search over an uploaded ticket book (multipart form)
//! - `GET /api/health` - Liveness probe with version information

pub mod server;
