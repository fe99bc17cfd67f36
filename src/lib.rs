//! Seega game server library.
//!
//! Hosts one authoritative two-seat Seega match and serves it over HTTP.
//!
//! # Architecture
//!
//! - **Rules**: board model and pure rule engine (re-exported from `seega_rules`)
//! - **Session**: the stateful match orchestrator behind a single lock
//! - **Server**: axum routes forwarding commands verbatim to the session
//! - **Config**: TOML server configuration
//!
//! # Example
//!
//! ```
//! use seega::{GameSession, Player};
//!
//! let session = GameSession::new();
//! let me = session.register().expect("seat available");
//! assert_eq!(me, Player::One);
//!
//! assert!(session.place_piece(me, 0, 0));
//! assert!(!session.place_piece(me, 2, 2));
//! assert_eq!(session.get_state(me).error().as_deref(), Some("invalid position"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod session;

pub mod server;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Session management
pub use session::{CENTRAL_STREAK_LIMIT, CommandError, GameSession, Phase, StateSnapshot};

// Crate-level exports - Game types
pub use seega_rules::{BOARD_SIZE, Board, Cell, PIECES_PER_PLAYER, Player, Position};
