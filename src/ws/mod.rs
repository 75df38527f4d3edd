//! Live Board Push
//!
//! WebSocket endpoint for the view layer. Every connection gets a full
//! board snapshot on connect, then a stream of region and theme change
//! events. Connections are read-mostly; the only client input handled is
//! close (axum answers pings itself).

mod handler;
mod messages;

pub use handler::websocket_handler;
pub use messages::ServerMessage;
