//! API Route Handlers

pub mod board;
pub mod health;
pub mod theme;
pub mod widgets;
