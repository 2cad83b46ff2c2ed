// Presentation layer - console commands and the rendered page
pub mod app_state;
pub mod commands;
pub mod event_loop;
pub mod handlers;
pub mod html;
