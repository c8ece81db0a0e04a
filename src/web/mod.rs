//! Web module - render pass, HTML page and HTTP routes

mod dashboard;
mod page;
mod server;

pub use dashboard::RenderOptions;
pub use server::{create_router, AppState};
