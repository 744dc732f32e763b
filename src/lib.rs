pub mod aggregate;
pub mod app;
pub mod dataset;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod ui;
pub mod window;

pub use app::router;
pub use dataset::{load_dataset, resolve_dataset_path};
pub use state::AppState;
