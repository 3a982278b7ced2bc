pub mod app;
pub mod fixtures;

pub use app::make_test_app;
