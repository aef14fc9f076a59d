pub mod app;
pub mod scene;
pub mod trips;
pub mod util;
