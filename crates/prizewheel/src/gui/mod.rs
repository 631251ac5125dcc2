pub mod app;
pub mod surface;
pub mod theme;
pub mod wheel_view;
