pub mod app;
pub mod event;
pub mod games;
pub mod raster;
pub mod scores;
pub mod ui;
