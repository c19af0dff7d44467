pub mod bands;
pub mod cli;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod preview;
pub mod store;
pub mod toolbar;
pub mod tui;
