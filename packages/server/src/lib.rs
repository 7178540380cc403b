//! Genkan server: a visitor/operator chat relay with a static menu tree.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
