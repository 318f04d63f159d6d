//! ZenJournal Desktop Application
//!
//! A mindful journaling app: dated entries, cloud persistence, and
//! AI-generated reflections.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod services;
mod state;
mod views;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("zenjournal=debug".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting ZenJournal...");

    dioxus::launch(app::App);
}
