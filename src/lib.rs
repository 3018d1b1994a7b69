//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};
use wasm_bindgen::prelude::*;

// Modules
mod analytics;
mod api;
mod components;
mod config;
pub mod error;
mod pages;

// Top-Level pages
use crate::pages::analytics::Analytics;
use crate::pages::dashboard::Dashboard;
use crate::pages::network::Network;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Wasm entry point: logging first, then the app on `<body>`.
#[wasm_bindgen(start)]
pub fn start() {
	init_logging();
	leptos::mount::mount_to_body(App);
}

/// An app router for the university dashboard, the consortium network and
/// the analytics explorer, with a 404 fallback
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="FRAMES Research Network" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Dashboard />
				<Route path=path!("/network") view=Network />
				<Route path=path!("/analytics") view=Analytics />
			</Routes>
		</Router>
	}
}
