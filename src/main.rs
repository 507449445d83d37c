use dioxus::prelude::*;

mod config;
mod diagnostics;
mod director;
mod generate;
mod library;
mod storage;
mod views;

use config::Config;
use views::{Navbar, Settings, Studio, Vault};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
        #[route("/")]
        Studio {},
        #[route("/vault")]
        Vault {},
        #[route("/settings")]
        Settings {},
}

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    let _log_guard = diagnostics::init_diagnostics();

    let config = Config::load();
    tracing::info!("CineBanana Studio starting...");
    if config.api_key.trim().is_empty() {
        tracing::warn!("No API key configured yet; generation is disabled until one is set in Settings");
    } else {
        tracing::info!(model = config.model_tier.as_str(), "API key loaded");
    }

    // Launch Dioxus app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: TAILWIND_CSS }

        Router::<Route> {}
    }
}
