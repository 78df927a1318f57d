use dioxus::prelude::*;
use std::rc::Rc;
use std::time::Duration;

mod app;
mod config;
mod diagnostics;
mod error;
mod layer;
mod map;
mod sync;
mod view;
mod views;

use app::LinkedApp;
use config::Config;
use views::{Dashboard, Navbar, Settings};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
        #[route("/")]
        Dashboard {},
        #[route("/settings")]
        Settings {},
}

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

/// Shared handle to the composed application, provided as context
#[derive(Clone)]
pub struct AppHandle(pub Rc<LinkedApp>);

fn main() {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = diagnostics::init_diagnostics();

    tracing::info!("LinkedViews starting...");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        let config = Config::load();
        tracing::info!("Config: {:?}", Config::config_path());
        tracing::info!("Basemap: {:?}", config.basemap);
        tracing::info!("Layer: {}", config.layer.url);
        config
    });
    let linked = use_hook(|| {
        let linked = Rc::new(app::build(&config));
        linked.attach();
        AppHandle(linked)
    });
    let mut snapshot = use_signal(|| linked.0.snapshot());

    use_context_provider(|| linked.clone());
    use_context_provider(|| snapshot);

    // Advance both cameras on a fixed interval and publish what changed
    let tick = config.tick_seconds();
    use_future(move || {
        let linked = linked.clone();
        async move {
            loop {
                tokio::time::sleep(Duration::from_secs_f64(tick)).await;
                linked.0.tick(tick);

                let next = linked.0.snapshot();
                if *snapshot.peek() != next {
                    snapshot.set(next);
                }
            }
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
