use crate::app::AppSnapshot;
use crate::Route;
use dioxus::prelude::*;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Page links plus the current basemap and layer count
#[component]
pub fn Navbar() -> Element {
    let snapshot = use_context::<Signal<AppSnapshot>>();
    let snap = snapshot();
    let layers = match snap.layers.len() {
        1 => "1 layer".to_string(),
        n => format!("{n} layers"),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        div {
            id: "navbar",
            Link {
                to: Route::Dashboard {},
                "🗺️ Views"
            }
            Link {
                to: Route::Settings {},
                "⚙️ Settings"
            }
            span { class: "navbar-status", "{snap.basemap.label()} · {layers}" }
        }

        Outlet::<Route> {}
    }
}
