//! Settings view component

use crate::config::Config;
use crate::map::Basemap;
use dioxus::prelude::*;

/// Settings page component
#[component]
pub fn Settings() -> Element {
    let mut config = use_signal(Config::load);
    let mut save_status = use_signal(String::new);

    // Save handler
    let save_config = move |_| match config().save() {
        Ok(_) => save_status.set("Settings saved. Restart to apply.".to_string()),
        Err(e) => {
            tracing::error!("Failed to save config: {e}");
            save_status.set(format!("Error: {}", e));
        }
    };

    rsx! {
        div { class: "page",
            h1 { "⚙️ Settings" }

            // Basemap
            div { class: "field",
                label { "Basemap" }
                select {
                    value: format!("{:?}", config().basemap),
                    onchange: move |e| {
                        let mut c = config();
                        c.basemap = Basemap::ALL
                            .into_iter()
                            .find(|b| format!("{:?}", b) == e.value())
                            .unwrap_or_default();
                        config.set(c);
                    },
                    for basemap in Basemap::ALL {
                        option { value: format!("{:?}", basemap), "{basemap.label()}" }
                    }
                }
            }

            // Camera smoothing
            div { class: "field",
                label { "Camera Smoothing: {config().smoothing:.2}" }
                input {
                    r#type: "range",
                    min: "0.02",
                    max: "0.5",
                    step: "0.01",
                    value: config().smoothing.to_string(),
                    oninput: move |e| {
                        let mut c = config();
                        c.smoothing = e.value().parse().unwrap_or(0.08);
                        config.set(c);
                    }
                }
            }

            // Tick rate
            div { class: "field",
                label { "Update Rate" }
                select {
                    value: config().tick_ms.to_string(),
                    onchange: move |e| {
                        let mut c = config();
                        c.tick_ms = e.value().parse().unwrap_or(16);
                        config.set(c);
                    },
                    option { value: "33", "30 Hz" }
                    option { value: "16", "60 Hz" }
                    option { value: "8", "120 Hz" }
                }
            }

            // Layer
            div { class: "field",
                label { "Operational Layer" }
                div { class: "mono box", "{config().layer.url}" }
                div { class: "muted", "Query: {config().layer.where_clause}" }
            }

            // Config location
            div { class: "field",
                label { "Config File" }
                div { class: "mono box", "{Config::config_path().display()}" }
            }

            div { class: "actions",
                button { class: "primary", onclick: save_config, "Save Settings" }
                span { class: "status", "{save_status}" }
            }
        }
    }
}
