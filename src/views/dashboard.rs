//! Dashboard view - the linked map and scene views and their controls

use crate::app::AppSnapshot;
use crate::sync::SyncPhase;
use crate::view::{PanDirection, ViewKind, ViewSnapshot};
use crate::AppHandle;
use dioxus::prelude::*;

fn phase_label(phase: SyncPhase) -> &'static str {
    match phase {
        SyncPhase::Waiting => "Waiting for the scene to settle",
        SyncPhase::Bridging => "Scene drives map",
        SyncPhase::Disposed => "Unlinked",
    }
}

fn phase_class(phase: SyncPhase) -> &'static str {
    match phase {
        SyncPhase::Waiting => "badge badge-waiting",
        SyncPhase::Bridging => "badge badge-linked",
        SyncPhase::Disposed => "badge badge-off",
    }
}

/// One view's camera readout
#[component]
fn ViewPanel(view: ViewSnapshot) -> Element {
    let icon = match view.kind {
        ViewKind::Map => "🗺️",
        ViewKind::Scene => "🌐",
    };
    let motion = if view.stationary { "Stationary" } else { "Moving" };

    rsx! {
        div { class: "panel",
            div { class: "panel-header",
                span { class: "panel-icon", "{icon}" }
                span { class: "panel-title", "{view.name}" }
                span {
                    class: if view.stationary { "dot dot-still" } else { "dot dot-moving" },
                }
                span { class: "muted", "{motion}" }
            }
            div { class: "readout",
                div { class: "label", "Center" }
                div { class: "mono", "{view.center}" }
                div { class: "label", "Zoom" }
                div { class: "mono", "{view.zoom:.2}" }
                if !view.ready {
                    div { class: "muted", "Not attached" }
                }
            }
        }
    }
}

/// Dashboard component
#[component]
pub fn Dashboard() -> Element {
    let linked = use_context::<AppHandle>();
    let snapshot = use_context::<Signal<AppSnapshot>>();
    let mut status_message = use_signal(String::new);

    let snap = snapshot();

    let pan = |direction: PanDirection| {
        let linked = linked.clone();
        move |_: Event<MouseData>| linked.0.pan_scene(direction)
    };

    let zoom_to_layer = {
        let linked = linked.clone();
        move |_| match linked.0.zoom_to_layer() {
            Ok(_) => status_message.set("Zooming to layer".to_string()),
            Err(e) => {
                tracing::warn!("Zoom to layer failed: {e}");
                status_message.set(format!("Error: {e}"));
            }
        }
    };

    let unlink = {
        let linked = linked.clone();
        move |_| {
            linked.0.unlink();
            status_message.set("Views unlinked".to_string());
        }
    };

    rsx! {
        div { class: "page",
            div { class: "header",
                h1 { "Linked Views" }
                span { class: phase_class(snap.phase), "{phase_label(snap.phase)}" }
            }

            div { class: "panels",
                ViewPanel { view: snap.map_view.clone() }
                ViewPanel { view: snap.scene_view.clone() }
            }

            div { class: "controls",
                div { class: "label", "Pan scene" }
                div { class: "pad",
                    button { onclick: pan(PanDirection::North), "▲" }
                    button { onclick: pan(PanDirection::West), "◀" }
                    button { onclick: pan(PanDirection::East), "▶" }
                    button { onclick: pan(PanDirection::South), "▼" }
                }
                div { class: "actions",
                    button { class: "primary", onclick: zoom_to_layer, "Zoom to layer" }
                    button {
                        class: "danger",
                        disabled: snap.phase == SyncPhase::Disposed,
                        onclick: unlink,
                        "Unlink views"
                    }
                    span { class: "status", "{status_message}" }
                }
            }

            div { class: "panel",
                div { class: "panel-header",
                    span { class: "panel-title", "Map" }
                    span { class: "muted", "{snap.basemap.label()}" }
                }
                if snap.layers.is_empty() {
                    div { class: "muted", "No operational layers yet" }
                } else {
                    ul { class: "layers",
                        for title in snap.layers.iter() {
                            li { key: "{title}", "{title}" }
                        }
                    }
                }
            }
        }
    }
}
