//! Interactive virtual camera widget
//!
//! Four sliders drive a [`CameraState`]; every change re-runs the translator
//! and fires the `on_change` callback with the fresh camera block. The parent
//! clears its copy when it unmounts the widget.

use dioxus::prelude::*;

use crate::director::camera::{self, CameraState};

#[component]
pub fn CameraRig(on_change: EventHandler<String>) -> Element {
    let mut state = use_signal(CameraState::default);

    // push the description to the parent on mount and on every slider change
    use_effect(move || {
        on_change.call(camera::describe(&state()));
    });

    let description = camera::describe(&state());

    rsx! {
        div { class: "p-4 bg-gray-800/40 rounded-xl border border-gray-700/50 space-y-4",
            div { class: "flex items-center justify-between",
                span { class: "text-sm font-medium text-gray-300", "Virtual Camera" }
                span { class: "text-xs text-gray-500", "subject pinned at frame center" }
            }

            div {
                label { class: "block text-xs text-gray-400 mb-1",
                    "Position X: {state().x:.0}%"
                }
                input {
                    r#type: "range",
                    class: "w-full",
                    min: "0",
                    max: "100",
                    step: "1",
                    value: state().x.to_string(),
                    oninput: move |e| {
                        let mut s = state();
                        s.x = e.value().parse().unwrap_or(50.0);
                        state.set(s.clamped());
                    }
                }
            }

            div {
                label { class: "block text-xs text-gray-400 mb-1",
                    "Position Y: {state().y:.0}%"
                }
                input {
                    r#type: "range",
                    class: "w-full",
                    min: "0",
                    max: "100",
                    step: "1",
                    value: state().y.to_string(),
                    oninput: move |e| {
                        let mut s = state();
                        s.y = e.value().parse().unwrap_or(50.0);
                        state.set(s.clamped());
                    }
                }
            }

            div {
                label { class: "block text-xs text-gray-400 mb-1",
                    "Height: {state().height:.0}% (0 = ground, 100 = overhead)"
                }
                input {
                    r#type: "range",
                    class: "w-full",
                    min: "0",
                    max: "100",
                    step: "1",
                    value: state().height.to_string(),
                    oninput: move |e| {
                        let mut s = state();
                        s.height = e.value().parse().unwrap_or(50.0);
                        state.set(s.clamped());
                    }
                }
            }

            div {
                label { class: "block text-xs text-gray-400 mb-1",
                    "Rotation: {state().rotation:.0}° (0 = toward frame top)"
                }
                input {
                    r#type: "range",
                    class: "w-full",
                    min: "0",
                    max: "359",
                    step: "1",
                    value: state().rotation.to_string(),
                    oninput: move |e| {
                        let mut s = state();
                        s.rotation = e.value().parse().unwrap_or(0.0);
                        state.set(s.clamped());
                    }
                }
            }

            pre { class: "text-xs text-gray-400 whitespace-pre-wrap bg-gray-900/60 rounded-lg p-3 font-mono",
                "{description}"
            }
        }
    }
}
