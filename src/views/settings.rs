//! Settings view component

use crate::config::Config;
use crate::director::prompt::{AspectRatio, ModelTier, Resolution};
use dioxus::prelude::*;

/// Settings page component
#[component]
pub fn Settings() -> Element {
    let mut config = use_signal(Config::load);
    let mut save_status = use_signal(String::new);

    // Save handler
    let save_config = move |_| match config().save() {
        Ok(_) => save_status.set("Settings saved!".to_string()),
        Err(e) => save_status.set(format!("Error: {}", e)),
    };

    rsx! {
        div { class: "min-h-screen bg-gray-900 text-white p-8",
            div { class: "max-w-2xl mx-auto",
                h1 { class: "text-3xl font-bold mb-8", "⚙️ Settings" }

                // API key
                div { class: "mb-6",
                    label { class: "block text-sm font-medium mb-2", "Gemini API Key" }
                    input {
                        r#type: "password",
                        class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3 font-mono",
                        placeholder: "paste your API key",
                        value: config().api_key,
                        oninput: move |e| {
                            let mut c = config();
                            c.api_key = e.value();
                            config.set(c);
                        }
                    }
                    div { class: "text-xs text-gray-500 mt-1",
                        "Stored locally; only ever sent to the generation API."
                    }
                }

                // Model tier
                div { class: "mb-6",
                    label { class: "block text-sm font-medium mb-2", "Model" }
                    select {
                        class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3",
                        value: config().model_tier.as_str(),
                        onchange: move |e| {
                            let mut c = config();
                            c.model_tier = match e.value().as_str() {
                                "pro" => ModelTier::Pro,
                                _ => ModelTier::Flash,
                            };
                            config.set(c);
                        },
                        option { value: "flash", "Flash (fast)" }
                        option { value: "pro", "Pro (high fidelity)" }
                    }
                }

                // Default aspect ratio
                div { class: "mb-6",
                    label { class: "block text-sm font-medium mb-2", "Default Aspect Ratio" }
                    select {
                        class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3",
                        value: config().aspect_ratio.as_str(),
                        onchange: move |e| {
                            let mut c = config();
                            c.aspect_ratio = AspectRatio::from_str(&e.value());
                            config.set(c);
                        },
                        for ratio in AspectRatio::ALL {
                            option { value: ratio.as_str(), "{ratio.as_str()}" }
                        }
                    }
                }

                // Resolution (pro only)
                div { class: "mb-6",
                    label { class: "block text-sm font-medium mb-2", "Resolution (Pro only)" }
                    select {
                        class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3",
                        value: config().resolution.as_str(),
                        onchange: move |e| {
                            let mut c = config();
                            c.resolution = Resolution::from_str(&e.value());
                            config.set(c);
                        },
                        for resolution in Resolution::ALL {
                            option { value: resolution.as_str(), "{resolution.as_str()}" }
                        }
                    }
                }

                // Search grounding (pro only)
                div { class: "mb-8",
                    label { class: "flex items-center gap-3 text-sm font-medium",
                        input {
                            r#type: "checkbox",
                            checked: config().use_grounding,
                            onchange: move |e| {
                                let mut c = config();
                                c.use_grounding = e.checked();
                                config.set(c);
                            }
                        }
                        span { "Search grounding (Pro only)" }
                    }
                    div { class: "text-xs text-gray-500 mt-1 ml-7",
                        "Lets the model consult web results for factual scenes."
                    }
                }

                // Save button
                div { class: "flex items-center gap-4",
                    button {
                        class: "px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition",
                        onclick: save_config,
                        "Save Settings"
                    }
                    span { class: "text-green-400", "{save_status}" }
                }
            }
        }
    }
}
