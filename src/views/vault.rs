//! Vault view - the persisted character reference library

use dioxus::prelude::*;

use crate::generate::ImageBlob;
use crate::library::{Character, Library};

/// Vault page component
#[component]
pub fn Vault() -> Element {
    let mut characters = use_signal(|| Library::open_default().vault());
    let mut new_name = use_signal(String::new);
    let mut status_msg = use_signal(String::new);

    rsx! {
        div { class: "min-h-screen bg-gradient-to-br from-gray-900 via-gray-800 to-gray-900 text-white",
            div { class: "max-w-4xl mx-auto p-8 pt-6",
                div { class: "mb-8",
                    h1 { class: "text-2xl font-bold flex items-center gap-3",
                        span { class: "text-3xl", "👤" }
                        span { "Character Vault" }
                    }
                }

                // Upload panel
                div { class: "mb-6 p-4 bg-gray-800/30 rounded-xl border border-gray-700/50",
                    label { class: "block text-sm font-medium mb-2", "Add a character" }
                    div { class: "flex items-center gap-3",
                        input {
                            class: "bg-gray-800 border border-gray-700 rounded-lg px-3 py-2 text-sm flex-1",
                            placeholder: "display name",
                            value: new_name(),
                            oninput: move |e| new_name.set(e.value()),
                        }
                        input {
                            r#type: "file",
                            accept: "image/png,image/jpeg,image/webp",
                            class: "text-sm text-gray-400",
                            onchange: move |evt| async move {
                                let name = new_name().trim().to_string();
                                if name.is_empty() {
                                    status_msg.set("Give the character a name first".to_string());
                                    return;
                                }
                                for file in evt.files() {
                                    let file_name = file.name();
                                    let bytes = match file.read_bytes().await {
                                        Ok(bytes) => bytes,
                                        Err(e) => {
                                            status_msg.set(format!("Failed to read {file_name}: {e}"));
                                            continue;
                                        }
                                    };
                                    match ImageBlob::from_bytes(&bytes) {
                                        Some(blob) => {
                                            let library = Library::open_default();
                                            let mut vault = characters();
                                            match library.add_character(
                                                &mut vault,
                                                Character::new(name.clone(), blob),
                                            ) {
                                                Ok(_) => {
                                                    status_msg.set(format!("✓ Added {name}"));
                                                    new_name.set(String::new());
                                                }
                                                Err(e) => status_msg.set(format!(
                                                    "Saved in session only; vault write failed: {e}"
                                                )),
                                            }
                                            characters.set(vault);
                                        }
                                        None => status_msg.set(format!(
                                            "{file_name} is not a supported image"
                                        )),
                                    }
                                }
                            },
                        }
                    }
                    if !status_msg().is_empty() {
                        div { class: "mt-3 text-sm text-amber-400 bg-amber-500/10 px-3 py-1.5 rounded-lg", "{status_msg}" }
                    }
                }

                // Character grid
                if characters().is_empty() {
                    div { class: "text-center py-12 text-gray-500",
                        div { class: "text-4xl mb-4", "🗂️" }
                        div { "No characters yet" }
                        div { class: "text-sm", "Upload a reference image or promote one from the Studio history" }
                    }
                } else {
                    div { class: "grid grid-cols-3 gap-4",
                        for character in characters() {
                            CharacterCard {
                                character: character.clone(),
                                on_delete: move |id: String| {
                                    let library = Library::open_default();
                                    let mut vault = characters();
                                    if let Err(e) = library.remove_character(&mut vault, &id) {
                                        status_msg.set(format!("Vault write failed: {e}"));
                                    }
                                    characters.set(vault);
                                },
                            }
                        }
                    }

                    div { class: "mt-8 pt-6 border-t border-gray-700 text-center text-sm text-gray-500",
                        "{characters().len()} character(s) in the vault"
                    }
                }
            }
        }
    }
}

/// Individual character card
#[component]
fn CharacterCard(character: Character, on_delete: EventHandler<String>) -> Element {
    let created = character.created_at.format("%Y-%m-%d").to_string();
    let id = character.id.clone();

    rsx! {
        div {
            class: "p-3 bg-gray-800/40 rounded-xl border border-gray-700/50 hover:border-gray-600/70 transition-all",
            img {
                class: "w-full h-40 object-cover rounded-lg border border-gray-700 mb-2",
                src: character.image.to_data_uri(),
            }
            div { class: "flex items-center justify-between",
                div { class: "min-w-0",
                    div { class: "font-medium truncate text-gray-100", "{character.name}" }
                    div { class: "text-xs text-gray-500", "{created}" }
                }
                button {
                    class: "px-2 py-1.5 bg-gray-700/50 hover:bg-red-600 rounded-lg text-sm transition-all",
                    onclick: move |_| on_delete.call(id.clone()),
                    "🗑️"
                }
            }
        }
    }
}
