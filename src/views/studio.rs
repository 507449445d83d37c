//! Studio view - prompt composition, generation controls, and history

use dioxus::prelude::*;
use std::path::PathBuf;

use crate::config::Config;
use crate::director::prompt::{
    compose, ConsistencyStrength, GenerationConfig, Photographic, NONE_SENTINEL,
};
use crate::generate::{GenerateClient, GenerateError, GenerateTask, ImageBlob};
use crate::library::{AssetKind, Character, GeneratedAsset, Library};
use crate::views::CameraRig;

const STYLES: [&str; 10] = [
    "None",
    "Photorealistic",
    "Cinematic Film Still",
    "Anime",
    "Watercolor",
    "Oil Painting",
    "Cyberpunk",
    "Film Noir",
    "3D Render",
    "Pixel Art",
];

const LIGHTING: [&str; 7] = [
    "None",
    "Golden Hour",
    "Studio Softbox",
    "Neon Night",
    "Overcast Daylight",
    "Candlelight",
    "Hard Rim Light",
];

const LENSES: [&str; 6] = [
    "None",
    "Anamorphic",
    "Vintage Prime",
    "Macro",
    "Tilt-Shift",
    "Fisheye",
];

const DEPTHS_OF_FIELD: [&str; 4] = [
    "None",
    "Shallow (f/1.4)",
    "Moderate (f/4)",
    "Deep Focus (f/11)",
];

const PERSPECTIVES: [&str; 5] = ["None", "eye-level", "isometric", "top-down", "three-quarter"];

const CONSISTENCY_LEVELS: [&str; 4] = ["None", "Low", "Medium", "High"];

/// Where exported images land
fn export_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
        .join("CineBanana")
}

/// Write an asset's raw payload next to the other exports
fn export_asset(asset: &GeneratedAsset) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let bytes = asset
        .image
        .decode()
        .ok_or("asset payload is not valid base64")?;
    let extension = match asset.image.mime_type.as_str() {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    };

    let dir = export_dir();
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.{extension}", asset.id));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// Studio page component
#[component]
pub fn Studio() -> Element {
    let config = use_signal(Config::load);
    let mut history = use_signal(|| Library::open_default().history());
    let vault_characters = use_signal(|| Library::open_default().vault());

    // prompt inputs
    let mut prompt = use_signal(String::new);
    let mut style = use_signal(|| NONE_SENTINEL.to_string());
    let mut lighting = use_signal(|| NONE_SENTINEL.to_string());
    let mut lens_choice = use_signal(|| NONE_SENTINEL.to_string());
    let mut depth_of_field = use_signal(|| NONE_SENTINEL.to_string());
    let mut consistency = use_signal(|| NONE_SENTINEL.to_string());
    let mut physics = use_signal(|| false);

    // structural guidance
    let mut camera_on = use_signal(|| false);
    let mut camera_text = use_signal(|| None::<String>);
    let mut sketch = use_signal(|| None::<ImageBlob>);
    let mut sketch_perspective = use_signal(|| NONE_SENTINEL.to_string());
    let mut references = use_signal(Vec::<ImageBlob>::new);
    let mut edit_source = use_signal(|| None::<GeneratedAsset>);
    let mut selected_ids = use_signal(Vec::<String>::new);

    // request lifecycle
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut auth_error = use_signal(|| false);
    let mut notice = use_signal(|| None::<String>);

    let generate = move |_| {
        if busy() {
            return;
        }
        let cfg = config();
        if cfg.api_key.trim().is_empty() {
            auth_error.set(true);
            error.set(Some("No API key configured. Add one in Settings.".to_string()));
            return;
        }
        let scene = prompt();
        if scene.trim().is_empty() {
            error.set(Some("Describe the scene first.".to_string()));
            return;
        }

        busy.set(true);
        error.set(None);
        auth_error.set(false);
        notice.set(None);

        // selection snapshot, in pick order
        let selected: Vec<Character> = selected_ids()
            .iter()
            .filter_map(|id| {
                vault_characters()
                    .iter()
                    .find(|character| &character.id == id)
                    .cloned()
            })
            .collect();

        let photographic = Photographic {
            lighting: Some(lighting()),
            lens: Some(lens_choice()),
            depth_of_field: Some(depth_of_field()),
        };
        let generation = GenerationConfig {
            aspect_ratio: cfg.aspect_ratio,
            model_tier: cfg.model_tier,
            resolution: cfg.resolution,
            use_grounding: cfg.use_grounding,
            style: Some(style()),
            photographic: (!photographic.is_empty()).then_some(photographic),
            consistency: ConsistencyStrength::from_str(&consistency()),
            character_names: selected.iter().map(|c| c.name.clone()).collect(),
            enhance_physics: physics(),
            has_sketch: sketch().is_some(),
            sketch_perspective: Some(sketch_perspective()),
            camera_description: camera_text(),
        };
        let final_prompt = compose(&scene, &generation);

        // edit source first, then picked characters, then manual uploads
        let mut reference_images: Vec<ImageBlob> = Vec::new();
        if let Some(source) = edit_source() {
            reference_images.push(source.image.clone());
        }
        reference_images.extend(selected.iter().map(|c| c.image.clone()));
        reference_images.extend(references());

        let task = GenerateTask {
            model_tier: cfg.model_tier,
            aspect_ratio: cfg.aspect_ratio,
            resolution: cfg.resolution,
            use_grounding: cfg.use_grounding,
            sketch: sketch(),
            references: reference_images,
            prompt: final_prompt.clone(),
        };
        let api_key = cfg.api_key.clone();

        spawn(async move {
            let client = GenerateClient::new(api_key);
            match client.generate(&task).await {
                Ok(image) => {
                    let asset = GeneratedAsset::new(image, final_prompt, AssetKind::Scene);
                    let mut updated = history();
                    if let Err(e) = Library::open_default().record(&mut updated, asset) {
                        tracing::warn!("history write failed: {e}");
                        notice.set(Some(format!(
                            "Image generated, but saving history failed: {e}"
                        )));
                    }
                    history.set(updated);
                }
                Err(e) => {
                    tracing::error!("generation failed: {e}");
                    if matches!(e, GenerateError::PermissionDenied(_)) {
                        auth_error.set(true);
                    }
                    error.set(Some(e.to_string()));
                }
            }
            busy.set(false);
        });
    };

    let clear_history = move |_| {
        let mut cleared = history();
        if let Err(e) = Library::open_default().clear_history(&mut cleared) {
            notice.set(Some(format!("Failed to clear history: {e}")));
        }
        history.set(cleared);
    };

    rsx! {
        div { class: "min-h-screen bg-gradient-to-br from-gray-900 via-gray-800 to-gray-900 text-white",
            div { class: "max-w-4xl mx-auto p-8 pt-6",
                div { class: "mb-8",
                    h1 { class: "text-2xl font-bold flex items-center gap-3",
                        span { class: "text-3xl", "🍌" }
                        span { "CineBanana Studio" }
                    }
                }

                // Error / notice banners
                if let Some(message) = error() {
                    div { class: "mb-4 p-4 bg-red-500/10 border border-red-500/40 rounded-xl text-sm text-red-300",
                        div { "{message}" }
                        if auth_error() {
                            Link {
                                to: crate::Route::Settings {},
                                class: "underline text-red-200",
                                "Open Settings to update your API key"
                            }
                        }
                    }
                }
                if let Some(message) = notice() {
                    div { class: "mb-4 p-3 bg-amber-500/10 border border-amber-500/40 rounded-xl text-sm text-amber-300",
                        "{message}"
                    }
                }

                // Edit banner
                if edit_source().is_some() {
                    div { class: "mb-4 p-3 bg-blue-500/10 border border-blue-500/40 rounded-xl text-sm text-blue-300 flex items-center justify-between",
                        span { "Editing from a previous image - it will be sent as the first reference." }
                        button {
                            class: "px-2 py-1 bg-gray-700/50 hover:bg-gray-600 rounded-lg text-xs",
                            onclick: move |_| edit_source.set(None),
                            "✕ Stop editing"
                        }
                    }
                }

                // Scene prompt
                div { class: "mb-6",
                    label { class: "block text-sm font-medium mb-2", "Scene" }
                    textarea {
                        class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3 h-28",
                        placeholder: "Describe the image you want...",
                        value: prompt(),
                        oninput: move |e| prompt.set(e.value()),
                    }
                }

                // Style row
                div { class: "grid grid-cols-2 gap-4 mb-6",
                    div {
                        label { class: "block text-sm font-medium mb-2", "Art Style" }
                        select {
                            class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3",
                            value: style(),
                            onchange: move |e| style.set(e.value()),
                            for option_label in STYLES {
                                option { value: option_label, "{option_label}" }
                            }
                        }
                    }
                    div {
                        label { class: "block text-sm font-medium mb-2", "Lighting" }
                        select {
                            class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3",
                            value: lighting(),
                            onchange: move |e| lighting.set(e.value()),
                            for option_label in LIGHTING {
                                option { value: option_label, "{option_label}" }
                            }
                        }
                    }
                    div {
                        label { class: "block text-sm font-medium mb-2", "Lens Character" }
                        select {
                            class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3",
                            value: lens_choice(),
                            onchange: move |e| lens_choice.set(e.value()),
                            for option_label in LENSES {
                                option { value: option_label, "{option_label}" }
                            }
                        }
                    }
                    div {
                        label { class: "block text-sm font-medium mb-2", "Depth of Field" }
                        select {
                            class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-3",
                            value: depth_of_field(),
                            onchange: move |e| depth_of_field.set(e.value()),
                            for option_label in DEPTHS_OF_FIELD {
                                option { value: option_label, "{option_label}" }
                            }
                        }
                    }
                }

                // Camera rig
                div { class: "mb-6",
                    button {
                        class: if camera_on() {
                            "px-4 py-2 bg-purple-600 hover:bg-purple-500 rounded-lg text-sm font-medium transition-all mb-3"
                        } else {
                            "px-4 py-2 bg-gray-700/50 hover:bg-gray-600 rounded-lg text-sm font-medium transition-all mb-3"
                        },
                        onclick: move |_| {
                            let enabled = !camera_on();
                            camera_on.set(enabled);
                            if !enabled {
                                // overlay removed: the translator callback goes quiet
                                camera_text.set(None);
                            }
                        },
                        if camera_on() { "🎥 Camera Rig: On" } else { "🎥 Camera Rig: Off" }
                    }
                    if camera_on() {
                        CameraRig {
                            on_change: move |text: String| camera_text.set(Some(text)),
                        }
                    }
                }

                // Sketch guidance
                div { class: "mb-6 p-4 bg-gray-800/30 rounded-xl border border-gray-700/50",
                    div { class: "flex items-center justify-between mb-2",
                        label { class: "text-sm font-medium", "Sketch Guide" }
                        if sketch().is_some() {
                            button {
                                class: "px-2 py-1 bg-gray-700/50 hover:bg-red-600 rounded-lg text-xs",
                                onclick: move |_| sketch.set(None),
                                "Remove"
                            }
                        }
                    }
                    if let Some(blob) = sketch() {
                        img {
                            class: "h-24 rounded-lg border border-gray-700 mb-2",
                            src: blob.to_data_uri(),
                        }
                    } else {
                        input {
                            r#type: "file",
                            accept: "image/png,image/jpeg,image/webp",
                            class: "text-sm text-gray-400",
                            onchange: move |evt| async move {
                                for file in evt.files() {
                                    let name = file.name();
                                    match file.read_bytes().await {
                                        Ok(bytes) => match ImageBlob::from_bytes(&bytes) {
                                            Some(blob) => sketch.set(Some(blob)),
                                            None => notice.set(Some(format!(
                                                "{name} is not a supported image"
                                            ))),
                                        },
                                        Err(e) => notice.set(Some(format!(
                                            "Failed to read {name}: {e}"
                                        ))),
                                    }
                                }
                            },
                        }
                    }
                    div { class: "mt-2",
                        label { class: "block text-xs text-gray-400 mb-1", "Perspective hint" }
                        select {
                            class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-2 text-sm",
                            value: sketch_perspective(),
                            onchange: move |e| sketch_perspective.set(e.value()),
                            for option_label in PERSPECTIVES {
                                option { value: option_label, "{option_label}" }
                            }
                        }
                    }
                }

                // Characters + references
                div { class: "mb-6 p-4 bg-gray-800/30 rounded-xl border border-gray-700/50",
                    label { class: "block text-sm font-medium mb-2", "Characters in this scene" }
                    if vault_characters().is_empty() {
                        div { class: "text-sm text-gray-500", "The vault is empty - add characters on the Characters page." }
                    } else {
                        div { class: "flex flex-wrap gap-2",
                            for character in vault_characters() {
                                button {
                                    class: if selected_ids().contains(&character.id) {
                                        "px-3 py-1.5 bg-emerald-600 rounded-lg text-sm font-medium"
                                    } else {
                                        "px-3 py-1.5 bg-gray-700/50 hover:bg-gray-600 rounded-lg text-sm"
                                    },
                                    onclick: {
                                        let id = character.id.clone();
                                        move |_| {
                                            let mut ids = selected_ids();
                                            if let Some(position) = ids.iter().position(|i| i == &id) {
                                                ids.remove(position);
                                            } else {
                                                ids.push(id.clone());
                                            }
                                            selected_ids.set(ids);
                                        }
                                    },
                                    "{character.name}"
                                }
                            }
                        }
                    }

                    div { class: "mt-4 grid grid-cols-2 gap-4",
                        div {
                            label { class: "block text-xs text-gray-400 mb-1", "Identity consistency" }
                            select {
                                class: "w-full bg-gray-800 border border-gray-700 rounded-lg p-2 text-sm",
                                value: consistency(),
                                onchange: move |e| consistency.set(e.value()),
                                for option_label in CONSISTENCY_LEVELS {
                                    option { value: option_label, "{option_label}" }
                                }
                            }
                        }
                        div { class: "flex items-end pb-1",
                            label { class: "flex items-center gap-2 text-sm",
                                input {
                                    r#type: "checkbox",
                                    checked: physics(),
                                    onchange: move |e| physics.set(e.checked()),
                                }
                                span { "Enhance physics realism" }
                            }
                        }
                    }

                    div { class: "mt-4",
                        label { class: "block text-xs text-gray-400 mb-1", "Extra reference images" }
                        input {
                            r#type: "file",
                            accept: "image/png,image/jpeg,image/webp",
                            multiple: true,
                            class: "text-sm text-gray-400",
                            onchange: move |evt| async move {
                                for file in evt.files() {
                                    let name = file.name();
                                    match file.read_bytes().await {
                                        Ok(bytes) => match ImageBlob::from_bytes(&bytes) {
                                            Some(blob) => {
                                                let mut list = references();
                                                list.push(blob);
                                                references.set(list);
                                            }
                                            None => notice.set(Some(format!(
                                                "{name} is not a supported image"
                                            ))),
                                        },
                                        Err(e) => notice.set(Some(format!(
                                            "Failed to read {name}: {e}"
                                        ))),
                                    }
                                }
                            },
                        }
                        if !references().is_empty() {
                            div { class: "flex gap-2 mt-2",
                                for (index, blob) in references().into_iter().enumerate() {
                                    div { class: "relative",
                                        img {
                                            class: "h-16 rounded-lg border border-gray-700",
                                            src: blob.to_data_uri(),
                                        }
                                        button {
                                            class: "absolute -top-2 -right-2 bg-gray-800 hover:bg-red-600 rounded-full w-5 h-5 text-xs",
                                            onclick: move |_| {
                                                let mut list = references();
                                                list.remove(index);
                                                references.set(list);
                                            },
                                            "✕"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                // Generate
                div { class: "mb-8",
                    button {
                        class: if busy() {
                            "w-full py-3 bg-emerald-800 rounded-xl font-medium cursor-wait opacity-70"
                        } else {
                            "w-full py-3 bg-emerald-600 hover:bg-emerald-500 rounded-xl font-medium transition-all shadow-lg shadow-emerald-600/30"
                        },
                        disabled: busy(),
                        onclick: generate,
                        if busy() { "Generating..." } else { "✨ Generate" }
                    }
                }

                // History
                div { class: "flex items-center justify-between mb-3",
                    h2 { class: "text-lg font-semibold", "History" }
                    if !history().is_empty() {
                        button {
                            class: "px-3 py-1.5 bg-gray-700/50 hover:bg-red-600 rounded-lg text-sm transition",
                            onclick: clear_history,
                            "🗑️ Clear all"
                        }
                    }
                }
                div { class: "space-y-3",
                    if history().is_empty() {
                        div { class: "text-center py-12 text-gray-500",
                            div { class: "text-4xl mb-4", "🎞️" }
                            div { "No images yet" }
                            div { class: "text-sm", "Describe a scene and press Generate" }
                        }
                    } else {
                        for asset in history() {
                            AssetCard {
                                asset: asset.clone(),
                                on_edit: move |source| edit_source.set(Some(source)),
                            }
                        }
                    }
                }

                if !history().is_empty() {
                    div { class: "mt-8 pt-6 border-t border-gray-700 text-center text-sm text-gray-500",
                        "{history().len()} image(s) in history"
                    }
                }
            }
        }
    }
}

/// Individual history card
#[component]
fn AssetCard(asset: GeneratedAsset, on_edit: EventHandler<GeneratedAsset>) -> Element {
    let mut vault_name = use_signal(String::new);
    let mut status_msg = use_signal(String::new);
    let created = asset.created_at.format("%Y-%m-%d %H:%M").to_string();

    let promote = {
        let asset = asset.clone();
        move |_| {
            let name = vault_name().trim().to_string();
            if name.is_empty() {
                status_msg.set("Name the character first".to_string());
                return;
            }
            let library = Library::open_default();
            let mut vault = library.vault();
            match library.promote(&mut vault, &asset, &name) {
                Ok(_) => status_msg.set(format!("✓ Saved {name} to the vault")),
                Err(e) => status_msg.set(format!("Vault write failed: {e}")),
            }
        }
    };

    let export = {
        let asset = asset.clone();
        move |_| match export_asset(&asset) {
            Ok(path) => status_msg.set(format!("✓ Exported to {}", path.display())),
            Err(e) => status_msg.set(format!("Export failed: {e}")),
        }
    };

    let edit = {
        let asset = asset.clone();
        move |_| on_edit.call(asset.clone())
    };

    rsx! {
        div {
            class: "p-4 bg-gray-800/40 rounded-xl border border-gray-700/50 hover:border-gray-600/70 hover:bg-gray-800/60 transition-all",
            div { class: "flex gap-4",
                img {
                    class: "w-32 h-32 object-cover rounded-lg border border-gray-700",
                    src: "{asset.url}",
                }
                div { class: "flex-1 min-w-0",
                    div { class: "text-xs text-gray-500 mb-1", "{created}" }
                    div { class: "text-sm text-gray-300 line-clamp-3 whitespace-pre-wrap", "{asset.prompt}" }

                    div { class: "flex items-center gap-2 mt-3 flex-wrap",
                        button {
                            class: "px-3 py-1.5 bg-blue-600 hover:bg-blue-500 rounded-lg text-sm font-medium transition-all",
                            onclick: edit,
                            "✏️ Edit"
                        }
                        button {
                            class: "px-3 py-1.5 bg-gray-700/50 hover:bg-gray-600 rounded-lg text-sm transition-all",
                            onclick: export,
                            "💾 Export"
                        }
                        input {
                            class: "bg-gray-800 border border-gray-700 rounded-lg px-2 py-1.5 text-sm w-32",
                            placeholder: "character name",
                            value: vault_name(),
                            oninput: move |e| vault_name.set(e.value()),
                        }
                        button {
                            class: "px-3 py-1.5 bg-purple-600 hover:bg-purple-500 rounded-lg text-sm font-medium transition-all",
                            onclick: promote,
                            "👤 To Vault"
                        }
                    }
                }
            }

            if !status_msg().is_empty() {
                div { class: "mt-3 text-sm text-amber-400 bg-amber-500/10 px-3 py-1.5 rounded-lg", "{status_msg}" }
            }
        }
    }
}
