//! Prompt composition for image generation
//!
//! Assembles the final prompt from a [`GenerationConfig`] and the user's scene
//! text in a fixed section order. Sections whose option is unset or equal to
//! the `"None"` sentinel are omitted. The composer is a pure function:
//! identical input always yields byte-identical output.

use serde::{Deserialize, Serialize};

/// Sentinel used by the UI selects for "no selection"
pub const NONE_SENTINEL: &str = "None";

/// Supported output aspect ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Landscape16x9,
    Portrait9x16,
    Landscape4x3,
    Portrait3x4,
    Landscape3x2,
    Portrait2x3,
    Ultrawide21x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 8] = [
        AspectRatio::Square,
        AspectRatio::Landscape16x9,
        AspectRatio::Portrait9x16,
        AspectRatio::Landscape4x3,
        AspectRatio::Portrait3x4,
        AspectRatio::Landscape3x2,
        AspectRatio::Portrait2x3,
        AspectRatio::Ultrawide21x9,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape16x9 => "16:9",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Landscape3x2 => "3:2",
            AspectRatio::Portrait2x3 => "2:3",
            AspectRatio::Ultrawide21x9 => "21:9",
        }
    }

    pub fn from_str(value: &str) -> AspectRatio {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == value)
            .unwrap_or_default()
    }
}

/// Generation model tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModelTier {
    #[default]
    Flash,
    Pro,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Flash => "flash",
            ModelTier::Pro => "pro",
        }
    }
}

/// Output resolution, only meaningful on the Pro tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    OneK,
    TwoK,
    FourK,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::OneK, Resolution::TwoK, Resolution::FourK];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::OneK => "1K",
            Resolution::TwoK => "2K",
            Resolution::FourK => "4K",
        }
    }

    pub fn from_str(value: &str) -> Resolution {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == value)
            .unwrap_or_default()
    }
}

/// How strictly reference characters must be preserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyStrength {
    Low,
    Medium,
    High,
}

impl ConsistencyStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyStrength::Low => "Low",
            ConsistencyStrength::Medium => "Medium",
            ConsistencyStrength::High => "High",
        }
    }

    pub fn from_str(value: &str) -> Option<ConsistencyStrength> {
        match value {
            "Low" => Some(ConsistencyStrength::Low),
            "Medium" => Some(ConsistencyStrength::Medium),
            "High" => Some(ConsistencyStrength::High),
            _ => None,
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            ConsistencyStrength::Low => {
                "Keep the referenced characters loosely recognizable; favor the scene's mood and composition over exact likeness."
            }
            ConsistencyStrength::Medium => {
                "Preserve each referenced character's facial features, hair, and build so they are clearly the same person as in the reference images."
            }
            ConsistencyStrength::High => {
                "Reproduce each referenced character's identity exactly: face geometry, eye and hair color, hairstyle, skin tone, and signature outfit details must match the reference images precisely."
            }
        }
    }
}

/// Optional lighting / lens / depth-of-field hints
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Photographic {
    pub lighting: Option<String>,
    pub lens: Option<String>,
    pub depth_of_field: Option<String>,
}

impl Photographic {
    pub fn is_empty(&self) -> bool {
        set(&self.lighting).is_none()
            && set(&self.lens).is_none()
            && set(&self.depth_of_field).is_none()
    }
}

/// Everything the composer needs to build one request prompt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub aspect_ratio: AspectRatio,
    pub model_tier: ModelTier,
    pub resolution: Resolution,
    pub use_grounding: bool,
    pub style: Option<String>,
    pub photographic: Option<Photographic>,
    pub consistency: Option<ConsistencyStrength>,
    /// Selected characters, in pick order
    pub character_names: Vec<String>,
    pub enhance_physics: bool,
    /// True when a sketch image is attached to the request
    pub has_sketch: bool,
    pub sketch_perspective: Option<String>,
    /// Mandatory camera block from the translator, if the camera rig is active
    pub camera_description: Option<String>,
}

const SKETCH_GUIDE: &str = "The attached sketch is a strict composition guide. Match the placement, \
scale, and arrangement of the drawn elements exactly; treat the sketch as the structural blueprint \
for the image.";

const POSE_DECOUPLING: &str = "Use the character reference images for identity only: face, hair, \
body type, and outfit. Do not copy the pose, head angle, expression, or camera distance from the \
reference images; pose and framing come solely from the scene description and camera setup.";

const DISTINCT_CHARACTERS: &str = "Keep every character visually distinct. Do not blend or average \
their facial features, hairstyles, or outfits.";

const PHYSICS_NOTES: &str = "Render physically plausible interactions: real grip pressure where \
hands touch objects, fabric tension and drape that follows the pose, and hair and clothing that \
obey gravity.";

/// Treat empty strings and the `"None"` sentinel as unset.
fn set(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NONE_SENTINEL)
}

/// Assemble the final prompt from the scene text and config.
pub fn compose(scene: &str, config: &GenerationConfig) -> String {
    let mut sections: Vec<String> = Vec::new();

    // 1. camera: mandatory block wins, else a plain perspective line
    if let Some(camera) = set(&config.camera_description) {
        sections.push(camera.to_string());
    } else if let Some(perspective) = set(&config.sketch_perspective) {
        sections.push(format!("Camera perspective: {perspective}."));
    }

    // 2. structural sketch guidance
    if config.has_sketch {
        sections.push(SKETCH_GUIDE.to_string());
    }

    // 3. style
    if let Some(style) = set(&config.style) {
        sections.push(format!("Art style: {style}."));
    }

    // 4. photographic triple, each field independently
    if let Some(photo) = &config.photographic {
        if let Some(lighting) = set(&photo.lighting) {
            sections.push(format!("Lighting: {lighting}."));
        }
        if let Some(lens) = set(&photo.lens) {
            sections.push(format!("Lens: {lens}."));
        }
        if let Some(dof) = set(&photo.depth_of_field) {
            sections.push(format!("Depth of field: {dof}."));
        }
    }

    // 5. scene text verbatim
    sections.push(scene.to_string());

    // 6. character presence + pose decoupling
    if !config.character_names.is_empty() {
        sections.push(format!(
            "Featuring: {}.",
            config.character_names.join(", ")
        ));
        sections.push(POSE_DECOUPLING.to_string());
        if config.character_names.len() > 1 {
            sections.push(DISTINCT_CHARACTERS.to_string());
        }
    }

    // 7. physics enhancement
    if config.enhance_physics {
        sections.push(PHYSICS_NOTES.to_string());
    }

    // 8. consistency strength
    if let Some(consistency) = config.consistency {
        sections.push(consistency.instruction().to_string());
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_config() -> GenerationConfig {
        GenerationConfig::default()
    }

    #[test]
    fn composer_is_deterministic() {
        let config = GenerationConfig {
            style: Some("Film Noir".to_string()),
            photographic: Some(Photographic {
                lighting: Some("Golden Hour".to_string()),
                lens: None,
                depth_of_field: Some("Shallow".to_string()),
            }),
            consistency: Some(ConsistencyStrength::High),
            character_names: vec!["Mina".to_string(), "Theo".to_string()],
            enhance_physics: true,
            has_sketch: true,
            camera_description: Some("CAMERA SETUP (MANDATORY):\n- Camera: test".to_string()),
            ..bare_config()
        };
        assert_eq!(
            compose("a rainy alley", &config),
            compose("a rainy alley", &config)
        );
    }

    #[test]
    fn bare_config_yields_only_scene_text() {
        let config = GenerationConfig {
            style: Some("None".to_string()),
            ..bare_config()
        };
        assert_eq!(compose("a quiet harbor at dawn", &config), "a quiet harbor at dawn");
    }

    #[test]
    fn none_sentinel_fields_are_omitted() {
        let config = GenerationConfig {
            style: Some("None".to_string()),
            sketch_perspective: Some("None".to_string()),
            photographic: Some(Photographic {
                lighting: Some("None".to_string()),
                lens: Some("None".to_string()),
                depth_of_field: Some(String::new()),
            }),
            ..bare_config()
        };
        let prompt = compose("scene", &config);
        assert!(!prompt.contains("Art style"));
        assert!(!prompt.contains("Lighting"));
        assert!(!prompt.contains("Lens"));
        assert!(!prompt.contains("Depth of field"));
        assert!(!prompt.contains("Camera perspective"));
    }

    #[test]
    fn sections_come_in_fixed_order() {
        let config = GenerationConfig {
            style: Some("Anime".to_string()),
            photographic: Some(Photographic {
                lighting: Some("Studio Softbox".to_string()),
                ..Photographic::default()
            }),
            consistency: Some(ConsistencyStrength::Low),
            character_names: vec!["Mina".to_string()],
            enhance_physics: true,
            has_sketch: true,
            camera_description: Some("CAMERA SETUP (MANDATORY): test block".to_string()),
            ..bare_config()
        };
        let prompt = compose("the scene text", &config);

        let order = [
            "CAMERA SETUP (MANDATORY)",
            "strict composition guide",
            "Art style: Anime.",
            "Lighting: Studio Softbox.",
            "the scene text",
            "Featuring: Mina.",
            "identity only",
            "grip pressure",
            "loosely recognizable",
        ];
        let mut last = 0;
        for marker in order {
            let at = prompt[last..]
                .find(marker)
                .unwrap_or_else(|| panic!("missing or misordered section: {marker}"));
            last += at;
        }
    }

    #[test]
    fn camera_block_replaces_perspective_line() {
        let with_block = GenerationConfig {
            camera_description: Some("CAMERA SETUP (MANDATORY): block".to_string()),
            sketch_perspective: Some("isometric".to_string()),
            ..bare_config()
        };
        let prompt = compose("scene", &with_block);
        assert!(prompt.contains("CAMERA SETUP"));
        assert!(!prompt.contains("Camera perspective:"));

        let without_block = GenerationConfig {
            sketch_perspective: Some("isometric".to_string()),
            ..bare_config()
        };
        assert!(compose("scene", &without_block).contains("Camera perspective: isometric."));
    }

    #[test]
    fn distinctness_only_for_multiple_characters() {
        let solo = GenerationConfig {
            character_names: vec!["Mina".to_string()],
            ..bare_config()
        };
        let duo = GenerationConfig {
            character_names: vec!["Mina".to_string(), "Theo".to_string()],
            ..bare_config()
        };
        assert!(!compose("scene", &solo).contains("visually distinct"));
        let duo_prompt = compose("scene", &duo);
        assert!(duo_prompt.contains("Featuring: Mina, Theo."));
        assert!(duo_prompt.contains("visually distinct"));
    }

    #[test]
    fn consistency_levels_have_distinct_texts() {
        let texts: Vec<String> = [
            ConsistencyStrength::Low,
            ConsistencyStrength::Medium,
            ConsistencyStrength::High,
        ]
        .into_iter()
        .map(|c| {
            compose(
                "scene",
                &GenerationConfig {
                    consistency: Some(c),
                    ..bare_config()
                },
            )
        })
        .collect();
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert!(texts[2].contains("exactly"));
    }

    #[test]
    fn aspect_ratio_round_trips_through_labels() {
        for ratio in AspectRatio::ALL {
            assert_eq!(AspectRatio::from_str(ratio.as_str()), ratio);
        }
        assert_eq!(AspectRatio::from_str("nonsense"), AspectRatio::Square);
    }
}
