//! Generation history and the character vault
//!
//! Both collections live in the key-value store and are rewritten in full on
//! every mutation. History is append-only newest-first; characters are
//! individually deletable but otherwise immutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generate::ImageBlob;
use crate::storage::{JsonStore, StorageError};

const HISTORY_KEY: &str = "history";
const VAULT_KEY: &str = "vault";

/// What a generated image depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Character,
    Scene,
}

/// One produced image. Never mutated after creation; the raw payload is kept
/// so follow-up edits can reuse it as a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAsset {
    pub id: String,
    /// Displayable data URI
    pub url: String,
    pub image: ImageBlob,
    /// The prompt that produced this image
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    pub kind: AssetKind,
}

impl GeneratedAsset {
    pub fn new(image: ImageBlob, prompt: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: image.to_data_uri(),
            image,
            prompt: prompt.into(),
            created_at: Utc::now(),
            kind,
        }
    }
}

/// A named, persisted reference image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub image: ImageBlob,
    pub created_at: DateTime<Utc>,
}

impl Character {
    pub fn new(name: impl Into<String>, image: ImageBlob) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            image,
            created_at: Utc::now(),
        }
    }
}

/// Facade over the store for the two studio collections.
///
/// Mutating operations update the in-memory collection first and return the
/// save result separately, so a storage failure can be shown as a warning
/// without losing the change for the current session.
pub struct Library {
    store: JsonStore,
}

impl Library {
    pub fn open_default() -> Self {
        Self {
            store: JsonStore::open_default(),
        }
    }

    pub fn with_store(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn history(&self) -> Vec<GeneratedAsset> {
        self.store.load(HISTORY_KEY).unwrap_or_default()
    }

    pub fn vault(&self) -> Vec<Character> {
        self.store.load(VAULT_KEY).unwrap_or_default()
    }

    /// Prepend a new asset (newest first) and persist.
    pub fn record(
        &self,
        history: &mut Vec<GeneratedAsset>,
        asset: GeneratedAsset,
    ) -> Result<(), StorageError> {
        history.insert(0, asset);
        self.store.save(HISTORY_KEY, history)
    }

    /// Drop the whole history. Individual assets are not removable.
    pub fn clear_history(&self, history: &mut Vec<GeneratedAsset>) -> Result<(), StorageError> {
        history.clear();
        self.store.save(HISTORY_KEY, history)
    }

    pub fn add_character(
        &self,
        vault: &mut Vec<Character>,
        character: Character,
    ) -> Result<(), StorageError> {
        vault.push(character);
        self.store.save(VAULT_KEY, vault)
    }

    pub fn remove_character(
        &self,
        vault: &mut Vec<Character>,
        id: &str,
    ) -> Result<(), StorageError> {
        vault.retain(|character| character.id != id);
        self.store.save(VAULT_KEY, vault)
    }

    /// Promote a generated asset into the vault under a display name.
    pub fn promote(
        &self,
        vault: &mut Vec<Character>,
        asset: &GeneratedAsset,
        name: &str,
    ) -> Result<(), StorageError> {
        self.add_character(vault, Character::new(name, asset.image.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_library(dir: &tempfile::TempDir) -> Library {
        Library::with_store(JsonStore::new(dir.path().to_path_buf()))
    }

    fn blob(tag: &str) -> ImageBlob {
        ImageBlob {
            mime_type: "image/png".to_string(),
            data: tag.to_string(),
        }
    }

    #[test]
    fn history_is_newest_first_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let library = test_library(&dir);
        let mut history = library.history();
        assert!(history.is_empty());

        library
            .record(
                &mut history,
                GeneratedAsset::new(blob("first"), "p1", AssetKind::Scene),
            )
            .unwrap();
        library
            .record(
                &mut history,
                GeneratedAsset::new(blob("second"), "p2", AssetKind::Scene),
            )
            .unwrap();

        assert_eq!(history[0].image.data, "second");
        assert_eq!(history[1].image.data, "first");

        let reloaded = test_library(&dir).history();
        assert_eq!(reloaded, history);
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let library = test_library(&dir);
        let mut history = Vec::new();
        library
            .record(
                &mut history,
                GeneratedAsset::new(blob("a"), "p", AssetKind::Scene),
            )
            .unwrap();
        library.clear_history(&mut history).unwrap();
        assert!(history.is_empty());
        assert!(test_library(&dir).history().is_empty());
    }

    #[test]
    fn promote_copies_the_image_payload() {
        let dir = tempfile::tempdir().unwrap();
        let library = test_library(&dir);
        let asset = GeneratedAsset::new(blob("portrait"), "p", AssetKind::Character);

        let mut vault = Vec::new();
        library.promote(&mut vault, &asset, "Mina").unwrap();

        assert_eq!(vault.len(), 1);
        assert_eq!(vault[0].name, "Mina");
        assert_eq!(vault[0].image, asset.image);
        assert_ne!(vault[0].id, asset.id);
    }

    #[test]
    fn remove_character_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let library = test_library(&dir);
        let mut vault = Vec::new();
        library
            .add_character(&mut vault, Character::new("Mina", blob("a")))
            .unwrap();
        library
            .add_character(&mut vault, Character::new("Theo", blob("b")))
            .unwrap();

        let id = vault[0].id.clone();
        library.remove_character(&mut vault, &id).unwrap();
        assert_eq!(vault.len(), 1);
        assert_eq!(vault[0].name, "Theo");
        assert_eq!(test_library(&dir).vault().len(), 1);
    }

    #[test]
    fn asset_url_is_a_data_uri() {
        let asset = GeneratedAsset::new(
            ImageBlob {
                mime_type: "image/png".to_string(),
                data: "QUJD".to_string(),
            },
            "p",
            AssetKind::Scene,
        );
        assert_eq!(asset.url, "data:image/png;base64,QUJD");
    }
}
