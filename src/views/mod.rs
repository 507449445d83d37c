//! Views module - all page components

mod studio;
pub use studio::Studio;

mod vault;
pub use vault::Vault;

mod navbar;
pub use navbar::Navbar;

mod settings;
pub use settings::Settings;

mod camera_rig;
pub use camera_rig::CameraRig;
