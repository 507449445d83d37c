//! Virtual camera for shot direction
//!
//! Translates a 2D camera position around a fixed subject into a structured
//! English description of the implied shot: lens, shot type, viewing side,
//! elevation, and framing. The output is used as a hard instruction block
//! ahead of the scene prompt.

/// Camera state within a square reference frame.
///
/// The subject sits at (50, 50). All fields are percentages and are expected
/// to be clamped to range by the caller; `clamped()` enforces that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Horizontal position (0-100), 50 = subject column
    pub x: f32,
    /// Vertical position (0-100), 50 = subject row; y grows downward
    pub y: f32,
    /// Elevation (0 = ground, 50 = eye level, 100 = directly overhead)
    pub height: f32,
    /// Rotation in degrees, 0 = pointing toward the top of the frame,
    /// increasing clockwise. Wrapped modulo 360 only for comparisons.
    pub rotation: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        // Front-facing full body shot at eye level
        Self {
            x: 50.0,
            y: 85.0,
            height: 50.0,
            rotation: 0.0,
        }
    }
}

impl CameraState {
    pub fn new(x: f32, y: f32, height: f32, rotation: f32) -> Self {
        Self {
            x,
            y,
            height,
            rotation,
        }
        .clamped()
    }

    /// Clamp position and elevation to their legal ranges.
    /// Rotation is left as stored; it is normalized at comparison time.
    pub fn clamped(mut self) -> Self {
        self.x = self.x.clamp(0.0, 100.0);
        self.y = self.y.clamp(0.0, 100.0);
        self.height = self.height.clamp(0.0, 100.0);
        self
    }

    /// Planar distance from the camera to the subject, clamped to 100.
    pub fn subject_distance(&self) -> f32 {
        let dx = self.x - 50.0;
        let dy = self.y - 50.0;
        (dx * dx + dy * dy).sqrt().min(100.0)
    }
}

/// Lens and shot type implied by one distance band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotProfile {
    pub lens: &'static str,
    pub shot: &'static str,
    /// Distortion/compression characteristic of this focal length
    pub physics: &'static str,
}

/// Vertical angle implied by one elevation band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElevationProfile {
    pub label: &'static str,
    pub note: &'static str,
    /// Ground/horizon features that must appear for the elevation to read
    pub anchor: &'static str,
}

/// Which side of the subject the camera sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewSide {
    Front,
    RightProfile,
    Back,
    LeftProfile,
}

impl ViewSide {
    pub fn label(&self) -> &'static str {
        match self {
            ViewSide::Front => "Front View",
            ViewSide::RightProfile => "Right Side Profile",
            ViewSide::Back => "Back View",
            ViewSide::LeftProfile => "Left Side Profile",
        }
    }
}

/// How close the camera's aim is to the subject
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    Centered,
    RuleOfThirds,
    EdgeOfFrame,
}

impl Framing {
    pub fn label(&self) -> &'static str {
        match self {
            Framing::Centered => "Subject Centered",
            Framing::RuleOfThirds => "Subject Off-Center (Rule of Thirds)",
            Framing::EdgeOfFrame => "Subject at the Edge of Frame, camera looking past them",
        }
    }
}

/// Classify a clamped subject distance into its lens/shot band.
pub fn shot_profile(distance: f32) -> ShotProfile {
    if distance < 12.0 {
        ShotProfile {
            lens: "24mm Ultra-Wide Macro",
            shot: "Extreme Close-Up",
            physics: "strong barrel distortion, exaggerated depth, surfaces nearest the lens loom large",
        }
    } else if distance < 25.0 {
        ShotProfile {
            lens: "35mm Wide Angle",
            shot: "Close-Up",
            physics: "mild wide-angle stretch, features closest to the camera appear slightly enlarged",
        }
    } else if distance < 45.0 {
        ShotProfile {
            lens: "50mm Standard Prime",
            shot: "Medium Shot",
            physics: "natural perspective, proportions as the human eye sees them",
        }
    } else if distance < 65.0 {
        ShotProfile {
            lens: "85mm Portrait Telephoto",
            shot: "Full Body Shot",
            physics: "gentle telephoto compression, shallow depth of field, flattering proportions",
        }
    } else {
        ShotProfile {
            lens: "200mm Long Telephoto",
            shot: "Wide Establishing Shot",
            physics: "strong spatial compression, the background stacks tightly behind the subject",
        }
    }
}

/// Classify which side of the subject the camera sits on.
///
/// The azimuth is the four-quadrant arctangent of the camera-minus-subject
/// offsets, normalized to [0, 360). Bands are half-open with an inclusive
/// lower bound, so a boundary angle belongs to the band it opens (the next
/// clockwise label in screen coordinates, where y grows downward). A camera
/// exactly on the subject reads as Front.
pub fn view_side(state: &CameraState) -> ViewSide {
    let dx = state.x - 50.0;
    let dy = state.y - 50.0;
    side_of_azimuth(dy.atan2(dx).to_degrees())
}

/// Band lookup for an azimuth angle in degrees (any range; normalized here).
pub fn side_of_azimuth(azimuth: f32) -> ViewSide {
    let azimuth = normalize_degrees(azimuth);
    if (45.0..135.0).contains(&azimuth) {
        ViewSide::Front
    } else if (135.0..225.0).contains(&azimuth) {
        ViewSide::LeftProfile
    } else if (225.0..315.0).contains(&azimuth) {
        ViewSide::Back
    } else {
        ViewSide::RightProfile
    }
}

/// Classify the camera elevation into its vertical-angle band.
pub fn elevation_profile(height: f32) -> ElevationProfile {
    if height < 15.0 {
        ElevationProfile {
            label: "Worm's-Eye View",
            note: "camera nearly at ground level, looking steeply upward",
            anchor: "the ground plane fills the foreground and the subject towers overhead with sky or ceiling behind them",
        }
    } else if height < 40.0 {
        ElevationProfile {
            label: "Low Angle",
            note: "camera below the subject's waist, tilted up",
            anchor: "the horizon line sits low in the frame, below the subject's hips",
        }
    } else if height < 60.0 {
        ElevationProfile {
            label: "Eye Level",
            note: "camera at the subject's eye height with a level horizon",
            anchor: "the horizon line crosses the frame at the subject's eyes",
        }
    } else if height < 85.0 {
        ElevationProfile {
            label: "High Angle",
            note: "camera above the subject's head, tilted down",
            anchor: "ground is visible behind the subject and the horizon sits near the top of the frame or out of it",
        }
    } else {
        ElevationProfile {
            label: "Top-Down Overhead",
            note: "camera directly above the subject, pointing straight down",
            anchor: "only the ground plane is visible with no horizon; the subject is foreshortened from above",
        }
    }
}

/// The rotation that would aim the camera straight at the subject.
///
/// 0 degrees points toward the top of the frame, so the raw arctangent of the
/// subject-relative vector is offset by 90.
pub fn ideal_rotation(state: &CameraState) -> f32 {
    let dx = 50.0 - state.x;
    let dy = 50.0 - state.y;
    normalize_degrees(dy.atan2(dx).to_degrees() + 90.0)
}

/// Classify how the subject sits in frame given the camera's actual rotation.
pub fn framing(state: &CameraState) -> Framing {
    let deviation = angular_difference(ideal_rotation(state), state.rotation);
    if deviation <= 10.0 {
        Framing::Centered
    } else if deviation <= 35.0 {
        Framing::RuleOfThirds
    } else {
        Framing::EdgeOfFrame
    }
}

/// Minimal angular difference between two rotations, in [0, 180].
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let raw = (normalize_degrees(a) - normalize_degrees(b)).abs();
    raw.min(360.0 - raw)
}

fn normalize_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Render the full mandatory camera instruction block for a camera state.
pub fn describe(state: &CameraState) -> String {
    let shot = shot_profile(state.subject_distance());
    let side = view_side(state);
    let elevation = elevation_profile(state.height);
    let frame = framing(state);

    format!(
        "CAMERA SETUP (MANDATORY):\n\
         - Camera: {lens}, {shot}\n\
         - Position: {side} of the subject\n\
         - Height: {elevation_label} (approx. {height:.0}% elevation), {elevation_note}\n\
         - Visual anchor: {anchor}.\n\
         - Lens physics: {physics}.\n\
         - Framing: {framing}\n\
         This camera setup overrides any camera or framing language in the scene description below.",
        lens = shot.lens,
        shot = shot.shot,
        side = side.label(),
        elevation_label = elevation.label,
        height = state.height,
        elevation_note = elevation.note,
        anchor = elevation.anchor,
        physics = shot.physics,
        framing = frame.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_distance_gives_equal_shot_band() {
        let r = 30.0_f32;
        let on_axis = [
            CameraState::new(50.0 + r, 50.0, 50.0, 0.0),
            CameraState::new(50.0 - r, 50.0, 50.0, 0.0),
            CameraState::new(50.0, 50.0 + r, 50.0, 0.0),
            CameraState::new(50.0, 50.0 - r, 50.0, 0.0),
        ];
        let diagonal = CameraState::new(
            50.0 + r / 2.0_f32.sqrt(),
            50.0 + r / 2.0_f32.sqrt(),
            50.0,
            0.0,
        );

        let expected = shot_profile(r);
        for state in on_axis {
            assert_eq!(shot_profile(state.subject_distance()), expected);
        }
        assert_eq!(shot_profile(diagonal.subject_distance()), expected);
    }

    #[test]
    fn distance_is_clamped_to_frame() {
        let state = CameraState {
            x: 0.0,
            y: 0.0,
            height: 50.0,
            rotation: 0.0,
        };
        assert!(state.subject_distance() <= 100.0);
    }

    #[test]
    fn band_boundary_at_45_is_portrait_telephoto() {
        assert_eq!(shot_profile(45.0).lens, "85mm Portrait Telephoto");
        assert_eq!(shot_profile(44.9).lens, "50mm Standard Prime");
    }

    #[test]
    fn azimuth_quadrants() {
        let below = CameraState::new(50.0, 95.0, 50.0, 0.0);
        let above = CameraState::new(50.0, 5.0, 50.0, 0.0);
        let right = CameraState::new(95.0, 50.0, 50.0, 0.0);
        let left = CameraState::new(5.0, 50.0, 50.0, 0.0);

        assert_eq!(view_side(&below), ViewSide::Front);
        assert_eq!(view_side(&above), ViewSide::Back);
        assert_eq!(view_side(&right), ViewSide::RightProfile);
        assert_eq!(view_side(&left), ViewSide::LeftProfile);
    }

    #[test]
    fn azimuth_boundaries_resolve_to_the_band_they_open() {
        assert_eq!(side_of_azimuth(45.0), ViewSide::Front);
        assert_eq!(side_of_azimuth(135.0), ViewSide::LeftProfile);
        assert_eq!(side_of_azimuth(225.0), ViewSide::Back);
        assert_eq!(side_of_azimuth(315.0), ViewSide::RightProfile);
        // negative inputs wrap to the same bands
        assert_eq!(side_of_azimuth(-45.0), ViewSide::RightProfile);
        assert_eq!(side_of_azimuth(-135.0), ViewSide::Back);
    }

    #[test]
    fn azimuth_is_total_over_a_position_sweep() {
        for step in 0..720 {
            let angle = (step as f32) * 0.5_f32.to_radians();
            let state = CameraState::new(
                50.0 + 30.0 * angle.cos(),
                50.0 + 30.0 * angle.sin(),
                50.0,
                0.0,
            );
            // the enum return makes the partition exhaustive; assert it is
            // also stable across repeated evaluation
            assert_eq!(view_side(&state), view_side(&state));
        }
    }

    #[test]
    fn framing_is_symmetric_under_wraparound() {
        // Camera below the subject: ideal rotation is 0 degrees
        let nudged_left = CameraState::new(50.0, 95.0, 50.0, 350.0);
        let nudged_right = CameraState::new(50.0, 95.0, 50.0, 10.0);

        assert_eq!(angular_difference(0.0, 350.0), 10.0);
        assert_eq!(framing(&nudged_left), framing(&nudged_right));
        assert_eq!(framing(&nudged_left), Framing::Centered);
    }

    #[test]
    fn framing_bands() {
        let base = |rotation| CameraState::new(50.0, 95.0, 50.0, rotation);
        assert_eq!(framing(&base(0.0)), Framing::Centered);
        assert_eq!(framing(&base(10.0)), Framing::Centered);
        assert_eq!(framing(&base(20.0)), Framing::RuleOfThirds);
        assert_eq!(framing(&base(35.0)), Framing::RuleOfThirds);
        assert_eq!(framing(&base(90.0)), Framing::EdgeOfFrame);
    }

    #[test]
    fn front_full_body_scenario() {
        // Directly below the subject at eye level, aimed straight at it
        let state = CameraState::new(50.0, 95.0, 50.0, 0.0);

        assert!((state.subject_distance() - 45.0).abs() < f32::EPSILON);
        assert_eq!(shot_profile(state.subject_distance()).lens, "85mm Portrait Telephoto");
        assert_eq!(view_side(&state), ViewSide::Front);
        assert!((ideal_rotation(&state)).abs() < 0.001);
        assert_eq!(framing(&state), Framing::Centered);

        let block = describe(&state);
        assert!(block.contains("85mm Portrait Telephoto"));
        assert!(block.contains("Front View"));
        assert!(block.contains("Eye Level"));
        assert!(block.contains("Subject Centered"));
        assert!(block.starts_with("CAMERA SETUP (MANDATORY):"));
        assert!(block.ends_with("scene description below."));
    }

    #[test]
    fn describe_is_deterministic() {
        let state = CameraState::new(72.0, 31.0, 22.0, 145.0);
        assert_eq!(describe(&state), describe(&state));
    }
}
