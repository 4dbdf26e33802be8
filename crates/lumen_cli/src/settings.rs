//! Camera settings loaded from JSON files.
//!
//! A settings file only lists the fields it changes; everything else keeps
//! the value from the scene's own camera.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lumen_renderer::CameraSettings;
use serde_json::Value;

/// Read a JSON settings file and overlay it on `base`.
pub fn load_camera_settings(path: &Path, base: &CameraSettings) -> Result<CameraSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let overrides: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    merge_settings(base, overrides)
        .with_context(|| format!("Invalid camera settings in {}", path.display()))
}

/// Overlay the fields present in `overrides` on `base`.
pub fn merge_settings(base: &CameraSettings, overrides: Value) -> Result<CameraSettings> {
    let Value::Object(fields) = overrides else {
        bail!("camera settings must be a JSON object");
    };

    let mut merged = serde_json::to_value(base)?;
    if let Some(target) = merged.as_object_mut() {
        target.extend(fields);
    }

    Ok(serde_json::from_value(merged)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Vec3;
    use serde_json::json;

    fn base() -> CameraSettings {
        CameraSettings::default()
            .with_quality(50, 10)
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
    }

    #[test]
    fn test_merge_keeps_unlisted_fields() {
        let merged = merge_settings(&base(), json!({ "image_width": 200 })).unwrap();

        assert_eq!(merged.image_width, 200);
        assert_eq!(merged.samples_per_pixel, 50);
        assert_eq!(merged.look_from, Vec3::new(13.0, 2.0, 3.0));
    }

    #[test]
    fn test_merge_vectors() {
        let merged = merge_settings(&base(), json!({ "look_at": [0.0, 1.0, 0.0] })).unwrap();
        assert_eq!(merged.look_at, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_merge_rejects_unknown_fields() {
        assert!(merge_settings(&base(), json!({ "sample_per_pixel": 3 })).is_err());
    }

    #[test]
    fn test_merge_rejects_non_object() {
        assert!(merge_settings(&base(), json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_camera_settings(Path::new("/nonexistent/lumen.json"), &base()).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("lumen-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "vfov": 35.0, "defocus_angle": 0.5 }"#).unwrap();

        let loaded = load_camera_settings(&path, &base());
        fs::remove_file(&path).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.vfov, 35.0);
        assert_eq!(loaded.defocus_angle, 0.5);
        assert_eq!(loaded.max_depth, 10);
    }
}
