//! Font registration.
//!
//! Fonts are read once at startup into a [`FontRegistry`]; every canvas created
//! from the registry shares the resolved font database.

use std::path::{Path, PathBuf};

use canvas_utils_canvas2d::{
    Canvas2dContext, CustomFont, FontConfig, FontSlant, ResolvedFontConfig,
};
use serde::{Deserialize, Serialize};

use crate::error::{CanvasUtilsError, CanvasUtilsResult};

pub const WEIGHT_NORMAL: u16 = 400;
pub const WEIGHT_BOLD: u16 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl From<FontStyle> for FontSlant {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Normal => FontSlant::Normal,
            FontStyle::Italic => FontSlant::Italic,
            FontStyle::Oblique => FontSlant::Oblique,
        }
    }
}

/// One font file and the family/style/weight it is matched under.
///
/// Whatever the file's own tables say is ignored; an unset style or weight
/// registers as normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRegistration {
    pub path: PathBuf,
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
}

impl FontRegistration {
    pub fn new(path: impl Into<PathBuf>, family: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            family: family.into(),
            style: None,
            weight: None,
        }
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }

    fn load(&self) -> CanvasUtilsResult<CustomFont> {
        let data = std::fs::read(&self.path).map_err(|source| {
            CanvasUtilsError::FontRegistration {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(CustomFont {
            family_name: Some(self.family.clone()),
            style: Some(self.style.unwrap_or_default().into()),
            weight: Some(self.weight.unwrap_or(WEIGHT_NORMAL)),
            ..CustomFont::new(data)
        })
    }
}

/// On-disk form of a registry: `{"fonts": [{"path": ..., "family": ..., "style": ..., "weight": ...}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontManifest {
    pub fonts: Vec<FontRegistration>,
    #[serde(default = "default_load_system_fonts")]
    pub load_system_fonts: bool,
}

fn default_load_system_fonts() -> bool {
    true
}

/// Registered fonts, resolved into a font database that canvases share.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    registrations: Vec<FontRegistration>,
    resolved: ResolvedFontConfig,
}

impl FontRegistry {
    pub fn builder() -> FontRegistryBuilder {
        FontRegistryBuilder::default()
    }

    /// The Montserrat set, read from `dir`.
    pub fn montserrat(dir: impl AsRef<Path>) -> CanvasUtilsResult<Self> {
        let dir = dir.as_ref();
        Self::builder()
            .font(FontRegistration::new(
                dir.join("Montserrat-Regular.ttf"),
                "Montserrat",
            ))
            .font(FontRegistration::new(
                dir.join("Montserrat-SemiBold.ttf"),
                "Montserrat SemiBold",
            ))
            .font(
                FontRegistration::new(dir.join("Montserrat-Bold.ttf"), "Montserrat")
                    .weight(WEIGHT_BOLD),
            )
            .font(
                FontRegistration::new(dir.join("Montserrat-BoldItalic.ttf"), "Montserrat")
                    .style(FontStyle::Italic)
                    .weight(WEIGHT_BOLD),
            )
            .font(FontRegistration::new(
                dir.join("Montserrat-Black.ttf"),
                "Montserrat Black",
            ))
            .font(
                FontRegistration::new(dir.join("Montserrat-BlackItalic.ttf"), "Montserrat Black")
                    .style(FontStyle::Italic),
            )
            .build()
    }

    /// Read a JSON [`FontManifest`]. Relative font paths are resolved against the manifest's directory.
    pub fn from_manifest(path: impl AsRef<Path>) -> CanvasUtilsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CanvasUtilsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: FontManifest =
            serde_json::from_str(&text).map_err(|source| CanvasUtilsError::FontManifest {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let mut builder = Self::builder().system_fonts(manifest.load_system_fonts);
        for mut registration in manifest.fonts {
            if registration.path.is_relative() {
                registration.path = base.join(&registration.path);
            }
            builder = builder.font(registration);
        }
        builder.build()
    }

    pub fn registrations(&self) -> &[FontRegistration] {
        &self.registrations
    }

    pub fn resolved(&self) -> &ResolvedFontConfig {
        &self.resolved
    }

    /// A canvas that sees every registered font.
    pub fn create_canvas(&self, width: u32, height: u32) -> CanvasUtilsResult<Canvas2dContext> {
        Ok(Canvas2dContext::with_resolved(width, height, &self.resolved)?)
    }
}

#[derive(Debug, Clone)]
pub struct FontRegistryBuilder {
    registrations: Vec<FontRegistration>,
    load_system_fonts: bool,
}

impl Default for FontRegistryBuilder {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
            load_system_fonts: true,
        }
    }
}

impl FontRegistryBuilder {
    pub fn font(mut self, registration: FontRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Whether system fonts back up the registered ones (default: true).
    pub fn system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }

    /// Read every font file and resolve the font database.
    ///
    /// Fails on the first file that cannot be read.
    pub fn build(self) -> CanvasUtilsResult<FontRegistry> {
        let custom_fonts = self
            .registrations
            .iter()
            .map(FontRegistration::load)
            .collect::<CanvasUtilsResult<Vec<_>>>()?;

        let config = FontConfig {
            custom_fonts,
            load_system_fonts: self.load_system_fonts,
            ..FontConfig::default()
        };
        let resolved = config.resolve();
        log::info!(
            "Registered {} font files ({} faces available)",
            self.registrations.len(),
            resolved.face_count()
        );
        for registration in &self.registrations {
            if !resolved.has_family(&registration.family) {
                log::warn!(
                    "No usable face in {} for family {:?}",
                    registration.path.display(),
                    registration.family
                );
            }
        }

        Ok(FontRegistry {
            registrations: self.registrations,
            resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_font_file_fails_registration() {
        let dir = tempfile::tempdir().unwrap();
        let err = FontRegistry::montserrat(dir.path()).unwrap_err();
        match err {
            CanvasUtilsError::FontRegistration { path, source } => {
                assert_eq!(path, dir.path().join("Montserrat-Regular.ttf"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_manifest_paths_are_relative_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        // Unparseable font data is skipped by the font database, not rejected.
        std::fs::write(dir.path().join("Custom.ttf"), [0u8; 32]).unwrap();
        let manifest_path = dir.path().join("fonts.json");
        let mut file = std::fs::File::create(&manifest_path).unwrap();
        write!(
            file,
            r#"{{"fonts": [{{"path": "Custom.ttf", "family": "Custom", "style": "italic", "weight": 700}}],
                "load_system_fonts": false}}"#
        )
        .unwrap();

        let registry = FontRegistry::from_manifest(&manifest_path).unwrap();
        assert_eq!(
            registry.registrations(),
            &[FontRegistration::new(dir.path().join("Custom.ttf"), "Custom")
                .style(FontStyle::Italic)
                .weight(WEIGHT_BOLD)]
        );
        assert_eq!(registry.resolved().face_count(), 0);
        let canvas = registry.create_canvas(8, 8).unwrap();
        assert_eq!(canvas.width(), 8);
    }

    #[test]
    fn test_invalid_manifest_json() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("fonts.json");
        std::fs::write(&manifest_path, "{\"fonts\": 3}").unwrap();
        assert!(matches!(
            FontRegistry::from_manifest(&manifest_path),
            Err(CanvasUtilsError::FontManifest { .. })
        ));
    }

    #[test]
    fn test_missing_manifest_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FontRegistry::from_manifest(dir.path().join("nope.json")),
            Err(CanvasUtilsError::Io { .. })
        ));
    }

    #[test]
    fn test_unset_style_and_weight_register_as_normal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ttf");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let font = FontRegistration::new(&path, "A").load().unwrap();
        assert_eq!(font.family_name.as_deref(), Some("A"));
        assert_eq!(font.style, Some(FontSlant::Normal));
        assert_eq!(font.weight, Some(WEIGHT_NORMAL));
        assert_eq!(font.data.as_slice(), &[1, 2, 3]);
    }
}
