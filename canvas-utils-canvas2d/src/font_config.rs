use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Backend-agnostic font configuration.
///
/// Describes which fonts a context can see using only standard library types.
/// It is turned into a `fontdb` database by [`font_config_to_fontdb`].
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Custom font data to register, with optional family/style/weight overrides.
    pub custom_fonts: Vec<CustomFont>,
    /// Mappings from generic CSS family names to concrete font family names.
    pub generic_families: GenericFamilyMap,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl FontConfig {
    /// A configuration with no fonts at all, for offscreen surfaces that only
    /// composite pixels.
    pub fn empty() -> Self {
        Self {
            load_system_fonts: false,
            generic_families: GenericFamilyMap::default(),
            ..Self::default()
        }
    }

    /// Resolve this configuration into a concrete font database.
    ///
    /// The system font scan happens once here; the result can be cloned into
    /// any number of contexts.
    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig::new(self)
    }
}

/// Font slant requested for a registered face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSlant {
    Normal,
    Italic,
    Oblique,
}

impl From<FontSlant> for fontdb::Style {
    fn from(slant: FontSlant) -> Self {
        match slant {
            FontSlant::Normal => fontdb::Style::Normal,
            FontSlant::Italic => fontdb::Style::Italic,
            FontSlant::Oblique => fontdb::Style::Oblique,
        }
    }
}

/// A custom font to register: raw file data plus the properties it should be
/// matched under.
///
/// Overrides replace what the font's own name/OS2 tables say, which is how a
/// file such as `Montserrat-SemiBold.ttf` can be exposed as its own family.
#[derive(Clone, Debug)]
pub struct CustomFont {
    /// Raw font file data (TTF/OTF). Arc-wrapped for cheap cloning.
    pub data: Arc<Vec<u8>>,
    /// Family name override.
    pub family_name: Option<String>,
    /// Style override.
    pub style: Option<FontSlant>,
    /// Weight override (100-900).
    pub weight: Option<u16>,
}

impl CustomFont {
    /// Font data registered under the names from its own tables.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: Arc::new(data),
            family_name: None,
            style: None,
            weight: None,
        }
    }
}

/// Mappings from generic CSS family names to concrete font family names, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    pub serif: Vec<String>,
    pub sans_serif: Vec<String>,
    pub monospace: Vec<String>,
}

impl GenericFamilyMap {
    /// Browser-like defaults.
    pub fn defaults() -> Self {
        Self {
            sans_serif: vec![
                "Arial".into(),
                "Helvetica".into(),
                "Liberation Sans".into(),
                "DejaVu Sans".into(),
            ],
            monospace: vec![
                "Courier New".into(),
                "Liberation Mono".into(),
                "DejaVu Sans Mono".into(),
            ],
            serif: vec![
                "Times New Roman".into(),
                "Liberation Serif".into(),
                "DejaVu Serif".into(),
            ],
        }
    }
}

/// A [`FontConfig`] that has been resolved into a font database.
///
/// Cloning clones the database in memory (no filesystem scan).
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
}

impl ResolvedFontConfig {
    pub fn new(config: &FontConfig) -> Self {
        Self {
            fontdb: font_config_to_fontdb(config),
        }
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Whether any face is registered under `family`.
    pub fn has_family(&self, family: &str) -> bool {
        self.fontdb
            .faces()
            .any(|face| face.families.iter().any(|(name, _)| name == family))
    }
}

impl std::fmt::Debug for ResolvedFontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFontConfig")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

/// Convert a [`FontConfig`] into a [`fontdb::Database`].
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }

    for dir in &config.font_dirs {
        db.load_fonts_dir(dir);
    }

    for font in &config.custom_fonts {
        register_custom_font(&mut db, font);
    }

    apply_generic_families(&mut db, &config.generic_families);

    db
}

/// Load one custom font and rewrite its face records with the requested overrides.
fn register_custom_font(db: &mut fontdb::Database, font: &CustomFont) {
    let source = fontdb::Source::Binary(font.data.clone());
    let ids = db.load_font_source(source);

    if font.family_name.is_none() && font.style.is_none() && font.weight.is_none() {
        return;
    }

    for id in ids {
        let Some(mut info) = db.face(id).cloned() else {
            continue;
        };
        if let Some(family) = &font.family_name {
            info.families = vec![(family.clone(), fontdb::Language::English_UnitedStates)];
        }
        if let Some(style) = font.style {
            info.style = style.into();
        }
        if let Some(weight) = font.weight {
            info.weight = fontdb::Weight(weight);
        }
        log::debug!(
            target: "canvas",
            "registered face {:?} as {:?} {:?} {:?}",
            info.post_script_name,
            info.families.first().map(|(name, _)| name),
            info.style,
            info.weight
        );
        db.remove_face(id);
        db.push_face_info(info);
    }
}

/// Point each generic family at the first available concrete family.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(fam, _lang)| fam.clone()))
        .collect();

    let pick = |candidates: &[String]| candidates.iter().find(|f| available.contains(*f)).cloned();

    if let Some(family) = pick(&families.sans_serif) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = pick(&families.serif) {
        db.set_serif_family(family);
    }
    if let Some(family) = pick(&families.monospace) {
        db.set_monospace_family(family);
    }
}
