//! Configuration loading (`spottedtext.toml`).
//!
//! Every section is optional. A missing file yields the defaults; a file
//! that exists but does not parse is an error, since the text defaults it
//! carries decide how every string is styled.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;
use tracing::info;

use crate::font::{FixedTypesetter, FontRegistry, load_font_from_file};
use crate::style::TextDefaults;
use crate::text::TextManager;

pub const DEFAULT_CONFIG_FILE: &str = "spottedtext.toml";

/// Logical screen size of the debug scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 240,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FaceConfig {
    pub path: PathBuf,
    #[serde(default = "FaceConfig::default_size")]
    pub size: f32,
}

impl FaceConfig {
    const fn default_size() -> f32 {
        48.0
    }
}

/// Outline fonts. Without a `default` face a fixed-advance typesetter is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub default: Option<FaceConfig>,
    pub faces: BTreeMap<String, FaceConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Rich text drawn by the debug scene every frame.
    pub demo_text: String,
    pub wrap_width: Option<i32>,
}

pub const DEMO_TEXT: &str = concat!(
    "ほげほげらんらんば\nABCDEFG\n",
    r#"\{"color":{"push":true,"b":255,"a": 128},"align":{"push":true,"right":true}}\ひあああ"#,
    "\n",
    r#"MO!\{"color":{"push":true,"g":255,"a": 255}}\緑の文字"#,
    "\n",
    r#"\{"align":{"push":true,"center":true},"color":{"pop":true}}\ほげほげもじ"#,
    "\n",
    r#"\{"reset":true}\リセット文字"#,
);

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            demo_text: DEMO_TEXT.to_string(),
            wrap_width: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub text: TextDefaults,
    pub fonts: FontsConfig,
    pub scene: SceneConfig,
}

/// Prefers `spottedtext.toml` in the working directory.
pub fn discover() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(target: "config", path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(target: "config", path = %path.display(), "loaded config");
    Ok(config)
}

impl Config {
    /// Builds the text manager: outline faces when configured, the
    /// fixed-advance typesetter otherwise. Relative font paths resolve
    /// against `base_dir`.
    pub fn text_manager(&self, base_dir: &Path) -> Result<TextManager> {
        let Some(default) = &self.fonts.default else {
            info!(target: "config", "no default font configured, using fixed-advance glyphs");
            return Ok(TextManager::new(
                self.text.clone(),
                FixedTypesetter::new(8, 12),
            ));
        };

        let data = load_font_from_file(base_dir.join(&default.path))?;
        let mut registry = FontRegistry::new(data, default.size)?;
        for (name, face) in &self.fonts.faces {
            let data = load_font_from_file(base_dir.join(&face.path))
                .with_context(|| format!("font face {name:?}"))?;
            registry.register(name.clone(), data, face.size)?;
        }
        Ok(TextManager::new(self.text.clone(), registry))
    }
}
