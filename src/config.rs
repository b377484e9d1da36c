use crate::error::LogoError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 100;
pub const FIRST_WORD: &str = "Easy";
pub const SECOND_WORD: &str = "Look";
pub const WORD_GAP: i32 = 15;
pub const FONT_SIZE: f32 = 50.0;
pub const TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const OUTPUT_PATH: &str = "boombang-palette-app/public/logo.png";

pub const FONT_URL: &str =
    "https://github.com/google/fonts/raw/main/ofl/poppins/Poppins-SemiBold.ttf";
pub const FONT_CACHE: &str = "Poppins-SemiBold.ttf";

const LOCAL_CONFIG_FILE: &str = "easy_look.json";
const CONFIG_DIR_NAME: &str = "EasyLook";

/// Dimensions substituted as a set when text cannot be measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackMetrics {
    pub full_width: i32,
    pub easy_width: i32,
    pub look_width: i32,
    pub full_height: i32,
}

pub const FALLBACK_METRICS: FallbackMetrics = FallbackMetrics {
    full_width: 300,
    easy_width: 140,
    look_width: 140,
    full_height: 50,
};

/// The single logical string the logo spells, used for block centering.
pub fn full_text() -> String {
    format!("{} {}", FIRST_WORD, SECOND_WORD)
}

/// Where fonts come from and where the logo goes. The layout itself is
/// fixed and has no settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoConfig {
    pub font_url: String,
    pub font_cache: PathBuf,
    pub system_fonts: Vec<PathBuf>,
    pub output_path: PathBuf,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            font_url: FONT_URL.to_string(),
            font_cache: PathBuf::from(FONT_CACHE),
            system_fonts: default_system_fonts(),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}

/// Font source settings an optional config file may replace. Any other key
/// in the file is ignored.
#[derive(Debug, Default, Deserialize)]
struct FontOverrides {
    font_url: Option<String>,
    font_cache: Option<PathBuf>,
    system_fonts: Option<Vec<PathBuf>>,
}

fn default_system_fonts() -> Vec<PathBuf> {
    [
        // Segoe UI Bold, Calibri Bold, Arial Bold
        "C:/Windows/Fonts/segoeuib.ttf",
        "C:/Windows/Fonts/calibrib.ttf",
        "C:/Windows/Fonts/arialbd.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "/Library/Fonts/Arial Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

impl LogoConfig {
    /// Applies the first readable config file over the defaults. The working
    /// directory file takes priority over the one in the user config
    /// directory.
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if !path.exists() {
                log::debug!("No config file at {:?}", path);
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => {
                    println!("✅ Loaded font settings from {:?}", path);
                    return config;
                }
                Err(e) => {
                    eprintln!("❌ Ignoring config {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self, LogoError> {
        let content = fs::read_to_string(path)?;
        let overrides: FontOverrides = serde_json::from_str(&content)?;
        Ok(Self::default().with_overrides(overrides))
    }

    fn with_overrides(mut self, overrides: FontOverrides) -> Self {
        if let Some(url) = overrides.font_url {
            self.font_url = url;
        }
        if let Some(cache) = overrides.font_cache {
            self.font_cache = cache;
        }
        if let Some(fonts) = overrides.system_fonts {
            self.system_fonts = fonts;
        }
        self
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(CONFIG_DIR_NAME).join("config.json"));
        }
        paths
    }
}
