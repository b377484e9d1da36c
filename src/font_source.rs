use crate::builtin_font;
use crate::config::{LogoConfig, FONT_SIZE};
use crate::error::LogoError;
use crate::font_fetch::FontFetcher;
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSize {
    pub width: i32,
    pub height: i32,
}

/// The typeface the logo is drawn with, chosen once per run.
pub enum FontHandle {
    TrueType {
        font: Font<'static>,
        scale: Scale,
        path: PathBuf,
    },
    BuiltIn,
}

impl FontHandle {
    pub fn load(path: &Path, size: f32) -> Result<Self, LogoError> {
        let font_error = |message: String| LogoError::FontError {
            path: path.to_path_buf(),
            message,
        };

        let bytes = fs::read(path).map_err(|e| font_error(e.to_string()))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| font_error("not a TrueType or OpenType font".to_string()))?;

        Ok(FontHandle::TrueType {
            font,
            scale: Scale::uniform(size),
            path: path.to_path_buf(),
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontHandle::BuiltIn)
    }

    pub fn describe(&self) -> String {
        match self {
            FontHandle::TrueType { path, scale, .. } => {
                format!("{} at {}px", path.display(), scale.y)
            }
            FontHandle::BuiltIn => "built-in bitmap font".to_string(),
        }
    }

    /// Pixel bounding box of `text` as it would be drawn.
    ///
    /// Fails for a TrueType face that lacks a glyph for one of the
    /// characters, or when the text leaves no ink at all.
    pub fn measure(&self, text: &str) -> Result<TextSize, LogoError> {
        let (font, scale) = match self {
            FontHandle::TrueType { font, scale, .. } => (font, *scale),
            FontHandle::BuiltIn => {
                let (width, height) = builtin_font::text_size(text);
                return Ok(TextSize { width, height });
            }
        };

        let measure_error = |message: String| LogoError::MeasureError {
            text: text.to_string(),
            message,
        };

        if let Some(missing) = text
            .chars()
            .find(|&c| !c.is_whitespace() && font.glyph(c).id().0 == 0)
        {
            return Err(measure_error(format!("no glyph for {:?}", missing)));
        }

        let ascent = font.v_metrics(scale).ascent;
        let bounds = font
            .layout(text, scale, point(0.0, ascent))
            .filter_map(|glyph| glyph.pixel_bounding_box())
            .fold(None, |acc: Option<(i32, i32, i32, i32)>, bb| {
                Some(match acc {
                    None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                    Some((x0, y0, x1, y1)) => (
                        x0.min(bb.min.x),
                        y0.min(bb.min.y),
                        x1.max(bb.max.x),
                        y1.max(bb.max.y),
                    ),
                })
            });

        let (x0, y0, x1, y1) = bounds.ok_or_else(|| measure_error("no visible glyphs".to_string()))?;
        Ok(TextSize {
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        match self {
            FontHandle::TrueType { font, scale, .. } => {
                imageproc::drawing::draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            FontHandle::BuiltIn => builtin_font::draw_text(canvas, color, x, y, text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FontCandidate {
    Cached(PathBuf),
    System(PathBuf),
}

impl FontCandidate {
    fn path(&self) -> &Path {
        match self {
            FontCandidate::Cached(path) | FontCandidate::System(path) => path,
        }
    }

    fn try_load(&self, size: f32) -> Option<FontHandle> {
        let path = self.path();
        if !path.exists() {
            log::debug!("Font candidate missing: {}", path.display());
            return None;
        }

        match FontHandle::load(path, size) {
            Ok(handle) => {
                match self {
                    FontCandidate::Cached(_) => println!("Using cached font: {}", path.display()),
                    FontCandidate::System(_) => println!("Using font: {}", path.display()),
                }
                Some(handle)
            }
            Err(e) => {
                eprintln!("Font error: {}", e);
                None
            }
        }
    }
}

fn candidates(config: &LogoConfig) -> Vec<FontCandidate> {
    std::iter::once(FontCandidate::Cached(config.font_cache.clone()))
        .chain(config.system_fonts.iter().cloned().map(FontCandidate::System))
        .collect()
}

/// Picks the first loadable font from the cache file and the system list,
/// or the built-in font when none loads.
pub fn select_font(config: &LogoConfig) -> FontHandle {
    candidates(config)
        .iter()
        .find_map(|candidate| candidate.try_load(FONT_SIZE))
        .unwrap_or_else(|| {
            println!("No usable font file found, using built-in font");
            FontHandle::BuiltIn
        })
}

/// Runs the whole fallback chain. Downloads the font first when the cache
/// file is absent; a failed download only removes that source.
pub async fn resolve_font(config: &LogoConfig, fetcher: &FontFetcher) -> FontHandle {
    if !config.font_cache.exists() {
        println!("Downloading font from {}...", fetcher.url());
        match fetcher.fetch_to(&config.font_cache).await {
            Ok(bytes) => println!("Font downloaded successfully! ({} bytes)", bytes),
            Err(e) => {
                eprintln!("Could not download font: {}", e);
                println!("Using system font instead...");
            }
        }
    }

    select_font(config)
}

/// First loadable font from the default system list, announcing when
/// the machine has none so skipped checks show up in test output.
#[cfg(test)]
pub(crate) fn installed_font() -> Option<PathBuf> {
    let found = LogoConfig::default()
        .system_fonts
        .into_iter()
        .find(|path| FontHandle::load(path, FONT_SIZE).is_ok());
    if found.is_none() {
        eprintln!("skipping TrueType checks: no system font from the default list is installed");
    }
    found
}
