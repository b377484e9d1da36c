use crate::config::{
    self, LogoConfig, CANVAS_HEIGHT, CANVAS_WIDTH, FIRST_WORD, SECOND_WORD, TEXT_COLOR,
};
use crate::error::LogoError;
use crate::font_fetch::FontFetcher;
use crate::font_source::{self, FontHandle};
use crate::layout::LogoLayout;
use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RenderReport {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub font: String,
    pub used_fallback_metrics: bool,
}

pub struct LogoRenderer {
    config: LogoConfig,
}

impl LogoRenderer {
    pub fn new(config: LogoConfig) -> Self {
        Self { config }
    }

    /// Draws both words on a fresh transparent canvas.
    pub fn render(&self, font: &FontHandle) -> (RgbaImage, LogoLayout) {
        let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba([0, 0, 0, 0]));
        let color = Rgba(TEXT_COLOR);
        let layout = LogoLayout::plan(font);

        font.draw(&mut canvas, color, layout.first.x, layout.first.y, FIRST_WORD);
        font.draw(&mut canvas, color, layout.second.x, layout.second.y, SECOND_WORD);

        (canvas, layout)
    }

    /// Writes the canvas as PNG, creating the output directory if needed
    /// and replacing any previous file.
    pub fn save(&self, canvas: &RgbaImage) -> Result<(), LogoError> {
        let path = &self.config.output_path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        canvas.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    pub async fn run(&self, fetcher: &FontFetcher) -> Result<RenderReport, LogoError> {
        println!("Creating {} logo...", config::full_text());

        let font = font_source::resolve_font(&self.config, fetcher).await;
        let (canvas, layout) = self.render(&font);
        self.save(&canvas)?;

        Ok(RenderReport {
            output_path: self.config.output_path.clone(),
            width: canvas.width(),
            height: canvas.height(),
            font: font.describe(),
            used_fallback_metrics: layout.used_fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn offline_config(dir: &Path) -> LogoConfig {
        LogoConfig {
            font_url: "http://127.0.0.1:1/Poppins-SemiBold.ttf".to_string(),
            font_cache: dir.join("Poppins-SemiBold.ttf"),
            system_fonts: Vec::new(),
            output_path: dir.join("boombang-palette-app").join("public").join("logo.png"),
            ..LogoConfig::default()
        }
    }

    fn offline_fetcher(config: &LogoConfig) -> FontFetcher {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        FontFetcher::with_client(client, config.font_url.clone())
    }

    #[test]
    fn test_render_places_words_on_transparent_canvas() {
        let renderer = LogoRenderer::new(LogoConfig::default());
        let (canvas, layout) = renderer.render(&FontHandle::BuiltIn);

        assert_eq!(canvas.dimensions(), (400, 100));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        // Top bar of "E" and the stem of "L".
        assert_eq!(*canvas.get_pixel(layout.first.x as u32, layout.first.y as u32), WHITE);
        assert_eq!(*canvas.get_pixel(layout.second.x as u32, layout.second.y as u32), WHITE);
        assert_eq!(layout.second.x - layout.first.x, layout.metrics.first_width + 15);
    }

    #[tokio::test]
    async fn test_run_offline_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path());
        let fetcher = offline_fetcher(&config);
        let renderer = LogoRenderer::new(config.clone());

        let report = renderer.run(&fetcher).await.unwrap();

        assert_eq!(report.output_path, config.output_path);
        assert_eq!((report.width, report.height), (400, 100));
        assert!(!report.used_fallback_metrics);

        let written = image::open(&config.output_path).unwrap();
        assert_eq!(written.color(), image::ColorType::Rgba8);
        assert_eq!((written.width(), written.height()), (400, 100));
        assert!(written.to_rgba8().pixels().any(|p| *p == WHITE));
    }

    #[tokio::test]
    async fn test_rerun_overwrites_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path());
        let fetcher = offline_fetcher(&config);
        let renderer = LogoRenderer::new(config.clone());

        renderer.run(&fetcher).await.unwrap();
        let first = fs::read(&config.output_path).unwrap();
        renderer.run(&fetcher).await.unwrap();
        let second = fs::read(&config.output_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_save_into_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path());
        fs::create_dir_all(config.output_path.parent().unwrap()).unwrap();
        fs::write(&config.output_path, b"stale").unwrap();

        let renderer = LogoRenderer::new(config.clone());
        let (canvas, _) = renderer.render(&FontHandle::BuiltIn);
        renderer.save(&canvas).unwrap();

        assert_eq!(image::open(&config.output_path).unwrap().width(), 400);
    }

    #[test]
    fn test_save_fails_when_directory_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("public");
        fs::write(&blocker, b"a file, not a directory").unwrap();

        let config = LogoConfig {
            output_path: blocker.join("logo.png"),
            ..LogoConfig::default()
        };
        let renderer = LogoRenderer::new(config);
        let (canvas, _) = renderer.render(&FontHandle::BuiltIn);

        assert!(matches!(renderer.save(&canvas), Err(LogoError::IoError(_))));
    }

    #[tokio::test]
    async fn test_config_file_cannot_move_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("easy_look.json");
        fs::write(&path, r#"{ "gap": -200, "width": 10, "height": 3, "font_size": 5 }"#).unwrap();

        let loaded = LogoConfig::load_from(&path).unwrap();
        assert_eq!(loaded, LogoConfig::default());

        let config = offline_config(dir.path());
        let fetcher = offline_fetcher(&config);
        let renderer = LogoRenderer::new(config);

        let report = renderer.run(&fetcher).await.unwrap();
        assert_eq!((report.width, report.height), (400, 100));

        let (_, layout) = renderer.render(&FontHandle::BuiltIn);
        assert_eq!(layout.second.x - layout.first.x, layout.metrics.first_width + 15);
    }

    #[test]
    fn test_truetype_words_are_gap_apart() {
        let Some(path) = font_source::installed_font() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let config = LogoConfig {
            font_cache: dir.path().join("Poppins-SemiBold.ttf"),
            system_fonts: vec![path],
            ..offline_config(dir.path())
        };

        let font = font_source::select_font(&config);
        assert!(!font.is_builtin());
        let easy_width = font.measure("Easy").unwrap().width;

        let (canvas, layout) = LogoRenderer::new(config).render(&font);

        assert!(!layout.used_fallback);
        assert_eq!(layout.metrics.first_width, easy_width);
        assert_eq!(layout.second.x - layout.first.x, easy_width + 15);
        assert!(layout.first.x >= 0 && layout.second.x < 400);
        assert_eq!(canvas.dimensions(), (400, 100));
        assert!(canvas.pixels().any(|p| p[3] > 0));
    }
}
