use crate::config::{
    self, FallbackMetrics, CANVAS_HEIGHT, CANVAS_WIDTH, FALLBACK_METRICS, FIRST_WORD, SECOND_WORD,
    WORD_GAP,
};
use crate::error::LogoError;
use crate::font_source::{FontHandle, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoMetrics {
    pub full: TextSize,
    pub first_width: i32,
    pub second_width: i32,
}

impl LogoMetrics {
    pub fn measure(font: &FontHandle) -> Result<Self, LogoError> {
        let full = font.measure(&config::full_text())?;
        let first = font.measure(FIRST_WORD)?;
        // Only the first word's width positions anything, the second is
        // measured so a face that cannot render it is caught here.
        let second = font.measure(SECOND_WORD)?;

        Ok(Self {
            full,
            first_width: first.width,
            second_width: second.width,
        })
    }
}

impl From<FallbackMetrics> for LogoMetrics {
    fn from(fallback: FallbackMetrics) -> Self {
        Self {
            full: TextSize {
                width: fallback.full_width,
                height: fallback.full_height,
            },
            first_width: fallback.easy_width,
            second_width: fallback.look_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoLayout {
    pub first: Placement,
    pub second: Placement,
    pub metrics: LogoMetrics,
    pub used_fallback: bool,
}

impl LogoLayout {
    /// Measures both words with `font` and centers them on the canvas.
    pub fn plan(font: &FontHandle) -> Self {
        Self::from_measurement(LogoMetrics::measure(font))
    }

    /// Centers the words using `measured`, or the fixed fallback metrics
    /// when measuring failed.
    pub fn from_measurement(measured: Result<LogoMetrics, LogoError>) -> Self {
        let (metrics, used_fallback) = match measured {
            Ok(metrics) => (metrics, false),
            Err(e) => {
                eprintln!("Measurement failed, using default metrics: {}", e);
                (LogoMetrics::from(FALLBACK_METRICS), true)
            }
        };

        let (first, second) = center(CANVAS_WIDTH, CANVAS_HEIGHT, &metrics, WORD_GAP);
        log::debug!("Layout: first at {:?}, second at {:?}", first, second);

        Self {
            first,
            second,
            metrics,
            used_fallback,
        }
    }
}

/// Positions the two words as one block centered on a `width` x `height`
/// canvas, the second word `gap` pixels after the first.
pub fn center(width: u32, height: u32, metrics: &LogoMetrics, gap: i32) -> (Placement, Placement) {
    let start_x = (width as i32 - metrics.full.width).div_euclid(2);
    let text_y = (height as i32 - metrics.full.height).div_euclid(2);

    let first = Placement {
        x: start_x,
        y: text_y,
    };
    let second = Placement {
        x: start_x + metrics.first_width + gap,
        y: text_y,
    };
    (first, second)
}
