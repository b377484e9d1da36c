pub mod builtin_font;
pub mod config;
pub mod error;
pub mod font_fetch;
pub mod font_source;
pub mod layout;
pub mod renderer;

pub use config::LogoConfig;
pub use error::LogoError;
pub use renderer::{LogoRenderer, RenderReport};
