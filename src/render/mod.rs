//! Rendering module for turning document trees into markup.

mod html;
mod json;
mod options;
mod result;
mod scale;
pub mod thumbnail;

pub use html::{placeholder_html, to_html, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{Media, RenderOptions, DEFAULT_PLACEHOLDER, DEFAULT_TITLE};
pub use result::{RenderResult, RenderStats};
pub use scale::{PreviewScale, PAGE_HEIGHT_PX, PAGE_WIDTH_PX};
pub use thumbnail::{thumbnails, Thumbnail};
