//! Rendering options and configuration.

/// Default text shown when there is no record to render yet.
pub const DEFAULT_PLACEHOLDER: &str = "Fill in the form to see your resume preview";

/// Title of a standalone page when none is set.
pub const DEFAULT_TITLE: &str = "Resume";

/// Target medium for the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Media {
    /// Live on-screen preview
    #[default]
    Screen,
    /// Print-ready page
    Print,
}

impl Media {
    /// Class hook for the root element.
    pub fn class_name(self) -> &'static str {
        match self {
            Media::Screen => "media-screen",
            Media::Print => "media-print",
        }
    }
}

/// Options for rendering a document tree to markup.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Screen or print styling
    pub media: Media,

    /// Wrap the fragment in a complete HTML page
    pub standalone: bool,

    /// Emit the profile image when the header has one
    pub include_images: bool,

    /// Text shown in place of a résumé when there is no record
    pub placeholder_text: String,

    /// Page title for standalone output; defaults to [`DEFAULT_TITLE`]
    pub title: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a print-ready standalone page.
    pub fn print() -> Self {
        Self::default().with_media(Media::Print).with_standalone(true)
    }

    /// Set the target medium.
    pub fn with_media(mut self, media: Media) -> Self {
        self.media = media;
        self
    }

    /// Enable or disable the full-page wrapper.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Enable or disable the profile image.
    pub fn with_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    /// Set the standalone page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            media: Media::Screen,
            standalone: false,
            include_images: true,
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_media(Media::Print)
            .with_images(false)
            .with_placeholder("Nothing yet");

        assert_eq!(options.media, Media::Print);
        assert!(!options.include_images);
        assert!(!options.standalone);
        assert_eq!(options.placeholder_text, "Nothing yet");
    }

    #[test]
    fn test_print_preset() {
        let options = RenderOptions::print();
        assert_eq!(options.media, Media::Print);
        assert!(options.standalone);
        assert!(options.include_images);
    }
}
