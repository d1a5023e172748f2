//! HTML rendering for document trees.
//!
//! The renderer only walks the tree. Which sections exist, where they go and
//! how dates read was decided by the layout engine; markup is chosen by each
//! section's display hint.

use crate::error::Result;
use crate::format::escape_html;
use crate::layout::CONTACT_SEPARATOR;
use crate::model::{
    DocumentTree, EntryNode, HeaderNode, HeaderPlacement, Region, SectionDisplay, SectionNode,
    StreamNode,
};
use crate::registry::find_variant;

use super::{RenderOptions, RenderResult, RenderStats, DEFAULT_TITLE};

/// Convert a tree to HTML.
pub fn to_html(tree: &DocumentTree, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(tree)
}

/// Convert a tree to HTML with statistics.
pub fn to_html_with_stats(tree: &DocumentTree, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_with_stats(tree)
}

/// Markup shown when there is no record to render.
pub fn placeholder_html(options: &RenderOptions) -> String {
    format!(
        "<p class=\"resume-placeholder\">{}</p>",
        escape_html(&options.placeholder_text)
    )
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    images: u32,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options, images: 0 }
    }

    /// Render a tree to HTML.
    pub fn render(mut self, tree: &DocumentTree) -> Result<String> {
        Ok(self.render_internal(tree))
    }

    /// Render a tree to HTML with statistics.
    pub fn render_with_stats(mut self, tree: &DocumentTree) -> Result<RenderResult> {
        let content = self.render_internal(tree);
        let mut stats = RenderStats::from_tree(tree);
        stats.image_count = self.images;
        Ok(RenderResult::new(content, tree.variant_id.as_str(), stats))
    }

    fn render_internal(&mut self, tree: &DocumentTree) -> String {
        let mut body = String::new();
        self.render_document(&mut body, tree);

        if self.options.standalone {
            self.wrap_page(tree, &body)
        } else {
            body
        }
    }

    fn render_document(&mut self, out: &mut String, tree: &DocumentTree) {
        out.push_str(&format!(
            "<div class=\"resume {} category-{} layout-{} {}\">",
            escape_html(&tree.variant_id),
            tree.category.id(),
            family_class(tree),
            self.options.media.class_name()
        ));

        if tree.header.placement == HeaderPlacement::Sidebar {
            // The header opens the sidebar, which exists even with no sections
            let sidebar = tree.stream(Region::Sidebar);
            out.push_str(&format!("<div class=\"{}\">", Region::Sidebar.class_name()));
            self.render_header_block(out, &tree.header);
            if let Some(stream) = sidebar {
                for section in &stream.sections {
                    render_section(out, section);
                }
            }
            out.push_str("</div>");

            for stream in tree.streams.iter().filter(|s| s.region != Region::Sidebar) {
                render_stream(out, stream);
            }
        } else {
            self.render_header(out, &tree.header);
            for stream in &tree.streams {
                render_stream(out, stream);
            }
        }

        out.push_str("</div>");
    }

    fn render_header(&mut self, out: &mut String, header: &HeaderNode) {
        out.push_str("<div class=\"resume-header\">");
        let grouped = header.placement == HeaderPlacement::LeftAligned;
        if grouped {
            out.push_str("<div class=\"resume-header-left\">");
        }

        self.render_header_block(out, header);

        if !header.contact_lines.is_empty() {
            let items: Vec<String> = header
                .contact_lines
                .iter()
                .map(|line| format!("<span>{}</span>", escape_html(line)))
                .collect();
            out.push_str("<div class=\"resume-contact\">");
            out.push_str(&items.join(&format!(
                "<span class=\"resume-contact-separator\">{}</span>",
                CONTACT_SEPARATOR
            )));
            out.push_str("</div>");
        }

        if !header.details.is_empty() {
            out.push_str("<div class=\"resume-contact resume-personal-details\">");
            for detail in &header.details {
                out.push_str(&format!(
                    "<span><strong>{}:</strong> {}</span>",
                    escape_html(&detail.label),
                    escape_html(&detail.value)
                ));
            }
            out.push_str("</div>");
        }

        if grouped {
            out.push_str("</div>");
        }
        out.push_str("</div>");
    }

    /// Image and name, shared by every header placement.
    fn render_header_block(&mut self, out: &mut String, header: &HeaderNode) {
        if let Some(image) = header.image_ref.as_deref().filter(|_| self.options.include_images) {
            self.images += 1;
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"Profile\" class=\"resume-profile-image\">",
                escape_html(image)
            ));
        }
        out.push_str(&format!(
            "<div class=\"resume-name\">{}</div>",
            escape_html(&header.name)
        ));
    }

    fn wrap_page(&self, tree: &DocumentTree, body: &str) -> String {
        // The name already appears once in the body
        let title = self.options.title.as_deref().unwrap_or(DEFAULT_TITLE);

        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        if let Some(variant) = find_variant(&tree.variant_id) {
            page.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                escape_html(variant.style_ref)
            ));
        }
        page.push_str("<style>@page { size: A4; margin: 0; } ");
        page.push_str("@media print { body { margin: 0; -webkit-print-color-adjust: exact; } }</style>\n");
        page.push_str("</head>\n<body>\n");
        page.push_str(body);
        page.push_str("\n</body>\n</html>\n");
        page
    }
}

fn family_class(tree: &DocumentTree) -> &'static str {
    match tree.family {
        crate::model::LayoutFamily::Standard => "standard",
        crate::model::LayoutFamily::Sidebar => "sidebar",
        crate::model::LayoutFamily::TwoColumn => "two-column",
    }
}

fn render_stream(out: &mut String, stream: &StreamNode) {
    out.push_str(&format!("<div class=\"{}\">", stream.region.class_name()));
    for section in &stream.sections {
        render_section(out, section);
    }
    out.push_str("</div>");
}

fn render_section(out: &mut String, section: &SectionNode) {
    out.push_str(&format!(
        "<div class=\"resume-section resume-section-{}\">",
        display_class(section.display)
    ));
    out.push_str(&format!(
        "<div class=\"resume-section-title\">{}</div>",
        escape_html(&section.title)
    ));

    match section.display {
        SectionDisplay::Prose => {
            for entry in &section.entries {
                if let Some(text) = &entry.description {
                    out.push_str(&format!(
                        "<div class=\"resume-summary\">{}</div>",
                        escape_html(text)
                    ));
                }
            }
        }
        SectionDisplay::Entries => {
            for entry in &section.entries {
                render_entry(out, entry);
            }
        }
        SectionDisplay::Tags => {
            out.push_str("<div class=\"resume-skills-list\">");
            for entry in &section.entries {
                out.push_str(&format!(
                    "<span class=\"resume-skill-item\">{}</span>",
                    escape_html(&entry.title)
                ));
            }
            out.push_str("</div>");
        }
        SectionDisplay::List => {
            out.push_str("<ul class=\"resume-list\">");
            for entry in &section.entries {
                render_list_item(out, entry);
            }
            out.push_str("</ul>");
        }
    }

    out.push_str("</div>");
}

fn render_entry(out: &mut String, entry: &EntryNode) {
    out.push_str("<div class=\"resume-entry\"><div class=\"resume-entry-header\"><div>");
    out.push_str(&format!(
        "<div class=\"resume-entry-title\">{}</div>",
        escape_html(&entry.title)
    ));
    if let Some(subtitle) = &entry.subtitle {
        out.push_str(&format!(
            "<div class=\"resume-entry-subtitle\">{}</div>",
            escape_html(subtitle)
        ));
    }
    out.push_str("</div>");
    if let Some(date) = &entry.date_range {
        out.push_str(&format!(
            "<div class=\"resume-entry-date\">{}</div>",
            escape_html(date)
        ));
    }
    out.push_str("</div>");
    if let Some(description) = &entry.description {
        out.push_str(&format!(
            "<div class=\"resume-entry-description\">{}</div>",
            escape_html(description)
        ));
    }
    out.push_str("</div>");
}

fn render_list_item(out: &mut String, entry: &EntryNode) {
    out.push_str(&format!("<li><strong>{}</strong>", escape_html(&entry.title)));
    if let Some(subtitle) = &entry.subtitle {
        out.push_str(&format!(" — {}", escape_html(subtitle)));
    }
    if let Some(date) = &entry.date_range {
        out.push_str(&format!(" ({})", escape_html(date)));
    }
    out.push_str("</li>");
}

fn display_class(display: SectionDisplay) -> &'static str {
    match display {
        SectionDisplay::Prose => "prose",
        SectionDisplay::Entries => "entries",
        SectionDisplay::Tags => "tags",
        SectionDisplay::List => "list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::model::{ExperienceEntry, ResumeRecord};
    use crate::render::Media;

    fn ada() -> ResumeRecord {
        let mut record = ResumeRecord::new();
        record.personal.full_name = "Ada Lovelace".into();
        record.personal.email = "ada@example.com".into();
        record.personal.phone = "555-1815".into();
        record.skills = vec!["Math".into(), "C++".into()];
        record.experience.push(ExperienceEntry {
            job_title: "Analyst".into(),
            company: "Engines Ltd".into(),
            start_date: "1842-01".into(),
            current: true,
            ..Default::default()
        });
        record
    }

    #[test]
    fn test_root_class_hooks() {
        let tree = layout(&ada(), "template-13");
        let html = to_html(&tree, &RenderOptions::new()).unwrap();
        assert!(html.starts_with(
            "<div class=\"resume template-13 category-tech layout-standard media-screen\">"
        ));
    }

    #[test]
    fn test_contact_joined_with_separator() {
        let tree = layout(&ada(), "template-01");
        let html = to_html(&tree, &RenderOptions::new()).unwrap();
        assert!(html.contains(
            "<span>ada@example.com</span><span class=\"resume-contact-separator\"> | </span><span>555-1815</span>"
        ));
    }

    #[test]
    fn test_entry_markup() {
        let tree = layout(&ada(), "template-01");
        let html = to_html(&tree, &RenderOptions::new()).unwrap();
        assert!(html.contains("<div class=\"resume-entry-title\">Analyst</div>"));
        assert!(html.contains("<div class=\"resume-entry-date\">Jan 1842 – Present</div>"));
        assert!(html.contains("<span class=\"resume-skill-item\">C++</span>"));
    }

    #[test]
    fn test_user_text_escaped() {
        let mut record = ada();
        record.personal.full_name = "<b>Ada</b> & co".into();
        let tree = layout(&record, "template-01");
        let html = to_html(&tree, &RenderOptions::new()).unwrap();
        assert!(html.contains("&lt;b&gt;Ada&lt;/b&gt; &amp; co"));
        assert!(!html.contains("<b>Ada"));
    }

    #[test]
    fn test_sidebar_header_inside_sidebar() {
        let tree = layout(&ada(), "template-07");
        let html = to_html(&tree, &RenderOptions::new()).unwrap();
        let sidebar = html.find("<div class=\"resume-sidebar\">").unwrap();
        let name = html.find("<div class=\"resume-name\">").unwrap();
        let main = html.find("<div class=\"resume-main\">").unwrap();
        assert!(sidebar < name && name < main);
        assert!(!html.contains("resume-header"));
    }

    #[test]
    fn test_left_aligned_header_group() {
        let tree = layout(&ada(), "template-10");
        let html = to_html(&tree, &RenderOptions::new()).unwrap();
        assert!(html.contains("<div class=\"resume-header\"><div class=\"resume-header-left\">"));
    }

    #[test]
    fn test_images_toggle() {
        let mut record = ada();
        record.personal.profile_image = "data:image/png;base64,AAAA".into();
        let tree = layout(&record, "template-01");

        let with = to_html_with_stats(&tree, &RenderOptions::new()).unwrap();
        assert!(with.content.contains("src=\"data:image/png;base64,AAAA\""));
        assert_eq!(with.stats.image_count, 1);

        let without = to_html(&tree, &RenderOptions::new().with_images(false)).unwrap();
        assert!(!without.contains("<img"));
    }

    #[test]
    fn test_standalone_page() {
        let tree = layout(&ada(), "template-02");
        let html = to_html(&tree, &RenderOptions::print()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Resume</title>"));
        assert!(html.contains("href=\"css/templates/template-02-modern.css\""));
        assert!(html.contains("@page { size: A4;"));
        assert!(html.contains(Media::Print.class_name()));
    }

    #[test]
    fn test_print_page_names_person_once() {
        let mut record = ada();
        record.personal.full_name = "Zed Unique".into();
        let tree = layout(&record, "template-01");
        let html = to_html(&tree, &RenderOptions::print()).unwrap();
        assert_eq!(html.matches("Zed Unique").count(), 1);

        let titled = to_html(&tree, &RenderOptions::print().with_title("CV")).unwrap();
        assert!(titled.contains("<title>CV</title>"));
    }

    #[test]
    fn test_placeholder() {
        let options = RenderOptions::new().with_placeholder("Start <here>");
        assert_eq!(
            placeholder_html(&options),
            "<p class=\"resume-placeholder\">Start &lt;here&gt;</p>"
        );
    }

    #[test]
    fn test_render_deterministic() {
        let tree = layout(&ada(), "template-08");
        let options = RenderOptions::new();
        assert_eq!(
            to_html(&tree, &options).unwrap(),
            to_html(&tree, &options).unwrap()
        );
    }
}
