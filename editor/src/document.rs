//! The canonical text of the document being edited and the enums that decide
//! how it is projected.

/// Starting canvas shown before anything is generated or loaded.
pub const DEFAULT_TEMPLATE: &str = r##"
<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e5e7eb; border-radius: 8px; background-color: #ffffff;">
  <div style="text-align: center; margin-bottom: 24px;">
    <img src="https://picsum.photos/100/100" alt="Logo" style="border-radius: 50%; width: 64px; height: 64px; object-fit: cover;" />
  </div>
  <h1 style="color: #111827; font-size: 24px; font-weight: bold; margin-bottom: 16px; text-align: center;">Welcome to Sirz Mail</h1>
  <p style="color: #4b5563; font-size: 16px; line-height: 1.5; margin-bottom: 16px;">
    This is your starting canvas. You can edit any text by simply clicking and typing.
  </p>
  <p style="color: #4b5563; font-size: 16px; line-height: 1.5; margin-bottom: 24px;">
    <b>New:</b> Click on any image (like the logo above) to replace it with your own upload or a URL!
  </p>
  <div style="text-align: center;">
    <a href="#" style="display: inline-block; background-color: #2563eb; color: #ffffff; text-decoration: none; padding: 12px 24px; border-radius: 6px; font-weight: 500;">Get Started</a>
  </div>
  <hr style="border: none; border-top: 1px solid #e5e7eb; margin: 32px 0;" />
  <p style="color: #9ca3af; font-size: 12px; text-align: center;">
    © 2024 Sirz Mail. All rights reserved.<br/>
    123 Innovation Dr, Tech City
  </p>
</div>
"##;

/// Which projection currently has write authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The rendered tree is authoritative.
    #[default]
    Visual,
    /// The raw source text is authoritative.
    Code,
}

impl Mode {
    pub fn footer_tip(self) -> &'static str {
        match self {
            Mode::Visual => "Tip: Click text to edit. Click images to replace them.",
            Mode::Code => "Editing raw HTML source code.",
        }
    }
}

/// Preview container sizing. Has no effect on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreview {
    #[default]
    Desktop,
    Mobile,
}

impl DevicePreview {
    /// Fixed phone frame size in CSS pixels, `None` for the fluid desktop view.
    pub fn frame_size(self) -> Option<(u32, u32)> {
        match self {
            DevicePreview::Desktop => None,
            DevicePreview::Mobile => Some((375, 812)),
        }
    }
}

/// Canonical HTML source text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true when the text actually changed.
    pub(crate) fn replace(&mut self, text: String) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    /// Owned copy detached from the live document.
    pub fn snapshot(&self) -> String {
        self.text.clone()
    }

    /// Length as the browser reports it (UTF-16 code units).
    pub fn char_count(&self) -> usize {
        self.text.encode_utf16().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_count_uses_utf16_units() {
        assert_eq!(Document::new("abc").char_count(), 3);
        assert_eq!(Document::new("©").char_count(), 1);
        assert_eq!(Document::new("😀").char_count(), 2);
    }

    #[test]
    fn replace_reports_changes() {
        let mut doc = Document::new("a");
        assert!(!doc.replace("a".into()));
        assert!(doc.replace("b".into()));
        assert_eq!(doc.as_str(), "b");
    }

    #[test]
    fn default_template_has_one_image_and_a_link() {
        let tree = crate::html::HtmlTree::parse(DEFAULT_TEMPLATE);
        assert_eq!(tree.elements_named("img").len(), 1);
        assert_eq!(tree.elements_named("a").len(), 1);
        assert_eq!(tree.serialize(), DEFAULT_TEMPLATE);
    }
}
