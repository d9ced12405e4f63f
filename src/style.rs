//! Named text styles shared by the section builders of one document.
//!
//! A [`StyleRegistry`] belongs to a single generation run. Builders resolve the
//! names they use through the registry handed to the
//! [`Composer`](crate::sections::Composer), so two documents built side by side
//! never see each other's definitions.

use std::collections::HashMap;

use genpdf::style::{Color, Style};

use crate::error::{ComposeError, Result};

/// Large bold line used for the company name on policy documents.
pub const COMPANY: &str = "company";
/// Main headings.
pub const HEADER: &str = "header";
/// Section titles of quote documents.
pub const SUBHEADER: &str = "subheader";
/// Section titles of policy documents.
pub const SECTION: &str = "section";
/// Body text.
pub const NORMAL: &str = "normal";
/// Grey italic text used for fill-in prompts.
pub const PROMPT: &str = "prompt";
/// Table body text.
pub const TABLE: &str = "table";

const NAVY: Color = Color::Rgb(0, 51, 102);
const DARK_GREY: Color = Color::Rgb(51, 51, 51);
const MEDIUM_GREY: Color = Color::Rgb(128, 128, 128);
const BLACK: Color = Color::Rgb(0, 0, 0);

/// Attribute bundle of a named style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    size: u8,
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(11)
    }
}

impl TextStyle {
    /// Creates a regular style with the given font size in points.
    pub fn new(size: u8) -> Self {
        Self {
            size,
            bold: false,
            italic: false,
            color: None,
        }
    }

    /// Returns the font size in points.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns whether the style is bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns whether the style is italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns the text color, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Marks the style as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the style as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Assigns a text color.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Converts the attributes into a `genpdf` style.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        style.set_font_size(self.size);
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }
}

/// Behaviour of [`StyleRegistry::define`] when the name is already taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedefinePolicy {
    /// Replace the existing definition.
    #[default]
    Overwrite,
    /// Fail with [`ComposeError::DuplicateStyle`].
    Reject,
}

/// Mapping from style name to attributes for one document.
#[derive(Clone, Debug, Default)]
pub struct StyleRegistry {
    styles: HashMap<String, TextStyle>,
    policy: RedefinePolicy,
}

impl StyleRegistry {
    /// Creates an empty registry that overwrites redefinitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given redefinition policy.
    pub fn with_policy(policy: RedefinePolicy) -> Self {
        Self {
            styles: HashMap::new(),
            policy,
        }
    }

    /// Registry pre-populated with the styles used by the insurance documents.
    pub fn insurance() -> Self {
        let mut registry = Self::new();
        let presets = [
            (COMPANY, TextStyle::new(20).bold()),
            (HEADER, TextStyle::new(16).bold().colored(NAVY)),
            (SUBHEADER, TextStyle::new(14).bold().colored(DARK_GREY)),
            (SECTION, TextStyle::new(12).bold().colored(NAVY)),
            (NORMAL, TextStyle::new(11).colored(BLACK)),
            (PROMPT, TextStyle::new(11).italic().colored(MEDIUM_GREY)),
            (TABLE, TextStyle::new(10)),
        ];
        for (name, style) in presets {
            registry.styles.insert(name.to_owned(), style);
        }
        registry
    }

    /// Returns the redefinition policy.
    pub fn policy(&self) -> RedefinePolicy {
        self.policy
    }

    /// Registers `style` under `name`.
    pub fn define(&mut self, name: impl Into<String>, style: TextStyle) -> Result<()> {
        let name = name.into();
        if self.styles.contains_key(&name) {
            match self.policy() {
                RedefinePolicy::Reject => return Err(ComposeError::DuplicateStyle(name)),
                RedefinePolicy::Overwrite => log::debug!("redefining style '{name}'"),
            }
        }
        self.styles.insert(name, style);
        Ok(())
    }

    /// Resolves a registered style.
    pub fn get(&self, name: &str) -> Result<TextStyle> {
        self.styles
            .get(name)
            .copied()
            .ok_or_else(|| ComposeError::UnknownStyle(name.to_owned()))
    }

    /// Returns whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns whether no style is registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_get_round_trips() {
        let mut registry = StyleRegistry::new();
        let style = TextStyle::new(14).bold().colored(Color::Rgb(51, 51, 51));
        registry.define("Subheader Style", style).unwrap();
        assert_eq!(registry.get("Subheader Style").unwrap(), style);
    }

    #[test]
    fn unknown_style_is_an_error() {
        let registry = StyleRegistry::new();
        let err = registry.get("missing").unwrap_err();
        assert!(matches!(err, ComposeError::UnknownStyle(name) if name == "missing"));
    }

    #[test]
    fn overwrite_policy_replaces_definition() {
        let mut registry = StyleRegistry::new();
        registry.define(NORMAL, TextStyle::new(11)).unwrap();
        registry.define(NORMAL, TextStyle::new(12).italic()).unwrap();
        assert_eq!(registry.get(NORMAL).unwrap(), TextStyle::new(12).italic());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reject_policy_keeps_first_definition() {
        assert_eq!(StyleRegistry::new().policy(), RedefinePolicy::Overwrite);
        let mut registry = StyleRegistry::with_policy(RedefinePolicy::Reject);
        assert_eq!(registry.policy(), RedefinePolicy::Reject);
        registry.define(HEADER, TextStyle::new(16)).unwrap();
        let err = registry.define(HEADER, TextStyle::new(18)).unwrap_err();
        assert!(matches!(err, ComposeError::DuplicateStyle(_)));
        assert_eq!(registry.get(HEADER).unwrap().size(), 16);
    }

    #[test]
    fn insurance_preset_registers_all_names() {
        let registry = StyleRegistry::insurance();
        for name in [COMPANY, HEADER, SUBHEADER, SECTION, NORMAL, PROMPT, TABLE] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert!(registry.get(PROMPT).unwrap().is_italic());
        assert_eq!(registry.get(HEADER).unwrap().color(), Some(NAVY));
    }

    #[test]
    fn text_style_maps_to_genpdf_style() {
        let style = TextStyle::new(16).bold().colored(NAVY).to_style();
        assert!(style.is_bold());
        assert!(!style.is_italic());
        assert_eq!(style.font_size(), 16);
        assert_eq!(style.color(), Some(NAVY));
    }
}
