//! Registry of everything the card pipeline understands.
//!
//! Each enumeration carries its allow-list, its default, and the display values the renderer
//! resolves it to, so the normalizer and the renderer read from the same table.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::adaptive::renderer::visual::{Justify, KeyboardType, TextAlign};

pub const CARD_TYPE: &str = "AdaptiveCard";
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0", "1.1", "1.2", "1.3"];
pub const DEFAULT_VERSION: &str = "1.3";

pub fn is_supported_version(version: &str) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}

macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Looks a raw value up in the allow-list, ignoring ASCII case.
            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(raw))
            }

            /// Keeps a member of the allow-list, replaces anything else with the default.
            pub fn normalize(raw: Option<&Value>) -> Self {
                raw.and_then(Value::as_str)
                    .and_then(Self::parse)
                    .unwrap_or_default()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

schema_enum! {
    Spacing, default = Default, {
        None => "None",
        Small => "Small",
        Default => "Default",
        Medium => "Medium",
        Large => "Large",
        ExtraLarge => "ExtraLarge",
        Padding => "Padding",
    }
}

schema_enum! {
    TextColor, default = Default, {
        Default => "Default",
        Dark => "Dark",
        Light => "Light",
        Accent => "Accent",
        Good => "Good",
        Warning => "Warning",
        Attention => "Attention",
    }
}

schema_enum! {
    TextSize, default = Default, {
        Small => "Small",
        Default => "Default",
        Medium => "Medium",
        Large => "Large",
        ExtraLarge => "ExtraLarge",
    }
}

schema_enum! {
    TextWeight, default = Default, {
        Lighter => "Lighter",
        Default => "Default",
        Bolder => "Bolder",
    }
}

schema_enum! {
    HorizontalAlignment, default = Left, {
        Left => "Left",
        Center => "Center",
        Right => "Right",
    }
}

schema_enum! {
    VerticalAlignment, default = Top, {
        Top => "Top",
        Center => "Center",
        Bottom => "Bottom",
    }
}

schema_enum! {
    ContainerStyle, default = Default, {
        Default => "Default",
        Emphasis => "Emphasis",
        Good => "Good",
        Attention => "Attention",
        Warning => "Warning",
        Accent => "Accent",
    }
}

schema_enum! {
    TextInputStyle, default = Text, {
        Text => "Text",
        Tel => "Tel",
        Url => "Url",
        Email => "Email",
    }
}

schema_enum! {
    BlockHeight, default = Auto, {
        Auto => "auto",
        Stretch => "stretch",
    }
}

impl Spacing {
    /// Top margin, in layout units, placed before an element.
    pub fn margin(self) -> u16 {
        match self {
            Spacing::None => 0,
            Spacing::Small => 4,
            Spacing::Default => 8,
            Spacing::Medium => 12,
            Spacing::Large => 16,
            Spacing::ExtraLarge => 24,
            Spacing::Padding => 16,
        }
    }
}

impl TextColor {
    pub fn hex(self) -> &'static str {
        match self {
            TextColor::Default => "#333333",
            TextColor::Dark => "#000000",
            TextColor::Light => "#FFFFFF",
            TextColor::Accent => "#0078D4",
            TextColor::Good => "#107C10",
            TextColor::Warning => "#FF8C00",
            TextColor::Attention => "#D13438",
        }
    }
}

impl TextSize {
    pub fn font_size(self) -> u16 {
        match self {
            TextSize::Small => 12,
            TextSize::Default => 14,
            TextSize::Medium => 17,
            TextSize::Large => 21,
            TextSize::ExtraLarge => 26,
        }
    }
}

impl TextWeight {
    pub fn font_weight(self) -> u16 {
        match self {
            TextWeight::Lighter => 300,
            TextWeight::Default => 400,
            TextWeight::Bolder => 700,
        }
    }
}

impl HorizontalAlignment {
    pub fn text_align(self) -> TextAlign {
        match self {
            HorizontalAlignment::Left => TextAlign::Left,
            HorizontalAlignment::Center => TextAlign::Center,
            HorizontalAlignment::Right => TextAlign::Right,
        }
    }
}

impl VerticalAlignment {
    pub fn justify(self) -> Justify {
        match self {
            VerticalAlignment::Top => Justify::Start,
            VerticalAlignment::Center => Justify::Center,
            VerticalAlignment::Bottom => Justify::End,
        }
    }
}

impl ContainerStyle {
    /// Background fill; `None` means transparent.
    pub fn background(self) -> Option<&'static str> {
        match self {
            ContainerStyle::Default => None,
            ContainerStyle::Emphasis => Some("#F2F2F2"),
            ContainerStyle::Good => Some("#DFF6DD"),
            ContainerStyle::Attention => Some("#FDE7E9"),
            ContainerStyle::Warning => Some("#FFF4CE"),
            ContainerStyle::Accent => Some("#DEECF9"),
        }
    }
}

impl TextInputStyle {
    pub fn keyboard(self) -> KeyboardType {
        match self {
            TextInputStyle::Text => KeyboardType::Default,
            TextInputStyle::Tel => KeyboardType::Phone,
            TextInputStyle::Url => KeyboardType::Url,
            TextInputStyle::Email => KeyboardType::Email,
        }
    }
}

/// Element kinds the pipeline can normalize and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    TextBlock,
    Container,
    ColumnSet,
    Column,
    InputText,
    InputToggle,
}

impl ElementKind {
    pub const ALL: &'static [ElementKind] = &[
        ElementKind::TextBlock,
        ElementKind::Container,
        ElementKind::ColumnSet,
        ElementKind::Column,
        ElementKind::InputText,
        ElementKind::InputToggle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::TextBlock => "TextBlock",
            ElementKind::Container => "Container",
            ElementKind::ColumnSet => "ColumnSet",
            ElementKind::Column => "Column",
            ElementKind::InputText => "Input.Text",
            ElementKind::InputToggle => "Input.Toggle",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == raw)
    }

    pub fn is_input(self) -> bool {
        matches!(self, ElementKind::InputText | ElementKind::InputToggle)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Submit,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Submit => "Action.Submit",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        (raw == ActionKind::Submit.as_str()).then_some(ActionKind::Submit)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
