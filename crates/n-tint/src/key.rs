//! Managed palette keys and the UI elements they belong to.
//!
//! Each key is one color slot in the host's UI customization surface
//! (`titleBar.activeBackground`, `statusBar.foreground`, ...). Its metadata
//! is fixed: the element it tints, whether it is a background or a
//! foreground, and which tone of a style table it takes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::TintError;

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A region of the editor chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Element {
    TitleBar,
    StatusBar,
    ActivityBar,
    SideBar,
    /// The text area. Harmonies define it (always 0°) but it is never tinted.
    Editor,
}

impl Element {
    /// Elements that carry managed keys.
    pub const TINTABLE: [Self; 4] = [Self::TitleBar, Self::StatusBar, Self::ActivityBar, Self::SideBar];

    /// Identifier used in settings and palette key names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TitleBar => "titleBar",
            Self::StatusBar => "statusBar",
            Self::ActivityBar => "activityBar",
            Self::SideBar => "sideBar",
            Self::Editor => "editor",
        }
    }

    /// All elements, tintable ones first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::TitleBar, Self::StatusBar, Self::ActivityBar, Self::SideBar, Self::Editor]
    }

    /// Parse an element from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().find(|e| e.name().eq_ignore_ascii_case(name)).copied()
    }

    /// The single-element target set for this element (empty for `Editor`).
    #[must_use]
    pub const fn target(self) -> Targets {
        match self {
            Self::TitleBar => Targets::TITLE_BAR,
            Self::StatusBar => Targets::STATUS_BAR,
            Self::ActivityBar => Targets::ACTIVITY_BAR,
            Self::SideBar => Targets::SIDE_BAR,
            Self::Editor => Targets::empty(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Element {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TintError::UnknownElement { name: s.to_owned() })
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// The set of elements a caller wants applied.
    ///
    /// Targets never gate computation: every key is always computed and
    /// only its `enabled` flag follows this set.
    ///
    /// ```
    /// use n_tint::key::{Element, Targets};
    ///
    /// let targets = Targets::TITLE_BAR | Targets::STATUS_BAR;
    /// assert!(targets.includes(Element::TitleBar));
    /// assert!(!targets.includes(Element::SideBar));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Targets: u8 {
        const TITLE_BAR    = 1 << 0;
        const STATUS_BAR   = 1 << 1;
        const ACTIVITY_BAR = 1 << 2;
        const SIDE_BAR     = 1 << 3;
    }
}

impl Targets {
    /// Whether `element` is in the set. `Editor` never is.
    #[must_use]
    pub const fn includes(self, element: Element) -> bool {
        let bit = element.target();
        !bit.is_empty() && self.contains(bit)
    }

    /// Elements in the set, in canonical order.
    pub fn elements(self) -> impl Iterator<Item = Element> {
        Element::TINTABLE.into_iter().filter(move |&e| self.includes(e))
    }
}

impl FromIterator<Element> for Targets {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, e| set | e.target())
    }
}

// ---------------------------------------------------------------------------
// Color type and tone role
// ---------------------------------------------------------------------------

/// Background or foreground slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorType {
    Background,
    Foreground,
}

/// Which row of a style table a key takes its tone from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneRole {
    /// Active title bar, status bar, activity bar.
    Background,
    /// Inactive title bar, side bar.
    SubtleBackground,
    /// Side bar section headers.
    SectionBackground,
    /// Primary text and icons.
    Foreground,
    /// Inactive text and icons.
    MutedForeground,
}

impl ToneRole {
    pub const ALL: [Self; 5] = [
        Self::Background,
        Self::SubtleBackground,
        Self::SectionBackground,
        Self::Foreground,
        Self::MutedForeground,
    ];

    #[must_use]
    pub const fn color_type(self) -> ColorType {
        match self {
            Self::Background | Self::SubtleBackground | Self::SectionBackground => ColorType::Background,
            Self::Foreground | Self::MutedForeground => ColorType::Foreground,
        }
    }
}

// ---------------------------------------------------------------------------
// PaletteKey
// ---------------------------------------------------------------------------

/// One managed UI color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaletteKey {
    TitleBarActiveBackground,
    TitleBarActiveForeground,
    TitleBarInactiveBackground,
    TitleBarInactiveForeground,
    StatusBarBackground,
    StatusBarForeground,
    ActivityBarBackground,
    ActivityBarForeground,
    ActivityBarInactiveForeground,
    SideBarBackground,
    SideBarForeground,
    SideBarSectionHeaderBackground,
    SideBarSectionHeaderForeground,
}

impl PaletteKey {
    /// Every managed key, in output order.
    pub const ALL: [Self; 13] = [
        Self::TitleBarActiveBackground,
        Self::TitleBarActiveForeground,
        Self::TitleBarInactiveBackground,
        Self::TitleBarInactiveForeground,
        Self::StatusBarBackground,
        Self::StatusBarForeground,
        Self::ActivityBarBackground,
        Self::ActivityBarForeground,
        Self::ActivityBarInactiveForeground,
        Self::SideBarBackground,
        Self::SideBarForeground,
        Self::SideBarSectionHeaderBackground,
        Self::SideBarSectionHeaderForeground,
    ];

    /// The host's name for this slot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TitleBarActiveBackground => "titleBar.activeBackground",
            Self::TitleBarActiveForeground => "titleBar.activeForeground",
            Self::TitleBarInactiveBackground => "titleBar.inactiveBackground",
            Self::TitleBarInactiveForeground => "titleBar.inactiveForeground",
            Self::StatusBarBackground => "statusBar.background",
            Self::StatusBarForeground => "statusBar.foreground",
            Self::ActivityBarBackground => "activityBar.background",
            Self::ActivityBarForeground => "activityBar.foreground",
            Self::ActivityBarInactiveForeground => "activityBar.inactiveForeground",
            Self::SideBarBackground => "sideBar.background",
            Self::SideBarForeground => "sideBar.foreground",
            Self::SideBarSectionHeaderBackground => "sideBarSectionHeader.background",
            Self::SideBarSectionHeaderForeground => "sideBarSectionHeader.foreground",
        }
    }

    #[must_use]
    pub const fn element(self) -> Element {
        match self {
            Self::TitleBarActiveBackground
            | Self::TitleBarActiveForeground
            | Self::TitleBarInactiveBackground
            | Self::TitleBarInactiveForeground => Element::TitleBar,
            Self::StatusBarBackground | Self::StatusBarForeground => Element::StatusBar,
            Self::ActivityBarBackground
            | Self::ActivityBarForeground
            | Self::ActivityBarInactiveForeground => Element::ActivityBar,
            Self::SideBarBackground
            | Self::SideBarForeground
            | Self::SideBarSectionHeaderBackground
            | Self::SideBarSectionHeaderForeground => Element::SideBar,
        }
    }

    #[must_use]
    pub const fn role(self) -> ToneRole {
        match self {
            Self::TitleBarActiveBackground | Self::StatusBarBackground | Self::ActivityBarBackground => {
                ToneRole::Background
            }
            Self::TitleBarInactiveBackground | Self::SideBarBackground => ToneRole::SubtleBackground,
            Self::SideBarSectionHeaderBackground => ToneRole::SectionBackground,
            Self::TitleBarActiveForeground
            | Self::StatusBarForeground
            | Self::ActivityBarForeground
            | Self::SideBarForeground
            | Self::SideBarSectionHeaderForeground => ToneRole::Foreground,
            Self::TitleBarInactiveForeground | Self::ActivityBarInactiveForeground => {
                ToneRole::MutedForeground
            }
        }
    }

    #[must_use]
    pub const fn color_type(self) -> ColorType {
        self.role().color_type()
    }

    #[must_use]
    pub const fn is_background(self) -> bool {
        matches!(self.color_type(), ColorType::Background)
    }

    /// Look up a key by its exact host name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|k| k.name() == name).copied()
    }
}

impl fmt::Display for PaletteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PaletteKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Every managed key name, so a caller can clear customizations it no
/// longer applies.
#[must_use]
pub fn managed_key_names() -> Vec<&'static str> {
    PaletteKey::ALL.iter().map(|k| k.name()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
