use serde::{Deserialize, Serialize};

/// Top-level views of the configuration UI, addressed by URL fragment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Setup,
    Widgets,
    Settings,
}

impl Section {
    /// The URL fragment naming this section
    pub fn fragment(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Widgets => "widgets",
            Self::Settings => "settings",
        }
    }

    /// Parse a URL fragment; an empty fragment means the setup landing page
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        match fragment {
            "" | "setup" => Some(Self::Setup),
            "widgets" => Some(Self::Widgets),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    /// Sections reachable for the given setup state
    pub fn visible_for(setup_complete: bool) -> Vec<Self> {
        if setup_complete {
            vec![Self::Widgets, Self::Settings]
        } else {
            vec![Self::Setup]
        }
    }
}

/// Map a requested URL fragment to a section that is allowed for the current
/// setup state.
///
/// Before setup only `Setup` is reachable; after setup `Setup` is gone and
/// unknown fragments land on `Widgets`. Resolving an already-valid fragment
/// returns it unchanged.
pub fn resolve(fragment: &str, setup_complete: bool) -> Section {
    let requested = Section::from_fragment(fragment);

    if setup_complete {
        match requested {
            Some(Section::Widgets) => Section::Widgets,
            Some(Section::Settings) => Section::Settings,
            _ => Section::Widgets,
        }
    } else {
        Section::Setup
    }
}
