//! Styling variants a component tree is forked into

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three styling backends a generated package targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Detects NativeWind at runtime and dispatches to either backend
    Hybrid,
    /// React Native `StyleSheet` only
    Stylesheet,
    /// Tailwind classes through NativeWind only
    Tailwind,
}

/// Which files of a component's `styles/` directory a variant keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub variants_files: bool,
    pub styles_files: bool,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Hybrid, Variant::Stylesheet, Variant::Tailwind];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Hybrid => "hybrid",
            Variant::Stylesheet => "stylesheet",
            Variant::Tailwind => "tailwind",
        }
    }

    /// Package directory under the output root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Variant::Hybrid => "core-hybrid",
            Variant::Stylesheet => "core-stylesheet",
            Variant::Tailwind => "core-tailwind",
        }
    }

    /// File-name segment selecting this variant (`Avatar.tw.tsx`), `None` for hybrid
    pub fn file_suffix(&self) -> Option<&'static str> {
        match self {
            Variant::Hybrid => None,
            Variant::Stylesheet => Some("ss"),
            Variant::Tailwind => Some("tw"),
        }
    }

    /// Identifier suffix selecting this variant (`AvatarTw`), `None` for hybrid
    pub fn name_suffix(&self) -> Option<&'static str> {
        match self {
            Variant::Hybrid => None,
            Variant::Stylesheet => Some("Ss"),
            Variant::Tailwind => Some("Tw"),
        }
    }

    /// Utility subdirectories this variant receives, in copy order
    pub fn utils_dirs(&self) -> &'static [&'static str] {
        match self {
            Variant::Hybrid => &["tw", "ss", "hybrid"],
            Variant::Stylesheet => &["ss"],
            Variant::Tailwind => &["tw"],
        }
    }

    pub fn style_rule(&self) -> StyleRule {
        match self {
            Variant::Hybrid => StyleRule {
                variants_files: true,
                styles_files: true,
            },
            Variant::Stylesheet => StyleRule {
                variants_files: false,
                styles_files: true,
            },
            Variant::Tailwind => StyleRule {
                variants_files: true,
                styles_files: false,
            },
        }
    }

    /// Whether a file under `styles/` belongs in this variant's output.
    /// Files matching neither `.variants.` nor `.styles.` are dropped everywhere.
    pub fn includes_style_file(&self, file_name: &str) -> bool {
        let rule = self.style_rule();
        let is_variants = file_name.contains(".variants.");
        let is_styles = file_name.contains(".styles.");
        (is_variants && rule.variants_files) || (is_styles && rule.styles_files)
    }

    pub fn from_file_suffix(suffix: &str) -> Option<Variant> {
        match suffix {
            "tw" => Some(Variant::Tailwind),
            "ss" => Some(Variant::Stylesheet),
            _ => None,
        }
    }

    pub fn from_name_suffix(suffix: &str) -> Option<Variant> {
        match suffix {
            "Tw" => Some(Variant::Tailwind),
            "Ss" => Some(Variant::Stylesheet),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hybrid" => Ok(Variant::Hybrid),
            "stylesheet" | "ss" => Ok(Variant::Stylesheet),
            "tailwind" | "tw" => Ok(Variant::Tailwind),
            other => Err(format!(
                "Invalid variant: {}. Valid options: hybrid, stylesheet, tailwind",
                other
            )),
        }
    }
}
