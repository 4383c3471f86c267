//! File and identifier naming conventions of the shared source tree.
//!
//! A file name is split on `.`: the first segment is the stem, the last the
//! extension, and a middle segment equal to `tw` or `ss` marks the variant
//! the file was authored for. Removing that segment gives the *logical*
//! name every variant writes the file under:
//!
//! | source                  | logical              | variant    |
//! |-------------------------|----------------------|------------|
//! | `Avatar.tsx`            | `Avatar.tsx`         | none       |
//! | `Avatar.tw.tsx`         | `Avatar.tsx`         | tailwind   |
//! | `accordion.ss.types.ts` | `accordion.types.ts` | stylesheet |

use chillgen_core::Variant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    pub file_name: String,
    pub logical: String,
    pub suffix: Option<Variant>,
}

impl SourceName {
    pub fn parse(file_name: &str) -> Self {
        let segments: Vec<&str> = file_name.split('.').collect();

        if segments.len() >= 3 {
            let last = segments.len() - 1;
            for i in 1..last {
                if let Some(variant) = Variant::from_file_suffix(segments[i]) {
                    let logical = segments
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(_, s)| *s)
                        .collect::<Vec<_>>()
                        .join(".");
                    return Self {
                        file_name: file_name.to_string(),
                        logical,
                        suffix: Some(variant),
                    };
                }
            }
        }

        Self {
            file_name: file_name.to_string(),
            logical: file_name.to_string(),
            suffix: None,
        }
    }

    /// Stem before the first `.` (`Avatar` for `Avatar.tw.tsx`)
    pub fn stem(&self) -> &str {
        self.logical.split('.').next().unwrap_or(&self.logical)
    }

    /// Everything after the stem, including the leading `.` (`.types.ts`)
    pub fn extension(&self) -> &str {
        match self.logical.find('.') {
            Some(i) => &self.logical[i..],
            None => "",
        }
    }
}

/// `segmented-control` → `SegmentedControl`, `avatar` → `Avatar`
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c == ' ')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a trailing `Tw`/`Ss` off an identifier: `BarTw` → (`Bar`, tailwind)
pub fn split_name_suffix(name: &str) -> (&str, Option<Variant>) {
    if name.len() > 2 && name.is_char_boundary(name.len() - 2) {
        let (base, suffix) = name.split_at(name.len() - 2);
        if let Some(variant) = Variant::from_name_suffix(suffix) {
            return (base, Some(variant));
        }
    }
    (name, None)
}
