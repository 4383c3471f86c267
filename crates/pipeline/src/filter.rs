//! Variant filter: which source file stands in for a logical file in a given variant

use crate::naming::SourceName;
use chillgen_core::Variant;
use std::collections::BTreeMap;

/// Fallback direction for a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Variant file, else the unsuffixed file
    Component,
    /// Like `Component`, but hybrid treats the tailwind file as canonical and
    /// adopts the stylesheet file when nothing else exists
    Types,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The file authored for this variant (the unsuffixed file for hybrid)
    Preferred(String),
    /// The unsuffixed file, used because no variant file exists
    Fallback(String),
    /// A file authored for another variant, used because nothing else exists
    Adopted(String),
    Missing,
}

impl Resolution {
    pub fn source(&self) -> Option<&str> {
        match self {
            Resolution::Preferred(s) | Resolution::Fallback(s) | Resolution::Adopted(s) => Some(s),
            Resolution::Missing => None,
        }
    }
}

/// All source files sharing one logical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub logical: String,
    pub candidates: Vec<SourceName>,
}

impl FileGroup {
    fn find(&self, suffix: Option<Variant>) -> Option<&str> {
        self.candidates
            .iter()
            .find(|c| c.suffix == suffix)
            .map(|c| c.file_name.as_str())
    }

    pub fn resolve(&self, variant: Variant, policy: FallbackPolicy) -> Resolution {
        resolve(self, variant, policy)
    }
}

/// Group file names by logical name, sorted by logical name
pub fn group_by_logical<'a>(file_names: impl IntoIterator<Item = &'a str>) -> Vec<FileGroup> {
    let mut groups: BTreeMap<String, Vec<SourceName>> = BTreeMap::new();
    for file_name in file_names {
        let name = SourceName::parse(file_name);
        groups.entry(name.logical.clone()).or_default().push(name);
    }
    groups
        .into_iter()
        .map(|(logical, mut candidates)| {
            candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
            FileGroup {
                logical,
                candidates,
            }
        })
        .collect()
}

pub fn resolve(group: &FileGroup, variant: Variant, policy: FallbackPolicy) -> Resolution {
    match (variant, policy) {
        (Variant::Hybrid, FallbackPolicy::Component) => match group.find(None) {
            Some(f) => Resolution::Preferred(f.to_string()),
            None => Resolution::Missing,
        },
        (Variant::Hybrid, FallbackPolicy::Types) => {
            if let Some(f) = group.find(Some(Variant::Tailwind)) {
                Resolution::Preferred(f.to_string())
            } else if let Some(f) = group.find(None) {
                Resolution::Fallback(f.to_string())
            } else if let Some(f) = group.find(Some(Variant::Stylesheet)) {
                Resolution::Adopted(f.to_string())
            } else {
                Resolution::Missing
            }
        }
        (variant, _) => {
            if let Some(f) = group.find(Some(variant)) {
                Resolution::Preferred(f.to_string())
            } else if let Some(f) = group.find(None) {
                Resolution::Fallback(f.to_string())
            } else {
                Resolution::Missing
            }
        }
    }
}
