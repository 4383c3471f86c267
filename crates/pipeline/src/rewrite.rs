//! Import rewriter.
//!
//! Rules run strictly in pass order; later passes assume the earlier ones
//! already normalized variant suffixes:
//!
//! 1. types files only: `../../components/` → `../components/`
//! 2. `utils/tw/` and `utils/ss/` → `utils/`
//! 3. per-variant suffix stripping (`.tw`, `.ss`, `/hybrid/`), plus the
//!    stylesheet-only `../../utils/` → `../utils/` for types files
//! 4. `types/<dir>/<name>.types` → `types/<name>.types` and
//!    `./<dir>/<name>.types` → `./<name>.types`
//! 5. `NameTw` / `NameSs` identifiers lose their suffix anywhere in the text
//!
//! Passes 1 to 4 only ever touch module specifiers (`from '…'`, `import '…'`,
//! `import('…')`, `require('…')`). A rule that does not match is a no-op.

use chillgen_core::Variant;
use regex::{Captures, Regex};
use std::path::Path;
use tracing::trace;

const ALL: &[Variant] = &[Variant::Hybrid, Variant::Stylesheet, Variant::Tailwind];
const HYBRID: &[Variant] = &[Variant::Hybrid];
const STYLESHEET: &[Variant] = &[Variant::Stylesheet];
const TAILWIND: &[Variant] = &[Variant::Tailwind];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Specifier,
    Text,
}

struct RewriteRule {
    pass: u8,
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
    scope: Scope,
    variants: &'static [Variant],
    types_only: bool,
}

impl RewriteRule {
    fn applies(&self, variant: Variant, types_file: bool) -> bool {
        self.variants.contains(&variant) && (!self.types_only || types_file)
    }
}

pub struct Rewriter {
    specifier: Regex,
    rules: Vec<RewriteRule>,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Rewriter {
    pub fn new() -> Self {
        let rule = |pass: u8,
                    name: &'static str,
                    pattern: &str,
                    replacement: &'static str,
                    scope: Scope,
                    variants: &'static [Variant],
                    types_only: bool| RewriteRule {
            pass,
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
            replacement,
            scope,
            variants,
            types_only,
        };

        let rules = vec![
            rule(
                1,
                "squash-types-components-depth",
                r"^\.\./\.\./components/",
                "../components/",
                Scope::Specifier,
                ALL,
                true,
            ),
            rule(
                2,
                "strip-utils-variant-dir",
                r"(^|[/@])utils/(?:tw|ss)/",
                "${1}utils/",
                Scope::Specifier,
                ALL,
                false,
            ),
            rule(
                3,
                "strip-any-suffix",
                r"\.(?:tw|ss)(\.|/|$)",
                "${1}",
                Scope::Specifier,
                HYBRID,
                false,
            ),
            rule(
                3,
                "drop-hybrid-dir",
                r"/hybrid/",
                "/",
                Scope::Specifier,
                HYBRID,
                false,
            ),
            rule(
                3,
                "strip-tw-suffix",
                r"\.tw(\.|/|$)",
                "${1}",
                Scope::Specifier,
                TAILWIND,
                false,
            ),
            rule(
                3,
                "strip-ss-suffix",
                r"\.ss(\.|/|$)",
                "${1}",
                Scope::Specifier,
                STYLESHEET,
                false,
            ),
            rule(
                3,
                "squash-types-utils-depth",
                r"^\.\./\.\./utils/",
                "../utils/",
                Scope::Specifier,
                STYLESHEET,
                true,
            ),
            rule(
                4,
                "collapse-types-dir",
                r"(^|[/@])types/[\w-]+/([\w-]+\.types)$",
                "${1}types/${2}",
                Scope::Specifier,
                ALL,
                false,
            ),
            rule(
                4,
                "collapse-local-types-dir",
                r"^\./[\w-]+/([\w-]+\.types)$",
                "./${1}",
                Scope::Specifier,
                ALL,
                false,
            ),
            rule(
                5,
                "strip-identifier-suffix",
                r"\b(\w+?)(?:Tw|Ss)\b",
                "${1}",
                Scope::Text,
                HYBRID,
                false,
            ),
            rule(
                5,
                "strip-identifier-tw",
                r"\b(\w+?)Tw\b",
                "${1}",
                Scope::Text,
                TAILWIND,
                false,
            ),
            rule(
                5,
                "strip-identifier-ss",
                r"\b(\w+?)Ss\b",
                "${1}",
                Scope::Text,
                STYLESHEET,
                false,
            ),
        ];

        Self {
            specifier: Regex::new(
                r#"(\bfrom\s*|\bimport\s*\(\s*|\brequire\s*\(\s*|\bimport\s+)(['"])([^'"\n]+)(['"])"#,
            )
            .expect("valid regex"),
            rules,
        }
    }

    /// Rewrite a source file copied for `variant` to `destination`
    pub fn rewrite(&self, source: &str, variant: Variant, destination: &Path) -> String {
        self.rewrite_text(source, variant, is_types_file(destination))
    }

    pub fn rewrite_text(&self, source: &str, variant: Variant, types_file: bool) -> String {
        let mut text = source.to_string();
        for rule in self.rules.iter().filter(|r| r.applies(variant, types_file)) {
            let next = match rule.scope {
                Scope::Specifier => self.rewrite_specifiers(&text, rule),
                Scope::Text => rule.pattern.replace_all(&text, rule.replacement).into_owned(),
            };
            if next != text {
                trace!(
                    pass = rule.pass,
                    rule = rule.name,
                    variant = %variant,
                    "Rewrite rule applied"
                );
                text = next;
            }
        }
        text
    }

    /// Passes 1 to 4 applied to a bare module path (no quotes)
    pub fn rewrite_path(&self, path: &str, variant: Variant, types_file: bool) -> String {
        let mut path = path.to_string();
        for rule in self
            .rules
            .iter()
            .filter(|r| r.scope == Scope::Specifier && r.applies(variant, types_file))
        {
            path = rule.pattern.replace_all(&path, rule.replacement).into_owned();
        }
        path
    }

    fn rewrite_specifiers(&self, text: &str, rule: &RewriteRule) -> String {
        self.specifier
            .replace_all(text, |caps: &Captures| {
                let path = rule.pattern.replace_all(&caps[3], rule.replacement);
                format!("{}{}{}{}", &caps[1], &caps[2], path, &caps[4])
            })
            .into_owned()
    }
}

/// Whether `destination` is a flattened type file (`types/<name>.types.ts`)
pub fn is_types_file(destination: &Path) -> bool {
    let in_types_dir = destination
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n == "types")
        .unwrap_or(false);
    let name_matches = destination
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".types.ts"))
        .unwrap_or(false);
    in_types_dir && name_matches
}
