//! Barrel (`index.ts`) parsing and per-variant synthesis

use crate::naming::split_name_suffix;
use crate::rewrite::Rewriter;
use chillgen_core::Variant;
use regex::Regex;
use std::collections::HashSet;

/// One `export … from '…'` statement of a barrel file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatement {
    /// `export { default as Name } from 'path'`
    Default { name: String, path: String },
    /// Any other re-export; `names` are the exported names, empty for `export *`
    Other {
        raw: String,
        names: Vec<String>,
        path: String,
    },
}

impl ExportStatement {
    pub fn exports(&self, name: &str) -> bool {
        match self {
            ExportStatement::Default { name: n, .. } => n == name,
            ExportStatement::Other { names, .. } => names.iter().any(|n| n == name),
        }
    }

    pub fn raw(&self) -> String {
        match self {
            ExportStatement::Default { name, path } => default_export(name, path),
            ExportStatement::Other { raw, .. } => raw.clone(),
        }
    }
}

pub struct BarrelParser {
    braces: Regex,
    star: Regex,
    default_only: Regex,
    path_marker: Regex,
}

impl Default for BarrelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BarrelParser {
    pub fn new() -> Self {
        Self {
            braces: Regex::new(
                r#"export\s+(?:type\s+)?\{([^}]*)\}\s*from\s*['"]([^'"\n]+)['"]\s*;?"#,
            )
            .expect("valid regex"),
            star: Regex::new(
                r#"export\s+(?:type\s+)?\*\s*(?:as\s+(\w+)\s+)?from\s*['"]([^'"\n]+)['"]\s*;?"#,
            )
            .expect("valid regex"),
            default_only: Regex::new(r"^\s*default\s+as\s+(\w+)\s*,?\s*$").expect("valid regex"),
            path_marker: Regex::new(r"(?:\.(tw|ss)(?:\.|/|$))|(?:/(tw|ss)/)").expect("valid regex"),
        }
    }

    /// Re-export statements in source order
    pub fn parse(&self, source: &str) -> Vec<ExportStatement> {
        let mut found: Vec<(usize, ExportStatement)> = Vec::new();

        for caps in self.braces.captures_iter(source) {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let body = &caps[1];
            let path = caps[2].to_string();
            let statement = match self.default_only.captures(body) {
                Some(d) => ExportStatement::Default {
                    name: d[1].to_string(),
                    path,
                },
                None => ExportStatement::Other {
                    raw: caps[0].trim_end().to_string(),
                    names: parse_names(body),
                    path,
                },
            };
            found.push((start, statement));
        }

        for caps in self.star.captures_iter(source) {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let names = caps.get(1).map(|m| vec![m.as_str().to_string()]).unwrap_or_default();
            found.push((
                start,
                ExportStatement::Other {
                    raw: caps[0].trim_end().to_string(),
                    names,
                    path: caps[2].to_string(),
                },
            ));
        }

        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, s)| s).collect()
    }

    /// Variant a statement was authored for, from its names or its path
    fn marker(&self, statement: &ExportStatement) -> Option<Variant> {
        match statement {
            ExportStatement::Default { name, .. } => split_name_suffix(name).1,
            ExportStatement::Other { names, path, .. } => names
                .iter()
                .find_map(|n| split_name_suffix(n).1)
                .or_else(|| {
                    self.path_marker.captures(path).and_then(|c| {
                        c.get(1)
                            .or_else(|| c.get(2))
                            .and_then(|m| Variant::from_file_suffix(m.as_str()))
                    })
                }),
        }
    }
}

/// First statement exporting `base_name`, verbatim
pub fn find_export_block(parser: &BarrelParser, source: &str, base_name: &str) -> Option<String> {
    parser
        .parse(source)
        .into_iter()
        .find(|s| s.exports(base_name))
        .map(|s| s.raw())
}

/// Per-variant component barrel from a master barrel that lists every variant.
///
/// `export { default as X[Tw|Ss] }` entries are kept when their suffix
/// matches the variant; tailwind and stylesheet fall back to the unsuffixed
/// entry when no suffixed one exists. Names and paths lose their suffix.
/// Other re-exports are kept unless marked for a different variant, then
/// rewritten like any copied source.
pub fn synthesize_component_barrel(
    parser: &BarrelParser,
    rewriter: &Rewriter,
    source: &str,
    variant: Variant,
) -> String {
    let statements = parser.parse(source);

    let variant_specific: HashSet<&str> = statements
        .iter()
        .filter_map(|s| match s {
            ExportStatement::Default { name, .. } => match split_name_suffix(name) {
                (base, Some(v)) if v == variant => Some(base),
                _ => None,
            },
            ExportStatement::Other { .. } => None,
        })
        .collect();

    let mut lines: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for statement in &statements {
        let line = match statement {
            ExportStatement::Default { name, path } => {
                let (base, suffix) = split_name_suffix(name);
                let keep = match suffix {
                    Some(v) => v == variant,
                    None => variant == Variant::Hybrid || !variant_specific.contains(base),
                };
                if !keep {
                    continue;
                }
                default_export(base, &rewriter.rewrite_path(path, variant, false))
            }
            ExportStatement::Other { raw, .. } => {
                match parser.marker(statement) {
                    Some(v) if v != variant => continue,
                    Some(_) if variant == Variant::Hybrid => continue,
                    _ => {}
                }
                rewriter.rewrite_text(raw, variant, false)
            }
        };
        if seen.insert(line.clone()) {
            lines.push(line);
        }
    }

    finish(lines)
}

/// `components/index.ts` of a generated package
pub fn components_barrel(component_names: &[String]) -> String {
    let mut names = component_names.to_vec();
    names.sort();
    finish(
        names
            .iter()
            .map(|n| format!("export * from './{}';", n))
            .collect(),
    )
}

/// `types/index.ts` of a generated package, one line per `*.types.ts`
pub fn types_barrel(type_files: &[String]) -> String {
    let mut modules: Vec<&str> = type_files
        .iter()
        .filter_map(|f| f.strip_suffix(".ts"))
        .filter(|m| m.ends_with(".types"))
        .collect();
    modules.sort();
    finish(
        modules
            .iter()
            .map(|m| format!("export * from './{}';", m))
            .collect(),
    )
}

/// `src/index.ts` of a generated package
pub fn root_barrel(has_components: bool, has_types: bool, has_utils: bool) -> String {
    let mut lines = Vec::new();
    if has_components {
        lines.push("export * from './components';".to_string());
    }
    if has_types {
        lines.push("export * from './types';".to_string());
    }
    if has_utils {
        lines.push("export * from './utils';".to_string());
    }
    finish(lines)
}

fn default_export(name: &str, path: &str) -> String {
    format!("export {{ default as {} }} from '{}';", name, path)
}

fn parse_names(body: &str) -> Vec<String> {
    body.split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let part = part.strip_prefix("type ").unwrap_or(part).trim();
            part.split_whitespace().last().map(|s| s.to_string())
        })
        .collect()
}

fn finish(lines: Vec<String>) -> String {
    if lines.is_empty() {
        "export {};\n".to_string()
    } else {
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
