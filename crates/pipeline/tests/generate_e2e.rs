//! End-to-end generation against a fixture source tree on disk

use chillgen_core::{
    FileSystem, GenerationReport, GeneratorConfig, NoOpHandler, RealFileSystem, Variant,
};
use chillgen_pipeline::{GenerationOrchestrator, RunOptions, Selection};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const AVATAR_TW: &str = r#"import type { AvatarPropsTw } from '../../../types/avatar/avatar.tw.types';
import { avatarTv } from '../styles/Avatar.variants';
import { cn } from '../../../utils/tw/cn';

export default function Avatar({ size }: AvatarPropsTw) {
  return cn(avatarTv({ size }));
}
"#;

const AVATAR_SS: &str = r#"import type { AvatarPropsSs } from '../../../types/avatar/avatar.ss.types';
import { styles } from '../styles/Avatar.styles';
import { createSheet } from '../../../utils/ss/sheet';

export default function Avatar({ size }: AvatarPropsSs) {
  return createSheet(styles[size]);
}
"#;

const AVATAR_HYBRID: &str = r#"import type { AvatarProps } from '../../../types/avatar/avatar.types';
import { isNativeWind } from '../../../utils/hybrid/detect';

export default function Avatar(props: AvatarProps) {
  return isNativeWind() ? 'tw' : 'ss';
}
"#;

const ACCORDION_INDEX: &str = r#"export { default as AccordionItem } from './components/item/Item';
export { default as AccordionItemTw } from './components/item/Item.tw';
export { default as AccordionTrigger } from './components/trigger/Trigger';
export type { AccordionPropsSs } from '../../types/accordion/accordion.ss.types';
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("No parent")).expect("Failed to create directory");
    fs::write(path, content).expect("Failed to write fixture file");
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("Failed to read {}: {}", rel, e))
}

/// Source tree with one standard and one composite component
fn create_project(dir: &TempDir) -> GeneratorConfig {
    let root = dir.path();

    write(
        root,
        "scripts/templates/tsconfig.template.json",
        "{ \"extends\": \"../../tsconfig.base.json\" }\n",
    );
    write(
        root,
        "scripts/templates/bob.config.template.js",
        "module.exports = { name: '{{CORE_NAME}}' };\n",
    );
    for variant in Variant::ALL {
        write(
            root,
            &format!("scripts/templates/package.{}.template.json", variant.name()),
            &format!("{{ \"name\": \"@chill-ui/{}\" }}\n", variant.name()),
        );
    }
    write(
        root,
        "scripts/templates/nativewind-env.d.ts",
        "/// <reference types=\"nativewind/types\" />\n",
    );

    let src = "chill-ui-core/src";
    write(root, &format!("{src}/index.ts"), "export * from './components';\n");
    write(root, &format!("{src}/theme.ts"), "export const theme = {};\n");

    write(root, &format!("{src}/components/avatar/components/Avatar.tsx"), AVATAR_HYBRID);
    write(root, &format!("{src}/components/avatar/components/Avatar.tw.tsx"), AVATAR_TW);
    write(root, &format!("{src}/components/avatar/components/Avatar.ss.tsx"), AVATAR_SS);
    write(
        root,
        &format!("{src}/components/avatar/components/Avatar.stories.tsx"),
        "export default {};\n",
    );
    write(
        root,
        &format!("{src}/components/avatar/styles/Avatar.variants.ts"),
        "export const avatarTv = (v: object) => 'rounded-full';\n",
    );
    write(
        root,
        &format!("{src}/components/avatar/styles/Avatar.styles.ts"),
        "export const styles = { sm: {}, md: {} };\n",
    );
    write(root, &format!("{src}/components/avatar/styles/README.md"), "# styles\n");
    write(
        root,
        &format!("{src}/components/avatar/__tests__/Avatar.test.tsx"),
        "it('renders', () => {});\n",
    );
    write(
        root,
        &format!("{src}/components/avatar/components/__tests__/Avatar.test.tsx"),
        "it('renders the hybrid avatar', () => {});\n",
    );
    write(
        root,
        &format!("{src}/components/avatar/index.ts"),
        "export { default as Avatar } from './components/Avatar';\nexport type { AvatarProps } from '../../types/avatar/avatar.types';\n",
    );

    write(
        root,
        &format!("{src}/components/accordion/components/item/item.tsx"),
        "export default function AccordionItem() { return 'hybrid'; }\n",
    );
    write(
        root,
        &format!("{src}/components/accordion/components/item/item.tw.tsx"),
        "export default function AccordionItemTw() { return 'tw'; }\n",
    );
    write(
        root,
        &format!("{src}/components/accordion/components/trigger/Trigger.tsx"),
        "export default function AccordionTrigger() { return null; }\n",
    );
    write(root, &format!("{src}/components/accordion/index.ts"), ACCORDION_INDEX);

    write(
        root,
        &format!("{src}/types/avatar/avatar.types.ts"),
        "export interface AvatarProps { size: 'sm' | 'md'; }\n",
    );
    write(
        root,
        &format!("{src}/types/avatar/avatar.tw.types.ts"),
        "import type { AvatarVariantsTw } from '../../components/avatar/styles/Avatar.variants';\nexport interface AvatarPropsTw { variants?: AvatarVariantsTw; }\n",
    );
    write(
        root,
        &format!("{src}/types/avatar/avatar.ss.types.ts"),
        "import type { Sheet } from '../../utils/ss/sheet';\nexport interface AvatarPropsSs { style?: Sheet; }\n",
    );
    write(
        root,
        &format!("{src}/types/accordion/accordion.ss.types.ts"),
        "export interface AccordionPropsSs { multiple?: boolean; }\n",
    );

    write(
        root,
        &format!("{src}/utils/common/merge.ts"),
        "export const merge = (...parts: string[]) => parts.join(' ');\n",
    );
    write(root, &format!("{src}/utils/index.ts"), "export * from './common/merge';\n");
    write(
        root,
        &format!("{src}/utils/tw/cn.ts"),
        "export const cn = (...parts: string[]) => parts.join(' ');\n",
    );
    write(
        root,
        &format!("{src}/utils/ss/sheet.ts"),
        "export const createSheet = <T,>(style: T) => style;\nexport type Sheet = object;\n",
    );
    write(
        root,
        &format!("{src}/utils/hybrid/detect.ts"),
        "export const isNativeWind = () => true;\n",
    );
    write(
        root,
        &format!("{src}/utils/hybrid/cn.ts"),
        "export const cn = (...parts: string[]) => parts.filter(Boolean).join(' ');\n",
    );

    write(
        root,
        &format!("{src}/constants/sizes.ts"),
        "export const SIZES = ['sm', 'md'] as const;\n",
    );

    let mut config = GeneratorConfig::for_project(root);
    config.alias_command = Vec::new();
    config.validate().expect("Fixture config should be valid");
    config
}

fn generate_with(config: &GeneratorConfig, options: RunOptions) -> GenerationReport {
    GenerationOrchestrator::with_handler(Arc::new(RealFileSystem::new()), Arc::new(NoOpHandler))
        .execute(config, options)
        .expect("Generation failed")
}

fn generate(config: &GeneratorConfig, target: &str) -> GenerationReport {
    let mut options = RunOptions::new(Selection::parse(target));
    options.run_aliases = false;
    generate_with(config, options)
}

fn package(config: &GeneratorConfig, variant: Variant) -> PathBuf {
    config.package_dir(variant)
}

fn generated_files(config: &GeneratorConfig, variant: Variant) -> Vec<String> {
    RealFileSystem::new()
        .walk_files(&package(config, variant))
        .expect("Failed to walk generated package")
        .into_iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn test_single_standard_component() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);

    let report = generate(&config, "avatar");
    assert_eq!(report.components, vec!["avatar"]);
    assert!(report.missing_components.is_empty());

    let tailwind = package(&config, Variant::Tailwind);
    assert_eq!(
        read(&tailwind, "src/components/avatar/components/Avatar.tsx"),
        r#"import type { AvatarProps } from '../../../types/avatar.types';
import { avatarTv } from '../styles/Avatar.variants';
import { cn } from '../../../utils/cn';

export default function Avatar({ size }: AvatarProps) {
  return cn(avatarTv({ size }));
}
"#
    );

    let stylesheet = package(&config, Variant::Stylesheet);
    assert_eq!(
        read(&stylesheet, "src/components/avatar/components/Avatar.tsx"),
        r#"import type { AvatarProps } from '../../../types/avatar.types';
import { styles } from '../styles/Avatar.styles';
import { createSheet } from '../../../utils/sheet';

export default function Avatar({ size }: AvatarProps) {
  return createSheet(styles[size]);
}
"#
    );

    let hybrid = package(&config, Variant::Hybrid);
    assert_eq!(
        read(&hybrid, "src/components/avatar/components/Avatar.tsx"),
        r#"import type { AvatarProps } from '../../../types/avatar.types';
import { isNativeWind } from '../../../utils/detect';

export default function Avatar(props: AvatarProps) {
  return isNativeWind() ? 'tw' : 'ss';
}
"#
    );
}

#[test]
fn test_single_component_tree() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "avatar");

    assert_eq!(
        generated_files(&config, Variant::Tailwind),
        vec![
            "bob.config.js",
            "nativewind-env.d.ts",
            "package.json",
            "src/components/avatar/components/Avatar.tsx",
            "src/components/avatar/index.ts",
            "src/components/avatar/styles/Avatar.variants.ts",
            "src/components/index.ts",
            "src/constants/sizes.ts",
            "src/index.ts",
            "src/theme.ts",
            "src/types/avatar.types.ts",
            "src/types/index.ts",
            "src/utils/cn.ts",
            "src/utils/common/merge.ts",
            "src/utils/index.ts",
            "tsconfig.json",
        ]
    );

    let tailwind = package(&config, Variant::Tailwind);
    assert_eq!(read(&tailwind, "bob.config.js"), "module.exports = { name: 'core-tailwind' };\n");
    assert_eq!(
        read(&tailwind, "src/components/avatar/index.ts"),
        "export { default as Avatar } from './components/Avatar';\n"
    );
    assert_eq!(read(&tailwind, "src/components/index.ts"), "export * from './avatar';\n");
    assert_eq!(read(&tailwind, "src/types/index.ts"), "export * from './avatar.types';\n");
    assert_eq!(
        read(&tailwind, "src/index.ts"),
        "export * from './components';\nexport * from './types';\nexport * from './utils';\n"
    );
}

#[test]
fn test_style_partition() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "avatar");

    let styles = "src/components/avatar/styles";
    let tailwind = package(&config, Variant::Tailwind).join(styles);
    let stylesheet = package(&config, Variant::Stylesheet).join(styles);
    let hybrid = package(&config, Variant::Hybrid).join(styles);

    assert!(tailwind.join("Avatar.variants.ts").is_file());
    assert!(!tailwind.join("Avatar.styles.ts").exists());
    assert!(stylesheet.join("Avatar.styles.ts").is_file());
    assert!(!stylesheet.join("Avatar.variants.ts").exists());
    assert!(hybrid.join("Avatar.variants.ts").is_file());
    assert!(hybrid.join("Avatar.styles.ts").is_file());

    for dir in [tailwind, stylesheet, hybrid] {
        assert!(!dir.join("README.md").exists());
    }
}

#[test]
fn test_types_per_variant() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    let report = generate(&config, "all");

    let tailwind_types = read(&package(&config, Variant::Tailwind), "src/types/avatar.types.ts");
    assert_eq!(
        tailwind_types,
        "import type { AvatarVariants } from '../components/avatar/styles/Avatar.variants';\nexport interface AvatarProps { variants?: AvatarVariants; }\n"
    );
    // hybrid types follow the tailwind shape
    assert_eq!(
        read(&package(&config, Variant::Hybrid), "src/types/avatar.types.ts"),
        tailwind_types
    );
    assert_eq!(
        read(&package(&config, Variant::Stylesheet), "src/types/avatar.types.ts"),
        "import type { Sheet } from '../utils/sheet';\nexport interface AvatarProps { style?: Sheet; }\n"
    );

    // stylesheet-only types are adopted by hybrid, never by tailwind
    assert_eq!(
        read(&package(&config, Variant::Hybrid), "src/types/accordion.types.ts"),
        "export interface AccordionProps { multiple?: boolean; }\n"
    );
    assert!(!package(&config, Variant::Tailwind)
        .join("src/types/accordion.types.ts")
        .exists());
    assert_eq!(report.summary(Variant::Hybrid).unwrap().adopted, 1);
    assert!(report.summary(Variant::Tailwind).unwrap().missing >= 1);
}

#[test]
fn test_composite_barrels() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "accordion");

    let barrel = "src/components/accordion/index.ts";
    assert_eq!(
        read(&package(&config, Variant::Tailwind), barrel),
        "export { default as AccordionItem } from './components/item/Item';\n\
         export { default as AccordionTrigger } from './components/trigger/Trigger';\n"
    );
    assert_eq!(
        read(&package(&config, Variant::Hybrid), barrel),
        "export { default as AccordionItem } from './components/item/Item';\n\
         export { default as AccordionTrigger } from './components/trigger/Trigger';\n"
    );
    assert_eq!(
        read(&package(&config, Variant::Stylesheet), barrel),
        "export { default as AccordionItem } from './components/item/Item';\n\
         export { default as AccordionTrigger } from './components/trigger/Trigger';\n\
         export type { AccordionProps } from '../../types/accordion.types';\n"
    );

    let item = "src/components/accordion/components/item/Item.tsx";
    assert_eq!(
        read(&package(&config, Variant::Tailwind), item),
        "export default function AccordionItem() { return 'tw'; }\n"
    );
    assert_eq!(
        read(&package(&config, Variant::Stylesheet), item),
        "export default function AccordionItem() { return 'hybrid'; }\n"
    );
}

#[test]
fn test_base_only_file_shared_by_all_variants() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    let report = generate(&config, "accordion");

    let trigger = "src/components/accordion/components/trigger/Trigger.tsx";
    let expected = "export default function AccordionTrigger() { return null; }\n";
    for variant in Variant::ALL {
        assert_eq!(read(&package(&config, variant), trigger), expected);
    }
    assert!(report.summary(Variant::Tailwind).unwrap().fallbacks >= 1);
}

#[test]
fn test_suffixes_never_survive() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "all");

    let specifier = Regex::new(r#"from\s*['"]([^'"]+)['"]"#).unwrap();
    for (variant, suffixes) in [
        (Variant::Tailwind, vec![".tw", "Tw"]),
        (Variant::Stylesheet, vec![".ss", "Ss"]),
        (Variant::Hybrid, vec![".tw", "Tw", ".ss", "Ss"]),
    ] {
        let root = package(&config, variant);
        for rel in generated_files(&config, variant) {
            if !(rel.ends_with(".ts") || rel.ends_with(".tsx")) {
                continue;
            }
            let content = read(&root, &rel);
            for caps in specifier.captures_iter(&content) {
                for suffix in suffixes.iter().filter(|s| s.starts_with('.')) {
                    assert!(
                        !caps[1].contains(&format!("{}.", suffix)) && !caps[1].ends_with(suffix),
                        "{} specifier {} in {}",
                        variant,
                        &caps[1],
                        rel
                    );
                }
            }
            for suffix in suffixes.iter().filter(|s| !s.starts_with('.')) {
                let identifier = Regex::new(&format!(r"\w{}\b", suffix)).unwrap();
                assert!(
                    !identifier.is_match(&content),
                    "{} identifier suffix {} in {}",
                    variant,
                    suffix,
                    rel
                );
            }
        }
    }
}

#[test]
fn test_regeneration_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);

    let first = generate(&config, "all");
    let second = generate(&config, "all");

    for variant in Variant::ALL {
        let a = first.summary(variant).unwrap().digest.clone();
        let b = second.summary(variant).unwrap().digest.clone();
        assert!(a.is_some());
        assert_eq!(a, b, "{} output changed between runs", variant);
    }
}

#[test]
fn test_missing_component_leaves_output_untouched() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);

    let before = generate(&config, "avatar");
    let report = generate(&config, "avtar");

    assert_eq!(report.missing_components, vec!["avtar"]);
    assert!(report.components.is_empty());
    for variant in Variant::ALL {
        assert!(!package(&config, variant).join("src/components/avtar").exists());
        assert_eq!(
            before.summary(variant).unwrap().digest,
            report.summary(variant).unwrap().digest
        );
    }
}

#[test]
fn test_hybrid_utils_collision_later_dir_wins() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    let report = generate(&config, "all");

    let hybrid = package(&config, Variant::Hybrid);
    assert_eq!(
        read(&hybrid, "src/utils/cn.ts"),
        "export const cn = (...parts: string[]) => parts.filter(Boolean).join(' ');\n"
    );
    assert!(hybrid.join("src/utils/sheet.ts").is_file());
    assert!(hybrid.join("src/utils/detect.ts").is_file());
    assert_eq!(report.summary(Variant::Hybrid).unwrap().overwritten, 1);

    let tailwind = package(&config, Variant::Tailwind);
    assert!(!tailwind.join("src/utils/sheet.ts").exists());
    assert!(!tailwind.join("src/utils/detect.ts").exists());
}

#[test]
fn test_excluded_files_not_generated() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "all");

    for variant in Variant::ALL {
        let files = generated_files(&config, variant);
        assert!(files.iter().all(|f| !f.contains("__tests__")));
        assert!(files.iter().all(|f| !f.contains(".stories.")));
    }
}

#[test]
fn test_colocated_test_folder_keeps_standard_layout() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "avatar");

    for variant in Variant::ALL {
        let root = package(&config, variant);
        assert!(!root.join("src/components/avatar/components/__tests__").exists());
        assert_eq!(
            read(&root, "src/components/avatar/index.ts"),
            "export { default as Avatar } from './components/Avatar';\n"
        );
    }
}

#[test]
fn test_clean_removes_stale_files() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "avatar");

    let stale = package(&config, Variant::Tailwind).join("stale.txt");
    fs::write(&stale, "left over").unwrap();

    generate(&config, "avatar");
    assert!(stale.exists());

    let mut options = RunOptions::new(Selection::parse("avatar"));
    options.run_aliases = false;
    options.clean = true;
    generate_with(&config, options);
    assert!(!stale.exists());
}

#[test]
fn test_all_removes_deleted_components() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    generate(&config, "all");

    fs::remove_dir_all(config.source_dir().join("components/accordion")).unwrap();
    generate(&config, "all");

    let tailwind = package(&config, Variant::Tailwind);
    assert!(!tailwind.join("src/components/accordion").exists());
    assert_eq!(read(&tailwind, "src/components/index.ts"), "export * from './avatar';\n");
}

#[test]
fn test_missing_template_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = create_project(&dir);
    fs::remove_file(config.templates_path().join("package.stylesheet.template.json")).unwrap();

    let orchestrator = GenerationOrchestrator::with_handler(
        Arc::new(RealFileSystem::new()),
        Arc::new(NoOpHandler),
    );
    let err = orchestrator
        .execute(&config, RunOptions::new(Selection::All))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("package.stylesheet.template.json"));
}

#[test]
fn test_failing_alias_command_does_not_fail_run() {
    let dir = TempDir::new().unwrap();
    let mut config = create_project(&dir);
    config.alias_command = vec!["chillgen-no-such-alias-script".to_string()];

    let report = generate_with(&config, RunOptions::new(Selection::parse("avatar")));
    let outcome = report.alias_conversion.expect("Alias outcome recorded");
    assert!(!outcome.success);
    assert!(outcome.message.contains("chillgen-no-such-alias-script"));
}
