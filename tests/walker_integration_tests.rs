//! Integration tests for the tree walker
//!
//! These tests verify:
//! - Exclusion by directory name at any depth
//! - Extension filtering
//! - Missing roots are skipped, not fatal

mod common;

use camino::Utf8Path;
use common::create_project;
use fwtidy::TraversalConfig;
use fwtidy::services::TreeWalker;
use proptest::prelude::*;
use std::collections::HashSet;

fn set(items: &[&str]) -> indexmap::IndexSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn walk_relative(config: &TraversalConfig, base: &Utf8Path) -> HashSet<String> {
    TreeWalker::new(config, base)
        .walk()
        .map(|task| task.display_relative(base).to_string())
        .collect()
}

#[test]
fn test_src_scenario() {
    let (_temp_dir, base) = create_project(&["Src/a.c", "Src/build/b.c", "Src/x.txt"]);
    let config = TraversalConfig {
        roots: vec!["Src".into()],
        extensions: set(&[".c", ".h"]),
        exclude_dirs: set(&["build"]),
    };

    assert_eq!(
        walk_relative(&config, &base),
        HashSet::from(["Src/a.c".to_string()])
    );
}

#[test]
fn test_board_layout_skips_vendor_and_tooling_dirs() {
    let (_temp_dir, base) = create_project(&[
        "Core/Src/main.c",
        "Core/Inc/main.h",
        "Drivers/STM32F4xx_HAL_Driver/Src/stm32f4xx_hal.c",
        ".pio/build/nucleo/src/main.o.c",
        ".vscode/c_cpp.c",
        "lib/logger/logger.cpp",
        "lib/logger/logger.hpp",
        "lib/logger/build/tmp.c",
    ]);
    let config = TraversalConfig::default();

    assert_eq!(
        walk_relative(&config, &base),
        HashSet::from([
            "Core/Src/main.c".to_string(),
            "Core/Inc/main.h".to_string(),
            "lib/logger/logger.cpp".to_string(),
            "lib/logger/logger.hpp".to_string(),
        ])
    );
}

#[test]
fn test_multiple_roots_in_one_walk() {
    let (_temp_dir, base) = create_project(&["Src/main.c", "Inc/main.h", "Other/skip.c"]);
    let config = TraversalConfig {
        roots: vec!["Src".into(), "Inc".into(), "Missing".into()],
        extensions: set(&[".c", ".h"]),
        exclude_dirs: set(&[]),
    };

    assert_eq!(
        walk_relative(&config, &base),
        HashSet::from(["Src/main.c".to_string(), "Inc/main.h".to_string()])
    );
}

#[test]
fn test_walk_is_lazy() {
    let (_temp_dir, base) = create_project(&["a.c", "b.c", "c.c"]);
    let config = TraversalConfig::default();

    let mut walk = TreeWalker::new(&config, &base).walk();
    assert!(walk.next().is_some());
    assert_eq!(walk.count(), 2);
}

const DIR_NAMES: [&str; 4] = ["build", "src", "lib", "Drivers"];
const FILE_NAMES: [&str; 6] = ["a.c", "b.h", "c.cpp", "d.txt", "e.C", "f.hpp.bak"];

fn arb_tree() -> impl Strategy<Value = Vec<String>> {
    let path = (
        prop::collection::vec(prop::sample::select(DIR_NAMES.to_vec()), 0..4),
        prop::sample::select(FILE_NAMES.to_vec()),
    )
        .prop_map(|(dirs, file)| {
            let mut parts: Vec<&str> = dirs;
            parts.push(file);
            parts.join("/")
        });
    prop::collection::vec(path, 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_excluded_names_never_appear(
        files in arb_tree(),
        excluded in prop::sample::subsequence(DIR_NAMES.to_vec(), 0..=DIR_NAMES.len()),
    ) {
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let (_temp_dir, base) = create_project(&refs);
        let config = TraversalConfig {
            roots: vec![".".into()],
            extensions: set(&[".c", ".h", ".cpp", ".hpp"]),
            exclude_dirs: set(&excluded),
        };

        let found = walk_relative(&config, &base);

        for path in &found {
            for component in Utf8Path::new(path).components() {
                prop_assert!(!excluded.contains(&component.as_str()));
            }
        }

        // Everything not under an excluded directory with a matching extension is found
        let expected: HashSet<String> = files
            .iter()
            .filter(|f| {
                let path = Utf8Path::new(f.as_str());
                let parent_ok = path
                    .parent()
                    .map(|p| p.components().all(|c| !excluded.contains(&c.as_str())))
                    .unwrap_or(true);
                parent_ok && config.matches_extension(path.file_name().unwrap())
            })
            .cloned()
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_only_allowed_extensions(files in arb_tree()) {
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let (_temp_dir, base) = create_project(&refs);
        let config = TraversalConfig {
            roots: vec![".".into()],
            extensions: set(&[".c", ".h"]),
            exclude_dirs: set(&[]),
        };

        for path in walk_relative(&config, &base) {
            prop_assert!(path.ends_with(".c") || path.ends_with(".h"));
        }
    }
}
