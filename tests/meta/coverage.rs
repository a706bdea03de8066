#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Files that only wire modules together or start a binary
    fn is_wiring(relative: &str) -> bool {
        relative == "lib.rs" || relative == "main.rs" || relative.ends_with("mod.rs")
    }

    fn relative_paths(dir: &Path, base: &Path) -> Result<HashSet<String>, io::Error> {
        let mut paths = HashSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_stripped| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.extend(relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }

        Ok(paths)
    }

    fn rust_files(dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files.extend(rust_files(&path)?);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn report(header: &str, lines: &BTreeSet<String>) -> String {
        let body: Vec<String> = lines.iter().map(|line| format!("  - {line}")).collect();
        format!("{header}:\n{}", body.join("\n"))
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_paths(Path::new(SRC_DIR), Path::new(SRC_DIR)).unwrap_or_default();
        let unit = relative_paths(Path::new(UNIT_DIR), Path::new(UNIT_DIR)).unwrap_or_default();
        assert!(!src.is_empty(), "No sources found under {SRC_DIR}");

        let missing: BTreeSet<String> = src
            .iter()
            .filter(|path| !is_wiring(path) && !unit.contains(*path))
            .map(|path| format!("src/{path} -> {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without unit test counterparts", &missing)
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_paths(Path::new(SRC_DIR), Path::new(SRC_DIR)).unwrap_or_default();
        let unit = relative_paths(Path::new(UNIT_DIR), Path::new(UNIT_DIR)).unwrap_or_default();

        let orphaned: BTreeSet<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("{UNIT_DIR}/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit test files without source counterparts", &orphaned)
        );
    }

    // A unit test file that no mod.rs declares is never compiled
    #[test]
    fn test_unit_modules_are_declared() {
        let mut undeclared = BTreeSet::new();

        for file in rust_files(Path::new(UNIT_DIR)).unwrap_or_default() {
            let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == "mod" || stem == "main" {
                continue;
            }
            let Some(parent) = file.parent() else {
                continue;
            };

            let declaring = if parent == Path::new(UNIT_DIR) {
                parent.join("main.rs")
            } else {
                parent.join("mod.rs")
            };
            let declared = fs::read_to_string(&declaring)
                .is_ok_and(|content| content.lines().any(|line| {
                    line.trim().trim_start_matches("pub ") == format!("mod {stem};")
                }));

            if !declared {
                undeclared.insert(file.display().to_string());
            }
        }

        // Directories are modules too
        for entry in fs::read_dir(UNIT_DIR).into_iter().flatten().flatten() {
            let path = entry.path();
            if path.is_dir() {
                let name = entry.file_name().to_string_lossy().to_string();
                let declared = fs::read_to_string(Path::new(UNIT_DIR).join("main.rs"))
                    .is_ok_and(|content| content.contains(&format!("mod {name};")));
                if !declared {
                    undeclared.insert(path.display().to_string());
                }
            }
        }

        assert!(
            undeclared.is_empty(),
            "{}",
            report("Unit test modules not declared by their parent", &undeclared)
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_files(Path::new("tests")).unwrap_or_default();
        assert!(!files.is_empty(), "No test files found");

        let empty: BTreeSet<String> = files
            .iter()
            .filter(|path| {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
                // Test target roots and module files only declare modules
                name != "mod.rs" && !(name == "main.rs" && path.parent() != Some(Path::new(UNIT_DIR)))
            })
            .filter(|path| {
                fs::read_to_string(path).is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| path.display().to_string())
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test files without any #[test] functions", &empty)
        );
    }
}
