//! Structural checks keeping `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    /// Relative paths of every directory and `.rs` file below `base`
    fn tree(base: &Path) -> io::Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        walk(base, base, &mut paths)?;
        Ok(paths)
    }

    fn walk(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_strip| io::Error::other("path outside scanned tree"))?
                .to_string_lossy()
                .into_owned();

            if path.is_dir() {
                paths.insert(relative);
                walk(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn is_organizational(path: &str) -> bool {
        path == "main.rs" || path == "lib.rs" || path.ends_with("mod.rs")
    }

    fn report(header: &str, lines: &[String]) -> String {
        format!("{header}:\n{}", lines.join("\n"))
    }

    #[test]
    fn test_every_source_file_has_unit_tests() {
        let src = tree(Path::new(SRC_DIR)).unwrap_or_default();
        let unit = tree(Path::new(UNIT_DIR)).unwrap_or_default();
        assert!(!src.is_empty(), "no sources found under {SRC_DIR}");

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_organizational(path) && !unit.contains(*path))
            .map(|path| format!("  - {SRC_DIR}/{path} -> {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without unit test counterparts", &missing)
        );
    }

    #[test]
    fn test_every_unit_test_has_a_source() {
        let src = tree(Path::new(SRC_DIR)).unwrap_or_default();
        let unit = tree(Path::new(UNIT_DIR)).unwrap_or_default();

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("  - {UNIT_DIR}/{path} -> {SRC_DIR}/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit test files without a source counterpart", &orphaned)
        );
    }

    #[test]
    fn test_every_unit_file_is_declared() {
        let unit_root = Path::new(UNIT_DIR);
        let unit = tree(unit_root).unwrap_or_default();

        // Files absent from their parent's module list are silently never compiled
        let undeclared: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs"))
            .filter_map(|path| {
                let file = unit_root.join(path);
                let stem = file.file_stem()?.to_str()?.to_string();
                let parent = file.parent()?.join("mod.rs");
                let declarations = fs::read_to_string(&parent).unwrap_or_default();
                let declared = declarations
                    .lines()
                    .any(|line| line.trim() == format!("mod {stem};"));
                (!declared).then(|| format!("  - {UNIT_DIR}/{path} (not in {})", parent.display()))
            })
            .collect();

        assert!(
            undeclared.is_empty(),
            "{}",
            report("Unit test files missing a mod declaration", &undeclared)
        );
    }

    #[test]
    fn test_every_test_file_contains_tests() {
        let tests_root = Path::new("tests");
        let files = tree(tests_root).unwrap_or_default();

        let empty: Vec<String> = files
            .iter()
            .filter(|path| path.ends_with(".rs") && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(tests_root.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test files without any #[test] functions", &empty)
        );
    }
}
