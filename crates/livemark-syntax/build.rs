//! Expands every `tests/fixtures/<name>.md` into a module of replay tests,
//! one per fragment size, so a failure names both the fixture and the split.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

const FIXTURE_DIR: &str = "tests/fixtures";

/// Test name and the fragment size it replays with.
const REPLAYS: [(&str, &str); 5] = [
    ("single_chars", "1"),
    ("pairs", "2"),
    ("triples", "3"),
    ("sevens", "7"),
    ("whole", "usize::MAX"),
];

fn fixture_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "md")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn render_cases(names: &[String]) -> String {
    let mut code = String::from("mod fixture_cases {\n");
    for name in names {
        let _ = writeln!(code, "    mod {name} {{");
        let _ = writeln!(code, "        use super::super::fixture_test;");
        for (test, chunk_size) in REPLAYS {
            let _ = writeln!(code, "        #[test]");
            let _ = writeln!(
                code,
                "        fn {test}() {{ fixture_test({name:?}, {chunk_size}); }}"
            );
        }
        let _ = writeln!(code, "    }}");
    }
    code.push_str("}\n");
    code
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);

    let names = fixture_names(Path::new(FIXTURE_DIR))?;
    std::fs::write(out_dir.join("fixture_tests.rs"), render_cases(&names))?;

    println!("cargo::rerun-if-changed={FIXTURE_DIR}");
    Ok(())
}
