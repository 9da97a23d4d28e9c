// ABOUTME: Packs an image build context directory into a tar archive.
// ABOUTME: Honors .dockerignore patterns, re-including the Dockerfile like the docker CLI.

use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub const IGNORE_FILE: &str = ".dockerignore";

/// Pack `root` into an uncompressed tar archive, skipping ignored paths.
///
/// The Dockerfile (`dockerfile`, or `Dockerfile`) is always sent.
pub fn pack_build_context(root: &Path, dockerfile: Option<&str>) -> io::Result<Vec<u8>> {
    let mut rules = match std::fs::read_to_string(root.join(IGNORE_FILE)) {
        Ok(text) => IgnoreRules::parse(&text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => IgnoreRules::default(),
        Err(e) => return Err(e),
    };
    rules.keep(dockerfile.unwrap_or("Dockerfile"));

    let mut archive = tar::Builder::new(Vec::new());
    archive.follow_symlinks(false);

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let name = relative.to_string_lossy().replace('\\', "/");
        if rules.is_ignored(&name) {
            continue;
        }

        if entry.file_type().is_dir() {
            archive.append_dir(relative, entry.path())?;
        } else {
            archive.append_path_with_name(entry.path(), relative)?;
        }
    }

    archive.into_inner()
}

// =============================================================================
// Ignore rules
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    segments: Vec<String>,
    exception: bool,
}

/// `.dockerignore` rules; the last matching rule decides.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

impl IgnoreRules {
    pub fn parse(text: &str) -> Self {
        let rules = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (exception, pattern) = match line.strip_prefix('!') {
                    Some(rest) => (true, rest.trim()),
                    None => (false, line),
                };
                let segments = clean(pattern);
                (!segments.is_empty()).then_some(Rule {
                    segments,
                    exception,
                })
            })
            .collect();
        Self { rules }
    }

    /// Re-include `path` whatever earlier rules say.
    pub fn keep(&mut self, path: &str) {
        let segments = clean(path);
        if !segments.is_empty() {
            self.rules.push(Rule {
                segments,
                exception: true,
            });
        }
    }

    /// Whether the slash-separated relative `path` stays out of the archive.
    ///
    /// A rule matching a parent directory matches everything below it.
    pub fn is_ignored(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let mut ignored = false;
        for rule in &self.rules {
            let hit = (1..=parts.len()).any(|len| matches_path(&rule.segments, &parts[..len]));
            if hit {
                ignored = !rule.exception;
            }
        }
        ignored
    }
}

/// Lexically clean a pattern into path segments.
fn clean(pattern: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for part in pattern.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }
    segments
}

fn matches_path(pattern: &[String], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((first, rest)) if first == "**" => {
            (0..=path.len()).any(|skip| matches_path(rest, &path[skip..]))
        }
        Some((first, rest)) => match path.split_first() {
            Some((name, remaining)) => {
                let pattern: Vec<char> = first.chars().collect();
                let name: Vec<char> = name.chars().collect();
                matches_segment(&pattern, &name) && matches_path(rest, remaining)
            }
            None => false,
        },
    }
}

/// Shell-style match of one path segment: `*`, `?`, `[...]` and `\` escapes.
fn matches_segment(pattern: &[char], name: &[char]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some(('*', rest)) => (0..=name.len()).any(|skip| matches_segment(rest, &name[skip..])),
        Some(('?', rest)) => !name.is_empty() && matches_segment(rest, &name[1..]),
        Some(('[', rest)) => {
            let Some((&c, remaining)) = name.split_first() else {
                return false;
            };
            match class_match(rest, c) {
                Some((true, after)) => matches_segment(after, remaining),
                Some((false, _)) => false,
                // Unterminated class matches a literal bracket.
                None => c == '[' && matches_segment(rest, remaining),
            }
        }
        Some(('\\', rest)) if !rest.is_empty() => {
            name.first() == Some(&rest[0]) && matches_segment(&rest[1..], &name[1..])
        }
        Some((p, rest)) => name.first() == Some(p) && matches_segment(rest, &name[1..]),
    }
}

/// Match `c` against the class body after `[`; returns the result and the
/// pattern following `]`.
fn class_match(body: &[char], c: char) -> Option<(bool, &[char])> {
    let (negated, mut rest) = match body.first() {
        Some('^' | '!') => (true, &body[1..]),
        _ => (false, body),
    };
    let mut matched = false;
    let mut first = true;
    loop {
        let (&lo, after) = rest.split_first()?;
        if lo == ']' && !first {
            return Some((matched != negated, after));
        }
        first = false;
        match after {
            ['-', hi, tail @ ..] if *hi != ']' => {
                matched |= lo <= c && c <= *hi;
                rest = tail;
            }
            _ => {
                matched |= lo == c;
                rest = after;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(archive: &[u8]) -> Vec<String> {
        tar::Archive::new(archive)
            .entries()
            .unwrap()
            .map(|entry| {
                entry
                    .unwrap()
                    .path()
                    .unwrap()
                    .display()
                    .to_string()
                    .trim_end_matches('/')
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn context_is_packed_as_tar() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}\n").unwrap();

        let archive = pack_build_context(dir.path(), None).unwrap();
        assert_eq!(names(&archive), vec!["Dockerfile", "src", "src/main.rs"]);
    }

    #[test]
    fn missing_context_is_an_io_error() {
        assert!(pack_build_context(Path::new("/definitely/not/here"), None).is_err());
    }

    #[test]
    fn dockerignore_excludes_matching_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(IGNORE_FILE),
            "# build output\ntarget\n**/*.log\n!keep.log\nDockerfile\n",
        )
        .unwrap();
        fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        fs::write(dir.path().join("keep.log"), "").unwrap();
        fs::write(dir.path().join("debug.log"), "").unwrap();
        fs::create_dir_all(dir.path().join("target/release")).unwrap();
        fs::write(dir.path().join("target/release/app"), "").unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        fs::write(dir.path().join("logs/today.log"), "").unwrap();

        let archive = pack_build_context(dir.path(), None).unwrap();
        assert_eq!(
            names(&archive),
            vec![".dockerignore", "Dockerfile", "keep.log", "logs"]
        );
    }

    #[test]
    fn custom_dockerfile_is_always_sent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), "*\n").unwrap();
        fs::create_dir(dir.path().join("docker")).unwrap();
        fs::write(dir.path().join("docker/app.Dockerfile"), "FROM scratch\n").unwrap();

        let archive = pack_build_context(dir.path(), Some("docker/app.Dockerfile")).unwrap();
        assert_eq!(names(&archive), vec!["docker/app.Dockerfile"]);
    }

    #[test]
    fn rules_follow_last_match() {
        let rules = IgnoreRules::parse("docs\n!docs/README.md\n/tmp/*\n");
        assert!(rules.is_ignored("docs"));
        assert!(rules.is_ignored("docs/guide.md"));
        assert!(!rules.is_ignored("docs/README.md"));
        assert!(rules.is_ignored("tmp/scratch"));
        assert!(!rules.is_ignored("tmp"));
        assert!(!rules.is_ignored("src/docs.rs"));
    }

    #[test]
    fn segment_wildcards() {
        let rules = IgnoreRules::parse("file?.txt\n[a-c]*.bin\n[!x]y\n");
        assert!(rules.is_ignored("file1.txt"));
        assert!(!rules.is_ignored("file10.txt"));
        assert!(rules.is_ignored("beta.bin"));
        assert!(!rules.is_ignored("delta.bin"));
        assert!(rules.is_ignored("zy"));
        assert!(!rules.is_ignored("xy"));
    }
}
