//! Include directive scanning.

const DIRECTIVES: [&str; 3] = ["include", "-include", "sinclude"];

/// One reference named by an include directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub reference: String,
    /// 1-based line of the directive
    pub line: usize,
    /// `-include` / `sinclude`: make ignores a missing file
    pub optional: bool,
}

impl Include {
    /// True when the reference names a remote host rather than a local file.
    ///
    /// `github.com/tj/mmake` and `https://example.com/x.mk` are remote;
    /// `rules.mk`, `build/rules.mk` and `./x.mk` are not.
    pub fn is_remote(&self) -> bool {
        if self.reference.contains("://") {
            return true;
        }
        match self.reference.split_once('/') {
            Some((host, _)) => host.contains('.') && !host.starts_with('.'),
            None => false,
        }
    }
}

/// Find every include reference in Makefile `text`.
///
/// Continuation lines are joined, recipe lines and comments are ignored, and
/// references built from make variables are skipped.
pub fn parse_includes(text: &str) -> Vec<Include> {
    let mut includes = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, first)) = lines.next() {
        let mut logical = first.to_string();
        while logical.ends_with('\\') {
            logical.pop();
            match lines.next() {
                Some((_, next)) => {
                    logical.push(' ');
                    logical.push_str(next);
                }
                None => break,
            }
        }

        if logical.starts_with('\t') {
            continue;
        }

        let code = match logical.split_once('#') {
            Some((code, _)) => code,
            None => &logical,
        };

        let mut words = code.split_whitespace();
        let Some(directive) = words.next() else {
            continue;
        };
        if !DIRECTIVES.contains(&directive) {
            continue;
        }

        let optional = directive != "include";
        includes.extend(
            words
                .filter(|word| !word.contains('$'))
                .map(|word| Include {
                    reference: word.to_string(),
                    line: index + 1,
                    optional,
                }),
        );
    }

    includes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references(text: &str) -> Vec<String> {
        parse_includes(text)
            .into_iter()
            .map(|include| include.reference)
            .collect()
    }

    #[test]
    fn finds_plain_includes() {
        let text = "include github.com/tj/mmake/help.mk\n\nall:\n\techo hi\n";
        let includes = parse_includes(text);

        assert_eq!(
            includes,
            vec![Include {
                reference: "github.com/tj/mmake/help.mk".to_string(),
                line: 1,
                optional: false,
            }]
        );
    }

    #[test]
    fn multiple_references_per_line() {
        assert_eq!(
            references("include a.mk github.com/a/b\n"),
            vec!["a.mk", "github.com/a/b"]
        );
    }

    #[test]
    fn optional_directives() {
        let includes = parse_includes("-include github.com/a/b\nsinclude c.mk\n");
        assert_eq!(includes.len(), 2);
        assert!(includes.iter().all(|include| include.optional));
        assert_eq!(includes[1].line, 2);
    }

    #[test]
    fn ignores_comments_recipes_and_variables() {
        let text = "\
# include github.com/commented/out
include github.com/a/b # trailing comment github.com/c/d
\tinclude github.com/in/recipe
include $(SHARED)/x.mk github.com/e/f
included: github.com/not/directive
";
        assert_eq!(references(text), vec!["github.com/a/b", "github.com/e/f"]);
    }

    #[test]
    fn joins_continuation_lines() {
        let text = "include github.com/a/b \\\n\tgithub.com/c/d\ninclude e.mk\n";
        let includes = parse_includes(text);

        assert_eq!(
            includes.iter().map(|i| i.reference.as_str()).collect::<Vec<_>>(),
            vec!["github.com/a/b", "github.com/c/d", "e.mk"]
        );
        assert_eq!(includes[1].line, 1);
        assert_eq!(includes[2].line, 3);
    }

    #[test]
    fn remote_detection() {
        let include = |reference: &str| Include {
            reference: reference.to_string(),
            line: 1,
            optional: false,
        };

        assert!(include("github.com/tj/mmake").is_remote());
        assert!(include("github.com/tj/mmake/help.mk@v1").is_remote());
        assert!(include("https://example.com/x.mk").is_remote());
        assert!(!include("rules.mk").is_remote());
        assert!(!include("build/rules.mk").is_remote());
        assert!(!include("./x.mk").is_remote());
        assert!(!include("../shared/x.mk").is_remote());
    }
}
