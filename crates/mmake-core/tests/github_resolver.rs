//! Resolution of github.com include references.

mod support;

use mmake_core::resolver::{GithubResolver, ResolveError, Resolver};

use support::{StaticFetcher, read_to_string};

fn resolver() -> GithubResolver<StaticFetcher> {
    GithubResolver::new(StaticFetcher::new(&[
        (
            "https://raw.githubusercontent.com/user/repo/master/index.mk",
            "index.mk content",
        ),
        (
            "https://raw.githubusercontent.com/user/repo/master/bar",
            "bar content",
        ),
        (
            "https://raw.githubusercontent.com/user/repo/master/foo.mk",
            "foo.mk content",
        ),
        (
            "https://raw.githubusercontent.com/user/repo/v2/foo.mk",
            "foo.mk@v2 content",
        ),
        (
            "https://raw.githubusercontent.com/user/repo/master/baz/stuff.mk",
            "baz/stuff.mk content",
        ),
    ]))
}

#[test]
fn github_references_resolve_to_raw_content() {
    let cases = [
        ("github.com/user/repo", "index.mk content"),
        ("github.com/user/repo/bar", "bar content"),
        ("github.com/user/repo/foo.mk", "foo.mk content"),
        ("github.com/user/repo/foo.mk@v2", "foo.mk@v2 content"),
        ("github.com/user/repo/baz/stuff.mk", "baz/stuff.mk content"),
    ];

    let resolver = resolver();
    for (reference, expected) in cases {
        let content = resolver
            .get(reference)
            .unwrap_or_else(|e| panic!("{reference}: {e}"));
        assert_eq!(read_to_string(content), expected, "{reference}");
    }
}

#[test]
fn github_reference_errors() {
    let cases = [
        ("not url", "parsing include path"),
        ("bitbucket.org", "include not supported"),
        ("github.com", "user, repo required"),
        ("github.com/user", "user, repo required"),
    ];

    let resolver = resolver();
    for (reference, prefix) in cases {
        let err = resolver.get(reference).err().unwrap();
        assert!(
            err.to_string().starts_with(prefix),
            "{reference}: expected to start with {prefix:?}, got {err}"
        );
    }
}

#[test]
fn error_kinds_are_distinguishable() {
    let resolver = resolver();

    assert!(matches!(
        resolver.get("not url").err().unwrap(),
        ResolveError::Parse(_)
    ));
    assert!(resolver.get("bitbucket.org/user/repo").err().unwrap().is_not_supported());
    assert!(matches!(
        resolver.get("github.com/user").err().unwrap(),
        ResolveError::MissingField
    ));
}

#[test]
fn fetcher_sees_only_rewritten_urls() {
    let fetcher = StaticFetcher::default();
    let resolver = GithubResolver::new(&fetcher);

    let _ = resolver.get("github.com/user/repo/foo.mk@v2");
    let _ = resolver.get("gitlab.com/user/repo");
    let _ = resolver.get("github.com/user");

    assert_eq!(
        *fetcher.requested.lock().unwrap(),
        vec!["https://raw.githubusercontent.com/user/repo/v2/foo.mk"]
    );
}
