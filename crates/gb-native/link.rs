//! Link directive selection for the `link` feature, shared by `build.rs`
//! and the crate's unit tests.

/// Value for `cargo:rustc-link-lib`.
///
/// A blank `value` counts as unset and picks the default for `target_os`.
/// A value that already names a kind (`static=openblas`,
/// `framework=Accelerate`) is used verbatim; a bare name links as `dylib`.
pub fn link_lib(value: Option<&str>, target_os: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) if v.contains('=') => v.to_string(),
        Some(v) => format!("dylib={}", v),
        None => default_link_lib(target_os).to_string(),
    }
}

fn default_link_lib(target_os: &str) -> &'static str {
    match target_os {
        "windows" => "dylib=mkl_rt",
        "macos" => "framework=Accelerate",
        _ => "dylib=cblas",
    }
}

/// Library name from a link directive, without kind or modifiers.
pub fn link_name(lib: &str) -> &str {
    let name = lib.rsplit_once('=').map_or(lib, |(_, name)| name);
    // `dylib=foo:bar` links `foo` under the name `bar`
    name.split_once(':').map_or(name, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_os() {
        assert_eq!(link_lib(None, "linux"), "dylib=cblas");
        assert_eq!(link_lib(None, "windows"), "dylib=mkl_rt");
        assert_eq!(link_lib(None, "macos"), "framework=Accelerate");
    }

    #[test]
    fn test_blank_is_unset() {
        assert_eq!(link_lib(Some(""), "linux"), "dylib=cblas");
        assert_eq!(link_lib(Some("  "), "macos"), "framework=Accelerate");
    }

    #[test]
    fn test_bare_name_links_dylib() {
        assert_eq!(link_lib(Some("openblas"), "linux"), "dylib=openblas");
        assert_eq!(link_lib(Some(" mkl_rt "), "windows"), "dylib=mkl_rt");
    }

    #[test]
    fn test_kind_passes_through() {
        assert_eq!(link_lib(Some("static=openblas"), "linux"), "static=openblas");
        assert_eq!(
            link_lib(Some("framework=Accelerate"), "linux"),
            "framework=Accelerate"
        );
        assert_eq!(
            link_lib(Some("static:+whole-archive=blis"), "linux"),
            "static:+whole-archive=blis"
        );
    }

    #[test]
    fn test_link_name() {
        assert_eq!(link_name("dylib=cblas"), "cblas");
        assert_eq!(link_name("framework=Accelerate"), "Accelerate");
        assert_eq!(link_name("static:+whole-archive=blis"), "blis");
        assert_eq!(link_name("dylib=openblas64_:openblas"), "openblas64_");
        assert_eq!(link_name("cblas"), "cblas");
    }
}
