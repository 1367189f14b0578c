#[path = "link.rs"]
#[allow(dead_code)]
mod link;

fn main() {
    println!("cargo:rerun-if-env-changed=GB_BLAS_LINK");
    println!("cargo:rerun-if-env-changed=GB_BLAS_LINK_SEARCH");
    println!("cargo:rerun-if-changed=link.rs");

    if std::env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let value = std::env::var("GB_BLAS_LINK").ok();
    let lib = link::link_lib(value.as_deref(), &target_os);

    if let Ok(dir) = std::env::var("GB_BLAS_LINK_SEARCH") {
        if !dir.trim().is_empty() {
            println!("cargo:rustc-link-search=native={}", dir.trim());
        }
    }
    println!("cargo:rustc-link-lib={}", lib);
    println!("cargo:rustc-env=GB_BLAS_LINK_NAME={}", link::link_name(&lib));
}
