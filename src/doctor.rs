use custom_dtc_builder::CatalogStore;

/// Diagnostics: where the catalog lives, whether it loads, and which
/// capabilities this binary carries.
pub(crate) fn run_doctor(store: &CatalogStore, pdf_available: bool) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("custom-dtc-builder doctor");
    eprintln!("  version: v{version}");
    eprintln!(
        "  host: {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    eprintln!("  catalog file: {}", store.path().display());

    if store.path().exists() {
        match store.load() {
            Ok(records) => eprintln!("  catalog: {} record(s)", records.len()),
            Err(e) => eprintln!("  catalog: UNREADABLE ({e})"),
        }
    } else {
        eprintln!("  catalog: not found (treated as an empty catalog)");
    }

    eprintln!(
        "  pdf export: {}",
        if pdf_available {
            "available"
        } else {
            "disabled (built without the `pdf` feature)"
        }
    );
    eprintln!(
        "  color output: {}",
        if custom_dtc_builder::color_enabled_stderr() {
            "enabled"
        } else {
            "disabled"
        }
    );
    eprintln!("doctor: completed diagnostics.");
}
