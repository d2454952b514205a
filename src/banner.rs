pub(crate) fn print_startup_banner() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!();
    eprintln!("──────────────────────────────────────────────────────────────────────────────");
    eprintln!(" 🔧  Custom DTC Builder v{version}  -  synthetic trouble codes for custom builds  🚗");
    eprintln!("──────────────────────────────────────────────────────────────────────────────");
    eprintln!(" 📋 Catalog in flat JSON  |  📄 PDF reference sheets  |  🦀 Powered by Rust");
    eprintln!(
        "    Github: {}",
        custom_dtc_builder::pdf::REPO_LINK
    );
    eprintln!(
        "    Youtube/TikTok: {}",
        custom_dtc_builder::pdf::YOUTUBE_LINK
    );
    eprintln!("──────────────────────────────────────────────────────────────────────────────");
    eprintln!();
}
