use std::path::PathBuf;

use clap::{Parser, Subcommand};

use custom_dtc_builder::browse::DEFAULT_PAGE_SIZE;
use custom_dtc_builder::pdf::PdfTheme;
use custom_dtc_builder::ColorMode;

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Create a new DTC interactively and append it to the catalog
    Create,

    /// Pick an existing DTC from the catalog and edit its fields
    Edit {
        /// Records shown per selection page
        #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Print the catalog to stdout
    List {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the catalog to a paginated PDF reference sheet
    Export {
        /// Project/application name stamped on the document (prompted when omitted)
        #[arg(long)]
        project: Option<String>,

        /// Color preset: grayscale, borders, or color
        #[arg(long, value_enum, default_value_t = PdfTheme::Grayscale)]
        theme: PdfTheme,
    },

    /// Run diagnostics to check environment and configuration
    Doctor,
}

#[derive(Parser, Debug)]
#[command(
    name = "custom-dtc-builder",
    version,
    about = "Create, edit and export a catalog of user-defined diagnostic trouble codes (DTCs).",
    after_long_help = "Examples:\n  custom-dtc-builder create\n  custom-dtc-builder edit --page-size 10\n  custom-dtc-builder list --json\n  custom-dtc-builder export --project \"69 Mustang EV swap\" --theme color\n"
)]
pub(crate) struct Cli {
    /// Catalog file (JSON). Defaults to $CUSTOM_DTC_FILE, then ./custom_dtcs.json
    #[arg(long, short = 'f', global = true)]
    pub(crate) file: Option<PathBuf>,

    /// Colorize stderr output: auto|always|never
    #[arg(long, value_enum, global = true)]
    pub(crate) color: Option<ColorMode>,

    /// Suppress the startup banner
    #[arg(long, short = 'q', global = true)]
    pub(crate) quiet: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}
