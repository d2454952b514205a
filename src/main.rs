use std::process::ExitCode;

use clap::Parser;

mod banner;
mod cli;
mod commands;
mod doctor;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(mode) = cli.color {
        custom_dtc_builder::set_color_mode(mode);
    }

    // Resolve the rendering capability once; everything downstream gets it
    // threaded in rather than re-probing.
    let pdf_available = custom_dtc_builder::pdf::render_support();

    match cli.command.clone() {
        Command::Create => commands::run_create(&cli),
        Command::Edit { page_size } => commands::run_edit(&cli, page_size),
        Command::List { json } => commands::run_list(&cli, json),
        Command::Export { project, theme } => {
            commands::run_export(&cli, project, theme, pdf_available)
        }
        Command::Doctor => commands::run_doctor_command(&cli, pdf_available),
    }
}
