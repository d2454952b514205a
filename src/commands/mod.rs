use std::io;
use std::process::ExitCode;

use custom_dtc_builder::browse::select_paginated;
use custom_dtc_builder::editor::{collect_new_record, edit_record, EditOutcome};
use custom_dtc_builder::errors::exit_code_for_store_error;
use custom_dtc_builder::prompt::StdinPrompt;
use custom_dtc_builder::store::CatalogStore;
use custom_dtc_builder::{
    color_enabled_stderr, log_error_stderr, log_info_stderr, log_warn_stderr,
};

use crate::banner::print_startup_banner;
use crate::cli::Cli;
use crate::doctor;

fn store_for(cli: &Cli) -> CatalogStore {
    CatalogStore::resolve(cli.file.as_deref())
}

/// Prompt flows surface closed stdin as `UnexpectedEof`; report it as an
/// abort, not a crash.
fn report_prompt_error(use_err: bool, e: &io::Error) {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        log_warn_stderr(use_err, "custom-dtc-builder: input closed; nothing was saved.");
    } else {
        log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
    }
}

pub(crate) fn run_create(cli: &Cli) -> ExitCode {
    if !cli.quiet {
        print_startup_banner();
    }
    let use_err = color_enabled_stderr();
    let store = store_for(cli);

    let mut prompt = StdinPrompt;
    let record = match collect_new_record(&mut prompt) {
        Ok(r) => r,
        Err(e) => {
            report_prompt_error(use_err, &e);
            return ExitCode::from(1);
        }
    };

    let mut records = match store.load() {
        Ok(r) => r,
        Err(e) => {
            log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
            return ExitCode::from(exit_code_for_store_error(&e));
        }
    };
    let code = record.code.clone();
    records.push(record);
    if let Err(e) = store.save(&records) {
        log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
        return ExitCode::from(exit_code_for_store_error(&e));
    }
    println!();
    println!("DTC {code} saved successfully!");
    ExitCode::from(0)
}

pub(crate) fn run_edit(cli: &Cli, page_size: usize) -> ExitCode {
    if !cli.quiet {
        print_startup_banner();
    }
    let use_err = color_enabled_stderr();
    let store = store_for(cli);

    let mut records = match store.load() {
        Ok(r) => r,
        Err(e) => {
            log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
            return ExitCode::from(exit_code_for_store_error(&e));
        }
    };
    if records.is_empty() {
        println!("No DTCs found. Load or create some first.");
        return ExitCode::from(0);
    }

    let mut prompt = StdinPrompt;
    let index = match select_paginated(&records, page_size, &mut prompt) {
        Ok(Some(i)) => i,
        Ok(None) => {
            println!("Edit cancelled.");
            return ExitCode::from(0);
        }
        Err(e) => {
            report_prompt_error(use_err, &e);
            return ExitCode::from(1);
        }
    };

    match edit_record(&records[index], &mut prompt) {
        Ok(EditOutcome::Committed(draft)) => {
            let code = draft.code.clone();
            records[index] = draft;
            if let Err(e) = store.save(&records) {
                log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
                return ExitCode::from(exit_code_for_store_error(&e));
            }
            println!();
            println!("DTC {code} updated successfully!");
            ExitCode::from(0)
        }
        Ok(EditOutcome::Cancelled) => {
            println!("Edit cancelled.");
            ExitCode::from(0)
        }
        Err(e) => {
            report_prompt_error(use_err, &e);
            ExitCode::from(1)
        }
    }
}

pub(crate) fn run_list(cli: &Cli, json: bool) -> ExitCode {
    let use_err = color_enabled_stderr();
    let store = store_for(cli);
    let records = match store.load() {
        Ok(r) => r,
        Err(e) => {
            log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
            return ExitCode::from(exit_code_for_store_error(&e));
        }
    };

    if json {
        match serde_json::to_string_pretty(&records) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
                return ExitCode::from(1);
            }
        }
        return ExitCode::from(0);
    }

    log_info_stderr(
        use_err,
        &format!(
            "custom-dtc-builder: {} record(s) in {}",
            records.len(),
            store.path().display()
        ),
    );
    for record in &records {
        let title = if record.title.is_empty() {
            "Untitled"
        } else {
            record.title.as_str()
        };
        println!("{} - {}", record.code, title);
    }
    ExitCode::from(0)
}

pub(crate) fn run_export(
    cli: &Cli,
    project: Option<String>,
    theme: custom_dtc_builder::pdf::PdfTheme,
    pdf_available: bool,
) -> ExitCode {
    if !cli.quiet {
        print_startup_banner();
    }
    let use_err = color_enabled_stderr();
    if !pdf_available {
        log_error_stderr(
            use_err,
            "custom-dtc-builder: PDF export is disabled in this build (compiled without the `pdf` feature).",
        );
        return ExitCode::from(1);
    }

    let store = store_for(cli);
    let records = match store.load() {
        Ok(r) => r,
        Err(e) => {
            log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
            return ExitCode::from(exit_code_for_store_error(&e));
        }
    };
    if records.is_empty() {
        println!("No DTCs found. Please create or load DTCs first.");
        return ExitCode::from(1);
    }

    let project = match project {
        Some(p) if !p.trim().is_empty() => p.trim().to_string(),
        Some(_) => "Unnamed Project".to_string(),
        None => {
            let mut prompt = StdinPrompt;
            use custom_dtc_builder::prompt::PromptSource;
            match prompt.prompt_line("Enter Project/Application Name: ") {
                Ok(line) if !line.trim().is_empty() => line.trim().to_string(),
                Ok(_) => "Unnamed Project".to_string(),
                Err(e) => {
                    report_prompt_error(use_err, &e);
                    return ExitCode::from(1);
                }
            }
        }
    };

    #[cfg(feature = "pdf")]
    {
        let bytes = match custom_dtc_builder::pdf::render_catalog(&records, &project, theme) {
            Ok(b) => b,
            Err(e) => {
                log_error_stderr(use_err, &format!("custom-dtc-builder: {e}"));
                return ExitCode::from(1);
            }
        };
        let file_name = custom_dtc_builder::pdf::output_file_name(&project);
        if let Err(e) = std::fs::write(&file_name, bytes) {
            log_error_stderr(
                use_err,
                &format!("custom-dtc-builder: failed to write {file_name}: {e}"),
            );
            return ExitCode::from(1);
        }
        println!();
        println!("PDF generated successfully: {file_name}");
        ExitCode::from(0)
    }
    #[cfg(not(feature = "pdf"))]
    {
        let _ = (records, project, theme);
        ExitCode::from(1)
    }
}

pub(crate) fn run_doctor_command(cli: &Cli, pdf_available: bool) -> ExitCode {
    if !cli.quiet {
        print_startup_banner();
    }
    doctor::run_doctor(&store_for(cli), pdf_available);
    ExitCode::from(0)
}
