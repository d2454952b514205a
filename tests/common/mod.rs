use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Path to the built binary under test.
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_custom-dtc-builder")
}

/// Run the binary with `args`, optionally piping `stdin_data`, with the
/// given working directory.
#[allow(dead_code)]
pub fn run_in(dir: &Path, args: &[&str], stdin_data: Option<&str>) -> Output {
    let mut cmd = Command::new(bin());
    cmd.args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("failed to spawn custom-dtc-builder");
    if let Some(data) = stdin_data {
        child
            .stdin
            .as_mut()
            .expect("stdin handle")
            .write_all(data.as_bytes())
            .expect("write stdin");
    }
    drop(child.stdin.take());
    child.wait_with_output().expect("wait for custom-dtc-builder")
}

#[allow(dead_code)]
pub fn stdout_str(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[allow(dead_code)]
pub fn stderr_str(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

/// A one-record catalog in the on-disk format.
#[allow(dead_code)]
pub const ONE_RECORD_CATALOG: &str = r#"[
    {
        "code": "U4001",
        "header": "Network",
        "category": "Communication Systems",
        "title": "CAN bus offline",
        "description": "No traffic seen on the custom CAN segment",
        "possible_fixes": [
            "Check termination resistors",
            "Reseat bus connector"
        ],
        "pinpoint_test": "PP-014"
    }
]
"#;
