use std::process::Command;

/// Trimmed stdout of `program args`, if it ran and succeeded.
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    let stamps = [
        ("CHATBOT_AUDIO_GIT_HASH", capture("git", &["rev-parse", "--short", "HEAD"])),
        ("CHATBOT_AUDIO_BUILD_DATE", capture("date", &["-u", "+%Y-%m-%d"])),
    ];
    for (key, value) in stamps {
        let value = value.as_deref().unwrap_or("unknown");
        println!("cargo:rustc-env={key}={value}");
    }

    for watched in [".git/HEAD", ".git/refs/"] {
        println!("cargo:rerun-if-changed={watched}");
    }
}
