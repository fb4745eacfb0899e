use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// One `cargo` invocation of the check sequence.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
    /// Failure aborts the run instead of only being reported.
    fatal: bool,
}

const STEPS: &[Step] = &[
    Step {
        label: "no_std crates (platform, library, playback, bluetooth)",
        args: &[
            "check",
            "-p",
            "platform",
            "-p",
            "library",
            "-p",
            "playback",
            "-p",
            "bluetooth",
            "--no-default-features",
        ],
        fatal: true,
    },
    Step {
        label: "playback with the MP3 decoder",
        args: &["check", "-p", "playback", "--features", "mp3"],
        fatal: true,
    },
    Step {
        label: "emulator (host)",
        args: &["check", "-p", "firmware", "--features", "emulator"],
        fatal: true,
    },
    Step {
        label: "clippy",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        fatal: false,
    },
    Step {
        label: "formatting",
        args: &["fmt", "--all", "--check"],
        fatal: false,
    },
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for step in STEPS {
        println!("{}", format!("  Checking {}...", step.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(step.args)
            .output()
            .with_context(|| format!("Failed to run cargo for {}", step.label))?;

        if output.status.success() {
            println!(
                "{}",
                format!(
                    "  ✓ {} passed in {:.2}s",
                    step.label,
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
        } else if step.fatal {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{} failed", step.label);
        } else {
            // Lint and format findings are shown, not fatal.
            eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
