use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the route sampler workspace",
    long_about = "A unified CLI for running the sampler, benchmarks,\n\
                  and CI checks in the route sampler workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample the route between two coordinates with the release binary
    Run {
        /// Start of the route as "lat,lon"
        #[arg(long, allow_hyphen_values = true, default_value = "26.8323,80.9214")]
        origin: String,
        /// End of the route as "lat,lon"
        #[arg(long, allow_hyphen_values = true, default_value = "26.8426,80.9228")]
        destination: String,
        /// Target spacing in kilometres
        #[arg(long, default_value_t = 0.05)]
        frequency: f64,
        /// Directions provider (osrm or google)
        #[arg(long, default_value = "osrm")]
        provider: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build without the HTTP providers
    Offline,
    /// Run benchmarks
    Bench,
    /// Run check + offline + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn bench_args<'a>(extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["bench", "--package", "sampler_core", "--bench", "resample"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    args
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test sampler_core");
    run_cargo(&["test", "-p", "sampler_core"]);

    step("Test sampler_cli");
    run_cargo(&["test", "-p", "sampler_cli"]);
}

fn ci_offline() {
    step("Test sampler_core without HTTP providers");
    run_cargo(&[
        "test",
        "-p",
        "sampler_core",
        "--no-default-features",
        "--features",
        "test-helpers",
    ]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&bench_args(&[]));
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            origin,
            destination,
            frequency,
            provider,
        } => {
            let frequency = frequency.to_string();
            run_cargo(&[
                "run",
                "-p",
                "sampler_cli",
                "--release",
                "--",
                "--origin",
                &origin,
                "--destination",
                &destination,
                "--frequency",
                &frequency,
                "--provider",
                &provider,
            ]);
        }
        Commands::Bench => {
            run_cargo(&bench_args(&[]));
        }
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_cargo(&bench_args(&["--save-baseline", "main"]));

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_cargo(&bench_args(&["--baseline", "main"]));

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Offline => ci_offline(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_offline();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
