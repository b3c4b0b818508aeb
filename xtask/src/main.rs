//! Build automation tasks for the mssql-rowset workspace.
//!
//! Run with `cargo xtask <command>`.
//!
//! ## Available Commands
//!
//! - `ci`: Run all CI checks (format, lint, test, doc)
//! - `fmt`: Check/apply code formatting
//! - `clippy`: Run clippy lints
//! - `test`: Run all tests
//! - `doc`: Generate documentation
//! - `bench`: Run benchmarks
//! - `clean`: Clean build artifacts (`--all` also clears fuzz output)
//! - `fuzz`: Run fuzz tests (requires cargo-fuzz + nightly)
//! - `dist`: Package the publishable crates
//! - `coverage`: Measure test coverage (requires cargo-llvm-cov)
//! - `semver`: Check for semver violations (requires cargo-semver-checks)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use xshell::{Shell, cmd};

/// Crates published to crates.io, in dependency order.
const PUBLISHED: [&str; 3] = ["rowset-protocol", "rowset-types", "mssql-rowset"];

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for mssql-rowset")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all checks (format, lint, test, doc)
    Ci,
    /// Run cargo fmt (--check by default, --fix to apply)
    Fmt {
        /// Apply formatting fixes
        #[arg(long)]
        fix: bool,
    },
    /// Run clippy with all features
    Clippy {
        /// Apply clippy suggestions
        #[arg(long)]
        fix: bool,
    },
    /// Run all tests
    Test {
        /// Test a specific package
        #[arg(short, long)]
        package: Option<String>,
        /// Also run with default features only
        #[arg(long)]
        default_features: bool,
    },
    /// Generate documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// Run benchmarks
    Bench {
        /// Benchmark filter pattern
        filter: Option<String>,
    },
    /// Remove build artifacts
    Clean {
        /// Also remove fuzz artifacts and coverage output
        #[arg(long)]
        all: bool,
    },
    /// Run fuzz tests (requires cargo-fuzz + nightly)
    Fuzz {
        /// Fuzz target to run
        #[arg(default_value = "decode_buffer")]
        target: String,
        /// Maximum runtime in seconds
        #[arg(long, default_value = "60")]
        max_time: u64,
        /// List available fuzz targets
        #[arg(long)]
        list: bool,
    },
    /// Package the publishable crates
    Dist {
        /// Skip running tests before packaging
        #[arg(long)]
        no_test: bool,
    },
    /// Measure test coverage (requires cargo-llvm-cov)
    Coverage {
        /// Report format
        #[arg(long, value_enum, default_value_t = CoverageFormat::Html)]
        format: CoverageFormat,
    },
    /// Check for semver violations (requires cargo-semver-checks)
    Semver,
}

#[derive(Clone, Copy, ValueEnum)]
enum CoverageFormat {
    Html,
    Lcov,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    // Change to workspace root
    let workspace_root = workspace_root()?;
    sh.change_dir(&workspace_root);

    match cli.command {
        Command::Ci => {
            println!("Running CI checks...");
            fmt(&sh, false)?;
            clippy(&sh, false)?;
            test(&sh, None, true)?;
            doc(&sh, false)?;
            println!("\n✅ All CI checks passed!");
        }
        Command::Fmt { fix } => fmt(&sh, fix)?,
        Command::Clippy { fix } => clippy(&sh, fix)?,
        Command::Test {
            package,
            default_features,
        } => test(&sh, package.as_deref(), default_features)?,
        Command::Doc { open } => doc(&sh, open)?,
        Command::Bench { filter } => bench(&sh, filter.as_deref())?,
        Command::Clean { all } => clean(&sh, all)?,
        Command::Fuzz {
            target,
            max_time,
            list,
        } => fuzz(&sh, &target, max_time, list)?,
        Command::Dist { no_test } => dist(&sh, no_test)?,
        Command::Coverage { format } => coverage(&sh, format)?,
        Command::Semver => semver(&sh)?,
    }

    Ok(())
}

fn workspace_root() -> Result<PathBuf> {
    let output = std::process::Command::new("cargo")
        .args(["locate-project", "--workspace", "--message-format=plain"])
        .output()
        .context("failed to run cargo locate-project")?;

    let path = String::from_utf8(output.stdout)
        .context("invalid UTF-8 in cargo output")?
        .trim()
        .to_string();

    Ok(PathBuf::from(path)
        .parent()
        .context("failed to get workspace root")?
        .to_path_buf())
}

fn fmt(sh: &Shell, fix: bool) -> Result<()> {
    let check: &[&str] = if fix { &[] } else { &["--", "--check"] };
    println!("cargo fmt {}", if fix { "(apply)" } else { "(check)" });
    cmd!(sh, "cargo fmt --all {check...}").run()?;
    println!("✅ fmt");
    Ok(())
}

fn clippy(sh: &Shell, fix: bool) -> Result<()> {
    let mode: &[&str] = if fix {
        &["--fix", "--allow-dirty"]
    } else {
        &["--", "-D", "warnings"]
    };
    println!("cargo clippy {}", if fix { "(fix)" } else { "(deny warnings)" });
    cmd!(sh, "cargo clippy --workspace --all-features --all-targets {mode...}").run()?;
    println!("✅ clippy");
    Ok(())
}

fn test(sh: &Shell, package: Option<&str>, default_features: bool) -> Result<()> {
    println!("Running tests...");

    let mut args = vec!["test"];
    if let Some(pkg) = package {
        args.push("-p");
        args.push(pkg);
    }
    let args = &args;

    cmd!(sh, "cargo {args...} --all-features").run()?;

    // The serde and decimal paths are feature-gated; make sure the crates
    // still build and pass without them.
    if default_features {
        cmd!(sh, "cargo {args...} --no-default-features").run()?;
    }

    println!("✅ All tests passed.");
    Ok(())
}

fn doc(sh: &Shell, open: bool) -> Result<()> {
    println!("Generating documentation...");
    if open {
        cmd!(sh, "cargo doc --all-features --no-deps --open").run()?;
    } else {
        cmd!(sh, "cargo doc --all-features --no-deps").run()?;
    }
    println!("✅ Documentation generated.");
    Ok(())
}

fn bench(sh: &Shell, filter: Option<&str>) -> Result<()> {
    println!("Running benchmarks...");
    if let Some(f) = filter {
        cmd!(sh, "cargo bench -- {f}").run()?;
    } else {
        cmd!(sh, "cargo bench").run()?;
    }
    Ok(())
}

fn clean(sh: &Shell, all: bool) -> Result<()> {
    println!("Cleaning build artifacts...");
    cmd!(sh, "cargo clean").run()?;

    if all {
        let fuzz_dir = sh.current_dir().join("fuzz");
        for dir in ["target", "artifacts", "coverage"] {
            let path = fuzz_dir.join(dir);
            if path.exists() {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
            }
        }
    }

    println!("✅ Clean complete.");
    Ok(())
}

fn fuzz(sh: &Shell, target: &str, max_time: u64, list: bool) -> Result<()> {
    let fuzz_dir = sh.current_dir().join("fuzz");
    let targets_dir = fuzz_dir.join("fuzz_targets");

    if !targets_dir.exists() {
        bail!("Fuzz targets not found in {}", targets_dir.display());
    }

    if list {
        println!("Available fuzz targets:");
        for entry in fs::read_dir(&targets_dir)? {
            let entry = entry?;
            if let Some(name) = entry.path().file_stem() {
                println!("  - {}", name.to_string_lossy());
            }
        }
        return Ok(());
    }

    println!("Running fuzz target: {target}");
    println!("Max time: {max_time} seconds");

    // cargo-fuzz requires nightly
    let max_time_str = max_time.to_string();
    let _dir = sh.push_dir(&fuzz_dir);
    cmd!(
        sh,
        "cargo +nightly fuzz run {target} -- -max_total_time={max_time_str}"
    )
    .run()?;

    Ok(())
}

fn dist(sh: &Shell, no_test: bool) -> Result<()> {
    println!("Packaging crates...");

    if !no_test {
        println!("Running tests before packaging...");
        test(sh, None, false)?;
    }

    for crate_name in PUBLISHED {
        cmd!(sh, "cargo package -p {crate_name} --allow-dirty").run()?;
    }

    println!("✅ Distribution artifacts built.");
    println!("   Packages: target/package/");

    Ok(())
}

fn coverage(sh: &Shell, format: CoverageFormat) -> Result<()> {
    println!("Running code coverage...");

    // xtask itself only shells out; keep it out of the report.
    let base = ["llvm-cov", "--workspace", "--all-features", "--exclude", "xtask"];
    match format {
        CoverageFormat::Html => {
            cmd!(sh, "cargo {base...} --html").run()?;
            println!("✅ Coverage report: target/llvm-cov/html/index.html");
        }
        CoverageFormat::Lcov => {
            cmd!(sh, "cargo {base...} --lcov --output-path target/lcov.info").run()?;
            println!("✅ Coverage report: target/lcov.info");
        }
        CoverageFormat::Json => {
            cmd!(sh, "cargo {base...} --json --output-path target/coverage.json").run()?;
            println!("✅ Coverage report: target/coverage.json");
        }
    }

    Ok(())
}

fn semver(sh: &Shell) -> Result<()> {
    println!("Checking for semver violations...");

    for crate_name in PUBLISHED {
        println!("  Checking {crate_name}...");
        cmd!(sh, "cargo semver-checks check-release -p {crate_name}").run()?;
    }

    println!("✅ No semver violations detected.");
    Ok(())
}
