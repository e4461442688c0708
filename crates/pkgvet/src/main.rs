use clap::{Parser, Subcommand};
use colored::*;
use evaluator::ShellEvaluator;
use std::path::{Path, PathBuf};
use validators::Package;

#[derive(Debug, Parser)]
#[command(
    name = "pkgvet",
    about = "PKGBUILD validator and inspector",
    version,
    long_about = "Extracts the metadata declared by a PKGBUILD (plain file or source tarball)\nand checks it against repository policy.\n\nExamples:\n  pkgvet validate                       # Validate the PKGBUILD in the current directory\n  pkgvet validate zsh-5.9.tar.gz        # Validate a descriptor inside a source archive\n  pkgvet inspect PKGBUILD               # Show the extracted fields\n  pkgvet inspect --json PKGBUILD        # Same, as JSON for scripting"
)]
struct Pkgvet {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode with detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode with extensive extraction details
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to the evaluator script (overrides PKGVET_EVALUATOR and PATH lookup)
    #[arg(long, global = true)]
    evaluator: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate PKGBUILD files or source archives
    Validate {
        /// Paths to PKGBUILD files, source archives or package directories
        /// (defaults to the current directory)
        paths: Vec<PathBuf>,
    },

    /// Print the fields extracted from a PKGBUILD
    Inspect {
        /// Path to a PKGBUILD file, source archive or package directory
        path: PathBuf,

        /// Emit the field mapping as a JSON object
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Pkgvet::parse();

    // Set log level based on command line flags
    if cli.debug {
        logging::set_log_level(logging::LogLevel::Debug);
        logging::debug("Debug mode enabled - showing detailed logs");
    } else if cli.verbose {
        logging::set_log_level(logging::LogLevel::Info);
        logging::info("Verbose mode enabled");
    } else {
        logging::set_log_level(logging::LogLevel::Warning);
    }

    let evaluator = match &cli.evaluator {
        Some(script) => ShellEvaluator::with_script(script),
        None => ShellEvaluator::new().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
    };

    match &cli.command {
        Commands::Validate { paths } => {
            let paths = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths.clone()
            };
            if !validate_paths(&paths, &evaluator) {
                std::process::exit(1);
            }
        }

        Commands::Inspect { path, json } => {
            if !inspect_path(path, &evaluator, *json) {
                std::process::exit(1);
            }
        }
    }
}

fn load(path: &Path, evaluator: &ShellEvaluator) -> Option<Package> {
    let input = match utils::resolve_descriptor_input(path) {
        Some(input) => input,
        None => {
            eprintln!(
                "{} {}: no PKGBUILD found at this path",
                "✗".red(),
                path.display()
            );
            return None;
        }
    };

    match parser::load_package_with(&input, evaluator) {
        Ok(descriptor) => Some(Package::new(descriptor)),
        Err(e) => {
            eprintln!("{} {}: {}", "✗".red(), input.display(), e);
            None
        }
    }
}

fn validate_paths(paths: &[PathBuf], evaluator: &ShellEvaluator) -> bool {
    let mut all_valid = true;

    for path in paths {
        let package = match load(path, evaluator) {
            Some(package) => package,
            None => {
                all_valid = false;
                continue;
            }
        };

        if package.is_valid() {
            println!("{} {}: valid", "✓".green(), path.display());
        } else {
            all_valid = false;
            println!("{} {}: invalid", "✗".red(), path.display());
        }
        for error in package.errors() {
            println!("    {} {}", "error:".red(), error);
        }
        for warning in package.warnings() {
            println!("    {} {}", "warning:".yellow(), warning);
        }
    }

    all_valid
}

fn inspect_path(path: &Path, evaluator: &ShellEvaluator, json: bool) -> bool {
    let package = match load(path, evaluator) {
        Some(package) => package,
        None => return false,
    };

    if json {
        match serde_json::to_string_pretty(package.descriptor()) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("Error rendering JSON: {}", e);
                return false;
            }
        }
    } else {
        print!("{}", package.descriptor());
    }

    true
}
