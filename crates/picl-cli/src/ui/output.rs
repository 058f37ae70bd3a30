//! Console implementation of [`Reporter`].
//!
//! Progress goes to stdout; warnings and errors go to stderr so they survive
//! `picl ... > log`.

use crossterm::style::Stylize;
use picl_core::Reporter;
use picl_schema::PackageSpec;

/// Plain line-per-event console reporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output;

impl Output {
    /// Create a new output handle.
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for Output {
    fn installing(&self, pkg: &PackageSpec) {
        println!("{} {pkg}", "Installing".bold().cyan());
    }

    fn removing(&self, pkg: &PackageSpec) {
        println!("{} {pkg}", "Removing".bold().cyan());
    }

    fn done(&self, pkg: &PackageSpec, detail: &str) {
        println!("{} {pkg} {}", "✓".green(), detail.dark_grey());
    }

    fn info(&self, msg: &str) {
        println!("{msg}");
    }

    fn warning(&self, msg: &str) {
        eprintln!("{} {msg}", "warning:".bold().yellow());
    }

    fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "error:".bold().red());
    }
}
