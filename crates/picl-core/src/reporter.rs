//! Reporter trait for dependency injection
//!
//! This trait lets the dispatcher report progress and status without being
//! coupled to a specific terminal implementation.

use picl_schema::PackageSpec;

/// User-facing status sink.
pub trait Reporter: Send + Sync {
    /// A package is about to be downloaded and stored.
    fn installing(&self, pkg: &PackageSpec);

    /// A package is about to be deleted.
    fn removing(&self, pkg: &PackageSpec);

    /// Marks a package operation as successfully completed.
    fn done(&self, pkg: &PackageSpec, detail: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn installing(&self, pkg: &PackageSpec) {
        (**self).installing(pkg);
    }
    fn removing(&self, pkg: &PackageSpec) {
        (**self).removing(pkg);
    }
    fn done(&self, pkg: &PackageSpec, detail: &str) {
        (**self).done(pkg, detail);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

/// A no-op reporter for silent operations (e.g. testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn installing(&self, _: &PackageSpec) {}
    fn removing(&self, _: &PackageSpec) {}
    fn done(&self, _: &PackageSpec, _: &str) {}
    fn info(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}
