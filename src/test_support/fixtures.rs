//! Package fixtures as reported by `go list`.

use crate::resolver::{ListedPackage, PackageError};

/// A package that loaded cleanly.
pub fn listed(import_path: &str, name: &str) -> ListedPackage {
    ListedPackage {
        import_path: import_path.to_string(),
        name: name.to_string(),
        error: None,
    }
}

/// A package carrying a load error at `pos`.
pub fn listed_with_error(import_path: &str, name: &str, pos: &str, err: &str) -> ListedPackage {
    ListedPackage {
        error: Some(PackageError {
            pos: pos.to_string(),
            err: err.to_string(),
        }),
        ..listed(import_path, name)
    }
}
