//! `gl install`, `gl uninstall` and `gl check`

use std::io::Write;
use std::path::Path;

use crate::error::{GlError, Result};
use crate::installer::{ConflictStrategy, Installer, Scope};

fn installer(root: &Path, scope: Scope) -> Result<Installer> {
    let target = scope.resolve_dir(root)?;
    tracing::debug!(%scope, target_dir = %target.display(), "resolved install directory");
    Ok(Installer::new(target, scope))
}

pub fn install(
    root: &Path,
    scope: Scope,
    strategy: ConflictStrategy,
    out: &mut dyn Write,
) -> Result<()> {
    installer(root, scope)?.install(strategy, out)
}

pub fn uninstall(root: &Path, scope: Scope, out: &mut dyn Write) -> Result<()> {
    installer(root, scope)?.uninstall(out)
}

/// Fails after printing the report when anything is missing or modified.
pub fn check(root: &Path, scope: Scope, verify: bool, out: &mut dyn Write) -> Result<()> {
    let report = installer(root, scope)?.check(verify, out)?;
    if report.ok() {
        Ok(())
    } else {
        Err(GlError::CheckFailed(report.summary()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_round_trip() {
        colored::control::set_override(false);
        let tmp = TempDir::new().unwrap();
        let mut out = Vec::new();

        assert!(check(tmp.path(), Scope::Local, false, &mut out).is_err());
        install(tmp.path(), Scope::Local, ConflictStrategy::Keep, &mut out).unwrap();
        check(tmp.path(), Scope::Local, true, &mut out).unwrap();
        uninstall(tmp.path(), Scope::Local, &mut out).unwrap();

        let err = check(tmp.path(), Scope::Local, false, &mut out).unwrap_err();
        assert!(matches!(err, GlError::CheckFailed(_)));
        assert!(tmp.path().join("CLAUDE.md").is_file());
    }
}
