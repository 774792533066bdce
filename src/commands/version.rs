//! `gl version`

use std::io::Write;

use crate::error::Result;
use crate::models::constants::{BUILD_DATE, GIT_COMMIT, VERSION};

pub fn execute(out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "greenlight {VERSION} (commit: {GIT_COMMIT}, built: {BUILD_DATE})"
    )?;
    Ok(())
}
