// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Embeds build and git metadata for `clint version`.

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    EmitBuilder::builder()
        .build_date()
        .git_sha(false)
        .git_commit_date()
        .emit()?;
    Ok(())
}
