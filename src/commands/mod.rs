// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod backup;
pub mod exporter;
pub mod settings;
pub mod summary;
pub mod transactions;

use crate::app::Session;
use anyhow::Result;

/// Switches the session to `--month` when given.
pub(crate) fn select_month(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(month) = sub.get_one::<String>("month") {
        session.select_month(month)?;
    }
    Ok(())
}
