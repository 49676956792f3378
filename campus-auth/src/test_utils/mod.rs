// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
use crate::role::Role;

/// Install a log subscriber when `RUST_LOG` is set.
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Every possible active role, including "no role".
pub fn all_roles() -> impl Iterator<Item = Option<Role>> {
    std::iter::once(None).chain(Role::ALL.into_iter().map(Some))
}
