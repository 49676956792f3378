// SPDX-License-Identifier: MIT OR Apache-2.0

mod family;

pub use family::PolicyFamily;
