//! Small helpers shared by the library and the CLI.

mod plural;

pub use plural::{plural_count, plural_s};
