/// Build version, resolved by `build.rs` from `GIT_VERSION` or `git describe`.
pub const GIT_VERSION: &str = env!("GIT_VERSION");
