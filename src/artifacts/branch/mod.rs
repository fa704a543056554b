pub mod branch_name;

/// Names git-style tooling would reject: leading dots or slashes, `..`,
/// trailing slash, `.lock` suffix, `@{`, whitespace, control and glob characters
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
