// src/constants.rs

/// Separator between path segments. Whitespace is an equivalent separator.
pub const PATH_SEPARATOR: char = '/';

/// Absolute path of the root node.
pub const ROOT_PATH: &str = "/";

/// Starts a comment; everything from here to the end of the line is ignored.
pub const COMMENT_CHAR: char = '#';

/// Escapes the next character so it loses its special meaning.
pub const ESCAPE_CHAR: char = '\\';

/// Stay at the current node.
pub const CURRENT_DIR_TOKEN: &str = ".";

/// Move to the parent node.
pub const PARENT_DIR_TOKEN: &str = "..";

/// Synthetic argument string produced by the help prefixes.
pub const HELP_ARGS: &str = "--help";

/// Reserved leading verbs registered by default.
pub const DEFAULT_HELP_PREFIXES: &[&str] = &["help", "?"];

/// Name of the application directory inside the system config directory.
pub const APP_DIR_NAME: &str = "cmdnav";

/// Name of the configuration file inside the application directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "CMDNAV_CONFIG";
