//! Tree configuration structures and loaders.
use std::env;

/// Runtime flags applied to a [`Tree`](crate::Tree) when it is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Label used as the prefix of tree-level debug lines.
    pub name: String,
    /// A disabled tree returns `Failure` from every `execute()`.
    pub enabled: bool,
    /// Emit `[node] message` debug lines for every node.
    pub debug: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            name: "tree".to_owned(),
            enabled: true,
            debug: false,
        }
    }
}

impl TreeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BT_TREE_NAME` - Tree label for debug output (default: `tree`)
    /// - `BT_ENABLED` - Whether the tree executes at all (default: true)
    /// - `BT_DEBUG` - Per-node debug logging (default: false)
    ///
    /// Flags accept `1/0`, `true/false`, `yes/no` and `on/off`; a variable set
    /// to an empty value counts as true. Anything else is logged and the
    /// default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TreeConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("BT_TREE_NAME")
            && !name.is_empty()
        {
            config.name = name;
        }

        if let Some(enabled) = read_flag(&lookup, "BT_ENABLED") {
            config.enabled = enabled;
        }

        if let Some(debug) = read_flag(&lookup, "BT_DEBUG") {
            config.debug = debug;
        }

        config
    }
}

fn read_flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)?;
    let flag = parse_flag(&value);
    if flag.is_none() {
        tracing::warn!("{}={:?} is not a recognized flag; keeping default", key, value);
    }
    flag
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        // Bare variable without a value
        "" => Some(true),
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
