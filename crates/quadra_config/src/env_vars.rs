//! Environment variable handling for the Quadra configuration.
//!
//! Plain settings are overridden through `QUADRA__SECTION__KEY` variables by the
//! `config` crate itself. Secrets use a second scheme: a config value of
//! `"secret_from_env"` is replaced at load time with `QUADRA_SECRET_SECTION_KEY`,
//! falling back to the bare `SECTION_KEY` name.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "QUADRA";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "QUADRA_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that requests injection from the environment.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.port"` becomes `"QUADRA__SERVER__PORT"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"admin.password"` becomes `"QUADRA_SECRET_ADMIN_PASSWORD"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its unprefixed variable name (`"ADMIN_PASSWORD"`).
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let section = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", section, key).to_uppercase()
}

/// Look up a secret, trying the prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    get_secret_with(path, |name| env::var(name).ok())
}

pub(crate) fn get_secret_with<F>(path: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&secret_path_to_env_var(path)).or_else(|| lookup(&legacy_secret_path_to_env_var(path)))
}

/// Replace every `"secret_from_env"` string inside `value`.
///
/// Returns the dotted paths that stayed unresolved.
pub fn inject_env_vars(value: &mut serde_json::Value) -> Vec<String> {
    inject_with(value, &|name| env::var(name).ok())
}

pub(crate) fn inject_with(
    value: &mut serde_json::Value,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Vec<String> {
    use serde_json::Value;

    fn walk(
        path: Vec<String>,
        obj: &mut Value,
        lookup: &dyn Fn(&str) -> Option<String>,
        missing: &mut Vec<String>,
    ) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v, lookup, missing);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_secret_with(&path_str, lookup) {
                    Some(env_val) => *s = env_val,
                    None => missing.push(path_str),
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(vec![], value, lookup, &mut missing);
    missing
}
