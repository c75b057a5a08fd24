use crate::common::*;

#[doc = r#"
    Reads a required environment variable and aborts the process when it is missing.

    The server cannot start without its configuration file, so a missing key is
    treated as fatal: the message is logged at error level and the process panics.

    # Arguments
    * `key` - environment variable name

    # Returns
    * `String` - the variable's value

    # Panics
    When the variable is not set.
"#]
fn get_env_or_panic(key: &str) -> String {
    match env::var(key) {
        Ok(val) => val,
        Err(_) => {
            let msg: String = format!("[ENV file read Error] '{}' must be set", key);
            error!("{}", msg);
            panic!("{}", msg);
        }
    }
}

#[doc = r#"
    Path of the TOML server configuration, read once from `SERVER_CONFIG_PATH`.

    The file holds the `[server]`, `[storage]` and `[chart]` sections that make up
    `TotalConfig`.

    # Panics
    When `SERVER_CONFIG_PATH` is not set.
"#]
pub static SERVER_CONFIG_PATH: once_lazy<String> =
    once_lazy::new(|| get_env_or_panic("SERVER_CONFIG_PATH"));
