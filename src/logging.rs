use std::{env, fs::File};

use env_logger::{Builder, Target};

const LOG_FILE: &str = "snake.log";

/// Installs the logger when `RUST_LOG` is set.
///
/// The terminal is the game screen, so records go to `snake.log` instead of
/// stderr. Without `RUST_LOG` nothing is installed and the `log` macros are no-ops.
pub fn init() {
    if env::var_os("RUST_LOG").is_none() {
        return;
    }

    let file = match File::create(LOG_FILE) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Not logging, could not create {}: {}", LOG_FILE, e);
            return;
        }
    };

    Builder::from_default_env()
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
}
