//! Log setup shared by the command-line front-ends.

/// Initialise `env_logger` for a binary. `RUST_LOG` wins over the verbosity count.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Tests may initialise more than once in the same process.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}
