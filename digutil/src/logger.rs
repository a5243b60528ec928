/// Route messages from the `log` crate through env_logger. Defaults to `info`; set `RUST_LOG` to
/// change it.
pub fn setup() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}
