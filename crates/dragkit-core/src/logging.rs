pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter("trace,dragkit=debug")
        .init();
}
