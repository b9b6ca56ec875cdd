pub(crate) const DEFAULT_URL: &str = "http://google.com";
pub(crate) const DEFAULT_RPS: &str = "1";

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("steadyprobe/", env!("CARGO_PKG_VERSION"));
