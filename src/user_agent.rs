use rand::seq::SliceRandom;

/// Desktop browser identities rotated on search page requests.
pub const BROWSER_USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/34.0.1847.131 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_2) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/34.0.1847.131 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_2) AppleWebKit/537.75.14 (KHTML, like Gecko) Version/7.0.3 Safari/537.75.14",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:29.0) Gecko/20100101 Firefox/29.0",
    "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/34.0.1847.137 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:28.0) Gecko/20100101 Firefox/28.0",
];

/// Picks one of [`BROWSER_USER_AGENTS`] at random.
#[inline]
pub fn random_user_agent() -> &'static str {
    BROWSER_USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(BROWSER_USER_AGENTS[0])
}

/// User-agent sent on image downloads and listing pages.
///
/// It will always follow the version declared inside ```Cargo.toml```
#[inline]
pub fn crate_user_agent() -> String {
    format!("Rust Dermis Collector/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn random_agent_comes_from_pool() {
        for _ in 0..32 {
            assert!(BROWSER_USER_AGENTS.contains(&random_user_agent()));
        }
    }
}
