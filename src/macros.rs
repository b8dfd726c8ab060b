#[macro_export]
macro_rules! client {
    () => {{
        reqwest::Client::builder()
            .user_agent($crate::user_agent::crate_user_agent())
            .build()?
    }};
    ($connect_timeout:expr) => {{
        reqwest::Client::builder()
            .user_agent($crate::user_agent::crate_user_agent())
            .connect_timeout($connect_timeout)
            .build()?
    }};
}
