/// Join an API base URL and an endpoint path with exactly one slash between
/// them.
///
/// ```
/// use ollama_assistant::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://api.openai.com/v1/", "/chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_doubled_slashes() {
        let cases = [
            ("https://api.openai.com/v1", "chat/completions"),
            ("https://api.openai.com/v1/", "chat/completions"),
            ("https://api.openai.com/v1///", "/chat/completions"),
            ("https://api.openai.com/v1", "///chat/completions"),
        ];
        for (base, endpoint) in cases {
            assert_eq!(
                construct_api_url(base, endpoint),
                "https://api.openai.com/v1/chat/completions"
            );
        }
    }

    #[test]
    fn local_mock_servers_work_too() {
        assert_eq!(
            construct_api_url("http://127.0.0.1:8080/v1", "chat/completions"),
            "http://127.0.0.1:8080/v1/chat/completions"
        );
    }
}
