//! Keyword classification of gateway error details.
//!
//! Buckets are tested in a fixed order (throttle, risk, transient) and the
//! first match wins; anything unmatched is fatal.

use crate::domain::retry_policy::value_objects::ErrorBucket;

const THROTTLE_PHRASES: &[&str] = &[
    "rate limit",
    "rate-limit",
    "ratelimit",
    "too many requests",
    "throttl",
];
const THROTTLE_TOKENS: &[&str] = &["429"];

const RISK_PHRASES: &[&str] = &[
    "margin",
    "insufficient",
    "buying power",
    "limit breach",
    "limit exceeded",
    "exposure limit",
];
const RISK_TOKENS: &[&str] = &["rms"];

const TRANSIENT_PHRASES: &[&str] = &[
    "timeout",
    "timed out",
    "network",
    "connection",
    "temporar",
    "unavailable",
    "broken pipe",
    "reset by peer",
    "bad gateway",
    "try again",
];

/// Stateless error classifier.
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify a raw error detail into a bucket.
    #[must_use]
    pub fn classify(detail: &str) -> ErrorBucket {
        let lower = detail.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let hit = |phrases: &[&str], exact: &[&str]| {
            phrases.iter().any(|p| lower.contains(p))
                || tokens.iter().any(|t| exact.contains(t))
        };

        if hit(THROTTLE_PHRASES, THROTTLE_TOKENS) {
            return ErrorBucket::Throttle;
        }
        if hit(RISK_PHRASES, RISK_TOKENS) {
            return ErrorBucket::Risk;
        }
        if hit(TRANSIENT_PHRASES, &[]) || tokens.iter().any(|t| is_server_status(t)) {
            return ErrorBucket::Transient;
        }
        ErrorBucket::Fatal
    }
}

/// 5xx status codes appear as standalone tokens.
fn is_server_status(token: &str) -> bool {
    token.len() == 3 && token.parse::<u16>().is_ok_and(|code| (500..600).contains(&code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Rate limit exceeded" => ErrorBucket::Throttle; "rate limit")]
    #[test_case("HTTP 429" => ErrorBucket::Throttle; "status 429")]
    #[test_case("Too Many Requests" => ErrorBucket::Throttle; "too many requests")]
    #[test_case("request throttled by gateway" => ErrorBucket::Throttle; "throttled")]
    #[test_case("Insufficient funds" => ErrorBucket::Risk; "insufficient funds")]
    #[test_case("margin shortfall for order" => ErrorBucket::Risk; "margin")]
    #[test_case("RMS: order blocked" => ErrorBucket::Risk; "rms code")]
    #[test_case("buying power exceeded" => ErrorBucket::Risk; "buying power")]
    #[test_case("connection reset by peer" => ErrorBucket::Transient; "connection reset")]
    #[test_case("request timed out" => ErrorBucket::Transient; "timed out")]
    #[test_case("503 Service Unavailable" => ErrorBucket::Transient; "status 503")]
    #[test_case("upstream returned 502" => ErrorBucket::Transient; "status 502")]
    #[test_case("network unreachable" => ErrorBucket::Transient; "network")]
    #[test_case("invalid tradingsymbol" => ErrorBucket::Fatal; "invalid symbol")]
    #[test_case("unknown error" => ErrorBucket::Fatal; "unknown")]
    #[test_case("" => ErrorBucket::Fatal; "empty detail")]
    fn classify(detail: &str) -> ErrorBucket {
        ErrorClassifier::classify(detail)
    }

    #[test]
    fn throttle_wins_over_transient() {
        assert_eq!(
            ErrorClassifier::classify("rate limit hit, connection closed"),
            ErrorBucket::Throttle
        );
    }

    #[test]
    fn risk_wins_over_transient() {
        assert_eq!(
            ErrorClassifier::classify("margin check timeout"),
            ErrorBucket::Risk
        );
    }

    #[test]
    fn short_codes_match_whole_tokens_only() {
        assert_eq!(
            ErrorClassifier::classify("order terms not accepted"),
            ErrorBucket::Fatal
        );
        assert_eq!(
            ErrorClassifier::classify("order id 15030 rejected"),
            ErrorBucket::Fatal
        );
    }
}
