use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("persona_chat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter =
    Counter::new("persona_chat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("persona_chat.client.request_duration_seconds");

pub(crate) static MISSING_CREDENTIAL: Counter =
    Counter::new("persona_chat.completion.missing_credential");
pub(crate) static PROVIDER_FAILURES: Counter =
    Counter::new("persona_chat.completion.provider_failures");

pub(crate) static TURNS_APPENDED: Counter = Counter::new("persona_chat.transcript.turns_appended");
pub(crate) static SESSIONS_INITIALIZED: Counter =
    Counter::new("persona_chat.session.initialized");

pub(crate) static ASSET_PLACEHOLDERS: Counter =
    Counter::new("persona_chat.portfolio.asset_placeholders");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&MISSING_CREDENTIAL);
    collector.register_counter(&PROVIDER_FAILURES);

    collector.register_counter(&TURNS_APPENDED);
    collector.register_counter(&SESSIONS_INITIALIZED);

    collector.register_counter(&ASSET_PLACEHOLDERS);
}
