use crate::ctx::ResponseHeaders;
use http::{HeaderName, HeaderValue};
use url::Url;

pub fn headers(pairs: &[(&str, &str)]) -> ResponseHeaders {
    pairs
        .iter()
        .map(|(k, v)| {
            (
                HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_str(v).unwrap(),
            )
        })
        .collect()
}

pub fn url(raw: &str) -> Url {
    Url::parse(raw).unwrap()
}
