use anyhow::{Context, bail};
use clap::ValueEnum;
use http::{HeaderName, HeaderValue, Method};
use slaxgate_core::capability::CapabilitySet;
use slaxgate_core::conf::RuntimeConfig;
use slaxgate_core::ctx::{FrameId, InterceptedRequest, ResponseHeaders, TabId};
use slaxgate_core::intercept::{Decision, Interceptor, SlaxInterceptor};
use slaxgate_core::referer::RefererStore;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Host event to replay.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Stage {
    Headers,
    Request,
    Navigate,
}

pub fn decide(
    cfg: RuntimeConfig,
    url: &str,
    method: &str,
    headers: &[String],
    nested: bool,
    stage: Stage,
) -> anyhow::Result<()> {
    let url = Url::parse(url).with_context(|| format!("invalid URL {url}"))?;
    let method = Method::from_bytes(method.as_bytes()).context("invalid method")?;

    let mut request = InterceptedRequest::new("replay", method, url).with_tab(TabId(1));
    if nested {
        request = request.in_frame(FrameId(1));
    }
    if matches!(stage, Stage::Headers) {
        request = request.with_response_headers(parse_headers(headers)?);
    }

    let interceptor = SlaxInterceptor::new(
        cfg.viewer,
        Arc::new(CapabilitySet::new(cfg.capabilities)),
        Arc::new(RefererStore::new()),
    );

    let decision = match stage {
        Stage::Headers => interceptor.on_headers_received(&request),
        Stage::Request => interceptor.on_before_request(&request),
        Stage::Navigate => interceptor.on_before_navigate(&request),
    };

    info!(url = %request.url, decision = decision.kind(), "replayed");
    print_decision(&decision);
    Ok(())
}

fn parse_headers(raw: &[String]) -> anyhow::Result<ResponseHeaders> {
    let mut headers = ResponseHeaders::new();
    for line in raw {
        let Some((name, value)) = line.split_once(':') else {
            bail!("header '{line}' is not in `Name: value` form");
        };
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .with_context(|| format!("invalid header name in '{line}'"))?;
        let value = HeaderValue::from_str(value.trim())
            .with_context(|| format!("invalid header value in '{line}'"))?;
        headers.push(name, value);
    }
    Ok(headers)
}

fn print_decision(decision: &Decision) {
    match decision {
        Decision::Allow | Decision::Unsupported => println!("{}", decision.kind()),
        Decision::Redirect(url) | Decision::CancelAndNavigate(url) => {
            println!("{} {url}", decision.kind())
        }
        Decision::ForceDownload(headers) => {
            println!("{}", decision.kind());
            for (name, value) in headers.iter() {
                println!("  {}: {}", name, String::from_utf8_lossy(value.as_bytes()));
            }
        }
    }
}
