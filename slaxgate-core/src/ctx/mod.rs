mod headers;
mod intercepted_request;
mod request_id;

pub use headers::ResponseHeaders;
pub use intercepted_request::{FrameKind, InterceptedRequest, Scheme};
pub use request_id::{FrameId, RequestId, TabId};
