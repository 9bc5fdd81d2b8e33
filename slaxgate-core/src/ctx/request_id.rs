use std::fmt::{Display, Formatter};

/// Host-assigned identity of one network request.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct RequestId(pub String);

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId(s.to_owned())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Browser tab identifier. Requests that do not belong to a tab carry none.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct TabId(pub i64);

impl Display for TabId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frame identifier within a tab. Zero is the top-level frame.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct FrameId(pub i64);

impl FrameId {
    pub const TOP_LEVEL: FrameId = FrameId(0);

    pub fn is_top_level(self) -> bool {
        self == Self::TOP_LEVEL
    }
}
