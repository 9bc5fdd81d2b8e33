pub mod capability;
pub mod classify;
pub mod conf;
pub mod ctx;
pub mod embed;
pub mod intercept;
pub mod launch;
pub mod lifecycle;
pub mod logging;
pub mod messages;
pub mod referer;
pub mod viewer;

#[cfg(test)]
mod test_support;
