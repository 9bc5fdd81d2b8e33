pub(crate) mod fake_host;
