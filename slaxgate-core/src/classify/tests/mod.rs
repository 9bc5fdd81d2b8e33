mod download_tests;
mod target_resource_tests;
