pub mod api_keys;
pub mod organizations;
