pub mod activation;
pub mod time_map;
