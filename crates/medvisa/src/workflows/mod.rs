pub mod clients;
pub mod export;
