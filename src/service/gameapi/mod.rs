pub mod cdragon_client;
pub mod parsing;
pub mod transport;
