pub mod cricbuzz_server;
pub mod cricket_server;
