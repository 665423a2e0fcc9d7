pub mod lookup_server;
