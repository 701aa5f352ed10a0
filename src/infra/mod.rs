pub mod memstore;
pub mod telemetry;
