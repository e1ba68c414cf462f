pub mod history;
pub mod ingest;
