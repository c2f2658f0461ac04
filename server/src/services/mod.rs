pub mod backend_probe;
pub mod snapshot_evictor;
