//! Application startup utilities: logging, graceful shutdown, and the gRPC listener.

mod grpc;
mod logging;
mod shutdown;

pub use grpc::{GrpcServerHandle, start_grpc_server};
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_file_logging};
pub use shutdown::{GracefulShutdown, ShutdownSignal, run_with_shutdown, wait_for_shutdown_signal};
