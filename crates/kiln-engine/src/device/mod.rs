//! wgpu device and window surface.
//!
//! - creates the Instance/Adapter/Device/Queue for one window
//! - configures the surface and follows resizes
//! - acquires frames and maps surface errors to a recovery action

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
