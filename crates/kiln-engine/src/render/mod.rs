//! GPU renderers for [`DrawList`](crate::scene::DrawList)s.
//!
//! CPU geometry is in logical pixels; vertex shaders convert to NDC using
//! a viewport uniform and scissors are scaled by the window scale factor.

mod common;
mod ctx;
mod quad;
mod scene;
mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene::SceneRenderer;
