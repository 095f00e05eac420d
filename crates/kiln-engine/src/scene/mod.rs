//! Renderer-agnostic draw stream.
//!
//! A [`DrawList`] records quads and text runs for one frame together with
//! the scissor rect active when each was pushed. Paint order is z first,
//! then insertion order.

mod cmd;
mod list;

pub use cmd::{Border, DrawCmd, QuadCmd, TextCmd};
pub use list::{DrawItem, DrawList};
