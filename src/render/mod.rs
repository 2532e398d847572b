//! Fog rendering
//!
//! Cell-resolution surfaces, the light falloff curve, and the compositor
//! that combines them into the final intensity field.

pub mod ascii;
pub mod compositor;
pub mod falloff;
pub mod surface;

pub use ascii::{render_ascii, shade};
pub use compositor::{CompositeParams, IlluminationCompositor};
pub use falloff::{brightness, BrightnessCache};
pub use surface::Surface;
