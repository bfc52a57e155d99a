pub mod tessellation;

#[doc(inline)]
pub use tessellation::{tessellate, TessellatorOptions};
