pub mod encoder;
pub mod ladder;
pub mod resize;

pub use encoder::{encode_webp, extension_for_mime, VARIANT_FORMAT_MIME, VARIANT_QUALITY};
pub use ladder::{render_ladder, RenderedLadder, RenderedVariant};
pub use resize::{scale_to_width, select_filter};
