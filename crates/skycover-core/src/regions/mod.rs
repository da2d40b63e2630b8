pub mod builder;
pub mod draw;
pub mod overlay;
pub mod palette;
pub mod raster;
pub mod stencil;

pub use builder::{build_regions, segment, Segmentation, SunPlacement};
pub use palette::{Palette, Region, RegionStyle};
pub use raster::RegionRasters;
pub use stencil::Stencil;
