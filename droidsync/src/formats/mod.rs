//! File formats read and written by droidsync.
//!
//! - [`android_strings`]: `res/values*/strings.xml`
//! - [`fastlane`]: `fastlane/metadata/<category>/<locale>/<key>.txt`
//! - [`svg`]: catalog icon sources (read only)
//! - [`vector_drawable`]: `res/drawable*/*.xml` generated from icons

pub mod android_strings;
pub mod fastlane;
pub mod svg;
pub mod vector_drawable;

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use svg::SvgIcon;
