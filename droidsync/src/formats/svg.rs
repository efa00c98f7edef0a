//! Minimal reader for catalog SVG icons.
//!
//! Catalog icons are a single `<svg>` with `<path>` children. Anything else means the catalog
//! changed format, so parsing fails instead of guessing.

use quick_xml::{Reader, events::Event};

use crate::error::Error;

/// The only viewbox the vector-drawable template supports (it hard-codes 24dp).
pub const CANONICAL_VIEW_BOX: &str = "0 0 24 24";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgIcon {
    pub view_box: String,
    /// `d` attribute of each `<path>`, in document order.
    pub paths: Vec<String>,
}

impl SvgIcon {
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut view_box = None;
        let mut paths = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                    b"svg" => {
                        for attr in e.attributes() {
                            let attr = attr?;
                            if attr.key.local_name().as_ref() == b"viewBox" {
                                view_box = Some(attr.unescape_value()?.to_string());
                            }
                        }
                    }
                    b"path" => {
                        let mut data = None;
                        for attr in e.attributes() {
                            let attr = attr?;
                            if attr.key.local_name().as_ref() == b"d" {
                                data = Some(attr.unescape_value()?.to_string());
                            }
                        }
                        let data = data.ok_or_else(|| {
                            Error::format_violation("<path> without a `d` attribute")
                        })?;
                        paths.push(data);
                    }
                    other => {
                        return Err(Error::format_violation(format!(
                            "unexpected element <{}> in icon source",
                            String::from_utf8_lossy(other)
                        )));
                    }
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let view_box =
            view_box.ok_or_else(|| Error::format_violation("icon source has no <svg viewBox>"))?;
        if view_box != CANONICAL_VIEW_BOX {
            return Err(Error::format_violation(format!(
                "unexpected viewBox `{}`, expected `{}`",
                view_box, CANONICAL_VIEW_BOX
            )));
        }
        if paths.is_empty() {
            return Err(Error::format_violation("icon source has no <path>"));
        }

        Ok(SvgIcon { view_box, paths })
    }
}
