//! Android vector drawables generated from catalog icons.
//!
//! A synced drawable starts with [`SIGNATURE`] followed by the icon id and `-->`. Only files
//! carrying that first line are ever rewritten.

use indoc::formatdoc;

use crate::{error::Error, formats::svg::SvgIcon, types::IconMeta};

pub const SIGNATURE: &str = "<!-- File auto-synced, do not edit! MaterialDesignIcons ID: ";

const COMMENT_END: &str = "-->";

/// Extracts the icon id from a drawable's content.
///
/// Returns `Ok(None)` when the file isn't a synced drawable.
pub fn read_signature(content: &str) -> Result<Option<String>, Error> {
    let Some(rest) = content.strip_prefix(SIGNATURE) else {
        return Ok(None);
    };
    let first_line = rest.lines().next().unwrap_or_default().trim_end();
    let id = first_line.strip_suffix(COMMENT_END).ok_or_else(|| {
        Error::format_violation(format!(
            "signature line is not terminated by `{}`",
            COMMENT_END
        ))
    })?;
    if id.is_empty() {
        return Err(Error::format_violation("signature line has no icon id"));
    }
    Ok(Some(id.to_string()))
}

/// Rejects text that would end or corrupt the XML comment it is interpolated into.
pub fn check_comment_text(what: &str, text: &str) -> Result<(), Error> {
    if text.contains("--") || text.ends_with('-') {
        return Err(Error::format_violation(format!(
            "{} `{}` can't be placed inside an XML comment",
            what, text
        )));
    }
    Ok(())
}

/// The signature line that marks `id` as synced.
pub fn signature_line(id: &str) -> Result<String, Error> {
    check_comment_text("icon id", id)?;
    Ok(format!("{}{}{}", SIGNATURE, id, COMMENT_END))
}

/// License notice for a non-deprecated icon.
pub fn license_header(meta: &IconMeta) -> Result<String, Error> {
    check_comment_text("icon name", &meta.name)?;
    check_comment_text("icon author", &meta.author)?;
    check_comment_text("icon version", &meta.version)?;
    Ok(formatdoc! {"
        <!--
            Icon \"{name}\" by {author}, added in version {version} of Material Design Icons.
            https://pictogrammers.com/library/mdi/icon/{name}/
            Licensed under the Apache License, Version 2.0.
            http://www.apache.org/licenses/LICENSE-2.0
        -->",
        name = meta.name,
        author = meta.author,
        version = meta.version,
    })
}

/// Renders the full drawable file for `meta`.
///
/// Deprecated icons are written without the license header.
pub fn render(meta: &IconMeta, icon: &SvgIcon) -> Result<String, Error> {
    let mut out = signature_line(&meta.id)?;
    out.push('\n');
    if !meta.deprecated {
        out.push_str(&license_header(meta)?);
        out.push('\n');
    }
    out.push_str(indoc::indoc! {r#"
        <vector xmlns:android="http://schemas.android.com/apk/res/android"
            android:width="24dp"
            android:height="24dp"
            android:viewportWidth="24"
            android:viewportHeight="24">
    "#});
    for path in &icon.paths {
        out.push_str(&format!(
            "    <path\n        android:fillColor=\"#FF000000\"\n        android:pathData=\"{}\" />\n",
            quick_xml::escape::escape(path)
        ));
    }
    out.push_str("</vector>\n");
    Ok(out)
}
