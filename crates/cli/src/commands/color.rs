use anyhow::Result;
use promptdeck_core::{normalize_tag, tag_color};
use serde_json::json;

use super::print_json;

pub(crate) fn run_color(tag: &str) -> Result<()> {
    let tag = normalize_tag(tag).ok_or_else(|| anyhow::anyhow!("tag must not be blank"))?;
    let color = tag_color(&tag);
    print_json(&json!({ "tag": tag, "color": color }))
}
