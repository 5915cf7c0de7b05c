/*

    Texture map descriptor. Only the metadata UV mapping
    needs, the image itself is loaded elsewhere.

    @date: Oct, 2025
    @author: bartu
*/

use serde::Serialize;

use crate::json_parser::deser_float;
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, SmartDefault)]
#[serde(default)]
pub struct TextureMap {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Url")]
    pub url: String,

    // Physical size of the map in meters, 0.0 if indeterminate.
    #[serde(rename = "PhysicalWidth", deserialize_with = "deser_float")]
    #[default = 0.0]
    pub physical_width: Float,
    #[serde(rename = "PhysicalHeight", deserialize_with = "deser_float")]
    #[default = 0.0]
    pub physical_height: Float,
}

impl TextureMap {
    pub fn new(name: &str, url: &str, physical_width: Float, physical_height: Float) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            physical_width,
            physical_height,
        }
    }

    /// True if both physical dimensions are known (strictly positive).
    pub fn has_physical_size(&self) -> bool {
        self.physical_width > 0.0 && self.physical_height > 0.0
    }
}
