//! Generated asset fixtures for unit tests.

use image::codecs::hdr::HdrEncoder;
use image::{DynamicImage, ImageFormat, Rgb, Rgba, RgbaImage};
use std::io::Cursor;

/// Keyframe times `[0.0, 1.5]` followed by translations `[0,0,0]`, `[0,1,0]`,
/// little-endian f32.
const KEYFRAMES_BASE64: &str = "AAAAAAAAwD8AAAAAAAAAAAAAAAAAAAAAAACAPwAAAAA=";

/// Radiance HDR image filled with one colour.
pub fn hdr_image(width: usize, height: usize, rgb: [f32; 3]) -> Vec<u8> {
    let pixels = vec![Rgb(rgb); width * height];
    let mut bytes = Vec::new();
    HdrEncoder::new(&mut bytes)
        .encode(&pixels, width, height)
        .unwrap();
    bytes
}

/// PNG image filled with one colour.
pub fn png_image(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Self-contained glTF JSON.
///
/// Node `i` sits at `(i, 0, 0)`; the first node carries a point mesh named
/// `<name>_mesh`. Every clip animates the first node's translation over
/// 1.5 seconds.
pub fn gltf_model(nodes: &[&str], clips: &[&str]) -> Vec<u8> {
    let node_json = nodes
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mesh = if i == 0 { r#""mesh":0,"# } else { "" };
            format!(r#"{{"name":"{name}",{mesh}"translation":[{i}.0,0.0,0.0]}}"#)
        })
        .collect::<Vec<_>>()
        .join(",");
    let roots = (0..nodes.len())
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let mesh_name = nodes.first().copied().unwrap_or("model");
    let animations = clips
        .iter()
        .map(|name| {
            format!(
                r#"{{"name":"{name}","channels":[{{"sampler":0,"target":{{"node":0,"path":"translation"}}}}],"samplers":[{{"input":0,"output":1,"interpolation":"LINEAR"}}]}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",");

    format!(
        r#"{{
  "asset": {{"version": "2.0"}},
  "scene": 0,
  "scenes": [{{"name": "Scene", "nodes": [{roots}]}}],
  "nodes": [{node_json}],
  "meshes": [{{"name": "{mesh_name}_mesh", "primitives": [{{"attributes": {{"POSITION": 2}}, "mode": 0}}]}}],
  "buffers": [{{"byteLength": 32, "uri": "data:application/octet-stream;base64,{KEYFRAMES_BASE64}"}}],
  "bufferViews": [
    {{"buffer": 0, "byteOffset": 0, "byteLength": 8}},
    {{"buffer": 0, "byteOffset": 8, "byteLength": 24}}
  ],
  "accessors": [
    {{"bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.5]}},
    {{"bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3"}},
    {{"bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [0.0, 1.0, 0.0]}}
  ],
  "animations": [{animations}]
}}"#
    )
    .into_bytes()
}
