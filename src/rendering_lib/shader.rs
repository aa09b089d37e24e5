// src/rendering_lib/shader.rs

/// Flat-colored triangles given in physical pixels, origin top-left.
pub const GRAPH_SHADER_SOURCE: &str = r#"
struct Viewport {
    size: vec2<f32>,
    _padding: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> viewport: Viewport;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(model: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.color = model.color;
    // Screen y grows downward, NDC y grows upward.
    let ndc = vec2<f32>(
        model.position.x / (viewport.size.x / 2.0) - 1.0,
        1.0 - model.position.y / (viewport.size.y / 2.0),
    );
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
