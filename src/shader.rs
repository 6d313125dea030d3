//! WGSL used to present the canvas.

/// Fullscreen triangle sampling the uploaded canvas texture.
///
/// Bindings: `@binding(0)` the canvas texture, `@binding(1)` its sampler.
pub const BLIT_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var corners = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(3.0, -1.0),
        vec2<f32>(-1.0, 3.0),
    );
    let p = corners[index];

    var out: VertexOutput;
    out.position = vec4<f32>(p, 0.0, 1.0);
    // Canvas rows run top to bottom.
    out.uv = vec2<f32>((p.x + 1.0) * 0.5, (1.0 - p.y) * 0.5);
    return out;
}

@group(0) @binding(0) var canvas_texture: texture_2d<f32>;
@group(0) @binding(1) var canvas_sampler: sampler;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(canvas_texture, canvas_sampler, in.uv);
    return vec4<f32>(color.rgb, 1.0);
}
"#;
