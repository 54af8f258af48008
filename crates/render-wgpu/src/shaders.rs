/// WGSL shader drawing the frame texture as a screen-anchored quad.
///
/// `extent` is the frame size divided by the window size, so the quad covers
/// exactly the frame's pixels starting at the top-left corner.
pub const BLIT_SHADER: &str = r#"
struct Uniforms {
    extent: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(0) @binding(1)
var frame_texture: texture_2d<f32>;

@group(0) @binding(2)
var frame_sampler: sampler;

struct BlitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_blit(@builtin(vertex_index) index: u32) -> BlitOutput {
    // Triangle strip: (0,0) (1,0) (0,1) (1,1)
    let uv = vec2<f32>(f32(index & 1u), f32(index >> 1u));
    var out: BlitOutput;
    out.clip_position = vec4<f32>(
        -1.0 + 2.0 * uv.x * uniforms.extent.x,
        1.0 - 2.0 * uv.y * uniforms.extent.y,
        0.0,
        1.0,
    );
    out.uv = uv;
    return out;
}

@fragment
fn fs_blit(in: BlitOutput) -> @location(0) vec4<f32> {
    return textureSample(frame_texture, frame_sampler, in.uv);
}
"#;
