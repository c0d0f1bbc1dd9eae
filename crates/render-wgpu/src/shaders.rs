//! WGSL shaders for the scene backend.

/// Lit instanced mesh pass. One instance per mesh node; lighting comes
/// from the fixed rig gathered into `Globals`.
pub const SCENE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_vp: mat4x4<f32>,
    ambient: vec4<f32>,      // rgb * intensity, w = shadows enabled
    sun: vec4<f32>,          // xyz direction toward the scene, w intensity
    point0_pos: vec4<f32>,
    point0_color: vec4<f32>, // rgb * intensity
    point1_pos: vec4<f32>,
    point1_color: vec4<f32>,
    camera_pos: vec4<f32>,
};

@group(0) @binding(0) var<uniform> globals: Globals;
@group(0) @binding(1) var shadow_map: texture_depth_2d;
@group(0) @binding(2) var shadow_sampler: sampler_comparison;

struct VsIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,    // rgb + opacity
    @location(7) emissive: vec4<f32>, // rgb * intensity
    @location(8) params: vec4<f32>,   // metalness, roughness, receive_shadow
};

struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) world: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) shadow_coord: vec4<f32>,
    @location(3) color: vec4<f32>,
    @location(4) emissive: vec3<f32>,
    @location(5) params: vec4<f32>,
};

@vertex
fn vs_main(in: VsIn) -> VsOut {
    let model = mat4x4<f32>(in.model_0, in.model_1, in.model_2, in.model_3);
    let world = model * vec4<f32>(in.position, 1.0);
    let normal_mat = mat3x3<f32>(model[0].xyz, model[1].xyz, model[2].xyz);

    var out: VsOut;
    out.clip = globals.view_proj * world;
    out.world = world.xyz;
    out.normal = normalize(normal_mat * in.normal);
    out.shadow_coord = globals.light_vp * world;
    out.color = in.color;
    out.emissive = in.emissive.rgb;
    out.params = in.params;
    return out;
}

fn sample_shadow(coord: vec4<f32>) -> f32 {
    let proj = coord.xyz / coord.w;
    let uv = proj.xy * vec2<f32>(0.5, -0.5) + vec2<f32>(0.5, 0.5);
    if (uv.x < 0.0 || uv.x > 1.0 || uv.y < 0.0 || uv.y > 1.0 || proj.z > 1.0) {
        return 1.0;
    }
    let depth = proj.z - 0.002;
    let texel = 1.0 / f32(textureDimensions(shadow_map).x);
    var sum = 0.0;
    for (var x = -1; x <= 1; x = x + 1) {
        for (var y = -1; y <= 1; y = y + 1) {
            let offset = vec2<f32>(f32(x), f32(y)) * texel;
            sum = sum + textureSampleCompareLevel(shadow_map, shadow_sampler, uv + offset, depth);
        }
    }
    return sum / 9.0;
}

fn point_light(world: vec3<f32>, n: vec3<f32>, pos: vec3<f32>, color: vec3<f32>) -> vec3<f32> {
    let to_light = pos - world;
    let dist = length(to_light);
    let ndl = max(dot(n, to_light / dist), 0.0);
    let attenuation = 1.0 / (1.0 + 0.02 * dist * dist);
    return color * ndl * attenuation;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let metalness = in.params.x;
    let roughness = in.params.y;
    let receives = in.params.z;

    var shadow = 1.0;
    if (globals.ambient.w > 0.5 && receives > 0.5) {
        shadow = sample_shadow(in.shadow_coord);
    }

    let sun_dir = normalize(-globals.sun.xyz);
    let sun_ndl = max(dot(n, sun_dir), 0.0);

    var light = globals.ambient.rgb;
    light = light + vec3<f32>(globals.sun.w * sun_ndl * shadow);
    light = light + point_light(in.world, n, globals.point0_pos.xyz, globals.point0_color.rgb);
    light = light + point_light(in.world, n, globals.point1_pos.xyz, globals.point1_color.rgb);

    let view_dir = normalize(globals.camera_pos.xyz - in.world);
    let halfway = normalize(sun_dir + view_dir);
    let shininess = mix(8.0, 64.0, 1.0 - roughness);
    let specular = pow(max(dot(n, halfway), 0.0), shininess) * metalness * globals.sun.w * shadow;

    let rgb = in.color.rgb * light + vec3<f32>(specular) + in.emissive;
    return vec4<f32>(rgb, in.color.a);
}
"#;

/// Depth-only pass from the key light's point of view.
pub const SHADOW_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_vp: mat4x4<f32>,
    ambient: vec4<f32>,
    sun: vec4<f32>,
    point0_pos: vec4<f32>,
    point0_color: vec4<f32>,
    point1_pos: vec4<f32>,
    point1_color: vec4<f32>,
    camera_pos: vec4<f32>,
};

@group(0) @binding(0) var<uniform> globals: Globals;

struct VsIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) emissive: vec4<f32>,
    @location(8) params: vec4<f32>,
};

@vertex
fn vs_shadow(in: VsIn) -> @builtin(position) vec4<f32> {
    let model = mat4x4<f32>(in.model_0, in.model_1, in.model_2, in.model_3);
    return globals.light_vp * model * vec4<f32>(in.position, 1.0);
}
"#;

/// Soft contact-shadow quad: a radial darkening under the composed
/// content, fading with distance at a configurable falloff power.
pub const CATCHER_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_vp: mat4x4<f32>,
    ambient: vec4<f32>,
    sun: vec4<f32>,
    point0_pos: vec4<f32>,
    point0_color: vec4<f32>,
    point1_pos: vec4<f32>,
    point1_color: vec4<f32>,
    camera_pos: vec4<f32>,
};

@group(0) @binding(0) var<uniform> globals: Globals;

struct VsIn {
    @location(0) corner: vec2<f32>,
    @location(1) model_0: vec4<f32>,
    @location(2) model_1: vec4<f32>,
    @location(3) model_2: vec4<f32>,
    @location(4) model_3: vec4<f32>,
    @location(5) params: vec4<f32>, // opacity, falloff
};

struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) params: vec4<f32>,
};

@vertex
fn vs_catcher(in: VsIn) -> VsOut {
    let model = mat4x4<f32>(in.model_0, in.model_1, in.model_2, in.model_3);
    let world = model * vec4<f32>(in.corner.x, 0.0, in.corner.y, 1.0);

    var out: VsOut;
    out.clip = globals.view_proj * world;
    out.uv = in.corner;
    out.params = in.params;
    return out;
}

@fragment
fn fs_catcher(in: VsOut) -> @location(0) vec4<f32> {
    let opacity = in.params.x;
    let falloff = in.params.y;
    let d = clamp(1.0 - length(in.uv), 0.0, 1.0);
    let alpha = opacity * pow(d, falloff);
    return vec4<f32>(0.0, 0.0, 0.0, alpha);
}
"#;
