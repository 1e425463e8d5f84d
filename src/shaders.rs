//! Embedded GLSL ES 1.00 sources.

use crate::config::Tiling;

pub const POSITION_ATTRIBUTE: &str = "position";
pub const RESOLUTION_UNIFORM: &str = "iResolution";
pub const TIME_UNIFORM: &str = "iTime";

pub const VERTEX_SHADER: &str = r"attribute vec2 position;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
";

const FRAGMENT_PRELUDE: &str = r"precision mediump float;
uniform vec2 iResolution;
uniform float iTime;
";

const FRAGMENT_BODY: &str = r"
vec3 pal(float a) {
    return 0.5 + cos(3.0 * a + vec3(2, 1, 0));
}

vec2 fold(vec2 p) {
#ifdef TETRASKELION
    return fract(p) - 0.5;
#else
    vec4 m = vec4(2, -1, 0, sqrt(3.0));
    p.y += m.w / 3.0;
    vec2 t = mat2(m) * p;
    return p - 0.5 * mat2(m.xzyw) * floor((ceil(t) + ceil(t.x + t.y)) / 3.0);
#endif
}

void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    float t = iTime / 4.0, t2 = t * 0.618034, t3 = t * 1.4142135;
    mat2 M = mat2(cos(t), sin(t), -sin(t), cos(t)) * (1.0 - 0.1 * cos(t2));
    vec2 p = (2.0 * fragCoord - iResolution.xy) / iResolution.y;
    float d = 0.5 * length(p);
    vec3 sum = vec3(0);
    for (float i = 0.0; i < 24.0; i++) {
        p = fold(M * p);
        sum += pal(0.01 * i - d + t2) / cos(d - t3 + 5.0 * length(p));
    }
    fragColor = vec4(0.0002 * sum * sum, 1);
}

void main() {
    vec4 fragColor;
    mainImage(fragColor, gl_FragCoord.xy);
    gl_FragColor = fragColor;
}
";

/// Vertex/fragment pair handed to the initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// The built-in pattern with the requested folding.
    pub fn pattern(tiling: Tiling) -> Self {
        Self {
            vertex: VERTEX_SHADER.to_owned(),
            fragment: fragment_source(tiling),
        }
    }
}

fn fragment_source(tiling: Tiling) -> String {
    let define = match tiling {
        Tiling::Hexagonal => "",
        Tiling::Tetraskelion => "#define TETRASKELION\n",
    };
    format!("{FRAGMENT_PRELUDE}{define}{FRAGMENT_BODY}")
}
