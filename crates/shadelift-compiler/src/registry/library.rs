//! Target-language helpers emitted when a reachable call needs them.

/// `(name, source)` pairs; `name` is what rewritten call sites invoke.
pub(super) const SNIPPETS: &[(&str, &str)] = &[(
    "_mat4_multiplyVec3",
    "vec3 _mat4_multiplyVec3(mat4 m, vec3 v) { return (m * vec4(v, 1.0)).xyz; }",
)];
