//! Shader-to-source conversion.

/// Render shader source as a C raw-string literal named `name`.
///
/// `#version` lines become blank lines (the runtime prepends its own defines)
/// and a `#line 1` directive keeps driver diagnostics pointing at the
/// original line numbers.
pub fn convert_shader(source: &str, name: &str) -> String {
    let mut out = format!("static const char* {name} = R\"(#line 1");

    for line in source.split_inclusive('\n') {
        if line.starts_with("#version") {
            out.push('\n');
        } else {
            out.push_str(line);
        }
    }

    out.push_str("\n)\";");
    out
}
