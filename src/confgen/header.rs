//! Rendering of the `config.h` text.
//!
//! The output depends only on the configuration record and the platform
//! family, so identical inputs always produce identical bytes.

use crate::core::{Capability, ConfigurationRecord, Platform};

/// Namespace the renderer's sources are wrapped in.
pub const NAMESPACE: &str = "yafray";

/// Library path compiled in for OS X builds, whatever the install layout.
pub const DARWIN_LIBPATH: &str = "/usr/local/lib";

/// Render the complete configuration header.
pub fn render_header(record: &ConfigurationRecord, platform: Platform) -> String {
    let mut out = String::new();
    let mut line = |s: &str| {
        out.push_str(s);
        out.push('\n');
    };

    line("// Config file header generated by yafray-build");
    line("");
    line("#ifndef __CONFIG_H");
    line("#define __CONFIG_H");
    line(&format!("#define {}", platform.compiler_macro()));

    for cap in Capability::HEADER_ORDER {
        line(&format!(
            "#define HAVE_{} {}",
            cap.c_id(),
            u8::from(record.have(cap))
        ));
    }

    // FIXME: OS X ignores the configured library path.
    let libpath = match platform {
        Platform::Darwin => DARWIN_LIBPATH,
        Platform::Linux | Platform::Win32 => record.libpath.as_str(),
    };
    line(&format!("#define LIBPATH {}", c_string(libpath)));
    line(&format!("#define MIN_RAYDIST {}", record.min_raydist()));
    line(&format!("#define PACKAGE {}", c_string(&record.package)));
    line(&format!("#define VERSION {}", c_string(&record.version)));
    line("");
    line(&format!("#define __BEGIN_YAFRAY namespace {} {{", NAMESPACE));
    line("#define __END_YAFRAY }");
    line("");
    line("__BEGIN_YAFRAY");
    line("typedef float CFLOAT;");
    line("typedef float GFLOAT;");
    line(&format!("typedef {} PFLOAT;", record.precision.point_type()));
    line("__END_YAFRAY");

    if platform.exports_linkage() {
        for (marker, macro_name) in [
            ("BUILDING_YAFRAYCORE", "YAFRAYCORE_EXPORT"),
            ("BUILDING_YAFRAYPLUGIN", "YAFRAYPLUGIN_EXPORT"),
        ] {
            line(&format!("#ifdef {}", marker));
            line(&format!("#define {} __declspec(dllexport)", macro_name));
            line("#else");
            line(&format!("#define {} __declspec(dllimport)", macro_name));
            line("#endif");
        }
    } else {
        line("#define YAFRAYPLUGIN_EXPORT");
        line("#define YAFRAYCORE_EXPORT");
    }

    line("#endif");
    out
}

/// Quote `s` as a C string literal.
fn c_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
