//! Help text listing the registered transforms.

use std::fmt::Write;

use wavchain_audio::TransformRegistry;

/// Configuration shown at the end of the help text.
pub const EXAMPLE_CONFIG: &str = "\
# Mute first 10 seconds
mute 0 10
# Increase volume to 1.5x
volume 1.5
# Mix with another file starting at second 5
mix $2 5";

/// Renders the transform list and the example configuration.
pub fn render_transforms(registry: &TransformRegistry) -> String {
    let mut out = String::from("Supported converters:\n");
    for info in registry.describe_all() {
        let _ = writeln!(out, "\n  {}", info.name);
        let _ = writeln!(out, "    {}", info.description);
        for line in info.usage.lines() {
            let _ = writeln!(out, "      {}", line);
        }
    }

    out.push_str("\nExample config file:\n");
    for line in EXAMPLE_CONFIG.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    out
}
