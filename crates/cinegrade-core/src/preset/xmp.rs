//! Camera Raw XMP preset serializer.
//!
//! The document layout, attribute order and number formats are fixed so
//! that editors importing the preset see the same settings every time:
//! exposure with two decimals, everything else as a rounded integer.

use crate::error::GradeResult;
use crate::format::{format_fixed, format_rounded};
use crate::preset::id::IdSource;
use crate::transform::params::{ColorGradeModel, GradeWheel, HslColor};

const XMP_OPEN: &str = concat!(
    r#"<x:xmpmeta xmlns:x="adobe:ns:meta/" x:xmptk="Adobe XMP Core 5.6-c140 79.160451, 2017/09/14-10:25:28">"#,
    "\n",
    r#" <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">"#,
    "\n",
    r#"  <rdf:Description rdf:about="""#,
    "\n",
    r#"    xmlns:crs="http://ns.adobe.com/camera-raw-settings/1.0/""#,
    "\n",
);

/// Capability flags written after the identifier.
const SUPPORTS: [&str; 7] = [
    "SupportsAmount",
    "SupportsColor",
    "SupportsMonochrome",
    "SupportsHighDynamicRange",
    "SupportsNormalDynamicRange",
    "SupportsSceneReferred",
    "SupportsOutputReferred",
];

/// A rendered `.xmp` preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetDocument {
    text: String,
    uuid: String,
}

impl PresetDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// The identifier written to `crs:UUID`, unescaped.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl std::fmt::Display for PresetDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

struct Attributes {
    out: String,
}

impl Attributes {
    fn push(&mut self, name: &str, value: &str) {
        self.out.push_str("   crs:");
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(value);
        self.out.push_str("\"\n");
    }

    fn int(&mut self, name: &str, value: f64) {
        self.push(name, &format_rounded(value));
    }

    fn wheel(&mut self, zone: &str, wheel: &GradeWheel) {
        self.int(&format!("ColorGrade{zone}Hue"), wheel.hue);
        self.int(&format!("ColorGrade{zone}Sat"), wheel.sat);
        self.int(&format!("ColorGrade{zone}Lum"), wheel.lum);
    }
}

/// Render `model` as a Camera Raw preset named `title`.
///
/// Draws one identifier from `ids`. Two calls with the same model, title
/// and identifier produce identical bytes.
pub fn serialize(
    model: &ColorGradeModel,
    title: &str,
    mut ids: impl IdSource,
) -> GradeResult<PresetDocument> {
    model.check_finite()?;

    let uuid = ids.next_id();
    let mut attrs = Attributes {
        out: String::with_capacity(4096),
    };
    attrs.out.push_str(XMP_OPEN);

    attrs.push("PresetType", "Normal");
    attrs.push("Cluster", "");
    attrs.push("UUID", &escape_xml(&uuid));
    for flag in SUPPORTS {
        attrs.push(flag, "True");
    }
    attrs.push("CameraConfig", "Camera Profile");
    attrs.push("HasSettings", "True");

    let tone = &model.tone;
    attrs.push("Exposure2012", &format_fixed(tone.exposure, 2));
    attrs.int("Contrast2012", tone.contrast);
    attrs.int("Highlights2012", tone.highlights);
    attrs.int("Shadows2012", tone.shadows);
    attrs.int("Whites2012", tone.whites);
    attrs.int("Blacks2012", tone.blacks);
    attrs.int("Temperature", tone.temperature);
    attrs.int("Tint", tone.tint);

    let presence = &model.presence;
    attrs.int("Saturation", presence.saturation);
    attrs.int("Vibrance", presence.vibrance);
    attrs.int("Clarity2012", presence.clarity);
    attrs.int("Dehaze", presence.dehaze);
    attrs.int("Texture", presence.texture);

    let detail = &model.detail;
    attrs.int("Sharpness", detail.sharpness);
    attrs.int("LuminanceSmoothing", detail.noise_reduction);
    attrs.int("ColorNoiseReduction", detail.color_noise_reduction);

    for color in HslColor::ALL {
        attrs.int(&format!("HueAdjustment{}", color.label()), model.hsl.get(color).hue);
    }
    for color in HslColor::ALL {
        attrs.int(&format!("SaturationAdjustment{}", color.label()), model.hsl.get(color).sat);
    }
    for color in HslColor::ALL {
        attrs.int(&format!("LuminanceAdjustment{}", color.label()), model.hsl.get(color).lum);
    }

    let grading = &model.grading;
    attrs.wheel("Highlight", &grading.highlights);
    attrs.wheel("Midtone", &grading.midtones);
    attrs.wheel("Shadow", &grading.shadows);
    attrs.int("ColorGradeBlending", grading.blending);
    attrs.int("ColorGradeBalance", grading.balance);
    attrs.push("HasCrop", "False");

    let mut text = attrs.out;
    text.push_str("   crs:AlreadyApplied=\"True\">\n");
    text.push_str("   <crs:Name>\n");
    text.push_str("    <rdf:Alt>\n");
    text.push_str("     <rdf:li xml:lang=\"x-default\">");
    text.push_str(&escape_xml(title));
    text.push_str("</rdf:li>\n");
    text.push_str("    </rdf:Alt>\n");
    text.push_str("   </crs:Name>\n");
    text.push_str("  </rdf:Description>\n");
    text.push_str(" </rdf:RDF>\n");
    text.push_str("</x:xmpmeta>");

    tracing::debug!("serialized preset {title:?} ({} bytes, id {uuid})", text.len());
    Ok(PresetDocument { text, uuid })
}
