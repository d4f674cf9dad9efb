use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

/// Family name charts are drawn with; fonts are registered under it.
pub const FAMILY: &str = "sans-serif";

// (regular, bold) pairs tried after the configured font.
const SYSTEM_FONTS: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
    ("/Library/Fonts/Arial.ttf", "/Library/Fonts/Arial Bold.ttf"),
    ("C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\arialbd.ttf"),
];

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Register a TrueType font for chart text. Only the first call does any
/// work; later calls return the same outcome.
///
/// Returns `false` if no usable font was found, in which case exported
/// charts are drawn without text.
pub fn install_fonts(configured: Option<&Path>) -> bool {
    *INSTALLED.get_or_init(|| {
        let candidates: Vec<(PathBuf, Option<PathBuf>)> = configured
            .map(|path| (path.to_path_buf(), None))
            .into_iter()
            .chain(
                SYSTEM_FONTS
                    .iter()
                    .map(|(r, b)| (PathBuf::from(r), Some(PathBuf::from(b)))),
            )
            .collect();

        for (regular, bold) in candidates {
            let Some(regular_bytes) = read_static(&regular) else {
                continue;
            };
            let bold_bytes = bold.as_deref().and_then(read_static);
            if !register_faces(FAMILY, &regular, regular_bytes, bold_bytes) {
                continue;
            }
            log::info!("chart font: {}", regular.display());
            return true;
        }

        log::warn!("no TrueType font found; exported charts will have no text");
        false
    })
}

/// Register `regular` and `bold` under `family`. A bold face that is missing
/// or unreadable falls back to the regular one. Returns `false` if the
/// regular face is not a valid font, in which case nothing is registered.
fn register_faces(
    family: &str,
    source: &Path,
    regular: &'static [u8],
    bold: Option<&'static [u8]>,
) -> bool {
    if register_font(family, FontStyle::Normal, regular).is_err() {
        log::warn!("{} is not a valid TrueType font", source.display());
        return false;
    }
    let bold = bold.unwrap_or(regular);
    if register_font(family, FontStyle::Bold, bold).is_err() {
        log::warn!(
            "bold face for {} is not a valid TrueType font; titles use the regular face",
            source.display()
        );
        if register_font(family, FontStyle::Bold, regular).is_err() {
            log::warn!("{} could not be registered as bold", source.display());
        }
    }
    true
}

/// Read a font file for the lifetime of the process.
fn read_static(path: &Path) -> Option<&'static [u8]> {
    match std::fs::read(path) {
        Ok(bytes) => Some(Box::leak(bytes.into_boxed_slice())),
        Err(e) => {
            log::debug!("font {} unavailable: {e}", path.display());
            None
        }
    }
}
