//! One-time registration of the "sans-serif" font used by the `ab_glyph` text path.
//!
//! `ab_glyph` doesn't discover OS fonts, so a TrueType file has to be read and
//! registered explicitly. A caller's path always takes precedence; otherwise the
//! lookup order is `SUSTAIN_CHARTS_FONT`, the user font directory, then well-known
//! system locations.

use ab_glyph::FontRef;
use log::{debug, info, warn};
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub const FONT_ENV_VAR: &str = "SUSTAIN_CHARTS_FONT";

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Registered font path, and whether the default locations were already searched.
#[derive(Debug)]
struct FontState {
    registered: Option<PathBuf>,
    searched: bool,
}

static FONT_STATE: Mutex<FontState> = Mutex::new(FontState {
    registered: None,
    searched: false,
});

fn default_candidates() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(p) = std::env::var_os(FONT_ENV_VAR) {
        out.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs::font_dir() {
        out.push(dir.join("DejaVuSans.ttf"));
    }
    out.extend(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));
    out
}

fn try_register(path: &Path) -> bool {
    let Ok(bytes) = std::fs::read(path) else {
        return false;
    };
    if FontRef::try_from_slice(&bytes).is_err() {
        debug!("{} is not a usable TrueType font", path.display());
        return false;
    }
    // plotters keeps a 'static reference; the font lives for the rest of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match plotters::style::register_font("sans-serif", FontStyle::Normal, bytes) {
        Ok(()) => true,
        Err(_) => {
            debug!("plotters rejected font {}", path.display());
            false
        }
    }
}

/// Register a font for text rendering. Returns whether text can be drawn.
///
/// An explicit path is registered whenever it differs from the current font; if
/// it is unusable, the current font (or the default search) is used instead.
/// The default locations are searched at most once per process.
pub fn ensure_fonts_registered(explicit: Option<&Path>) -> bool {
    let mut state = FONT_STATE.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(path) = explicit {
        if state.registered.as_deref() == Some(path) {
            return true;
        }
        if try_register(path) {
            info!("registered chart font {}", path.display());
            state.registered = Some(path.to_path_buf());
            return true;
        }
        warn!("cannot use font {}, falling back to the default font", path.display());
    }

    if state.registered.is_some() {
        return true;
    }
    if state.searched {
        return false;
    }
    state.searched = true;
    for path in default_candidates() {
        if try_register(&path) {
            info!("registered chart font {}", path.display());
            state.registered = Some(path);
            return true;
        }
    }
    warn!("no TrueType font found, charts are rendered without text (set {FONT_ENV_VAR})");
    false
}

/// Whether a font has been registered, searching the default locations if needed.
pub fn fonts_available() -> bool {
    ensure_fonts_registered(None)
}

/// Path of the font currently used for text, if any.
pub fn registered_font() -> Option<PathBuf> {
    FONT_STATE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .registered
        .clone()
}
