use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use tred_core::appearance::{CommentSettings, FontSpec, Rgb};
use tred_core::error::AppearanceError;

const COMMENT_PREFS_FILE: &str = "comment_prefs.v1";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("cannot resolve a preferences directory")]
    NoConfigDir,
    #[error("read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed preferences line: {0}")]
    Malformed(String),
    #[error("bad escape sequence in preferences value")]
    BadEscape,
    #[error("missing preferences version")]
    MissingVersion,
    #[error("unsupported preferences version: {0}")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Appearance(#[from] AppearanceError),
}

pub fn comment_prefs_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("tred").join(COMMENT_PREFS_FILE));
    }
    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("tred")
                .join(COMMENT_PREFS_FILE),
        );
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return Some(PathBuf::from(appdata).join("tred").join(COMMENT_PREFS_FILE));
        }
    }
    None
}

pub fn load_comment_prefs() -> Result<CommentSettings, PrefsError> {
    match comment_prefs_path() {
        Some(path) => load_comment_prefs_from(&path),
        None => Ok(CommentSettings::default()),
    }
}

pub fn load_comment_prefs_from(path: &Path) -> Result<CommentSettings, PrefsError> {
    if !path.exists() {
        debug!(path = %path.display(), "no comment prefs, using defaults");
        return Ok(CommentSettings::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| PrefsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_comment_prefs(&content)
}

pub fn save_comment_prefs(settings: &CommentSettings) -> Result<(), PrefsError> {
    let path = comment_prefs_path().ok_or(PrefsError::NoConfigDir)?;
    save_comment_prefs_to(&path, settings)
}

pub fn save_comment_prefs_to(path: &Path, settings: &CommentSettings) -> Result<(), PrefsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PrefsError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    std::fs::write(path, serialize_comment_prefs(settings)).map_err(|source| {
        PrefsError::Write {
            path: path.display().to_string(),
            source,
        }
    })
}

pub fn serialize_comment_prefs(settings: &CommentSettings) -> String {
    let mut lines = vec!["version=1".to_string()];
    if let Some(color) = settings.text_color {
        lines.push(format!("comment_color={color}"));
    }
    if let Some(font) = &settings.font {
        lines.push(format!("comment_font={}", escape_pref_value(&font.to_string())));
    }
    lines.join("\n")
}

/// Unknown keys are skipped; an empty value means "not set".
pub fn parse_comment_prefs(content: &str) -> Result<CommentSettings, PrefsError> {
    let mut out = CommentSettings::default();
    let mut version = None::<u32>;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(PrefsError::Malformed(line.to_string()));
        };
        match key {
            "version" => {
                let v = value
                    .parse::<u32>()
                    .map_err(|_| PrefsError::Malformed(line.to_string()))?;
                version = Some(v);
            }
            "comment_color" if !value.is_empty() => {
                out.text_color = Some(unescape_pref_value(value)?.parse::<Rgb>()?);
            }
            "comment_font" if !value.is_empty() => {
                out.font = Some(unescape_pref_value(value)?.parse::<FontSpec>()?);
            }
            _ => {}
        }
    }
    match version {
        Some(1) => Ok(out),
        Some(v) => Err(PrefsError::UnsupportedVersion(v)),
        None => Err(PrefsError::MissingVersion),
    }
}

fn escape_pref_value(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '=' => out.push_str("%3D"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_pref_value(input: &str) -> Result<String, PrefsError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return Err(PrefsError::BadEscape);
            }
            let hi = (bytes[i + 1] as char)
                .to_digit(16)
                .ok_or(PrefsError::BadEscape)?;
            let lo = (bytes[i + 2] as char)
                .to_digit(16)
                .ok_or(PrefsError::BadEscape)?;
            out.push((hi * 16 + lo) as u8);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| PrefsError::BadEscape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_prefs_001_parse_color_and_font() {
        let settings =
            parse_comment_prefs("version=1\ncomment_color=#336699\ncomment_font=Noto Sans,12")
                .expect("parse prefs");
        assert_eq!(settings.text_color, Some(Rgb::new(0x33, 0x66, 0x99)));
        let font = settings.font.expect("font");
        assert_eq!(font.family, "Noto Sans");
        assert_eq!(font.point_size, 12.0);
    }

    #[test]
    fn t_prefs_002_serialized_prefs_parse_back() {
        let settings = CommentSettings {
            text_color: Some(Rgb::new(0, 0, 0x80)),
            font: Some(FontSpec {
                family: "Fira=Mono".to_string(),
                point_size: 9.5,
                bold: true,
            }),
        };
        let encoded = serialize_comment_prefs(&settings);
        assert!(encoded.contains("Fira%3DMono"));
        assert_eq!(parse_comment_prefs(&encoded).expect("parse"), settings);
    }

    #[test]
    fn t_prefs_003_empty_values_and_version_checks() {
        let settings =
            parse_comment_prefs("version=1\ncomment_color=\ncomment_font=\nother=x").expect("parse");
        assert_eq!(settings, CommentSettings::default());
        assert!(matches!(
            parse_comment_prefs("comment_color=#000000"),
            Err(PrefsError::MissingVersion)
        ));
        assert!(matches!(
            parse_comment_prefs("version=2"),
            Err(PrefsError::UnsupportedVersion(2))
        ));
        assert!(matches!(
            parse_comment_prefs("version=1\ncomment_color=red"),
            Err(PrefsError::Appearance(_))
        ));
        assert!(matches!(
            parse_comment_prefs("version=1\ncomment_font=Sans%2"),
            Err(PrefsError::BadEscape)
        ));
    }

    #[test]
    fn t_prefs_004_saved_file_loads_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("tred").join(COMMENT_PREFS_FILE);
        assert_eq!(
            load_comment_prefs_from(&path).expect("missing file"),
            CommentSettings::default()
        );

        let settings = CommentSettings {
            text_color: Some(Rgb::new(0x12, 0x34, 0x56)),
            font: None,
        };
        save_comment_prefs_to(&path, &settings).expect("save");
        assert_eq!(load_comment_prefs_from(&path).expect("load"), settings);
    }
}
