//! # Configuration Integration Test
//!
//! Loading `UiConfig` from disk and starting a UI from it.

use std::io::Write;

use trellis_ui::element::FontFlags;
use trellis_ui::{
    DrawCall, ElementSpec, InitParams, RecordingRenderer, Ui, UiConfig, UiError,
};

/// Test: A config file on disk drives the viewport and the default font.
#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
draw_on_demand = false
viewport_width = 1280
viewport_height = 720

[default_font]
name = "Verdana"
size = 14
flags = "BOLD | ITALIC"
"#
    )
    .expect("write config");

    let config = UiConfig::load(file.path()).expect("config loads");
    assert!(!config.draw_on_demand);
    assert!(config.input_enabled);
    assert_eq!(config.default_font.name, "Verdana");
    assert_eq!(config.default_font.flags, FontFlags::BOLD | FontFlags::ITALIC);
    assert_eq!(config.params(), InitParams::empty());

    let renderer = RecordingRenderer::new();
    let log = renderer.log();
    let mut ui = Ui::new(Box::new(renderer), config);
    assert_eq!(ui.viewport(), (1280, 720));
    assert_eq!(log.calls().first(), Some(&DrawCall::Resize { width: 1280, height: 720 }));

    let label = ui.create_label_ex(None, &ElementSpec::new(0, 0, 10, 10).text("x"));
    assert_eq!(ui.font(label).map(|f| f.size), Some(14));
    assert!(log
        .calls()
        .iter()
        .any(|c| matches!(c, DrawCall::LoadFont { name, size: 14, .. } if name == "Verdana")));
}

/// Test: A missing file reports the path it tried.
#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    match UiConfig::load(&path) {
        Err(UiError::ConfigRead { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {other:?}"),
    }
}

/// Test: Malformed and invalid files are rejected.
#[test]
fn test_invalid_config_rejected() {
    assert!(matches!(
        UiConfig::from_toml_str("viewport_width = \"wide\""),
        Err(UiError::ConfigParse(_))
    ));
    assert!(matches!(
        UiConfig::from_toml_str("glyph_range = [200, 100]"),
        Err(UiError::InvalidConfig(_))
    ));
}

/// Test: Init parameter bitmasks round-trip through the configuration.
#[test]
fn test_init_params() {
    let params = InitParams::DRAW_ON_DEMAND | InitParams::WITHOUT_INPUT;
    let config = UiConfig::with_params(params);
    assert!(config.draw_on_demand);
    assert!(!config.input_enabled);
    assert_eq!(config.params(), params);
}
