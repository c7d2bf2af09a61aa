use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use banner_carousel::carousel::{Align, SlideBasis};
use banner_carousel::config::Configuration;
use banner_carousel::error::Error;

#[test]
fn empty_config_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.carousel.align, Align::Start);
    assert!(!cfg.carousel.loop_enabled);
    assert_eq!(cfg.carousel.slide_basis, SlideBasis::Full);
    assert_eq!(cfg.transition_duration, Duration::from_millis(300));
    assert!(!cfg.autoplay.enabled);
    assert_eq!(cfg.autoplay.interval, Duration::from_secs(5));
    assert!(cfg.feed_path.is_none());
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
feed-path: "/srv/banners.json"
viewport-width: 1024.0
transition-duration: 450ms
carousel:
  align: center
  loop: true
  slide-basis: 80%
autoplay:
  enabled: true
  interval: 3s
  reset-on-interaction: false
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.feed_path, Some(PathBuf::from("/srv/banners.json")));
    assert!((cfg.viewport_width - 1024.0).abs() < f32::EPSILON);
    assert_eq!(cfg.transition_duration, Duration::from_millis(450));
    assert_eq!(cfg.carousel.align, Align::Center);
    assert!(cfg.carousel.loop_enabled);
    assert_eq!(cfg.carousel.slide_basis, SlideBasis::Fraction(0.8));
    assert!(cfg.autoplay.enabled);
    assert_eq!(cfg.autoplay.interval, Duration::from_secs(3));
    assert!(!cfg.autoplay.reset_on_interaction);
}

#[test]
fn unknown_align_is_rejected() {
    let yaml = r#"
carousel:
  align: middle
"#;
    let err = serde_yaml::from_str::<Configuration>(yaml).unwrap_err();
    assert!(err.to_string().contains("middle"), "{err}");
}

#[test]
fn unknown_fields_are_rejected() {
    let yaml = r#"
carousel:
  drag-free: true
"#;
    assert!(serde_yaml::from_str::<Configuration>(yaml).is_err());
}

#[test]
fn zero_autoplay_interval_fails_validation() {
    let yaml = r#"
autoplay:
  enabled: true
  interval: 0s
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(format!("{err:#}").contains("autoplay.interval"));
}

#[test]
fn non_positive_slide_basis_fails_validation() {
    let yaml = r#"
carousel:
  slide-basis: 0px
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert!(cfg.validated().is_err());
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "carousel:\n  align: end\n  loop: true").unwrap();
    let cfg = Configuration::from_yaml_file(file.path())
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(cfg.carousel.align, Align::End);
    assert!(cfg.carousel.loop_enabled);
}

#[test]
fn malformed_file_reports_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "carousel:\n  align: sideways").unwrap();
    let err = Configuration::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "unexpected error: {err:?}");
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Configuration::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
    match err {
        Error::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected an io error, got {other:?}"),
    }
}
