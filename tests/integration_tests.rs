//! Integration tests for tokio_mediatype

use std::cmp::Ordering;
use std::path::PathBuf;
use tokio_mediatype::*;

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "tokio-mediatype-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        TempDir(dir)
    }

    fn file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_media_type_parsing_and_formatting() {
    let original = "text/html; charset=utf-8; boundary=test123";

    let mut media_type = MediaType::parse(original).unwrap();
    assert_eq!(media_type.basic_type(), "text/html");
    assert_eq!(media_type.parameter_value("charset"), Some("utf-8"));
    assert_eq!(media_type.parameter_value("boundary"), Some("test123"));
    assert_eq!(media_type.to_string(), original);

    media_type.set_parameter("title", "Hello, \"World\"");
    assert_eq!(
        media_type.to_string(),
        r#"text/html; charset=utf-8; boundary=test123; title="Hello, \"World\"""#
    );

    let reparsed: MediaType = media_type.to_string().parse().unwrap();
    assert_eq!(reparsed, media_type);
    assert_eq!(reparsed.parameter_value("TITLE"), Some("Hello, \"World\""));
}

#[test]
fn test_literal_scenarios() {
    let json = MediaType::parse("application/json; charset=utf-8").unwrap();
    assert_eq!(json.main_type(), &MainType::Application);
    assert_eq!(json.subtype(), "json");
    assert_eq!(json.parameter_value("CHARSET"), Some("utf-8"));
    assert_eq!(json.description(), "application/json; charset=utf-8");

    let yaml =
        MediaType::parse("text/vnd.json+yaml; charset=\"iso-8859-1\"; text=\"\\\"quoted\\\"\"")
            .unwrap();
    assert_eq!(yaml.parameter_value("Text"), Some("\"quoted\""));

    let email = MediaType::parse("type/subtype; email=\"test\\x40example.com\"").unwrap();
    assert_eq!(email.parameter_value("email"), Some("test@example.com"));

    let built = MediaType::with_parameters(
        MainType::Application,
        "json",
        vec![Parameter::new("charset", "utf-8")],
    );
    assert_eq!(built.to_string(), "application/json; charset=utf-8");
    assert_eq!(built, json);

    assert!(MediaType::parse("bogus").is_none());

    assert_eq!(
        MainType::classify("x-app"),
        MainType::Extension("x-app".to_string())
    );
    assert_eq!(MainType::classify("app"), MainType::Ietf("app".to_string()));
    assert_ne!(
        MainType::Extension("x-app".to_string()),
        MainType::Ietf("x-app".to_string())
    );
    assert!(MainType::Ietf("app".to_string()) < MainType::Ietf("nil".to_string()));
    assert!(MainType::Ietf("nil".to_string()) < MainType::Extension("x-app".to_string()));
}

#[test]
fn test_error_offsets() {
    match "text/plain; charset".parse::<MediaType>() {
        Err(Error::Parse { offset, kind }) => {
            assert_eq!(kind, ParseErrorKind::MissingEquals);
            assert_eq!(offset, "text/plain; charset".len());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_sorting_media_types() {
    let mut types: Vec<MediaType> = [
        "x-world/x-vrml",
        "video/mp4",
        "chemical/x-pdb",
        "text/plain; charset=utf-8",
        "application/json",
        "text/plain",
        "audio/ogg",
    ]
    .iter()
    .map(|s| MediaType::parse(s).unwrap())
    .collect();
    types.sort();

    let sorted: Vec<&str> = types.iter().map(|m| m.description()).collect();
    assert_eq!(
        sorted,
        vec![
            "application/json",
            "audio/ogg",
            "text/plain",
            "text/plain; charset=utf-8",
            "video/mp4",
            "chemical/x-pdb",
            "x-world/x-vrml",
        ]
    );
    assert_eq!(types[2].cmp(&types[2].clone()), Ordering::Equal);
}

#[test]
fn test_extension_operations() {
    let txt = type_by_extension(".txt").unwrap();
    assert_eq!(txt.description(), "text/plain; charset=utf-8");
    assert_eq!(txt.charset(), Some(Charset::Utf8));

    let jpeg = MediaType::parse("image/jpeg").unwrap();
    let extensions = extensions_by_type(&jpeg);
    assert!(extensions.contains(&".jpeg".to_string()));
    assert!(extensions.contains(&".jpg".to_string()));

    add_extension_type(".custom-integration", "application/x-custom").unwrap();
    let custom = type_by_extension(".custom-integration").unwrap();
    assert_eq!(custom.description(), "application/x-custom");
}

#[tokio::test]
async fn test_sniff_path_by_content() {
    let dir = TempDir::new("content");
    let path = dir.file("picture.bin", b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR");

    let media_type = MediaType::sniff_path(&path).await.unwrap().unwrap();
    assert_eq!(media_type.description(), "image/png");
}

#[tokio::test]
async fn test_sniff_path_falls_back_to_extension() {
    let dir = TempDir::new("fallback");
    let path = dir.file("styles.css", b"body { color: red; }\n");

    let media_type = Sniffer::new().sniff_path(&path).await.unwrap().unwrap();
    assert_eq!(media_type.description(), "text/css; charset=utf-8");

    let no_fallback = Sniffer::new().with_config(SniffConfig::default().with_extension_fallback(false));
    let media_type = no_fallback.sniff_path(&path).await.unwrap().unwrap();
    assert_eq!(media_type.description(), "text/plain; charset=utf-8");
}

#[tokio::test]
async fn test_sniff_path_unknown_content() {
    let dir = TempDir::new("unknown");
    let path = dir.file("blob.unknownext", b"\x00\x01\x02\x03\x04");

    let media_type = MediaType::sniff_path(&path).await.unwrap();
    assert!(media_type.is_none());
}

#[tokio::test]
async fn test_sniff_path_missing_file() {
    let result = MediaType::sniff_path("/definitely/not/here.png").await;
    assert!(matches!(result, Err(Error::Io(_))));
}

#[tokio::test]
async fn test_sniff_reader_respects_limit() {
    let mut data = b"GIF89a".to_vec();
    data.extend(std::iter::repeat(0u8).take(4096));

    let sniffer = Sniffer::new().with_config(SniffConfig::default().with_read_limit(6));
    let media_type = sniffer.sniff_reader(&data[..]).await.unwrap().unwrap();
    assert_eq!(media_type.basic_type(), "image/gif");
}

#[test]
fn test_charset_round_trip_through_media_type() {
    let mut media_type = MediaType::new(MainType::Text, "plain");
    media_type.set_charset(Charset::Windows1252);
    assert_eq!(media_type.to_string(), "text/plain; charset=windows-1252");

    let parsed = MediaType::parse("text/plain; charset=\"CP1252\"").unwrap();
    assert_eq!(parsed.charset(), Some(Charset::Windows1252));
}

#[test]
fn test_multipart_form_data() {
    let form = MediaType::multipart("form-data").unwrap();
    let reparsed = MediaType::parse(form.description()).unwrap();
    assert_eq!(reparsed, form);
    assert_eq!(reparsed.boundary(), form.boundary());
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip() {
    let media_type = MediaType::parse("text/plain; charset=utf-8").unwrap();
    let json = serde_json::to_string(&media_type).unwrap();
    assert_eq!(json, "\"text/plain; charset=utf-8\"");

    let decoded: MediaType = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, media_type);

    let err = serde_json::from_str::<MediaType>("\"bogus\"");
    assert!(err.is_err());

    let main_type: MainType = serde_json::from_str("\"X-Custom\"").unwrap();
    assert_eq!(main_type, MainType::Extension("x-custom".to_string()));
    assert_eq!(serde_json::to_string(&MainType::Font).unwrap(), "\"font\"");
}
