//! Loading converter configuration from disk

use kvmarshal::{ConfigError, Converter, ConverterConfig, Object, SerializerPolicy, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_converter_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "strict_types = true\nserializer = \"none\"\n").unwrap();

    let conv = Converter::from_file(&path).unwrap();
    assert!(conv.is_strict());
    assert_eq!(conv.serializer_policy(), SerializerPolicy::None);
    assert!(conv.to_value(&Object::Bool(true)).is_err());
}

#[test]
fn test_default_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    ConverterConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(ConverterConfig::from_file(&path).unwrap(), ConverterConfig::default());

    std::fs::write(&path, "pool_capacity = 8\n").unwrap();
    ConverterConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(ConverterConfig::from_file(&path).unwrap().pool_capacity, 8);
}

#[test]
fn test_invalid_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "max_nesting_depth = 0\n").unwrap();
    assert!(matches!(Converter::from_file(&path), Err(ConfigError::Invalid(_))));

    let missing = dir.path().join("absent.toml");
    assert!(matches!(ConverterConfig::from_file(&missing), Err(ConfigError::Io { .. })));
}
