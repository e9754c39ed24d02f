use jutils::config::Config;
use jutils::error::ConfigError;
use jutils::tree::{RenderOptions, Tree};

#[test]
fn parse_complete_config() {
    let config_content = r#"
[render]
escape_control_characters = false
indent_width = 5
max_depth = 2
"#;

    let config = Config::from_toml_str(config_content).unwrap();

    assert!(!config.render.escape_control_characters);
    assert_eq!(config.render.indent_width, 5);
    assert_eq!(config.render.max_depth, Some(2));
}

#[test]
fn parse_partial_config_uses_defaults() {
    let config_content = r#"
[render]
indent_width = 2
"#;

    let config = Config::from_toml_str(config_content).unwrap();

    // Explicit value
    assert_eq!(config.render.indent_width, 2);
    // Default values
    assert!(config.render.escape_control_characters);
    assert_eq!(config.render.max_depth, None);
}

#[test]
fn parse_invalid_toml_returns_error() {
    let result = Config::from_toml_str("this is not valid toml [[[");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn parse_invalid_indent_returns_error() {
    let result = Config::from_toml_str("[render]\nindent_width = 40\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config {
        render: RenderOptions::new().with_indent_width(4).with_max_depth(3),
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&text).unwrap(), config);
}

#[test]
fn loaded_options_drive_rendering() {
    let config = Config::from_toml_str("[render]\nindent_width = 1\nmax_depth = 1\n").unwrap();

    let mut tree = Tree::new("A");
    let root = tree.root();
    let b = tree.insert_value(root, "B").unwrap();
    tree.insert_value(b, "C").unwrap();

    assert_eq!(tree.root_ref().render(&config.render), "A\n└── B");
}
