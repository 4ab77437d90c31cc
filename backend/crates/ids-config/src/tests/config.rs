use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, write_config};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, none, ok, some};
use log::LevelFilter;
use serial_test::serial;

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.database.directory, eq(crate::DEFAULT_DATABASE_DIRECTORY));
    assert_that!(config.database.name, eq(crate::DEFAULT_DATABASE_NAME));
    assert_that!(
        config.database.max_connections,
        eq(crate::DEFAULT_MAX_CONNECTIONS)
    );
    assert_that!(config.database.durable_writes, eq(true));
    assert_that!(config.collections.users, eq(crate::DEFAULT_USERS_COLLECTION));
    assert_that!(config.collections.roles, eq(crate::DEFAULT_ROLES_COLLECTION));
    assert_that!(*config.logging.level, eq(LevelFilter::Info));
    assert_that!(config.logging.file, none());
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    let _temp = setup_config_dir();

    let config = Config::load().unwrap();

    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_is_created() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let nested = temp.path().join("nested").join(".ids");
    let _dir = EnvGuard::set("IDS_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(nested.exists(), eq(true));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [database]
            name = "accounts"
            max_connections = 12
            durable_writes = false

            [collections]
            users = "people"

            [logging]
            level = "debug"
            colored = false
        "#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.database.name, eq("accounts"));
    assert_that!(config.database.max_connections, eq(12));
    assert_that!(config.database.durable_writes, eq(false));
    assert_that!(config.collections.users, eq("people"));
    assert_that!(config.collections.roles, eq(crate::DEFAULT_ROLES_COLLECTION));
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
    assert_that!(config.logging.colored, eq(false));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [database]
            name = "from_toml"
        "#,
    );
    let _name = EnvGuard::set("IDS_DATABASE_NAME", "from_env");
    let _file = EnvGuard::set("IDS_LOG_FILE", "ids.log");
    let _durable = EnvGuard::set("IDS_DATABASE_DURABLE_WRITES", "0");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.database.name, eq("from_env"));
    assert_that!(config.database.durable_writes, eq(false));
    assert_that!(config.logging.file, some(eq("ids.log")));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_keeps_previous_value() {
    let _temp = setup_config_dir();
    let _max = EnvGuard::set("IDS_DATABASE_MAX_CONNECTIONS", "many");

    let config = Config::load().unwrap();

    assert_that!(
        config.database.max_connections,
        eq(crate::DEFAULT_MAX_CONNECTIONS)
    );
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "this is not valid toml {{{{");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_no_config_dir_env_when_resolving_then_uses_dot_ids_in_cwd() {
    let _unset = EnvGuard::remove("IDS_CONFIG_DIR");

    let dir = Config::config_dir().unwrap();

    assert_that!(dir.ends_with(".ids"), eq(true));
}

#[test]
fn given_config_dir_when_resolving_database_directory_then_joins_relative_path() {
    let config = Config::default();
    let base = std::path::Path::new("/srv/ids");

    let directory = config.database_directory(base);

    assert_that!(directory, eq(&base.join("data")));
}

#[test]
fn given_no_log_file_when_describing_destination_then_stderr() {
    // Given
    let mut config = Config::default();

    // When / Then
    assert_that!(config.logging.destination(), eq("stderr"));

    config.logging.file = Some("ids.log".to_string());
    assert_that!(config.logging.destination(), eq("ids.log"));
}
