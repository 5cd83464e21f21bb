//! Tests for db::factory and repository configuration resolution.

mod support;

use std::str::FromStr;

use launch_booking::db::factory::{RepositoryFactory, RepositoryType};
use launch_booking::db::{RepositoryConfig, RepositorySettings};

#[test]
fn test_repository_type_from_str_is_case_insensitive() {
    assert_eq!(
        RepositoryType::from_str("POSTGRES").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("pg").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("Local").unwrap(),
        RepositoryType::Local
    );
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("sqlite");
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

fn env_repository_type() -> Result<RepositoryType, launch_booking::db::RepositoryError> {
    RepositoryConfig::default().repository_type()
}

#[test]
fn test_repository_type_without_env_is_local() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(env_repository_type().unwrap(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_with_database_url_is_postgres() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", Some("postgres://localhost/bookings")),
        ],
        || {
            assert_eq!(env_repository_type().unwrap(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_repository_type_explicit_env_wins_over_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/bookings")),
        ],
        || {
            assert_eq!(env_repository_type().unwrap(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_invalid_env_is_an_error() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("invalid"))], || {
        let err = env_repository_type().unwrap_err();
        assert!(err.to_string().contains("Invalid repository type"));
    });
}

#[test]
fn test_invalid_env_type_fails_startup_path() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("invalid"))], || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let result =
            runtime.block_on(RepositoryFactory::from_repository_config(&RepositoryConfig::default()));
        assert!(result.is_err());
    });
}

#[test]
fn test_config_type_resolution_order() {
    let file_says_postgres = RepositoryConfig {
        repository: RepositorySettings {
            repo_type: Some("postgres".into()),
        },
        ..Default::default()
    };

    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        assert_eq!(
            file_says_postgres.repository_type().unwrap(),
            RepositoryType::Local
        );
    });

    support::with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        assert_eq!(
            file_says_postgres.repository_type().unwrap(),
            RepositoryType::Postgres
        );
    });

    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(
                RepositoryConfig::default().repository_type().unwrap(),
                RepositoryType::Local
            );
        },
    );
}

#[test]
fn test_config_invalid_type_is_an_error() {
    let config = RepositoryConfig {
        repository: RepositorySettings {
            repo_type: Some("cassandra".into()),
        },
        ..Default::default()
    };
    support::with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        assert!(config.repository_type().is_err());
    });
}

#[tokio::test]
async fn test_create_local_via_factory_is_seeded() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();
    let ids: Vec<i64> = repo
        .list_destination_ids()
        .await
        .unwrap()
        .into_iter()
        .map(i64::from)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_from_repository_config_local() {
    let config = RepositoryConfig {
        repository: RepositorySettings {
            repo_type: Some("local".into()),
        },
        ..Default::default()
    };

    support::with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let repo = runtime
            .block_on(RepositoryFactory::from_repository_config(&config))
            .unwrap();
        assert!(runtime.block_on(repo.health_check()).unwrap());
    });
}

#[cfg(feature = "postgres-repo")]
#[tokio::test]
async fn test_create_postgres_without_config_fails() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    assert!(result
        .err()
        .unwrap()
        .to_string()
        .contains("requires PostgresConfig"));
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_create_postgres_without_feature_fails() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    assert!(result
        .err()
        .unwrap()
        .to_string()
        .contains("feature not enabled"));
}
