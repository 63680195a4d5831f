//! Postgres quote store tests. They start a PostgreSQL container, so they
//! need Docker: `cargo test --test postgres_repository_test -- --ignored`

mod common;

use hal9000::store::{DatabaseConfig, PostgresQuoteRepository, QuoteRepository};
use testcontainers::clients::Cli;

async fn connect(port: u16) -> PostgresQuoteRepository {
    let connection_string = common::build_connection_string("127.0.0.1", port);
    let config = DatabaseConfig::from_connection_string(&connection_string)
        .expect("Failed to create config from connection string")
        .with_max_pool_size(2);

    let repo = PostgresQuoteRepository::connect(&config)
        .await
        .expect("Failed to connect to Postgres");
    repo.ensure_schema().await.expect("Failed to create schema");
    repo
}

#[tokio::test]
#[ignore]
async fn test_insert_and_list() {
    let docker = Cli::default();
    let container = docker.run(common::create_postgres_container());
    let repo = connect(container.get_host_port_ipv4(common::POSTGRES_PORT)).await;

    assert!(repo.list_all().await.unwrap().is_empty());

    let first = repo
        .insert("HAL 9000", "I am putting myself to the fullest possible use.")
        .await
        .unwrap();
    let second = repo
        .insert("Dave Bowman", "Open the pod bay doors, HAL.")
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.author, "HAL 9000");

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].quote, "Open the pod bay doors, HAL.");
}

#[tokio::test]
#[ignore]
async fn test_schema_creation_is_idempotent() {
    let docker = Cli::default();
    let container = docker.run(common::create_postgres_container());
    let repo = connect(container.get_host_port_ipv4(common::POSTGRES_PORT)).await;

    repo.insert("a", "b").await.unwrap();
    repo.ensure_schema().await.unwrap();

    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}
