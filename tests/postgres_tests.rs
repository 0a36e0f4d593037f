//! Integration tests for the PostgreSQL invoice store.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a PostgreSQL container)
//! - Feature flag `postgres` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features postgres --test postgres_tests -- --test-threads=1
//! ```
//!
//! # Test isolation
//!
//! All tests share a single PostgreSQL container (via `OnceLock`). Each test
//! creates a fresh `PgPool` and truncates the invoices table before running.

#![cfg(feature = "postgres")]

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use invoices::actions::InvoiceActions;
use invoices::core::auth::CredentialsProvider;
use invoices::core::cache::ViewCache;
use invoices::core::invoice::{Cents, InvoiceChanges, InvoiceStatus, NewInvoice};
use invoices::core::service::InvoiceStore;
use invoices::core::state::{ActionOutcome, ActionState, FailureKind};
use invoices::core::validation::FormData;
use invoices::server::ServerBuilder;
use invoices::storage::PostgresInvoiceStore;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::{Arc, OnceLock};
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
const OTHER_CUSTOMER: &str = "76d65c26-f784-44a2-ac19-586678f7c2f2";

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh pool per test)
// ---------------------------------------------------------------------------

/// Keeps the container alive for the whole test binary.
///
/// Stored in a std `OnceLock` so it outlives the runtime of each `#[tokio::test]`.
struct PgTestEnv {
    _container: testcontainers::ContainerAsync<Postgres>,
    connection_url: String,
}

static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container - is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let store = PostgresInvoiceStore::connect(&url, 1)
        .await
        .expect("Failed to connect to PostgreSQL");
    sqlx::migrate!("./migrations")
        .run(store.pool())
        .await
        .expect("Failed to run migrations");
    store.pool().close().await;

    let _ = TEST_ENV.set(PgTestEnv {
        _container: container,
        connection_url: url,
    });
    TEST_ENV.get().unwrap()
}

/// Fresh pool bound to the current runtime.
async fn pg_pool() -> PgPool {
    let env = init_pg_env().await;
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&env.connection_url)
        .await
        .expect("Failed to connect to PostgreSQL")
}

async fn clean_store() -> PostgresInvoiceStore {
    let pool = pg_pool().await;
    sqlx::query("TRUNCATE invoices")
        .execute(&pool)
        .await
        .expect("Failed to truncate invoices table");
    PostgresInvoiceStore::new(pool)
}

fn new_invoice(amount: i64, date: NaiveDate) -> NewInvoice {
    NewInvoice {
        customer_id: CUSTOMER.to_string(),
        amount: Cents(amount),
        status: InvoiceStatus::Pending,
        date,
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_insert_generates_id() {
    let store = clean_store().await;

    let id = store.insert(new_invoice(4250, ymd(2024, 5, 17))).await.unwrap();
    let invoice = store.get(&id.to_string()).await.unwrap().unwrap();

    assert_eq!(invoice.id, id);
    assert_eq!(invoice.customer_id, CUSTOMER);
    assert_eq!(invoice.amount, Cents(4250));
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert_eq!(invoice.date, ymd(2024, 5, 17));
}

#[tokio::test]
async fn test_update_leaves_date() {
    let store = clean_store().await;
    let id = store.insert(new_invoice(100, ymd(2023, 1, 2))).await.unwrap();

    store
        .update(
            &id.to_string(),
            InvoiceChanges {
                customer_id: OTHER_CUSTOMER.to_string(),
                amount: Cents(999),
                status: InvoiceStatus::Paid,
            },
        )
        .await
        .unwrap();

    let invoice = store.get(&id.to_string()).await.unwrap().unwrap();
    assert_eq!(invoice.customer_id, OTHER_CUSTOMER);
    assert_eq!(invoice.amount, Cents(999));
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert_eq!(invoice.date, ymd(2023, 1, 2));
}

#[tokio::test]
async fn test_delete_removes_row() {
    let store = clean_store().await;
    let id = store.insert(new_invoice(100, ymd(2023, 1, 2))).await.unwrap();

    store.delete(&id.to_string()).await.unwrap();
    assert!(store.get(&id.to_string()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_newest_first() {
    let store = clean_store().await;
    store.insert(new_invoice(1, ymd(2023, 1, 2))).await.unwrap();
    store.insert(new_invoice(2, ymd(2024, 6, 1))).await.unwrap();
    store.insert(new_invoice(3, ymd(2023, 8, 9))).await.unwrap();

    let amounts: Vec<i64> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|i| i.amount.value())
        .collect();
    assert_eq!(amounts, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_malformed_ids_are_query_errors() {
    let store = clean_store().await;

    assert!(store.get("not-a-uuid").await.is_err());
    assert!(store.delete("not-a-uuid").await.is_err());

    let mut row = new_invoice(1, ymd(2023, 1, 2));
    row.customer_id = "c1".to_string();
    assert!(store.insert(row).await.is_err());
}

// ---------------------------------------------------------------------------
// Actions against PostgreSQL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_action_round_trip() {
    let store = clean_store().await;
    let actions = InvoiceActions::new(
        Arc::new(store.clone()),
        Arc::new(ViewCache::new()),
        Arc::new(CredentialsProvider::default()),
    )
    .with_clock(|| ymd(2024, 5, 17));

    let form: FormData = [("customerId", CUSTOMER), ("amount", "42.50"), ("status", "pending")]
        .into_iter()
        .collect();
    let outcome = actions.create_invoice(&ActionState::default(), &form).await;
    assert_eq!(outcome.redirect_target(), Some("/dashboard/invoices"));

    let invoices = store.list().await.unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].amount, Cents(4250));
    assert_eq!(invoices[0].date, ymd(2024, 5, 17));
}

#[tokio::test]
async fn test_non_uuid_customer_is_database_error() {
    let store = clean_store().await;
    let actions = InvoiceActions::new(
        Arc::new(store.clone()),
        Arc::new(ViewCache::new()),
        Arc::new(CredentialsProvider::default()),
    );

    let form: FormData = [("customerId", "c1"), ("amount", "1"), ("status", "paid")]
        .into_iter()
        .collect();
    let outcome = actions.create_invoice(&ActionState::default(), &form).await;

    let ActionOutcome::Failed { kind, state } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(kind, FailureKind::Store);
    assert_eq!(state.message.as_deref(), Some("Database Error"));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_http_create_then_listing() {
    let store = clean_store().await;
    let router = ServerBuilder::new()
        .with_store(store)
        .with_clock(|| ymd(2024, 5, 17))
        .build()
        .unwrap();
    let server = TestServer::new(router);

    server
        .post("/dashboard/invoices/create")
        .form(&[("customerId", CUSTOMER), ("amount", "10"), ("status", "paid")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let listing: serde_json::Value = server.get("/dashboard/invoices").await.json();
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["invoices"][0]["amount"], 1000);
    assert_eq!(listing["invoices"][0]["status"], "paid");
}
