use lambda_http::{run, Error};
use library_api::core::controller::AppState;
use library_api::core::repository::RepositoryStore;
use library_api::library::controller::app;
use library_api::utils::ddb::{build_db_client, create_table, setup_tracing};

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new("dev", RepositoryStore::LocalDynamoDB)
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB)
    };

    // the books table is created on startup when absent
    let client = build_db_client(state.store).await;
    let _ = create_table(&client, "books", "isbn").await;
    tracing::info!("serving library api for branch {}", state.config.branch_id);

    run(app(state)).await
}
