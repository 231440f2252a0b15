use anyhow::{Context as _, Result};
use prodir_application::{ProfessionApi, ProfessionFlagReconciler, ProfessionUseCase};
use prodir_core::error::ProdirError;
use prodir_core::profession::RawFields;
use prodir_core::response::ApiResponse;
use prodir_core::user::{User, UserId};
use prodir_infrastructure::{ConfigService, Repositories};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub struct Context {
    repositories: Repositories,
    use_case: ProfessionUseCase,
    user: Option<UserId>,
}

impl Context {
    /// Loads config, installs logging and opens the configured store.
    pub fn load(config_path: Option<&Path>, user: Option<String>) -> Result<Self> {
        let config = ConfigService::new(config_path)
            .get_config()
            .context("Failed to load configuration")?;

        init_tracing(&config.logging.level);

        let repositories =
            Repositories::open(&config).context("Failed to open profession storage")?;
        let use_case =
            ProfessionUseCase::new(repositories.professions.clone(), repositories.users.clone());

        Ok(Self {
            repositories,
            use_case,
            user: user.map(UserId::new),
        })
    }
}

/// Logs to stderr so stdout carries only the response envelope.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print<T: Serialize>(response: &ApiResponse<T>) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(response.success)
}

/// Parses `--data`; anything but a JSON object is reported as a 400 envelope.
fn parse_fields(data: &str) -> std::result::Result<RawFields, ProdirError> {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(ProdirError::validation(["Request body must be a JSON object"])),
        Err(e) => Err(ProdirError::validation([format!("Invalid JSON: {}", e)])),
    }
}

pub async fn register_user(context: &Context, id: String, name: Option<String>) -> Result<bool> {
    let user = User::new(UserId::new(id), name);
    let response = match context.repositories.users.save(&user).await {
        Ok(()) => ApiResponse::created(user),
        Err(e) => ApiResponse::from_error(&e, "Failed to register user."),
    };
    print(&response)
}

pub async fn create(context: &Context, data: &str) -> Result<bool> {
    let response = match parse_fields(data) {
        Ok(fields) => {
            ProfessionApi::new(&context.use_case)
                .add_profession(context.user.as_ref(), &fields)
                .await
        }
        Err(e) => ApiResponse::from_error(&e, ""),
    };
    print(&response)
}

pub async fn find(context: &Context, service_name: Option<&str>) -> Result<bool> {
    let response = ProfessionApi::new(&context.use_case)
        .professionals_by_service(service_name)
        .await;
    print(&response)
}

pub async fn update(context: &Context, data: &str) -> Result<bool> {
    let response = match parse_fields(data) {
        Ok(fields) => {
            ProfessionApi::new(&context.use_case)
                .update_professional_profile(context.user.as_ref(), &fields)
                .await
        }
        Err(e) => ApiResponse::from_error(&e, ""),
    };
    print(&response)
}

pub async fn reconcile(context: &Context) -> Result<bool> {
    let reconciler = ProfessionFlagReconciler::new(
        context.repositories.professions.clone(),
        context.repositories.users.clone(),
    );
    let response = match reconciler.reconcile().await {
        Ok(report) => ApiResponse::ok(report),
        Err(e) => ApiResponse::from_error(&e, "Failed to reconcile profession flags."),
    };
    print(&response)
}
