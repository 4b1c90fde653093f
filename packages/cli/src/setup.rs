// ABOUTME: Orchestration for the one-time Hearth provisioning run
// ABOUTME: Sequences OAuth, credential persistence, device registration, and prompts

use anyhow::Context;
use colored::*;
use inquire::{Confirm, Text};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use hearth_auth::{ClientSecret, CredentialRecord, CredentialStore, FlowRunner};
use hearth_config::{
    DEFAULT_CALLBACK_PORT, DEFAULT_DATA_DIR, DEFAULT_DEVICE_API_URL, HEARTH_CALLBACK_PORT,
    HEARTH_DATA_DIR, HEARTH_DEVICE_API_URL, OOB_REDIRECT_URI,
};
use hearth_registry::{DeviceConfigStore, DeviceRegistrar};

pub struct SetupOptions {
    pub client_secret: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub manual: bool,
    pub port: Option<u16>,
    pub skip_registration: bool,
}

/// Run the full provisioning sequence
pub async fn run(options: SetupOptions) -> anyhow::Result<()> {
    // Validate the descriptor before any prompt or write happens
    let secret = ClientSecret::load(&options.client_secret)?;

    let data_dir = resolve_data_dir(options.data_dir.clone());
    fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    println!("{}", "🏠 Hearth Assistant Setup".bold().cyan());
    println!();
    println!("Using client secret: {}", options.client_secret.display());

    // ── Step 1: OAuth ────────────────────────────────────────────────
    let credential_store = CredentialStore::new(&data_dir);

    let refresh = !credential_store.exists()
        || confirm_overwrite("Credentials already exist", credential_store.path())?;
    if !refresh {
        println!("Keeping existing credentials.");
    }

    let record = provision_credentials(
        &credential_store,
        refresh,
        obtain_credentials(secret, &options),
    )
    .await?;

    if refresh {
        println!();
        println!(
            "{} Credentials saved to {}",
            "✓".green().bold(),
            credential_store.path().display()
        );
    }

    if options.skip_registration {
        debug!("Skipping device registration");
        print_summary(credential_store.path(), None);
        return Ok(());
    }

    // ── Step 2: Device registration ──────────────────────────────────
    println!();
    println!("{}", "📟 Device Registration".bold().cyan());

    let device_store = DeviceConfigStore::new(&data_dir);

    let mut default_project = None;
    if device_store.exists() {
        if !confirm_overwrite("Device config already exists", device_store.path())? {
            println!("Keeping existing device config.");
            print_summary(credential_store.path(), Some(device_store.path()));
            return Ok(());
        }
        default_project = device_store.default_project_id().await;
    }

    let project_id = prompt_project_id(default_project.as_deref())?;

    let registrar = DeviceRegistrar::with_base_url(record.token.clone(), device_api_url())?;
    let config = registrar.register(&project_id).await?;
    device_store.save(&config).await?;

    println!();
    println!(
        "{} Device config saved to {}",
        "✓".green().bold(),
        device_store.path().display()
    );

    print_summary(credential_store.path(), Some(device_store.path()));
    Ok(())
}

/// Load the existing record, or run the flow and persist the result
///
/// The keep path only reads, so the credential file's bytes stay untouched.
/// `obtain` is lazy and is never awaited when the record is kept.
async fn provision_credentials(
    store: &CredentialStore,
    refresh: bool,
    obtain: impl std::future::Future<Output = anyhow::Result<CredentialRecord>>,
) -> anyhow::Result<CredentialRecord> {
    if refresh {
        let record = obtain.await?;
        store.save(&record).await?;
        Ok(record)
    } else {
        Ok(store.load().await?)
    }
}

/// Run the OAuth flow in the variant the user selected
async fn obtain_credentials(
    secret: ClientSecret,
    options: &SetupOptions,
) -> anyhow::Result<CredentialRecord> {
    let runner = FlowRunner::new(secret);

    if options.manual {
        let (auth_url, pkce) = runner.manual_authorization()?;

        println!();
        println!("Open this URL in your browser and authorize:");
        println!();
        println!("  {}", auth_url);
        println!();

        let code = Text::new("Paste the authorization code:").prompt()?;
        let record = runner
            .exchange_code(&code, OOB_REDIRECT_URI, &pkce.code_verifier)
            .await?;
        Ok(record)
    } else {
        let record = runner
            .authenticate_via_listener(resolve_callback_port(options.port))
            .await?;
        Ok(record)
    }
}

fn confirm_overwrite(what: &str, path: &Path) -> anyhow::Result<bool> {
    println!();
    let answer = Confirm::new(&format!("{} at {}. Overwrite?", what, path.display()))
        .with_default(false)
        .prompt()?;
    Ok(answer)
}

fn prompt_project_id(default: Option<&str>) -> anyhow::Result<String> {
    println!();
    let mut prompt = Text::new("Enter your cloud project ID:");
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }

    let input = prompt.prompt()?;
    resolve_project_id(&input, default)
}

/// Resolve the effective project id from prompt input and the prior value
fn resolve_project_id(input: &str, default: Option<&str>) -> anyhow::Result<String> {
    let input = input.trim();
    if !input.is_empty() {
        return Ok(input.to_string());
    }

    match default {
        Some(default) if !default.trim().is_empty() => Ok(default.trim().to_string()),
        _ => anyhow::bail!("Project ID is required"),
    }
}

/// Resolve the data directory: flag, then env var, then default
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var(HEARTH_DATA_DIR).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Resolve the callback listener port: flag, then env var, then default
fn resolve_callback_port(flag: Option<u16>) -> u16 {
    flag.or_else(|| {
        std::env::var(HEARTH_CALLBACK_PORT)
            .ok()
            .and_then(|p| p.parse().ok())
    })
    .unwrap_or(DEFAULT_CALLBACK_PORT)
}

fn device_api_url() -> String {
    std::env::var(HEARTH_DEVICE_API_URL).unwrap_or_else(|_| DEFAULT_DEVICE_API_URL.to_string())
}

fn print_summary(credentials_path: &Path, device_config_path: Option<&Path>) {
    println!();
    println!("{}", "✅ Setup complete!".bold().green());
    println!();
    println!("  Credentials:   {}", credentials_path.display());
    if let Some(path) = device_config_path {
        println!("  Device config: {}", path.display());
    }
    println!();
    println!("You can now start the Hearth assistant daemon.");
}
