//! ForgeStore CLI - Storefront Bridge Interface
//!
//! Commands: variants, resolve, products, product, send-email
//! Outputs JSON to stdout
//! Returns non-zero on fetch or relay failure

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use forgestore_core::{
    handle_send_email, DetailState, EmailRequest, HttpCatalogClient, HttpMailTransport,
    MailerConfig, ProductDetailViewModel, ProductSource, RelayResponse, TracingRelay,
    VariantCatalog, VariantTag, DEFAULT_API_BASE,
};
use forgestore_core::transform::resolve;

#[derive(Parser)]
#[command(name = "forgestore-cli")]
#[command(about = "ForgeStore CLI - Licensed Image Storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the storefront API
    #[arg(short, long, default_value = DEFAULT_API_BASE)]
    api_base: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List the variant catalog
    Variants,

    /// Resolve a variant kind to its CDN transformation
    Resolve {
        /// Variant kind (SQUARE, WIDE, PORTRAIT; unknown kinds degrade to SQUARE)
        #[arg(short, long)]
        kind: String,
    },

    /// Fetch the product list
    Products,

    /// Fetch one product and derive its preview
    Product {
        /// Product ID
        #[arg(short, long)]
        id: String,

        /// Variant kind to select before deriving the preview
        #[arg(short, long)]
        select: Option<String>,
    },

    /// Send a transactional email through the mail relay
    SendEmail {
        /// JSON payload (to, subject, text)
        #[arg(short, long)]
        payload: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = VariantCatalog::new();

    match cli.command {
        Commands::Variants => {
            println!(
                "{}",
                serde_json::to_string_pretty(catalog.definitions()).unwrap()
            );
            ExitCode::SUCCESS
        }

        Commands::Resolve { kind } => {
            let tag = VariantTag::from_wire(&kind);
            let transformation = resolve(&catalog, Some(&tag));
            println!("{}", serde_json::to_string_pretty(&transformation).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Products => {
            let client = match HttpCatalogClient::new(&cli.api_base) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            match client.list_products().await {
                Ok(products) => {
                    println!("{}", serde_json::to_string_pretty(&products).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    println!(r#"{{"error": "{}"}}"#, e.user_message());
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Product { id, select } => {
            let client = match HttpCatalogClient::new(&cli.api_base) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let mut view = ProductDetailViewModel::new(Arc::new(catalog), Arc::new(TracingRelay));
            view.load(&client, Some(id.as_str())).await;

            let product = match view.state() {
                DetailState::Loaded(product) => product.clone(),
                DetailState::Error(message) => {
                    println!(r#"{{"error": "{}"}}"#, message);
                    return ExitCode::FAILURE;
                }
                DetailState::Loading => {
                    println!(r#"{{"error": "fetch did not complete"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            if let Some(kind) = &select {
                match product
                    .variants
                    .iter()
                    .position(|v| v.kind.as_str().eq_ignore_ascii_case(kind))
                {
                    Some(index) => {
                        view.select_variant(index);
                    }
                    None => eprintln!("variant kind {kind} is not offered by this product"),
                }
            }

            let output = serde_json::json!({
                "product": product,
                "aspectRatio": view.aspect_ratio(),
                "transformation": view.transformation(),
                "previewDimensions": view.preview_dimensions(),
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
            ExitCode::SUCCESS
        }

        Commands::SendEmail { payload } => {
            let request: EmailRequest = match serde_json::from_str(&payload) {
                Ok(request) => request,
                Err(e) => {
                    println!(r#"{{"error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            // A misconfigured relay answers the same generic 500 body the
            // endpoint sends for any delivery failure.
            let relay = MailerConfig::from_env().and_then(|config| {
                HttpMailTransport::new(&config).map(|transport| (config, transport))
            });
            let response = match relay {
                Ok((config, transport)) => {
                    handle_send_email(request, &config, &transport).await
                }
                Err(e) => {
                    eprintln!("mail relay not usable: {e}");
                    RelayResponse {
                        status: 500,
                        message: "Error sending email".to_string(),
                    }
                }
            };

            let output = serde_json::json!({
                "status": response.status,
                "message": response.message,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
            match response.status {
                200 => ExitCode::SUCCESS,
                400 => ExitCode::from(2), // Rejected payload
                _ => ExitCode::FAILURE,
            }
        }
    }
}
