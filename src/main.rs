use std::sync::Arc;

use enquiry_relay::config::{ServerConfig, SmtpConfig, SubmissionBudget};
use enquiry_relay::routes::enquiry_routes;
use enquiry_relay::transport::SmtpMailer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let smtp_config = SmtpConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  required: SMTP_HOST, TO_EMAIL");
        eprintln!("  optional: SMTP_PORT, SMTP_SECURE, SMTP_USER, SMTP_PASS, FROM_EMAIL, PORT");
        std::process::exit(1);
    });
    let server_config = ServerConfig::from_env();

    eprintln!("📮 enquiry-relay v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   SMTP: {}:{} ({})",
        smtp_config.host,
        smtp_config.port,
        if smtp_config.secure { "implicit TLS" } else { "STARTTLS" }
    );
    eprintln!("   To: {}", smtp_config.to_address);
    eprintln!(
        "   Enquiry API: http://0.0.0.0:{}/api/enquiry\n",
        server_config.port
    );

    let mailer = Arc::new(SmtpMailer::new(&smtp_config)?);
    let app = enquiry_routes(mailer, SubmissionBudget::default());

    let listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", server_config.port)).await?;
    tracing::info!(port = server_config.port, "Enquiry server started");
    axum::serve(listener, app).await?;

    Ok(())
}
