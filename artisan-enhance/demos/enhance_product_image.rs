use artisan_enhance::{Client, EnhanceConfig, Enhancer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("artisan_enhance=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> artisan_enhance::Result<()> {
    init_tracing();

    let Some(image_path) = std::env::args().nth(1) else {
        eprintln!("usage: enhance_product_image <image-path>");
        std::process::exit(2);
    };

    let client = Client::from_env()?;
    let enhancer = Enhancer::new(&client, EnhanceConfig::from_env());
    let outcome = enhancer.enhance_product_image(&image_path).await;

    if let Some(reason) = outcome.fallback_reason() {
        println!("kept original image ({reason})");
    }
    println!("{}", outcome.path().display());
    Ok(())
}
