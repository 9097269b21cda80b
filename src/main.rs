mod cli;

use gallery::{
    accounts::AccountRepository,
    config,
    images::{Download, ImageRepository, NewImage},
    shell::{self, Shell},
};
use gallery_common::ImageId;
use gallery_db::gateway::Gateway;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults based on the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "gallery=trace,gallery_db=debug,gallery_common=debug".to_string()
        } else {
            "gallery=info,gallery_db=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }

    tracing::debug!("Opening database at {:?}", config.database.path);
    let gateway = Gateway::open(&config.database.path, config.database.gateway_options())
        .with_context(|| format!("Failed to open database {:?}", config.database.path))?;

    let accounts = AccountRepository::new(gateway.clone());
    let images = ImageRepository::new(gateway);

    match cli.command {
        Commands::Shell => run_shell(&accounts, &images),
        Commands::Register { username, password } => register(&accounts, &username, &password),
        Commands::Login { username, password } => login(&accounts, &username, &password),
        Commands::Upload {
            username,
            password,
            file,
            description,
        } => upload(&accounts, &images, &username, &password, &file, &description),
        Commands::List { json } => list(&images, json),
        Commands::Download { id, output } => download(&images, id, &output),
    }
}

fn run_shell(accounts: &AccountRepository, images: &ImageRepository) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(accounts, images, stdin.lock(), stdout.lock())
        .run()
        .context("Shell terminated")
}

fn register(accounts: &AccountRepository, username: &str, password: &str) -> Result<()> {
    let user = accounts
        .register(username, password)
        .context("Error registering user")?;
    println!("User registered successfully! (ID: {})", user.id);
    Ok(())
}

fn login(accounts: &AccountRepository, username: &str, password: &str) -> Result<()> {
    match accounts.login(username, password).context("Error during login")? {
        Some(user) => {
            println!("Login successful! (ID: {})", user.id);
            Ok(())
        }
        None => anyhow::bail!("Invalid username or password."),
    }
}

fn upload(
    accounts: &AccountRepository,
    images: &ImageRepository,
    username: &str,
    password: &str,
    file: &Path,
    description: &str,
) -> Result<()> {
    let Some(user) = accounts.login(username, password).context("Error during login")? else {
        anyhow::bail!("Invalid username or password.");
    };

    let id = images
        .upload(&NewImage::new(user.id, file, description))
        .context("Error uploading image")?;
    println!("Image uploaded successfully! (ID: {})", id);
    Ok(())
}

fn list(images: &ImageRepository, json: bool) -> Result<()> {
    let images = images.list_all().context("Error retrieving images")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    if images.is_empty() {
        println!("No images found.");
    }
    let mut out = std::io::stdout().lock();
    for image in &images {
        shell::write_summary(&mut out, image)?;
    }
    Ok(())
}

fn download(images: &ImageRepository, id: ImageId, output: &Path) -> Result<()> {
    match images.download(id, output).context("Error downloading image")? {
        Download::Saved { bytes } => {
            println!(
                "Image downloaded successfully at: {} ({} bytes)",
                output.display(),
                bytes
            );
            Ok(())
        }
        Download::Missing => anyhow::bail!("No image found with ID: {}", id),
    }
}
