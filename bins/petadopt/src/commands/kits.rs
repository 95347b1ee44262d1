//! `petadopt kits`

use crate::app::{print_json, App};
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use petadopt_cli::output::{format_count, format_price, Status};
use petadopt_cli::progress::{finish_error, finish_success, progress_bar};
use petadopt_core::{Error, ResultExt};
use petadopt_shelter::models::{KitCategory, NewKit};
use petadopt_shelter::{ApiResponse, Cart, ShelterError};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum KitsCommand {
    /// List the kit catalog
    List,

    /// Add one kit
    Add {
        #[arg(long)]
        name: String,

        /// Price in rupees
        #[arg(long)]
        price: u32,

        #[arg(long)]
        description: String,

        #[arg(long)]
        image: String,

        /// Food, Toy, Accessory, or Health
        #[arg(long)]
        category: KitCategory,
    },

    /// Seed the catalog from JSON files (each an array of kits)
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Clear the catalog first
        #[arg(long)]
        replace: bool,
    },

    /// Remove every kit
    Clear,

    /// Price a cart of kits (cash on delivery)
    Cart {
        /// Kit IDs; repeat an ID to order more than one
        #[arg(required = true)]
        kit_ids: Vec<String>,
    },
}

pub fn run(app: &App, command: KitsCommand) -> Result<()> {
    let service = app.kits();

    match command {
        KitsCommand::List => {
            let kits = service.list()?;
            if app.is_json() {
                return print_json(&ApiResponse::list(kits));
            }

            Status::header("Kit shop");
            for kit in &kits {
                println!(
                    "  {:<24} {:<10} {:>9}  {}",
                    kit.name,
                    kit.category.to_string(),
                    format_price(u64::from(kit.price)),
                    kit.id.dimmed()
                );
            }
            println!();
            println!("  {}", format_count(kits.len(), "kit", "kits"));
            Ok(())
        }

        KitsCommand::Add {
            name,
            price,
            description,
            image,
            category,
        } => {
            let kit = service.create(NewKit {
                name,
                price,
                description,
                image,
                category,
            })?;

            if app.is_json() {
                return print_json(&ApiResponse::success(kit).with_message("Kit added"));
            }
            Status::success(&format!("Added {} ({})", kit.name, kit.id));
            Ok(())
        }

        KitsCommand::Import { files, replace } => {
            if replace {
                let removed = service.clear()?;
                let replaced = format_count(removed, "existing kit", "existing kits");
                Status::warning(&format!("Replaced {}", replaced));
            }

            let pb = progress_bar(files.len() as u64, "Importing kits");
            let mut imported = 0;
            for file in &files {
                let batch = read_kits(file)
                    .map_err(anyhow::Error::from)
                    .and_then(|payloads| service.import(payloads).map_err(anyhow::Error::from));
                match batch {
                    Ok(kits) => imported += kits.len(),
                    Err(err) => {
                        finish_error(&pb, &format!("Failed on {}", file.display()));
                        return Err(err);
                    }
                }
                pb.inc(1);
            }
            finish_success(&pb, &format!("Imported {}", format_count(imported, "kit", "kits")));

            if app.is_json() {
                return print_json(&ApiResponse::success(imported).with_message("Kits imported"));
            }
            Ok(())
        }

        KitsCommand::Clear => {
            let removed = service.clear()?;
            if app.is_json() {
                return print_json(&ApiResponse::success(removed).with_message("Kits cleared"));
            }
            Status::success(&format!("Removed {}", format_count(removed, "kit", "kits")));
            Ok(())
        }

        KitsCommand::Cart { kit_ids } => {
            let catalog = service.list()?;
            let mut cart = Cart::new();
            for id in &kit_ids {
                let kit = catalog
                    .iter()
                    .find(|kit| &kit.id == id)
                    .ok_or_else(|| ShelterError::not_found("Kit", id.as_str()))?;
                cart.add(kit);
            }

            if app.is_json() {
                return print_json(&ApiResponse::success(&cart).with_message(format!(
                    "Total {} (cash on delivery)",
                    format_price(cart.total())
                )));
            }

            Status::header("Cart");
            for (index, item) in cart.items().iter().enumerate() {
                println!(
                    "  {:>2}. {:<24} {:>9}",
                    index + 1,
                    item.name,
                    format_price(u64::from(item.price))
                );
            }
            println!();
            println!(
                "  {} {}  {}",
                "Total".bold(),
                format_price(cart.total()).green(),
                "(cash on delivery)".dimmed()
            );
            Ok(())
        }
    }
}

fn read_kits(path: &Path) -> petadopt_core::Result<Vec<NewKit>> {
    if !path.is_file() {
        return Err(Error::file_not_found(path));
    }
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Reading {}", path.display()))?;
    serde_json::from_str(&content).map_err(|err| {
        Error::validation(format!("Invalid kit file {}: {}", path.display(), err))
    })
}
