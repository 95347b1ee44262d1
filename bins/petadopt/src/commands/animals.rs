//! `petadopt animals`

use crate::app::{print_json, App};
use anyhow::Result;
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use petadopt_cli::output::{format_count, format_price, truncate, yes_no, Status};
use petadopt_shelter::listing::{resolve_image_url, KindFilter, ListingQuery};
use petadopt_shelter::models::{Animal, NewAnimal};
use petadopt_shelter::ApiResponse;
use serde::Serialize;

#[derive(Subcommand)]
pub enum AnimalsCommand {
    /// List animals, optionally filtered
    List {
        /// Text to look for in name or breed
        #[arg(short, long, default_value = "")]
        search: String,

        /// Location, typos tolerated
        #[arg(short, long, default_value = "")]
        location: String,

        /// Species (dog, cat, farm, bird, or all)
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: String,
    },

    /// Show one listing in full
    Show {
        id: String,
    },

    /// Add a listing
    Add(AddArgs),

    /// Listings uploaded by the logged-in user
    Mine {
        /// Session token from `auth login`
        #[arg(long, env = "PETADOPT_TOKEN")]
        token: String,
    },

    /// Remove one of your listings
    Remove {
        id: String,

        /// Session token from `auth login`
        #[arg(long, env = "PETADOPT_TOKEN")]
        token: String,
    },
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    breed: String,
    #[arg(long)]
    age: String,
    #[arg(long)]
    gender: String,
    #[arg(long)]
    size: String,
    #[arg(long)]
    location: String,
    /// Species, e.g. dog or cat
    #[arg(long = "type")]
    kind: String,
    #[arg(long)]
    description: String,
    /// Adoption fee in rupees
    #[arg(long)]
    price: u32,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: String,
    /// Image path or URL
    #[arg(long, default_value = "", conflicts_with = "image_file")]
    image: String,
    /// Uploaded file name, stored as /uploads/<name> (requires --token)
    #[arg(long, requires = "token")]
    image_file: Option<String>,
    #[arg(long)]
    vaccinated: bool,
    #[arg(long)]
    neutered: bool,
    #[arg(long)]
    shelter: Option<String>,
    /// Own the listing as the logged-in user
    #[arg(long, env = "PETADOPT_TOKEN")]
    token: Option<String>,
}

impl AddArgs {
    fn payload(&self) -> NewAnimal {
        NewAnimal {
            name: self.name.clone(),
            breed: self.breed.clone(),
            age: self.age.clone(),
            gender: self.gender.clone(),
            size: self.size.clone(),
            location: self.location.clone(),
            image: self.image.clone(),
            kind: self.kind.clone(),
            description: self.description.clone(),
            vaccinated: self.vaccinated,
            neutered: self.neutered,
            price: self.price,
            phone: self.phone.clone(),
            email: self.email.clone(),
            shelter: self.shelter.clone(),
        }
    }
}

/// Listing with its image resolved against the media base URL.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnimalView<'a> {
    #[serde(flatten)]
    animal: &'a Animal,
    image_url: String,
}

pub fn run(app: &App, command: AnimalsCommand) -> Result<()> {
    let service = app.animals();

    match command {
        AnimalsCommand::List {
            search,
            location,
            kind,
        } => {
            let query = ListingQuery {
                search,
                location,
                kind: KindFilter::parse(&kind),
            };
            let animals = service.search(&query, &app.config.schema.search)?;
            print_list(app, &animals, "Animals for adoption")
        }

        AnimalsCommand::Show { id } => {
            let animal = service.get(&id)?;
            if app.is_json() {
                return print_json(&ApiResponse::success(view(app, &animal)));
            }
            print_detail(app, &animal);
            Ok(())
        }

        AnimalsCommand::Add(args) => {
            let payload = args.payload();
            let animal = match &args.token {
                Some(token) => {
                    let user = app.auth().authenticate(token)?;
                    service.upload(payload, &user.id, args.image_file.as_deref())?
                }
                None => service.create(payload)?,
            };

            if app.is_json() {
                return print_json(
                    &ApiResponse::success(view(app, &animal)).with_message("Animal added"),
                );
            }
            Status::success(&format!("Added {} ({})", animal.name, animal.id));
            Ok(())
        }

        AnimalsCommand::Mine { token } => {
            let user = app.auth().authenticate(&token)?;
            let animals = service.list_for_owner(&user.id)?;
            print_list(app, &animals, &format!("Listings by {}", user.name))
        }

        AnimalsCommand::Remove { id, token } => {
            let user = app.auth().authenticate(&token)?;
            service.delete(&id, &user.id)?;

            if app.is_json() {
                return print_json(&ApiResponse::message("Animal deleted successfully"));
            }
            Status::success(&format!("Removed listing {}", id));
            Ok(())
        }
    }
}

fn view<'a>(app: &App, animal: &'a Animal) -> AnimalView<'a> {
    AnimalView {
        animal,
        image_url: resolve_image_url(app.media_base(), &animal.image),
    }
}

fn print_list(app: &App, animals: &[Animal], title: &str) -> Result<()> {
    if app.is_json() {
        let views: Vec<AnimalView> = animals.iter().map(|a| view(app, a)).collect();
        return print_json(&ApiResponse::list(views));
    }

    Status::header(title);
    if animals.is_empty() {
        Status::info("No animals found");
        return Ok(());
    }

    println!(
        "  {:<14} {:<6} {:<18} {:<16} {:>9}  {}",
        "Name".dimmed(),
        "Type".dimmed(),
        "Breed".dimmed(),
        "Location".dimmed(),
        "Fee".dimmed(),
        "ID".dimmed()
    );
    for animal in animals {
        println!(
            "  {:<14} {:<6} {:<18} {:<16} {:>9}  {}",
            truncate(&animal.name, 14),
            animal.kind,
            truncate(&animal.breed, 18),
            truncate(&animal.location, 16),
            format_price(u64::from(animal.price)),
            animal.id.dimmed()
        );
    }
    println!();
    println!("  {}", format_count(animals.len(), "animal", "animals"));
    Ok(())
}

fn print_detail(app: &App, animal: &Animal) {
    Status::header(&format!("{} the {}", animal.name, animal.breed));
    Status::field("Type", &animal.kind);
    Status::field("Age", &animal.age);
    Status::field("Gender", &animal.gender);
    Status::field("Size", &animal.size);
    Status::field("Location", &animal.location);
    Status::field("Vaccinated", yes_no(animal.vaccinated));
    Status::field("Neutered", yes_no(animal.neutered));
    Status::field("Fee", &format_price(u64::from(animal.price)));
    Status::field("Shelter", &animal.shelter);
    Status::field("Contact", &format!("{} / {}", animal.phone, animal.email));
    Status::field("Image", &resolve_image_url(app.media_base(), &animal.image));
    println!();
    println!("  {}", animal.description);
}
