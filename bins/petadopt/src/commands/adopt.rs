//! `petadopt adopt`

use crate::app::{print_json, App};
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use petadopt_cli::output::{format_count, format_price, Status};
use petadopt_shelter::models::PaymentMethod;
use petadopt_shelter::{AdoptionRequest, ApiResponse};

#[derive(Subcommand)]
pub enum AdoptCommand {
    /// Request to adopt a listed animal
    Submit {
        /// Listing ID
        animal_id: String,

        /// Applicant phone number
        #[arg(long)]
        phone: String,

        /// Applicant email
        #[arg(long)]
        email: String,

        /// cash or online
        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,
    },

    /// List submitted requests
    List,
}

pub fn run(app: &App, command: AdoptCommand) -> Result<()> {
    let service = app.adoptions();

    match command {
        AdoptCommand::Submit {
            animal_id,
            phone,
            email,
            payment,
        } => {
            let animal = app.animals().get(&animal_id)?;
            let request = AdoptionRequest::for_animal(&animal, phone, email, payment);
            let adoption = service.submit(request)?;

            if app.is_json() {
                return print_json(
                    &ApiResponse::success(adoption)
                        .with_message("Adoption request submitted successfully"),
                );
            }
            Status::success(&format!(
                "Adoption request for {} submitted ({})",
                adoption.animal_name, adoption.id
            ));
            Status::field("Fee", &format_price(u64::from(adoption.price)));
            Status::field("Payment", &adoption.payment_method.to_string());
            Ok(())
        }

        AdoptCommand::List => {
            let adoptions = service.list()?;
            if app.is_json() {
                return print_json(&ApiResponse::list(adoptions));
            }

            Status::header("Adoption requests");
            for adoption in &adoptions {
                println!(
                    "  {} {:<14} {:<6} {:>9}  {:<7} {}",
                    adoption.submitted_at.format("%Y-%m-%d %H:%M").dimmed(),
                    adoption.animal_name,
                    adoption.kind,
                    format_price(u64::from(adoption.price)),
                    adoption.payment_method.to_string(),
                    adoption.email
                );
            }
            println!();
            println!("  {}", format_count(adoptions.len(), "request", "requests"));
            Ok(())
        }
    }
}
