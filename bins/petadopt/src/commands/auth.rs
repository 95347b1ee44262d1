//! `petadopt auth`

use crate::app::{print_json, App};
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use petadopt_cli::output::{format_duration, Status};
use petadopt_cli::progress::spinner;
use petadopt_shelter::{ApiResponse, Session, SignupRequest};

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create an account; a verification code is sent to the email
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// At least 8 characters
        #[arg(long, env = "PETADOPT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Confirm the emailed code and start a session
    Verify {
        #[arg(long)]
        email: String,

        /// Six-digit code
        #[arg(long)]
        otp: String,
    },

    /// Send a fresh verification code
    Resend {
        #[arg(long)]
        email: String,
    },

    /// Log in to a verified account
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "PETADOPT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the user behind a session token
    Whoami {
        #[arg(long, env = "PETADOPT_TOKEN")]
        token: String,
    },
}

pub fn run(app: &App, command: AuthCommand) -> Result<()> {
    let auth = app.auth();
    let otp_ttl = std::time::Duration::from_secs(
        u64::try_from(app.config.schema.auth.otp_ttl_minutes).unwrap_or(0) * 60,
    );

    match command {
        AuthCommand::Signup {
            name,
            email,
            password,
        } => {
            let pb = (!app.is_json()).then(|| spinner("Creating account..."));
            let result = auth.signup(SignupRequest {
                name,
                email,
                password,
            });
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            let user = result?;

            let message = format!(
                "Verification code sent to {}. It expires in {}.",
                user.email,
                format_duration(otp_ttl)
            );
            if app.is_json() {
                return print_json(&ApiResponse::success(user).with_message(message));
            }
            Status::success(&format!("Account created for {}", user.name));
            Status::info(&message);
            Ok(())
        }

        AuthCommand::Verify { email, otp } => {
            let session = auth.verify_email(&email, &otp)?;
            print_session(app, session, "Email verified successfully")
        }

        AuthCommand::Resend { email } => {
            auth.resend_verification(&email)?;
            let message = format!(
                "New verification code sent. It expires in {}.",
                format_duration(otp_ttl)
            );
            if app.is_json() {
                return print_json(&ApiResponse::message(message));
            }
            Status::success(&message);
            Ok(())
        }

        AuthCommand::Login { email, password } => {
            let pb = (!app.is_json()).then(|| spinner("Checking credentials..."));
            let result = auth.login(&email, &password);
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            print_session(app, result?, "Logged in")
        }

        AuthCommand::Whoami { token } => {
            let user = auth.authenticate(&token)?;
            if app.is_json() {
                return print_json(&ApiResponse::success(user));
            }
            Status::field("Name", &user.name);
            Status::field("Email", &user.email);
            Status::field("ID", &user.id);
            Ok(())
        }
    }
}

fn print_session(app: &App, session: Session, message: &str) -> Result<()> {
    if app.is_json() {
        return print_json(&ApiResponse::success(session).with_message(message));
    }

    Status::success(&format!("{} as {}", message, session.user.email));
    println!();
    println!("  {}", "Session token (pass with --token or PETADOPT_TOKEN):".dimmed());
    println!("  {}", session.token);
    Ok(())
}
