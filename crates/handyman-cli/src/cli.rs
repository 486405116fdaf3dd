use clap::{Parser, Subcommand};

use handyman_types::OrderStatus;

/// Command-line front end for the handyman marketplace backend.
#[derive(Debug, Parser)]
#[command(name = "handyman", version)]
pub struct Cli {
    /// Serve canned fixture data instead of calling the backend.
    #[arg(long, global = true)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and cache the session.
    Login {
        /// Username, email or phone.
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the cached session and notify the backend.
    Logout,
    /// Fetch the profile from the backend.
    Profile,
    /// Show the locally cached user without a network call.
    Whoami,
    Categories,
    Services {
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        page: Option<u32>,
    },
    Orders {
        #[arg(long, value_parser = parse_status)]
        status: Option<OrderStatus>,
        #[arg(long)]
        page: Option<u32>,
    },
    SetStatus {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: OrderStatus,
    },
}

fn parse_status(value: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse(value).ok_or_else(|| {
        let known: Vec<&str> = OrderStatus::ALL.iter().map(OrderStatus::as_str).collect();
        format!("unknown status '{}', expected one of: {}", value, known.join(", "))
    })
}
