// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MyRemind - insurance renewal reminders.
//!
//! Binary entry point: the externally triggered daily scan plus small
//! administrative commands over the same storage.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod admin;
mod scan;
mod status;

/// MyRemind - insurance renewal reminders.
#[derive(Parser, Debug)]
#[command(name = "myremind", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the daily reminder scan across all users.
    Scan {
        /// Evaluate for this date (YYYY-MM-DD) instead of today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Show configuration and database health.
    Status,
    /// Register a user account.
    UserAdd {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Create a policy for a user.
    PolicyAdd {
        /// Owner's email address.
        #[arg(long)]
        user: String,
        #[arg(long)]
        name: String,
        /// Expiry date (YYYY-MM-DD).
        #[arg(long)]
        expiry: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// on_due, 3_days, 1_week, 2_weeks or 1_month.
        #[arg(long)]
        cadence: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
    },
    /// List a user's policies.
    PolicyList {
        #[arg(long)]
        user: String,
        /// Only not-yet-renewed policies expiring within N days.
        #[arg(long)]
        expiring_within: Option<i64>,
    },
    /// Show a user's notification inbox.
    Inbox {
        #[arg(long)]
        user: String,
        /// Mark everything read after listing.
        #[arg(long)]
        mark_all_read: bool,
    },
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("myremind={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match myremind_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            myremind_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Scan { date }) => scan::run_scan(&config, date.as_deref()).await,
        Some(Commands::Status) => status::run_status(&config).await,
        Some(Commands::UserAdd { email, name }) => admin::run_user_add(&config, &email, &name).await,
        Some(Commands::PolicyAdd {
            user,
            name,
            expiry,
            code,
            phone,
            cadence,
            amount,
        }) => {
            admin::run_policy_add(
                &config,
                &user,
                admin::PolicyAddArgs {
                    name,
                    expiry,
                    code,
                    phone,
                    cadence,
                    amount,
                },
            )
            .await
        }
        Some(Commands::PolicyList {
            user,
            expiring_within,
        }) => admin::run_policy_list(&config, &user, expiring_within).await,
        Some(Commands::Inbox {
            user,
            mark_all_read,
        }) => admin::run_inbox(&config, &user, mark_all_read).await,
        None => {
            println!("myremind: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("myremind: {err}");
        std::process::exit(1);
    }
}
