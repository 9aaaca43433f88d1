//! Clap derive structures for the `tripkit` CLI.
//!
//! Every entity gets `tripkit <entity> <verb>`. The shared read and CRUD
//! verbs are flattened into each entity's command enum; entity-specific
//! verbs sit alongside them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tripkit_core::{BookingStatus, PaymentMethod, PaymentStatus, SortOrder, TourStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tripkit -- command-line client for the travel-booking backend
#[derive(Debug, Parser)]
#[command(
    name = "tripkit",
    version,
    about = "Manage tours, bookings and payments from the command line",
    long_about = "A CLI for the tripkit travel-booking backend.\n\n\
        Lists are cached per profile for a short window, so repeated\n\
        reads within a session do not hit the backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "TRIPKIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "TRIPKIT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides keyring and profile)
    #[arg(long, env = "TRIPKIT_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TRIPKIT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "TRIPKIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TRIPKIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Ignore and do not write the session cache
    #[arg(long, global = true)]
    pub no_cache: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage customer bookings
    #[command(alias = "bk")]
    Bookings(BookingsArgs),

    /// Manage destinations
    #[command(alias = "dest")]
    Destinations(DestinationsArgs),

    /// Manage payments and refunds
    #[command(alias = "pay")]
    Payments(PaymentsArgs),

    /// Manage add-on services
    Services(ServicesArgs),

    /// Manage tours
    Tours(ToursArgs),

    /// Manage activities
    Activities(ActivitiesArgs),

    /// Manage tour itineraries
    Itineraries(ItinerariesArgs),

    /// Manage FAQ and policy entries
    Info(InfoArgs),

    /// Browse blog posts
    Blog(BlogArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared verbs ─────────────────────────────────────────────────────

/// Arguments for every `list` verb.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text match against the searchable fields
    #[arg(long)]
    pub query: Option<String>,

    /// Structured filter as JSON, sent to the backend
    /// Example: '{"status":["pending","confirmed"],"totalAmount":{"min":100}}'
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Bypass the cached list
    #[arg(long, short = 'r')]
    pub refresh: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Structured filter as JSON
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long, requires = "sort_by")]
    pub order: Option<SortOrder>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,
}

/// Verbs every entity supports.
#[derive(Debug, Subcommand)]
pub enum ReadCommand {
    /// List records
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get one record by ID
    Get {
        /// Record ID
        id: String,
    },

    /// Search on the backend
    Search(SearchArgs),
}

/// Verbs for entities that accept writes.
#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    #[command(flatten)]
    Read(ReadCommand),

    /// Create a record from a JSON file
    Create {
        /// JSON file with the record fields
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Update a record with fields from a JSON file
    Update {
        /// Record ID
        id: String,

        /// JSON file with the fields to change
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Show booking counters and revenue
    Stats {
        /// Bypass the cached figures
        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// Change a booking's status
    Status {
        /// Booking ID
        id: String,

        /// New status (pending, confirmed, cancelled, completed)
        status: BookingStatus,
    },

    /// Cancel a booking
    Cancel {
        /// Booking ID
        id: String,

        /// Reason recorded with the cancellation
        #[arg(long)]
        reason: Option<String>,
    },

    /// List payments recorded against a booking
    Payments {
        /// Booking ID
        id: String,
    },

    /// Record a payment against a booking
    AddPayment {
        /// Booking ID
        id: String,

        /// Amount paid
        #[arg(long)]
        amount: f64,

        /// Payment method (card, bank_transfer, cash, paypal)
        #[arg(long, default_value = "card")]
        method: PaymentMethod,

        /// Processor or receipt reference
        #[arg(long)]
        reference: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DESTINATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DestinationsArgs {
    #[command(subcommand)]
    pub command: DestinationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DestinationsCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// List the most booked destinations
    Popular {
        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// List featured destinations
    Featured {
        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// Get a destination by its URL slug
    Slug {
        /// Destination slug
        slug: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Show revenue and status counters
    Stats {
        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// Change a payment's status
    Status {
        /// Payment ID
        id: String,

        /// New status (pending, completed, failed, refunded)
        status: PaymentStatus,
    },

    /// Refund a payment
    Refund {
        /// Payment ID
        id: String,

        /// Reason recorded with the refund
        #[arg(long)]
        reason: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Make a service bookable
    Enable {
        /// Service ID
        id: String,
    },

    /// Withdraw a service from sale
    Disable {
        /// Service ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOURS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ToursArgs {
    #[command(subcommand)]
    pub command: ToursCommand,
}

#[derive(Debug, Subcommand)]
pub enum ToursCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// List featured tours
    Featured {
        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// List tours running at a destination
    ByDestination {
        /// Destination ID
        destination: String,

        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// Change a tour's publication status
    Status {
        /// Tour ID
        id: String,

        /// New status (draft, published, archived)
        status: TourStatus,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACTIVITIES / ITINERARIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ActivitiesArgs {
    #[command(subcommand)]
    pub command: ActivitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActivitiesCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// List activities offered at a destination
    ByDestination {
        /// Destination ID
        destination: String,

        #[arg(long, short = 'r')]
        refresh: bool,
    },
}

#[derive(Debug, Args)]
pub struct ItinerariesArgs {
    #[command(subcommand)]
    pub command: ItinerariesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ItinerariesCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// List itineraries attached to a tour
    ByTour {
        /// Tour ID
        tour: String,

        #[arg(long, short = 'r')]
        refresh: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INFO / BLOG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(subcommand)]
    pub command: InfoCommand,
}

#[derive(Debug, Subcommand)]
pub enum InfoCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// List FAQ entries in display order
    Faqs {
        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// List policy entries in display order
    Policies {
        #[arg(long, short = 'r')]
        refresh: bool,
    },
}

#[derive(Debug, Args)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub command: BlogCommand,
}

#[derive(Debug, Subcommand)]
pub enum BlogCommand {
    #[command(flatten)]
    Read(ReadCommand),

    /// Get a post by its URL slug
    Slug {
        /// Post slug
        slug: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// Set a profile value
    Set {
        /// Profile key (api_url, token_env, insecure, timeout, cache_ttl, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a bearer token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Delete the cached session for the active profile
    ClearCache,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
