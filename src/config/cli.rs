use crate::domain::request::{AssignmentRequestPayload, PreferencesPayload};
use crate::utils::error::{AssignError, Result};
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "table-assign")]
#[command(about = "Automatic table assignment and availability for restaurant reservations")]
pub struct CliConfig {
    /// Path to engine TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Pick the best table for a request, or suggest nearby times
    Assign(RequestArgs),
    /// List every free table for a request
    Availability(RequestArgs),
    /// Show what blocks one table in a time window
    Check(CheckArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// JSON snapshot of areas, tables, reservations and maintenance
    #[arg(short, long)]
    pub snapshot: String,

    /// JSON request file; overrides the individual request flags
    #[arg(short, long)]
    pub request: Option<String>,

    #[arg(long)]
    pub restaurant: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// HH:MM
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub party_size: Option<u32>,

    /// Minutes; engine default applies when omitted
    #[arg(long)]
    pub duration: Option<i64>,

    /// Restrict to one area
    #[arg(long)]
    pub area: Option<String>,

    /// Only accessible tables
    #[arg(long)]
    pub accessible: bool,

    #[arg(long)]
    pub prefer_area: Option<String>,

    /// rectangle, circle or square
    #[arg(long)]
    pub prefer_shape: Option<String>,

    /// Matched against area names
    #[arg(long)]
    pub prefer_location: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[arg(short, long)]
    pub snapshot: String,

    #[arg(long)]
    pub restaurant: String,

    #[arg(long)]
    pub table: String,

    #[arg(long)]
    pub date: String,

    #[arg(long)]
    pub time: String,

    #[arg(long)]
    pub duration: Option<u32>,
}

impl RequestArgs {
    /// 讀取請求：優先使用 JSON 檔，否則由命令列參數組成
    pub fn payload(&self) -> Result<AssignmentRequestPayload> {
        if let Some(path) = &self.request {
            let content = std::fs::read_to_string(path)?;
            // 欄位型別錯誤屬於請求錯誤，而非資料錯誤
            return serde_json::from_str(&content).map_err(|e| {
                AssignError::invalid_request("request", format!("{} is malformed: {}", path, e))
            });
        }

        let has_preferences = self.prefer_area.is_some()
            || self.prefer_shape.is_some()
            || self.prefer_location.is_some();

        Ok(AssignmentRequestPayload {
            restaurant_id: self.restaurant.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            party_size: self.party_size.map(serde_json::Value::from),
            duration: self.duration.map(serde_json::Value::from),
            area_id: self.area.clone(),
            is_accessible: Some(self.accessible),
            preferences: has_preferences.then(|| PreferencesPayload {
                area_id: self.prefer_area.clone(),
                shape: self.prefer_shape.clone(),
                location: self.prefer_location.clone(),
            }),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        match &self.command {
            Command::Assign(args) | Command::Availability(args) => {
                validate_path("snapshot", &args.snapshot)?;
                if let Some(request) = &args.request {
                    validate_path("request", request)?;
                }
            }
            Command::Check(args) => validate_path("snapshot", &args.snapshot)?,
        }
        Ok(())
    }
}
