//! Results Sync
//!
//! Uploads battle results queued by the battle CLI to the leaderboard
//! service. Failed uploads stay in the queue, so the tool can just be run
//! again once the service is reachable.
//!
//! Usage:
//!   cargo run --bin results-sync
//!
//! ENVIRONMENT VARIABLES:
//!   ARENA_API_URL   Leaderboard base URL. Default: http://localhost:3000/api

use std::env;
use std::error::Error;
use std::fs;

use arena_engine::core::records::BattleReport;
use serde::Deserialize;

const PENDING_RESULTS_FILE: &str = "pending_results.json";
const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Deserialize)]
struct SyncResponse {
    message: Option<String>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let base_url = env::var("ARENA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let url = format!("{}/battleresults", base_url.trim_end_matches('/'));

    let pending: Vec<BattleReport> = match fs::read_to_string(PENDING_RESULTS_FILE) {
        Ok(raw) => serde_json::from_str(&raw)?,
        Err(_) => Vec::new(),
    };
    if pending.is_empty() {
        println!("✨ No pending results to sync.");
        return Ok(());
    }

    println!("🚀 Results Sync");
    println!("===============");
    println!("🌐 Endpoint: {}", url);
    println!("📦 Pending results: {}", pending.len());
    println!();

    let client = reqwest::Client::new();
    let total = pending.len();
    let mut remaining = Vec::new();

    for report in pending {
        print!("  📤 {} vs {}... ", report.combatant_a, report.combatant_b);
        match client.post(&url).json(&report).send().await {
            Ok(response) => {
                let status = response.status();
                let body: SyncResponse = response.json().await.unwrap_or(SyncResponse {
                    message: None,
                    error: None,
                });
                if status.is_success() {
                    println!("✅ {}", body.message.unwrap_or_else(|| "recorded".to_string()));
                } else {
                    let reason = body.error.unwrap_or_else(|| status.to_string());
                    println!("⚠️  Rejected: {}", reason);
                    remaining.push(report);
                }
            }
            Err(err) => {
                println!("❌ {}", err);
                remaining.push(report);
            }
        }
    }

    fs::write(
        PENDING_RESULTS_FILE,
        serde_json::to_string_pretty(&remaining)?,
    )?;

    println!();
    println!("📊 Synced {} of {} results.", total - remaining.len(), total);
    if !remaining.is_empty() {
        println!("   {} kept in the queue for the next run.", remaining.len());
    }
    Ok(())
}
