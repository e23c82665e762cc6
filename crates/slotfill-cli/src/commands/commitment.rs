//! Commitment management commands for CLI.

use clap::Subcommand;
use slotfill_core::{Commitment, PlanStore};

use super::{parse_date, CmdResult};

#[derive(Subcommand)]
pub enum CommitmentAction {
    /// Add a commitment (daily unless --from is given)
    Add {
        /// Commitment title
        title: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM); earlier than start means it crosses midnight
        #[arg(long)]
        end: String,
        /// First date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: Option<chrono::NaiveDate>,
        /// Last date (YYYY-MM-DD), defaults to --from
        #[arg(long, value_parser = parse_date, requires = "from")]
        until: Option<chrono::NaiveDate>,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List commitments
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a commitment
    Remove {
        /// Commitment ID
        id: String,
    },
}

pub fn run(action: CommitmentAction) -> CmdResult {
    let store = PlanStore::open_default()?;

    match action {
        CommitmentAction::Add {
            title,
            start,
            end,
            from,
            until,
            id,
        } => {
            let commitment = Commitment {
                id: id.unwrap_or_default(),
                title,
                start_time: start,
                end_time: end,
                start_date: from,
                end_date: until,
            };
            let commitment = store.add_commitment(commitment)?;
            println!("Commitment created: {}", commitment.id);
        }
        CommitmentAction::List { json } => {
            let plan = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan.commitments)?);
            } else {
                for c in &plan.commitments {
                    let dates = match (c.start_date, c.end_date) {
                        (Some(first), Some(last)) => format!(" {first}..{last}"),
                        (Some(first), None) => format!(" {first}"),
                        _ => " daily".to_string(),
                    };
                    println!("{}  {}–{}{}  {}", c.id, c.start_time, c.end_time, dates, c.title);
                }
            }
        }
        CommitmentAction::Remove { id } => {
            if store.remove_commitment(&id)? {
                println!("Commitment removed: {id}");
            } else {
                return Err(format!("Commitment not found: {id}").into());
            }
        }
    }
    Ok(())
}
