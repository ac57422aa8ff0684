use super::{open_reports, render};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ReviewArgs {
    #[command(subcommand)]
    command: ReviewCommand,

    /// Print the tagged JSON result instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum ReviewCommand {
    /// Rate the dashboard from 1 to 5 stars
    Add {
        stars: u8,
        /// Free-form feedback
        #[arg(short, long, default_value = "")]
        comments: String,
        #[arg(short, long)]
        user: Option<String>,
    },
    /// List all reviews, newest first
    List,
    /// Show the average rating
    Avg,
}

pub fn cmd(args: ReviewArgs) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;

    match args.command {
        ReviewCommand::Add { stars, comments, user } => {
            render(reports.add_review(user.as_deref(), stars, &comments), args.json, |_| {
                msg_success!(Message::ReviewAdded(stars));
                Ok(())
            })
        }
        ReviewCommand::List => render(reports.reviews(), args.json, |reviews| {
            if reviews.is_empty() {
                msg_info!(Message::NoReviews);
                return Ok(());
            }
            View::reviews(reviews)
        }),
        ReviewCommand::Avg => {
            let count = reports.reviews().into_data().map(|reviews| reviews.len()).unwrap_or(0);
            render(reports.average_rating(), args.json, |average| {
                match average {
                    Some(average) => msg_info!(Message::AverageRating(*average, count)),
                    None => msg_info!(Message::NoRatingsYet),
                }
                Ok(())
            })
        }
    }
}
