use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{MacroTargets, Targets};
use crate::planner::constants::DEFAULT_MIN_QUANTITY;

/// mealplan: reconcile generated meal-plan text against calorie and macro targets.
#[derive(Parser, Debug)]
#[command(name = "mealplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Debug-level logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile one day of plan text.
    Day {
        #[command(flatten)]
        common: CommonArgs,

        /// Day number to use when the text has no "Day N:" label.
        #[arg(long)]
        day: Option<u32>,
    },

    /// Split a multi-day plan on "Day N:" markers and reconcile each day.
    Week {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Plan text file; reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Daily calorie target.
    #[arg(short, long)]
    pub calories: f64,

    /// Protein target in grams.
    #[arg(long)]
    pub protein: Option<f64>,

    /// Fat target in grams.
    #[arg(long)]
    pub fat: Option<f64>,

    /// Carbohydrate target in grams.
    #[arg(long)]
    pub carbs: Option<f64>,

    /// Fiber target in grams.
    #[arg(long)]
    pub fiber: Option<f64>,

    /// Derive macro targets from calories (35% protein, 35% fat, 30% carbs).
    #[arg(long, conflicts_with_all = ["protein", "fat", "carbs", "fiber"])]
    pub auto_macros: bool,

    /// Smallest gram/ml quantity after rounding.
    #[arg(long, default_value_t = DEFAULT_MIN_QUANTITY)]
    pub min_qty: f64,

    /// Engine configuration JSON overriding the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write the reconciled items to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl CommonArgs {
    pub fn targets(&self) -> Targets {
        let macros = if self.auto_macros {
            MacroTargets::from_calories(self.calories)
        } else {
            MacroTargets {
                protein_g: self.protein.unwrap_or(0.0),
                fat_g: self.fat.unwrap_or(0.0),
                carbs_g: self.carbs.unwrap_or(0.0),
                fiber_g: self.fiber.unwrap_or(0.0),
            }
        };
        Targets::with_macros(self.calories, macros)
    }
}
