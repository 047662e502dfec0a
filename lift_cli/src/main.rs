use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use lift_core::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Personal workout, meal and bodyweight tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log, list, edit or delete workouts
    Workout {
        #[command(subcommand)]
        action: WorkoutAction,
    },

    /// Log, list, edit or delete meals
    Meal {
        #[command(subcommand)]
        action: MealAction,
    },

    /// Log, list, edit or delete bodyweight entries
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },

    /// Show best estimated one-rep-max per exercise
    Maxes,

    /// Show per-day maxima alongside bodyweight
    Progress {
        /// Print rows as JSON
        #[arg(long)]
        json: bool,

        /// Export rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Date selection shared by workout and meal listings
#[derive(Args)]
struct DateFilter {
    /// Only show this date (defaults to today)
    #[arg(long, conflicts_with = "all")]
    date: Option<NaiveDate>,

    /// Show every date
    #[arg(long)]
    all: bool,
}

impl DateFilter {
    fn resolve(&self) -> Option<NaiveDate> {
        if self.all {
            None
        } else {
            Some(self.date.unwrap_or_else(today))
        }
    }
}

#[derive(Subcommand)]
enum WorkoutAction {
    /// Log a workout
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        reps: u32,
        #[arg(long)]
        sets: u32,
        /// Weight in pounds
        #[arg(long)]
        weight: f64,
        /// Date performed (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List workouts
    List {
        #[command(flatten)]
        filter: DateFilter,
    },
    /// Change fields of a workout
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        reps: Option<u32>,
        #[arg(long)]
        sets: Option<u32>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a workout
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MealAction {
    /// Log a meal
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        calories: u32,
        /// Protein in grams
        #[arg(long)]
        protein: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List meals
    List {
        #[command(flatten)]
        filter: DateFilter,
    },
    /// Change fields of a meal
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        calories: Option<u32>,
        #[arg(long)]
        protein: Option<u32>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a meal
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WeightAction {
    /// Log a bodyweight measurement
    Add {
        /// Weight in pounds
        weight: f64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Change a bodyweight entry
    Edit {
        id: i64,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a bodyweight entry
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    lift_core::logging::init_with_level(&config.logging.level);

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let db_path = config.data.database_path(&data_dir);
    tracing::debug!("Using database at {:?}", db_path);
    let mut store = RecordStore::open(&db_path)?;

    match cli.command {
        Commands::Workout { action } => cmd_workout(&store, action),
        Commands::Meal { action } => cmd_meal(&store, action),
        Commands::Weight { action } => cmd_weight(&store, action),
        Commands::Maxes => cmd_maxes(&mut store),
        Commands::Progress { json, csv } => cmd_progress(&mut store, json, csv),
    }
}

fn cmd_workout(store: &RecordStore, action: WorkoutAction) -> Result<()> {
    match action {
        WorkoutAction::Add {
            name,
            reps,
            sets,
            weight,
            date,
        } => {
            let workout = store.create_workout(&NewWorkout {
                name,
                reps,
                sets,
                weight,
                created_at: date,
            })?;
            println!("✓ Workout logged");
            print_workout(&workout);
        }
        WorkoutAction::List { filter } => {
            let workouts = store.list_workouts(filter.resolve())?;
            if workouts.is_empty() {
                println!("No workouts logged.");
            }
            for workout in &workouts {
                print_workout(workout);
            }
        }
        WorkoutAction::Edit {
            id,
            name,
            reps,
            sets,
            weight,
            date,
        } => {
            let mut fields = NewWorkout::from(&store.get_workout(id)?);
            if let Some(name) = name {
                fields.name = name;
            }
            if let Some(reps) = reps {
                fields.reps = reps;
            }
            if let Some(sets) = sets {
                fields.sets = sets;
            }
            if let Some(weight) = weight {
                fields.weight = weight;
            }
            if date.is_some() {
                fields.created_at = date;
            }
            let workout = store.update_workout(id, &fields)?;
            println!("✓ Workout updated");
            print_workout(&workout);
        }
        WorkoutAction::Delete { id, yes } => {
            let workout = store.get_workout(id)?;
            if !yes && !confirm(&format!("Delete workout {} ({})?", id, workout.name))? {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete_workout(id)?;
            println!("✓ Workout {} deleted", id);
        }
    }
    Ok(())
}

fn cmd_meal(store: &RecordStore, action: MealAction) -> Result<()> {
    match action {
        MealAction::Add {
            name,
            calories,
            protein,
            date,
        } => {
            let meal = store.create_meal(&NewMeal {
                name,
                calories,
                protein,
                created_at: date,
            })?;
            println!("✓ Meal logged");
            print_meal(&meal);
        }
        MealAction::List { filter } => {
            let meals = store.list_meals(filter.resolve())?;
            if meals.is_empty() {
                println!("No meals logged.");
            }
            for meal in &meals {
                print_meal(meal);
            }
            if meals.len() > 1 {
                let calories: u64 = meals.iter().map(|m| u64::from(m.calories)).sum();
                let protein: u64 = meals.iter().map(|m| u64::from(m.protein)).sum();
                println!("  Total: {} kcal, {} g protein", calories, protein);
            }
        }
        MealAction::Edit {
            id,
            name,
            calories,
            protein,
            date,
        } => {
            let mut fields = NewMeal::from(&store.get_meal(id)?);
            if let Some(name) = name {
                fields.name = name;
            }
            if let Some(calories) = calories {
                fields.calories = calories;
            }
            if let Some(protein) = protein {
                fields.protein = protein;
            }
            if date.is_some() {
                fields.created_at = date;
            }
            let meal = store.update_meal(id, &fields)?;
            println!("✓ Meal updated");
            print_meal(&meal);
        }
        MealAction::Delete { id, yes } => {
            let meal = store.get_meal(id)?;
            if !yes && !confirm(&format!("Delete meal {} ({})?", id, meal.name))? {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete_meal(id)?;
            println!("✓ Meal {} deleted", id);
        }
    }
    Ok(())
}

fn cmd_weight(store: &RecordStore, action: WeightAction) -> Result<()> {
    match action {
        WeightAction::Add { weight, date } => {
            let entry = store.create_bodyweight(&NewBodyweight {
                weight,
                created_at: date,
            })?;
            println!("✓ Bodyweight logged");
            print_bodyweight(&entry);
        }
        WeightAction::List { limit } => {
            let entries = store.list_bodyweights()?;
            if entries.is_empty() {
                println!("No bodyweight entries logged.");
            }
            let shown = limit.unwrap_or(entries.len());
            for entry in entries.iter().take(shown) {
                print_bodyweight(entry);
            }
        }
        WeightAction::Edit { id, weight, date } => {
            let mut fields = NewBodyweight::from(&store.get_bodyweight(id)?);
            if let Some(weight) = weight {
                fields.weight = weight;
            }
            if date.is_some() {
                fields.created_at = date;
            }
            let entry = store.update_bodyweight(id, &fields)?;
            println!("✓ Bodyweight updated");
            print_bodyweight(&entry);
        }
        WeightAction::Delete { id, yes } => {
            let entry = store.get_bodyweight(id)?;
            if !yes
                && !confirm(&format!(
                    "Delete bodyweight entry {} ({} lbs on {})?",
                    id, entry.weight, entry.created_at
                ))?
            {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete_bodyweight(id)?;
            println!("✓ Bodyweight entry {} deleted", id);
        }
    }
    Ok(())
}

fn cmd_maxes(store: &mut RecordStore) -> Result<()> {
    let analysis = store.snapshot()?.analyze();

    if analysis.maxes.is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }

    println!("\nEstimated one-rep max");
    println!("─────────────────────────────────────────");
    for (name, max) in &analysis.maxes {
        match analysis.ratios.get(name) {
            Some(ratio) => println!("  {:<24} {:>6} lbs  {:.2}x bodyweight", name, max, ratio),
            None => println!("  {:<24} {:>6} lbs", name, max),
        }
    }

    if let Some(ref latest) = analysis.latest_bodyweight {
        println!();
        println!("  Bodyweight: {} lbs ({})", latest.weight, latest.created_at);
    }

    Ok(())
}

fn cmd_progress(store: &mut RecordStore, json: bool, csv: Option<PathBuf>) -> Result<()> {
    let rows = store.snapshot()?.analyze().chart;

    if let Some(path) = csv {
        let count = write_progress_csv(&rows, &path)?;
        println!("✓ Exported {} rows to {}", count, path.display());
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No progress data yet.");
        return Ok(());
    }

    for row in &rows {
        let mut cells: Vec<String> = row
            .lifts
            .iter()
            .map(|(name, max)| format!("{} {}", name, max))
            .collect();
        if let Some(weight) = row.bodyweight {
            cells.push(format!("Bodyweight {}", weight));
        }
        println!("  {}  {}", row.date, cells.join(" | "));
    }

    Ok(())
}

fn print_workout(workout: &Workout) {
    println!(
        "  #{:<4} {}  {}  {}x{} @ {} lbs",
        workout.id, workout.created_at, workout.name, workout.sets, workout.reps, workout.weight
    );
}

fn print_meal(meal: &Meal) {
    println!(
        "  #{:<4} {}  {}  {} kcal, {} g protein",
        meal.id, meal.created_at, meal.name, meal.calories, meal.protein
    );
}

fn print_bodyweight(entry: &Bodyweight) {
    println!("  #{:<4} {}  {} lbs", entry.id, entry.created_at, entry.weight);
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
