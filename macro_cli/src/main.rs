use clap::{Args, Parser, Subcommand};
use macro_core::form::{normalize_notes, parse_age, parse_log_weight, parse_positive};
use macro_core::*;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mcalc")]
#[command(about = "Macro & calorie calculator with a personal weight log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate daily targets from the saved profile (default)
    Calc {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or edit the saved profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage the weight log
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Show or change the display theme
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the saved profile
    Show,
    /// Change one or more profile fields
    Set {
        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Subcommand)]
enum LogAction {
    /// Record today's weight (kg)
    Add {
        #[arg(allow_hyphen_values = true)]
        weight: String,

        /// Optional notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List entries, newest first
    List,
    /// Delete the entry at a position shown by `log list`
    Rm { index: usize },
    /// Draw the weight trend
    Chart,
    /// Export the log to CSV, oldest first
    Export { path: PathBuf },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

/// Raw profile form fields; each one given replaces the saved value
#[derive(Args, Default)]
struct ProfileArgs {
    /// Age in years
    #[arg(long, allow_hyphen_values = true)]
    age: Option<String>,

    /// male or female
    #[arg(long)]
    sex: Option<String>,

    /// Weight in kg
    #[arg(long, allow_hyphen_values = true)]
    weight: Option<String>,

    /// Height in cm
    #[arg(long, allow_hyphen_values = true)]
    height: Option<String>,

    /// sedentary, light, moderate, active or veryActive
    #[arg(long)]
    activity: Option<String>,
}

/// Validated profile edits
struct ProfilePatch {
    age: Option<u32>,
    sex: Option<Sex>,
    weight: Option<f64>,
    height: Option<f64>,
    activity: Option<ActivityLevel>,
}

impl ProfileArgs {
    fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.sex.is_none()
            && self.weight.is_none()
            && self.height.is_none()
            && self.activity.is_none()
    }

    fn parse(&self) -> Result<ProfilePatch> {
        Ok(ProfilePatch {
            age: self.age.as_deref().map(parse_age).transpose()?,
            sex: self.sex.as_deref().map(str::parse::<Sex>).transpose()?,
            weight: self
                .weight
                .as_deref()
                .map(|w| parse_positive("weight", w))
                .transpose()?,
            height: self
                .height
                .as_deref()
                .map(|h| parse_positive("height", h))
                .transpose()?,
            activity: self
                .activity
                .as_deref()
                .map(str::parse::<ActivityLevel>)
                .transpose()?,
        })
    }
}

impl ProfilePatch {
    fn apply(self, profile: &mut Profile) {
        if let Some(age) = self.age {
            profile.age = Some(age);
        }
        if let Some(sex) = self.sex {
            profile.sex = sex;
        }
        if let Some(weight) = self.weight {
            profile.weight = Some(weight);
        }
        if let Some(height) = self.height {
            profile.height = Some(height);
        }
        if let Some(activity) = self.activity {
            profile.activity_level = activity;
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    macro_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());

    let mut tracker = Tracker::open(JsonFileStore::new(&data_dir))?;
    let view = View::new(&config, tracker.theme());

    match cli.command {
        Some(Commands::Calc { profile, json }) => cmd_calc(&mut tracker, &view, profile, json),
        Some(Commands::Profile { action }) => match action {
            ProfileAction::Show => {
                view.profile(tracker.profile());
                Ok(())
            }
            ProfileAction::Set { profile } => cmd_profile_set(&mut tracker, &view, profile),
        },
        Some(Commands::Log { action }) => cmd_log(&mut tracker, &view, action),
        Some(Commands::Theme { action }) => cmd_theme(&mut tracker, action),
        None => cmd_calc(&mut tracker, &view, ProfileArgs::default(), false),
    }
}

fn cmd_calc(
    tracker: &mut Tracker<JsonFileStore>,
    view: &View,
    args: ProfileArgs,
    json: bool,
) -> Result<()> {
    if !args.is_empty() {
        let patch = args.parse()?;
        tracker.update_profile(|p| patch.apply(p))?;
    }

    let result = tracker.estimate()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        view.estimate(&result);
    }
    Ok(())
}

fn cmd_profile_set(
    tracker: &mut Tracker<JsonFileStore>,
    view: &View,
    args: ProfileArgs,
) -> Result<()> {
    if args.is_empty() {
        return Err(Error::validation(
            "Nothing to change: pass at least one of --age, --sex, --weight, --height, --activity.",
        ));
    }

    let patch = args.parse()?;
    let profile = tracker.update_profile(|p| patch.apply(p))?;
    println!("✓ Profile saved");
    view.profile(profile);
    Ok(())
}

fn cmd_log(tracker: &mut Tracker<JsonFileStore>, view: &View, action: LogAction) -> Result<()> {
    match action {
        LogAction::Add { weight, notes } => {
            let weight = parse_log_weight(&weight)?;
            let notes = normalize_notes(notes.as_deref());
            let entry = tracker.add_log(weight, notes.as_deref())?;
            println!(
                "✓ Logged {} kg on {}",
                entry.weight,
                view.date(&entry)
            );
        }
        LogAction::List => view.log(tracker.log()),
        LogAction::Rm { index } => match tracker.delete_log(index) {
            Ok(removed) => {
                println!(
                    "✓ Removed {} kg from {}",
                    removed.weight,
                    view.date(&removed)
                );
            }
            // Out-of-range deletes stay silent for the user
            Err(Error::Index { index, len }) => {
                tracing::debug!("Ignoring delete of position {} ({} entries)", index, len);
            }
            Err(e) => return Err(e),
        },
        LogAction::Chart => view.trend(&TrendSeries::from_log(tracker.log())),
        LogAction::Export { path } => {
            let count = export_log(tracker.log(), &path)?;
            println!("✓ Exported {} entries", count);
            println!("  CSV: {}", path.display());
        }
    }
    Ok(())
}

fn cmd_theme(tracker: &mut Tracker<JsonFileStore>, action: ThemeAction) -> Result<()> {
    let theme = match action {
        ThemeAction::Show => {
            println!("Theme: {}", tracker.theme().name());
            return Ok(());
        }
        ThemeAction::Toggle => tracker.toggle_theme()?,
        ThemeAction::Dark => tracker.set_theme(Theme::Dark)?,
        ThemeAction::Light => tracker.set_theme(Theme::Light)?,
    };
    println!("✓ Switched to {} mode", theme.name());
    Ok(())
}

/// Terminal rendering of profiles, estimates and the log
struct View {
    palette: Option<Palette>,
    date_format: String,
    chart_width: usize,
    chart_height: usize,
}

impl View {
    fn new(config: &Config, theme: Theme) -> Self {
        let colour = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            palette: colour.then(|| theme.palette()),
            date_format: config.display.date_format.clone(),
            chart_width: config.display.chart_width,
            chart_height: config.display.chart_height,
        }
    }

    fn paint(&self, pick: fn(&Palette) -> &'static str, text: &str) -> String {
        match &self.palette {
            Some(p) => format!("{}{}{}", pick(p), text, Palette::RESET),
            None => text.to_string(),
        }
    }

    fn heading(&self, title: &str) {
        println!("\n╭─────────────────────────────────────────╮");
        println!("│  {}", self.paint(|p| p.accent, title));
        println!("╰─────────────────────────────────────────╯");
    }

    fn date(&self, entry: &LogEntry) -> String {
        entry.date.format(&self.date_format).to_string()
    }

    fn estimate(&self, result: &EstimateResult) {
        self.heading("RESULTS");
        println!("  TDEE:          {} kcal/day", result.energy_target);
        println!("  Protein:       {} g/day", result.protein_grams);
        println!("  Fats:          {} g/day", result.fat_grams);
        println!("  Carbs:         {} g/day", result.carb_grams);
        println!("  Water Intake:  {} L/day", result.water_liters);
        println!("  Salt Intake:   {} g/day", result.salt_grams);

        if result.carb_grams < 0 {
            println!();
            println!(
                "  {}",
                self.paint(
                    |p| p.danger,
                    "! Protein and fat exceed the energy target; carbs are negative."
                )
            );
        }
        println!();
    }

    fn profile(&self, profile: &Profile) {
        fn or_unset<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
            value
                .map(|v| format!("{} {}", v, unit))
                .unwrap_or_else(|| "not set".into())
        }

        self.heading("PROFILE");
        println!("  Age:       {}", or_unset(profile.age, "years"));
        println!("  Sex:       {}", profile.sex.label());
        println!("  Weight:    {}", or_unset(profile.weight, "kg"));
        println!("  Height:    {}", or_unset(profile.height, "cm"));
        println!("  Activity:  {}", profile.activity_level.label());
        println!(
            "             {}",
            self.paint(|p| p.secondary, profile.activity_level.description())
        );
        println!();
    }

    fn log(&self, log: &WeightLog) {
        if log.is_empty() {
            println!("No log entries yet.");
            return;
        }

        self.heading("LOGS");
        for (i, entry) in log.entries().iter().enumerate() {
            println!("  [{}] {}  Weight: {} kg", i, self.date(entry), entry.weight);
            if let Some(ref notes) = entry.notes {
                println!(
                    "      {}",
                    self.paint(|p| p.secondary, &format!("Notes: {}", notes))
                );
            }
        }
        println!();
    }

    fn trend(&self, series: &TrendSeries) {
        if !series.is_chartable() {
            println!("Add at least two log entries to see the weight trend.");
            return;
        }

        self.heading("WEIGHT PROGRESS");
        println!();
        print!(
            "{}",
            series.render(self.chart_width, self.chart_height, &self.date_format)
        );
        if let Some(change) = series.net_change() {
            println!();
            println!("  Change: {:+.1} kg over {} entries", change, series.points().len());
        }
        println!();
    }
}
