use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use datebox::config::Config;
use datebox::selector::{
    CalendarSource, DateField, DateSelectorConfig, DateSelectorGroup, FixedCalendar, ListField,
    MonthLabelMode, SelectedDate, YearOrder,
};
use datebox::tui::{App, run_app};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "datebox")]
#[command(about = "A synchronized month/day/year date selector", long_about = None)]
struct Cli {
    /// Log level written to ~/.datebox/datebox.log (RUST_LOG overrides it)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a date interactively
    Pick {
        /// Saved preset to start from
        #[arg(short, long)]
        preset: Option<String>,
        #[command(flatten)]
        selector: SelectorArgs,
    },
    /// Select labels without the TUI and print the resulting date
    Resolve {
        /// Saved preset to start from
        #[arg(short, long)]
        preset: Option<String>,
        #[command(flatten)]
        selector: SelectorArgs,
        /// Month label to select
        #[arg(long)]
        month: Option<String>,
        /// Day label to select
        #[arg(long)]
        day: Option<String>,
        /// Year label to select
        #[arg(long)]
        year: Option<String>,
        /// Treat this as the current year instead of reading the clock
        #[arg(long, allow_hyphen_values = true)]
        current_year: Option<i32>,
    },
    /// Manage saved selector presets
    Preset {
        #[command(subcommand)]
        action: PresetCommand,
    },
    /// Generate shell completions
    #[command(alias = "gen-completions")]
    Completions {
        /// Shell type for completions
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum PresetCommand {
    /// Save a preset
    Add {
        /// Name of the preset
        name: String,
        #[command(flatten)]
        selector: SelectorArgs,
        /// Use this preset when none is given
        #[arg(long)]
        default: bool,
    },
    /// List all saved presets
    #[command(alias = "ls")]
    List,
    /// Print a preset as JSON
    Show {
        /// Name of the preset
        name: String,
    },
    /// Remove a saved preset
    #[command(alias = "rm")]
    Remove {
        /// Name of the preset to remove
        name: String,
    },
    /// Make a saved preset the default
    Default {
        /// Name of the preset
        name: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MonthStyle {
    Numeric,
    Full,
    Short,
}

impl From<MonthStyle> for MonthLabelMode {
    fn from(style: MonthStyle) -> Self {
        match style {
            MonthStyle::Numeric => MonthLabelMode::Numeric,
            MonthStyle::Full => MonthLabelMode::WordedFull,
            MonthStyle::Short => MonthLabelMode::WordedShort,
        }
    }
}

/// Selector settings given on the command line. Omitted options keep the
/// value of the preset they are applied to.
#[derive(Args, Debug, Default)]
struct SelectorArgs {
    /// How months are labelled
    #[arg(long, value_enum)]
    months: Option<MonthStyle>,
    /// List years in ascending order
    #[arg(long, conflicts_with = "descending")]
    ascending: bool,
    /// List years in descending order
    #[arg(long)]
    descending: bool,
    /// First year offset from the current year
    #[arg(long, allow_hyphen_values = true)]
    before: Option<i32>,
    /// Last year offset from the current year
    #[arg(long, allow_hyphen_values = true)]
    after: Option<i32>,
    /// Label shown while no month is selected
    #[arg(long)]
    month_placeholder: Option<String>,
    /// Label shown while no day is selected
    #[arg(long)]
    day_placeholder: Option<String>,
    /// Label shown while no year is selected
    #[arg(long)]
    year_placeholder: Option<String>,
}

impl SelectorArgs {
    fn apply(&self, mut config: DateSelectorConfig) -> DateSelectorConfig {
        if let Some(months) = self.months {
            config.month_labels = months.into();
        }
        if self.ascending {
            config.year_order = YearOrder::Ascending;
        }
        if self.descending {
            config.year_order = YearOrder::Descending;
        }
        if let Some(before) = self.before {
            config.year_range.before = before;
        }
        if let Some(after) = self.after {
            config.year_range.after = after;
        }
        if let Some(ref label) = self.month_placeholder {
            config.placeholders.month = label.clone();
        }
        if let Some(ref label) = self.day_placeholder {
            config.placeholders.day = label.clone();
        }
        if let Some(ref label) = self.year_placeholder {
            config.placeholders.year = label.clone();
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // completions only print to stdout and must not touch ~/.datebox
    if !matches!(cli.command, Commands::Completions { .. })
        && let Err(e) =
            datebox::logging::init_file_logging(&Config::get_log_file_path(), &cli.log_level)
    {
        eprintln!("Logging disabled: {:#}", e);
    }

    match &cli.command {
        Commands::Pick { preset, selector } => {
            run_tui(preset, selector)?;
        }
        Commands::Resolve {
            preset,
            selector,
            month,
            day,
            year,
            current_year,
        } => {
            let labels = Labels {
                month: month.as_deref(),
                day: day.as_deref(),
                year: year.as_deref(),
            };
            resolve_date(preset, selector, &labels, *current_year)?;
        }
        Commands::Preset { action } => match action {
            PresetCommand::Add {
                name,
                selector,
                default,
            } => add_preset(name, selector, *default)?,
            PresetCommand::List => list_presets()?,
            PresetCommand::Show { name } => show_preset(name)?,
            PresetCommand::Remove { name } => remove_preset(name)?,
            PresetCommand::Default { name } => set_default_preset(name)?,
        },
        Commands::Completions { shell } => {
            generate_completions(*shell);
        }
    }

    Ok(())
}

fn load_selector_config(
    config: &Config,
    preset: &Option<String>,
    selector: &SelectorArgs,
) -> DateSelectorConfig {
    match config.resolve(preset.as_deref()) {
        Ok(base) => selector.apply(base),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_tui(preset: &Option<String>, selector: &SelectorArgs) -> Result<()> {
    let config = Config::load()?;
    let selector_config = load_selector_config(&config, preset, selector);
    let app = App::with_selector_config(config, preset.clone(), selector_config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(Some(date)) => print_date(&date),
        Ok(None) => info!("picker closed without a date"),
        Err(err) => eprintln!("Error: {:#?}", err),
    }

    Ok(())
}

struct Labels<'a> {
    month: Option<&'a str>,
    day: Option<&'a str>,
    year: Option<&'a str>,
}

fn resolve_date(
    preset: &Option<String>,
    selector: &SelectorArgs,
    labels: &Labels,
    current_year: Option<i32>,
) -> Result<()> {
    let config = Config::load()?;
    let selector_config = load_selector_config(&config, preset, selector);

    let date = match current_year {
        Some(year) => select_labels(
            DateSelectorGroup::with_calendar(
                ListField::new(),
                ListField::new(),
                ListField::new(),
                FixedCalendar::new(year),
            ),
            selector_config,
            labels,
        )?,
        None => select_labels(
            DateSelectorGroup::create(ListField::new(), ListField::new(), ListField::new()),
            selector_config,
            labels,
        )?,
    };

    print_date(&date);
    Ok(())
}

/// Applies day first so that a later month or year change clamps it.
fn select_labels<C: CalendarSource>(
    mut group: DateSelectorGroup<ListField, C>,
    selector_config: DateSelectorConfig,
    labels: &Labels,
) -> Result<SelectedDate> {
    group.set_properties(selector_config);

    for (field, label) in [
        (DateField::Day, labels.day),
        (DateField::Month, labels.month),
        (DateField::Year, labels.year),
    ] {
        if let Some(label) = label
            && !group.select_label(field, label)
        {
            return Err(anyhow!(
                "'{}' is not a {} choice. Available: {}",
                label,
                field.to_string().to_lowercase(),
                group.field(field).labels()[1..].join(", ")
            ));
        }
    }

    println!("Days in month: {}", group.day_count());
    Ok(group.selected())
}

fn print_date(date: &SelectedDate) {
    match date.to_naive_date() {
        Some(d) => println!("{} ({})", date, d),
        None => {
            if date.is_complete() {
                warn!(%date, "selection is not a calendar date");
            }
            println!("{}", date);
        }
    }
}

fn add_preset(name: &str, selector: &SelectorArgs, make_default: bool) -> Result<()> {
    let mut config = Config::load()?;
    let base = config.get_preset(name).cloned().unwrap_or_default();
    config.add_preset(name, selector.apply(base))?;
    if make_default {
        config.set_default_preset(name)?;
    }
    config.save()?;

    info!(preset = name, "preset saved");
    println!("Preset '{}' saved successfully!", name);
    Ok(())
}

fn list_presets() -> Result<()> {
    let config = Config::load()?;
    let presets = config.list_presets();

    if presets.is_empty() {
        println!("No saved presets found.");
    } else {
        println!("Saved presets:");
        for preset in presets {
            if config.default_preset() == Some(preset.as_str()) {
                println!("- {} (default)", preset);
            } else {
                println!("- {}", preset);
            }
        }
    }

    Ok(())
}

fn show_preset(name: &str) -> Result<()> {
    let config = Config::load()?;
    match config.get_preset(name) {
        Some(preset) => println!("{}", serde_json::to_string_pretty(preset)?),
        None => {
            eprintln!("Preset '{}' not found.", name);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn remove_preset(name: &str) -> Result<()> {
    let mut config = Config::load()?;

    if config.remove_preset(name) {
        config.save()?;
        println!("Preset '{}' removed successfully!", name);
    } else {
        eprintln!("Preset '{}' not found.", name);
        std::process::exit(1);
    }

    Ok(())
}

fn set_default_preset(name: &str) -> Result<()> {
    let mut config = Config::load()?;
    if let Err(e) = config.set_default_preset(name) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    config.save()?;
    println!("Preset '{}' is now the default.", name);
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
