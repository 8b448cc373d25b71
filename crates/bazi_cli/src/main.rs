mod logging;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use bazi_base::{FourPillars, Pillar, Stem, day_pillar, hour_pillar, sexagenary_from_year};
use bazi_rs::{BirthRequest, PlaceGeo, boundary_check, compute_chart};
use bazi_search::{
    BaziEngine, BoundaryCheckResult, Candidate, ChartReport, EngineConfig, SolarTermCalculator,
    TermModel,
};
use bazi_time::CivilDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

#[derive(Parser)]
#[command(name = "bazi", about = "Four-pillar birth chart CLI")]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a full chart
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Print the chart as JSON
        #[arg(long)]
        json: bool,
        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Boundary sensitivity of a birth time, without the chart
    Check {
        #[command(flatten)]
        birth: BirthArgs,
        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the 24 solar terms of a year
    Terms {
        /// Gregorian year
        #[arg(long)]
        year: i32,
        /// Term model
        #[arg(long, value_enum, default_value = "solar-longitude")]
        model: ModelArg,
        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Year pillar of a Gregorian year (civil-year rule)
    YearPillar {
        #[arg(long)]
        year: i32,
    },
    /// Day pillar of a civil date
    DayPillar {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Hour pillar from the day stem and clock hour
    HourPillar {
        /// Day stem name (Jia..Gui) or hanzi
        #[arg(long)]
        day_stem: String,
        /// Hour of day (0-23)
        #[arg(long)]
        hour: u32,
    },
    /// Print the default engine configuration as TOML
    DefaultConfig,
}

#[derive(clap::Args)]
struct BirthArgs {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Birth time (HH:mm or HH:mm:ss)
    #[arg(long, conflicts_with = "unknown_time")]
    time: Option<String>,
    /// Birth time is not known
    #[arg(long)]
    unknown_time: bool,
    /// Sex at birth (male/female)
    #[arg(long, default_value = "male")]
    sex: String,
    /// Latitude in degrees (north positive)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees (east positive)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Free-text place name
    #[arg(long)]
    place: Option<String>,
    /// Offset of the recorded clock east of UTC, in minutes
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
}

impl BirthArgs {
    fn to_request(&self) -> BirthRequest {
        BirthRequest {
            date: self.date.clone(),
            time: self.time.clone(),
            time_unknown: self.unknown_time,
            place: self.place.clone().unwrap_or_default(),
            place_geo: self
                .lat
                .zip(self.lon)
                .map(|(lat, lon)| PlaceGeo { lat, lon }),
            sex_at_birth: self.sex.clone(),
            utc_offset_minutes: self.utc_offset,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    SolarLongitude,
    Linear,
}

impl From<ModelArg> for TermModel {
    fn from(m: ModelArg) -> Self {
        match m {
            ModelArg::SolarLongitude => TermModel::SolarLongitude,
            ModelArg::Linear => TermModel::LinearDayOffset,
        }
    }
}

fn fail(msg: impl Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn load_config(path: Option<&Path>) -> EngineConfig {
    let Some(path) = path else {
        return EngineConfig::default();
    };
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("cannot read {}: {e}", path.display())));
    let config = EngineConfig::from_toml_str(&text).unwrap_or_else(|e| fail(e));
    debug!(path = %path.display(), "loaded engine config");
    config
}

fn load_engine(path: Option<&Path>) -> BaziEngine {
    BaziEngine::new(load_config(path)).unwrap_or_else(|e| fail(e))
}

fn pillar_line(label: &str, p: &Pillar) -> String {
    let mut line = format!("{label:<6} {:<10} {}", p.name(), p.hanzi());
    if p.confidence() < 1.0 {
        line.push_str(&format!("  (confidence {:.2})", p.confidence()));
    }
    line
}

fn print_pillars(p: &FourPillars) {
    println!("{}", pillar_line("Year", &p.year));
    println!("{}", pillar_line("Month", &p.month));
    println!("{}", pillar_line("Day", &p.day));
    println!("{}", pillar_line("Hour", &p.hour));
}

fn print_boundary(check: &BoundaryCheckResult) {
    if !check.is_alert() {
        println!("No boundary alert");
        return;
    }
    println!("Boundary alert (confidence {:.2}):", check.confidence);
    for t in &check.triggers {
        let term = t.term.map(|s| format!(" {}", s.name())).unwrap_or_default();
        println!(
            "  {:?}{term}: {:+.1} min from boundary ({:?})",
            t.kind, t.distance_minutes, t.side
        );
    }
}

fn print_chart(report: &ChartReport) {
    println!("Local solar time: {}", report.normalized_instant);
    print_pillars(report.pillars());
    let dm = report.day_master;
    println!(
        "Day master: {} {} ({} {:?})",
        dm.stem.name(),
        dm.stem.hanzi(),
        dm.element,
        dm.polarity
    );

    let counts: Vec<String> = report
        .chart
        .element_counts
        .iter()
        .map(|(e, n)| format!("{e}={n}"))
        .collect();
    println!("Elements: {}", counts.join(" "));
    let useful: Vec<&str> = report.chart.useful_elements.iter().map(|e| e.name()).collect();
    println!("Useful: {}", useful.join(", "));
    let strengths: Vec<String> = report
        .chart
        .ten_relationship_strengths
        .iter()
        .map(|(r, n)| format!("{}={n}", r.name()))
        .collect();
    println!("Relationships: {}", strengths.join(" "));
    if !report.diagnostics.month_sources_agree {
        println!(
            "Civil-month pillar {} differs; solar-term month used",
            report.diagnostics.civil_month_pillar.name()
        );
    }

    let tl = &report.timeline;
    println!(
        "Luck ({:?}, starts at {:.1} years):",
        tl.direction, tl.start_age_years
    );
    for lp in &tl.luck_pillars {
        println!(
            "  {:>2}. {:<10} age {:>5.1}-{:<5.1} from {}  {:?}",
            lp.index,
            lp.pillar.name(),
            lp.start_age,
            lp.end_age,
            lp.start_year,
            lp.relationship
        );
    }

    print_boundary(&report.boundary_alert);
    print_candidates(&report.candidates);
}

fn print_candidates(candidates: &[Candidate]) {
    for c in candidates {
        let changed: Vec<String> = c.changed.iter().map(|p| format!("{p:?}")).collect();
        println!(
            "  candidate ({:?}, likelihood {:.2}, changes {}):",
            c.reason,
            c.likelihood,
            changed.join("/")
        );
        print_pillars(&c.chart.pillars);
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Chart {
            birth,
            json,
            config,
        } => {
            let engine = load_engine(config.as_deref());
            let report =
                compute_chart(&engine, &birth.to_request()).unwrap_or_else(|e| fail(e));
            if json {
                let text = serde_json::to_string_pretty(&report).unwrap_or_else(|e| fail(e));
                println!("{text}");
            } else {
                print_chart(&report);
            }
        }

        Commands::Check { birth, config } => {
            let engine = load_engine(config.as_deref());
            let check =
                boundary_check(&engine, &birth.to_request()).unwrap_or_else(|e| fail(e));
            print_boundary(&check);
            print_candidates(&check.candidates);
        }

        Commands::Terms {
            year,
            model,
            config,
        } => {
            let mut config = load_config(config.as_deref());
            config.solar_terms.model = model.into();
            config.validate().unwrap_or_else(|e| fail(e));
            let calc = SolarTermCalculator::new(config.solar_terms);
            let terms = calc.boundaries_for_year(year).unwrap_or_else(|e| fail(e));
            println!(
                "Solar terms {year} ({}, UTC{:+}min)",
                config.solar_terms.model.name(),
                config.solar_terms.utc_offset_minutes
            );
            for b in terms.iter() {
                let month = b
                    .term
                    .month_number()
                    .map(|m| format!("month {m:>2}"))
                    .unwrap_or_default();
                println!(
                    "  {:<12} {}  {:>5.1} deg  {}  {month}",
                    b.term.name(),
                    b.term.hanzi(),
                    b.longitude_deg,
                    b.local
                );
            }
        }

        Commands::YearPillar { year } => {
            let (pillar, position) = sexagenary_from_year(year);
            println!(
                "{} {} (cycle year {}, {})",
                pillar.name(),
                pillar.hanzi(),
                position,
                pillar.branch.zodiac_animal()
            );
        }

        Commands::DayPillar { date } => {
            let d: CivilDateTime = date.parse().unwrap_or_else(|e| fail(e));
            d.validate().unwrap_or_else(|e| fail(e));
            let p = day_pillar(d.year, d.month, d.day);
            println!(
                "{} {} (cycle day {})",
                p.name(),
                p.hanzi(),
                p.sexagenary_index() + 1
            );
        }

        Commands::HourPillar { day_stem, hour } => {
            let stem = Stem::from_name(&day_stem)
                .unwrap_or_else(|| fail(format!("unknown stem: {day_stem}")));
            if hour > 23 {
                fail(format!("hour must be 0-23, got {hour}"));
            }
            let p = hour_pillar(stem, hour);
            println!("{} {}", p.name(), p.hanzi());
        }

        Commands::DefaultConfig => {
            let text = EngineConfig::default()
                .to_toml_string()
                .unwrap_or_else(|e| fail(e));
            print!("{text}");
        }
    }
}
