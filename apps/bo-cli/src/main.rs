use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bo_core::{Phase, RegionIdx};
use bo_fluidsystem::{
    BlackOil, BlackOilFluidState, BlackOilFluidSystem, FluidSystemBuilder, FluidSystemError,
};
use bo_pvt::{
    PressureSweep, PvtError, PvtModel, PvtTableSet, SaturatedLineCheck, SaturatedLineReport,
    SweepType, sample_saturated_line,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Cannot write output: {0}")]
    Write(#[from] io::Error),

    #[error(transparent)]
    Pvt(#[from] PvtError),

    #[error(transparent)]
    FluidSystem(#[from] FluidSystemError),

    #[error("{0}")]
    Usage(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(about = "Black-oil PVT inspection tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the fluid system and check the saturated line of every model
    Check {
        /// Path to the PVT table set (JSON)
        tables: PathBuf,
        /// Temperature of the check [K]
        #[arg(long, default_value_t = 273.0)]
        temperature: f64,
    },
    /// Print a saturated-line sweep of one phase as CSV
    Sweep {
        /// Path to the PVT table set (JSON)
        tables: PathBuf,
        #[arg(long, value_enum)]
        phase: PhaseArg,
        #[arg(long, default_value_t = 0)]
        region: RegionIdx,
        /// First pressure [Pa]
        #[arg(long, default_value_t = 10.0e5)]
        start: f64,
        /// Last pressure [Pa]
        #[arg(long, default_value_t = 598.0e5)]
        end: f64,
        #[arg(long, default_value_t = 50)]
        points: usize,
        /// Logarithmic point spacing
        #[arg(long)]
        log: bool,
        /// Temperature [K]
        #[arg(long, default_value_t = 273.0)]
        temperature: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate phase properties at one state
    State {
        /// Path to the PVT table set (JSON)
        tables: PathBuf,
        /// Pressure [Pa]
        #[arg(long)]
        pressure: f64,
        #[arg(long, default_value_t = 0.0)]
        sw: f64,
        #[arg(long, default_value_t = 0.0)]
        sg: f64,
        #[arg(long, default_value_t = 0)]
        region: RegionIdx,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PhaseArg {
    Water,
    Oil,
    Gas,
}

impl From<PhaseArg> for Phase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Water => Phase::Water,
            PhaseArg::Oil => Phase::Oil,
            PhaseArg::Gas => Phase::Gas,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            tables,
            temperature,
        } => cmd_check(&tables, temperature),
        Commands::Sweep {
            tables,
            phase,
            region,
            start,
            end,
            points,
            log,
            temperature,
            output,
        } => {
            let sweep_type = if log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            let sweep = PressureSweep::new(start, end, points, sweep_type)?;
            cmd_sweep(
                &tables,
                phase.into(),
                region,
                temperature,
                &sweep,
                output.as_deref(),
            )
        }
        Commands::State {
            tables,
            pressure,
            sw,
            sg,
            region,
        } => cmd_state(&tables, pressure, sw, sg, region),
    }
}

fn load_system(path: &Path) -> CliResult<BlackOilFluidSystem> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let set = PvtTableSet::from_json_str(&text)?;
    info!(path = %path.display(), regions = set.num_regions(), "loaded PVT tables");
    Ok(FluidSystemBuilder::from_table_set(&set)?.build()?)
}

fn cmd_check(tables: &Path, temperature: f64) -> CliResult<()> {
    println!("Checking PVT tables: {}", tables.display());
    let system = load_system(tables)?;
    let check = SaturatedLineCheck {
        temperature,
        ..SaturatedLineCheck::default()
    };
    println!("  {}", check.sweep);

    for phase in Phase::ALL {
        if !system.phase_is_active(phase) {
            continue;
        }
        let report = match phase {
            Phase::Oil => check.run(system.oil_pvt())?,
            Phase::Gas => check.run(system.gas_pvt())?,
            Phase::Water => check.run(system.water_pvt())?,
        };
        print_report(phase, &report);
    }
    println!("✓ Saturated line is consistent and monotone");
    Ok(())
}

fn print_report(phase: Phase, report: &SaturatedLineReport) {
    println!(
        "  {:<5} {:<28} {} regions, max |d(1/B)| = {:.3e}, max |d(mu)| = {:.3e}",
        phase.name(),
        report.model,
        report.num_regions,
        report.max_inv_b_deviation,
        report.max_viscosity_deviation
    );
}

fn cmd_sweep(
    tables: &Path,
    phase: Phase,
    region: RegionIdx,
    temperature: f64,
    sweep: &PressureSweep,
    output: Option<&Path>,
) -> CliResult<()> {
    let system = load_system(tables)?;
    if !system.phase_is_active(phase) {
        return Err(CliError::Usage(format!("phase {phase} is not active")));
    }
    if region >= system.num_regions() {
        return Err(CliError::Usage(format!(
            "region {region} out of range ({} regions)",
            system.num_regions()
        )));
    }

    let samples = match phase {
        Phase::Oil => sample_saturated_line(system.oil_pvt(), region, temperature, sweep),
        Phase::Gas => sample_saturated_line(system.gas_pvt(), region, temperature, sweep),
        Phase::Water => sample_saturated_line(system.water_pvt(), region, temperature, sweep),
    };

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    writeln!(
        out,
        "pressure,ratio,inv_b,inv_b_saturated,viscosity,viscosity_saturated"
    )?;
    for s in &samples {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            s.pressure, s.ratio, s.inv_b, s.inv_b_saturated, s.viscosity, s.viscosity_saturated
        )?;
    }
    if let Some(path) = output {
        println!("✓ Wrote {} points to {}", samples.len(), path.display());
    }
    Ok(())
}

fn cmd_state(tables: &Path, pressure: f64, sw: f64, sg: f64, region: RegionIdx) -> CliResult<()> {
    let system = load_system(tables)?;
    if region >= system.num_regions() {
        return Err(CliError::Usage(format!(
            "region {region} out of range ({} regions)",
            system.num_regions()
        )));
    }

    let mut state = BlackOilFluidState::<f64, BlackOil>::new(&system);
    state.set_pvt_region_index(region);
    let so = 1.0 - sw - sg;
    for (phase, s) in [(Phase::Water, sw), (Phase::Oil, so), (Phase::Gas, sg)] {
        state.set_pressure(phase, pressure);
        state.set_saturation(phase, s);
    }
    // saturated hydrocarbons at the given pressure
    let rs = if system.phase_is_active(Phase::Oil) {
        system.saturated_dissolution_factor(&state, Phase::Oil, region)
    } else {
        0.0
    };
    let rv = if system.phase_is_active(Phase::Gas) {
        system.saturated_dissolution_factor(&state, Phase::Gas, region)
    } else {
        0.0
    };
    state.set_rs(rs);
    state.set_rv(rv);

    println!(
        "State: p = {:.4e} Pa, T = {:.2} K, region {}",
        pressure,
        state.temperature(Phase::Oil),
        region
    );
    println!("  Rs = {rs:.6}, Rv = {rv:.6e}");
    for phase in Phase::ALL {
        if !system.phase_is_active(phase) {
            continue;
        }
        let inv_b = system.inverse_formation_volume_factor(&state, phase, region);
        state.set_inv_b(phase, inv_b);
        let rho = system.density(&state, phase, region);
        state.set_density(phase, rho);
        println!(
            "  {:<5} S = {:.3}  1/B = {:.6}  mu = {:.4e} Pa·s  rho = {:.3} kg/m³  model = {}",
            phase.name(),
            state.saturation(phase),
            inv_b,
            state.viscosity(phase),
            rho,
            pvt_name(&system, phase)
        );
    }
    Ok(())
}

fn pvt_name(system: &BlackOilFluidSystem, phase: Phase) -> &'static str {
    match phase {
        Phase::Oil => system.oil_pvt().name(),
        Phase::Gas => system.gas_pvt().name(),
        Phase::Water => system.water_pvt().name(),
    }
}
