//! # CDP CLI Application
//!
//! Terminal front end for concrete damaged-plasticity tables.
//!
//! ```text
//! cdp_cli curves --grade C30 --format csv
//! cdp_cli curves --fcr 20.1 --ftr 2.01 --er 30000 --format json
//! cdp_cli convert --fcu 30
//! cdp_cli define --library beam.cdpl --grade C30 --steel HRB400 --steel HPB300
//! ```
//!
//! Logs go to stderr (set `RUST_LOG=debug` for curve parameters), so stdout
//! can be piped.

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use cdp_core::cdp::DamageCurve;
use cdp_core::errors::{CalcError, CalcResult};
use cdp_core::file_io::{export_tables_csv, load_or_create_library, save_library};
use cdp_core::materials::{ConcreteMaterial, Material, SteelGrade, SteelMaterial};
use cdp_core::strength::{
    convert_cube_strength, elastic_modulus, gb_ref, ConcreteGrade, RepresentativeStrength,
};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "cdp_cli",
    about = "Concrete damaged-plasticity curves and material tables (GB 50010)"
)]
enum Command {
    /// Print compression and tension damage curves
    Curves {
        #[structopt(flatten)]
        concrete: ConcreteArgs,

        /// table, json or csv
        #[structopt(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Convert a cube strength fcu,k to fck / ftk
    Convert {
        #[structopt(long)]
        fcu: f64,

        /// Coefficient of variation override
        #[structopt(long)]
        delta_c: Option<f64>,
    },

    /// Elastic modulus from a cube strength
    Modulus {
        #[structopt(long)]
        fcu: f64,
    },

    /// Add materials to a library file, creating it if missing
    Define {
        #[structopt(long, parse(from_os_str))]
        library: PathBuf,

        /// Concrete grade to add (repeatable)
        #[structopt(long)]
        grade: Vec<String>,

        /// Steel preset to add (repeatable)
        #[structopt(long)]
        steel: Vec<String>,

        #[structopt(long, default_value = "")]
        author: String,

        #[structopt(long, default_value = "Model-1")]
        model: String,

        /// Also write each concrete's tables as CSV into this directory
        #[structopt(long, parse(from_os_str))]
        export_dir: Option<PathBuf>,
    },
}

#[derive(StructOpt, Debug)]
struct ConcreteArgs {
    /// Strength grade, e.g. C30 (default when no constants are given)
    #[structopt(long)]
    grade: Option<String>,

    /// design, characteristic or mean
    #[structopt(long, default_value = "characteristic")]
    representative: String,

    /// Representative compressive strength (MPa), overrides the grade value
    #[structopt(long)]
    fcr: Option<f64>,

    /// Representative tensile strength (MPa), overrides the grade value
    #[structopt(long)]
    ftr: Option<f64>,

    /// Elastic modulus (MPa), overrides the grade value
    #[structopt(long)]
    er: Option<f64>,
}

impl ConcreteArgs {
    fn material(&self) -> CalcResult<ConcreteMaterial> {
        let grade = match &self.grade {
            Some(g) => ConcreteGrade::from_str_flexible(g)?,
            None => ConcreteGrade::C30,
        };
        let representative = RepresentativeStrength::from_str_flexible(&self.representative)?;
        let mut material = ConcreteMaterial::from_grade(grade, representative)?;

        let overridden = self.fcr.is_some() || self.ftr.is_some() || self.er.is_some();
        material.fcr = self.fcr.unwrap_or(material.fcr);
        material.ftr = self.ftr.unwrap_or(material.ftr);
        material.er = self.er.unwrap_or(material.er);
        if overridden && self.grade.is_none() {
            material.name = "Custom".to_string();
        }
        Ok(material)
    }
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown format '{}', expected table, json or csv", other)),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = Command::from_args();
    tracing::debug!(?command, "parsed command line");

    if let Err(e) = run(command) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        process::exit(1);
    }
}

fn run(command: Command) -> CalcResult<()> {
    match command {
        Command::Curves { concrete, format } => {
            let material = concrete.material()?;
            let compression = material.compression_curve()?;
            let tension = material.tension_curve()?;
            match format {
                OutputFormat::Table => print_curves_table(&material, &compression, &tension),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&serde_json::json!({
                        "material": material,
                        "compression": compression,
                        "tension": tension,
                    }))?;
                    println!("{}", json);
                }
                OutputFormat::Csv => print_curves_csv(&compression, &tension),
            }
        }
        Command::Convert { fcu, delta_c } => {
            let c = convert_cube_strength(fcu, delta_c)?;
            let (fc, ft) = c.design();
            let (fcm, ftm) = c.mean();
            println!(
                "fcu,k = {:.1} MPa  (α1 = {:.4}, α2 = {:.4}, δc = {:.2})",
                c.fcu_k, c.alpha1, c.alpha2, c.delta_c
            );
            println!(
                "  fck = {:.3} MPa   ftk = {:.3} MPa   [{}]",
                c.fck,
                c.ftk,
                gb_ref::CHARACTERISTIC_STRENGTH
            );
            println!(
                "  fc  = {:.3} MPa   ft  = {:.3} MPa   [{}]",
                fc,
                ft,
                gb_ref::DESIGN_STRENGTH
            );
            println!("  fcm = {:.3} MPa   ftm = {:.3} MPa", fcm, ftm);
        }
        Command::Modulus { fcu } => {
            println!("Ec = {} MPa   [{}]", elastic_modulus(fcu)?, gb_ref::ELASTIC_MODULUS);
        }
        Command::Define {
            library: path,
            grade,
            steel,
            author,
            model,
            export_dir,
        } => {
            let mut library = load_or_create_library(&path, &author, &model)?;

            let mut materials = Vec::new();
            for g in &grade {
                let concrete = library.concrete_for_grade(ConcreteGrade::from_str_flexible(g)?)?;
                materials.push(Material::Concrete(concrete));
            }
            for s in &steel {
                let grade = SteelGrade::from_str_flexible(s)?;
                materials.push(Material::Steel(SteelMaterial::from_grade(grade)));
            }
            if materials.is_empty() {
                return Err(CalcError::invalid_input("grade/steel", "", "Nothing to define"));
            }

            for material in &materials {
                let definition = library.define(material)?;
                println!("Defined {:<12} {}", definition.name, definition.behavior_name());
                if let (Some(dir), Some(_)) = (&export_dir, definition.cdp_tables()) {
                    for written in export_tables_csv(definition, dir)? {
                        println!("  wrote {}", written.display());
                    }
                }
            }

            save_library(&library, &path)?;
            println!("Saved {} material(s) to {}", library.len(), path.display());
        }
    }
    Ok(())
}

fn print_curves_table(
    material: &ConcreteMaterial,
    compression: &DamageCurve,
    tension: &DamageCurve,
) {
    const RULE: &str = "═══════════════════════════════════════════════";
    println!("{}", RULE);
    println!("  CONCRETE DAMAGED PLASTICITY - {}", material.name);
    println!("{}", RULE);
    println!();
    println!(
        "  fcr = {:.3} MPa   ftr = {:.3} MPa   Er = {:.1} MPa",
        material.fcr, material.ftr, material.er
    );
    println!();

    for curve in [compression, tension] {
        let p = &curve.parameters;
        let exponent = p
            .exponent
            .map(|n| format!(", n = {:.4}", n))
            .unwrap_or_default();
        println!(
            "{} [{}] (ε0 = {:.6}, α = {:.4}, ρ = {:.4}{})",
            curve.branch,
            curve.branch.clause(),
            p.peak_strain,
            p.alpha,
            p.rho,
            exponent
        );
        println!("  {:>4}  {:>10}  {:>12}  {:>12}", "#", "damage", "stress", "strain");
        for (i, (d, s, e)) in curve.rows().enumerate() {
            println!("  {:>4}  {:>10.5}  {:>12.6}  {:>12.6}", i, d, s, e);
        }
        println!();
    }
}

fn print_curves_csv(compression: &DamageCurve, tension: &DamageCurve) {
    println!("branch,index,damage,stress,strain");
    for curve in [compression, tension] {
        for (i, (d, s, e)) in curve.rows().enumerate() {
            println!("{},{},{},{},{}", curve.branch, i, d, s, e);
        }
    }
}
