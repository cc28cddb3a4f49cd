use std::{
    collections::BTreeSet,
    fmt::Display,
    io::Write,
    path::{Path, PathBuf},
};

use log::{info, warn};

pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod spectrum;

#[cfg(test)]
mod tests;

pub use config::{Config, Target};
pub use error::Error;
use output::{Assembler, MANIFEST, ManifestEntry, MoleculeOut, sort_manifest};
use record::{Record, Records};
use spectrum::{Curves, Spectrum};

/// the IR and Raman curves for every molecule in a run
#[derive(Debug, Default)]
pub struct SpectrumSource {
    pub ir: Option<Curves>,
    pub raman: Option<Curves>,
}

impl SpectrumSource {
    /// load the curves named in `config` for each of its molecules
    pub fn load(config: &Config) -> Result<Self, Error> {
        let wanted: BTreeSet<usize> =
            config.molecules.iter().map(|m| m.index).collect();
        let load = |p: &Option<PathBuf>| -> Result<Option<Curves>, Error> {
            p.as_ref().map(|p| Curves::load(p, &wanted)).transpose()
        };
        Ok(Self {
            ir: load(&config.ir)?,
            raman: load(&config.raman)?,
        })
    }

    fn spectrum(&self, config: &Config, index: usize) -> Option<Spectrum> {
        Spectrum::new(
            &config.spectrum_grid(),
            self.ir.as_ref().and_then(|c| c.get(index)),
            self.raman.as_ref().and_then(|c| c.get(index)),
        )
    }
}

/// run the full pipeline on `record`: center the molecule at its center of
/// mass, compute its normal modes, infer its bonds, and assemble the output
pub fn process_record(
    config: &Config,
    name: &str,
    record: &Record,
    spectrum: Option<Spectrum>,
) -> Result<MoleculeOut, Error> {
    let mut mol = record.molecule();
    mol.center();

    let harm = config
        .harmonic()
        .run(&record.hessian, &record.atomic_numbers)?;
    let bonds = mol.bonds(&config.bond_params());

    Ok(Assembler {
        freq_cutoff: config.freq_cutoff,
    }
    .assemble(
        name,
        &record.smiles,
        &mol,
        bonds,
        &harm,
        record.dipole.as_deref(),
        spectrum,
    ))
}

/// locate the record for `target` in `records` and process it
pub fn process(
    records: &mut Records,
    config: &Config,
    target: &Target,
    spectra: &SpectrumSource,
) -> Result<MoleculeOut, Error> {
    let (path, record) = records.load(target.index)?;
    info!("processing {} from {}", target.name, path.display());
    process_record(
        config,
        &target.name,
        &record,
        spectra.spectrum(config, target.index),
    )
}

/// the result of processing one molecule
#[derive(Debug)]
pub struct Outcome {
    pub target: Target,
    pub result: Result<ManifestEntry, Error>,
}

/// the outcome of every molecule in a run
#[derive(Debug, Default)]
pub struct Summary {
    pub outcomes: Vec<Outcome>,
}

impl Summary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<20}{:>8}{:>8}{:>8}  Status",
            "Molecule", "Index", "Atoms", "Modes"
        )?;
        for Outcome { target, result } in &self.outcomes {
            match result {
                Ok(e) => writeln!(
                    f,
                    "{:<20}{:>8}{:>8}{:>8}  ok",
                    target.name, target.index, e.atom_count, e.mode_count
                )?,
                Err(e) => writeln!(
                    f,
                    "{:<20}{:>8}{:>8}{:>8}  failed: {e}",
                    target.name, target.index, "-", "-"
                )?,
            }
        }
        write!(
            f,
            "{} succeeded, {} failed",
            self.succeeded(),
            self.failed()
        )
    }
}

fn write_json<T: serde::Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), Error> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(|e| Error::io(path, e))
}

/// process every molecule in `config`, writing one `<name>.json` per
/// successful molecule and the manifest to the output directory. failures on
/// individual molecules are logged, reported to `w`, and collected in the
/// returned [Summary] without stopping the batch. an invalid `config` or an
/// unreadable records location fails the whole run
pub fn run<W: Write>(w: &mut W, config: &Config) -> Result<Summary, Error> {
    config.validate()?;
    let out = &config.output;
    std::fs::create_dir_all(out).map_err(|e| Error::io(out, e))?;
    let mut records = Records::open(&config.records)?;
    let spectra = SpectrumSource::load(config)?;

    let mut summary = Summary::default();
    let mut manifest = Vec::new();
    for target in &config.molecules {
        let result = process(&mut records, config, target, &spectra)
            .and_then(|mol| {
                let path = out.join(format!("{}.json", target.name));
                write_json(&path, &mol)?;
                info!("wrote {}", path.display());
                Ok(ManifestEntry::new(&target.name, &mol))
            });
        match &result {
            Ok(e) => {
                writeln!(
                    w,
                    "{}: {} atoms, {} modes",
                    target.name, e.atom_count, e.mode_count
                )
                .map_err(|e| Error::io(out, e))?;
                manifest.push(e.clone());
            }
            Err(e) => {
                warn!("skipping {} ({}): {e}", target.name, target.index);
                writeln!(w, "{}: failed", target.name)
                    .map_err(|e| Error::io(out, e))?;
            }
        }
        summary.outcomes.push(Outcome {
            target: target.clone(),
            result,
        });
    }

    sort_manifest(&mut manifest);
    let path = out.join(MANIFEST);
    write_json(&path, &manifest)?;
    info!("wrote manifest with {} molecules", manifest.len());

    Ok(summary)
}
